//! Conversations and messages

use std::sync::Arc;

use importdesk_domain::{Conversation, ListQuery, Message, NewMessage, Page};

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::ApiRequest;

const CONVERSATIONS_PATH: &str = "/conversations";

#[derive(Debug, Clone)]
pub struct ConversationService {
    client: Arc<ApiClient>,
}

impl ConversationService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Conversation>, ApiError> {
        let request = ApiRequest::get(CONVERSATIONS_PATH).with_query(query.to_query_pairs());
        self.client.fetch(request).await
    }

    /// Messages of one conversation, oldest first as returned by the backend
    pub async fn messages(&self, conversation_id: &str) -> Result<Vec<Message>, ApiError> {
        self.client.get(&messages_path(conversation_id)).await
    }

    pub async fn send(&self, conversation_id: &str, body: &str) -> Result<Message, ApiError> {
        let message = NewMessage { body: body.to_string() };
        self.client.post(&messages_path(conversation_id), &message).await
    }
}

fn messages_path(conversation_id: &str) -> String {
    format!("{CONVERSATIONS_PATH}/{conversation_id}/messages")
}
