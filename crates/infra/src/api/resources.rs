//! Generic CRUD service for backend collections

use std::marker::PhantomData;
use std::sync::Arc;

use importdesk_domain::{ListQuery, Page, Quote, QuoteStatus, QuoteStatusUpdate, Resource};
use tracing::instrument;

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::ApiRequest;

/// List, read, create, update and delete records of one [`Resource`]
pub struct ResourceService<R: Resource> {
    client: Arc<ApiClient>,
    _resource: PhantomData<fn() -> R>,
}

impl<R: Resource> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self { client: Arc::clone(&self.client), _resource: PhantomData }
    }
}

impl<R: Resource> std::fmt::Debug for ResourceService<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceService").field("path", &R::PATH).finish()
    }
}

impl<R: Resource> ResourceService<R> {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client, _resource: PhantomData }
    }

    #[instrument(skip(self, query), fields(path = R::PATH, page = query.page()))]
    pub async fn list(&self, query: &ListQuery) -> Result<Page<R>, ApiError> {
        let request = ApiRequest::get(R::PATH).with_query(query.to_query_pairs());
        self.client.fetch(request).await
    }

    pub async fn get(&self, id: &str) -> Result<R, ApiError> {
        self.client.get(&R::item_path(id)).await
    }

    pub async fn create(&self, input: &R::Input) -> Result<R, ApiError> {
        self.client.post(R::PATH, input).await
    }

    pub async fn update(&self, id: &str, input: &R::Input) -> Result<R, ApiError> {
        self.client.put(&R::item_path(id), input).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&R::item_path(id)).await
    }
}

impl ResourceService<Quote> {
    /// Move a quote to `status`; `Reserved` may carry the hold expiry.
    pub async fn set_status(
        &self,
        id: &str,
        update: &QuoteStatusUpdate,
    ) -> Result<Quote, ApiError> {
        let path = format!("{}/status", Quote::item_path(id));
        self.client.patch(&path, update).await
    }

    pub async fn cancel(&self, id: &str) -> Result<Quote, ApiError> {
        let update = QuoteStatusUpdate { status: QuoteStatus::Cancelled, reserved_until: None };
        self.set_status(id, &update).await
    }
}
