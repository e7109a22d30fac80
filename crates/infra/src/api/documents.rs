//! Document listing and upload

use std::sync::Arc;

use importdesk_domain::{Document, DocumentKind, ListQuery, Page};
use tracing::{info, instrument};

use super::client::ApiClient;
use super::errors::ApiError;
use super::request::{ApiRequest, MultipartPayload};

const DOCUMENTS_PATH: &str = "/documents";

/// File to upload with its metadata
#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub file_name: String,
    pub mime: Option<String>,
    pub kind: DocumentKind,
    pub listing_id: Option<String>,
    pub quote_id: Option<String>,
    pub bytes: Vec<u8>,
}

impl DocumentUpload {
    pub fn new(file_name: impl Into<String>, kind: DocumentKind, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime: None,
            kind,
            listing_id: None,
            quote_id: None,
            bytes,
        }
    }

    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn for_listing(mut self, listing_id: impl Into<String>) -> Self {
        self.listing_id = Some(listing_id.into());
        self
    }

    pub fn for_quote(mut self, quote_id: impl Into<String>) -> Self {
        self.quote_id = Some(quote_id.into());
        self
    }

    fn into_payload(self) -> MultipartPayload {
        let mut payload = MultipartPayload::new().text("kind", self.kind.to_string());
        if let Some(listing_id) = self.listing_id {
            payload = payload.text("listing_id", listing_id);
        }
        if let Some(quote_id) = self.quote_id {
            payload = payload.text("quote_id", quote_id);
        }
        payload.file("file", self.file_name, self.mime.as_deref(), self.bytes)
    }
}

#[derive(Debug, Clone)]
pub struct DocumentService {
    client: Arc<ApiClient>,
}

impl DocumentService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Page<Document>, ApiError> {
        let request = ApiRequest::get(DOCUMENTS_PATH).with_query(query.to_query_pairs());
        self.client.fetch(request).await
    }

    /// Upload as `multipart/form-data`; the boundary header is written by the
    /// transport.
    #[instrument(skip(self, upload), fields(file_name = %upload.file_name, size = upload.bytes.len()))]
    pub async fn upload(&self, upload: DocumentUpload) -> Result<Document, ApiError> {
        let request = ApiRequest::post(DOCUMENTS_PATH).with_multipart(upload.into_payload());
        let document: Document = self.client.fetch(request).await?;
        info!(document_id = %document.id, "Document uploaded");
        Ok(document)
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        self.client.delete(&format!("{DOCUMENTS_PATH}/{id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_payload_carries_metadata_and_file() {
        let payload = DocumentUpload::new("title.pdf", DocumentKind::Registration, vec![1, 2])
            .with_mime("application/pdf")
            .for_listing("l-1")
            .into_payload();

        let names: Vec<&str> = payload.fields().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(names, vec!["kind", "listing_id"]);
        assert_eq!(payload.fields()[0].1, "registration");
        assert_eq!(payload.files()[0].file_name, "title.pdf");
        assert_eq!(payload.files()[0].mime.as_deref(), Some("application/pdf"));
    }
}
