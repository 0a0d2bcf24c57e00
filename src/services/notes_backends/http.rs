use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use crate::config::constants::USER_AGENT;
use crate::enums::transport_error::TransportError;
use crate::services::notes_backends::ensure_success;
use crate::structs::notes_request::NotesRequest;
use crate::traits::notes_backend::{ByteStream, NotesBackend};

/// Posts `{id, description, diffText}` to a notes endpoint and hands its
/// response body through unchanged.
#[derive(Clone)]
pub struct HttpNotesBackend {
    client: Client,
    endpoint: String,
}

impl HttpNotesBackend {
    pub fn new(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }
}

#[async_trait]
impl NotesBackend for HttpNotesBackend {
    async fn open_stream(&self, request: &NotesRequest) -> Result<ByteStream, TransportError> {
        log::debug!("📤 POST {} for {}", self.endpoint, request.id);

        let response = self
            .client
            .post(&self.endpoint)
            .header("User-Agent", USER_AGENT)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::NetworkError(e.to_string()))?;

        let response = ensure_success(response).await?;

        let stream = response.bytes_stream().map(|chunk| {
            chunk
                .map(|bytes| bytes.to_vec())
                .map_err(|e| TransportError::NetworkError(format!("Stream error: {}", e)))
        });

        Ok(Box::pin(stream))
    }
}
