use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use crate::enums::transport_error::TransportError;
use crate::structs::notes_request::NotesRequest;

pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Vec<u8>, TransportError>> + Send>>;

/// Produces the raw byte stream of a notes payload. End of stream is the
/// only terminator; there is no length framing.
#[async_trait]
pub trait NotesBackend: Send + Sync {
    async fn open_stream(&self, request: &NotesRequest) -> Result<ByteStream, TransportError>;
}
