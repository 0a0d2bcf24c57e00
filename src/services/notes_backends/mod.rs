pub mod anthropic;
pub mod http;

use crate::enums::transport_error::TransportError;

/// Turns a non-2xx response into the matching [`TransportError`].
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, TransportError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    log::error!("❌ API Error Response ({}): {}", status, error_text);
    Err(TransportError::from_status(status.as_u16(), error_text))
}
