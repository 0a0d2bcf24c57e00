use async_trait::async_trait;
use futures::{future, StreamExt};
use reqwest::Client;
use crate::config::constants::ANTHROPIC_VERSION;
use crate::enums::stream_event_data::StreamEventData;
use crate::enums::transport_error::TransportError;
use crate::helpers::prompt_generator;
use crate::helpers::utf8_chunk_decoder::Utf8ChunkDecoder;
use crate::prompts::release_notes_system_prompt::RELEASE_NOTES_SYSTEM_PROMPT;
use crate::services::notes_backends::ensure_success;
use crate::structs::ai::anthropic_notes_request::{AnthropicNotesRequest, AnthropicTurn};
use crate::structs::config::ai_config::AiConfig;
use crate::structs::notes_request::NotesRequest;
use crate::traits::notes_backend::{ByteStream, NotesBackend};

#[derive(Default)]
struct SseState {
    decoder: Utf8ChunkDecoder,
    line_buffer: String,
}

/// Generates notes with the Anthropic Messages API and yields the model's
/// text deltas as the notes byte stream.
#[derive(Clone)]
pub struct AnthropicNotesBackend {
    api_key: String,
    base_url: String,
    client: Client,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl AnthropicNotesBackend {
    pub fn new(api_key: String, config: &AiConfig) -> Self {
        Self {
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        }
    }

    fn get_request(&self, request: &NotesRequest) -> AnthropicNotesRequest {
        AnthropicNotesRequest {
            model: self.model.clone(),
            system: RELEASE_NOTES_SYSTEM_PROMPT,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            messages: vec![AnthropicTurn {
                role: "user",
                content: prompt_generator::generate_prompt(request),
            }],
            stream: true,
        }
    }

    /// Parses one SSE line. Only text deltas and error events produce items.
    pub(crate) fn parse_sse_line(line: &str) -> Option<Result<Vec<u8>, TransportError>> {
        let data = line.trim_end_matches('\r').strip_prefix("data:")?.trim_start();

        if data.is_empty() || data == "[DONE]" {
            return None;
        }

        match serde_json::from_str::<StreamEventData>(data) {
            Ok(StreamEventData::ContentBlockDelta { delta }) => delta.into_text().map(|text| Ok(text.into_bytes())),
            Ok(StreamEventData::Error { error }) => Some(Err(TransportError::ApiError(format!(
                "{}: {}",
                error.error_type, error.message
            )))),
            Ok(_) => None,
            Err(e) => Some(Err(TransportError::SerializationError(format!("Failed to parse event: {}", e)))),
        }
    }

    fn drain_lines(state: &mut SseState) -> Vec<Result<Vec<u8>, TransportError>> {
        let mut items = Vec::new();

        while let Some(newline_pos) = state.line_buffer.find('\n') {
            let line: String = state.line_buffer.drain(..=newline_pos).collect();
            if let Some(item) = Self::parse_sse_line(line.trim_end_matches('\n')) {
                items.push(item);
            }
        }

        items
    }

    /// Parses whatever is left once the body ends, including a last line
    /// that never got its newline.
    fn flush_remaining(state: &mut SseState) -> Vec<Result<Vec<u8>, TransportError>> {
        let tail = state.decoder.finish();
        state.line_buffer.push_str(&tail);

        let mut items = Self::drain_lines(state);
        let last_line = std::mem::take(&mut state.line_buffer);
        if let Some(item) = Self::parse_sse_line(&last_line) {
            items.push(item);
        }
        items
    }
}

#[async_trait]
impl NotesBackend for AnthropicNotesBackend {
    async fn open_stream(&self, request: &NotesRequest) -> Result<ByteStream, TransportError> {
        let url = format!("{}/messages", self.base_url);
        let request_body = self.get_request(request);
        log::info!("📦 Request model: {}", request_body.model);

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("Content-Type", "application/json")
            .header("Accept", "text/event-stream")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| TransportError::NetworkError(e.to_string()))?;

        let response = ensure_success(response).await?;

        let stream = response
            .bytes_stream()
            .map(Some)
            .chain(futures::stream::once(future::ready(None)))
            .scan(SseState::default(), |state, chunk| {
                let items = match chunk {
                    Some(Ok(bytes)) => {
                        let text = state.decoder.decode(&bytes);
                        state.line_buffer.push_str(&text);
                        Self::drain_lines(state)
                    }
                    Some(Err(e)) => vec![Err(TransportError::NetworkError(format!("Stream error: {}", e)))],
                    None => Self::flush_remaining(state),
                };
                future::ready(Some(futures::stream::iter(items)))
            })
            .flatten();

        Ok(Box::pin(stream))
    }
}
