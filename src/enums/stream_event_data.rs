use serde::Deserialize;
use crate::structs::ai::anthropic_stream_error::AnthropicStreamError;
use crate::structs::ai::anthropic_text_delta::AnthropicTextDelta;

/// Server-sent event payloads of the Anthropic streaming Messages API.
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum StreamEventData {
    #[serde(rename = "message_start")]
    MessageStart,
    #[serde(rename = "content_block_start")]
    ContentBlockStart,
    #[serde(rename = "content_block_delta")]
    ContentBlockDelta {
        delta: AnthropicTextDelta,
    },
    #[serde(rename = "content_block_stop")]
    ContentBlockStop,
    #[serde(rename = "message_delta")]
    MessageDelta,
    #[serde(rename = "message_stop")]
    MessageStop,
    #[serde(rename = "ping")]
    Ping,
    #[serde(rename = "error")]
    Error {
        error: AnthropicStreamError,
    },
    #[serde(other)]
    Unknown,
}
