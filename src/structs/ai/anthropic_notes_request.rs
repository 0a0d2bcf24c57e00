use serde::Serialize;

#[derive(Serialize, Debug)]
pub struct AnthropicTurn {
    pub role: &'static str,
    pub content: String,
}

/// Streaming Messages API request for one change's notes.
#[derive(Serialize, Debug)]
pub struct AnthropicNotesRequest {
    pub model: String,
    pub system: &'static str,
    pub max_tokens: u32,
    pub temperature: f32,
    pub messages: Vec<AnthropicTurn>,
    pub stream: bool,
}
