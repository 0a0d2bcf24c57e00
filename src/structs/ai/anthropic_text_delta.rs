use serde::Deserialize;

/// `delta` payload of a `content_block_delta` event.
#[derive(Deserialize, Debug, Clone)]
pub struct AnthropicTextDelta {
    #[serde(rename = "type")]
    pub delta_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

impl AnthropicTextDelta {
    pub fn into_text(self) -> Option<String> {
        if self.delta_type == "text_delta" {
            self.text.filter(|text| !text.is_empty())
        } else {
            None
        }
    }
}
