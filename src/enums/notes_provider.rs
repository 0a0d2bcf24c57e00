use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NotesProvider {
    /// Calls the Anthropic Messages API directly.
    #[default]
    Anthropic,
    /// Posts to a self-hosted endpoint that streams the notes payload.
    Http,
}

impl fmt::Display for NotesProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Anthropic => f.write_str("anthropic"),
            Self::Http => f.write_str("http"),
        }
    }
}
