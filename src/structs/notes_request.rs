use serde::{Deserialize, Serialize};

/// Body sent to a notes backend for one generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesRequest {
    pub id: String,
    pub description: String,
    pub diff_text: String,
}
