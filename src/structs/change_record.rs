use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use crate::structs::notes_request::NotesRequest;

/// One merged change as held in the local cache, plus any generated notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    pub id: String,
    pub description: String,
    pub diff_text: String,
    pub source_url: String,
    pub fetched_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marketing_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes_updated_at: Option<DateTime<Utc>>,
}

impl ChangeRecord {
    pub fn new(id: String, description: String, diff_text: String, source_url: String) -> Self {
        Self {
            id,
            description,
            diff_text,
            source_url,
            fetched_at: Utc::now(),
            developer_note: None,
            marketing_note: None,
            notes_updated_at: None,
        }
    }

    pub fn has_both_notes(&self) -> bool {
        self.developer_note.as_deref().is_some_and(|n| !n.is_empty())
            && self.marketing_note.as_deref().is_some_and(|n| !n.is_empty())
    }

    /// First line of the description, used as a title in listings.
    pub fn title(&self) -> &str {
        self.description.lines().next().unwrap_or_default()
    }

    pub fn to_notes_request(&self) -> NotesRequest {
        NotesRequest {
            id: self.id.clone(),
            description: self.description.clone(),
            diff_text: self.diff_text.clone(),
        }
    }

    /// Copies generated notes from an older copy of the same change.
    pub fn carry_notes_from(&mut self, previous: &Self) {
        self.developer_note.clone_from(&previous.developer_note);
        self.marketing_note.clone_from(&previous.marketing_note);
        self.notes_updated_at = previous.notes_updated_at;
    }
}
