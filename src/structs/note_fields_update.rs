use chrono::{DateTime, Utc};

/// Partial set of note columns. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFieldsUpdate {
    pub developer_note: Option<String>,
    pub marketing_note: Option<String>,
    pub notes_updated_at: Option<DateTime<Utc>>,
}

impl NoteFieldsUpdate {
    pub fn developer(note: impl Into<String>) -> Self {
        Self {
            developer_note: Some(note.into()),
            ..Self::default()
        }
    }

    pub fn marketing(note: impl Into<String>) -> Self {
        Self {
            marketing_note: Some(note.into()),
            ..Self::default()
        }
    }

    pub fn final_notes(developer_note: String, marketing_note: String, at: DateTime<Utc>) -> Self {
        Self {
            developer_note: Some(developer_note),
            marketing_note: Some(marketing_note),
            notes_updated_at: Some(at),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.developer_note.is_none() && self.marketing_note.is_none() && self.notes_updated_at.is_none()
    }

    /// Folds a newer update into this one; fields set in `newer` win.
    pub fn merge(&mut self, newer: Self) {
        if newer.developer_note.is_some() {
            self.developer_note = newer.developer_note;
        }
        if newer.marketing_note.is_some() {
            self.marketing_note = newer.marketing_note;
        }
        if newer.notes_updated_at.is_some() {
            self.notes_updated_at = newer.notes_updated_at;
        }
    }
}
