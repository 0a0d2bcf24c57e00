use crate::enums::note_field::NoteField;

/// In-memory view of one generation request after a chunk changed a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteProgress {
    pub id: String,
    pub developer_note: String,
    pub marketing_note: String,
    pub changed: Vec<NoteField>,
}

impl NoteProgress {
    pub fn value(&self, field: NoteField) -> &str {
        match field {
            NoteField::Developer => &self.developer_note,
            NoteField::Marketing => &self.marketing_note,
        }
    }
}
