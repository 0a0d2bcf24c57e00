use crate::enums::note_field::NoteField;
use crate::structs::note_fields_update::NoteFieldsUpdate;

/// Fields whose best value changed after one chunk, with their new values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionUpdate {
    pub developer: Option<String>,
    pub marketing: Option<String>,
}

impl ExtractionUpdate {
    pub fn is_empty(&self) -> bool {
        self.developer.is_none() && self.marketing.is_none()
    }

    pub fn set(&mut self, field: NoteField, value: String) {
        match field {
            NoteField::Developer => self.developer = Some(value),
            NoteField::Marketing => self.marketing = Some(value),
        }
    }

    pub fn changed_fields(&self) -> Vec<NoteField> {
        NoteField::ALL
            .into_iter()
            .filter(|field| match field {
                NoteField::Developer => self.developer.is_some(),
                NoteField::Marketing => self.marketing.is_some(),
            })
            .collect()
    }

    pub fn into_fields_update(self) -> NoteFieldsUpdate {
        NoteFieldsUpdate {
            developer_note: self.developer,
            marketing_note: self.marketing,
            notes_updated_at: None,
        }
    }
}
