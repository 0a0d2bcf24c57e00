use std::fmt;

/// The two string fields a notes payload carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteField {
    Developer,
    Marketing,
}

impl NoteField {
    pub const ALL: [Self; 2] = [Self::Developer, Self::Marketing];

    /// Key of the field inside the streamed JSON object.
    pub const fn json_key(self) -> &'static str {
        match self {
            Self::Developer => "developer_notes",
            Self::Marketing => "marketing_notes",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Developer => "Developer notes",
            Self::Marketing => "Marketing notes",
        }
    }

    pub const fn emoji(self) -> &'static str {
        match self {
            Self::Developer => "🛠️",
            Self::Marketing => "📣",
        }
    }
}

impl fmt::Display for NoteField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_key())
    }
}
