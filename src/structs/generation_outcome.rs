use chrono::{DateTime, Utc};
use crate::enums::cache_error::CacheError;

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub id: String,
    pub developer_note: String,
    pub marketing_note: String,
    pub notes_updated_at: DateTime<Utc>,
    pub chunk_count: usize,
    /// Set when the final cache write failed. Never fails the generation.
    pub persist_error: Option<CacheError>,
}
