use async_trait::async_trait;
use crate::enums::cache_error::CacheError;
use crate::structs::change_record::ChangeRecord;
use crate::structs::note_fields_update::NoteFieldsUpdate;

/// Durable table of [`ChangeRecord`]s keyed by `id`. Each call is atomic on
/// its own; there is no cross-call transaction.
#[async_trait]
pub trait SummaryCache: Send + Sync {
    async fn get_all(&self) -> Result<Vec<ChangeRecord>, CacheError>;

    async fn get(&self, id: &str) -> Result<Option<ChangeRecord>, CacheError>;

    /// Inserts or fully replaces each record by `id`. No field merge.
    async fn upsert_many(&self, records: Vec<ChangeRecord>) -> Result<(), CacheError>;

    /// Merges the present fields into the stored record. Fails with
    /// [`CacheError::RecordNotFound`] and changes nothing if `id` is unknown.
    async fn update_fields(&self, id: &str, fields: NoteFieldsUpdate) -> Result<(), CacheError>;

    async fn clear_all(&self) -> Result<(), CacheError>;
}
