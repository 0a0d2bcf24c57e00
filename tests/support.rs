use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use futures::stream;
use futures::StreamExt;

use prnotes::enums::cache_error::CacheError;
use prnotes::enums::transport_error::TransportError;
use prnotes::structs::change_record::ChangeRecord;
use prnotes::structs::note_fields_update::NoteFieldsUpdate;
use prnotes::structs::notes_request::NotesRequest;
use prnotes::traits::notes_backend::{ByteStream, NotesBackend};
use prnotes::traits::summary_cache::SummaryCache;

pub fn record(id: &str) -> ChangeRecord {
    ChangeRecord {
        id: id.to_string(),
        description: format!("Change {}\n\nDetails", id),
        diff_text: "--- a/src/lib.rs\n+++ b/src/lib.rs\n+fn fixed() {}\n".to_string(),
        source_url: format!("https://github.com/acme/app/pull/{}", id),
        fetched_at: Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
        developer_note: None,
        marketing_note: None,
        notes_updated_at: None,
    }
}

/// Replays a fixed list of chunks, optionally paced and optionally hanging
/// afterwards.
pub struct ScriptedBackend {
    chunks: Vec<Result<Vec<u8>, TransportError>>,
    hang_after: bool,
    gap: Option<Duration>,
    open_error: Option<TransportError>,
}

impl ScriptedBackend {
    pub fn text(chunks: &[&str]) -> Self {
        Self::bytes(chunks.iter().map(|c| c.as_bytes().to_vec()).collect())
    }

    pub fn bytes(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            chunks: chunks.into_iter().map(Ok).collect(),
            hang_after: false,
            gap: None,
            open_error: None,
        }
    }

    pub fn with_items(chunks: Vec<Result<Vec<u8>, TransportError>>) -> Self {
        Self {
            chunks,
            hang_after: false,
            gap: None,
            open_error: None,
        }
    }

    pub fn failing_to_open(error: TransportError) -> Self {
        Self {
            chunks: Vec::new(),
            hang_after: false,
            gap: None,
            open_error: Some(error),
        }
    }

    pub fn hanging(mut self) -> Self {
        self.hang_after = true;
        self
    }

    /// Waits `gap` before yielding each chunk.
    pub fn paced(mut self, gap: Duration) -> Self {
        self.gap = Some(gap);
        self
    }
}

#[async_trait]
impl NotesBackend for ScriptedBackend {
    async fn open_stream(&self, _request: &NotesRequest) -> Result<ByteStream, TransportError> {
        if let Some(error) = &self.open_error {
            return Err(error.clone());
        }

        let gap = self.gap;
        let scripted = stream::iter(self.chunks.clone()).then(move |item| async move {
            if let Some(gap) = gap {
                tokio::time::sleep(gap).await;
            }
            item
        });
        if self.hang_after {
            Ok(Box::pin(scripted.chain(stream::pending())))
        } else {
            Ok(Box::pin(scripted))
        }
    }
}

/// Delegates to an inner cache but rejects partial note writes, and
/// optionally final ones too.
pub struct FlakyCache<C> {
    pub inner: C,
    pub fail_final: bool,
    pub rejected: AtomicUsize,
}

impl<C> FlakyCache<C> {
    pub fn new(inner: C, fail_final: bool) -> Self {
        Self {
            inner,
            fail_final,
            rejected: AtomicUsize::new(0),
        }
    }

    pub fn rejected(&self) -> usize {
        self.rejected.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<C: SummaryCache> SummaryCache for FlakyCache<C> {
    async fn get_all(&self) -> Result<Vec<ChangeRecord>, CacheError> {
        self.inner.get_all().await
    }

    async fn get(&self, id: &str) -> Result<Option<ChangeRecord>, CacheError> {
        self.inner.get(id).await
    }

    async fn upsert_many(&self, records: Vec<ChangeRecord>) -> Result<(), CacheError> {
        self.inner.upsert_many(records).await
    }

    async fn update_fields(&self, id: &str, fields: NoteFieldsUpdate) -> Result<(), CacheError> {
        let is_final = fields.notes_updated_at.is_some();
        if !is_final || self.fail_final {
            self.rejected.fetch_add(1, Ordering::SeqCst);
            return Err(CacheError::storage("update_fields", "disk quota exceeded"));
        }
        self.inner.update_fields(id, fields).await
    }

    async fn clear_all(&self) -> Result<(), CacheError> {
        self.inner.clear_all().await
    }
}

pub fn shared<C: SummaryCache + 'static>(cache: C) -> Arc<C> {
    Arc::new(cache)
}

/// Delegates to an inner cache while recording every `update_fields` call,
/// optionally holding each one for `delay` first.
pub struct RecordingCache<C> {
    pub inner: C,
    pub delay: Option<Duration>,
    pub updates: Mutex<Vec<NoteFieldsUpdate>>,
}

impl<C> RecordingCache<C> {
    pub fn new(inner: C) -> Self {
        Self {
            inner,
            delay: None,
            updates: Mutex::new(Vec::new()),
        }
    }

    pub fn slow(inner: C, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::new(inner)
        }
    }

    /// Updates in the order their writes started.
    pub fn updates(&self) -> Vec<NoteFieldsUpdate> {
        self.updates.lock().unwrap().clone()
    }
}

#[async_trait]
impl<C: SummaryCache> SummaryCache for RecordingCache<C> {
    async fn get_all(&self) -> Result<Vec<ChangeRecord>, CacheError> {
        self.inner.get_all().await
    }

    async fn get(&self, id: &str) -> Result<Option<ChangeRecord>, CacheError> {
        self.inner.get(id).await
    }

    async fn upsert_many(&self, records: Vec<ChangeRecord>) -> Result<(), CacheError> {
        self.inner.upsert_many(records).await
    }

    async fn update_fields(&self, id: &str, fields: NoteFieldsUpdate) -> Result<(), CacheError> {
        self.updates.lock().unwrap().push(fields.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.update_fields(id, fields).await
    }

    async fn clear_all(&self) -> Result<(), CacheError> {
        self.inner.clear_all().await
    }
}
