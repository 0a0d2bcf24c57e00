use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use futures::StreamExt;
use crate::enums::transport_error::TransportError;
use crate::helpers::utf8_chunk_decoder::Utf8ChunkDecoder;
use crate::services::cache_writer::CacheWriter;
use crate::services::note_extractor::NoteExtractor;
use crate::structs::change_record::ChangeRecord;
use crate::structs::extraction_update::ExtractionUpdate;
use crate::structs::generation_outcome::GenerationOutcome;
use crate::structs::note_fields_update::NoteFieldsUpdate;
use crate::structs::note_progress::NoteProgress;
use crate::traits::notes_backend::NotesBackend;
use crate::traits::summary_cache::SummaryCache;

struct ExtractionSession {
    id: String,
    decoder: Utf8ChunkDecoder,
    extractor: NoteExtractor,
    chunk_count: usize,
}

impl ExtractionSession {
    fn new(id: String) -> Self {
        Self {
            id,
            decoder: Utf8ChunkDecoder::new(),
            extractor: NoteExtractor::new(),
            chunk_count: 0,
        }
    }

    fn progress(&self, update: &ExtractionUpdate) -> NoteProgress {
        NoteProgress {
            id: self.id.clone(),
            developer_note: self.extractor.developer_note().to_string(),
            marketing_note: self.extractor.marketing_note().to_string(),
            changed: update.changed_fields(),
        }
    }
}

/// Runs generation requests: streams a backend payload through the
/// extractor, reports progress and keeps the cache in step.
pub struct NoteGenerator {
    backend: Arc<dyn NotesBackend>,
    cache: Arc<dyn SummaryCache>,
    request_timeout: Duration,
}

impl NoteGenerator {
    pub fn new(backend: Arc<dyn NotesBackend>, cache: Arc<dyn SummaryCache>, request_timeout: Duration) -> Self {
        Self {
            backend,
            cache,
            request_timeout,
        }
    }

    /// Generates both notes for `record`.
    ///
    /// `on_progress` runs after every chunk that changed a value. Only
    /// transport failures (including the request timeout) are errors; cache
    /// failures are logged and the final one is reported on the outcome.
    pub async fn generate<F>(&self, record: &ChangeRecord, mut on_progress: F) -> Result<GenerationOutcome, TransportError>
    where
        F: FnMut(&NoteProgress),
    {
        log::info!("✍️ Generating notes for {}", record.id);

        let writer = CacheWriter::spawn(Arc::clone(&self.cache), record.id.clone());
        let mut session = ExtractionSession::new(record.id.clone());

        let streamed = tokio::time::timeout(
            self.request_timeout,
            self.stream_into(record, &mut session, &writer, &mut on_progress),
        )
        .await;

        let failure = match streamed {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(e),
            Err(_) => Some(TransportError::Timeout(self.request_timeout)),
        };

        if let Some(error) = failure {
            log::error!("❌ Notes for {} failed after {} chunks: {}", record.id, session.chunk_count, error);
            writer.abort().await;
            return Err(error);
        }

        let trailing = session.decoder.finish();
        let update = session.extractor.push_chunk(&trailing);
        if !update.is_empty() {
            on_progress(&session.progress(&update));
        }

        let chunk_count = session.chunk_count;
        let (developer_note, marketing_note) = session.extractor.into_notes();
        if developer_note.is_empty() && marketing_note.is_empty() {
            log::warn!("⚠️ Stream for {} ended without any notes", record.id);
        }

        let notes_updated_at = Utc::now();
        let persist_error = writer
            .finish(NoteFieldsUpdate::final_notes(
                developer_note.clone(),
                marketing_note.clone(),
                notes_updated_at,
            ))
            .await;

        log::info!("✅ Notes for {} ready ({} chunks)", record.id, chunk_count);

        Ok(GenerationOutcome {
            id: record.id.clone(),
            developer_note,
            marketing_note,
            notes_updated_at,
            chunk_count,
            persist_error,
        })
    }

    async fn stream_into<F>(
        &self,
        record: &ChangeRecord,
        session: &mut ExtractionSession,
        writer: &CacheWriter,
        on_progress: &mut F,
    ) -> Result<(), TransportError>
    where
        F: FnMut(&NoteProgress),
    {
        let request = record.to_notes_request();
        let mut stream = self.backend.open_stream(&request).await?;

        while let Some(chunk) = stream.next().await {
            let bytes = chunk?;
            session.chunk_count += 1;

            let text = session.decoder.decode(&bytes);
            let update = session.extractor.push_chunk(&text);
            log::trace!("{}: chunk {} ({} bytes)", session.id, session.chunk_count, bytes.len());

            if update.is_empty() {
                continue;
            }

            on_progress(&session.progress(&update));
            writer.queue_partial(update.into_fields_update());
        }

        Ok(())
    }
}
