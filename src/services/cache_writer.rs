use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use crate::enums::cache_error::CacheError;
use crate::structs::note_fields_update::NoteFieldsUpdate;
use crate::traits::summary_cache::SummaryCache;

enum WriteCommand {
    Partial(NoteFieldsUpdate),
    Final(NoteFieldsUpdate),
}

/// Ordered, coalescing write queue for one generation request.
///
/// Partial writes are fire-and-forget: queuing never blocks and their
/// failures are only logged. Writes are applied strictly in queue order, and
/// partials that pile up while a write is in flight are merged into one.
pub struct CacheWriter {
    id: String,
    sender: UnboundedSender<WriteCommand>,
    handle: JoinHandle<Option<CacheError>>,
    aborted: Arc<AtomicBool>,
}

impl CacheWriter {
    pub fn spawn(cache: Arc<dyn SummaryCache>, id: String) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let aborted = Arc::new(AtomicBool::new(false));
        let handle = tokio::spawn(Self::run(cache, id.clone(), receiver, Arc::clone(&aborted)));

        Self {
            id,
            sender,
            handle,
            aborted,
        }
    }

    pub fn queue_partial(&self, update: NoteFieldsUpdate) {
        if update.is_empty() {
            return;
        }
        if self.sender.send(WriteCommand::Partial(update)).is_err() {
            log::debug!("Cache writer for {} already stopped, dropping partial write", self.id);
        }
    }

    /// Queues the authoritative write behind every pending partial and waits
    /// for it. Returns the final write's error, if any.
    pub async fn finish(self, update: NoteFieldsUpdate) -> Option<CacheError> {
        let Self { id, sender, handle, .. } = self;

        if sender.send(WriteCommand::Final(update)).is_err() {
            log::debug!("Cache writer for {} stopped before the final write", id);
        }
        drop(sender);

        handle
            .await
            .unwrap_or_else(|e| Some(CacheError::storage("cache writer", e)))
    }

    /// Drops every write that has not started yet and waits for the one in
    /// flight, if any. Nothing reaches the cache for this request afterwards.
    pub async fn abort(self) {
        let Self {
            id,
            sender,
            handle,
            aborted,
        } = self;

        aborted.store(true, Ordering::SeqCst);
        drop(sender);

        if let Err(e) = handle.await {
            log::warn!("Cache writer for {} ended abnormally: {}", id, e);
        }
    }

    async fn run(
        cache: Arc<dyn SummaryCache>,
        id: String,
        mut receiver: UnboundedReceiver<WriteCommand>,
        aborted: Arc<AtomicBool>,
    ) -> Option<CacheError> {
        let mut final_error = None;

        while let Some(command) = receiver.recv().await {
            if aborted.load(Ordering::SeqCst) {
                receiver.close();
                let mut dropped = 1;
                while receiver.try_recv().is_ok() {
                    dropped += 1;
                }
                log::debug!("🛑 Dropped {} pending writes for {}", dropped, id);
                break;
            }

            match command {
                WriteCommand::Partial(mut update) => {
                    let mut trailing_final = None;
                    while let Ok(next) = receiver.try_recv() {
                        match next {
                            WriteCommand::Partial(newer) => update.merge(newer),
                            WriteCommand::Final(last) => {
                                trailing_final = Some(last);
                                break;
                            }
                        }
                    }

                    if let Err(e) = cache.update_fields(&id, update).await {
                        log::warn!("⚠️ Partial notes for {} not cached: {}", id, e);
                    }

                    if let Some(last) = trailing_final {
                        final_error = Self::write_final(cache.as_ref(), &id, last).await;
                    }
                }
                WriteCommand::Final(last) => {
                    final_error = Self::write_final(cache.as_ref(), &id, last).await;
                }
            }
        }

        final_error
    }

    async fn write_final(cache: &dyn SummaryCache, id: &str, update: NoteFieldsUpdate) -> Option<CacheError> {
        match cache.update_fields(id, update).await {
            Ok(()) => {
                log::debug!("💾 Notes for {} cached", id);
                None
            }
            Err(e) => {
                log::error!("❌ Final notes for {} not cached: {}", id, e);
                Some(e)
            }
        }
    }
}
