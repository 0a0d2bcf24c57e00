use std::time::Duration;

use chrono::Utc;

use prnotes::services::cache_writer::CacheWriter;
use prnotes::services::sqlite_summary_cache::SqliteSummaryCache;
use prnotes::structs::note_fields_update::NoteFieldsUpdate;
use prnotes::traits::summary_cache::SummaryCache;

use crate::support::{record, shared, RecordingCache};

async fn recording(id: &str, delay: Option<Duration>) -> std::sync::Arc<RecordingCache<SqliteSummaryCache>> {
    let inner = SqliteSummaryCache::in_memory().unwrap();
    inner.upsert_many(vec![record(id)]).await.unwrap();
    match delay {
        Some(delay) => shared(RecordingCache::slow(inner, delay)),
        None => shared(RecordingCache::new(inner)),
    }
}

#[tokio::test]
async fn queued_partials_are_merged_into_one_write() {
    let cache = recording("a", None).await;
    let writer = CacheWriter::spawn(cache.clone(), "a".into());

    writer.queue_partial(NoteFieldsUpdate::developer("F"));
    writer.queue_partial(NoteFieldsUpdate::developer("Fi"));
    writer.queue_partial(NoteFieldsUpdate::marketing("Y"));
    let at = Utc::now();
    let error = writer
        .finish(NoteFieldsUpdate::final_notes("Fix".into(), "You".into(), at))
        .await;

    assert!(error.is_none());
    let updates = cache.updates();
    assert_eq!(updates.len(), 2);
    assert_eq!(
        updates[0],
        NoteFieldsUpdate {
            developer_note: Some("Fi".into()),
            marketing_note: Some("Y".into()),
            notes_updated_at: None,
        }
    );
    assert_eq!(updates[1].notes_updated_at, Some(at));
}

#[tokio::test]
async fn partials_queued_during_a_slow_write_are_merged() {
    let cache = recording("a", Some(Duration::from_millis(50))).await;
    let writer = CacheWriter::spawn(cache.clone(), "a".into());

    writer.queue_partial(NoteFieldsUpdate::developer("F"));
    tokio::time::sleep(Duration::from_millis(10)).await;
    writer.queue_partial(NoteFieldsUpdate::developer("Fix"));
    writer.queue_partial(NoteFieldsUpdate::marketing("You"));
    writer.queue_partial(NoteFieldsUpdate::marketing("You'll"));
    let error = writer
        .finish(NoteFieldsUpdate::final_notes("Fix bug".into(), "You'll see".into(), Utc::now()))
        .await;

    assert!(error.is_none());
    let updates = cache.updates();
    assert_eq!(updates.len(), 3);
    assert_eq!(updates[0], NoteFieldsUpdate::developer("F"));
    assert_eq!(updates[1].developer_note.as_deref(), Some("Fix"));
    assert_eq!(updates[1].marketing_note.as_deref(), Some("You'll"));

    let stored = cache.get("a").await.unwrap().unwrap();
    assert_eq!(stored.developer_note.as_deref(), Some("Fix bug"));
    assert_eq!(stored.marketing_note.as_deref(), Some("You'll see"));
}

#[tokio::test]
async fn abort_waits_for_the_write_in_flight_and_drops_the_rest() {
    let cache = recording("a", Some(Duration::from_millis(50))).await;
    let writer = CacheWriter::spawn(cache.clone(), "a".into());

    writer.queue_partial(NoteFieldsUpdate::developer("F"));
    tokio::time::sleep(Duration::from_millis(10)).await;
    writer.queue_partial(NoteFieldsUpdate::developer("Fix"));
    writer.abort().await;

    assert_eq!(cache.updates(), vec![NoteFieldsUpdate::developer("F")]);
    let stored = cache.get("a").await.unwrap().unwrap();
    assert_eq!(stored.developer_note.as_deref(), Some("F"));
}
