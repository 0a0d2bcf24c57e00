use chrono::{TimeZone, Utc};
use tokio_test::assert_ok;

use prnotes::enums::cache_error::CacheError;
use prnotes::services::sqlite_summary_cache::SqliteSummaryCache;
use prnotes::structs::note_fields_update::NoteFieldsUpdate;
use prnotes::traits::summary_cache::SummaryCache;

use crate::support::record;

#[tokio::test]
async fn clear_all_on_empty_cache_is_a_no_op() {
    let cache = SqliteSummaryCache::in_memory().unwrap();

    assert_ok!(cache.clear_all().await);
    assert_ok!(cache.clear_all().await);
    assert!(cache.get_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn clear_all_removes_everything() {
    let cache = SqliteSummaryCache::in_memory().unwrap();
    cache.upsert_many(vec![record("a"), record("b")]).await.unwrap();

    cache.clear_all().await.unwrap();

    assert!(cache.get_all().await.unwrap().is_empty());
    assert!(cache.get("a").await.unwrap().is_none());
}

#[tokio::test]
async fn upsert_many_then_get_all_returns_new_records() {
    let cache = SqliteSummaryCache::in_memory().unwrap();
    let records = vec![record("acme/app#1"), record("acme/app#2")];

    cache.upsert_many(records.clone()).await.unwrap();

    let mut stored = cache.get_all().await.unwrap();
    stored.sort_by(|a, b| a.id.cmp(&b.id));
    assert_eq!(stored, records);
}

#[tokio::test]
async fn upsert_many_fully_replaces_existing_records() {
    let cache = SqliteSummaryCache::in_memory().unwrap();
    let mut original = record("acme/app#1");
    original.developer_note = Some("old dev".into());
    original.marketing_note = Some("old marketing".into());
    original.notes_updated_at = Some(Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap());
    cache.upsert_many(vec![original]).await.unwrap();

    let mut replacement = record("acme/app#1");
    replacement.description = "Retitled".into();
    replacement.fetched_at = Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap();
    cache.upsert_many(vec![replacement.clone()]).await.unwrap();

    let stored = cache.get_all().await.unwrap();
    assert_eq!(stored, vec![replacement]);
}

#[tokio::test]
async fn get_all_lists_newest_fetch_first() {
    let cache = SqliteSummaryCache::in_memory().unwrap();
    let mut older = record("older");
    older.fetched_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let mut newer = record("newer");
    newer.fetched_at = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

    cache.upsert_many(vec![older, newer]).await.unwrap();

    let ids: Vec<String> = cache.get_all().await.unwrap().into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec!["newer".to_string(), "older".to_string()]);
}

#[tokio::test]
async fn update_fields_merges_instead_of_replacing() {
    let cache = SqliteSummaryCache::in_memory().unwrap();
    let mut existing = record("acme/app#3");
    existing.marketing_note = Some("y".into());
    cache.upsert_many(vec![existing]).await.unwrap();

    cache
        .update_fields("acme/app#3", NoteFieldsUpdate::developer("x"))
        .await
        .unwrap();

    let stored = cache.get("acme/app#3").await.unwrap().unwrap();
    assert_eq!(stored.developer_note.as_deref(), Some("x"));
    assert_eq!(stored.marketing_note.as_deref(), Some("y"));
    assert_eq!(stored.description, "Change acme/app#3\n\nDetails");
    assert_eq!(stored.notes_updated_at, None);
}

#[tokio::test]
async fn update_fields_can_overwrite_with_empty_strings() {
    let cache = SqliteSummaryCache::in_memory().unwrap();
    let mut existing = record("acme/app#4");
    existing.developer_note = Some("stale".into());
    cache.upsert_many(vec![existing]).await.unwrap();

    let at = Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap();
    cache
        .update_fields("acme/app#4", NoteFieldsUpdate::final_notes(String::new(), String::new(), at))
        .await
        .unwrap();

    let stored = cache.get("acme/app#4").await.unwrap().unwrap();
    assert_eq!(stored.developer_note.as_deref(), Some(""));
    assert_eq!(stored.marketing_note.as_deref(), Some(""));
    assert_eq!(stored.notes_updated_at, Some(at));
}

#[tokio::test]
async fn update_fields_on_unknown_id_changes_nothing() {
    let cache = SqliteSummaryCache::in_memory().unwrap();
    cache.upsert_many(vec![record("known")]).await.unwrap();

    let result = cache.update_fields("unknown", NoteFieldsUpdate::developer("x")).await;

    assert!(matches!(result, Err(CacheError::RecordNotFound { id }) if id == "unknown"));
    let all = cache.get_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].developer_note, None);
}

#[tokio::test]
async fn records_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cache.db");

    {
        let cache = SqliteSummaryCache::open(&path).unwrap();
        cache.upsert_many(vec![record("acme/app#9")]).await.unwrap();
        cache
            .update_fields("acme/app#9", NoteFieldsUpdate::marketing("Snappier"))
            .await
            .unwrap();
    }

    let reopened = SqliteSummaryCache::open(&path).unwrap();
    let stored = reopened.get("acme/app#9").await.unwrap().unwrap();
    assert_eq!(stored.marketing_note.as_deref(), Some("Snappier"));
}
