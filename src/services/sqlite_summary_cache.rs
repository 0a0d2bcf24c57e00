//! SQLite implementation of [`SummaryCache`].
//!
//! Synchronous rusqlite calls run on `spawn_blocking` behind a shared
//! connection mutex, which also gives each call key-level atomicity.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::enums::cache_error::CacheError;
use crate::structs::change_record::ChangeRecord;
use crate::structs::note_fields_update::NoteFieldsUpdate;
use crate::traits::summary_cache::SummaryCache;

const CURRENT_SCHEMA_VERSION: i64 = 1;

const SELECT_COLUMNS: &str = "SELECT id, description, diff_text, source_url, fetched_at,
        developer_note, marketing_note, notes_updated_at
 FROM change_records";

pub struct SqliteSummaryCache {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSummaryCache {
    /// Opens or creates the cache database at `path`, running migrations.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CacheError> {
        let path_ref = path.as_ref();
        let is_in_memory = path_ref.as_os_str() == ":memory:";

        if !is_in_memory {
            if let Some(parent) = path_ref.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        CacheError::storage("create cache directory", format!("{}: {}", parent.display(), e))
                    })?;
                }
            }
        }

        let conn = Connection::open(path_ref).map_err(|e| CacheError::storage("open database", e))?;

        let journal_mode: String = conn
            .query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))
            .map_err(|e| CacheError::storage("set journal_mode", e))?;
        if !is_in_memory && !journal_mode.eq_ignore_ascii_case("wal") {
            log::warn!("SQLite kept journal_mode={} for {}", journal_mode, path_ref.display());
        }

        conn.execute_batch("PRAGMA busy_timeout = 5000;")
            .map_err(|e| CacheError::storage("configure pragmas", e))?;

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schema_version (
                id INTEGER PRIMARY KEY CHECK (id = 1),
                version INTEGER NOT NULL
            );",
        )
        .map_err(|e| CacheError::storage("create schema_version table", e))?;

        let current_version: i64 = conn
            .query_row("SELECT version FROM schema_version WHERE id = 1", [], |row| row.get(0))
            .optional()
            .map_err(|e| CacheError::storage("get schema version", e))?
            .unwrap_or(0);

        Self::run_migrations(&conn, current_version)?;

        log::debug!("💾 Cache ready at {}", path_ref.display());

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn in_memory() -> Result<Self, CacheError> {
        Self::open(":memory:")
    }

    fn run_migrations(conn: &Connection, from_version: i64) -> Result<(), CacheError> {
        if from_version > CURRENT_SCHEMA_VERSION {
            return Err(CacheError::storage(
                "schema version",
                format!(
                    "cache schema version {} is newer than supported version {}",
                    from_version, CURRENT_SCHEMA_VERSION
                ),
            ));
        }

        if from_version == CURRENT_SCHEMA_VERSION {
            return Ok(());
        }

        if from_version < 1 {
            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS change_records (
                    id TEXT PRIMARY KEY,
                    description TEXT NOT NULL,
                    diff_text TEXT NOT NULL,
                    source_url TEXT NOT NULL,
                    fetched_at TEXT NOT NULL,
                    developer_note TEXT,
                    marketing_note TEXT,
                    notes_updated_at TEXT
                );",
            )
            .map_err(|e| CacheError::storage("migration v1", e))?;
        }

        conn.execute(
            "INSERT OR REPLACE INTO schema_version (id, version) VALUES (1, ?1)",
            params![CURRENT_SCHEMA_VERSION],
        )
        .map_err(|e| CacheError::storage("update schema version", e))?;

        Ok(())
    }

    fn map_record(row: &Row<'_>) -> rusqlite::Result<ChangeRecord> {
        Ok(ChangeRecord {
            id: row.get(0)?,
            description: row.get(1)?,
            diff_text: row.get(2)?,
            source_url: row.get(3)?,
            fetched_at: row.get::<_, DateTime<Utc>>(4)?,
            developer_note: row.get(5)?,
            marketing_note: row.get(6)?,
            notes_updated_at: row.get::<_, Option<DateTime<Utc>>>(7)?,
        })
    }

    async fn run_blocking<F, T>(&self, operation: &'static str, f: F) -> Result<T, CacheError>
    where
        F: FnOnce(&mut Connection) -> Result<T, CacheError> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| CacheError::storage(operation, "connection mutex poisoned"))?;
            f(&mut guard)
        })
        .await
        .map_err(|e| CacheError::storage(operation, e))?
    }
}

#[async_trait]
impl SummaryCache for SqliteSummaryCache {
    async fn get_all(&self) -> Result<Vec<ChangeRecord>, CacheError> {
        self.run_blocking("get_all", |conn| {
            let mut stmt = conn
                .prepare(&format!("{} ORDER BY fetched_at DESC, id", SELECT_COLUMNS))
                .map_err(|e| CacheError::storage("get_all", e))?;

            let rows = stmt
                .query_map([], Self::map_record)
                .map_err(|e| CacheError::storage("get_all", e))?;

            let records = rows
                .collect::<Result<Vec<_>, _>>()
                .map_err(|e| CacheError::Corruption(e.to_string()));
            records
        })
        .await
    }

    async fn get(&self, id: &str) -> Result<Option<ChangeRecord>, CacheError> {
        let id = id.to_string();

        self.run_blocking("get", move |conn| {
            conn.query_row(&format!("{} WHERE id = ?1", SELECT_COLUMNS), params![id], Self::map_record)
                .optional()
                .map_err(|e| CacheError::storage("get", e))
        })
        .await
    }

    async fn upsert_many(&self, records: Vec<ChangeRecord>) -> Result<(), CacheError> {
        if records.is_empty() {
            return Ok(());
        }

        self.run_blocking("upsert_many", move |conn| {
            let tx = conn.transaction().map_err(|e| CacheError::storage("upsert_many", e))?;
            {
                let mut stmt = tx
                    .prepare(
                        "INSERT INTO change_records (id, description, diff_text, source_url, fetched_at,
                                                     developer_note, marketing_note, notes_updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                         ON CONFLICT(id) DO UPDATE SET
                             description = excluded.description,
                             diff_text = excluded.diff_text,
                             source_url = excluded.source_url,
                             fetched_at = excluded.fetched_at,
                             developer_note = excluded.developer_note,
                             marketing_note = excluded.marketing_note,
                             notes_updated_at = excluded.notes_updated_at",
                    )
                    .map_err(|e| CacheError::storage("upsert_many", e))?;

                for record in &records {
                    stmt.execute(params![
                        record.id,
                        record.description,
                        record.diff_text,
                        record.source_url,
                        record.fetched_at,
                        record.developer_note,
                        record.marketing_note,
                        record.notes_updated_at,
                    ])
                    .map_err(|e| CacheError::storage("upsert_many", e))?;
                }
            }
            tx.commit().map_err(|e| CacheError::storage("upsert_many", e))?;

            log::debug!("💾 Upserted {} records", records.len());
            Ok(())
        })
        .await
    }

    async fn update_fields(&self, id: &str, fields: NoteFieldsUpdate) -> Result<(), CacheError> {
        let id = id.to_string();

        self.run_blocking("update_fields", move |conn| {
            let changed = conn
                .execute(
                    "UPDATE change_records SET
                         developer_note = COALESCE(?2, developer_note),
                         marketing_note = COALESCE(?3, marketing_note),
                         notes_updated_at = COALESCE(?4, notes_updated_at)
                     WHERE id = ?1",
                    params![id, fields.developer_note, fields.marketing_note, fields.notes_updated_at],
                )
                .map_err(|e| CacheError::storage("update_fields", e))?;

            if changed == 0 {
                return Err(CacheError::not_found(&id));
            }
            Ok(())
        })
        .await
    }

    async fn clear_all(&self) -> Result<(), CacheError> {
        self.run_blocking("clear_all", |conn| {
            let removed = conn
                .execute("DELETE FROM change_records", [])
                .map_err(|e| CacheError::storage("clear_all", e))?;
            log::debug!("🧹 Removed {} cached records", removed);
            Ok(())
        })
        .await
    }
}
