pub mod cache_writer;
pub mod github_change_source;
pub mod note_extractor;
pub mod note_generator;
pub mod notes_backends;
pub mod sqlite_summary_cache;
