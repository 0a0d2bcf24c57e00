pub mod change_source;
pub mod notes_backend;
pub mod summary_cache;
