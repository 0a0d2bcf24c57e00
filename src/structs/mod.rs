pub mod ai;
pub mod change_page;
pub mod change_record;
pub mod cli;
pub mod config;
pub mod extraction_update;
pub mod generation_outcome;
pub mod github;
pub mod note_fields_update;
pub mod note_progress;
pub mod notes_request;
