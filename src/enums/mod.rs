pub mod cache_error;
pub mod commands;
pub mod note_field;
pub mod notes_provider;
pub mod stream_event_data;
pub mod transport_error;
