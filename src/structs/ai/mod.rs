pub mod anthropic_notes_request;
pub mod anthropic_stream_error;
pub mod anthropic_text_delta;
