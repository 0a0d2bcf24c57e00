//! Streams AI-written developer and marketing release notes for merged pull
//! requests and keeps them in a local SQLite cache.
//!
//! The interesting part is [`services::note_extractor`], which surfaces both
//! note fields from a JSON payload while it is still arriving, and
//! [`services::cache_writer`], which persists those partial values without
//! ever holding up the stream.

pub mod config;
pub mod enums;
pub mod errors;
pub mod helpers;
pub mod logger;
pub mod prompts;
pub mod services;
pub mod structs;
pub mod traits;
pub mod workers;
