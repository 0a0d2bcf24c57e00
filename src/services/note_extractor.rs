//! Surfaces `developer_notes` / `marketing_notes` from a JSON object that is
//! still arriving.
//!
//! The buffer is rescanned after every chunk with one pattern per field:
//! `"<field>":"` followed by the longest run of non-quote characters. No
//! closing quote is required, so a value cut off mid-stream is surfaced as
//! far as it has arrived. The buffer only grows, so the leftmost match of a
//! field can only get longer until its closing quote arrives.
//!
//! Known limitation: values are taken verbatim. Escape sequences are not
//! decoded and an escaped quote (`\"`) ends the capture early.

use once_cell::sync::Lazy;
use regex::Regex;
use crate::enums::note_field::NoteField;
use crate::structs::extraction_update::ExtractionUpdate;

static DEVELOPER_PATTERN: Lazy<Regex> = Lazy::new(|| field_pattern(NoteField::Developer));
static MARKETING_PATTERN: Lazy<Regex> = Lazy::new(|| field_pattern(NoteField::Marketing));

fn field_pattern(field: NoteField) -> Regex {
    let pattern = format!(r#""{}":"([^"]*)"#, regex::escape(field.json_key()));
    Regex::new(&pattern).expect("note field pattern is a valid regex")
}

fn pattern_for(field: NoteField) -> &'static Regex {
    match field {
        NoteField::Developer => &DEVELOPER_PATTERN,
        NoteField::Marketing => &MARKETING_PATTERN,
    }
}

/// Extraction state for one generation request.
#[derive(Debug, Default)]
pub struct NoteExtractor {
    accumulated_text: String,
    best_developer_value: Option<String>,
    best_marketing_value: Option<String>,
}

impl NoteExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Captures the current partial value of `field` in `text`, if any.
    pub fn capture(text: &str, field: NoteField) -> Option<&str> {
        pattern_for(field)
            .captures(text)
            .and_then(|captures| captures.get(1))
            .map(|m| m.as_str())
    }

    /// Appends a chunk and rescans. The returned update lists only fields
    /// whose best value changed; a field with no match keeps its old value.
    pub fn push_chunk(&mut self, chunk: &str) -> ExtractionUpdate {
        let mut update = ExtractionUpdate::default();
        if chunk.is_empty() {
            return update;
        }

        self.accumulated_text.push_str(chunk);

        let text = &self.accumulated_text;
        let slots = [
            (NoteField::Developer, &mut self.best_developer_value),
            (NoteField::Marketing, &mut self.best_marketing_value),
        ];

        for (field, best) in slots {
            let Some(captured) = Self::capture(text, field) else {
                continue;
            };
            if best.as_deref() != Some(captured) {
                log::trace!("{} now {} chars", field, captured.len());
                *best = Some(captured.to_string());
                update.set(field, captured.to_string());
            }
        }

        update
    }

    pub fn value(&self, field: NoteField) -> Option<&str> {
        match field {
            NoteField::Developer => self.best_developer_value.as_deref(),
            NoteField::Marketing => self.best_marketing_value.as_deref(),
        }
    }

    /// Best developer value so far, empty when nothing matched yet.
    pub fn developer_note(&self) -> &str {
        self.value(NoteField::Developer).unwrap_or_default()
    }

    /// Best marketing value so far, empty when nothing matched yet.
    pub fn marketing_note(&self) -> &str {
        self.value(NoteField::Marketing).unwrap_or_default()
    }

    pub fn accumulated_text(&self) -> &str {
        &self.accumulated_text
    }

    pub fn into_notes(self) -> (String, String) {
        (
            self.best_developer_value.unwrap_or_default(),
            self.best_marketing_value.unwrap_or_default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_buffer_has_no_values() {
        let mut extractor = NoteExtractor::new();
        assert!(extractor.push_chunk("").is_empty());
        assert_eq!(extractor.value(NoteField::Developer), None);
        assert_eq!(extractor.marketing_note(), "");
    }

    #[test]
    fn partial_field_name_does_not_match() {
        let mut extractor = NoteExtractor::new();
        assert!(extractor.push_chunk("{\"developer_").is_empty());
        assert!(extractor.push_chunk("notes\"").is_empty());
        assert_eq!(extractor.value(NoteField::Developer), None);
    }

    #[test]
    fn open_value_is_surfaced_without_closing_quote() {
        let mut extractor = NoteExtractor::new();
        let update = extractor.push_chunk("{\"developer_notes\":\"Adds retry");
        assert_eq!(update.developer.as_deref(), Some("Adds retry"));
        assert_eq!(update.marketing, None);

        let update = extractor.push_chunk(" logic\",");
        assert_eq!(update.developer.as_deref(), Some("Adds retry logic"));
        assert_eq!(extractor.developer_note(), "Adds retry logic");
    }

    #[test]
    fn unchanged_value_is_not_reported_again() {
        let mut extractor = NoteExtractor::new();
        extractor.push_chunk("{\"developer_notes\":\"Done\",");
        let update = extractor.push_chunk("\"marketing_");
        assert!(update.is_empty());
        assert_eq!(extractor.developer_note(), "Done");
    }

    #[test]
    fn opening_quote_alone_yields_empty_match() {
        let mut extractor = NoteExtractor::new();
        let update = extractor.push_chunk("{\"marketing_notes\":\"");
        assert_eq!(update.marketing.as_deref(), Some(""));
        assert_eq!(extractor.value(NoteField::Marketing), Some(""));
    }

    #[test]
    fn whitespace_after_colon_is_not_matched() {
        let mut extractor = NoteExtractor::new();
        extractor.push_chunk("{\"developer_notes\": \"spaced\"}");
        assert_eq!(extractor.value(NoteField::Developer), None);
    }

    #[test]
    fn escaped_quote_ends_capture_early() {
        let mut extractor = NoteExtractor::new();
        extractor.push_chunk(r#"{"developer_notes":"Renames \"foo\" to bar","marketing_notes":"ok"}"#);
        assert_eq!(extractor.developer_note(), r"Renames \");
        assert_eq!(extractor.marketing_note(), "ok");
    }

    #[test]
    fn escape_sequences_are_kept_verbatim() {
        let mut extractor = NoteExtractor::new();
        extractor.push_chunk(r#"{"developer_notes":"line one\nline two"}"#);
        assert_eq!(extractor.developer_note(), r"line one\nline two");
    }

    #[test]
    fn into_notes_defaults_to_empty_strings() {
        let mut extractor = NoteExtractor::new();
        extractor.push_chunk("upstream error: overloaded");
        assert_eq!(extractor.accumulated_text(), "upstream error: overloaded");
        assert_eq!(extractor.into_notes(), (String::new(), String::new()));
    }
}
