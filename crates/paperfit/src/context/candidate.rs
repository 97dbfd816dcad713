//! Candidate text blocks eligible for inclusion in a model request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::tokens::text_len;

/// A unit of previously generated text (typically a stored summary) that
/// may be packed into a model request.
///
/// Only the text, a timestamp and a size are needed for fitting. The size
/// defaults to the text length and is what [`SortStrategy::Size`] orders by.
///
/// [`SortStrategy::Size`]: super::SortStrategy::Size
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// Caller-assigned identifier (e.g. the note key the summary lives in).
    pub id: String,
    /// The text that would be sent to the model.
    pub text: String,
    /// Creation time, used by [`SortStrategy::Date`](super::SortStrategy::Date).
    pub timestamp: DateTime<Utc>,
    /// Explicit sort size. When absent, the text length is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<usize>,
}

impl Candidate {
    pub fn new(id: impl Into<String>, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            timestamp,
            size: None,
        }
    }

    /// Override the size used for size-ordered fitting.
    pub fn with_size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Size used when sorting by [`SortStrategy::Size`](super::SortStrategy::Size).
    pub fn sort_size(&self) -> usize {
        self.size.unwrap_or_else(|| text_len(&self.text))
    }

    /// First `max_chars` characters of the text, with `...` appended when cut.
    pub fn preview(&self, max_chars: usize) -> String {
        match self.text.char_indices().nth(max_chars) {
            #[allow(clippy::string_slice)] // idx is a char boundary from char_indices
            Some((idx, _)) => format!("{}...", &self.text[..idx]),
            None => self.text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn sort_size_defaults_to_text_length() {
        let c = Candidate::new("a", "hello", ts());
        assert_eq!(c.sort_size(), 5);
        assert_eq!(c.with_size(42).sort_size(), 42);
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let c = Candidate::new("a", "héllo wörld", ts());
        assert_eq!(c.preview(5), "héllo...");
        assert_eq!(c.preview(11), "héllo wörld");
        assert_eq!(c.preview(50), "héllo wörld");
    }

    #[test]
    fn deserializes_without_size() {
        let json = r#"{"id":"n1","text":"abc","timestamp":"2024-06-01T00:00:00Z"}"#;
        let c: Candidate = serde_json::from_str(json).unwrap();
        assert_eq!(c.id, "n1");
        assert_eq!(c.size, None);
        assert_eq!(c.timestamp, Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn serialization_omits_absent_size() {
        let c = Candidate::new("n1", "abc", ts());
        let json = serde_json::to_string(&c).unwrap();
        assert!(!json.contains("size"));
    }
}
