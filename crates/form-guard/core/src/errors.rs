//! Error set and validation summary

use serde::Serialize;
use std::collections::HashMap;

/// What went wrong with a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// Required field left blank
    Missing,
    /// Email, phone or pattern mismatch
    Format,
    /// Number outside `min`/`max`
    Range,
    /// Date before its floor, or a stay that ends before it starts
    Temporal,
    /// Business rule spanning fields (room choice, new guest details)
    Relational,
}

/// One user-facing validation message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Current messages per field key
///
/// A key with no messages is never stored; clearing a field removes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorSet {
    errors: HashMap<String, Vec<String>>,
}

impl ErrorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the messages for `key`; an empty list clears it
    pub fn record(&mut self, key: &str, messages: Vec<String>) {
        if messages.is_empty() {
            self.errors.remove(key);
        } else {
            self.errors.insert(key.to_string(), messages);
        }
    }

    pub fn clear(&mut self, key: &str) {
        self.errors.remove(key);
    }

    pub fn clear_all(&mut self) {
        self.errors.clear();
    }

    pub fn get(&self, key: &str) -> Option<&Vec<String>> {
        self.errors.get(key)
    }

    pub fn first(&self, key: &str) -> Option<&String> {
        self.errors.get(key).and_then(|errors| errors.first())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.errors.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn as_map(&self) -> &HashMap<String, Vec<String>> {
        &self.errors
    }
}

/// Aggregated error block shown at the top of a form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    pub heading: String,
    pub items: Vec<String>,
}

impl ValidationSummary {
    /// Build a summary, dropping repeated messages but keeping first-seen order
    pub fn new<I, S>(heading: &str, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut items: Vec<String> = Vec::new();
        for message in messages {
            let message = message.into();
            if !items.contains(&message) {
                items.push(message);
            }
        }
        Self {
            heading: heading.to_string(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_clear() {
        let mut set = ErrorSet::new();
        set.record("email", vec!["Please enter a valid email address".to_string()]);
        assert!(set.contains("email"));
        assert_eq!(set.first("email").map(String::as_str), Some("Please enter a valid email address"));

        set.clear("email");
        assert!(!set.contains("email"));
        assert!(set.is_empty());
    }

    #[test]
    fn test_empty_record_removes_key() {
        let mut set = ErrorSet::new();
        set.record("phone", vec!["Please enter a valid phone number".to_string()]);
        set.record("phone", Vec::new());
        assert!(set.get("phone").is_none());
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_summary_dedup_keeps_order() {
        let summary = ValidationSummary::new(
            "Please correct the following errors:",
            ["b", "a", "b", "c", "a"],
        );
        assert_eq!(summary.items, vec!["b", "a", "c"]);
        assert!(!summary.is_empty());
    }
}
