//! Suggestion item model.
//!
//! The control treats candidates as opaque host records: the only thing it
//! ever reads is the field named by the configured `display_key`, and a
//! record that lacks that field simply displays as an empty string so
//! navigation stays resilient to heterogeneous host data.
//!
//! Implement [`SuggestionItem`] for your own types, or use the shipped
//! [`Record`] when the candidate data is already stringly keyed.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Trait for candidate records in the suggestion list.
///
/// The control reads a single named field per record and treats it as the
/// display string. Everything else about the record is opaque.
pub trait SuggestionItem {
    /// Get the value of the named field, if the record carries it.
    fn field(&self, key: &str) -> Option<&str>;

    /// The display string for this record under the given key.
    ///
    /// A missing field displays as the empty string.
    fn display(&self, key: &str) -> &str {
        self.field(key).unwrap_or("")
    }
}

/// A simple candidate record backed by an ordered field list.
///
/// This is the most common record type for hosts whose candidate data is
/// already keyed by strings (rows from a search endpoint, for example).
///
/// # Example
///
/// ```
/// use horizon_typeahead::{Record, SuggestionItem};
///
/// let record = Record::new()
///     .with_field("id", "1")
///     .with_field("name", "value 1");
///
/// assert_eq!(record.field("name"), Some("value 1"));
/// assert_eq!(record.display("missing"), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Add a field using builder pattern.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_field(key, value);
        self
    }

    /// Set a field, replacing any existing value under the same key.
    pub fn set_field(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.fields.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.fields.push((key, value));
        }
    }

    /// Number of fields in the record.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl SuggestionItem for Record {
    fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl SuggestionItem for HashMap<String, String> {
    fn field(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

impl SuggestionItem for BTreeMap<String, String> {
    fn field(&self, key: &str) -> Option<&str> {
        self.get(key).map(String::as_str)
    }
}

// Allow using Box<dyn SuggestionItem> and Arc<dyn SuggestionItem> as items.
impl<T: SuggestionItem + ?Sized> SuggestionItem for Box<T> {
    fn field(&self, key: &str) -> Option<&str> {
        (**self).field(key)
    }
}

impl<T: SuggestionItem + ?Sized> SuggestionItem for Arc<T> {
    fn field(&self, key: &str) -> Option<&str> {
        (**self).field(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_field_access() {
        let record = Record::new()
            .with_field("id", "2")
            .with_field("name", "value 2");

        assert_eq!(record.field("id"), Some("2"));
        assert_eq!(record.field("name"), Some("value 2"));
        assert_eq!(record.field("label"), None);
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_record_set_field_replaces() {
        let mut record = Record::new().with_field("name", "old");
        record.set_field("name", "new");

        assert_eq!(record.field("name"), Some("new"));
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn test_display_defaults_to_empty() {
        let record = Record::new().with_field("id", "1");
        assert_eq!(record.display("name"), "");

        let empty = Record::new();
        assert!(empty.is_empty());
        assert_eq!(empty.display("name"), "");
    }

    #[test]
    fn test_map_items() {
        let mut map = HashMap::new();
        map.insert("name".to_string(), "apple".to_string());
        assert_eq!(map.display("name"), "apple");

        let mut tree = BTreeMap::new();
        tree.insert("name".to_string(), "banana".to_string());
        assert_eq!(tree.field("name"), Some("banana"));
    }

    #[test]
    fn test_boxed_item_forwards() {
        let boxed: Box<dyn SuggestionItem> = Box::new(Record::new().with_field("name", "cherry"));
        assert_eq!(boxed.display("name"), "cherry");
    }
}
