//! Ordered placeholder replacement list.

use std::fmt;

use chrono::NaiveDate;
use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Date format used in filled documents.
pub const DATE_FORMAT: &str = "%d.%m.%Y";

/// An ordered list of `(placeholder, replacement)` pairs.
///
/// Pairs are applied one after another, so a later pair sees the text
/// produced by earlier ones. When keys overlap, list order decides which one
/// wins; callers control precedence by ordering the pairs.
///
/// # Example
///
/// ```
/// use docfill::Replacements;
///
/// let replacements = Replacements::new()
///     .with("{Фамилия}", "Иванов")
///     .with("{Имя}", "Алексей");
/// assert_eq!(replacements.apply("{Фамилия} {Имя}"), "Иванов Алексей");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Replacements {
    pairs: Vec<(String, String)>,
}

impl Replacements {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pair and return self.
    pub fn with(mut self, placeholder: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(placeholder, value);
        self
    }

    /// Append a pair.
    pub fn push(&mut self, placeholder: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((placeholder.into(), value.into()));
    }

    /// Append a date value formatted as `DD.MM.YYYY` and return self.
    pub fn with_date(mut self, placeholder: impl Into<String>, date: NaiveDate) -> Self {
        self.push_date(placeholder, date);
        self
    }

    /// Append a date value formatted as `DD.MM.YYYY`.
    pub fn push_date(&mut self, placeholder: impl Into<String>, date: NaiveDate) {
        self.push(placeholder, date.format(DATE_FORMAT).to_string());
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over usable pairs; empty placeholders are skipped because
    /// they would match between every character.
    fn active(&self) -> impl Iterator<Item = (&str, &str)> {
        self.iter().filter(|(k, _)| !k.is_empty())
    }

    /// Apply every pair to `text`, sequentially.
    pub fn apply(&self, text: &str) -> String {
        let mut result = text.to_string();
        for (placeholder, value) in self.active() {
            if result.contains(placeholder) {
                result = result.replace(placeholder, value);
            }
        }
        result
    }

    /// Find the first placeholder, in list order, that occurs in `text`.
    ///
    /// Returns the placeholder and the byte offset of its first occurrence.
    pub fn first_match<'a>(&'a self, text: &str) -> Option<(&'a str, usize)> {
        self.active()
            .find_map(|(placeholder, _)| text.find(placeholder).map(|pos| (placeholder, pos)))
    }

    /// Parse from JSON: an object (document order is kept) or an array of
    /// `[placeholder, value]` pairs.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Replacements {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Replacements {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.pairs
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v.into())));
    }
}

impl Serialize for Replacements {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.pairs.len()))?;
        for (k, v) in &self.pairs {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Replacements {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(ReplacementsVisitor)
    }
}

struct ReplacementsVisitor;

impl<'de> Visitor<'de> for ReplacementsVisitor {
    type Value = Replacements;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of placeholders or a list of [placeholder, value] pairs")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut pairs = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(pair) = map.next_entry::<String, String>()? {
            pairs.push(pair);
        }
        Ok(Replacements { pairs })
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error> {
        let mut pairs = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(pair) = seq.next_element::<(String, String)>()? {
            pairs.push(pair);
        }
        Ok(Replacements { pairs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_application() {
        let chained = Replacements::new().with("{a}", "{b}").with("{b}", "X");
        assert_eq!(chained.apply("{a} {b}"), "X X");

        let reversed = Replacements::new().with("{b}", "X").with("{a}", "{b}");
        assert_eq!(reversed.apply("{a} {b}"), "{b} X");
    }

    #[test]
    fn test_overlapping_keys_follow_order() {
        let longer_first = Replacements::new()
            .with("{фамилия} ", "Иванов ")
            .with("{фамилия}", "Петров");
        assert_eq!(longer_first.apply("{фамилия} И."), "Иванов И.");

        let shorter_first = Replacements::new()
            .with("{фамилия}", "Петров")
            .with("{фамилия} ", "Иванов ");
        assert_eq!(shorter_first.apply("{фамилия} И."), "Петров И.");
    }

    #[test]
    fn test_empty_key_ignored() {
        let replacements = Replacements::new().with("", "x").with("{a}", "b");
        assert_eq!(replacements.apply("{a}"), "b");
        assert_eq!(replacements.first_match("{a}"), Some(("{a}", 0)));
    }

    #[test]
    fn test_first_match_uses_list_order() {
        let replacements = Replacements::new().with("{late}", "1").with("{early}", "2");
        assert_eq!(
            replacements.first_match("{early} then {late}"),
            Some(("{late}", 15))
        );
        assert_eq!(replacements.first_match("nothing"), None);
    }

    #[test]
    fn test_with_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        let replacements = Replacements::new().with_date("{дата}", date);
        assert_eq!(replacements.apply("от {дата}"), "от 05.03.2024");
    }

    #[test]
    fn test_from_json_object_keeps_order() {
        let replacements = Replacements::from_json(r#"{"{z}": "1", "{a}": "2", "{m}": "3"}"#).unwrap();
        let keys: Vec<&str> = replacements.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["{z}", "{a}", "{m}"]);
    }

    #[test]
    fn test_from_json_pairs() {
        let replacements = Replacements::from_json(r#"[["{a}", "1"], ["{a}", "2"]]"#).unwrap();
        assert_eq!(replacements.len(), 2);
        assert_eq!(replacements.apply("{a}"), "1");
    }

    #[test]
    fn test_from_json_rejects_non_strings() {
        assert!(Replacements::from_json(r#"{"{a}": 1}"#).is_err());
        assert!(Replacements::from_json("42").is_err());
    }

    #[test]
    fn test_serialize_as_object() {
        let replacements: Replacements = vec![("{b}", "2"), ("{a}", "1")].into_iter().collect();
        let json = serde_json::to_string(&replacements).unwrap();
        assert_eq!(json, r#"{"{b}":"2","{a}":"1"}"#);
    }
}
