//! Placeholder discovery.

use regex::Regex;
use serde::Serialize;

use crate::model::Document;

/// A placeholder token found in a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlaceholderOccurrence {
    /// The token, braces included
    pub token: String,

    /// Number of occurrences
    pub count: usize,
}

/// Finds `{...}` tokens in paragraph text.
#[derive(Debug, Clone)]
pub struct PlaceholderScanner {
    pattern: Regex,
}

impl PlaceholderScanner {
    /// Create a scanner for `{...}` tokens on a single line.
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(r"\{[^{}\r\n]+\}").unwrap(),
        }
    }

    /// Create a scanner with a custom token pattern.
    pub fn with_pattern(pattern: &str) -> crate::Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| crate::Error::Other(e.to_string()))?;
        Ok(Self { pattern })
    }

    /// List distinct tokens in first-appearance order.
    ///
    /// Paragraphs are visited in fill order: body, table cells, then
    /// headers and footers.
    pub fn scan(&self, document: &Document) -> Vec<PlaceholderOccurrence> {
        let mut found: Vec<PlaceholderOccurrence> = Vec::new();
        document.visit_paragraphs(true, |paragraph| {
            let text = paragraph.text();
            for m in self.pattern.find_iter(&text) {
                match found.iter_mut().find(|o| o.token == m.as_str()) {
                    Some(occurrence) => occurrence.count += 1,
                    None => found.push(PlaceholderOccurrence {
                        token: m.as_str().to_string(),
                        count: 1,
                    }),
                }
            }
        });
        found
    }
}

impl Default for PlaceholderScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// List the `{...}` placeholders of a document.
pub fn scan_placeholders(document: &Document) -> Vec<PlaceholderOccurrence> {
    PlaceholderScanner::new().scan(document)
}
