//! Error types for docfill library.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for docfill operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while loading, filling or saving templates.
///
/// Soft data anomalies (an unparseable amount, a malformed row label, a row
/// with too few cells) are never reported here: the fill routines log them
/// and move on.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The template file does not exist.
    #[error("Template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    /// The file format is not recognized as a DOCX package.
    #[error("Unknown file format: not a valid DOCX package")]
    UnknownFormat,

    /// The template uses the legacy binary Word format.
    #[error("Legacy .doc templates are not supported; re-save the template as .docx")]
    LegacyFormat,

    /// Error reading or writing the zip container.
    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Error parsing or writing XML content.
    #[error("XML error: {0}")]
    Xml(String),

    /// A required package part is missing.
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// Error decoding JSON input (replacements, creditor records).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<quick_xml::Error> for Error {
    fn from(err: quick_xml::Error) -> Self {
        Error::Xml(err.to_string())
    }
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(err: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::LegacyFormat;
        assert_eq!(
            err.to_string(),
            "Legacy .doc templates are not supported; re-save the template as .docx"
        );

        let err = Error::TemplateNotFound(PathBuf::from("zayav.docx"));
        assert_eq!(err.to_string(), "Template not found: zayav.docx");

        let err = Error::MissingPart("word/document.xml".into());
        assert_eq!(err.to_string(), "Missing package part: word/document.xml");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
    }
}
