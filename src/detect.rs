//! Template format detection and validation.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Template container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFormat {
    /// Office Open XML package (`.docx`), a zip archive.
    Docx,
}

impl std::fmt::Display for TemplateFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateFormat::Docx => write!(f, "DOCX"),
        }
    }
}

/// Zip local file header: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";

/// OLE compound file signature used by legacy `.doc` files.
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];

/// Detect the template format from a file path.
///
/// # Returns
/// * `Ok(TemplateFormat::Docx)` if the file is a zip package
/// * `Err(Error::TemplateNotFound)` if the path does not exist
/// * `Err(Error::LegacyFormat)` for legacy binary `.doc` files
/// * `Err(Error::UnknownFormat)` otherwise
///
/// # Example
/// ```no_run
/// use docfill::detect::detect_format_from_path;
///
/// let format = detect_format_from_path("zayav.docx").unwrap();
/// println!("Template format: {}", format);
/// ```
pub fn detect_format_from_path<P: AsRef<Path>>(path: P) -> Result<TemplateFormat> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::TemplateNotFound(path.to_path_buf()));
    }

    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut header = Vec::with_capacity(OLE_MAGIC.len());
    reader
        .by_ref()
        .take(OLE_MAGIC.len() as u64)
        .read_to_end(&mut header)?;
    detect_format_from_bytes(&header)
}

/// Detect the template format from bytes.
///
/// Only the leading signature is inspected; a zip archive that lacks
/// `word/document.xml` is rejected later, when the package is opened.
pub fn detect_format_from_bytes(data: &[u8]) -> Result<TemplateFormat> {
    if data.starts_with(ZIP_MAGIC) {
        return Ok(TemplateFormat::Docx);
    }

    if data.starts_with(OLE_MAGIC) {
        return Err(Error::LegacyFormat);
    }

    Err(Error::UnknownFormat)
}

/// Check if a file looks like a DOCX package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    detect_format_from_path(path).is_ok()
}

/// Check if bytes look like a DOCX package.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_format_from_bytes(data).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_zip_package() {
        let data = b"PK\x03\x04\x14\x00\x06\x00";
        let format = detect_format_from_bytes(data).unwrap();
        assert_eq!(format, TemplateFormat::Docx);
        assert_eq!(format.to_string(), "DOCX");
    }

    #[test]
    fn test_detect_legacy_doc() {
        let data = [0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1, 0x00, 0x00];
        let result = detect_format_from_bytes(&data);
        assert!(matches!(result, Err(Error::LegacyFormat)));
    }

    #[test]
    fn test_detect_invalid_format() {
        let data = b"<!DOCTYPE html>";
        let result = detect_format_from_bytes(data);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_detect_too_short() {
        assert!(matches!(
            detect_format_from_bytes(b"PK"),
            Err(Error::UnknownFormat)
        ));
        assert!(matches!(
            detect_format_from_bytes(b""),
            Err(Error::UnknownFormat)
        ));
    }

    #[test]
    fn test_detect_missing_path() {
        let result = detect_format_from_path("definitely/not/here.docx");
        assert!(matches!(result, Err(Error::TemplateNotFound(_))));
    }

    #[test]
    fn test_is_docx_bytes() {
        assert!(is_docx_bytes(b"PK\x03\x04rest"));
        assert!(!is_docx_bytes(b"Not a package"));
    }
}
