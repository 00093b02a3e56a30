//! DOCX package reading and writing.
//!
//! A package is opened fully into memory: every zip entry is kept, the main
//! document part and the header/footer parts are parsed into the
//! [`Document`] model, and everything else is written back byte-for-byte.

mod options;
mod reader;
mod writer;

pub use options::{ErrorMode, OpenOptions};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use zip::CompressionMethod;

use crate::detect::detect_format_from_path;
use crate::error::Result;
use crate::model::Document;
use crate::xml::Element;

/// One zip entry as read from the source archive.
#[derive(Debug, Clone)]
struct PackageEntry {
    name: String,
    data: Vec<u8>,
    compression: CompressionMethod,
    is_dir: bool,
}

/// An opened DOCX package.
///
/// # Example
///
/// ```no_run
/// use docfill::DocxPackage;
///
/// let package = DocxPackage::open("zayav.docx")?;
/// println!("Body paragraphs: {}", package.document().paragraphs().count());
/// package.save("copy.docx")?;
/// # Ok::<(), docfill::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct DocxPackage {
    entries: Vec<PackageEntry>,
    main_part: String,
    /// Main part root with the body emptied
    main_root: Element,
    /// Header/footer roots with their children emptied, by part name
    story_roots: BTreeMap<String, Element>,
    document: Document,
}

impl DocxPackage {
    /// Open a DOCX file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, OpenOptions::default())
    }

    /// Open a DOCX file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: OpenOptions) -> Result<Self> {
        let path = path.as_ref();

        // Verify it exists and is a package before reading it whole
        detect_format_from_path(path)?;

        let data = fs::read(path)?;
        reader::load(&data, &options)
    }

    /// Open a DOCX package from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, OpenOptions::default())
    }

    /// Open a DOCX package from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: OpenOptions) -> Result<Self> {
        reader::load(data, &options)
    }

    /// Get the document model.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the document model mutably.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Name of the main document part.
    pub fn main_part(&self) -> &str {
        &self.main_part
    }

    /// Names of all package entries, in archive order.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    /// Serialize the package to bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        writer::write(self)
    }

    /// Serialize the package to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes)?;
        Ok(())
    }
}
