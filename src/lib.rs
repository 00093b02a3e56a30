//! # docfill
//!
//! DOCX template filling for bankruptcy filing documents.
//!
//! This library opens a word-processing template, replaces placeholder
//! tokens such as `{Фамилия}` with supplied values and, for the creditor
//! list, grows or shrinks the creditor table to match a list of records.
//! The filled document is written back as a `.docx` package.
//!
//! ## Quick Start
//!
//! ```no_run
//! use docfill::{Docfill, Replacements};
//!
//! fn main() -> docfill::Result<()> {
//!     let replacements = Replacements::new()
//!         .with("{Фамилия}", "Иванов")
//!         .with("{Имя}", "Алексей");
//!
//!     let filled = Docfill::new()
//!         .with_replacements(replacements)
//!         .fill_file("zayav.docx")?;
//!     filled.save("zayav_filled.docx")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Run-aware substitution**: placeholders split across formatting runs
//!   are still found; the rewritten paragraph keeps the formatting of the
//!   first placeholder
//! - **Ordered replacements**: pairs are applied in list order
//! - **Creditor table**: rows labelled `1.N` are rewritten, added or removed
//!   while the trailing mandatory-payments block is kept
//! - **Lossless packages**: parts the fill does not touch are written back
//!   byte-for-byte
//! - **Parallel processing**: several templates can be filled at once with
//!   Rayon

pub mod detect;
pub mod error;
pub mod fill;
pub mod model;
pub mod package;
pub mod xml;

// Re-export commonly used types
pub use detect::{detect_format_from_bytes, detect_format_from_path, is_docx, TemplateFormat};
pub use error::{Error, Result};
pub use fill::{
    fill_document, format_amount, reconcile_creditors, scan_placeholders, substitute_paragraph,
    CreditorRecord, CreditorTableConfig, FillOptions, FillStats, PlaceholderOccurrence,
    ReconcileReport, Replacements,
};
pub use model::{
    Block, Document, InlineContent, Paragraph, Story, StoryKind, Table, TableCell, TableRow,
    TextRun, TextStyle,
};
pub use package::{DocxPackage, ErrorMode, OpenOptions};

use std::path::Path;

use rayon::prelude::*;

/// Open a DOCX template.
///
/// # Example
///
/// ```no_run
/// use docfill::open;
///
/// let package = open("zayav.docx").unwrap();
/// println!("Tables: {}", package.document().tables().count());
/// ```
pub fn open<P: AsRef<Path>>(path: P) -> Result<DocxPackage> {
    DocxPackage::open(path)
}

/// Open a DOCX template from bytes.
pub fn open_bytes(data: &[u8]) -> Result<DocxPackage> {
    DocxPackage::from_bytes(data)
}

/// Fill a template file and return the filled package as bytes.
///
/// # Arguments
///
/// * `path` - Path to the `.docx` template
/// * `replacements` - Ordered placeholder values
///
/// # Example
///
/// ```no_run
/// use docfill::{fill_file, Replacements};
///
/// let replacements = Replacements::new().with("{ФИО}", "Иванов Иван Иванович");
/// let bytes = fill_file("zayav.docx", &replacements).unwrap();
/// std::fs::write("out.docx", bytes).unwrap();
/// ```
pub fn fill_file<P: AsRef<Path>>(path: P, replacements: &Replacements) -> Result<Vec<u8>> {
    Docfill::new()
        .with_replacements(replacements.clone())
        .fill_file(path)?
        .to_bytes()
}

/// Fill a template given as bytes and return the filled package as bytes.
pub fn fill_bytes(data: &[u8], replacements: &Replacements) -> Result<Vec<u8>> {
    Docfill::new()
        .with_replacements(replacements.clone())
        .fill_bytes(data)?
        .to_bytes()
}

/// Builder for filling templates.
///
/// # Example
///
/// ```no_run
/// use docfill::{CreditorRecord, Docfill, Replacements};
///
/// let creditors = vec![CreditorRecord {
///     creditor: "ПАО Сбербанк".into(),
///     obligation_amount: "150000".into(),
///     ..Default::default()
/// }];
///
/// Docfill::new()
///     .with_replacements(Replacements::new().with("{ФИО}", "Иванов И.И."))
///     .with_creditors(creditors)
///     .fill_file("spisok_kreditorov.docx")?
///     .save("spisok_kreditorov_filled.docx")?;
/// # Ok::<(), docfill::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct Docfill {
    replacements: Replacements,
    creditors: Option<Vec<CreditorRecord>>,
    fill_options: FillOptions,
    open_options: OpenOptions,
}

impl Docfill {
    /// Create a new Docfill builder.
    pub fn new() -> Self {
        Self {
            replacements: Replacements::default(),
            creditors: None,
            fill_options: FillOptions::default(),
            open_options: OpenOptions::default(),
        }
    }

    /// Set the placeholder values.
    pub fn with_replacements(mut self, replacements: Replacements) -> Self {
        self.replacements = replacements;
        self
    }

    /// Set creditor records and reconcile the creditor table with them.
    ///
    /// An empty list removes every `1.N` row. Without this call the table is
    /// left alone.
    pub fn with_creditors(mut self, creditors: Vec<CreditorRecord>) -> Self {
        self.creditors = Some(creditors);
        self
    }

    /// Set fill options.
    pub fn with_options(mut self, options: FillOptions) -> Self {
        self.fill_options = options;
        self
    }

    /// Leave headers and footers untouched.
    pub fn without_headers_footers(mut self) -> Self {
        self.fill_options = self.fill_options.with_headers_footers(false);
        self.open_options = self.open_options.with_stories(false);
        self
    }

    /// Keep malformed header/footer parts as they are instead of failing.
    pub fn lenient(mut self) -> Self {
        self.open_options = self.open_options.lenient();
        self
    }

    /// Fill a template file.
    pub fn fill_file<P: AsRef<Path>>(&self, path: P) -> Result<FilledDocument> {
        let path = path.as_ref();
        log::debug!("Filling {}", path.display());
        let package = DocxPackage::open_with_options(path, self.open_options.clone())?;
        Ok(self.fill_package(package))
    }

    /// Fill a template given as bytes.
    pub fn fill_bytes(&self, data: &[u8]) -> Result<FilledDocument> {
        let package = DocxPackage::from_bytes_with_options(data, self.open_options.clone())?;
        Ok(self.fill_package(package))
    }

    /// Fill several template files in parallel.
    ///
    /// Each template is loaded and filled independently; results come back
    /// in the order of `paths`.
    pub fn fill_files<P: AsRef<Path> + Sync>(&self, paths: &[P]) -> Vec<Result<FilledDocument>> {
        paths.par_iter().map(|path| self.fill_file(path)).collect()
    }

    /// Fill an already loaded document in place.
    pub fn fill_document(&self, document: &mut Document) -> FillStats {
        let mut stats = fill_document(document, &self.replacements, &self.fill_options);
        if let Some(ref creditors) = self.creditors {
            stats.creditors =
                reconcile_creditors(document, creditors, &self.fill_options.creditor_table);
        }
        stats
    }

    fn fill_package(&self, mut package: DocxPackage) -> FilledDocument {
        let stats = self.fill_document(package.document_mut());
        FilledDocument { package, stats }
    }
}

impl Default for Docfill {
    fn default() -> Self {
        Self::new()
    }
}

/// A filled template, ready to be written out.
#[derive(Debug, Clone)]
pub struct FilledDocument {
    package: DocxPackage,
    /// What the fill changed
    pub stats: FillStats,
}

impl FilledDocument {
    /// Serialize to `.docx` bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        self.package.to_bytes()
    }

    /// Write to a `.docx` file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.package.save(path)
    }

    /// Get the filled document.
    pub fn document(&self) -> &Document {
        self.package.document()
    }

    /// Get the fill statistics.
    pub fn stats(&self) -> &FillStats {
        &self.stats
    }

    /// Get the underlying package.
    pub fn package(&self) -> &DocxPackage {
        &self.package
    }
}
