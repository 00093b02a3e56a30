//! Template filling: placeholder substitution and creditor table
//! reconciliation.

mod amount;
mod creditors;
mod options;
mod replacements;
mod scan;
mod substitute;

pub use amount::format_amount;
pub use creditors::{
    creditor_index, is_creditor_header, locate_creditor_table, reconcile_creditors, reconcile_table,
    section_two_start, CreditorRecord, ReconcileReport, CREDITOR_COLUMNS,
};
pub use options::{CreditorTableConfig, FillOptions};
pub use replacements::{Replacements, DATE_FORMAT};
pub use scan::{scan_placeholders, PlaceholderOccurrence, PlaceholderScanner};
pub use substitute::substitute_paragraph;

use serde::Serialize;

use crate::model::Document;

/// Counters collected while filling a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FillStats {
    /// Paragraphs inspected
    pub paragraphs_visited: usize,

    /// Paragraphs whose text changed
    pub paragraphs_changed: usize,

    /// Creditor table changes, when records were given and a table was found
    pub creditors: Option<ReconcileReport>,
}

/// Substitute placeholders in every paragraph of `document`.
///
/// Creditor records are handled separately by [`reconcile_creditors`].
pub fn fill_document(
    document: &mut Document,
    replacements: &Replacements,
    options: &FillOptions,
) -> FillStats {
    let mut stats = FillStats::default();
    if replacements.is_empty() {
        return stats;
    }

    document.visit_paragraphs_mut(options.include_headers_footers, |paragraph| {
        stats.paragraphs_visited += 1;
        if substitute_paragraph(paragraph, replacements) {
            stats.paragraphs_changed += 1;
            log::debug!("Filled paragraph: {:?}", paragraph.text());
        }
    });

    log::debug!(
        "Filled {} of {} paragraphs",
        stats.paragraphs_changed,
        stats.paragraphs_visited
    );
    stats
}
