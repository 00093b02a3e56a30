//! Creditor table reconciliation.
//!
//! The creditor list template carries one table whose data rows are labelled
//! `1.1`, `1.2`, ... followed by a "section 2" block (mandatory payments).
//! Reconciliation rewrites the labelled rows from the supplied records, adds
//! rows in front of section 2 when there are more records than rows, and
//! deletes labelled rows that have no record.

use serde::{Deserialize, Serialize};

use super::amount::format_amount;
use super::options::CreditorTableConfig;
use crate::model::{Document, Table, TableRow};

/// Number of columns in a creditor row.
pub const CREDITOR_COLUMNS: usize = 8;

/// One creditor (a row of the obligations table).
///
/// Field values are taken as given. Deserialization accepts the field names
/// used by the filing forms as aliases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditorRecord {
    /// Content of the obligation
    #[serde(alias = "Содержание обязательства")]
    pub obligation: String,

    /// Creditor name
    #[serde(alias = "Кредитор")]
    pub creditor: String,

    /// Creditor address
    #[serde(alias = "Место нахождения")]
    pub address: String,

    /// Legal basis of the obligation
    #[serde(alias = "Основание")]
    pub basis: String,

    /// Total amount of the obligation
    #[serde(alias = "Сумма обязательства")]
    pub obligation_amount: String,

    /// Outstanding debt
    #[serde(alias = "Задолженность")]
    pub debt_amount: String,

    /// Penalties and fines
    #[serde(alias = "Штрафы")]
    pub penalty_amount: String,
}

impl CreditorRecord {
    /// Create a record with the creditor name set.
    pub fn new(creditor: impl Into<String>) -> Self {
        Self {
            creditor: creditor.into(),
            ..Default::default()
        }
    }

    /// Cell texts for the row labelled `1.{index}`, amounts formatted.
    pub fn row_cells(&self, index: usize) -> [String; CREDITOR_COLUMNS] {
        [
            format!("1.{}", index),
            self.obligation.clone(),
            self.creditor.clone(),
            self.address.clone(),
            self.basis.clone(),
            format_amount(&self.obligation_amount),
            format_amount(&self.debt_amount),
            format_amount(&self.penalty_amount),
        ]
    }

    /// Parse a list of records from a JSON array.
    pub fn list_from_json(json: &str) -> crate::Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// What reconciliation did to the creditor table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// Position of the table among the top-level body tables
    pub table_index: usize,

    /// Existing rows overwritten from records
    pub rows_updated: usize,

    /// Rows added for records without a row
    pub rows_appended: usize,

    /// Labelled rows removed for lack of a record
    pub rows_deleted: usize,

    /// Section 2 rows moved behind the appended rows
    pub section_rows_moved: usize,
}

/// Check whether a header row text marks the creditor table.
///
/// Text and markers are compared case-insensitively.
pub fn is_creditor_header(header_text: &str, config: &CreditorTableConfig) -> bool {
    let text = header_text.to_lowercase();
    text.contains(&config.header_marker.to_lowercase())
        && config
            .obligation_markers
            .iter()
            .any(|marker| text.contains(&marker.to_lowercase()))
}

/// Find the creditor table among the top-level body tables.
pub fn locate_creditor_table(document: &Document, config: &CreditorTableConfig) -> Option<usize> {
    document.tables().position(|table| {
        table
            .row(0)
            .is_some_and(|header| is_creditor_header(&header_text(header), config))
    })
}

/// Creditor index of a row labelled `1.N` (1-based).
///
/// Rows that do not start with `1.`, whose label does not parse, or whose
/// index is zero are unclassified.
pub fn creditor_index(row_text: &str) -> Option<usize> {
    if !row_text.starts_with("1.") {
        return None;
    }
    row_text
        .split_whitespace()
        .next()?
        .split('.')
        .nth(1)?
        .parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
}

/// Position of the first row opening section 2.
pub fn section_two_start(table: &Table, config: &CreditorTableConfig) -> Option<usize> {
    let marker = config.section_marker.to_lowercase();
    table.rows().position(|row| {
        let text = row.plain_text();
        let text = text.trim();
        text == "2"
            || (text.starts_with('2') && text.to_lowercase().contains(&marker))
    })
}

/// Reconcile the creditor table of `document` with `records`.
///
/// Returns `None` when the document has no creditor table.
pub fn reconcile_creditors(
    document: &mut Document,
    records: &[CreditorRecord],
    config: &CreditorTableConfig,
) -> Option<ReconcileReport> {
    let Some(table_index) = locate_creditor_table(document, config) else {
        log::debug!("No creditor table found, skipping {} records", records.len());
        return None;
    };

    let table = document.tables_mut().nth(table_index)?;
    let mut report = reconcile_table(table, records, config);
    report.table_index = table_index;

    log::info!(
        "Creditor table {}: {} updated, {} appended, {} deleted",
        table_index,
        report.rows_updated,
        report.rows_appended,
        report.rows_deleted
    );
    Some(report)
}

/// Reconcile one table with `records`.
pub fn reconcile_table(
    table: &mut Table,
    records: &[CreditorRecord],
    config: &CreditorTableConfig,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let mut highest = 0;
    let mut to_delete = Vec::new();

    for (position, row) in table.rows_mut().enumerate() {
        let Some(index) = creditor_index(&row.plain_text()) else {
            continue;
        };
        highest = highest.max(index);

        let Some(record) = records.get(index - 1) else {
            to_delete.push(position);
            continue;
        };

        if row.cell_count() < CREDITOR_COLUMNS {
            log::warn!(
                "Creditor row 1.{} has {} cells, expected {}; left unchanged",
                index,
                row.cell_count(),
                CREDITOR_COLUMNS
            );
            continue;
        }
        row.set_texts(&record.row_cells(index));
        report.rows_updated += 1;
    }

    if records.len() > highest {
        let section = section_two_start(table, config)
            .map(|start| table.split_off_rows(start))
            .unwrap_or_default();

        for (offset, record) in records[highest..].iter().enumerate() {
            let index = highest + offset + 1;
            let mut row = new_row(table);
            if row.cell_count() < CREDITOR_COLUMNS {
                log::warn!(
                    "Table grid has {} columns, expected {}; row 1.{} left empty",
                    row.cell_count(),
                    CREDITOR_COLUMNS,
                    index
                );
            } else {
                row.set_texts(&record.row_cells(index));
            }
            table.push_row(row);
            report.rows_appended += 1;
        }

        report.section_rows_moved = section.len();
        for row in section {
            table.push_row(row);
        }
    }

    // Marked rows imply highest > records.len(), so nothing was appended
    for position in to_delete.into_iter().rev() {
        if table.remove_row(position).is_some() {
            report.rows_deleted += 1;
        }
    }

    report
}

fn header_text(row: &TableRow) -> String {
    row.cells()
        .map(|c| c.plain_text().trim().to_lowercase())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Empty row laid out on the table grid, or on the creditor columns when
/// the table has no grid.
fn new_row(table: &Table) -> TableRow {
    table
        .grid_row()
        .unwrap_or_else(|| TableRow::from_grid(&vec![None; CREDITOR_COLUMNS]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Paragraph;
    use crate::xml;

    const HEADER: [&str; CREDITOR_COLUMNS] = [
        "№ п/п",
        "Содержание обязательства",
        "Кредитор",
        "Место нахождения",
        "Основание возникновения",
        "Сумма по денежным обязательствам",
        "Задолженность",
        "Штрафы, пени",
    ];

    fn data_row(index: usize, creditor: &str) -> TableRow {
        let mut cells = vec![format!("1.{}", index), "кредит".into(), creditor.into()];
        cells.resize(CREDITOR_COLUMNS, String::new());
        TableRow::from_strings(cells)
    }

    fn creditor_table(rows: usize, with_section: bool) -> Table {
        let mut src = String::from("<w:tbl><w:tblPr/><w:tblGrid>");
        for _ in 0..CREDITOR_COLUMNS {
            src.push_str(r#"<w:gridCol w:w="1200"/>"#);
        }
        src.push_str("</w:tblGrid></w:tbl>");

        let mut table = Table::from_element(xml::parse(&src).unwrap());
        table.push_row(TableRow::from_strings(HEADER));
        table.push_row(TableRow::from_strings(["1", "Денежные обязательства"]));
        for i in 1..=rows {
            table.push_row(data_row(i, &format!("Банк {}", i)));
        }
        if with_section {
            table.push_row(TableRow::from_strings(["2", "Обязательные платежи"]));
            table.push_row(TableRow::from_strings(["2.1", "Налог"]));
        }
        table
    }

    fn records(n: usize) -> Vec<CreditorRecord> {
        (1..=n)
            .map(|i| CreditorRecord {
                creditor: format!("Кредитор {}", i),
                obligation_amount: "1000000".into(),
                ..Default::default()
            })
            .collect()
    }

    fn texts(table: &Table) -> Vec<String> {
        table.rows().map(|r| r.plain_text()).collect()
    }

    #[test]
    fn test_creditor_index() {
        assert_eq!(creditor_index("1.1 Кредит Банк"), Some(1));
        assert_eq!(creditor_index("1.12"), Some(12));
        assert_eq!(creditor_index("1.0 x"), None);
        assert_eq!(creditor_index("1. x"), None);
        assert_eq!(creditor_index("1 Денежные"), None);
        assert_eq!(creditor_index("2.1 Налог"), None);
        assert_eq!(creditor_index("1.a"), None);
    }

    #[test]
    fn test_is_creditor_header() {
        let config = CreditorTableConfig::default();
        assert!(is_creditor_header("Кредитор Обязательство", &config));
        assert!(is_creditor_header("кредитор по денежным обязательствам", &config));
        assert!(!is_creditor_header("Кредитор Сумма", &config));
        assert!(!is_creditor_header("Обязательство", &config));
    }

    #[test]
    fn test_row_cells_format_amounts() {
        let record = CreditorRecord {
            obligation: "Кредитный договор".into(),
            creditor: "ПАО Банк".into(),
            obligation_amount: "150000".into(),
            debt_amount: "12345,6".into(),
            penalty_amount: "нет".into(),
            ..Default::default()
        };
        let cells = record.row_cells(3);
        assert_eq!(cells[0], "1.3");
        assert_eq!(cells[2], "ПАО Банк");
        assert_eq!(cells[5], "150 000,00");
        assert_eq!(cells[6], "12 345,60");
        assert_eq!(cells[7], "нет");
    }

    #[test]
    fn test_record_from_form_field_names() {
        let json = r#"[{"Кредитор": "ООО Ромашка", "Сумма обязательства": "500"}, {"creditor": "Банк"}]"#;
        let list = CreditorRecord::list_from_json(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].creditor, "ООО Ромашка");
        assert_eq!(list[0].obligation_amount, "500");
        assert_eq!(list[1], CreditorRecord::new("Банк"));
    }

    #[test]
    fn test_fewer_records_deletes_rows() {
        let mut table = creditor_table(3, true);
        let report = reconcile_table(&mut table, &records(1), &CreditorTableConfig::default());

        assert_eq!(report.rows_updated, 1);
        assert_eq!(report.rows_deleted, 2);
        assert_eq!(report.rows_appended, 0);

        let rows = texts(&table);
        assert_eq!(rows.len(), 5);
        assert!(rows[2].starts_with("1.1"));
        assert!(rows[2].contains("Кредитор 1"));
        assert!(rows[2].contains("1 000 000,00"));
        assert_eq!(rows[3], "2 Обязательные платежи");
        assert_eq!(rows[4], "2.1 Налог");
    }

    #[test]
    fn test_more_records_appends_before_section_two() {
        let mut table = creditor_table(1, true);
        let report = reconcile_table(&mut table, &records(3), &CreditorTableConfig::default());

        assert_eq!(report.rows_updated, 1);
        assert_eq!(report.rows_appended, 2);
        assert_eq!(report.section_rows_moved, 2);

        let rows = texts(&table);
        let labels: Vec<&str> = rows.iter().map(|r| r.split(' ').next().unwrap()).collect();
        assert_eq!(labels, vec!["№", "1", "1.1", "1.2", "1.3", "2", "2.1"]);
        assert!(rows[4].contains("Кредитор 3"));
        assert_eq!(table.row(4).unwrap().cell_count(), CREDITOR_COLUMNS);
    }

    #[test]
    fn test_appended_rows_follow_grid() {
        let mut table = creditor_table(0, false);
        reconcile_table(&mut table, &records(1), &CreditorTableConfig::default());

        let row = table.row(2).unwrap();
        let cell = row.cells().next().unwrap();
        let width = cell
            .properties
            .as_ref()
            .and_then(|p| p.child("w:tcW"))
            .and_then(|w| w.attr("w:w"));
        assert_eq!(width, Some("1200"));
        assert_eq!(cell.plain_text(), "1.1");
    }

    #[test]
    fn test_equal_count_only_updates() {
        let mut table = creditor_table(2, true);
        let report = reconcile_table(&mut table, &records(2), &CreditorTableConfig::default());
        assert_eq!(
            report,
            ReconcileReport {
                rows_updated: 2,
                ..Default::default()
            }
        );
        assert_eq!(table.row_count(), 6);
    }

    #[test]
    fn test_zero_records_removes_all_labelled_rows() {
        let mut table = creditor_table(2, true);
        let report = reconcile_table(&mut table, &[], &CreditorTableConfig::default());
        assert_eq!(report.rows_deleted, 2);
        assert_eq!(texts(&table)[2], "2 Обязательные платежи");
    }

    #[test]
    fn test_narrow_grid_appends_empty_row() {
        let src = r#"<w:tbl><w:tblGrid><w:gridCol w:w="100"/><w:gridCol w:w="100"/><w:gridCol w:w="100"/></w:tblGrid></w:tbl>"#;
        let mut table = Table::from_element(xml::parse(src).unwrap());
        table.push_row(TableRow::from_strings(["Кредитор", "Обязательство", "Сумма"]));

        let record = CreditorRecord {
            obligation: "Займ".into(),
            creditor: "Банк".into(),
            ..Default::default()
        };
        let report = reconcile_table(&mut table, &[record], &CreditorTableConfig::default());

        assert_eq!(report.rows_appended, 1);
        assert_eq!(table.row_count(), 2);
        let row = table.row(1).unwrap();
        assert_eq!(row.cell_count(), 3);
        assert!(row.cells().all(|c| c.plain_text().is_empty()));
    }

    #[test]
    fn test_markers_match_in_any_case() {
        let config = CreditorTableConfig::new()
            .with_header_marker("КРЕДИТОР")
            .with_obligation_markers(["Обязательство"])
            .with_section_marker("Обязательные Платежи");
        assert!(is_creditor_header("кредитор обязательство", &config));

        let table = creditor_table(1, true);
        assert_eq!(section_two_start(&table, &config), Some(3));

        let mut section = Table::new();
        section.push_row(TableRow::from_strings(["2.", "ОБЯЗАТЕЛЬНЫЕ ПЛАТЕЖИ"]));
        assert_eq!(section_two_start(&section, &config), Some(0));
    }

    #[test]
    fn test_short_row_is_skipped() {
        let mut table = creditor_table(0, false);
        table.push_row(TableRow::from_strings(["1.1", "old"]));
        let report = reconcile_table(&mut table, &records(1), &CreditorTableConfig::default());
        assert_eq!(report.rows_updated, 0);
        assert_eq!(table.row(2).unwrap().plain_text(), "1.1 old");
    }

    #[test]
    fn test_reconcile_picks_first_matching_table() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("Список кредиторов"));
        let mut other = Table::new();
        other.push_row(TableRow::from_strings(["Кредитор", "Сумма"]));
        other.push_row(TableRow::from_strings(["1.1", "Старый долг"]));
        doc.add_table(other);
        doc.add_table(creditor_table(1, true));
        doc.add_table(creditor_table(1, true));

        let config = CreditorTableConfig::default();
        assert_eq!(locate_creditor_table(&doc, &config), Some(1));

        let report = reconcile_creditors(&mut doc, &records(2), &config).unwrap();
        assert_eq!(report.table_index, 1);

        let tables: Vec<&Table> = doc.tables().collect();
        assert_eq!(tables[0].row_count(), 2);
        assert_eq!(tables[0].row(1).unwrap().plain_text(), "1.1 Старый долг");
        assert_eq!(tables[1].row_count(), 6);
        assert_eq!(tables[2].row_count(), 5);
    }

    #[test]
    fn test_reconcile_without_table_is_noop() {
        let mut doc = Document::new();
        doc.add_paragraph(Paragraph::with_text("Нет таблицы"));
        let before = doc.clone();
        assert!(reconcile_creditors(&mut doc, &records(2), &CreditorTableConfig::default()).is_none());
        assert_eq!(doc, before);
    }
}
