//! Table types.

use super::{blocks_from_nodes, blocks_into_nodes, Block, Paragraph};
use crate::xml::{Element, Node};

/// A table (`w:tbl`).
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Attributes of the `w:tbl` element
    pub attributes: Vec<(String, String)>,

    /// Table content in document order (properties, grid, rows)
    pub content: Vec<TableContent>,
}

/// Content of a table element.
#[derive(Debug, Clone, PartialEq)]
pub enum TableContent {
    /// A table row
    Row(TableRow),

    /// Any other node (`w:tblPr`, `w:tblGrid`, bookmarks), kept verbatim
    Other(Node),
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
            content: Vec::new(),
        }
    }

    /// Build a table from a `w:tbl` element.
    pub fn from_element(el: Element) -> Self {
        let content = el
            .children
            .into_iter()
            .map(|node| match node {
                Node::Element(child) if child.is("w:tr") => {
                    TableContent::Row(TableRow::from_element(child))
                }
                other => TableContent::Other(other),
            })
            .collect();

        Self {
            attributes: el.attributes,
            content,
        }
    }

    /// Convert back into a `w:tbl` element.
    pub fn into_element(self) -> Element {
        Element {
            name: "w:tbl".to_string(),
            attributes: self.attributes,
            children: self
                .content
                .into_iter()
                .map(|c| match c {
                    TableContent::Row(row) => Node::Element(row.into_element()),
                    TableContent::Other(node) => node,
                })
                .collect(),
        }
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = &TableRow> {
        self.content.iter().filter_map(|c| match c {
            TableContent::Row(row) => Some(row),
            TableContent::Other(_) => None,
        })
    }

    /// Iterate over rows mutably.
    pub fn rows_mut(&mut self) -> impl Iterator<Item = &mut TableRow> {
        self.content.iter_mut().filter_map(|c| match c {
            TableContent::Row(row) => Some(row),
            TableContent::Other(_) => None,
        })
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.rows().count()
    }

    /// Get a row by index.
    pub fn row(&self, index: usize) -> Option<&TableRow> {
        self.rows().nth(index)
    }

    /// Get a row by index, mutably.
    pub fn row_mut(&mut self, index: usize) -> Option<&mut TableRow> {
        self.rows_mut().nth(index)
    }

    /// Check if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count() == 0
    }

    /// Append a row after the last content node.
    pub fn push_row(&mut self, row: TableRow) {
        self.content.push(TableContent::Row(row));
    }

    /// Remove the row at `index` and return it.
    pub fn remove_row(&mut self, index: usize) -> Option<TableRow> {
        let position = self.row_position(index)?;
        match self.content.remove(position) {
            TableContent::Row(row) => Some(row),
            TableContent::Other(_) => None,
        }
    }

    /// Detach every row from `index` to the end, in order.
    ///
    /// Non-row content stays where it is.
    pub fn split_off_rows(&mut self, index: usize) -> Vec<TableRow> {
        let Some(start) = self.row_position(index) else {
            return Vec::new();
        };

        let mut detached = Vec::new();
        let mut kept = Vec::with_capacity(self.content.len());
        for (position, item) in std::mem::take(&mut self.content).into_iter().enumerate() {
            match item {
                TableContent::Row(row) if position >= start => detached.push(row),
                other => kept.push(other),
            }
        }
        self.content = kept;
        detached
    }

    /// Column widths from the table grid (`w:tblGrid/w:gridCol/@w:w`).
    ///
    /// One entry per grid column; `None` where a column has no width.
    pub fn grid_widths(&self) -> Vec<Option<String>> {
        self.content
            .iter()
            .find_map(|c| match c {
                TableContent::Other(Node::Element(el)) if el.is("w:tblGrid") => Some(el),
                _ => None,
            })
            .map(|grid| {
                grid.children_named("w:gridCol")
                    .map(|col| col.attr("w:w").map(str::to_string))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Empty row with one cell per grid column, or `None` when the table
    /// has no grid.
    pub fn grid_row(&self) -> Option<TableRow> {
        let widths = self.grid_widths();
        (!widths.is_empty()).then(|| TableRow::from_grid(&widths))
    }

    /// Get plain text representation of the table.
    pub fn plain_text(&self) -> String {
        self.rows()
            .map(|row| row.plain_text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn row_position(&self, index: usize) -> Option<usize> {
        self.content
            .iter()
            .enumerate()
            .filter(|(_, c)| matches!(c, TableContent::Row(_)))
            .nth(index)
            .map(|(position, _)| position)
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

/// A table row (`w:tr`).
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    /// Attributes of the `w:tr` element
    pub attributes: Vec<(String, String)>,

    /// Row content in document order (row properties, cells)
    pub content: Vec<RowContent>,
}

/// Content of a row element.
#[derive(Debug, Clone, PartialEq)]
pub enum RowContent {
    /// A table cell
    Cell(TableCell),

    /// Any other node (`w:trPr`, `w:tblPrEx`), kept verbatim
    Other(Node),
}

impl TableRow {
    /// Create a row with cells.
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            attributes: Vec::new(),
            content: cells.into_iter().map(RowContent::Cell).collect(),
        }
    }

    /// Create a row from text values.
    pub fn from_strings<S: AsRef<str>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(values.into_iter().map(TableCell::text).collect())
    }

    /// Create a row with one empty cell per grid column.
    pub fn from_grid(widths: &[Option<String>]) -> Self {
        Self::new(
            widths
                .iter()
                .map(|width| {
                    let mut cell = TableCell::empty();
                    if let Some(w) = width {
                        cell.properties = Some(
                            Element::new("w:tcPr").with_child(
                                Element::new("w:tcW")
                                    .with_attr("w:w", w.as_str())
                                    .with_attr("w:type", "dxa"),
                            ),
                        );
                    }
                    cell
                })
                .collect(),
        )
    }

    /// Build a row from a `w:tr` element.
    pub fn from_element(el: Element) -> Self {
        let content = el
            .children
            .into_iter()
            .map(|node| match node {
                Node::Element(child) if child.is("w:tc") => {
                    RowContent::Cell(TableCell::from_element(child))
                }
                other => RowContent::Other(other),
            })
            .collect();

        Self {
            attributes: el.attributes,
            content,
        }
    }

    /// Convert back into a `w:tr` element.
    pub fn into_element(self) -> Element {
        Element {
            name: "w:tr".to_string(),
            attributes: self.attributes,
            children: self
                .content
                .into_iter()
                .map(|c| match c {
                    RowContent::Cell(cell) => Node::Element(cell.into_element()),
                    RowContent::Other(node) => node,
                })
                .collect(),
        }
    }

    /// Iterate over cells.
    pub fn cells(&self) -> impl Iterator<Item = &TableCell> {
        self.content.iter().filter_map(|c| match c {
            RowContent::Cell(cell) => Some(cell),
            RowContent::Other(_) => None,
        })
    }

    /// Iterate over cells mutably.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut TableCell> {
        self.content.iter_mut().filter_map(|c| match c {
            RowContent::Cell(cell) => Some(cell),
            RowContent::Other(_) => None,
        })
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells().count()
    }

    /// Trimmed cell texts joined by a single space.
    pub fn plain_text(&self) -> String {
        self.cells()
            .map(|c| c.plain_text().trim().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Overwrite cell texts in order; extra values are ignored.
    pub fn set_texts<S: AsRef<str>>(&mut self, values: &[S]) {
        for (cell, value) in self.cells_mut().zip(values) {
            cell.set_text(value);
        }
    }
}

/// A table cell (`w:tc`).
#[derive(Debug, Clone, PartialEq)]
pub struct TableCell {
    /// Attributes of the `w:tc` element
    pub attributes: Vec<(String, String)>,

    /// Cell properties (`w:tcPr`)
    pub properties: Option<Element>,

    /// Cell content (paragraphs and nested tables)
    pub content: Vec<Block>,
}

impl TableCell {
    /// Create a new cell with text content.
    pub fn text(text: impl AsRef<str>) -> Self {
        let mut cell = Self::empty();
        cell.set_text(text);
        cell
    }

    /// Create a cell holding one empty paragraph.
    pub fn empty() -> Self {
        Self {
            attributes: Vec::new(),
            properties: None,
            content: vec![Block::Paragraph(Paragraph::new())],
        }
    }

    /// Build a cell from a `w:tc` element.
    pub fn from_element(el: Element) -> Self {
        let mut properties = None;
        let mut rest = Vec::with_capacity(el.children.len());
        for node in el.children {
            match node {
                Node::Element(child) if child.is("w:tcPr") && properties.is_none() => {
                    properties = Some(child)
                }
                other => rest.push(other),
            }
        }

        Self {
            attributes: el.attributes,
            properties,
            content: blocks_from_nodes(rest),
        }
    }

    /// Convert back into a `w:tc` element.
    pub fn into_element(self) -> Element {
        let mut children = Vec::with_capacity(self.content.len() + 1);
        if let Some(props) = self.properties {
            children.push(Node::Element(props));
        }
        children.extend(blocks_into_nodes(self.content));

        Element {
            name: "w:tc".to_string(),
            attributes: self.attributes,
            children,
        }
    }

    /// Iterate over direct paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.content.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Paragraph texts joined by newlines.
    pub fn plain_text(&self) -> String {
        self.paragraphs()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Replace all cell content with one paragraph holding `text`.
    ///
    /// Cell properties are kept; paragraph and run formatting are not.
    pub fn set_text(&mut self, text: impl AsRef<str>) {
        self.content = vec![Block::Paragraph(Paragraph::with_text(text))];
    }

    /// Check if the cell has no text.
    pub fn is_empty(&self) -> bool {
        self.plain_text().trim().is_empty()
    }
}
