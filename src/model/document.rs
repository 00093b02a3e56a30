//! Document-level types.

use super::{Paragraph, Table};
use crate::xml::Node;

/// Block-level content of a body, cell, header or footer.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// A paragraph (`w:p`)
    Paragraph(Paragraph),

    /// A table (`w:tbl`)
    Table(Table),

    /// Any other node (section properties, content controls), kept verbatim
    Other(Node),
}

impl Block {
    /// Classify an XML node.
    pub fn from_node(node: Node) -> Self {
        match node {
            Node::Element(el) if el.is("w:p") => Block::Paragraph(Paragraph::from_element(el)),
            Node::Element(el) if el.is("w:tbl") => Block::Table(Table::from_element(el)),
            other => Block::Other(other),
        }
    }

    /// Convert back into an XML node.
    pub fn into_node(self) -> Node {
        match self {
            Block::Paragraph(p) => Node::Element(p.into_element()),
            Block::Table(t) => Node::Element(t.into_element()),
            Block::Other(node) => node,
        }
    }
}

pub(crate) fn blocks_from_nodes(nodes: Vec<Node>) -> Vec<Block> {
    nodes.into_iter().map(Block::from_node).collect()
}

pub(crate) fn blocks_into_nodes(blocks: Vec<Block>) -> Vec<Node> {
    blocks.into_iter().map(Block::into_node).collect()
}

/// Which kind of part a story comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryKind {
    /// Page header part
    Header,
    /// Page footer part
    Footer,
}

/// Block content of a header or footer part.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    /// Package part name, e.g. `word/header1.xml`
    pub part_name: String,

    /// Header or footer
    pub kind: StoryKind,

    /// Blocks in document order
    pub blocks: Vec<Block>,
}

impl Story {
    /// Create an empty story.
    pub fn new(part_name: impl Into<String>, kind: StoryKind) -> Self {
        Self {
            part_name: part_name.into(),
            kind,
            blocks: Vec::new(),
        }
    }
}

/// A word-processing document: body blocks plus header and footer stories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    /// Body blocks in document order
    pub body: Vec<Block>,

    /// Header stories
    pub headers: Vec<Story>,

    /// Footer stories
    pub footers: Vec<Story>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a paragraph to the body.
    pub fn add_paragraph(&mut self, paragraph: Paragraph) {
        self.body.push(Block::Paragraph(paragraph));
    }

    /// Append a table to the body.
    pub fn add_table(&mut self, table: Table) {
        self.body.push(Block::Table(table));
    }

    /// Top-level body paragraphs.
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.body.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    /// Top-level body tables.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.body.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Top-level body tables, mutably.
    pub fn tables_mut(&mut self) -> impl Iterator<Item = &mut Table> {
        self.body.iter_mut().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    /// Header stories followed by footer stories.
    pub fn stories(&self) -> impl Iterator<Item = &Story> {
        self.headers.iter().chain(self.footers.iter())
    }

    /// Check if the body has no content.
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Visit every paragraph.
    ///
    /// Order: top-level body paragraphs, then paragraphs inside body tables
    /// (row-major, nested tables included), then header and footer stories
    /// when `include_stories` is set.
    pub fn visit_paragraphs<F: FnMut(&Paragraph)>(&self, include_stories: bool, mut f: F) {
        visit_blocks(&self.body, &mut f);
        if include_stories {
            for story in self.stories() {
                visit_blocks(&story.blocks, &mut f);
            }
        }
    }

    /// Visit every paragraph mutably, in the same order as
    /// [`Document::visit_paragraphs`].
    pub fn visit_paragraphs_mut<F: FnMut(&mut Paragraph)>(
        &mut self,
        include_stories: bool,
        mut f: F,
    ) {
        visit_blocks_mut(&mut self.body, &mut f);
        if include_stories {
            for story in self.headers.iter_mut().chain(self.footers.iter_mut()) {
                visit_blocks_mut(&mut story.blocks, &mut f);
            }
        }
    }

    /// Get plain text content of the body.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        self.visit_paragraphs(false, |p| lines.push(p.text()));
        lines.join("\n")
    }
}

fn visit_blocks<F: FnMut(&Paragraph)>(blocks: &[Block], f: &mut F) {
    for block in blocks {
        if let Block::Paragraph(p) = block {
            f(p);
        }
    }
    for block in blocks {
        if let Block::Table(table) = block {
            for row in table.rows() {
                for cell in row.cells() {
                    visit_blocks(&cell.content, f);
                }
            }
        }
    }
}

fn visit_blocks_mut<F: FnMut(&mut Paragraph)>(blocks: &mut [Block], f: &mut F) {
    for block in blocks.iter_mut() {
        if let Block::Paragraph(p) = block {
            f(p);
        }
    }
    for block in blocks.iter_mut() {
        if let Block::Table(table) = block {
            for row in table.rows_mut() {
                for cell in row.cells_mut() {
                    visit_blocks_mut(&mut cell.content, f);
                }
            }
        }
    }
}
