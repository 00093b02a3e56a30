//! Document model types for DOCX content.
//!
//! The model is a typed view of the parts of a word-processing package that
//! the fill routines touch: body blocks, paragraphs, runs and tables. Every
//! node the model does not interpret is carried along verbatim, so a
//! document converted back to XML differs from its source only where it was
//! edited.

mod document;
mod paragraph;
mod table;

pub(crate) use document::{blocks_from_nodes, blocks_into_nodes};
pub use document::{Block, Document, Story, StoryKind};
pub use paragraph::{InlineContent, Paragraph, TextRun, TextStyle};
pub use table::{RowContent, Table, TableCell, TableContent, TableRow};
