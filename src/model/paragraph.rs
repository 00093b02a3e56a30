//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

use crate::xml::{Element, Node};

/// A paragraph (`w:p`).
///
/// Only direct `w:r` children are treated as runs. Everything else
/// (paragraph properties, hyperlinks, bookmarks, proofing marks) is kept as
/// [`InlineContent::Other`] and written back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    /// Attributes of the `w:p` element
    pub attributes: Vec<(String, String)>,

    /// Inline content in document order
    pub content: Vec<InlineContent>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
            content: Vec::new(),
        }
    }

    /// Create a paragraph holding one unstyled run.
    pub fn with_text(text: impl AsRef<str>) -> Self {
        let mut p = Self::new();
        p.add_run(TextRun::new(text));
        p
    }

    /// Build a paragraph from a `w:p` element.
    pub fn from_element(el: Element) -> Self {
        let content = el
            .children
            .into_iter()
            .map(|node| match node {
                Node::Element(child) if child.is("w:r") => {
                    InlineContent::Run(TextRun::from_element(child))
                }
                other => InlineContent::Other(other),
            })
            .collect();

        Self {
            attributes: el.attributes,
            content,
        }
    }

    /// Convert back into a `w:p` element.
    pub fn into_element(self) -> Element {
        Element {
            name: "w:p".to_string(),
            attributes: self.attributes,
            children: self
                .content
                .into_iter()
                .map(|c| match c {
                    InlineContent::Run(run) => Node::Element(run.into_element()),
                    InlineContent::Other(node) => node,
                })
                .collect(),
        }
    }

    /// Iterate over the runs.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.content.iter().filter_map(|c| match c {
            InlineContent::Run(run) => Some(run),
            InlineContent::Other(_) => None,
        })
    }

    /// Number of runs.
    pub fn run_count(&self) -> usize {
        self.runs().count()
    }

    /// Append a run at the end of the paragraph.
    pub fn add_run(&mut self, run: TextRun) {
        self.content.push(InlineContent::Run(run));
    }

    /// Remove all runs, leaving other inline content in place.
    pub fn clear_runs(&mut self) {
        self.content.retain(|c| !matches!(c, InlineContent::Run(_)));
    }

    /// Visible text: the concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs().map(|r| r.text()).collect()
    }

    /// Check if the paragraph has no text.
    pub fn is_empty(&self) -> bool {
        self.runs().all(|r| r.text().is_empty())
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, PartialEq)]
pub enum InlineContent {
    /// A text run
    Run(TextRun),

    /// Any other node, kept verbatim
    Other(Node),
}

/// A run of text with one formatting profile (`w:r`).
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    /// Attributes of the `w:r` element
    pub attributes: Vec<(String, String)>,

    /// Run properties (`w:rPr`)
    pub properties: Option<Element>,

    /// Run content (`w:t`, `w:tab`, `w:br`, drawings, ...)
    pub content: Vec<Node>,
}

impl TextRun {
    /// Create a new run with default style.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            attributes: Vec::new(),
            properties: None,
            content: text_nodes(text.as_ref()),
        }
    }

    /// Create a run with the set fields of `style` applied.
    pub fn with_style(text: impl AsRef<str>, style: &TextStyle) -> Self {
        Self {
            properties: style.to_properties(),
            ..Self::new(text)
        }
    }

    /// Build a run from a `w:r` element.
    pub fn from_element(el: Element) -> Self {
        let mut properties = None;
        let mut content = Vec::with_capacity(el.children.len());
        for node in el.children {
            match node {
                Node::Element(child) if child.is("w:rPr") && properties.is_none() => {
                    properties = Some(child)
                }
                other => content.push(other),
            }
        }

        Self {
            attributes: el.attributes,
            properties,
            content,
        }
    }

    /// Convert back into a `w:r` element.
    pub fn into_element(self) -> Element {
        let mut children = Vec::with_capacity(self.content.len() + 1);
        if let Some(props) = self.properties {
            children.push(Node::Element(props));
        }
        children.extend(self.content);

        Element {
            name: "w:r".to_string(),
            attributes: self.attributes,
            children,
        }
    }

    /// Visible text of the run.
    ///
    /// `w:t` contributes its text, tabs map to `\t`, line breaks and
    /// carriage returns to `\n`, non-breaking hyphens to `-`. Page and
    /// column breaks, drawings and field characters contribute nothing.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for el in self.content.iter().filter_map(Node::as_element) {
            match el.name.as_str() {
                "w:t" => text.push_str(&el.text()),
                "w:tab" | "w:ptab" => text.push('\t'),
                "w:br" => match el.attr("w:type") {
                    None | Some("textWrapping") => text.push('\n'),
                    Some(_) => {}
                },
                "w:cr" => text.push('\n'),
                "w:noBreakHyphen" => text.push('-'),
                _ => {}
            }
        }
        text
    }

    /// Replace the run content with `text`.
    pub fn set_text(&mut self, text: impl AsRef<str>) {
        self.content = text_nodes(text.as_ref());
    }

    /// Formatting profile read from the run properties.
    pub fn style(&self) -> TextStyle {
        self.properties
            .as_ref()
            .map(TextStyle::from_properties)
            .unwrap_or_default()
    }

    /// Check if this run has no text.
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

/// Split text into `w:t`, `w:tab` and `w:br` nodes.
fn text_nodes(text: &str) -> Vec<Node> {
    let mut nodes = Vec::new();
    let mut pending = String::new();

    let flush = |pending: &mut String, nodes: &mut Vec<Node>| {
        if !pending.is_empty() {
            nodes.push(Node::Element(
                Element::new("w:t")
                    .with_attr("xml:space", "preserve")
                    .with_text(std::mem::take(pending)),
            ));
        }
    };

    for ch in text.chars() {
        match ch {
            '\t' => {
                flush(&mut pending, &mut nodes);
                nodes.push(Node::Element(Element::new("w:tab")));
            }
            '\n' | '\r' => {
                flush(&mut pending, &mut nodes);
                nodes.push(Node::Element(Element::new("w:br")));
            }
            _ => pending.push(ch),
        }
    }
    flush(&mut pending, &mut nodes);
    nodes
}

/// Run-level formatting profile.
///
/// Each attribute is optional; `None` means the run inherits the value from
/// its paragraph or document style.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font family (`w:rFonts/@w:ascii`)
    pub font_name: Option<String>,

    /// Font size in points
    pub font_size: Option<f32>,

    /// Bold text
    pub bold: Option<bool>,

    /// Italic text
    pub italic: Option<bool>,

    /// Underline kind (`single`, `double`, `none`, ...)
    pub underline: Option<String>,

    /// Text color as hex RGB (e.g., "FF0000")
    pub color: Option<String>,
}

impl TextStyle {
    /// Read a style from a `w:rPr` element.
    pub fn from_properties(props: &Element) -> Self {
        let font_name = props
            .child("w:rFonts")
            .and_then(|f| f.attr("w:ascii"))
            .map(str::to_string);

        let font_size = props
            .child("w:sz")
            .and_then(|sz| sz.attr("w:val"))
            .and_then(|v| v.parse::<f32>().ok())
            .map(|half_points| half_points / 2.0);

        let underline = props.child("w:u").map(|u| {
            u.attr("w:val").unwrap_or("single").to_string()
        });

        let color = props
            .child("w:color")
            .and_then(|c| c.attr("w:val"))
            .filter(|v| !v.eq_ignore_ascii_case("auto"))
            .map(str::to_string);

        Self {
            font_name,
            font_size,
            bold: props.child("w:b").map(toggle_value),
            italic: props.child("w:i").map(toggle_value),
            underline,
            color,
        }
    }

    /// Build a `w:rPr` element holding the set fields, or `None` when no
    /// field is set.
    pub fn to_properties(&self) -> Option<Element> {
        if self.is_unset() {
            return None;
        }

        let mut props = Element::new("w:rPr");
        if let Some(ref name) = self.font_name {
            props = props.with_child(
                Element::new("w:rFonts")
                    .with_attr("w:ascii", name.as_str())
                    .with_attr("w:hAnsi", name.as_str()),
            );
        }
        if let Some(bold) = self.bold {
            props = props.with_child(toggle_element("w:b", bold));
        }
        if let Some(italic) = self.italic {
            props = props.with_child(toggle_element("w:i", italic));
        }
        if let Some(ref color) = self.color {
            props = props.with_child(Element::new("w:color").with_attr("w:val", color.as_str()));
        }
        if let Some(size) = self.font_size {
            let half_points = (size * 2.0).round() as u32;
            props = props.with_child(Element::new("w:sz").with_attr("w:val", half_points.to_string()));
        }
        if let Some(ref underline) = self.underline {
            props = props.with_child(Element::new("w:u").with_attr("w:val", underline.as_str()));
        }
        Some(props)
    }

    /// Check if no field is set.
    pub fn is_unset(&self) -> bool {
        self.font_name.is_none()
            && self.font_size.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
            && self.underline.is_none()
            && self.color.is_none()
    }
}

/// Read an on/off property such as `w:b`; a missing value means on.
fn toggle_value(el: &Element) -> bool {
    !matches!(el.attr("w:val"), Some("0" | "false" | "off"))
}

fn toggle_element(name: &str, on: bool) -> Element {
    let el = Element::new(name);
    if on {
        el
    } else {
        el.with_attr("w:val", "0")
    }
}
