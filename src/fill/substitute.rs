//! Placeholder substitution within a paragraph.
//!
//! A placeholder in a template is frequently split over several runs (a
//! spell-check mark or a formatting change in the middle of `{Фамилия}` is
//! enough). Substitution therefore works on the paragraph's whole text and,
//! when anything changed, collapses the paragraph into a single run styled
//! like the character where the first replaced placeholder began.

use crate::model::{Paragraph, TextRun, TextStyle};

use super::Replacements;

/// Per-character formatting of a paragraph, captured before it is edited.
///
/// Styles live in an arena with one entry per run; each character stores the
/// index of its run's style.
struct FormatSnapshot {
    styles: Vec<TextStyle>,
    chars: Vec<usize>,
    text: String,
}

impl FormatSnapshot {
    fn capture(paragraph: &Paragraph) -> Self {
        let mut styles = Vec::new();
        let mut chars = Vec::new();
        let mut text = String::new();

        for run in paragraph.runs() {
            let run_text = run.text();
            let index = styles.len();
            styles.push(run.style());
            chars.extend(std::iter::repeat(index).take(run_text.chars().count()));
            text.push_str(&run_text);
        }

        Self { styles, chars, text }
    }

    /// Style of the character starting at byte offset `byte`.
    fn style_at(&self, byte: usize) -> Option<&TextStyle> {
        let char_index = self.text.get(..byte)?.chars().count();
        self.chars.get(char_index).map(|&i| &self.styles[i])
    }

    /// Style for the rewritten run: the style where the first placeholder,
    /// in list order, starts; otherwise the style of the first character.
    fn base_style(&self, replacements: &Replacements) -> Option<&TextStyle> {
        if self.chars.is_empty() {
            return None;
        }

        replacements
            .first_match(&self.text)
            .and_then(|(_, byte)| self.style_at(byte))
            .or_else(|| self.chars.first().map(|&i| &self.styles[i]))
    }
}

/// Replace placeholders in one paragraph.
///
/// Returns `true` when the paragraph text changed. An unchanged paragraph
/// keeps its runs exactly as they were. A changed paragraph loses all of its
/// runs and gets one new run (unless the new text is empty) carrying the
/// base style; non-run inline content such as bookmarks is kept.
pub fn substitute_paragraph(paragraph: &mut Paragraph, replacements: &Replacements) -> bool {
    if paragraph.run_count() == 0 {
        return false;
    }

    let snapshot = FormatSnapshot::capture(paragraph);
    let new_text = replacements.apply(&snapshot.text);
    if new_text == snapshot.text {
        return false;
    }

    let style = snapshot.base_style(replacements).cloned().unwrap_or_default();
    paragraph.clear_runs();
    if !new_text.is_empty() {
        paragraph.add_run(TextRun::with_style(&new_text, &style));
    }
    true
}
