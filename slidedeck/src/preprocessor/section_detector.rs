//! Section and cover detection
//!
//! Sections are headings at the configured depth; the cover is the `#`
//! heading (plus an optional `##` subtitle) that opens the document.

use super::lines::{class_annotation, front_matter_end, heading_text, is_blank};

/// A section boundary found in the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section number (1-based, document order)
    pub index: usize,
    /// Heading text without the `#` markers
    pub title: String,
    /// Line index of the heading (0-based)
    pub heading_line: usize,
}

/// Subtitle of the cover, taken from the line right below the title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtitle {
    /// Subtitle text
    pub text: String,
    /// Line index of the `##` heading
    pub line: usize,
}

/// Title and optional subtitle extracted from the top of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverInfo {
    /// Title text
    pub title: String,
    /// Line index of the `#` heading
    pub title_line: usize,
    /// Subtitle, if the title is directly followed by a `##` heading
    pub subtitle: Option<Subtitle>,
}

impl CoverInfo {
    /// Last line belonging to the title block
    pub fn last_line(&self) -> usize {
        self.subtitle
            .as_ref()
            .map_or(self.title_line, |subtitle| subtitle.line)
    }

    /// True if `line` is the title or subtitle heading
    pub fn occupies(&self, line: usize) -> bool {
        line == self.title_line || self.subtitle.as_ref().is_some_and(|s| s.line == line)
    }
}

/// Detect section headings at `heading_depth`
///
/// A heading immediately preceded by a `<!-- _class: ... -->` annotation is
/// skipped: the author styled that slide by hand.
///
/// # Parameters
/// * `lines` - Document lines
/// * `heading_depth` - Heading level that starts a section (2 = `##`)
///
/// # Returns
/// * Sections in document order, numbered from 1
pub fn detect_sections(lines: &[&str], heading_depth: usize) -> Vec<Section> {
    let start = front_matter_end(lines);
    let mut sections = Vec::new();

    for (idx, line) in lines.iter().enumerate().skip(start) {
        let overridden = idx > 0 && class_annotation(lines[idx - 1]).is_some();
        if overridden {
            continue;
        }

        if let Some(title) = heading_text(line, heading_depth) {
            sections.push(Section {
                index: sections.len() + 1,
                title: title.to_string(),
                heading_line: idx,
            });
        }
    }

    sections
}

/// Detect the cover title and subtitle
///
/// Only the first non-blank line is considered. If it is not a `#` heading
/// there is no cover. The subtitle must follow on the very next line.
pub fn detect_cover(lines: &[&str]) -> Option<CoverInfo> {
    let start = front_matter_end(lines);
    let (title_line, first) = lines
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, line)| !is_blank(line))?;

    let title = heading_text(first, 1)?;

    let subtitle = lines
        .get(title_line + 1)
        .and_then(|next| heading_text(next, 2))
        .map(|text| Subtitle {
            text: text.to_string(),
            line: title_line + 1,
        });

    Some(CoverInfo {
        title: title.to_string(),
        title_line,
        subtitle,
    })
}
