//! Line vocabulary shared by the detectors, the segmenter and the assembler
//!
//! Every structural decision the preprocessor makes is based on one trimmed
//! line at a time; this module is the single place where those line shapes
//! are defined.

use regex::Regex;
use std::sync::LazyLock;

/// Slide separator, also the metadata block delimiter
pub const SEPARATOR: &str = "---";

/// Layout class prefixes that lock a slide against sub-heading splits
pub const LAYOUT_CLASS_PREFIXES: [&str; 5] = ["cols-", "img-", "hero", "bg-", "image-"];

/// Leading `---` metadata block at the very start of the text
static FRONT_MATTER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\A---\n.*?\n---(?:\n|\z)").unwrap());

/// `<!-- key: value -->` directive comment, optionally `_`-scoped
static DIRECTIVE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<!--\s*_?[A-Za-z][\w-]*\s*:.*-->$").unwrap());

/// `<!-- _class: name [name...] -->`
static CLASS_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<!--\s*_class:\s*([\w-]+(?:\s+[\w-]+)*)\s*-->$").unwrap());

/// Standalone opening (or void) tag such as `<div class="col">`
static OPENING_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^<[A-Za-z0-9]+(\s+[^>]+)?>$").unwrap());

/// Standalone closing tag such as `</div>`
static CLOSING_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^</[A-Za-z0-9]+>$").unwrap());

/// Split text into lines on `\n` only
///
/// A trailing newline yields a final empty line, and `\r` stays attached to
/// its line; classification always works on trimmed text so both are inert.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// True if the line is the slide separator
pub fn is_separator(line: &str) -> bool {
    line.trim() == SEPARATOR
}

/// True if the line has no visible content
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// The `#` prefix (markers plus one space) of a heading at `level`
pub fn heading_prefix(level: usize) -> String {
    format!("{} ", "#".repeat(level))
}

/// Heading level of an ATX heading line (`# ` .. `###### `)
pub fn heading_level(line: &str) -> Option<usize> {
    let trimmed = line.trim();
    let level = trimmed.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&level) && trimmed[level..].starts_with(' ') {
        Some(level)
    } else {
        None
    }
}

/// Heading text if the line is a heading of exactly `level`
///
/// The character right after the matched prefix must not be another `#`, so
/// `## #tag` is not a level-2 heading and `### x` never matches level 2.
pub fn heading_text(line: &str, level: usize) -> Option<&str> {
    let rest = line.trim().strip_prefix(heading_prefix(level).as_str())?;
    if rest.starts_with('#') {
        return None;
    }
    Some(rest.trim())
}

/// True if the line is any `<!-- key: value -->` directive comment
pub fn is_directive_comment(line: &str) -> bool {
    DIRECTIVE_COMMENT.is_match(line.trim())
}

/// Class names of a `<!-- _class: ... -->` annotation
pub fn class_annotation(line: &str) -> Option<&str> {
    CLASS_ANNOTATION
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// True if the line is a class annotation selecting a multi-zone layout
pub fn is_layout_annotation(line: &str) -> bool {
    class_annotation(line).is_some_and(|classes| {
        LAYOUT_CLASS_PREFIXES
            .iter()
            .any(|prefix| classes.starts_with(prefix))
    })
}

/// True if the whole line is a single opening HTML tag
pub fn is_opening_tag(line: &str) -> bool {
    OPENING_TAG.is_match(line.trim())
}

/// True if the whole line is a single closing HTML tag
pub fn is_closing_tag(line: &str) -> bool {
    CLOSING_TAG.is_match(line.trim())
}

/// Index of the first line after a leading metadata block
///
/// Returns 0 when the first line is not `---` or the block is never closed.
pub fn front_matter_end(lines: &[&str]) -> usize {
    match lines.first() {
        Some(first) if is_separator(first) => lines
            .iter()
            .skip(1)
            .position(|line| is_separator(line))
            .map_or(0, |offset| offset + 2),
        _ => 0,
    }
}

/// Remove a leading metadata block from the text
pub fn strip_front_matter(text: &str) -> &str {
    match FRONT_MATTER.find(text) {
        Some(m) => &text[m.end()..],
        None => text,
    }
}

/// Lines captured directly below a heading
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadingLines {
    /// Captured non-blank lines, verbatim
    pub lines: Vec<String>,
    /// Index where capture stopped (the stop line, or the range end)
    pub next: usize,
}

/// Collect non-blank lines from `[start, end)` until `stop` matches
///
/// Blank lines are skipped. This is the shared routine behind the cover's
/// trailing title lines and the section divider's leading content; the two
/// differ only in their stop predicate.
pub fn capture_leading<F>(lines: &[&str], start: usize, end: usize, stop: F) -> LeadingLines
where
    F: Fn(&str) -> bool,
{
    let end = end.min(lines.len());
    let mut captured = LeadingLines {
        lines: Vec::new(),
        next: end,
    };

    for (idx, line) in lines.iter().enumerate().take(end).skip(start) {
        if is_blank(line) {
            continue;
        }
        if stop(line) {
            captured.next = idx;
            break;
        }
        captured.lines.push((*line).to_string());
    }

    captured
}

/// Stop predicate for the cover: separator or any heading
pub fn ends_cover_area(line: &str) -> bool {
    is_separator(line) || heading_level(line).is_some()
}

/// Stop predicate for a divider: separator, heading, directive comment or HTML tag line
pub fn ends_divider_area(line: &str) -> bool {
    ends_cover_area(line)
        || is_directive_comment(line)
        || is_opening_tag(line)
        || is_closing_tag(line)
}
