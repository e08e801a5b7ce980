//! Slide segmentation
//!
//! Splits a run of document lines into slide blocks. Split points are explicit
//! `---` separators and sub-headings one level below the section depth. A
//! layout annotation (`<!-- _class: cols-2 -->` and friends) locks the current
//! slide so its sub-headings stay together as layout zones.

use super::lines::{
    capture_leading, ends_divider_area, heading_text, is_blank, is_closing_tag,
    is_layout_annotation, is_opening_tag, is_separator,
};
use std::mem;
use std::ops::Range;

/// Segmenter state carried from line to line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SegmenterState {
    /// Sub-headings start a new slide
    Normal,
    /// Inside a layout slide; sub-headings are ordinary content
    LayoutLocked,
}

/// One slide worth of lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SlideBlock {
    /// Lines in output order
    pub lines: Vec<String>,
}

impl SlideBlock {
    /// True if at least one line is non-blank
    pub fn has_content(&self) -> bool {
        self.lines.iter().any(|line| !is_blank(line))
    }

    /// Lines joined with `\n`
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

impl From<Vec<String>> for SlideBlock {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}

/// Result of segmenting one section body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSlides {
    /// Lines placed on the section divider below the title
    pub leading: Vec<String>,
    /// Content slides following the divider
    pub slides: Vec<SlideBlock>,
}

/// Line-at-a-time slide splitter
struct Segmenter {
    state: SegmenterState,
    sub_heading_level: usize,
    current: SlideBlock,
    slides: Vec<SlideBlock>,
}

impl Segmenter {
    fn new(heading_depth: usize) -> Self {
        Self {
            state: SegmenterState::Normal,
            sub_heading_level: heading_depth + 1,
            current: SlideBlock::default(),
            slides: Vec::new(),
        }
    }

    fn process_line(&mut self, line: &str) {
        if is_separator(line) {
            self.flush();
            self.state = SegmenterState::Normal;
            return;
        }

        // Markdown inside an HTML block needs a blank line after the opening tag
        if is_opening_tag(line) {
            self.push(line);
            self.push("");
            return;
        }

        if is_closing_tag(line) {
            let after_content = self.current.lines.last().is_some_and(|last| !is_blank(last));
            if after_content {
                self.push("");
            }
            self.push(line);
            return;
        }

        if is_layout_annotation(line) {
            self.state = SegmenterState::LayoutLocked;
        } else if self.state == SegmenterState::Normal
            && heading_text(line, self.sub_heading_level).is_some()
        {
            self.flush();
        }

        self.push(line);
    }

    fn push(&mut self, line: &str) {
        self.current.lines.push(line.to_string());
    }

    /// Close the current block, dropping it if it holds only blank lines
    fn flush(&mut self) {
        let block = mem::take(&mut self.current);
        if block.has_content() {
            self.slides.push(block);
        }
    }

    fn finish(mut self) -> Vec<SlideBlock> {
        self.flush();
        self.slides
    }
}

/// Segment `lines[range]` into slide blocks
fn segment_range(lines: &[&str], range: Range<usize>, heading_depth: usize) -> Vec<SlideBlock> {
    let mut segmenter = Segmenter::new(heading_depth);
    for line in &lines[range] {
        segmenter.process_line(line);
    }
    segmenter.finish()
}

/// Segment a run of lines into slide blocks
///
/// # Parameters
/// * `lines` - Lines to split
/// * `heading_depth` - Section heading depth; sub-headings are one level deeper
///
/// # Returns
/// * Non-empty slide blocks in document order
pub fn segment(lines: &[&str], heading_depth: usize) -> Vec<SlideBlock> {
    segment_range(lines, 0..lines.len(), heading_depth)
}

/// Segment the body of one section
///
/// `range` is the section body (the lines after its heading). Leading lines
/// up to the first structural boundary are returned separately for the
/// divider slide; the rest is segmented. A body without any boundary has no
/// leading lines and becomes ordinary content.
pub fn segment_section(lines: &[&str], range: Range<usize>, heading_depth: usize) -> SectionSlides {
    let end = range.end.min(lines.len());
    let start = range.start.min(end);
    let leading = capture_leading(lines, start, end, ends_divider_area);

    if leading.next >= end {
        return SectionSlides {
            leading: Vec::new(),
            slides: segment_range(lines, start..end, heading_depth),
        };
    }

    SectionSlides {
        leading: leading.lines,
        slides: segment_range(lines, leading.next..end, heading_depth),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessor::lines::split_lines;

    fn texts(slides: &[SlideBlock]) -> Vec<String> {
        slides.iter().map(SlideBlock::to_text).collect()
    }

    #[test]
    fn test_sub_headings_split_slides() {
        let md = "### A\nalpha\n### B\nbeta";
        let slides = segment(&split_lines(md), 2);
        assert_eq!(texts(&slides), vec!["### A\nalpha", "### B\nbeta"]);
    }

    #[test]
    fn test_layout_annotation_locks_slide() {
        // Arrange
        let locked = "<!-- _class: cols-2 -->\n### Left\nleft text\n### Right\nright text";
        let unlocked = "### Left\nleft text\n### Right\nright text";

        // Act
        let locked_slides = segment(&split_lines(locked), 2);
        let unlocked_slides = segment(&split_lines(unlocked), 2);

        // Assert
        assert_eq!(locked_slides.len(), 1);
        assert_eq!(locked_slides[0].lines.len(), 5);
        assert_eq!(unlocked_slides.len(), 2);
    }

    #[test]
    fn test_separator_resets_layout_lock() {
        let md = "<!-- _class: hero -->\n### A\n### B\n---\n### C\n### D";
        let slides = segment(&split_lines(md), 2);
        assert_eq!(
            texts(&slides),
            vec!["<!-- _class: hero -->\n### A\n### B", "### C", "### D"]
        );
    }

    #[test]
    fn test_non_layout_class_does_not_lock() {
        let md = "<!-- _class: lead -->\n### A\n### B";
        let slides = segment(&split_lines(md), 2);
        assert_eq!(texts(&slides), vec!["<!-- _class: lead -->", "### A", "### B"]);
    }

    #[test]
    fn test_blank_blocks_are_dropped() {
        let md = "\n---\n\n---\ncontent\n---\n   \n";
        let slides = segment(&split_lines(md), 2);
        assert_eq!(texts(&slides), vec!["content"]);
    }

    #[test]
    fn test_html_tag_spacing() {
        let md = "<div class=\"col\">\nText\n</div>";
        let slides = segment(&split_lines(md), 2);
        assert_eq!(texts(&slides), vec!["<div class=\"col\">\n\nText\n\n</div>"]);

        // No extra blank when the closing tag already follows one
        let md = "<div>\n</div>";
        let slides = segment(&split_lines(md), 2);
        assert_eq!(texts(&slides), vec!["<div>\n\n</div>"]);
    }

    #[test]
    fn test_deeper_headings_do_not_split() {
        let md = "### A\n#### detail\ntext";
        let slides = segment(&split_lines(md), 2);
        assert_eq!(slides.len(), 1);
    }

    #[test]
    fn test_segment_section_captures_leading() {
        // Arrange
        let md = "## Overview\n\nAugust 6\nPresenter\n\n### First\nbody";
        let lines = split_lines(md);

        // Act
        let section = segment_section(&lines, 1..lines.len(), 2);

        // Assert
        assert_eq!(section.leading, vec!["August 6", "Presenter"]);
        assert_eq!(texts(&section.slides), vec!["### First\nbody"]);
    }

    #[test]
    fn test_segment_section_leading_stops_at_directive() {
        let md = "## Layout\n<!-- _class: cols-2 -->\n### L\n### R";
        let lines = split_lines(md);
        let section = segment_section(&lines, 1..lines.len(), 2);

        assert!(section.leading.is_empty());
        assert_eq!(section.slides.len(), 1);
    }

    #[test]
    fn test_segment_section_without_boundary_is_content() {
        let md = "## Section 1\nContent 1\nmore";
        let lines = split_lines(md);
        let section = segment_section(&lines, 1..lines.len(), 2);

        assert!(section.leading.is_empty());
        assert_eq!(texts(&section.slides), vec!["Content 1\nmore"]);
    }

    #[test]
    fn test_segment_section_empty_body() {
        let lines = split_lines("## Only heading\n\n");
        let section = segment_section(&lines, 1..lines.len(), 2);
        assert_eq!(section, SectionSlides::default());
    }
}
