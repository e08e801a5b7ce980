//! Markdown to Marp preprocessing
//!
//! The preprocessor works on lines of text only. It recognizes a small fixed
//! vocabulary (headings, `---` separators, directive comments and standalone
//! HTML tags) and never builds a Markdown AST.

// Submodules
mod assembler;
mod directives;
mod lines;
mod section_detector;
mod segmenter;

// Re-export public types
pub use assembler::{preprocess, PreprocessOptions, PreprocessResult};
pub use directives::{build_footer_directive, build_header_directive, expand};
pub use lines::{split_lines, strip_front_matter};
pub use section_detector::{detect_cover, detect_sections, CoverInfo, Section, Subtitle};
pub use segmenter::{segment, segment_section, SectionSlides, SlideBlock};
