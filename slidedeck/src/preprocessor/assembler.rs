//! Document assembly
//!
//! Turns a plain Markdown document into a Marp deck: a generated metadata
//! header, an optional cover, one divider per section followed by its content
//! slides, and an optional closing slide.

use super::directives::{build_footer_directive, build_header_directive};
use super::lines::{
    capture_leading, ends_cover_area, heading_prefix, is_blank, is_separator, split_lines,
    strip_front_matter, SEPARATOR,
};
use super::section_detector::{detect_cover, detect_sections, CoverInfo, Section};
use super::segmenter::{segment, segment_section, SlideBlock};
use crate::style_config::{ConfigError, CoverLayout, StyleConfig};

/// Text placed between two slides
const SLIDE_JOINER: &str = "\n\n---\n\n";

/// Per-call overrides of the `[auto_structure]` toggles
///
/// `None` keeps the configured value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PreprocessOptions {
    /// Detect sections and emit dividers
    pub auto_section: Option<bool>,
    /// Build a cover slide from the leading `#` heading
    pub auto_cover: Option<bool>,
    /// Append a closing slide
    pub auto_end: Option<bool>,
}

/// Output of [`preprocess`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreprocessResult {
    /// Assembled Marp Markdown
    pub markdown: String,
    /// Sections that received a divider, numbered from 1
    pub sections: Vec<Section>,
    /// Cover used for the title slide
    pub cover: Option<CoverInfo>,
}

/// Effective toggles after applying options over the configuration
#[derive(Debug, Clone, Copy)]
struct Toggles {
    section: bool,
    cover: bool,
    end: bool,
}

impl Toggles {
    fn resolve(config: &StyleConfig, options: PreprocessOptions) -> Self {
        let auto = config.auto_structure;
        Self {
            section: options.auto_section.unwrap_or(auto.enabled),
            cover: options.auto_cover.unwrap_or(auto.auto_cover),
            end: options.auto_end.unwrap_or(auto.auto_end),
        }
    }
}

/// Convert a Markdown document into a structured Marp deck
///
/// Any metadata block already present in `markdown` is replaced by the
/// generated one. CRLF line endings are read as LF.
///
/// # Parameters
/// * `markdown` - Source document
/// * `config` - Validated style configuration
/// * `options` - Overrides for the automatic structuring toggles
///
/// # Returns
/// * `Ok(PreprocessResult)` - Assembled deck with the detected structure
/// * `Err(ConfigError)` - The active palette does not exist
pub fn preprocess(
    markdown: &str,
    config: &StyleConfig,
    options: PreprocessOptions,
) -> Result<PreprocessResult, ConfigError> {
    let palette = config.active_palette()?;
    let toggles = Toggles::resolve(config, options);
    let depth = config.auto_structure.section_heading_level;

    let normalized = markdown.replace("\r\n", "\n");
    let body = strip_front_matter(&normalized);
    let lines = split_lines(body);

    let mut cover = if toggles.cover {
        detect_cover(&lines)
    } else {
        None
    };
    let mut sections = if toggles.section {
        detect_sections(&lines, depth)
    } else {
        Vec::new()
    };
    reconcile(&mut cover, &mut sections);

    log::debug!(
        "Detected cover: {:?}, sections: {}",
        cover.as_ref().map(|c| c.title.as_str()),
        sections.len()
    );

    let mut slides: Vec<String> = Vec::new();

    // First line after the cover's title block and trailing lines
    let mut body_start = 0;
    if let Some(info) = &cover {
        let trailing = capture_leading(&lines, info.last_line() + 1, lines.len(), ends_cover_area);
        slides.push(build_cover_slide(info, &trailing.lines, config));
        body_start = trailing.next;
    }

    if let Some(first) = sections.first() {
        let preamble_end = first.heading_line.max(body_start);
        push_blocks(&mut slides, segment(&lines[body_start..preamble_end], depth));

        for (idx, section) in sections.iter().enumerate() {
            let end = sections
                .get(idx + 1)
                .map_or(lines.len(), |next| next.heading_line);
            let content = segment_section(&lines, section.heading_line + 1..end, depth);

            slides.push(build_divider_slide(section, &content.leading, config));
            push_blocks(&mut slides, content.slides);
        }
    } else if toggles.cover {
        slides.extend(trimmed_block(&lines[body_start..]));
    } else {
        slides.extend(trimmed_block(&lines));
    }

    if toggles.end {
        slides.push(build_end_slide(config));
    }

    log::debug!("Assembled {} slides", slides.len());

    let header = build_front_matter(
        config,
        &build_header_directive(config, palette),
        &build_footer_directive(config, palette),
    );

    Ok(PreprocessResult {
        markdown: format!("{}{}", header, slides.join(SLIDE_JOINER)),
        sections,
        cover,
    })
}

/// Resolve overlaps between the cover and the detected sections
///
/// A subtitle that is also a section heading belongs to the section. Headings
/// used by the cover are not sections. Survivors are renumbered from 1.
fn reconcile(cover: &mut Option<CoverInfo>, sections: &mut Vec<Section>) {
    if let Some(info) = cover.as_mut() {
        let subtitle_is_section = info
            .subtitle
            .as_ref()
            .is_some_and(|sub| sections.iter().any(|s| s.heading_line == sub.line));
        if subtitle_is_section {
            info.subtitle = None;
        }

        sections.retain(|section| !info.occupies(section.heading_line));
    }

    for (idx, section) in sections.iter_mut().enumerate() {
        section.index = idx + 1;
    }
}

/// Join `lines` into one block without edge blank or separator lines
///
/// A separator at either edge would meet the slide joiner and produce an
/// empty slide.
fn trimmed_block(lines: &[&str]) -> Option<String> {
    let is_edge = |line: &&str| is_blank(line) || is_separator(line);
    let start = lines.iter().position(|l| !is_edge(l))?;
    let end = lines.iter().rposition(|l| !is_edge(l))?;
    Some(lines[start..=end].join("\n"))
}

fn push_blocks(slides: &mut Vec<String>, blocks: Vec<SlideBlock>) {
    slides.extend(blocks.iter().map(SlideBlock::to_text));
}

fn logo_img(config: &StyleConfig, class: &str) -> Option<String> {
    config.logo.as_ref().map(|logo| {
        format!(
            "<img src=\"{}\" alt=\"logo\" class=\"{}\" style=\"width: {};\">",
            logo.path, class, logo.width
        )
    })
}

fn build_cover_slide(info: &CoverInfo, trailing: &[String], config: &StyleConfig) -> String {
    let cover = &config.special_slides.cover;
    let image_right = cover.layout == CoverLayout::ImageRight;

    let mut out = vec![
        if image_right {
            "<!-- _class: cover-image-right -->".to_string()
        } else {
            "<!-- _class: cover -->".to_string()
        },
        "<!-- _paginate: false -->".to_string(),
        "<!-- _header: \" \" -->".to_string(),
    ];

    if image_right {
        out.push("<div class=\"cover-content\">".to_string());
        out.push(String::new());
    }

    if cover.show_accent_line {
        out.push("<div class=\"cover-accent\"></div>".to_string());
        out.push(String::new());
    }

    out.push(format!("{}{}", heading_prefix(1), info.title));
    if let Some(subtitle) = &info.subtitle {
        out.push(format!("{}{}", heading_prefix(2), subtitle.text));
    }
    out.extend(trailing.iter().cloned());

    if cover.show_logo {
        if let Some(img) = logo_img(config, "cover-logo") {
            out.push(String::new());
            out.push(img);
        }
    }

    if image_right {
        out.push(String::new());
        out.push("</div>".to_string());

        if let Some(image) = &cover.image {
            out.push(String::new());
            out.push(format!(
                "<div class=\"cover-image-container\"><img src=\"{}\" class=\"cover-image\" /></div>",
                image
            ));
        }
    }

    out.join("\n")
}

fn build_divider_slide(section: &Section, leading: &[String], config: &StyleConfig) -> String {
    let mut out = vec![
        "<!-- _class: section-divider -->".to_string(),
        "<div class=\"section-title-area\">".to_string(),
        String::new(),
        format!("{}{}", heading_prefix(1), section.title),
    ];

    if !leading.is_empty() {
        out.push(String::new());
        out.extend(leading.iter().cloned());
    }

    out.push(String::new());
    out.push("</div>".to_string());

    if config.special_slides.section_divider.show_section_number {
        out.push(format!("<span class=\"section-num\">{:02}</span>", section.index));
    }

    out.join("\n")
}

fn build_end_slide(config: &StyleConfig) -> String {
    let end = &config.special_slides.end;
    let mut out = vec![
        "<!-- _class: end -->".to_string(),
        "<!-- _paginate: false -->".to_string(),
    ];

    if end.show_logo {
        if let Some(img) = logo_img(config, "end-logo") {
            out.push(img);
        }
    }

    if end.show_tagline && !end.tagline.is_empty() {
        out.push(String::new());
        out.push(end.tagline.clone());
    }

    out.join("\n")
}

/// YAML single-quoted scalar
fn single_quoted(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn build_front_matter(config: &StyleConfig, header_html: &str, footer_html: &str) -> String {
    let lines = [
        SEPARATOR.to_string(),
        "marp: true".to_string(),
        format!("theme: {}", config.slide.theme),
        format!("size: {}", config.slide.size.directive()),
        format!("paginate: {}", config.pagination.enabled),
        format!("header: {}", single_quoted(header_html)),
        format!("footer: {}", single_quoted(footer_html)),
        SEPARATOR.to_string(),
        String::new(),
    ];
    lines.join("\n")
}
