use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use slidedeck::preprocessor::strip_front_matter;
use slidedeck::{preprocess, PreprocessOptions, StyleConfig};

const CONFIG: &str = r##"
[colors]
active = "test"

[colors.palettes.test]
primary = "#00A78E"
secondary = "#005A57"
accent = "#E87722"

[footer]
company_name = "TestCorp"

[special_slides.end]
show_logo = false
show_tagline = false
"##;

fn config() -> StyleConfig {
    StyleConfig::from_toml_str(CONFIG).unwrap()
}

/// Slide blocks of an assembled deck, without the metadata header
fn slides(markdown: &str) -> Vec<String> {
    strip_front_matter(markdown)
        .split("\n\n---\n\n")
        .map(str::to_string)
        .collect()
}

fn is_divider(slide: &str) -> bool {
    slide.starts_with("<!-- _class: section-divider -->")
}

/// Paragraph texts as seen by a CommonMark parser
fn paragraphs(markdown: &str) -> Vec<String> {
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Paragraph) => current = Some(String::new()),
            Event::Text(text) => {
                if let Some(paragraph) = current.as_mut() {
                    paragraph.push_str(&text);
                }
            }
            Event::End(TagEnd::Paragraph) => paragraphs.extend(current.take()),
            _ => {}
        }
    }

    paragraphs
}

#[test]
fn test_cover_divider_content_end() {
    // Arrange
    let md = "# Title\n## Section 1\nContent";

    // Act
    let result = preprocess(md, &config(), PreprocessOptions::default()).unwrap();
    let slides = slides(&result.markdown);

    // Assert
    assert_eq!(slides.len(), 4);
    assert!(slides[0].starts_with("<!-- _class: cover -->"));
    assert!(slides[0].contains("# Title"));
    assert!(is_divider(&slides[1]));
    assert!(slides[1].contains("# Section 1"));
    assert_eq!(slides[2], "Content");
    assert!(slides[3].starts_with("<!-- _class: end -->"));
}

#[test]
fn test_two_sections_with_content() {
    let md = "## Alpha\nText A\n\n## Beta\nText B\n";
    let result = preprocess(md, &config(), PreprocessOptions::default()).unwrap();
    let slides = slides(&result.markdown);

    assert_eq!(result.sections.len(), 2);
    assert!(result.cover.is_none());

    let dividers = slides.iter().filter(|s| is_divider(s)).count();
    assert_eq!(dividers, 2);
    assert!(slides[1].contains("Text A"));
    assert!(slides[3].contains("Text B"));
    assert!(slides[2].contains("<span class=\"section-num\">02</span>"));
}

#[test]
fn test_disabled_cover_keeps_title_as_content() {
    // Arrange
    let md = "# Title\n## Section 1\nContent";
    let options = PreprocessOptions {
        auto_cover: Some(false),
        ..Default::default()
    };

    // Act
    let result = preprocess(md, &config(), options).unwrap();
    let slides = slides(&result.markdown);

    // Assert
    assert!(!result.markdown.contains("<!-- _class: cover -->"));
    assert!(result.cover.is_none());
    assert_eq!(slides[0], "# Title");
    assert!(is_divider(&slides[1]));
    assert_eq!(result.sections.len(), 1);
    assert_eq!(result.sections[0].heading_line, 1);
}

#[test]
fn test_opening_tag_gets_blank_line() {
    // Arrange
    let md = "## Section\n### Slide\n<div class=\"box\">\nText inside\n</div>";

    // Act
    let result = preprocess(md, &config(), PreprocessOptions::default()).unwrap();
    let slide = slides(&result.markdown)
        .into_iter()
        .find(|s| s.starts_with("### Slide"))
        .unwrap();

    // Assert
    assert!(slide.contains("<div class=\"box\">\n\nText inside\n\n</div>"));
    // Without the blank line the text would be swallowed by the HTML block
    assert_eq!(paragraphs(&slide), vec!["Text inside"]);
    assert!(paragraphs("<div class=\"box\">\nText inside\n</div>").is_empty());
}

/// Blocks are joined by one separator each, plus the two metadata delimiters
fn assert_separators_match_blocks(markdown: &str) {
    let block_count = slides(markdown).len();
    let separators = markdown.lines().filter(|l| *l == "---").count();

    assert_eq!(separators, block_count - 1 + 2, "in:\n{}", markdown);
}

#[test]
fn test_separator_count_matches_slides() {
    let md = "# Deck\n\n## One\nintro\n\n### A\na\n---\nb\n\n## Two\n### B\nc\n";
    let result = preprocess(md, &config(), PreprocessOptions::default()).unwrap();

    assert_separators_match_blocks(&result.markdown);
}

#[test]
fn test_separator_count_on_cover_only_deck() {
    // Arrange
    let md = "# Title\nDate\n\n---\n\n### Slide one\nBody\n---\n";
    let options = PreprocessOptions {
        auto_section: Some(false),
        ..Default::default()
    };

    // Act
    let result = preprocess(md, &config(), options).unwrap();

    // Assert
    assert_separators_match_blocks(&result.markdown);
    assert_eq!(slides(&result.markdown).len(), 3);
}

#[test]
fn test_separator_count_without_structure() {
    let md = "\n---\nraw text\n\n---\n\n";
    let options = PreprocessOptions {
        auto_section: Some(false),
        auto_cover: Some(false),
        ..Default::default()
    };

    let result = preprocess(md, &config(), options).unwrap();
    let slides = slides(&result.markdown);

    assert_separators_match_blocks(&result.markdown);
    assert_eq!(slides[0], "raw text");
    assert!(slides[1].starts_with("<!-- _class: end -->"));
}

#[test]
fn test_level1_sections_exclude_cover_title() {
    // Arrange
    let mut config = config();
    config.auto_structure.section_heading_level = 1;
    let md = "# Deck\n# First\nalpha\n# Second\nbeta";

    // Act
    let result = preprocess(md, &config, PreprocessOptions::default()).unwrap();
    let slides = slides(&result.markdown);

    // Assert
    let indices: Vec<_> = result.sections.iter().map(|s| (s.index, s.title.as_str())).collect();
    assert_eq!(indices, vec![(1, "First"), (2, "Second")]);
    assert!(slides[0].starts_with("<!-- _class: cover -->"));
    assert!(is_divider(&slides[1]));
    assert!(slides[1].ends_with("<span class=\"section-num\">01</span>"));
    assert_eq!(slides[2], "alpha");
    assert!(slides[3].ends_with("<span class=\"section-num\">02</span>"));
    assert_separators_match_blocks(&result.markdown);
}

#[test]
fn test_layout_slide_keeps_sub_headings_together() {
    let md = "## Compare\n<!-- _class: cols-2 -->\n### Left\nleft\n### Right\nright\n---\n### After\nx";
    let result = preprocess(md, &config(), PreprocessOptions::default()).unwrap();
    let slides = slides(&result.markdown);

    let layout = slides
        .iter()
        .find(|s| s.starts_with("<!-- _class: cols-2 -->"))
        .unwrap();
    assert!(layout.contains("### Left"));
    assert!(layout.contains("### Right"));
    assert!(slides.iter().any(|s| s == "### After\nx"));
    // The annotation never lands on the divider
    assert!(!slides[0].contains("cols-2"));
}

#[test]
fn test_manual_class_heading_is_not_a_section() {
    let md = "## Auto\ntext\n\n<!-- _class: lead -->\n## Manual\nmanual text";
    let result = preprocess(md, &config(), PreprocessOptions::default()).unwrap();

    assert_eq!(result.sections.len(), 1);
    assert!(result
        .markdown
        .contains("<!-- _class: lead -->\n## Manual\nmanual text"));
}

#[test]
fn test_image_right_cover_with_logo() {
    // Arrange
    let toml_content = format!(
        "{}\n[logo]\npath = \"assets/logo.png\"\nwidth = \"120px\"\n\n[special_slides.cover]\nlayout = \"image-right\"\nimage = \"assets/wave.png\"\n",
        CONFIG
    );
    let config = StyleConfig::from_toml_str(&toml_content)
        .unwrap()
        .with_base_dir(std::path::Path::new("/decks"));

    let options = PreprocessOptions {
        auto_section: Some(false),
        ..Default::default()
    };

    // Act
    let result = preprocess("# Title\n## Subtitle", &config, options).unwrap();

    // Assert
    let cover = &slides(&result.markdown)[0];
    assert!(cover.starts_with("<!-- _class: cover-image-right -->"));
    assert!(cover.contains("<div class=\"cover-content\">\n\n<div class=\"cover-accent\"></div>"));
    assert!(cover.contains("# Title\n## Subtitle"));
    assert!(cover.contains(
        "<img src=\"/decks/assets/logo.png\" alt=\"logo\" class=\"cover-logo\" style=\"width: 120px;\">\n\n</div>"
    ));
    assert!(cover.ends_with(
        "<div class=\"cover-image-container\"><img src=\"/decks/assets/wave.png\" class=\"cover-image\" /></div>"
    ));
}

#[test]
fn test_footer_directive_in_front_matter() {
    let result = preprocess("# Title", &config(), PreprocessOptions::default()).unwrap();

    assert!(result.markdown.contains(
        "footer: '<span class=\"fl\"></span><span class=\"fc\"></span><span class=\"fr\">TestCorp\u{3000}</span>'"
    ));
}

#[test]
fn test_preprocess_is_idempotent_per_call() {
    let md = "# Title\n## A\nx\n## B\ny";
    let config = config();

    let first = preprocess(md, &config, PreprocessOptions::default()).unwrap();
    let second = preprocess(md, &config, PreprocessOptions::default()).unwrap();

    assert_eq!(first, second);
}
