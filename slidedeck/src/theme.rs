//! Marp theme generation
//!
//! Renders the stylesheet matching the markup produced by the preprocessor:
//! header/footer zones, cover, section divider and end slides, and the
//! multi-column layout classes. Colours come from the active palette.

use crate::preprocessor::expand;
use crate::style_config::{ColorPalette, ConfigError, PaginationConfig, StyleConfig};
use itertools::Itertools;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Layout classes usable through `<!-- _class: ... -->`
const LAYOUT_CSS: &str = r#"/* Layouts */
section.cols-2 .columns,
section.cols-3 .columns {
  display: grid;
  gap: 32px;
  align-items: start;
}

section.cols-2 .columns {
  grid-template-columns: 1fr 1fr;
}

section.cols-3 .columns {
  grid-template-columns: 1fr 1fr 1fr;
}

section.img-left,
section.img-right {
  display: grid;
  grid-template-columns: 1fr 1fr;
  gap: 32px;
  align-items: center;
}

section.img-right > img {
  order: 2;
}

section.hero {
  justify-content: center;
  text-align: center;
}

section.hero h1,
section.hero h2 {
  font-size: 56px;
  color: var(--color-primary);
}

section.bg-dark {
  background: var(--color-secondary);
  color: #FFFFFF;
}

section.image-full img {
  width: 100%;
  height: 100%;
  object-fit: cover;
}
"#;

/// Errors that can occur while writing the theme
#[derive(Error, Debug)]
pub enum ThemeError {
    /// Configuration could not be rendered
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The stylesheet could not be written
    #[error("Failed to write theme to {path}", path = .path.display())]
    Io {
        /// Target directory or file
        path: PathBuf,
        /// Underlying error
        #[source]
        source: io::Error,
    },
}

/// Append a CSS rule, skipping declarations whose value is empty
fn write_rule(css: &mut String, selector: &str, declarations: &[(&str, String)]) {
    css.push_str(selector);
    css.push_str(" {\n");
    for (property, value) in declarations {
        if !value.is_empty() {
            css.push_str(&format!("  {}: {};\n", property, value));
        }
    }
    css.push_str("}\n\n");
}

/// Resolve `{{primary}}`-style references inside a configured CSS value
fn style_value(value: Option<&str>, config: &StyleConfig, palette: &ColorPalette) -> String {
    value
        .map(|v| expand(v, config, palette).trim().to_string())
        .unwrap_or_default()
}

fn write_custom_properties(css: &mut String, config: &StyleConfig, palette: &ColorPalette) {
    let mut declarations: Vec<(String, String)> = palette
        .colors()
        .iter()
        .map(|(key, value)| (format!("--color-{}", key), value.to_string()))
        .collect();

    declarations.extend(
        palette
            .gradients
            .iter()
            .map(|g| (format!("--gradient-{}", g.name), g.to_css())),
    );

    let header = &config.header;
    let footer = &config.footer;
    let margin = &config.margin;
    declarations.extend([
        ("--header-height".to_string(), header.height.clone()),
        (
            "--header-background".to_string(),
            style_value(Some(header.background.as_str()), config, palette),
        ),
        (
            "--header-color".to_string(),
            style_value(Some(header.color.as_str()), config, palette),
        ),
        ("--footer-height".to_string(), footer.height.clone()),
        (
            "--footer-background".to_string(),
            style_value(Some(footer.background.as_str()), config, palette),
        ),
        (
            "--footer-color".to_string(),
            style_value(Some(footer.color.as_str()), config, palette),
        ),
        ("--margin-top".to_string(), margin.top.clone()),
        ("--margin-bottom".to_string(), margin.bottom.clone()),
        ("--margin-left".to_string(), margin.left.clone()),
        ("--margin-right".to_string(), margin.right.clone()),
    ]);

    let declarations: Vec<(&str, String)> = declarations
        .iter()
        .map(|(property, value)| (property.as_str(), value.clone()))
        .chain([
            (
                "padding",
                "calc(var(--header-height) + var(--margin-top)) var(--margin-right) calc(var(--footer-height) + var(--margin-bottom)) var(--margin-left)"
                    .to_string(),
            ),
            ("background", "var(--color-background)".to_string()),
            ("color", "var(--color-text)".to_string()),
        ])
        .collect();

    write_rule(css, "section", &declarations);
}

fn write_header_footer(css: &mut String, config: &StyleConfig) {
    for (bar, prefix) in [("header", 'h'), ("footer", 'f')] {
        let anchor = if bar == "header" { "top" } else { "bottom" };
        write_rule(
            css,
            &format!("section > {}", bar),
            &[
                ("position", "absolute".to_string()),
                (anchor, "0".to_string()),
                ("left", "0".to_string()),
                ("right", "0".to_string()),
                ("height", format!("var(--{}-height)", bar)),
                ("padding", "0 var(--margin-left)".to_string()),
                ("display", "grid".to_string()),
                ("grid-template-columns", "1fr auto 1fr".to_string()),
                ("align-items", "center".to_string()),
                ("background", format!("var(--{}-background)", bar)),
                ("color", format!("var(--{}-color)", bar)),
                ("font-size", "14px".to_string()),
            ],
        );
        write_rule(
            css,
            &format!("section > {bar} .{prefix}c"),
            &[("text-align", "center".to_string())],
        );
        write_rule(
            css,
            &format!("section > {bar} .{prefix}r"),
            &[("text-align", "right".to_string())],
        );
    }

    if let Some(logo) = &config.logo {
        write_rule(
            css,
            "section > header img,\nsection > footer img",
            &[
                ("width", logo.width.clone()),
                ("max-height", "80%".to_string()),
                ("vertical-align", "middle".to_string()),
            ],
        );
    }

    if config.pagination.enabled {
        write_pagination(css, &config.pagination);
    }
}

/// Slide classes that carry a special slide kind
fn special_slide_classes(kind: &str) -> Vec<String> {
    match kind {
        "cover" => vec!["cover".to_string(), "cover-image-right".to_string()],
        "section_divider" | "section-divider" => vec!["section-divider".to_string()],
        other => vec![other.to_string()],
    }
}

fn write_pagination(css: &mut String, pagination: &PaginationConfig) {
    let (left, right, align) = match pagination.position.rsplit('-').next() {
        Some("left") => ("var(--margin-left)", "auto", "left"),
        Some("center") => ("0", "0", "center"),
        _ => ("auto", "var(--margin-right)", "right"),
    };

    write_rule(
        css,
        "section::after",
        &[
            ("left", left.to_string()),
            ("right", right.to_string()),
            ("text-align", align.to_string()),
            ("color", "var(--footer-color)".to_string()),
            ("font-size", "14px".to_string()),
        ],
    );

    let hidden = pagination
        .hide_on
        .iter()
        .flat_map(|kind| special_slide_classes(kind.trim()))
        .filter(|class| !class.is_empty())
        .map(|class| format!("section.{}::after", class))
        .join(",\n");
    if !hidden.is_empty() {
        write_rule(css, &hidden, &[("display", "none".to_string())]);
    }
}

fn write_cover(css: &mut String, config: &StyleConfig, palette: &ColorPalette) {
    let cover = &config.special_slides.cover;

    write_rule(
        css,
        "section.cover,\nsection.cover-image-right",
        &[
            ("background", style_value(Some(cover.background.as_str()), config, palette)),
            ("justify-content", "center".to_string()),
            ("text-align", style_value(cover.title_align.as_deref(), config, palette)),
        ],
    );
    write_rule(
        css,
        "section.cover h1,\nsection.cover-image-right h1",
        &[
            ("font-size", "52px".to_string()),
            ("color", style_value(cover.title_color.as_deref(), config, palette)),
            ("margin", "0 0 16px".to_string()),
        ],
    );
    write_rule(
        css,
        "section.cover h2,\nsection.cover-image-right h2",
        &[
            ("font-size", "28px".to_string()),
            ("color", "var(--color-muted)".to_string()),
            ("font-weight", "normal".to_string()),
        ],
    );

    if cover.show_accent_line {
        let accent = style_value(cover.accent_line_color.as_deref(), config, palette);
        let accent = if accent.is_empty() {
            "var(--color-accent)".to_string()
        } else {
            accent
        };
        write_rule(
            css,
            ".cover-accent",
            &[
                ("width", "120px".to_string()),
                ("height", "6px".to_string()),
                ("margin-bottom", "24px".to_string()),
                ("background", accent),
            ],
        );
    }

    write_rule(
        css,
        ".cover-logo",
        &[
            ("position", "absolute".to_string()),
            ("right", "var(--margin-right)".to_string()),
            ("bottom", "var(--margin-bottom)".to_string()),
        ],
    );
    write_rule(
        css,
        "section.cover-image-right",
        &[
            ("display", "grid".to_string()),
            ("grid-template-columns", "1fr 1fr".to_string()),
            ("padding-right", "0".to_string()),
        ],
    );
    write_rule(
        css,
        ".cover-image-container",
        &[("height", "100%".to_string()), ("overflow", "hidden".to_string())],
    );
    write_rule(
        css,
        ".cover-image",
        &[
            ("width", "100%".to_string()),
            ("height", "100%".to_string()),
            ("object-fit", "cover".to_string()),
        ],
    );
}

fn write_section_divider(css: &mut String, config: &StyleConfig, palette: &ColorPalette) {
    let divider = &config.special_slides.section_divider;

    let title_color = style_value(divider.title_color.as_deref(), config, palette);
    let title_color = if title_color.is_empty() {
        "var(--color-primary)".to_string()
    } else {
        title_color
    };

    write_rule(
        css,
        "section.section-divider",
        &[
            ("background", style_value(Some(divider.background.as_str()), config, palette)),
            ("justify-content", "center".to_string()),
        ],
    );
    write_rule(
        css,
        "section.section-divider h1",
        &[
            ("font-size", "48px".to_string()),
            ("color", title_color),
            (
                "border-bottom",
                if divider.separator_line {
                    "3px solid var(--color-accent)".to_string()
                } else {
                    String::new()
                },
            ),
            ("padding-bottom", "12px".to_string()),
        ],
    );
    write_rule(
        css,
        ".section-num",
        &[
            ("position", "absolute".to_string()),
            ("right", "var(--margin-right)".to_string()),
            ("bottom", "var(--margin-bottom)".to_string()),
            ("font-size", "160px".to_string()),
            ("font-weight", "bold".to_string()),
            ("line-height", "1".to_string()),
            ("color", style_value(divider.number_color.as_deref(), config, palette)),
        ],
    );
}

fn write_end(css: &mut String, config: &StyleConfig, palette: &ColorPalette) {
    let end = &config.special_slides.end;

    write_rule(
        css,
        "section.end",
        &[
            ("background", style_value(Some(end.background.as_str()), config, palette)),
            ("justify-content", "center".to_string()),
            ("align-items", "center".to_string()),
            ("text-align", "center".to_string()),
        ],
    );
    write_rule(
        css,
        "section.end p",
        &[
            ("color", "var(--color-muted)".to_string()),
            ("font-size", "24px".to_string()),
        ],
    );
}

/// Generate the Marp theme stylesheet for `config`
///
/// # Returns
/// * `Ok(String)` - CSS declaring `@theme {slide.theme}`
/// * `Err(ConfigError)` - The active palette does not exist
pub fn generate_theme_css(config: &StyleConfig) -> Result<String, ConfigError> {
    let palette = config.active_palette()?;

    let mut css = String::new();
    css.push_str(&format!("/* @theme {} */\n\n", config.slide.theme));
    css.push_str("@import 'default';\n\n");

    write_custom_properties(&mut css, config, palette);
    write_header_footer(&mut css, config);
    write_cover(&mut css, config, palette);
    write_section_divider(&mut css, config, palette);
    write_end(&mut css, config, palette);
    css.push_str(LAYOUT_CSS);

    Ok(css)
}

/// Write the theme stylesheet to a temporary file inside `dir`
///
/// The file is removed when the returned handle is dropped.
pub fn write_theme_css(config: &StyleConfig, dir: &Path) -> Result<NamedTempFile, ThemeError> {
    let css = generate_theme_css(config)?;
    let io_error = |source| ThemeError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut file = tempfile::Builder::new()
        .prefix("slidedeck-theme-")
        .suffix(".css")
        .tempfile_in(dir)
        .map_err(io_error)?;
    file.write_all(css.as_bytes()).map_err(io_error)?;
    file.flush().map_err(io_error)?;

    log::debug!("Wrote theme to {}", file.path().display());
    Ok(file)
}
