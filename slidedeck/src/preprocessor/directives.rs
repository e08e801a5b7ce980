//! Header/footer directive generation
//!
//! Header and footer templates are split into left/center/right zones. Each
//! zone is expanded and wrapped in a `<span>` so the theme can position it.

use crate::style_config::{StyleConfig, StyleResolver};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// `{{name}}` or `{{gradient:name}}`
static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{\s*([\w-]+(?::[\w-]+)?)\s*\}\}").unwrap());

/// Which bar a directive is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bar {
    Header,
    Footer,
}

impl Bar {
    /// Class prefix of the zone spans (`hl`, `hc`, `hr` / `fl`, `fc`, `fr`)
    fn class_prefix(self) -> char {
        match self {
            Bar::Header => 'h',
            Bar::Footer => 'f',
        }
    }
}

/// Expand every placeholder in `template`
///
/// Substituted text is never re-scanned. Unknown names and unresolved colour
/// or gradient references expand to an empty string.
pub fn expand(template: &str, config: &StyleConfig, resolver: &dyn StyleResolver) -> String {
    if !template.contains("{{") {
        return template.to_string();
    }

    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            expand_placeholder(&caps[1], config, resolver)
        })
        .into_owned()
}

/// Value of a single placeholder name
fn expand_placeholder(name: &str, config: &StyleConfig, resolver: &dyn StyleResolver) -> String {
    match name {
        "company_name" => config.footer.company_name.clone(),
        "logo" => config
            .logo
            .as_ref()
            .map(|logo| format!("<img src=\"{}\" width=\"{}\">", logo.path, logo.width))
            .unwrap_or_default(),
        // nav_tabs is reserved; page numbers come from the renderer's own pagination
        "nav_tabs" | "page" | "total" => String::new(),
        token => resolver.resolve(token).unwrap_or_default(),
    }
}

/// Wrap the three expanded zones of a bar
fn build_zones(
    bar: Bar,
    zones: [&str; 3],
    config: &StyleConfig,
    resolver: &dyn StyleResolver,
) -> String {
    let prefix = bar.class_prefix();
    let [left, center, right] = zones.map(|zone| expand(zone, config, resolver));
    format!(
        "<span class=\"{prefix}l\">{left}</span><span class=\"{prefix}c\">{center}</span><span class=\"{prefix}r\">{right}</span>"
    )
}

/// HTML for the `header:` directive
pub fn build_header_directive(config: &StyleConfig, resolver: &dyn StyleResolver) -> String {
    let header = &config.header;
    build_zones(
        Bar::Header,
        [&header.left, &header.center, &header.right],
        config,
        resolver,
    )
}

/// HTML for the `footer:` directive
pub fn build_footer_directive(config: &StyleConfig, resolver: &dyn StyleResolver) -> String {
    let footer = &config.footer;
    build_zones(
        Bar::Footer,
        [&footer.left, &footer.center, &footer.right],
        config,
        resolver,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style_config::LogoConfig;

    fn config() -> StyleConfig {
        StyleConfig::from_toml_str(
            r##"
[colors]
active = "test"

[colors.palettes.test]
primary = "#00A78E"
secondary = "#005A57"
accent = "#E87722"
gradients = [{ name = "header", direction = "to right", stops = ["#00A78E", "#005A57"] }]

[footer]
company_name = "TestCorp"
"##,
        )
        .unwrap()
    }

    #[test]
    fn test_expand_company_and_page() {
        let config = config();
        let palette = config.active_palette().unwrap();

        let expanded = expand("{{company_name}} {{page}}/{{total}}", &config, palette);
        assert_eq!(expanded, "TestCorp /");
    }

    #[test]
    fn test_expand_colors_and_gradients() {
        let config = config();
        let palette = config.active_palette().unwrap();

        assert_eq!(expand("{{primary}}", &config, palette), "#00A78E");
        assert_eq!(
            expand("{{gradient:header}}", &config, palette),
            "linear-gradient(to right, #00A78E, #005A57)"
        );
    }

    #[test]
    fn test_unresolved_placeholders_expand_to_empty() {
        let config = config();
        let palette = config.active_palette().unwrap();

        assert_eq!(
            expand("a{{gradient:nope}}b{{unknown}}c{{nav_tabs}}d{{logo}}", &config, palette),
            "abcd"
        );
    }

    #[test]
    fn test_expand_logo() {
        let mut config = config();
        config.logo = Some(LogoConfig {
            path: "/assets/logo.png".to_string(),
            width: "120px".to_string(),
            position: "footer-right".to_string(),
        });
        let palette = config.active_palette().unwrap().clone();

        assert_eq!(
            expand("{{logo}}", &config, &palette),
            "<img src=\"/assets/logo.png\" width=\"120px\">"
        );
    }

    #[test]
    fn test_substituted_text_is_not_rescanned() {
        let mut config = config();
        config.footer.company_name = "{{primary}}".to_string();
        let palette = config.active_palette().unwrap().clone();

        assert_eq!(expand("{{company_name}}", &config, &palette), "{{primary}}");
    }

    #[test]
    fn test_header_and_footer_zones() {
        let mut config = config();
        config.header.left = "{{primary}}".to_string();
        config.footer.left = String::new();
        config.footer.right = "{{company_name}}".to_string();
        let palette = config.active_palette().unwrap().clone();

        assert_eq!(
            build_header_directive(&config, &palette),
            "<span class=\"hl\">#00A78E</span><span class=\"hc\"></span><span class=\"hr\"></span>"
        );
        assert_eq!(
            build_footer_directive(&config, &palette),
            "<span class=\"fl\"></span><span class=\"fc\"></span><span class=\"fr\">TestCorp</span>"
        );
    }
}
