//! Embedded starter files
//!
//! `slidedeck init` writes these into a new deck directory. They are compiled
//! into the binary.

/// Starter style configuration
pub const CONFIG_TEMPLATE: &str = include_str!("templates/slidedeck.toml");

/// Sample deck exercising covers, sections and layouts
pub const SAMPLE_DECK: &str = include_str!("templates/sample-deck.md");

/// A file created by `init`
#[derive(Debug, Clone, Copy)]
pub struct TemplateFile {
    /// File name relative to the target directory
    pub name: &'static str,
    /// File content
    pub content: &'static str,
}

/// Get all starter files
///
/// # Returns
/// * `Vec<TemplateFile>` - The configuration first, then the sample deck
pub fn starter_files() -> Vec<TemplateFile> {
    vec![
        TemplateFile {
            name: "slidedeck.toml",
            content: CONFIG_TEMPLATE,
        },
        TemplateFile {
            name: "sample-deck.md",
            content: SAMPLE_DECK,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessor::{preprocess, PreprocessOptions};
    use crate::style_config::StyleConfig;

    #[test]
    fn test_config_template_is_valid() {
        let config = StyleConfig::from_toml_str(CONFIG_TEMPLATE).unwrap();
        assert!(config.colors.palettes.len() >= 2);
        assert!(!config.footer.company_name.is_empty());
    }

    #[test]
    fn test_every_palette_is_usable() {
        let config = StyleConfig::from_toml_str(CONFIG_TEMPLATE).unwrap();
        for name in config.colors.palettes.keys() {
            assert!(config.with_active_palette(name).is_ok(), "palette {}", name);
        }
    }

    #[test]
    fn test_sample_deck_preprocesses() {
        let config = StyleConfig::from_toml_str(CONFIG_TEMPLATE).unwrap();
        let result = preprocess(SAMPLE_DECK, &config, PreprocessOptions::default()).unwrap();

        assert!(result.cover.is_some());
        assert!(result.sections.len() >= 2);
        assert!(result.markdown.contains("<!-- _class: cols-2 -->"));
    }

    #[test]
    fn test_starter_file_names() {
        let names: Vec<_> = starter_files().iter().map(|f| f.name).collect();
        assert_eq!(names, vec!["slidedeck.toml", "sample-deck.md"]);
    }
}
