//! Style configuration from slidedeck.toml
//!
//! The configuration is loaded and validated once, then handed to the
//! preprocessor and theme generator as an immutable snapshot. Every table
//! except `[colors]` is optional and falls back to the defaults below.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

// Submodules
mod error;
mod palette;

// Re-export public types
pub use error::ConfigError;
pub use palette::{ColorPalette, Gradient, StyleResolver};

/// Root style configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    /// Slide size and theme name
    #[serde(default)]
    pub slide: SlideConfig,

    /// Colour palettes and the active palette name
    pub colors: ColorsConfig,

    /// Optional company logo
    #[serde(default)]
    pub logo: Option<LogoConfig>,

    /// Header bar templates
    #[serde(default)]
    pub header: HeaderConfig,

    /// Footer bar templates
    #[serde(default)]
    pub footer: FooterConfig,

    /// Page number policy
    #[serde(default)]
    pub pagination: PaginationConfig,

    /// Slide content margins
    #[serde(default)]
    pub margin: MarginConfig,

    /// Cover, section divider and end slide styling
    #[serde(default)]
    pub special_slides: SpecialSlides,

    /// Automatic structuring toggles
    #[serde(default)]
    pub auto_structure: AutoStructure,
}

/// `[slide]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SlideConfig {
    /// Slide size preset or explicit dimensions
    pub size: SlideSize,

    /// Marp theme name declared by the generated stylesheet
    pub theme: String,
}

impl Default for SlideConfig {
    fn default() -> Self {
        Self {
            size: SlideSize::Preset("16:9".to_string()),
            theme: "corporate".to_string(),
        }
    }
}

/// Slide size: either a preset (`"16:9"`, `"4:3"`) or explicit width/height
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlideSize {
    /// Named preset understood by the renderer
    Preset(String),
    /// Explicit dimensions (e.g., "1280px" x "720px")
    Custom {
        /// Slide width
        width: String,
        /// Slide height
        height: String,
    },
}

impl SlideSize {
    /// Value of the `size:` directive
    pub fn directive(&self) -> String {
        match self {
            SlideSize::Preset(name) => name.clone(),
            SlideSize::Custom { width, height } => format!("{} {}", width, height),
        }
    }
}

/// `[colors]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorsConfig {
    /// Name of the palette used for this build
    pub active: String,

    /// All configured palettes by name
    pub palettes: BTreeMap<String, ColorPalette>,
}

/// `[logo]` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoConfig {
    /// Image path (resolved against the config directory on load)
    pub path: String,

    /// CSS width
    #[serde(default = "default_logo_width")]
    pub width: String,

    /// Placement hint, reserved for header/footer logo placement
    #[serde(default = "default_logo_position")]
    pub position: String,
}

fn default_logo_width() -> String {
    "150px".to_string()
}

fn default_logo_position() -> String {
    "footer-right".to_string()
}

/// `[header]` table
///
/// `left`, `center` and `right` are templates that may contain placeholders
/// such as `{{logo}}` or `{{gradient:header}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HeaderConfig {
    /// Bar height
    pub height: String,
    /// Left zone template
    pub left: String,
    /// Center zone template
    pub center: String,
    /// Right zone template
    pub right: String,
    /// Bar background (colour or gradient reference)
    pub background: String,
    /// Text colour
    pub color: String,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        Self {
            height: "40px".to_string(),
            left: String::new(),
            center: String::new(),
            right: String::new(),
            background: "transparent".to_string(),
            color: "#333333".to_string(),
        }
    }
}

/// `[footer]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    /// Bar height
    pub height: String,
    /// Left zone template
    pub left: String,
    /// Center zone template
    pub center: String,
    /// Right zone template
    pub right: String,
    /// Bar background (colour or gradient reference)
    pub background: String,
    /// Text colour
    pub color: String,
    /// Substituted for `{{company_name}}`
    pub company_name: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            height: "36px".to_string(),
            left: String::new(),
            center: String::new(),
            right: "{{company_name}}\u{3000}{{page}}".to_string(),
            background: "transparent".to_string(),
            color: "#666666".to_string(),
            company_name: String::new(),
        }
    }
}

/// `[pagination]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Emit `paginate: true`
    pub enabled: bool,

    /// Page number format (reserved; the renderer prints the bare number)
    pub format: String,

    /// Placement of the page number: `*-left`, `*-center` or `*-right`
    pub position: String,

    /// Special slide kinds (`cover`, `section_divider`, `end`) without a page number
    pub hide_on: Vec<String>,

    /// First numbered page (reserved; numbering always starts at the renderer's count)
    pub start_from: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            format: "{{page}}".to_string(),
            position: "footer-right".to_string(),
            hide_on: vec!["cover".to_string(), "end".to_string()],
            start_from: 2,
        }
    }
}

/// `[margin]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarginConfig {
    /// Top padding
    pub top: String,
    /// Bottom padding
    pub bottom: String,
    /// Left padding
    pub left: String,
    /// Right padding
    pub right: String,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: "60px".to_string(),
            bottom: "50px".to_string(),
            left: "50px".to_string(),
            right: "50px".to_string(),
        }
    }
}

/// `[special_slides]` table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialSlides {
    /// Cover slide
    pub cover: CoverSlideConfig,
    /// Section divider slides
    pub section_divider: SectionDividerConfig,
    /// Closing slide
    pub end: EndSlideConfig,
}

/// Cover slide layout variants
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverLayout {
    /// Centered title block
    #[default]
    Default,
    /// Title block on the left, image on the right
    ImageRight,
}

/// `[special_slides.cover]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverSlideConfig {
    /// Slide background
    pub background: String,
    /// Title colour (may reference a palette colour)
    pub title_color: Option<String>,
    /// Title alignment
    pub title_align: Option<String>,
    /// Draw the accent line above the title
    pub show_accent_line: bool,
    /// Accent line colour or gradient reference
    pub accent_line_color: Option<String>,
    /// Place the logo on the cover
    pub show_logo: bool,
    /// Logo placement hint (reserved; the logo follows the title block)
    pub logo_position: Option<String>,
    /// Cover layout variant
    pub layout: CoverLayout,
    /// Image shown by the `image-right` layout
    pub image: Option<String>,
}

impl Default for CoverSlideConfig {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            title_color: Some("#333333".to_string()),
            title_align: Some("left".to_string()),
            show_accent_line: true,
            accent_line_color: None,
            show_logo: true,
            logo_position: Some("bottom-right".to_string()),
            layout: CoverLayout::Default,
            image: None,
        }
    }
}

/// `[special_slides.section_divider]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionDividerConfig {
    /// Slide background
    pub background: String,
    /// Title colour (may reference a palette colour)
    pub title_color: Option<String>,
    /// Emit the two-digit section number badge
    pub show_section_number: bool,
    /// Badge colour (may reference a palette colour)
    pub number_color: Option<String>,
    /// Reserved for section navigation tabs
    pub show_nav_tabs: bool,
    /// Draw a rule under the title
    pub separator_line: bool,
}

impl Default for SectionDividerConfig {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            title_color: None,
            show_section_number: true,
            number_color: Some("#E0E0E0".to_string()),
            show_nav_tabs: true,
            separator_line: true,
        }
    }
}

/// `[special_slides.end]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EndSlideConfig {
    /// Slide background
    pub background: String,
    /// Place the logo on the closing slide
    pub show_logo: bool,
    /// Logo placement hint (reserved; the logo is centred)
    pub logo_position: Option<String>,
    /// Show the tagline below the logo
    pub show_tagline: bool,
    /// Closing tagline text
    pub tagline: String,
}

impl Default for EndSlideConfig {
    fn default() -> Self {
        Self {
            background: "#FFFFFF".to_string(),
            show_logo: true,
            logo_position: Some("center".to_string()),
            show_tagline: true,
            tagline: String::new(),
        }
    }
}

/// `[auto_structure]` table
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct AutoStructure {
    /// Detect sections and split them into slides
    pub enabled: bool,

    /// Heading depth treated as a section boundary (2 = `##`)
    pub section_heading_level: usize,

    /// Synthesize a cover slide from the first `#` heading
    pub auto_cover: bool,

    /// Append a closing slide
    pub auto_end: bool,
}

impl Default for AutoStructure {
    fn default() -> Self {
        Self {
            enabled: true,
            section_heading_level: 2,
            auto_cover: true,
            auto_end: true,
        }
    }
}

impl StyleConfig {
    /// Load and validate configuration from a slidedeck.toml file
    ///
    /// # Parameters
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(StyleConfig)` - Loaded configuration; relative asset paths are
    ///   resolved against the file's directory
    /// * `Err(ConfigError)` - Error reading, parsing or validating the file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_toml_str(&content)?;
        log::info!("Loaded style config from {}", path.display());

        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(config.with_base_dir(base_dir))
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: StyleConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.active_palette()?;

        let level = self.auto_structure.section_heading_level;
        if !(1..=5).contains(&level) {
            return Err(ConfigError::InvalidValue {
                field: "auto_structure.section_heading_level",
                message: format!("expected 1-5, got {}", level),
            });
        }

        Ok(())
    }

    /// The palette named by `colors.active`
    pub fn active_palette(&self) -> Result<&ColorPalette, ConfigError> {
        self.colors
            .palettes
            .get(&self.colors.active)
            .ok_or_else(|| ConfigError::PaletteNotFound {
                name: self.colors.active.clone(),
                available: self.colors.palettes.keys().join(", "),
            })
    }

    /// Return a copy with a different active palette
    ///
    /// # Returns
    /// * `Ok(StyleConfig)` - New snapshot using `name`
    /// * `Err(ConfigError::PaletteNotFound)` - No palette with that name
    pub fn with_active_palette(&self, name: &str) -> Result<Self, ConfigError> {
        let mut config = self.clone();
        config.colors.active = name.to_string();
        config.active_palette()?;
        Ok(config)
    }

    /// Return a copy with relative logo and cover image paths resolved against `base_dir`
    ///
    /// Paths are written with forward slashes so they can be embedded in HTML.
    pub fn with_base_dir(mut self, base_dir: &Path) -> Self {
        if let Some(logo) = self.logo.as_mut() {
            logo.path = resolve_asset_path(base_dir, &logo.path);
        }
        if let Some(image) = self.special_slides.cover.image.as_mut() {
            *image = resolve_asset_path(base_dir, image);
        }
        self
    }
}

/// Join a possibly relative asset path onto `base_dir`, normalizing separators
fn resolve_asset_path(base_dir: &Path, asset: &str) -> String {
    let asset_path = Path::new(asset);
    let joined = if asset_path.is_absolute() || asset.contains("://") {
        asset_path.to_path_buf()
    } else {
        base_dir.join(asset_path)
    };
    joined.to_string_lossy().replace('\\', "/")
}
