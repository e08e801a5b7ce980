//! Colour palettes and the style token resolver

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Resolves named style tokens (colour keys, `gradient:<name>`) to concrete CSS values
///
/// The preprocessor and the theme generator only ever see this lookup; a miss is
/// `None` and callers decide what an unresolved token turns into.
pub trait StyleResolver {
    /// Resolve a single token such as `primary` or `gradient:header`
    fn resolve(&self, token: &str) -> Option<String>;
}

/// A named linear gradient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gradient {
    /// Name used in `{{gradient:<name>}}` references
    pub name: String,

    /// CSS gradient direction (e.g., "to right", "135deg")
    pub direction: String,

    /// Colour stops in order
    pub stops: Vec<String>,
}

impl Gradient {
    /// Render as a CSS `linear-gradient(...)` value
    pub fn to_css(&self) -> String {
        format!(
            "linear-gradient({}, {})",
            self.direction,
            self.stops.iter().join(", ")
        )
    }
}

/// One colour palette from `[colors.palettes.<name>]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Primary brand colour
    pub primary: String,

    /// Secondary brand colour
    pub secondary: String,

    /// Accent colour
    pub accent: String,

    /// Colour for negative values and warnings
    #[serde(default = "default_negative")]
    pub negative: String,

    /// Slide background colour
    #[serde(default = "default_background")]
    pub background: String,

    /// Body text colour
    #[serde(default = "default_text")]
    pub text: String,

    /// Muted text colour
    #[serde(default = "default_muted")]
    pub muted: String,

    /// Named gradients
    #[serde(default)]
    pub gradients: Vec<Gradient>,
}

fn default_negative() -> String {
    "#C00000".to_string()
}

fn default_background() -> String {
    "#FFFFFF".to_string()
}

fn default_text() -> String {
    "#333333".to_string()
}

fn default_muted() -> String {
    "#999999".to_string()
}

impl ColorPalette {
    /// All colour keys with their values, in declaration order
    pub fn colors(&self) -> [(&'static str, &str); 7] {
        [
            ("primary", self.primary.as_str()),
            ("secondary", self.secondary.as_str()),
            ("accent", self.accent.as_str()),
            ("negative", self.negative.as_str()),
            ("background", self.background.as_str()),
            ("text", self.text.as_str()),
            ("muted", self.muted.as_str()),
        ]
    }

    /// Look up a gradient by name
    pub fn gradient(&self, name: &str) -> Option<&Gradient> {
        self.gradients.iter().find(|g| g.name == name)
    }
}

impl StyleResolver for ColorPalette {
    fn resolve(&self, token: &str) -> Option<String> {
        if let Some(name) = token.strip_prefix("gradient:") {
            return self.gradient(name).map(Gradient::to_css);
        }

        self.colors()
            .into_iter()
            .find(|(key, _)| *key == token)
            .map(|(_, value)| value.to_string())
    }
}
