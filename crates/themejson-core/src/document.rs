//! # Document Shapes
//!
//! The header of a theme configuration document and the typed shapes of
//! its list items. Settings sections themselves stay in the JSON value
//! model (their shape is driven by the schema registry); list items that
//! consumers read field by field get real types here.
//!
//! Union-typed fields keep both alternatives: `fontWeight` may be the
//! string `"100 900"` or the number `400`, and `src` may be one path or a
//! list. Deserializing and serializing again never collapses them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ThemeError;

/// The only `version` this implementation accepts.
pub const SUPPORTED_VERSION: u64 = 2;

/// The `$schema` and `version` members of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHeader {
    /// Tooling hint; never interpreted.
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Format version.
    pub version: u64,
}

impl DocumentHeader {
    /// Read and check the header of a parsed document.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::UnsupportedVersion`] if `version` is absent, not
    /// an integer, or not [`SUPPORTED_VERSION`].
    pub fn from_document(doc: &Value) -> Result<Self, ThemeError> {
        let version = doc.get("version");
        match version.and_then(Value::as_u64) {
            Some(SUPPORTED_VERSION) => Ok(Self {
                schema: doc.get("$schema").and_then(Value::as_str).map(str::to_string),
                version: SUPPORTED_VERSION,
            }),
            _ => Err(ThemeError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                found: version.map_or_else(|| "nothing".to_string(), Value::to_string),
            }),
        }
    }
}

/// A custom page template offered by the theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTemplate {
    /// Filename, without extension, in the templates folder.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Post types that may use this template.
    #[serde(default = "default_post_types")]
    pub post_types: Vec<String>,
}

fn default_post_types() -> Vec<String> {
    vec!["page".to_string()]
}

/// A template part (header, footer, ...) offered by the theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePart {
    /// Filename, without extension, in the parts folder.
    pub name: String,
    /// Display title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Area the part is used for.
    #[serde(default = "default_area")]
    pub area: String,
}

fn default_area() -> String {
    "uncategorized".to_string()
}

/// `font-display` descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontDisplay {
    /// `auto`
    Auto,
    /// `block`
    Block,
    /// `fallback`
    #[default]
    Fallback,
    /// `swap`
    Swap,
}

/// `font-weight` descriptor: a number or a space-separated list/range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontWeight {
    /// e.g. `400`
    Numeric(serde_json::Number),
    /// e.g. `"400"` or `"100 900"`
    Text(String),
}

impl Default for FontWeight {
    fn default() -> Self {
        Self::Text("400".to_string())
    }
}

impl FontWeight {
    /// Individual weights, in declaration order.
    pub fn weights(&self) -> Vec<String> {
        match self {
            Self::Numeric(n) => vec![n.to_string()],
            Self::Text(s) => s.split_whitespace().map(str::to_string).collect(),
        }
    }
}

/// `src` descriptor: one path/URI or several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FontSource {
    /// A single path or URI.
    Single(String),
    /// Several paths or URIs, in preference order.
    Many(Vec<String>),
}

impl FontSource {
    /// All paths, in order.
    pub fn paths(&self) -> Vec<&str> {
        match self {
            Self::Single(s) => vec![s.as_str()],
            Self::Many(v) => v.iter().map(String::as_str).collect(),
        }
    }
}

/// One physical font resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontFace {
    /// Family name the face registers under.
    pub font_family: String,
    /// Font file paths or URIs.
    pub src: FontSource,
    /// `normal`, `italic` or `oblique`. Defaults to `normal`.
    #[serde(default = "default_font_style")]
    pub font_style: String,
    /// Single weight or weight range.
    #[serde(default)]
    pub font_weight: FontWeight,
    /// Loading behaviour while the file downloads.
    #[serde(default)]
    pub font_display: FontDisplay,
    /// Width, e.g. `condensed` or `75% 125%`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_stretch: Option<String>,
    /// Ascent metric override, as a percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ascend_override: Option<String>,
    /// Descent metric override, as a percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descend_override: Option<String>,
    /// `font-variant` descriptor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_variant: Option<String>,
    /// OpenType feature settings, e.g. `"liga" 0`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_feature_settings: Option<String>,
    /// Variable-axis settings, e.g. `"wght" 450`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_variation_settings: Option<String>,
    /// Line-gap metric override, as a percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_gap_override: Option<String>,
    /// Glyph scale factor, as a percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_adjust: Option<String>,
    /// Code points the face covers, e.g. `U+0000-00FF`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unicode_range: Option<String>,
}

fn default_font_style() -> String {
    "normal".to_string()
}
