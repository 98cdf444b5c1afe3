//! # Preset Categories — Single Source of Truth
//!
//! Defines the [`PresetCategory`] enum naming every preset collection in
//! the settings tree. Each category knows where its list lives, which item
//! member carries the value, and which public identifiers a slug turns into.
//! Identifier derivation is a pure function of `(category, slug)`, so
//! resolving the same document twice always yields the same names.

use serde::{Deserialize, Serialize};

use crate::identity::Slug;

/// Every preset collection in the settings tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PresetCategory {
    /// `color.palette`
    Palette,
    /// `color.gradients`
    Gradients,
    /// `color.duotone`
    Duotone,
    /// `typography.fontSizes`
    FontSizes,
    /// `typography.fontFamilies`
    FontFamilies,
    /// `spacing.spacingSizes`
    SpacingSizes,
}

impl PresetCategory {
    /// All categories in canonical order.
    pub fn all() -> &'static [PresetCategory] {
        &[
            Self::Palette,
            Self::Gradients,
            Self::Duotone,
            Self::FontSizes,
            Self::FontFamilies,
            Self::SpacingSizes,
        ]
    }

    /// `(section, key)` of the list inside a settings node.
    pub fn settings_location(&self) -> (&'static str, &'static str) {
        match self {
            Self::Palette => ("color", "palette"),
            Self::Gradients => ("color", "gradients"),
            Self::Duotone => ("color", "duotone"),
            Self::FontSizes => ("typography", "fontSizes"),
            Self::FontFamilies => ("typography", "fontFamilies"),
            Self::SpacingSizes => ("spacing", "spacingSizes"),
        }
    }

    /// Item member holding the preset value.
    pub fn value_key(&self) -> &'static str {
        match self {
            Self::Palette => "color",
            Self::Gradients => "gradient",
            Self::Duotone => "colors",
            Self::FontSizes | Self::SpacingSizes => "size",
            Self::FontFamilies => "fontFamily",
        }
    }

    /// Category component of generated identifiers.
    pub fn css_name(&self) -> &'static str {
        match self {
            Self::Palette => "color",
            Self::Gradients => "gradient",
            Self::Duotone => "duotone",
            Self::FontSizes => "font-size",
            Self::FontFamilies => "font-family",
            Self::SpacingSizes => "space-size",
        }
    }

    /// The qualifier combining category and slug, e.g. `font-size--large`.
    pub fn qualifier(&self, slug: &Slug) -> String {
        format!("{}--{}", self.css_name(), slug)
    }

    /// Custom property name, e.g. `--wp--preset--color--primary`.
    pub fn custom_property(&self, slug: &Slug) -> String {
        format!("--wp--preset--{}", self.qualifier(slug))
    }

    /// Utility class names generated for a preset.
    pub fn class_names(&self, slug: &Slug) -> Vec<String> {
        let suffixes: &[&str] = match self {
            Self::Palette => &["color", "background-color", "border-color"],
            Self::Gradients => &["gradient-background"],
            Self::FontSizes => &["font-size"],
            Self::FontFamilies => &["font-family"],
            Self::Duotone | Self::SpacingSizes => &[],
        };
        suffixes
            .iter()
            .map(|suffix| format!("has-{slug}-{suffix}"))
            .collect()
    }
}
