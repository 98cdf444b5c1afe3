//! # Preset Resolution
//!
//! Expands the preset lists of a resolved settings node into concrete
//! values with their public identifiers, generates the spacing scale,
//! computes fluid font sizes, and flattens `settings.custom` into custom
//! properties.
//!
//! Identifier derivation is delegated to [`PresetCategory`], so the same
//! `(category, slug)` always yields the same qualifier, custom property and
//! class names.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use themejson_core::{Diagnostics, FieldPath, FontFace, PresetCategory, Slug};

use crate::fluid::{fluid_font_size, FluidBounds, FluidOptions};
use crate::merge::slug_of;
use crate::scale::{merge_spacing_sizes, resolve_spacing_scale, SpacingScale};

/// The value of one preset, by category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "camelCase")]
pub enum PresetValue {
    Color(String),
    Gradient(String),
    Duotone(Vec<String>),
    FontSize {
        size: String,
        /// `clamp()` expression when fluid typography applies.
        #[serde(skip_serializing_if = "Option::is_none")]
        fluid: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    FontFamily {
        font_family: String,
        #[serde(skip_serializing_if = "Vec::is_empty")]
        font_faces: Vec<FontFace>,
    },
    SpacingSize(String),
}

/// One preset with its derived identifiers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPreset {
    /// List the preset came from.
    pub category: PresetCategory,
    /// Identifier within the category.
    pub slug: Slug,
    /// Human-readable label, when the item had one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The resolved value.
    pub value: PresetValue,
    /// `<category>--<slug>`.
    pub qualifier: String,
    /// `--wp--preset--<category>--<slug>`.
    pub custom_property: String,
    /// Utility classes; empty for categories that generate none.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub class_names: Vec<String>,
}

impl ResolvedPreset {
    fn new(category: PresetCategory, slug: Slug, name: Option<String>, value: PresetValue) -> Self {
        Self {
            category,
            qualifier: category.qualifier(&slug),
            custom_property: category.custom_property(&slug),
            class_names: category.class_names(&slug),
            slug,
            name,
            value,
        }
    }

    /// The value a style sheet assigns to [`custom_property`](Self::custom_property).
    pub fn css_value(&self) -> String {
        match &self.value {
            PresetValue::Color(v) | PresetValue::Gradient(v) | PresetValue::SpacingSize(v) => v.clone(),
            PresetValue::Duotone(_) => format!("url('#wp-duotone-{}')", self.slug),
            PresetValue::FontSize { size, fluid } => fluid.clone().unwrap_or_else(|| size.clone()),
            PresetValue::FontFamily { font_family, .. } => font_family.clone(),
        }
    }
}

/// A `--wp--custom--*` property flattened from `settings.custom`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomProperty {
    /// Full property name, e.g. `--wp--custom--line-height--body`.
    pub name: String,
    /// Value as written in `settings.custom`.
    pub value: String,
}

/// Every preset of one settings scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPresets {
    presets: BTreeMap<PresetCategory, Vec<ResolvedPreset>>,
    custom_properties: Vec<CustomProperty>,
}

impl ResolvedPresets {
    /// Presets of one category, in resolution order.
    pub fn get(&self, category: PresetCategory) -> &[ResolvedPreset] {
        self.presets
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Find a preset by category and slug.
    pub fn find(&self, category: PresetCategory, slug: &str) -> Option<&ResolvedPreset> {
        self.get(category).iter().find(|p| p.slug.as_str() == slug)
    }

    /// All presets, category by category.
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedPreset> {
        self.presets.values().flatten()
    }

    /// Flattened `settings.custom` values.
    pub fn custom_properties(&self) -> &[CustomProperty] {
        &self.custom_properties
    }
}

/// Resolves the presets of resolved settings nodes.
#[derive(Debug, Clone, Copy)]
pub struct PresetResolver<'o> {
    fluid: &'o FluidOptions,
}

impl<'o> PresetResolver<'o> {
    /// A resolver computing fluid sizes with `fluid`.
    pub fn new(fluid: &'o FluidOptions) -> Self {
        Self { fluid }
    }

    /// Resolve every preset of `settings`, a fully resolved settings node
    /// located at `path`. Spacing-scale warnings are pushed into
    /// `diagnostics`.
    pub fn resolve_presets(
        &self,
        settings: &Value,
        path: &FieldPath,
        diagnostics: &mut Diagnostics,
    ) -> ResolvedPresets {
        let mut presets = BTreeMap::new();
        for category in PresetCategory::all() {
            let resolved = match category {
                PresetCategory::SpacingSizes => self.spacing_sizes(settings, path, diagnostics),
                _ => preset_items(settings, *category)
                    .iter()
                    .filter_map(|item| self.preset(*category, item, settings))
                    .collect(),
            };
            presets.insert(*category, resolved);
        }

        let custom_properties = settings
            .get("custom")
            .and_then(Value::as_object)
            .map(custom_properties)
            .unwrap_or_default();

        tracing::debug!(
            path = %path,
            presets = presets.values().map(Vec::len).sum::<usize>(),
            custom = custom_properties.len(),
            "presets resolved"
        );
        ResolvedPresets {
            presets,
            custom_properties,
        }
    }

    fn preset(&self, category: PresetCategory, item: &Value, settings: &Value) -> Option<ResolvedPreset> {
        let slug = Slug::new(slug_of(item)?).ok()?;
        let name = item.get("name").and_then(Value::as_str).map(str::to_string);
        let member = item.get(category.value_key())?;
        let text = || member.as_str().map(str::to_string);

        let value = match category {
            PresetCategory::Palette => PresetValue::Color(text()?),
            PresetCategory::Gradients => PresetValue::Gradient(text()?),
            PresetCategory::Duotone => PresetValue::Duotone(
                member
                    .as_array()?
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            PresetCategory::FontSizes => {
                let size = text()?;
                let fluid = fluid_enabled(settings)
                    .then(|| FluidBounds::from_preset(item.get("fluid")))
                    .flatten()
                    .and_then(|bounds| fluid_font_size(&size, &bounds, self.fluid));
                PresetValue::FontSize { size, fluid }
            }
            PresetCategory::FontFamilies => PresetValue::FontFamily {
                font_family: text()?,
                font_faces: font_faces(item, &slug),
            },
            PresetCategory::SpacingSizes => PresetValue::SpacingSize(text()?),
        };
        Some(ResolvedPreset::new(category, slug, name, value))
    }

    fn spacing_sizes(
        &self,
        settings: &Value,
        path: &FieldPath,
        diagnostics: &mut Diagnostics,
    ) -> Vec<ResolvedPreset> {
        let scale_path = path.key("spacing").key("spacingScale");
        let generated = match SpacingScale::from_settings(settings) {
            Ok(Some(scale)) => resolve_spacing_scale(&scale, &scale_path, diagnostics),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(path = %scale_path, error = %e, "spacing scale ignored");
                diagnostics.push(e.to_diagnostic(&scale_path));
                Vec::new()
            }
        };
        merge_spacing_sizes(generated, preset_items(settings, PresetCategory::SpacingSizes))
            .into_iter()
            .map(|size| {
                ResolvedPreset::new(
                    PresetCategory::SpacingSizes,
                    size.slug,
                    Some(size.name),
                    PresetValue::SpacingSize(size.size),
                )
            })
            .collect()
    }
}

fn preset_items(settings: &Value, category: PresetCategory) -> &[Value] {
    let (section, key) = category.settings_location();
    settings
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn fluid_enabled(settings: &Value) -> bool {
    settings
        .get("typography")
        .and_then(|t| t.get("fluid"))
        .and_then(Value::as_bool)
        .unwrap_or(false)
}

fn font_faces(item: &Value, slug: &Slug) -> Vec<FontFace> {
    let Some(faces) = item.get("fontFace").and_then(Value::as_array) else {
        return Vec::new();
    };
    faces
        .iter()
        .filter_map(|face| match serde_json::from_value::<FontFace>(face.clone()) {
            Ok(face) => Some(face),
            Err(e) => {
                tracing::warn!(slug = %slug, error = %e, "skipping unreadable font face");
                None
            }
        })
        .collect()
}

/// Convert a camelCase key to kebab-case.
pub fn to_kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Flatten `settings.custom` into `--wp--custom--a--b` properties.
pub fn custom_properties(custom: &Map<String, Value>) -> Vec<CustomProperty> {
    let mut out = Vec::new();
    flatten_custom("--wp--custom", custom, &mut out);
    out
}

fn flatten_custom(prefix: &str, map: &Map<String, Value>, out: &mut Vec<CustomProperty>) {
    for (key, value) in map {
        let name = format!("{prefix}--{}", to_kebab_case(key));
        match value {
            Value::Object(nested) => flatten_custom(&name, nested, out),
            Value::String(s) => out.push(CustomProperty {
                name,
                value: s.clone(),
            }),
            Value::Number(n) => out.push(CustomProperty {
                name,
                value: n.to_string(),
            }),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use themejson_core::DiagnosticKind;

    fn resolve(settings: Value) -> (ResolvedPresets, Diagnostics) {
        let options = FluidOptions::default();
        let mut diagnostics = Diagnostics::new();
        let presets = PresetResolver::new(&options).resolve_presets(
            &settings,
            &FieldPath::root().key("settings"),
            &mut diagnostics,
        );
        (presets, diagnostics)
    }

    #[test]
    fn palette_identifiers() {
        let (presets, _) = resolve(json!({"color": {"palette": [
            {"name": "Primary", "slug": "primary", "color": "#0b57d0"}
        ]}}));
        let primary = presets.find(PresetCategory::Palette, "primary").unwrap();
        assert_eq!(primary.qualifier, "color--primary");
        assert_eq!(primary.custom_property, "--wp--preset--color--primary");
        assert_eq!(primary.css_value(), "#0b57d0");
        assert_eq!(primary.class_names.len(), 3);
    }

    #[test]
    fn fluid_only_when_enabled() {
        let sizes = json!([
            {"slug": "large", "size": "2rem"},
            {"slug": "huge", "size": "3rem", "fluid": false},
            {"slug": "tiny", "size": "12px"}
        ]);
        let (static_presets, _) = resolve(json!({"typography": {"fluid": false, "fontSizes": sizes}}));
        assert_eq!(
            static_presets.find(PresetCategory::FontSizes, "large").unwrap().css_value(),
            "2rem"
        );

        let (fluid_presets, _) = resolve(json!({"typography": {"fluid": true, "fontSizes": sizes}}));
        assert!(fluid_presets
            .find(PresetCategory::FontSizes, "large")
            .unwrap()
            .css_value()
            .starts_with("clamp(1.5rem, "));
        assert_eq!(
            fluid_presets.find(PresetCategory::FontSizes, "huge").unwrap().css_value(),
            "3rem"
        );
        assert_eq!(
            fluid_presets.find(PresetCategory::FontSizes, "tiny").unwrap().css_value(),
            "12px"
        );
    }

    #[test]
    fn spacing_sizes_include_generated_scale() {
        let (presets, diagnostics) = resolve(json!({"spacing": {
            "spacingScale": {"operator": "+", "increment": 4, "steps": 5, "mediumStep": 16, "unit": "px"},
            "spacingSizes": [{"slug": "70", "size": "2rem", "name": "Roomy"}]
        }}));
        assert!(diagnostics.is_empty());
        let sizes: Vec<String> = presets
            .get(PresetCategory::SpacingSizes)
            .iter()
            .map(ResolvedPreset::css_value)
            .collect();
        assert_eq!(sizes, vec!["8px", "12px", "16px", "20px", "2rem"]);
        let medium = presets.find(PresetCategory::SpacingSizes, "50").unwrap();
        assert_eq!(medium.custom_property, "--wp--preset--space-size--50");
        assert_eq!(medium.name.as_deref(), Some("Medium"));
    }

    #[test]
    fn unusable_spacing_scale_becomes_a_diagnostic() {
        let (presets, diagnostics) = resolve(json!({"spacing": {
            "spacingScale": {"operator": "+", "increment": 4, "steps": 4_294_967_296u64, "mediumStep": 16, "unit": "px"},
            "spacingSizes": [{"slug": "gutter", "size": "2rem"}]
        }}));
        let kinds: Vec<DiagnosticKind> = diagnostics.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DiagnosticKind::FieldType]);
        assert_eq!(
            diagnostics.iter().next().unwrap().path.to_string(),
            "/settings/spacing/spacingScale"
        );
        let slugs: Vec<&str> = presets
            .get(PresetCategory::SpacingSizes)
            .iter()
            .map(|p| p.slug.as_str())
            .collect();
        assert_eq!(slugs, vec!["gutter"]);

        let (presets, diagnostics) = resolve(json!({"spacing": {"spacingScale": {
            "operator": "*", "increment": 1.5, "steps": 5000, "mediumStep": 1, "unit": "rem"
        }}}));
        assert_eq!(diagnostics.count(DiagnosticKind::RangeViolation), 1);
        assert!(presets.get(PresetCategory::SpacingSizes).is_empty());
    }

    #[test]
    fn font_families_keep_faces() {
        let (presets, _) = resolve(json!({"typography": {"fontFamilies": [{
            "slug": "body",
            "fontFamily": "Inter, sans-serif",
            "fontFace": [{"fontFamily": "Inter", "src": ["a.woff2"], "fontWeight": "100 900"}]
        }]}}));
        let body = presets.find(PresetCategory::FontFamilies, "body").unwrap();
        let PresetValue::FontFamily { font_faces, .. } = &body.value else {
            panic!("expected a font family");
        };
        assert_eq!(font_faces.len(), 1);
        assert_eq!(font_faces[0].font_weight.weights(), vec!["100", "900"]);
        assert_eq!(body.css_value(), "Inter, sans-serif");
    }

    #[test]
    fn duotone_value_references_filter() {
        let (presets, _) = resolve(json!({"color": {"duotone": [
            {"name": "Dark", "slug": "dark", "colors": ["#000", "#fff"]}
        ]}}));
        let dark = presets.find(PresetCategory::Duotone, "dark").unwrap();
        assert_eq!(dark.css_value(), "url('#wp-duotone-dark')");
        assert!(dark.class_names.is_empty());
    }

    #[test]
    fn custom_properties_are_flattened() {
        let properties = custom_properties(
            json!({"lineHeight": {"body": 1.6, "heading": "1.2"}, "spacing": {"outer": "2rem"}})
                .as_object()
                .unwrap(),
        );
        let pairs: Vec<(&str, &str)> = properties
            .iter()
            .map(|p| (p.name.as_str(), p.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("--wp--custom--line-height--body", "1.6"),
                ("--wp--custom--line-height--heading", "1.2"),
                ("--wp--custom--spacing--outer", "2rem"),
            ]
        );
    }

    #[test]
    fn kebab_case_conversion() {
        assert_eq!(to_kebab_case("fontSize"), "font-size");
        assert_eq!(to_kebab_case("already-kebab"), "already-kebab");
        assert_eq!(to_kebab_case("XLarge"), "x-large");
    }

    #[test]
    fn preset_value_serializes_with_type_tag() {
        let value = serde_json::to_value(PresetValue::Color("#fff".into())).unwrap();
        assert_eq!(value, json!({"type": "color", "value": "#fff"}));
        let size = serde_json::to_value(PresetValue::FontSize {
            size: "1rem".into(),
            fluid: None,
        })
        .unwrap();
        assert_eq!(size, json!({"type": "fontSize", "value": {"size": "1rem"}}));
    }
}
