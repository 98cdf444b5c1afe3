//! # Normalization
//!
//! Turns a validated document into a [`ResolvedConfig`]: every recognized
//! settings field carries a concrete value, for the global scope and for
//! every block the document mentions.
//!
//! ## Pipeline
//!
//! 1. Refuse documents with fatal diagnostics. In strict mode, also refuse
//!    documents that style disabled features.
//! 2. Reduce the document to a [`ThemeLayer`]: the explicit values that
//!    survived validation. Values of the wrong kind, unknown keys, keys a
//!    block may not declare, list items missing required members and
//!    duplicate slugs (after the first) are left out. In lenient mode,
//!    style properties flagged as disabled are left out too. List items get
//!    their item-level defaults.
//! 3. Resolve the layer over the registry defaults (see [`crate::merge`]).
//!
//! The input document is never modified.

use std::collections::HashSet;

use serde_json::{Map, Value};

use themejson_core::{
    BlockName, CustomTemplate, DiagnosticKind, Diagnostics, DocumentHeader, FieldPath,
    TemplatePart,
};
use themejson_schema::{BlockRule, FieldKind, SchemaNode, SchemaRegistry, ValidationMode};

use crate::error::NormalizeError;
use crate::merge::slug_of;
use crate::resolved::ResolvedConfig;

/// The explicit, sanitized content of one document.
///
/// A [`ResolvedConfig`] keeps its layers so that parent and child themes
/// can be re-resolved together.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeLayer {
    /// Global settings, without `blocks`.
    pub settings: Map<String, Value>,
    /// Block-scoped settings by block name.
    pub blocks: Map<String, Value>,
    /// Styles, with properties on disabled features removed.
    pub styles: Map<String, Value>,
    /// Custom templates, item defaults filled in.
    pub custom_templates: Vec<CustomTemplate>,
    /// Template parts, item defaults filled in.
    pub template_parts: Vec<TemplatePart>,
    /// Pattern slugs, first occurrence kept.
    pub patterns: Vec<String>,
}

impl ThemeLayer {
    /// Extract the layer of `doc`, leaving out values at `dropped` paths.
    pub fn from_document(
        doc: &Value,
        registry: &SchemaRegistry,
        dropped: &HashSet<FieldPath>,
    ) -> Self {
        let Some(root) = doc.as_object() else {
            return Self::default();
        };
        let sanitizer = Sanitizer { registry, dropped };
        let root_path = FieldPath::root();
        let section = |key: &str| -> Map<String, Value> {
            let (Some(value), Some(node)) = (root.get(key), registry.node(&[key])) else {
                return Map::new();
            };
            match sanitizer.clean(value, node, &root_path.key(key), None) {
                Some(Value::Object(map)) => map,
                _ => Map::new(),
            }
        };

        let mut settings = section("settings");
        let blocks = match settings.remove("blocks") {
            Some(Value::Object(blocks)) => blocks,
            _ => Map::new(),
        };
        let styles = section("styles");

        let list = |key: &str| -> Vec<Value> {
            let (Some(value), Some(node)) = (root.get(key), registry.node(&[key])) else {
                return Vec::new();
            };
            match sanitizer.clean(value, node, &root_path.key(key), None) {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            }
        };
        let custom_templates = list("customTemplates")
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();
        let template_parts = list("templateParts")
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect();
        let patterns = list("patterns")
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .collect();

        Self {
            settings,
            blocks,
            styles,
            custom_templates,
            template_parts,
            patterns,
        }
    }

    /// The explicit settings of block `name`, if the layer mentions it.
    pub fn block(&self, name: &str) -> Option<&Map<String, Value>> {
        self.blocks.get(name).and_then(Value::as_object)
    }
}

/// Block context for the settings below `settings.blocks.<name>`.
struct BlockScope {
    rule: BlockRule,
    depth: usize,
}

struct Sanitizer<'a> {
    registry: &'a SchemaRegistry,
    dropped: &'a HashSet<FieldPath>,
}

impl Sanitizer<'_> {
    fn clean(
        &self,
        value: &Value,
        node: &SchemaNode,
        path: &FieldPath,
        scope: Option<&BlockScope>,
    ) -> Option<Value> {
        if value.is_null() || self.dropped.contains(path) {
            return None;
        }
        match (node.kind(), value) {
            (
                FieldKind::Object | FieldKind::FalseOrObject | FieldKind::StringOrObject,
                Value::Object(map),
            ) => self
                .clean_object(map, node, path, scope, false)
                .map(Value::Object),
            (FieldKind::List, Value::Array(items)) => {
                let item = node.item()?;
                let unique = node.spec().preset.is_some();
                Some(Value::Array(self.clean_list(items, item, unique, path, scope)))
            }
            (FieldKind::Map | FieldKind::CustomValue, Value::Object(map)) => {
                let entry = node.entry().unwrap_or(node);
                let cleaned = map
                    .iter()
                    .filter_map(|(k, v)| {
                        self.clean(v, entry, &path.key(k), scope)
                            .map(|v| (k.clone(), v))
                    })
                    .collect();
                Some(Value::Object(cleaned))
            }
            (FieldKind::BlockMap { settings }, Value::Object(map)) => {
                Some(Value::Object(self.clean_blocks(map, node, path, settings)))
            }
            (FieldKind::StringList | FieldKind::StringOrList, Value::Array(items)) => Some(
                Value::Array(items.iter().filter(|v| v.is_string()).cloned().collect()),
            ),
            (kind, value) if kind.admits(value) => Some(value.clone()),
            _ => {
                tracing::debug!(path = %path, "leaving out value that does not match its field");
                None
            }
        }
    }

    /// Clean an object. List items (`item`) get their defaults and are
    /// rejected when a required member is missing.
    fn clean_object(
        &self,
        map: &Map<String, Value>,
        node: &SchemaNode,
        path: &FieldPath,
        scope: Option<&BlockScope>,
        item: bool,
    ) -> Option<Map<String, Value>> {
        let mut out = Map::new();
        for (key, value) in map {
            let Some(child) = node.child(key) else {
                continue;
            };
            let child_path = path.key(key);
            if let Some(scope) = scope {
                let relative: Vec<&str> = child_path.keys().skip(scope.depth).collect();
                if !scope.rule.allows(&relative) {
                    continue;
                }
            }
            if let Some(cleaned) = self.clean(value, child, &child_path, scope) {
                out.insert(key.clone(), cleaned);
            }
        }

        if item {
            for (key, child) in node.children() {
                if out.contains_key(key) {
                    continue;
                }
                if child.spec().required {
                    tracing::debug!(path = %path, member = key, "leaving out list item missing a required member");
                    return None;
                }
                if let Some(default) = &child.spec().default {
                    out.insert(key.to_string(), default.clone());
                }
            }
        }
        Some(out)
    }

    fn clean_list(
        &self,
        items: &[Value],
        item_node: &SchemaNode,
        unique: bool,
        path: &FieldPath,
        scope: Option<&BlockScope>,
    ) -> Vec<Value> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for (i, item) in items.iter().enumerate() {
            let item_path = path.index(i);
            let cleaned = match item.as_object() {
                Some(map) if item_node.kind() == FieldKind::Object => self
                    .clean_object(map, item_node, &item_path, scope, true)
                    .map(Value::Object),
                _ => self.clean(item, item_node, &item_path, scope),
            };
            let Some(cleaned) = cleaned else {
                continue;
            };
            if unique {
                if let Some(slug) = slug_of(&cleaned) {
                    if !seen.insert(slug.to_string()) {
                        tracing::debug!(path = %item_path, slug, "leaving out duplicate preset");
                        continue;
                    }
                }
            }
            out.push(cleaned);
        }
        out
    }

    fn clean_blocks(
        &self,
        map: &Map<String, Value>,
        node: &SchemaNode,
        path: &FieldPath,
        settings: bool,
    ) -> Map<String, Value> {
        let Some(entry) = node.entry() else {
            return Map::new();
        };
        let mut out = Map::new();
        for (name, value) in map {
            if BlockName::new(name.as_str()).is_err() {
                continue;
            }
            let block_path = path.key(name);
            let scope = settings.then(|| BlockScope {
                rule: self.registry.block_rule(name),
                depth: block_path.keys().count(),
            });
            if let Some(cleaned) = self.clean(value, entry, &block_path, scope.as_ref()) {
                out.insert(name.clone(), cleaned);
            }
        }
        out
    }
}

/// Produces resolved configurations from validated documents.
#[derive(Debug, Clone, Copy)]
pub struct Normalizer<'r> {
    registry: &'r SchemaRegistry,
    mode: ValidationMode,
}

impl<'r> Normalizer<'r> {
    /// A normalizer over `registry`. `mode` decides whether styled disabled
    /// features refuse the document.
    pub fn new(registry: &'r SchemaRegistry, mode: ValidationMode) -> Self {
        Self { registry, mode }
    }

    /// Normalize `doc`, given the diagnostics its validation produced.
    ///
    /// # Errors
    ///
    /// - [`NormalizeError::Blocked`] if any diagnostic is fatal.
    /// - [`NormalizeError::StrictModeViolation`] in strict mode, if any
    ///   style property was set while its feature is disabled.
    /// - [`NormalizeError::Theme`] if the header cannot be read (only
    ///   possible when `diagnostics` did not come from validating `doc`).
    pub fn normalize(
        &self,
        doc: &Value,
        diagnostics: &Diagnostics,
    ) -> Result<ResolvedConfig, NormalizeError> {
        let fatal = diagnostics.iter().filter(|d| d.is_fatal()).count();
        if fatal > 0 {
            return Err(NormalizeError::Blocked { fatal });
        }
        let header = DocumentHeader::from_document(doc)?;

        let disabled: HashSet<FieldPath> = diagnostics
            .of_kind(DiagnosticKind::DisabledFeature)
            .map(|d| d.path.clone())
            .collect();
        if self.mode == ValidationMode::Strict && !disabled.is_empty() {
            return Err(NormalizeError::StrictModeViolation {
                count: diagnostics.count(DiagnosticKind::DisabledFeature),
            });
        }

        let layer = ThemeLayer::from_document(doc, self.registry, &disabled);
        tracing::debug!(
            blocks = layer.blocks.len(),
            dropped_styles = disabled.len(),
            "document reduced to its explicit layer"
        );
        Ok(ResolvedConfig::from_layers(header, vec![layer], self.registry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use themejson_schema::{registry, Validator};

    fn layer(doc: Value) -> ThemeLayer {
        ThemeLayer::from_document(&doc, registry(), &HashSet::new())
    }

    #[test]
    fn layer_keeps_only_recognized_values() {
        let layer = layer(json!({
            "version": 2,
            "settings": {
                "color": {"custom": "yes", "text": false, "sparkle": true},
                "layout": {"contentSize": null, "wideSize": "1200px"}
            }
        }));
        assert_eq!(
            Value::Object(layer.settings),
            json!({"color": {"text": false}, "layout": {"wideSize": "1200px"}})
        );
    }

    #[test]
    fn list_items_get_defaults_and_lose_duplicates() {
        let layer = layer(json!({
            "version": 2,
            "settings": {"typography": {"fontFamilies": [{
                "slug": "body",
                "fontFamily": "Inter",
                "fontFace": [{"fontFamily": "Inter", "src": "inter.woff2"}, {"fontFamily": "Broken"}]
            }, {"slug": "body", "fontFamily": "Other"}]}},
            "templateParts": [{"name": "header"}],
            "customTemplates": [{"name": "blank", "title": "Blank"}, {"name": "untitled"}]
        }));
        let families = &layer.settings["typography"]["fontFamilies"];
        assert_eq!(families.as_array().unwrap().len(), 1);
        assert_eq!(
            families[0]["fontFace"],
            json!([{
                "fontFamily": "Inter",
                "src": "inter.woff2",
                "fontStyle": "normal",
                "fontWeight": "400",
                "fontDisplay": "fallback"
            }])
        );
        assert_eq!(layer.template_parts[0].area, "uncategorized");
        assert_eq!(layer.custom_templates.len(), 1);
        assert_eq!(layer.custom_templates[0].post_types, vec!["page"]);
    }

    #[test]
    fn block_rules_filter_layer() {
        let layer = layer(json!({
            "version": 2,
            "settings": {"blocks": {
                "core/button": {"border": {"radius": true, "color": true}},
                "core/archives": {"color": {"text": false}},
                "Bad Name": {"color": {"text": false}}
            }}
        }));
        assert_eq!(
            Value::Object(layer.blocks),
            json!({
                "core/button": {"border": {"radius": true}},
                "core/archives": {}
            })
        );
    }

    #[test]
    fn fatal_diagnostics_block_normalization() {
        let doc = json!({"version": 1});
        let diagnostics = Validator::new(registry(), ValidationMode::Lenient).validate(&doc);
        let result = Normalizer::new(registry(), ValidationMode::Lenient).normalize(&doc, &diagnostics);
        assert!(matches!(result, Err(NormalizeError::Blocked { fatal: 1 })));
    }

    #[test]
    fn strict_mode_refuses_disabled_features() {
        let doc = json!({
            "version": 2,
            "settings": {"color": {"custom": false}},
            "styles": {"color": {"text": "#123456", "background": "#fff"}}
        });

        let strict = Validator::new(registry(), ValidationMode::Strict).validate(&doc);
        let result = Normalizer::new(registry(), ValidationMode::Strict).normalize(&doc, &strict);
        assert!(matches!(
            result,
            Err(NormalizeError::StrictModeViolation { count: 2 })
        ));

        let lenient = Validator::new(registry(), ValidationMode::Lenient).validate(&doc);
        let config = Normalizer::new(registry(), ValidationMode::Lenient)
            .normalize(&doc, &lenient)
            .unwrap();
        assert_eq!(config.styles(), &json!({"color": {}}));
    }
}
