//! # Resolved Configuration
//!
//! The fully-qualified output of normalization. Every recognized settings
//! field carries a concrete value (or an explicit `null` for optional
//! fields without a default), at global scope and for every block a layer
//! mentions. Blocks nobody mentions read the global settings.
//!
//! A [`ResolvedConfig`] remembers the explicit [`ThemeLayer`]s it was built
//! from, which is what lets [`merge_themes`] re-layer a child theme over its
//! parent with the same precedence rules as block over global.
//!
//! ## Export
//!
//! [`ResolvedConfig::to_document`] writes the smallest document that
//! normalizes back to an equal configuration: only fields that differ from
//! what the defaults (and `appearanceTools`) would produce anyway.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use themejson_core::{CustomTemplate, DocumentHeader, FieldPath, Segment, TemplatePart};
use themejson_schema::{BlockRule, FieldKind, SchemaNode, SchemaRegistry};

use crate::merge::{apply_scope, deep_merge, implied_toggles, overlay, slug_of, ListPolicy};
use crate::normalize::ThemeLayer;

/// Effective settings of one block.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedBlock {
    /// Global settings overlaid with the block's own.
    pub settings: Value,
    /// False when every layer's entry for the block was empty, as for
    /// blocks that accept no settings.
    pub declares_overrides: bool,
}

/// A normalized theme configuration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    #[serde(flatten)]
    header: DocumentHeader,
    settings: Value,
    blocks: BTreeMap<String, ResolvedBlock>,
    styles: Value,
    custom_templates: Vec<CustomTemplate>,
    template_parts: Vec<TemplatePart>,
    patterns: Vec<String>,
    #[serde(skip)]
    layers: Vec<ThemeLayer>,
}

/// Layers are provenance, not content: two configurations that resolve to
/// the same values are equal however they were produced.
impl PartialEq for ResolvedConfig {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.settings == other.settings
            && self.blocks == other.blocks
            && self.styles == other.styles
            && self.custom_templates == other.custom_templates
            && self.template_parts == other.template_parts
            && self.patterns == other.patterns
    }
}

impl ResolvedConfig {
    /// Resolve `layers` in order, later layers winning.
    pub fn from_layers(
        header: DocumentHeader,
        layers: Vec<ThemeLayer>,
        registry: &SchemaRegistry,
    ) -> Self {
        let node = registry.block_settings_node();

        let mut global = object(registry.settings_defaults());
        for layer in &layers {
            apply_scope(
                &mut global,
                &layer.settings,
                node,
                BlockRule::Unrestricted,
                ListPolicy::Replace,
            );
        }

        let names: std::collections::BTreeSet<&String> =
            layers.iter().flat_map(|l| l.blocks.keys()).collect();
        let mut blocks = BTreeMap::new();
        for name in names {
            let rule = registry.block_rule(name);
            let mut settings = global.clone();
            let mut declares_overrides = false;
            for scope in layers.iter().filter_map(|l| l.block(name)) {
                declares_overrides |= !scope.is_empty();
                apply_scope(&mut settings, scope, node, rule, ListPolicy::Append);
            }
            tracing::debug!(block = %name, declares_overrides, "resolved block settings");
            blocks.insert(
                name.clone(),
                ResolvedBlock {
                    settings: Value::Object(settings),
                    declares_overrides,
                },
            );
        }

        let mut styles = Value::Object(Map::new());
        let mut custom_templates: Vec<CustomTemplate> = Vec::new();
        let mut template_parts: Vec<TemplatePart> = Vec::new();
        let mut patterns: Vec<String> = Vec::new();
        for layer in &layers {
            deep_merge(&mut styles, &Value::Object(layer.styles.clone()));
            for template in &layer.custom_templates {
                match custom_templates.iter_mut().find(|t| t.name == template.name) {
                    Some(existing) => *existing = template.clone(),
                    None => custom_templates.push(template.clone()),
                }
            }
            for part in &layer.template_parts {
                match template_parts.iter_mut().find(|p| p.name == part.name) {
                    Some(existing) => *existing = part.clone(),
                    None => template_parts.push(part.clone()),
                }
            }
            for pattern in &layer.patterns {
                if !patterns.contains(pattern) {
                    patterns.push(pattern.clone());
                }
            }
        }

        Self {
            header,
            settings: Value::Object(global),
            blocks,
            styles,
            custom_templates,
            template_parts,
            patterns,
            layers,
        }
    }

    /// Header of the outermost document (the child, after a merge).
    pub fn header(&self) -> &DocumentHeader {
        &self.header
    }

    /// Resolved global settings.
    pub fn settings(&self) -> &Value {
        &self.settings
    }

    /// Blocks mentioned by any layer, by name.
    pub fn blocks(&self) -> &BTreeMap<String, ResolvedBlock> {
        &self.blocks
    }

    /// The block entry for `name`, if any layer mentions it.
    pub fn block(&self, name: &str) -> Option<&ResolvedBlock> {
        self.blocks.get(name)
    }

    /// Effective settings for `name`; the global settings if no layer
    /// mentions the block.
    pub fn settings_for_block(&self, name: &str) -> &Value {
        self.blocks
            .get(name)
            .map_or(&self.settings, |block| &block.settings)
    }

    /// Styles of every layer, deep-merged.
    pub fn styles(&self) -> &Value {
        &self.styles
    }

    /// Custom templates by name; later layers replace earlier ones.
    pub fn custom_templates(&self) -> &[CustomTemplate] {
        &self.custom_templates
    }

    /// Template parts by name; later layers replace earlier ones.
    pub fn template_parts(&self) -> &[TemplatePart] {
        &self.template_parts
    }

    /// Pattern slugs of every layer, first occurrence kept.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// The explicit layers, outermost (parent) first.
    pub fn layers(&self) -> &[ThemeLayer] {
        &self.layers
    }

    /// Read a value by dotted path, e.g. `settings.color.text`,
    /// `settings.blocks.core/button.border.radius` or
    /// `styles.elements.link.color.text`. Array elements are addressed by
    /// index.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let path = FieldPath::parse_dotted(path);
        let (Segment::Key(root), rest) = path.segments().split_first()? else {
            return None;
        };
        let (start, rest) = match (root.as_str(), rest) {
            ("settings", [Segment::Key(blocks), Segment::Key(name), tail @ ..]) if blocks == "blocks" => {
                (self.settings_for_block(name), tail)
            }
            ("settings", rest) => (&self.settings, rest),
            ("styles", rest) => (&self.styles, rest),
            _ => return None,
        };
        rest.iter().try_fold(start, |value, segment| match (value, segment) {
            (Value::Object(map), Segment::Key(key)) => map.get(key),
            (Value::Object(map), Segment::Index(i)) => map.get(&i.to_string()),
            (Value::Array(items), Segment::Index(i)) => items.get(*i),
            _ => None,
        })
    }

    /// Write a document that normalizes back to this configuration.
    pub fn to_document(&self, registry: &SchemaRegistry) -> Value {
        let node = registry.block_settings_node();
        let global = object(self.settings.clone());

        let mut baseline = object(registry.settings_defaults());
        if let Some(implied) = implied_toggles(&global, BlockRule::Unrestricted) {
            overlay(&mut baseline, &implied, node, ListPolicy::Replace);
        }
        let mut settings = diff(&global, &baseline, node, ListPolicy::Replace);

        let mut blocks = Map::new();
        for (name, block) in &self.blocks {
            blocks.insert(name.clone(), Value::Object(self.export_block(name, block, registry)));
        }
        if !blocks.is_empty() {
            settings.insert("blocks".to_string(), Value::Object(blocks));
        }

        let mut doc = Map::new();
        if let Some(schema) = &self.header.schema {
            doc.insert("$schema".to_string(), Value::String(schema.clone()));
        }
        doc.insert("version".to_string(), Value::from(self.header.version));
        if !settings.is_empty() {
            doc.insert("settings".to_string(), Value::Object(settings));
        }
        if self.styles.as_object().is_some_and(|s| !s.is_empty()) {
            doc.insert("styles".to_string(), self.styles.clone());
        }
        if !self.custom_templates.is_empty() {
            doc.insert(
                "customTemplates".to_string(),
                serde_json::to_value(&self.custom_templates).unwrap_or(Value::Null),
            );
        }
        if !self.template_parts.is_empty() {
            doc.insert(
                "templateParts".to_string(),
                serde_json::to_value(&self.template_parts).unwrap_or(Value::Null),
            );
        }
        if !self.patterns.is_empty() {
            doc.insert("patterns".to_string(), Value::from(self.patterns.clone()));
        }
        Value::Object(doc)
    }

    /// A declaring block exports its `appearanceTools` value and whatever
    /// differs from what the global settings plus that value produce.
    fn export_block(
        &self,
        name: &str,
        block: &ResolvedBlock,
        registry: &SchemaRegistry,
    ) -> Map<String, Value> {
        if !block.declares_overrides {
            return Map::new();
        }
        let node = registry.block_settings_node();
        let rule = registry.block_rule(name);
        let resolved = object(block.settings.clone());

        let mut exported = Map::new();
        let appearance_tools = resolved
            .get("appearanceTools")
            .cloned()
            .unwrap_or(Value::Bool(false));
        exported.insert("appearanceTools".to_string(), appearance_tools);

        let mut baseline = object(self.settings.clone());
        if let Some(implied) = implied_toggles(&exported, rule) {
            overlay(&mut baseline, &implied, node, ListPolicy::Append);
        }
        for (key, value) in diff(&resolved, &baseline, node, ListPolicy::Append) {
            if key != "appearanceTools" && rule.allows(&[key.as_str()]) {
                exported.insert(key, value);
            }
        }
        exported
    }
}

/// Re-resolve `child` over `parent`: defaults, parent global, child global,
/// parent block, child block. Styles merge child over parent, templates
/// are replaced by name and patterns are unioned.
pub fn merge_themes(
    registry: &SchemaRegistry,
    parent: &ResolvedConfig,
    child: &ResolvedConfig,
) -> ResolvedConfig {
    let layers = parent
        .layers
        .iter()
        .chain(child.layers.iter())
        .cloned()
        .collect();
    ResolvedConfig::from_layers(child.header.clone(), layers, registry)
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Members of `resolved` that overlaying onto `baseline` must supply.
fn diff(
    resolved: &Map<String, Value>,
    baseline: &Map<String, Value>,
    node: &SchemaNode,
    lists: ListPolicy,
) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, value) in resolved {
        let base = baseline.get(key);
        if base == Some(value) {
            continue;
        }
        let child = node.child(key);
        match (child, value, base) {
            (Some(child), Value::Object(r), Some(Value::Object(b)))
                if child.kind() == FieldKind::Object =>
            {
                let nested = diff(r, b, child, lists);
                if !nested.is_empty() {
                    out.insert(key.clone(), Value::Object(nested));
                }
            }
            (Some(child), Value::Array(r), Some(Value::Array(b)))
                if lists == ListPolicy::Append && child.spec().preset.is_some() =>
            {
                let added: Vec<Value> = r
                    .iter()
                    .filter(|item| {
                        slug_of(item).map_or(true, |slug| !b.iter().any(|i| slug_of(i) == Some(slug)))
                    })
                    .cloned()
                    .collect();
                if !added.is_empty() {
                    out.insert(key.clone(), Value::Array(added));
                }
            }
            (_, Value::Null, _) => {}
            _ => {
                out.insert(key.clone(), value.clone());
            }
        }
    }
    out
}
