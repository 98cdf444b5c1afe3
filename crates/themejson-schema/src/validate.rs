//! # Document Validation
//!
//! Checks a parsed theme configuration document against the
//! [`SchemaRegistry`] and collects every violation as a [`Diagnostic`].
//! Validation never stops at the first problem.
//!
//! ## Pass Order
//!
//! Diagnostics come out in a fixed order so two runs over the same document
//! produce identical reports:
//!
//! 1. Header: `version` must equal [`SUPPORTED_VERSION`] (fatal otherwise).
//! 2. Pre-order traversal of the document, in member order. At each node:
//!    unknown keys, kind checks, enum/range/slug checks, missing required
//!    members. Block identifiers and block rules are checked as the
//!    traversal enters `settings.blocks` and `styles.blocks`.
//! 3. Slug uniqueness within each preset list, and across the global and
//!    block lists that make up one block's effective list.
//! 4. Style properties set while the governing settings toggle is
//!    explicitly `false` at the nearest enclosing scope. A scope with
//!    `appearanceTools: true` declares every toggle of that bundle `true`
//!    unless it sets the toggle itself.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use themejson_core::{
    BlockName, Diagnostic, DiagnosticKind, Diagnostics, FieldPath, PresetCategory, Severity,
    SUPPORTED_VERSION,
};

use crate::blocks::{block_rule, BlockRule};
use crate::registry::{FieldKind, SchemaNode, SchemaRegistry, APPEARANCE_TOOLS};

/// How style properties that conflict with disabled settings are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationMode {
    /// Conflicts are warnings; the offending style property is ignored.
    #[default]
    Lenient,
    /// Conflicts are errors and block normalization.
    Strict,
}

/// Block context carried through the traversal of `settings.blocks.<name>`.
struct BlockScope {
    rule: BlockRule,
    name: String,
    /// Number of path segments up to and including the block name.
    depth: usize,
}

/// Checks documents against a registry.
#[derive(Debug, Clone, Copy)]
pub struct Validator<'r> {
    registry: &'r SchemaRegistry,
    mode: ValidationMode,
}

impl<'r> Validator<'r> {
    /// Create a validator.
    pub fn new(registry: &'r SchemaRegistry, mode: ValidationMode) -> Self {
        Self { registry, mode }
    }

    /// The mode this validator runs in.
    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Validate a whole document.
    ///
    /// Returns every diagnostic found, in pass order. An empty result means
    /// the document is clean.
    pub fn validate(&self, doc: &Value) -> Diagnostics {
        let mut out = Diagnostics::new();

        self.check_header(doc, &mut out);
        if let Some(root) = doc.as_object() {
            self.walk_object(root, self.registry.root(), &FieldPath::root(), None, &mut out);
            self.check_duplicate_slugs(root, &mut out);
            self.check_disabled_features(root, &mut out);
        }

        tracing::debug!(
            diagnostics = out.len(),
            fatal = out.has_fatal(),
            "validation complete"
        );
        out
    }

    // -- pass 1 ------------------------------------------------------------

    fn check_header(&self, doc: &Value, out: &mut Diagnostics) {
        let expected = format!("version {SUPPORTED_VERSION}");
        match doc {
            Value::Object(root) => match root.get("version") {
                Some(v) if v.as_u64() == Some(SUPPORTED_VERSION) => {}
                Some(v) => out.push(Diagnostic::new(
                    DiagnosticKind::FatalSchema,
                    FieldPath::root().key("version"),
                    expected,
                    Some(v.clone()),
                )),
                None => out.push(Diagnostic::new(
                    DiagnosticKind::FatalSchema,
                    FieldPath::root().key("version"),
                    expected,
                    None,
                )),
            },
            other => out.push(Diagnostic::new(
                DiagnosticKind::FatalSchema,
                FieldPath::root(),
                "a JSON object",
                Some(other.clone()),
            )),
        }
    }

    // -- pass 2 ------------------------------------------------------------

    fn walk(
        &self,
        value: &Value,
        node: &SchemaNode,
        path: &FieldPath,
        block: Option<&BlockScope>,
        out: &mut Diagnostics,
    ) {
        let kind = node.kind();
        if value.is_null() && node.accepts_null() {
            return;
        }

        match (kind, value) {
            (FieldKind::Object, Value::Object(map))
            | (FieldKind::FalseOrObject, Value::Object(map))
            | (FieldKind::StringOrObject, Value::Object(map)) => {
                self.walk_object(map, node, path, block, out);
            }
            (FieldKind::List, Value::Array(items)) => {
                if let Some(item) = node.item() {
                    for (i, v) in items.iter().enumerate() {
                        self.walk(v, item, &path.index(i), block, out);
                    }
                }
            }
            (FieldKind::Map, Value::Object(map)) | (FieldKind::CustomValue, Value::Object(map)) => {
                let entry = node.entry().unwrap_or(node);
                for (k, v) in map {
                    self.walk(v, entry, &path.key(k), block, out);
                }
            }
            (FieldKind::BlockMap { settings }, Value::Object(map)) => {
                self.walk_blocks(map, node, path, settings, out);
            }
            (FieldKind::StringList, Value::Array(items))
            | (FieldKind::StringOrList, Value::Array(items)) => {
                for (i, v) in items.iter().enumerate() {
                    if !v.is_string() {
                        out.push(Diagnostic::new(
                            DiagnosticKind::FieldType,
                            path.index(i),
                            "string",
                            Some(v.clone()),
                        ));
                    }
                }
            }
            _ if kind.admits(value) => {}
            _ => out.push(self.kind_violation(kind, value, path)),
        }
    }

    fn kind_violation(&self, kind: FieldKind, value: &Value, path: &FieldPath) -> Diagnostic {
        let diagnostic_kind = match (kind, value) {
            (FieldKind::Enum(_), Value::String(_)) => DiagnosticKind::EnumViolation,
            (FieldKind::Slug, Value::String(_)) => DiagnosticKind::InvalidSlug,
            (FieldKind::PositiveNumber, Value::Number(_)) => DiagnosticKind::RangeViolation,
            (FieldKind::PositiveInteger { .. }, Value::Number(n))
                if n.as_f64().is_some_and(|f| f.fract() == 0.0) =>
            {
                DiagnosticKind::RangeViolation
            }
            _ => DiagnosticKind::FieldType,
        };
        Diagnostic::new(diagnostic_kind, path.clone(), kind.to_string(), Some(value.clone()))
    }

    fn walk_object(
        &self,
        map: &Map<String, Value>,
        node: &SchemaNode,
        path: &FieldPath,
        block: Option<&BlockScope>,
        out: &mut Diagnostics,
    ) {
        for (key, value) in map {
            // The header pass owns `version`.
            if path.is_root() && key == "version" {
                continue;
            }
            let child_path = path.key(key);
            let Some(child) = node.child(key) else {
                out.push(Diagnostic::new(
                    DiagnosticKind::UnknownField,
                    child_path,
                    "a recognized key",
                    Some(value.clone()),
                ));
                continue;
            };
            if let Some(scope) = block {
                let relative: Vec<&str> = child_path.keys().skip(scope.depth).collect();
                if !scope.rule.allows(&relative) {
                    out.push(Diagnostic::new(
                        DiagnosticKind::UnknownField,
                        child_path,
                        format!("a settings key accepted by block '{}'", scope.name),
                        Some(value.clone()),
                    ));
                    continue;
                }
            }
            self.walk(value, child, &child_path, block, out);
        }

        for (key, child) in node.children() {
            if child.spec().required && !map.contains_key(key) && !(path.is_root() && key == "version") {
                out.push(Diagnostic::new(
                    DiagnosticKind::MissingField,
                    path.key(key),
                    child.kind().to_string(),
                    None,
                ));
            }
        }
    }

    fn walk_blocks(
        &self,
        map: &Map<String, Value>,
        node: &SchemaNode,
        path: &FieldPath,
        settings: bool,
        out: &mut Diagnostics,
    ) {
        let Some(entry) = node.entry() else {
            return;
        };
        for (name, value) in map {
            let block_path = path.key(name);
            let Ok(block_name) = BlockName::new(name.as_str()) else {
                out.push(Diagnostic::new(
                    DiagnosticKind::FieldType,
                    block_path,
                    "block name of the form 'namespace/name'",
                    Some(Value::String(name.clone())),
                ));
                continue;
            };
            if block_name.is_core() && !self.registry.is_known_block(name) {
                out.push(Diagnostic::new(
                    DiagnosticKind::UnknownBlock,
                    block_path.clone(),
                    "a known core block",
                    Some(Value::String(name.clone())),
                ));
            }
            if settings {
                let scope = BlockScope {
                    rule: self.registry.block_rule(name),
                    name: name.clone(),
                    depth: block_path.keys().count(),
                };
                self.walk(value, entry, &block_path, Some(&scope), out);
            } else {
                self.walk(value, entry, &block_path, None, out);
            }
        }
    }

    // -- pass 3 ------------------------------------------------------------

    fn check_duplicate_slugs(&self, root: &Map<String, Value>, out: &mut Diagnostics) {
        let Some(settings) = root.get("settings").and_then(Value::as_object) else {
            return;
        };
        let settings_path = FieldPath::root().key("settings");
        let blocks = settings.get("blocks").and_then(Value::as_object);

        for category in PresetCategory::all() {
            let (section, key) = category.settings_location();
            let Some(item) = self
                .registry
                .node(&["settings", section, key])
                .and_then(SchemaNode::item)
            else {
                continue;
            };
            let global_path = settings_path.key(section).key(key);
            let global = preset_slugs(settings, section, key, item);

            let mut seen = HashSet::new();
            for (i, slug) in &global {
                if !seen.insert(*slug) {
                    out.push(duplicate_slug(&global_path, *i, slug));
                }
            }

            let Some(blocks) = blocks else {
                continue;
            };
            for (name, block) in blocks {
                let Some(block) = block.as_object() else {
                    continue;
                };
                // Lists normalization leaves out entirely cannot collide.
                if BlockName::new(name.as_str()).is_err()
                    || !self.registry.block_rule(name).allows(&[section, key])
                {
                    continue;
                }
                let block_path = settings_path.key("blocks").key(name).key(section).key(key);
                let mut effective: HashSet<&str> = global.iter().map(|(_, s)| *s).collect();
                for (i, slug) in preset_slugs(block, section, key, item) {
                    if !effective.insert(slug) {
                        out.push(duplicate_slug(&block_path, i, slug));
                    }
                }
            }
        }
    }

    // -- pass 4 ------------------------------------------------------------

    fn check_disabled_features(&self, root: &Map<String, Value>, out: &mut Diagnostics) {
        let Some(styles) = root.get("styles").and_then(Value::as_object) else {
            return;
        };
        let settings = root.get("settings").and_then(Value::as_object);
        let styles_path = FieldPath::root().key("styles");
        let ctx = ToggleContext {
            settings,
            severity: match self.mode {
                ValidationMode::Lenient => Severity::Warning,
                ValidationMode::Strict => Severity::Error,
            },
        };

        ctx.check_style_node(styles, &styles_path, None, false, out);
        ctx.check_elements(styles, &styles_path, None, out);

        if let Some(blocks) = styles.get("blocks").and_then(Value::as_object) {
            for (name, block) in blocks {
                let Some(block) = block.as_object() else {
                    continue;
                };
                let block_path = styles_path.key("blocks").key(name);
                ctx.check_style_node(block, &block_path, Some(name.as_str()), false, out);
                ctx.check_elements(block, &block_path, Some(name.as_str()), out);
            }
        }
    }
}

/// Slugs of the items in `settings.<section>.<key>` that normalization
/// keeps, with their positions.
fn preset_slugs<'a>(
    settings: &'a Map<String, Value>,
    section: &str,
    key: &str,
    item_node: &SchemaNode,
) -> Vec<(usize, &'a str)> {
    settings
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .enumerate()
                .filter(|(_, item)| item_survives(item, item_node))
                .filter_map(|(i, item)| item.get("slug").and_then(Value::as_str).map(|s| (i, s)))
                .collect()
        })
        .unwrap_or_default()
}

/// Whether a list item keeps every required member through normalization.
fn item_survives(item: &Value, item_node: &SchemaNode) -> bool {
    let Some(item) = item.as_object() else {
        return false;
    };
    item_node
        .children()
        .filter(|(_, child)| child.spec().required)
        .all(|(name, child)| match (child.kind(), item.get(name)) {
            (_, None | Some(Value::Null)) => false,
            (FieldKind::StringList, Some(value)) => value.is_array(),
            (FieldKind::StringOrList, Some(value)) => value.is_array() || value.is_string(),
            (kind, Some(value)) => kind.admits(value),
        })
}

fn duplicate_slug(list_path: &FieldPath, index: usize, slug: &str) -> Diagnostic {
    Diagnostic::new(
        DiagnosticKind::DuplicateSlug,
        list_path.index(index).key("slug"),
        "a slug unique within the effective preset list",
        Some(Value::String(slug.to_string())),
    )
}

/// A style property and the settings that govern it.
struct StyleRule {
    style: &'static [&'static str],
    /// Toggle that enables the property at all.
    toggle: Option<&'static [&'static str]>,
    /// Toggle that enables free-form (non-preset) values.
    custom: Option<&'static [&'static str]>,
}

const fn rule(
    style: &'static [&'static str],
    toggle: Option<&'static [&'static str]>,
    custom: Option<&'static [&'static str]>,
) -> StyleRule {
    StyleRule {
        style,
        toggle,
        custom,
    }
}

const COLOR_CUSTOM: Option<&[&str]> = Some(&["color", "custom"]);

const STYLE_RULES: &[StyleRule] = &[
    rule(&["color", "text"], Some(&["color", "text"]), COLOR_CUSTOM),
    rule(&["color", "background"], Some(&["color", "background"]), COLOR_CUSTOM),
    rule(
        &["color", "gradient"],
        Some(&["color", "background"]),
        Some(&["color", "customGradient"]),
    ),
    rule(&["border", "color"], Some(&["border", "color"]), None),
    rule(&["border", "radius"], Some(&["border", "radius"]), None),
    rule(&["border", "style"], Some(&["border", "style"]), None),
    rule(&["border", "width"], Some(&["border", "width"]), None),
    rule(&["border", "top", "color"], Some(&["border", "color"]), None),
    rule(&["border", "top", "style"], Some(&["border", "style"]), None),
    rule(&["border", "top", "width"], Some(&["border", "width"]), None),
    rule(&["border", "right", "color"], Some(&["border", "color"]), None),
    rule(&["border", "right", "style"], Some(&["border", "style"]), None),
    rule(&["border", "right", "width"], Some(&["border", "width"]), None),
    rule(&["border", "bottom", "color"], Some(&["border", "color"]), None),
    rule(&["border", "bottom", "style"], Some(&["border", "style"]), None),
    rule(&["border", "bottom", "width"], Some(&["border", "width"]), None),
    rule(&["border", "left", "color"], Some(&["border", "color"]), None),
    rule(&["border", "left", "style"], Some(&["border", "style"]), None),
    rule(&["border", "left", "width"], Some(&["border", "width"]), None),
    rule(&["spacing", "blockGap"], Some(&["spacing", "blockGap"]), None),
    rule(&["spacing", "margin"], Some(&["spacing", "margin"]), None),
    rule(&["spacing", "padding"], Some(&["spacing", "padding"]), None),
    rule(&["typography", "fontSize"], None, Some(&["typography", "customFontSize"])),
    rule(&["typography", "fontStyle"], Some(&["typography", "fontStyle"]), None),
    rule(&["typography", "fontWeight"], Some(&["typography", "fontWeight"]), None),
    rule(&["typography", "letterSpacing"], Some(&["typography", "letterSpacing"]), None),
    rule(&["typography", "lineHeight"], Some(&["typography", "lineHeight"]), None),
    rule(&["typography", "textDecoration"], Some(&["typography", "textDecoration"]), None),
    rule(&["typography", "textTransform"], Some(&["typography", "textTransform"]), None),
    rule(&["filter", "duotone"], None, Some(&["color", "customDuotone"])),
];

/// Text color on links is governed by `color.link`, not `color.text`.
const LINK_TEXT_RULE: StyleRule = rule(&["color", "text"], Some(&["color", "link"]), COLOR_CUSTOM);

/// Returns true for values that reference a preset rather than a free-form value.
pub fn is_preset_reference(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.starts_with("var:preset|") || s.contains("var(--wp--preset--"))
}

fn member_at<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    let (first, rest) = keys.split_first()?;
    rest.iter().try_fold(map.get(*first)?, |v, k| v.get(*k))
}

/// A toggle declared in one settings scope, directly or through
/// `appearanceTools`. Keys the scope may not declare are ignored.
fn declared_toggle(scope: &Map<String, Value>, toggle: &[&str], rule: BlockRule) -> Option<bool> {
    if !rule.allows(toggle) {
        return None;
    }
    if let Some(value) = member_at(scope, toggle).and_then(Value::as_bool) {
        return Some(value);
    }
    let bundled = APPEARANCE_TOOLS
        .iter()
        .any(|path| path.split('.').eq(toggle.iter().copied()));
    (bundled && scope.get("appearanceTools") == Some(&Value::Bool(true))).then_some(true)
}

struct ToggleContext<'d> {
    settings: Option<&'d Map<String, Value>>,
    severity: Severity,
}

impl ToggleContext<'_> {
    /// The toggle as declared at the nearest scope, if any scope declares it.
    fn explicit(&self, block: Option<&str>, toggle: &[&str]) -> Option<bool> {
        let settings = self.settings?;
        let block_scope = block.and_then(|name| {
            let scope = settings.get("blocks")?.get(name)?.as_object()?;
            Some((scope, block_rule(name)))
        });
        block_scope
            .and_then(|(scope, rule)| declared_toggle(scope, toggle, rule))
            .or_else(|| declared_toggle(settings, toggle, BlockRule::Unrestricted))
    }

    fn check_style_node(
        &self,
        node: &Map<String, Value>,
        path: &FieldPath,
        block: Option<&str>,
        link: bool,
        out: &mut Diagnostics,
    ) {
        for style_rule in STYLE_RULES {
            let style_rule = if link && style_rule.style == ["color", "text"] {
                &LINK_TEXT_RULE
            } else {
                style_rule
            };
            let Some(value) = member_at(node, style_rule.style).filter(|v| !v.is_null()) else {
                continue;
            };

            let disabled_by = style_rule
                .toggle
                .filter(|t| self.explicit(block, t) == Some(false))
                .or_else(|| {
                    style_rule.custom.filter(|t| {
                        !is_preset_reference(value) && self.explicit(block, t) == Some(false)
                    })
                });
            if let Some(toggle) = disabled_by {
                let style_path = style_rule
                    .style
                    .iter()
                    .fold(path.clone(), |p, k| p.key(*k));
                out.push(
                    Diagnostic::new(
                        DiagnosticKind::DisabledFeature,
                        style_path,
                        format!("settings.{} enabled", toggle.join(".")),
                        Some(value.clone()),
                    )
                    .with_severity(self.severity),
                );
            }
        }
    }

    fn check_elements(
        &self,
        node: &Map<String, Value>,
        path: &FieldPath,
        block: Option<&str>,
        out: &mut Diagnostics,
    ) {
        let Some(elements) = node.get("elements").and_then(Value::as_object) else {
            return;
        };
        let elements_path = path.key("elements");
        for (name, element) in elements {
            let Some(element) = element.as_object() else {
                continue;
            };
            let link = name == "link";
            let element_path = elements_path.key(name);
            self.check_style_node(element, &element_path, block, link, out);
            if link {
                for (pseudo, state) in element {
                    if let Some(state) = state.as_object().filter(|_| pseudo.starts_with(':')) {
                        self.check_style_node(state, &element_path.key(pseudo), block, true, out);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{registry, MAX_SCALE_STEPS};
    use serde_json::json;

    fn validate(doc: Value) -> Diagnostics {
        Validator::new(registry(), ValidationMode::Lenient).validate(&doc)
    }

    fn kinds(diagnostics: &Diagnostics) -> Vec<DiagnosticKind> {
        diagnostics.iter().map(|d| d.kind).collect()
    }

    #[test]
    fn clean_document_has_no_diagnostics() {
        let diagnostics = validate(json!({
            "$schema": "https://schemas.wp.org/trunk/theme.json",
            "version": 2,
            "settings": {
                "appearanceTools": true,
                "color": {
                    "palette": [
                        {"name": "Primary", "slug": "primary", "color": "#0b57d0"},
                        {"name": "Contrast", "slug": "contrast", "color": "#111"}
                    ]
                },
                "layout": {"contentSize": "650px", "wideSize": "1200px"},
                "blocks": {
                    "core/button": {"border": {"radius": true}},
                    "acme/hero": {"color": {"text": false}}
                }
            },
            "styles": {
                "color": {"text": "var:preset|color|contrast"},
                "elements": {"link": {":hover": {"color": {"text": "#f00"}}}}
            },
            "templateParts": [{"name": "header", "area": "header"}],
            "patterns": ["short-text-surrounded-by-round-images"]
        }));
        assert!(diagnostics.is_empty(), "unexpected diagnostics:\n{diagnostics}");
    }

    #[test]
    fn unsupported_version_is_fatal_and_others_still_collected() {
        let diagnostics = validate(json!({
            "version": 1,
            "settings": {"typography": {"customFontSize": "yes"}}
        }));
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::FatalSchema, DiagnosticKind::FieldType]
        );
        assert!(diagnostics.has_fatal());
    }

    #[test]
    fn missing_version_is_fatal() {
        let diagnostics = validate(json!({"settings": {}}));
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::FatalSchema]);
        assert_eq!(diagnostics.iter().next().unwrap().actual, None);
    }

    #[test]
    fn non_object_document_is_fatal() {
        let diagnostics = validate(json!([1, 2, 3]));
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::FatalSchema]);
    }

    #[test]
    fn unknown_keys_at_every_level() {
        let diagnostics = validate(json!({
            "version": 2,
            "flavour": "vanilla",
            "settings": {"color": {"sparkle": true}},
            "styles": {"elements": {"marquee": {}}}
        }));
        let paths: Vec<String> = diagnostics.iter().map(|d| d.path.to_string()).collect();
        assert_eq!(
            paths,
            vec!["/flavour", "/settings/color/sparkle", "/styles/elements/marquee"]
        );
        assert!(diagnostics.iter().all(|d| d.kind == DiagnosticKind::UnknownField));
        assert!(diagnostics.iter().all(|d| d.severity == Severity::Warning));
    }

    #[test]
    fn enum_and_range_checks() {
        let diagnostics = validate(json!({
            "version": 2,
            "settings": {
                "spacing": {
                    "spacingScale": {"operator": "-", "unit": "pt", "steps": 0, "increment": -1}
                },
                "typography": {
                    "fontFamilies": [{
                        "slug": "body",
                        "fontFamily": "Inter",
                        "fontFace": [{"fontFamily": "Inter", "src": "inter.woff2", "fontDisplay": "optional"}]
                    }]
                }
            }
        }));
        assert_eq!(
            kinds(&diagnostics),
            vec![
                DiagnosticKind::EnumViolation,
                DiagnosticKind::EnumViolation,
                DiagnosticKind::RangeViolation,
                DiagnosticKind::RangeViolation,
                DiagnosticKind::EnumViolation,
            ]
        );
    }

    #[test]
    fn scale_steps_are_bounded() {
        for steps in [json!(101), json!(4_294_967_296u64)] {
            let diagnostics = validate(json!({
                "version": 2,
                "settings": {"spacing": {"spacingScale": {"steps": steps}}}
            }));
            assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::RangeViolation], "{steps}");
            let diagnostic = diagnostics.iter().next().unwrap();
            assert_eq!(diagnostic.path.to_string(), "/settings/spacing/spacingScale/steps");
            assert_eq!(diagnostic.severity, Severity::Error);
        }

        let at_limit = validate(json!({
            "version": 2,
            "settings": {"spacing": {"spacingScale": {"steps": MAX_SCALE_STEPS}}}
        }));
        assert!(at_limit.is_empty(), "{at_limit}");
    }

    #[test]
    fn font_size_must_be_a_length() {
        let diagnostics = validate(json!({
            "version": 2,
            "settings": {"typography": {"fontSizes": [
                {"slug": "small", "size": "big"},
                {"slug": "medium", "size": 16},
                {"slug": "large", "size": "clamp(1.5rem, 3vw, 2rem)"}
            ]}}
        }));
        assert_eq!(diagnostics.count(DiagnosticKind::FieldType), 2);
        assert_eq!(
            diagnostics.iter().next().unwrap().path.to_string(),
            "/settings/typography/fontSizes/0/size"
        );
    }

    #[test]
    fn missing_required_and_invalid_slug() {
        let diagnostics = validate(json!({
            "version": 2,
            "settings": {"color": {"palette": [{"name": "Primary", "slug": "Primary Blue"}]}}
        }));
        assert_eq!(
            kinds(&diagnostics),
            vec![DiagnosticKind::InvalidSlug, DiagnosticKind::MissingField]
        );
        let missing = diagnostics.of_kind(DiagnosticKind::MissingField).next().unwrap();
        assert_eq!(missing.path.to_string(), "/settings/color/palette/0/color");
    }

    #[test]
    fn duplicate_slug_reported_once() {
        let diagnostics = validate(json!({
            "version": 2,
            "settings": {"color": {"palette": [
                {"name": "Primary", "slug": "primary", "color": "#000"},
                {"name": "Primary again", "slug": "primary", "color": "#fff"}
            ]}}
        }));
        assert_eq!(diagnostics.count(DiagnosticKind::DuplicateSlug), 1);
        assert_eq!(
            diagnostics.iter().next().unwrap().path.to_string(),
            "/settings/color/palette/1/slug"
        );
    }

    #[test]
    fn duplicate_slug_across_block_and_global() {
        let diagnostics = validate(json!({
            "version": 2,
            "settings": {
                "color": {"palette": [{"name": "Primary", "slug": "primary", "color": "#000"}]},
                "blocks": {"core/group": {"color": {"palette": [
                    {"name": "Accent", "slug": "accent", "color": "#0f0"},
                    {"name": "Primary", "slug": "primary", "color": "#f00"}
                ]}}}
            }
        }));
        let dupes: Vec<String> = diagnostics
            .of_kind(DiagnosticKind::DuplicateSlug)
            .map(|d| d.path.to_string())
            .collect();
        assert_eq!(dupes, vec!["/settings/blocks/core~1group/color/palette/1/slug"]);
    }

    #[test]
    fn duplicates_ignore_items_dropped_for_missing_members() {
        let diagnostics = validate(json!({
            "version": 2,
            "settings": {
                "color": {"palette": [
                    {"name": "Primary", "slug": "primary"},
                    {"name": "Primary", "slug": "primary", "color": "#000"}
                ]},
                "blocks": {"core/group": {"color": {"palette": [
                    {"slug": "accent", "color": "#0f0"},
                    {"name": "Accent", "slug": "accent", "color": "#f00"}
                ]}}}
            }
        }));
        assert_eq!(diagnostics.count(DiagnosticKind::DuplicateSlug), 0);
        let mut missing: Vec<String> = diagnostics
            .of_kind(DiagnosticKind::MissingField)
            .map(|d| d.path.to_string())
            .collect();
        missing.sort();
        assert_eq!(
            missing,
            vec![
                "/settings/blocks/core~1group/color/palette/0/name",
                "/settings/color/palette/0/color",
            ]
        );
    }

    #[test]
    fn block_rules_and_names() {
        let diagnostics = validate(json!({
            "version": 2,
            "settings": {"blocks": {
                "core/archives": {"color": {"text": false}},
                "core/button": {"border": {"radius": true, "color": true}},
                "core/sparkles": {},
                "not-a-block": {}
            }}
        }));
        let summary: Vec<(DiagnosticKind, String)> = diagnostics
            .iter()
            .map(|d| (d.kind, d.path.to_string()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (DiagnosticKind::UnknownField, "/settings/blocks/core~1archives/color".into()),
                (DiagnosticKind::UnknownField, "/settings/blocks/core~1button/border/color".into()),
                (DiagnosticKind::UnknownBlock, "/settings/blocks/core~1sparkles".into()),
                (DiagnosticKind::FieldType, "/settings/blocks/not-a-block".into()),
            ]
        );
    }

    #[test]
    fn disabled_feature_warning_in_lenient_mode() {
        let doc = json!({
            "version": 2,
            "settings": {
                "color": {"custom": false},
                "blocks": {"core/quote": {"border": {"color": false}}}
            },
            "styles": {
                "color": {"text": "#333", "background": "var:preset|color|base"},
                "blocks": {"core/quote": {"border": {"left": {"color": "#000"}}}}
            }
        });
        let diagnostics = validate(doc.clone());
        let disabled: Vec<String> = diagnostics
            .of_kind(DiagnosticKind::DisabledFeature)
            .map(|d| d.path.to_string())
            .collect();
        assert_eq!(
            disabled,
            vec!["/styles/color/text", "/styles/blocks/core~1quote/border/left/color"]
        );
        assert!(diagnostics
            .of_kind(DiagnosticKind::DisabledFeature)
            .all(|d| d.severity == Severity::Warning));

        let strict = Validator::new(registry(), ValidationMode::Strict).validate(&doc);
        assert!(strict
            .of_kind(DiagnosticKind::DisabledFeature)
            .all(|d| d.severity == Severity::Error));
    }

    #[test]
    fn default_false_toggle_is_not_explicit() {
        // border.color defaults to false, but only an explicit false is a conflict.
        let diagnostics = validate(json!({
            "version": 2,
            "styles": {"border": {"color": "#000"}}
        }));
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn block_toggle_overrides_global_for_conflicts() {
        let diagnostics = validate(json!({
            "version": 2,
            "settings": {
                "typography": {"lineHeight": false},
                "blocks": {"core/paragraph": {"typography": {"lineHeight": true}}}
            },
            "styles": {"blocks": {
                "core/paragraph": {"typography": {"lineHeight": "1.6"}},
                "core/heading": {"typography": {"lineHeight": "1.1"}}
            }}
        }));
        let disabled: Vec<String> = diagnostics
            .of_kind(DiagnosticKind::DisabledFeature)
            .map(|d| d.path.to_string())
            .collect();
        assert_eq!(disabled, vec!["/styles/blocks/core~1heading/typography/lineHeight"]);
    }

    #[test]
    fn link_color_governed_by_link_toggle() {
        let diagnostics = validate(json!({
            "version": 2,
            "settings": {"color": {"link": false}},
            "styles": {"elements": {"link": {
                "color": {"text": "#00f"},
                ":hover": {"color": {"text": "#f00"}}
            }}}
        }));
        assert_eq!(diagnostics.count(DiagnosticKind::DisabledFeature), 2);
    }

    #[test]
    fn block_appearance_tools_enables_bundle() {
        let diagnostics = validate(json!({
            "version": 2,
            "settings": {
                "border": {"color": false},
                "blocks": {
                    "core/group": {"appearanceTools": true},
                    "core/button": {"appearanceTools": true}
                }
            },
            "styles": {"blocks": {
                "core/group": {"border": {"color": "#000"}},
                "core/button": {"border": {"color": "#000"}}
            }}
        }));
        // core/button may not declare border.color, so the global false applies.
        let disabled: Vec<String> = diagnostics
            .of_kind(DiagnosticKind::DisabledFeature)
            .map(|d| d.path.to_string())
            .collect();
        assert_eq!(disabled, vec!["/styles/blocks/core~1button/border/color"]);
    }

    #[test]
    fn null_accepted_for_optional_fields() {
        let diagnostics = validate(json!({
            "version": 2,
            "settings": {
                "layout": {"contentSize": null},
                "spacing": {"blockGap": null}
            }
        }));
        assert!(diagnostics.is_empty(), "{diagnostics}");
    }

    #[test]
    fn custom_values_reject_booleans() {
        let diagnostics = validate(json!({
            "version": 2,
            "settings": {"custom": {"spacing": {"gutter": "1rem", "wide": true}, "ratio": 1.5}}
        }));
        assert_eq!(kinds(&diagnostics), vec![DiagnosticKind::FieldType]);
        assert_eq!(
            diagnostics.iter().next().unwrap().path.to_string(),
            "/settings/custom/spacing/wide"
        );
    }

    #[test]
    fn ordering_is_deterministic() {
        let doc = json!({
            "version": 3,
            "settings": {
                "color": {"palette": [
                    {"name": "A", "slug": "a", "color": "#000"},
                    {"name": "B", "slug": "a", "color": "#111"}
                ], "text": "no"},
                "border": {"shine": true}
            },
            "styles": {}
        });
        let first = validate(doc.clone());
        let second = validate(doc);
        assert_eq!(first, second);
        assert_eq!(
            kinds(&first),
            vec![
                DiagnosticKind::FatalSchema,
                DiagnosticKind::FieldType,
                DiagnosticKind::UnknownField,
                DiagnosticKind::DuplicateSlug,
            ]
        );
    }
}
