//! # Schema Registry
//!
//! The static definition of every recognized field of a theme configuration
//! document: its kind, its default, whether it is required, and (for
//! block-scoped paths) whether a given block may declare it at all.
//!
//! The registry is a tree of [`SchemaNode`]s rooted at the document. It
//! covers the two nested namespaces (`settings.*`, `styles.*`) and the side
//! namespace of list-shaped members (`customTemplates`, `templateParts`,
//! `patterns`). It is built once, on first use, and is read-only afterwards;
//! concurrent readers need no locking.
//!
//! ## Lookup
//!
//! Keys are matched against object children. Below a list, any key (an
//! index, or `[]`) selects the item shape. Below a map (`custom`,
//! `settings.blocks`, `styles.blocks`), any key selects the entry shape.

use std::fmt;
use std::sync::OnceLock;

use serde_json::{json, Map, Value};
use thiserror::Error;

use themejson_core::{css, identity::is_kebab_case, PresetCategory};

use crate::blocks::{block_rule, is_known_core_block, BlockRule};

/// Allowed `fontDisplay` values.
pub const FONT_DISPLAY_VALUES: &[&str] = &["auto", "block", "fallback", "swap"];

/// Allowed `spacingScale.operator` values.
pub const SCALE_OPERATORS: &[&str] = &["+", "*"];

/// Allowed `spacingScale.unit` values.
pub const SCALE_UNITS: &[&str] = &["px", "em", "rem", "vh", "vw", "%"];

/// Largest accepted `spacingScale.steps`. Every step becomes a preset.
pub const MAX_SCALE_STEPS: u64 = 100;

/// Toggles switched on by `appearanceTools: true`, as dotted settings paths.
pub const APPEARANCE_TOOLS: &[&str] = &[
    "border.color",
    "border.radius",
    "border.style",
    "border.width",
    "color.link",
    "spacing.blockGap",
    "spacing.margin",
    "spacing.padding",
    "typography.lineHeight",
];

/// The kind of value a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `true` / `false`.
    Boolean,
    /// `true` / `false` / `null`.
    NullableBoolean,
    /// Any string.
    String,
    /// CSS length or percentage string.
    Length,
    /// Kebab-case preset slug.
    Slug,
    /// Number greater than zero.
    PositiveNumber,
    /// Integer from 1 to `max` inclusive.
    PositiveInteger {
        /// Inclusive upper bound.
        max: u64,
    },
    /// Any integer.
    Integer,
    /// One of a closed set of strings.
    Enum(&'static [&'static str]),
    /// Array of strings.
    StringList,
    /// A string or an array of strings.
    StringOrList,
    /// A string or a number.
    StringOrNumber,
    /// `false` or an object with the node's children.
    FalseOrObject,
    /// A string or an object with the node's children.
    StringOrObject,
    /// Object with a fixed set of children.
    Object,
    /// Array whose elements follow the node's item shape.
    List,
    /// Object with arbitrary keys whose values follow the entry shape.
    Map,
    /// Object keyed by block name; `settings` selects block rule enforcement.
    BlockMap {
        /// True under `settings.blocks`, false under `styles.blocks`.
        settings: bool,
    },
    /// String, number, or a nested map of custom values.
    CustomValue,
}

impl FieldKind {
    /// Returns true for kinds whose value is fully checked without
    /// descending into children.
    pub fn is_leaf(&self) -> bool {
        !matches!(
            self,
            Self::FalseOrObject
                | Self::StringOrObject
                | Self::Object
                | Self::List
                | Self::Map
                | Self::BlockMap { .. }
                | Self::CustomValue
        )
    }

    /// Returns true if `value` is acceptable for a leaf kind.
    ///
    /// Composite kinds only check the outer shape.
    pub fn admits(&self, value: &Value) -> bool {
        match self {
            Self::Boolean => value.is_boolean(),
            Self::NullableBoolean => value.is_boolean() || value.is_null(),
            Self::String => value.is_string(),
            Self::Length => value.as_str().is_some_and(css::is_length_or_percentage),
            Self::Slug => value.as_str().is_some_and(is_kebab_case),
            Self::PositiveNumber => value.as_f64().is_some_and(|n| n > 0.0),
            Self::PositiveInteger { max } => value.as_u64().is_some_and(|n| n > 0 && n <= *max),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Enum(allowed) => value.as_str().is_some_and(|s| allowed.contains(&s)),
            Self::StringList => value
                .as_array()
                .is_some_and(|items| items.iter().all(Value::is_string)),
            Self::StringOrList => {
                value.is_string()
                    || value
                        .as_array()
                        .is_some_and(|items| items.iter().all(Value::is_string))
            }
            Self::StringOrNumber => value.is_string() || value.is_number(),
            Self::FalseOrObject => value == &Value::Bool(false) || value.is_object(),
            Self::StringOrObject => value.is_string() || value.is_object(),
            Self::Object | Self::Map | Self::BlockMap { .. } => value.is_object(),
            Self::List => value.is_array(),
            Self::CustomValue => value.is_string() || value.is_number() || value.is_object(),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Boolean => f.write_str("boolean"),
            Self::NullableBoolean => f.write_str("boolean or null"),
            Self::String => f.write_str("string"),
            Self::Length => f.write_str("CSS length or percentage string"),
            Self::Slug => f.write_str("kebab-case slug"),
            Self::PositiveNumber => f.write_str("number greater than zero"),
            Self::PositiveInteger { max } => write!(f, "integer from 1 to {max}"),
            Self::Integer => f.write_str("integer"),
            Self::Enum(allowed) => write!(f, "one of {}", allowed.join(" | ")),
            Self::StringList => f.write_str("array of strings"),
            Self::StringOrList => f.write_str("string or array of strings"),
            Self::StringOrNumber => f.write_str("string or number"),
            Self::FalseOrObject => f.write_str("false or object"),
            Self::StringOrObject => f.write_str("string or object"),
            Self::Object | Self::Map => f.write_str("object"),
            Self::BlockMap { .. } => f.write_str("object keyed by block name"),
            Self::List => f.write_str("array"),
            Self::CustomValue => f.write_str("string, number or object"),
        }
    }
}

/// Static definition of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Expected kind.
    pub kind: FieldKind,
    /// Value applied when the field is absent; `None` means no default.
    pub default: Option<Value>,
    /// Whether the field must be present in its parent object.
    pub required: bool,
    /// Set on preset lists.
    pub preset: Option<PresetCategory>,
}

/// A field and the shape of whatever sits below it.
#[derive(Debug, Clone)]
pub struct SchemaNode {
    spec: FieldSpec,
    children: Vec<(&'static str, SchemaNode)>,
    item: Option<Box<SchemaNode>>,
    entry: Option<Box<SchemaNode>>,
}

impl SchemaNode {
    fn leaf(kind: FieldKind) -> Self {
        Self {
            spec: FieldSpec {
                kind,
                default: None,
                required: false,
                preset: None,
            },
            children: Vec::new(),
            item: None,
            entry: None,
        }
    }

    fn object(children: Vec<(&'static str, SchemaNode)>) -> Self {
        Self::with_children(FieldKind::Object, children)
    }

    fn with_children(kind: FieldKind, children: Vec<(&'static str, SchemaNode)>) -> Self {
        let mut node = Self::leaf(kind);
        node.children = children;
        node
    }

    fn list(item: SchemaNode) -> Self {
        let mut node = Self::leaf(FieldKind::List);
        node.item = Some(Box::new(item));
        node
    }

    fn map(kind: FieldKind, entry: SchemaNode) -> Self {
        let mut node = Self::leaf(kind);
        node.entry = Some(Box::new(entry));
        node
    }

    fn preset_list(category: PresetCategory, item: SchemaNode) -> Self {
        let mut node = Self::list(item).with_default(json!([]));
        node.spec.preset = Some(category);
        node
    }

    fn with_default(mut self, value: Value) -> Self {
        self.spec.default = Some(value);
        self
    }

    fn required(mut self) -> Self {
        self.spec.required = true;
        self
    }

    /// The field definition.
    pub fn spec(&self) -> &FieldSpec {
        &self.spec
    }

    /// Shorthand for `spec().kind`.
    pub fn kind(&self) -> FieldKind {
        self.spec.kind
    }

    /// Named children, in declaration order.
    pub fn children(&self) -> impl Iterator<Item = (&'static str, &SchemaNode)> {
        self.children.iter().map(|(k, n)| (*k, n))
    }

    /// The child named `key`, if recognized.
    pub fn child(&self, key: &str) -> Option<&SchemaNode> {
        self.children.iter().find(|(k, _)| *k == key).map(|(_, n)| n)
    }

    /// Item shape of a list.
    pub fn item(&self) -> Option<&SchemaNode> {
        self.item.as_deref()
    }

    /// Entry shape of a map.
    pub fn entry(&self) -> Option<&SchemaNode> {
        self.entry.as_deref()
    }

    /// Returns true if an explicit `null` is accepted as "unset".
    ///
    /// Holds for optional leaves without a default, and for nullable booleans.
    pub fn accepts_null(&self) -> bool {
        self.spec.kind == FieldKind::NullableBoolean
            || (self.spec.kind.is_leaf() && self.spec.default.is_none() && !self.spec.required)
    }

    /// The fully materialized default for this node.
    ///
    /// Objects yield one member per child; leaves without a default yield
    /// `null`; maps and lists without a default are omitted (`None`).
    pub fn default_value(&self) -> Option<Value> {
        if let Some(default) = &self.spec.default {
            return Some(default.clone());
        }
        match self.spec.kind {
            FieldKind::Object => {
                let members: Map<String, Value> = self
                    .children
                    .iter()
                    .filter_map(|(k, n)| n.default_value().map(|v| (k.to_string(), v)))
                    .collect();
                Some(Value::Object(members))
            }
            FieldKind::List | FieldKind::Map | FieldKind::BlockMap { .. } => None,
            _ => Some(Value::Null),
        }
    }

    fn descend(&self, key: &str) -> Option<&SchemaNode> {
        match self.spec.kind {
            FieldKind::List => self.item(),
            FieldKind::Map | FieldKind::BlockMap { .. } => self.entry(),
            FieldKind::CustomValue => Some(self),
            _ => self.child(key),
        }
    }
}

/// Failure to resolve a path in the registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// No field is defined at this path.
    #[error("no field is defined at '{path}'")]
    NotFound {
        /// The dotted path that was looked up.
        path: String,
    },

    /// The field exists but this block may not declare it.
    #[error("block '{block}' does not accept settings at '{path}'")]
    NotAllowedInBlock {
        /// The block that was looked up.
        block: String,
        /// The dotted settings path, relative to the block.
        path: String,
    },
}

/// The complete field inventory of a theme configuration document.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    root: SchemaNode,
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    /// Build the registry.
    ///
    /// Most callers want the shared instance from [`registry()`].
    pub fn new() -> Self {
        let block_settings = SchemaNode::object(settings_sections());
        let mut global = settings_sections();
        global.push((
            "blocks",
            SchemaNode::map(FieldKind::BlockMap { settings: true }, block_settings),
        ));

        let root = SchemaNode::object(vec![
            ("$schema", SchemaNode::leaf(FieldKind::String)),
            ("version", SchemaNode::leaf(FieldKind::Integer).required()),
            ("settings", SchemaNode::object(global)),
            ("styles", styles_node()),
            ("customTemplates", SchemaNode::list(custom_template_node())),
            ("templateParts", SchemaNode::list(template_part_node())),
            ("patterns", SchemaNode::leaf(FieldKind::StringList)),
        ]);
        Self { root }
    }

    /// The document root.
    pub fn root(&self) -> &SchemaNode {
        &self.root
    }

    /// The settings node used at block scope: every section, no `blocks`.
    pub fn block_settings_node(&self) -> &SchemaNode {
        self.node(&["settings", "blocks", "[]"])
            .unwrap_or(&self.root)
    }

    /// The `styles` node.
    pub fn styles_node(&self) -> &SchemaNode {
        self.node(&["styles"]).unwrap_or(&self.root)
    }

    /// Walk `keys` from the root.
    pub fn node<S: AsRef<str>>(&self, keys: &[S]) -> Option<&SchemaNode> {
        keys.iter()
            .try_fold(&self.root, |node, key| node.descend(key.as_ref()))
    }

    /// Look up the definition of the field at `keys`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotFound`] if no field is defined there.
    pub fn lookup_field<S: AsRef<str>>(&self, keys: &[S]) -> Result<&FieldSpec, LookupError> {
        self.node(keys)
            .map(SchemaNode::spec)
            .ok_or_else(|| LookupError::NotFound {
                path: join(keys),
            })
    }

    /// Look up a settings field at block scope.
    ///
    /// `keys` are relative to the block's settings node.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::NotAllowedInBlock`] when the field exists but
    /// `block` may not declare it, [`LookupError::NotFound`] otherwise.
    pub fn lookup_block_field<S: AsRef<str>>(
        &self,
        block: &str,
        keys: &[S],
    ) -> Result<&FieldSpec, LookupError> {
        let node = keys
            .iter()
            .try_fold(self.block_settings_node(), |node, key| node.descend(key.as_ref()))
            .ok_or_else(|| LookupError::NotFound {
                path: join(keys),
            })?;
        if block_rule(block).allows(keys) {
            Ok(node.spec())
        } else {
            Err(LookupError::NotAllowedInBlock {
                block: block.to_string(),
                path: join(keys),
            })
        }
    }

    /// The settings rule for `block`.
    pub fn block_rule(&self, block: &str) -> BlockRule {
        block_rule(block)
    }

    /// Returns true if `block` is a core block the registry knows about.
    pub fn is_known_block(&self, block: &str) -> bool {
        is_known_core_block(block)
    }

    /// Materialized defaults for every settings section.
    pub fn settings_defaults(&self) -> Value {
        self.block_settings_node()
            .default_value()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }
}

/// The process-wide registry, built on first use.
pub fn registry() -> &'static SchemaRegistry {
    static REGISTRY: OnceLock<SchemaRegistry> = OnceLock::new();
    REGISTRY.get_or_init(SchemaRegistry::new)
}

fn join<S: AsRef<str>>(keys: &[S]) -> String {
    keys.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(".")
}

// ---------------------------------------------------------------------------
// settings.*
// ---------------------------------------------------------------------------

fn toggle(default: bool) -> SchemaNode {
    SchemaNode::leaf(FieldKind::Boolean).with_default(json!(default))
}

fn settings_sections() -> Vec<(&'static str, SchemaNode)> {
    vec![
        ("appearanceTools", toggle(false)),
        ("color", color_settings()),
        ("layout", layout_settings()),
        ("spacing", spacing_settings()),
        ("typography", typography_settings()),
        ("border", border_settings()),
        (
            "custom",
            SchemaNode::map(FieldKind::Map, SchemaNode::leaf(FieldKind::CustomValue))
                .with_default(json!({})),
        ),
    ]
}

fn preset_item(value_key: &'static str, value: SchemaNode, name_required: bool) -> SchemaNode {
    let name = SchemaNode::leaf(FieldKind::String);
    SchemaNode::object(vec![
        ("name", if name_required { name.required() } else { name }),
        ("slug", SchemaNode::leaf(FieldKind::Slug).required()),
        (value_key, value.required()),
    ])
}

fn color_settings() -> SchemaNode {
    SchemaNode::object(vec![
        ("background", toggle(true)),
        ("custom", toggle(true)),
        ("customDuotone", toggle(true)),
        ("customGradient", toggle(true)),
        ("defaultDuotone", toggle(true)),
        ("defaultGradients", toggle(true)),
        ("defaultPalette", toggle(true)),
        (
            "duotone",
            SchemaNode::preset_list(
                PresetCategory::Duotone,
                preset_item("colors", SchemaNode::leaf(FieldKind::StringList), true),
            ),
        ),
        (
            "gradients",
            SchemaNode::preset_list(
                PresetCategory::Gradients,
                preset_item("gradient", SchemaNode::leaf(FieldKind::String), true),
            ),
        ),
        ("link", toggle(false)),
        (
            "palette",
            SchemaNode::preset_list(
                PresetCategory::Palette,
                preset_item("color", SchemaNode::leaf(FieldKind::String), true),
            ),
        ),
        ("text", toggle(true)),
    ])
}

fn layout_settings() -> SchemaNode {
    SchemaNode::object(vec![
        ("contentSize", SchemaNode::leaf(FieldKind::Length)),
        ("wideSize", SchemaNode::leaf(FieldKind::Length)),
    ])
}

fn spacing_settings() -> SchemaNode {
    SchemaNode::object(vec![
        (
            "blockGap",
            SchemaNode::leaf(FieldKind::NullableBoolean).with_default(Value::Null),
        ),
        ("margin", toggle(false)),
        ("padding", toggle(false)),
        (
            "units",
            SchemaNode::leaf(FieldKind::StringList).with_default(json!(SCALE_UNITS)),
        ),
        ("customSpacingSize", toggle(true)),
        (
            "spacingSizes",
            SchemaNode::preset_list(
                PresetCategory::SpacingSizes,
                preset_item("size", SchemaNode::leaf(FieldKind::Length), false),
            ),
        ),
        (
            "spacingScale",
            SchemaNode::object(vec![
                (
                    "operator",
                    SchemaNode::leaf(FieldKind::Enum(SCALE_OPERATORS)).with_default(json!("*")),
                ),
                (
                    "increment",
                    SchemaNode::leaf(FieldKind::PositiveNumber).with_default(json!(1.5)),
                ),
                (
                    "steps",
                    SchemaNode::leaf(FieldKind::PositiveInteger {
                        max: MAX_SCALE_STEPS,
                    })
                    .with_default(json!(7)),
                ),
                (
                    "mediumStep",
                    SchemaNode::leaf(FieldKind::PositiveNumber).with_default(json!(1.5)),
                ),
                (
                    "unit",
                    SchemaNode::leaf(FieldKind::Enum(SCALE_UNITS)).with_default(json!("rem")),
                ),
            ]),
        ),
    ])
}

fn typography_settings() -> SchemaNode {
    let font_size = {
        let mut item = preset_item("size", SchemaNode::leaf(FieldKind::Length), false);
        item.children.push((
            "fluid",
            SchemaNode::with_children(
                FieldKind::FalseOrObject,
                vec![
                    ("min", SchemaNode::leaf(FieldKind::Length)),
                    ("max", SchemaNode::leaf(FieldKind::Length)),
                ],
            ),
        ));
        item
    };
    let font_family = {
        let mut item = preset_item("fontFamily", SchemaNode::leaf(FieldKind::String), false);
        item.children
            .push(("fontFace", SchemaNode::list(font_face_node())));
        item
    };

    SchemaNode::object(vec![
        ("customFontSize", toggle(true)),
        ("fontStyle", toggle(true)),
        ("fontWeight", toggle(true)),
        ("fluid", toggle(false)),
        ("letterSpacing", toggle(true)),
        ("lineHeight", toggle(false)),
        ("textDecoration", toggle(true)),
        ("textTransform", toggle(true)),
        ("dropCap", toggle(true)),
        (
            "fontSizes",
            SchemaNode::preset_list(PresetCategory::FontSizes, font_size),
        ),
        (
            "fontFamilies",
            SchemaNode::preset_list(PresetCategory::FontFamilies, font_family),
        ),
    ])
}

fn font_face_node() -> SchemaNode {
    let text = || SchemaNode::leaf(FieldKind::String);
    SchemaNode::object(vec![
        ("fontFamily", text().required()),
        ("fontStyle", text().with_default(json!("normal"))),
        (
            "fontWeight",
            SchemaNode::leaf(FieldKind::StringOrNumber).with_default(json!("400")),
        ),
        (
            "fontDisplay",
            SchemaNode::leaf(FieldKind::Enum(FONT_DISPLAY_VALUES)).with_default(json!("fallback")),
        ),
        ("src", SchemaNode::leaf(FieldKind::StringOrList).required()),
        ("fontStretch", text()),
        ("ascendOverride", text()),
        ("descendOverride", text()),
        ("fontVariant", text()),
        ("fontFeatureSettings", text()),
        ("fontVariationSettings", text()),
        ("lineGapOverride", text()),
        ("sizeAdjust", text()),
        ("unicodeRange", text()),
    ])
}

fn border_settings() -> SchemaNode {
    SchemaNode::object(vec![
        ("color", toggle(false)),
        ("radius", toggle(false)),
        ("style", toggle(false)),
        ("width", toggle(false)),
    ])
}

// ---------------------------------------------------------------------------
// styles.*
// ---------------------------------------------------------------------------

fn strings(keys: &[&'static str]) -> Vec<(&'static str, SchemaNode)> {
    keys.iter()
        .map(|k| (*k, SchemaNode::leaf(FieldKind::String)))
        .collect()
}

fn style_properties(with_filter: bool) -> Vec<(&'static str, SchemaNode)> {
    let side = || SchemaNode::object(strings(&["color", "style", "width"]));
    let box_sides = || SchemaNode::object(strings(&["top", "right", "bottom", "left"]));

    let mut border = strings(&["color"]);
    border.push((
        "radius",
        SchemaNode::with_children(
            FieldKind::StringOrObject,
            strings(&["topLeft", "topRight", "bottomLeft", "bottomRight"]),
        ),
    ));
    border.extend(strings(&["style", "width"]));
    border.extend([
        ("top", side()),
        ("right", side()),
        ("bottom", side()),
        ("left", side()),
    ]);

    let mut props = vec![
        ("border", SchemaNode::object(border)),
        (
            "color",
            SchemaNode::object(strings(&["background", "gradient", "text"])),
        ),
        (
            "spacing",
            SchemaNode::object(vec![
                ("blockGap", SchemaNode::leaf(FieldKind::String)),
                ("margin", box_sides()),
                ("padding", box_sides()),
            ]),
        ),
        (
            "typography",
            SchemaNode::object(strings(&[
                "fontFamily",
                "fontSize",
                "fontStyle",
                "fontWeight",
                "letterSpacing",
                "lineHeight",
                "textDecoration",
                "textTransform",
            ])),
        ),
    ];
    if with_filter {
        props.push(("filter", SchemaNode::object(strings(&["duotone"]))));
    }
    props
}

/// Element names accepted under `elements`.
pub const ELEMENT_NAMES: &[&str] = &[
    "button", "caption", "h1", "h2", "h3", "h4", "h5", "h6", "heading", "link",
];

/// Pseudo-class variants accepted under `elements.link`.
pub const LINK_PSEUDO_CLASSES: &[&str] = &[":hover", ":focus", ":active"];

fn elements_node() -> SchemaNode {
    let children = ELEMENT_NAMES
        .iter()
        .map(|name| {
            let mut props = style_properties(false);
            if *name == "link" {
                for pseudo in LINK_PSEUDO_CLASSES {
                    props.push((*pseudo, SchemaNode::object(style_properties(false))));
                }
            }
            (*name, SchemaNode::object(props))
        })
        .collect();
    SchemaNode::object(children)
}

fn styles_node() -> SchemaNode {
    let mut block = style_properties(false);
    block.push(("elements", elements_node()));

    let mut top = style_properties(true);
    top.push(("elements", elements_node()));
    top.push((
        "blocks",
        SchemaNode::map(FieldKind::BlockMap { settings: false }, SchemaNode::object(block)),
    ));
    SchemaNode::object(top)
}

// ---------------------------------------------------------------------------
// customTemplates / templateParts
// ---------------------------------------------------------------------------

fn custom_template_node() -> SchemaNode {
    SchemaNode::object(vec![
        ("name", SchemaNode::leaf(FieldKind::String).required()),
        ("title", SchemaNode::leaf(FieldKind::String).required()),
        (
            "postTypes",
            SchemaNode::leaf(FieldKind::StringList).with_default(json!(["page"])),
        ),
    ])
}

fn template_part_node() -> SchemaNode {
    SchemaNode::object(vec![
        ("name", SchemaNode::leaf(FieldKind::String).required()),
        ("title", SchemaNode::leaf(FieldKind::String)),
        (
            "area",
            SchemaNode::leaf(FieldKind::String).with_default(json!("uncategorized")),
        ),
    ])
}
