//! # Precedence Merge
//!
//! Settings resolve by overlaying scopes in a fixed precedence order, later
//! scopes winning field by field:
//!
//! ```text
//! registry defaults
//!   -> global: implied by appearanceTools, then explicit
//!     -> block: implied by appearanceTools (filtered by the block rule), then explicit
//! ```
//!
//! Applying the implied layer first is what lets an explicit `false` beat
//! the `true` that `appearanceTools` implies in the same scope.
//!
//! Objects merge member by member. Scalars replace. `custom` maps merge
//! deeply. Preset lists replace at global scope and append at block scope,
//! where the first occurrence of a slug wins.

use std::collections::HashSet;

use serde_json::{Map, Value};

use themejson_schema::{BlockRule, FieldKind, SchemaNode, APPEARANCE_TOOLS};

/// How preset lists combine when a scope overlays another.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListPolicy {
    /// The later list replaces the earlier one.
    Replace,
    /// The later list's new slugs are appended to the earlier list.
    Append,
}

/// Overlay `top` onto `base`, guided by the schema `node` both conform to.
pub fn overlay(
    base: &mut Map<String, Value>,
    top: &Map<String, Value>,
    node: &SchemaNode,
    lists: ListPolicy,
) {
    for (key, value) in top {
        let Some(child) = node.child(key) else {
            base.insert(key.clone(), value.clone());
            continue;
        };
        let slot = base.entry(key.clone()).or_insert(Value::Null);
        match (child.kind(), slot, value) {
            (FieldKind::Object, Value::Object(existing), Value::Object(incoming)) => {
                overlay(existing, incoming, child, lists);
            }
            (FieldKind::Map, Value::Object(existing), Value::Object(incoming)) => {
                deep_merge_map(existing, incoming);
            }
            (FieldKind::List, Value::Array(existing), Value::Array(incoming))
                if lists == ListPolicy::Append && child.spec().preset.is_some() =>
            {
                append_unique(existing, incoming);
            }
            (_, slot, _) => *slot = value.clone(),
        }
    }
}

/// Merge `top` into `base` recursively: objects member by member, anything
/// else replaced.
pub fn deep_merge(base: &mut Value, top: &Value) {
    match (base, top) {
        (Value::Object(existing), Value::Object(incoming)) => deep_merge_map(existing, incoming),
        (base, top) => *base = top.clone(),
    }
}

fn deep_merge_map(base: &mut Map<String, Value>, top: &Map<String, Value>) {
    for (key, value) in top {
        match base.get_mut(key) {
            Some(existing) => deep_merge(existing, value),
            None => {
                base.insert(key.clone(), value.clone());
            }
        }
    }
}

/// The `slug` member of a preset item.
pub(crate) fn slug_of(item: &Value) -> Option<&str> {
    item.get("slug").and_then(Value::as_str)
}

fn append_unique(existing: &mut Vec<Value>, incoming: &[Value]) {
    let mut seen: HashSet<String> = existing
        .iter()
        .filter_map(slug_of)
        .map(str::to_string)
        .collect();
    for item in incoming {
        match slug_of(item) {
            Some(slug) if !seen.insert(slug.to_string()) => {
                tracing::debug!(slug, "preset already defined by an outer scope; keeping the first");
            }
            _ => existing.push(item.clone()),
        }
    }
}

/// The toggles `scope` implies through `appearanceTools: true`, restricted
/// to what `rule` lets the scope declare.
pub fn implied_toggles(scope: &Map<String, Value>, rule: BlockRule) -> Option<Map<String, Value>> {
    if scope.get("appearanceTools") != Some(&Value::Bool(true)) {
        return None;
    }
    let mut implied = Map::new();
    for path in APPEARANCE_TOOLS {
        let keys: Vec<&str> = path.split('.').collect();
        if rule.allows(&keys) {
            set_path(&mut implied, &keys, Value::Bool(true));
        }
    }
    Some(implied)
}

fn set_path(map: &mut Map<String, Value>, keys: &[&str], value: Value) {
    let Some((last, parents)) = keys.split_last() else {
        return;
    };
    let mut current = map;
    for key in parents {
        let slot = current
            .entry(key.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !slot.is_object() {
            *slot = Value::Object(Map::new());
        }
        let Value::Object(next) = slot else {
            return;
        };
        current = next;
    }
    current.insert(last.to_string(), value);
}

/// Apply one settings scope: its implied toggles first, then its explicit
/// values.
pub fn apply_scope(
    base: &mut Map<String, Value>,
    scope: &Map<String, Value>,
    node: &SchemaNode,
    rule: BlockRule,
    lists: ListPolicy,
) {
    if let Some(implied) = implied_toggles(scope, rule) {
        overlay(base, &implied, node, lists);
    }
    overlay(base, scope, node, lists);
}
