//! # Spacing Scale
//!
//! Generates the spacing-size presets described by
//! `settings.spacing.spacingScale`.
//!
//! ## Centering
//!
//! `steps` sizes are laid out around the medium step:
//! `below = ceil(steps / 2) - 1` sizes below it and the rest above it, so
//! an even step count puts the extra size above medium.
//!
//! Step `k` (negative below medium) has size `mediumStep + k * increment`
//! for `+` and `mediumStep * increment^k` for `*`. A step whose size is
//! not positive is dropped with an `InvalidScaleStepWarning`. At most
//! [`MAX_SCALE_STEPS`] steps are generated; a larger descriptor yields no
//! sizes and a range diagnostic.
//!
//! ## Identifiers
//!
//! Slugs count up in tens so that the medium step is `50` whenever at most
//! four steps sit below it. Names read `Medium`, `Small`/`Large`,
//! `X-Small`/`X-Large`, `2X-Small`/`2X-Large`, and so on.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use themejson_core::{
    format_number, Diagnostic, DiagnosticKind, Diagnostics, FieldPath, PresetCategory, Slug,
};
use themejson_schema::MAX_SCALE_STEPS;

use crate::error::ScaleError;
use crate::merge::slug_of;

/// How successive steps are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// Arithmetic progression.
    #[serde(rename = "+")]
    Add,
    /// Geometric progression.
    #[serde(rename = "*")]
    Multiply,
}

/// A spacing-scale descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpacingScale {
    /// Progression between steps.
    pub operator: Operator,
    /// Amount added, or factor applied, per step.
    pub increment: f64,
    /// Number of sizes generated.
    pub steps: u32,
    /// Size of the medium step.
    pub medium_step: f64,
    /// Unit appended to every generated size.
    pub unit: String,
}

impl SpacingScale {
    /// Read the descriptor from a settings node. `Ok(None)` when the node
    /// has no `spacing.spacingScale`.
    pub fn from_settings(settings: &Value) -> Result<Option<Self>, ScaleError> {
        let Some(value) = settings
            .get("spacing")
            .and_then(|spacing| spacing.get("spacingScale"))
            .filter(|value| !value.is_null())
        else {
            return Ok(None);
        };
        let scale: Self =
            serde_json::from_value(value.clone()).map_err(|source| ScaleError::Malformed {
                value: value.clone(),
                source,
            })?;
        scale.check()?;
        Ok(Some(scale))
    }

    /// Reject step counts beyond [`MAX_SCALE_STEPS`].
    pub fn check(&self) -> Result<(), ScaleError> {
        if u64::from(self.steps) > MAX_SCALE_STEPS {
            return Err(ScaleError::TooManySteps { steps: self.steps });
        }
        Ok(())
    }

    /// Number of steps below medium.
    pub fn below_medium(&self) -> u32 {
        self.steps.div_ceil(2).saturating_sub(1)
    }

    /// Number of steps above medium.
    pub fn above_medium(&self) -> u32 {
        self.steps.saturating_sub(1 + self.below_medium())
    }

    fn size_at(&self, offset: i32) -> f64 {
        match self.operator {
            Operator::Add => self.medium_step + f64::from(offset) * self.increment,
            Operator::Multiply => self.medium_step * self.increment.powi(offset),
        }
    }
}

/// One spacing preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpacingSize {
    /// Display name, e.g. `X-Large`.
    pub name: String,
    /// Numeric slug counting up in tens.
    pub slug: Slug,
    /// CSS value.
    pub size: String,
}

/// Display name of the step `offset` positions from medium.
pub fn step_name(offset: i32) -> String {
    match offset {
        0 => "Medium".to_string(),
        1 => "Large".to_string(),
        -1 => "Small".to_string(),
        2 => "X-Large".to_string(),
        -2 => "X-Small".to_string(),
        n if n > 0 => format!("{}X-Large", n - 1),
        n => format!("{}X-Small", -n - 1),
    }
}

/// Generate the sizes of `scale`, in ascending order.
///
/// Dropped steps are reported into `diagnostics` at `path`.
pub fn resolve_spacing_scale(
    scale: &SpacingScale,
    path: &FieldPath,
    diagnostics: &mut Diagnostics,
) -> Vec<SpacingSize> {
    if scale.steps == 0 {
        return Vec::new();
    }
    if let Err(e) = scale.check() {
        tracing::warn!(path = %path, error = %e, "spacing scale ignored");
        diagnostics.push(e.to_diagnostic(path));
        return Vec::new();
    }
    let below = i32::try_from(scale.below_medium()).unwrap_or(i32::MAX);
    let above = i32::try_from(scale.above_medium()).unwrap_or(i32::MAX);
    let slug_offset = (4 - below).max(0);

    let mut sizes = Vec::new();
    for (position, offset) in (0i32..).zip(-below..=above) {
        let value = scale.size_at(offset);
        if !value.is_finite() || value <= 0.0 {
            tracing::warn!(
                path = %path,
                step = offset,
                size = value,
                "spacing scale step is not positive; dropping it"
            );
            diagnostics.push(Diagnostic::new(
                DiagnosticKind::InvalidScaleStep,
                path.clone(),
                "a positive generated size",
                Some(Value::String(format!("{}{}", format_number(value), scale.unit))),
            ));
            continue;
        }
        let Ok(slug) = Slug::new((10 * (position + 1 + slug_offset)).to_string()) else {
            continue;
        };
        sizes.push(SpacingSize {
            name: step_name(offset),
            slug,
            size: format!("{}{}", format_number(value), scale.unit),
        });
    }
    sizes
}

/// Combine generated sizes with explicit `spacingSizes` items: an explicit
/// item replaces the generated size with the same slug, otherwise it is
/// appended.
pub fn merge_spacing_sizes(mut generated: Vec<SpacingSize>, explicit: &[Value]) -> Vec<SpacingSize> {
    let value_key = PresetCategory::SpacingSizes.value_key();
    for item in explicit {
        let (Some(slug), Some(size)) = (slug_of(item), item.get(value_key).and_then(Value::as_str)) else {
            continue;
        };
        let Ok(slug) = Slug::new(slug) else {
            continue;
        };
        let name = item
            .get("name")
            .and_then(Value::as_str)
            .map_or_else(|| slug.to_string(), str::to_string);
        let size = SpacingSize {
            name,
            slug,
            size: size.to_string(),
        };
        match generated.iter_mut().find(|g| g.slug == size.slug) {
            Some(existing) => *existing = size,
            None => generated.push(size),
        }
    }
    generated
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scale(operator: Operator, increment: f64, steps: u32, medium_step: f64, unit: &str) -> SpacingScale {
        SpacingScale {
            operator,
            increment,
            steps,
            medium_step,
            unit: unit.to_string(),
        }
    }

    fn sizes(scale: &SpacingScale) -> (Vec<SpacingSize>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let sizes = resolve_spacing_scale(scale, &FieldPath::root(), &mut diagnostics);
        (sizes, diagnostics)
    }

    #[test]
    fn additive_scale_is_centered() {
        let (sizes, diagnostics) = sizes(&scale(Operator::Add, 4.0, 5, 16.0, "px"));
        assert!(diagnostics.is_empty());
        let values: Vec<&str> = sizes.iter().map(|s| s.size.as_str()).collect();
        assert_eq!(values, vec!["8px", "12px", "16px", "20px", "24px"]);
        let slugs: Vec<&str> = sizes.iter().map(|s| s.slug.as_str()).collect();
        assert_eq!(slugs, vec!["30", "40", "50", "60", "70"]);
        let names: Vec<&str> = sizes.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["X-Small", "Small", "Medium", "Large", "X-Large"]);
    }

    #[test]
    fn default_geometric_scale() {
        let (sizes, _) = sizes(&scale(Operator::Multiply, 1.5, 7, 1.5, "rem"));
        let values: Vec<&str> = sizes.iter().map(|s| s.size.as_str()).collect();
        assert_eq!(
            values,
            vec!["0.44rem", "0.67rem", "1rem", "1.5rem", "2.25rem", "3.38rem", "5.06rem"]
        );
        assert_eq!(sizes[0].name, "2X-Small");
        assert_eq!(sizes[3].slug.as_str(), "50");
        assert_eq!(sizes[6].name, "2X-Large");
    }

    #[test]
    fn even_steps_put_extra_above() {
        let s = scale(Operator::Add, 1.0, 4, 10.0, "px");
        assert_eq!((s.below_medium(), s.above_medium()), (1, 2));
        let (sizes, _) = sizes(&s);
        let values: Vec<&str> = sizes.iter().map(|s| s.size.as_str()).collect();
        assert_eq!(values, vec!["9px", "10px", "11px", "12px"]);
        assert_eq!(sizes[1].slug.as_str(), "50");
    }

    #[test]
    fn single_step_is_medium() {
        let (sizes, _) = sizes(&scale(Operator::Multiply, 2.0, 1, 1.0, "rem"));
        assert_eq!(sizes.len(), 1);
        assert_eq!(sizes[0].name, "Medium");
        assert_eq!(sizes[0].slug.as_str(), "50");
    }

    #[test]
    fn non_positive_steps_are_dropped_and_flagged() {
        let (sizes, diagnostics) = sizes(&scale(Operator::Add, 10.0, 5, 16.0, "px"));
        let values: Vec<&str> = sizes.iter().map(|s| s.size.as_str()).collect();
        assert_eq!(values, vec!["6px", "16px", "26px", "36px"]);
        assert_eq!(diagnostics.count(DiagnosticKind::InvalidScaleStep), 1);
        // positions are kept, so the medium slug does not move
        assert_eq!(sizes[1].slug.as_str(), "50");
    }

    #[test]
    fn explicit_sizes_override_or_append() {
        let (generated, _) = sizes(&scale(Operator::Add, 4.0, 3, 16.0, "px"));
        let merged = merge_spacing_sizes(
            generated,
            &[
                json!({"slug": "50", "size": "1rem", "name": "Base"}),
                json!({"slug": "gutter", "size": "clamp(1rem, 4vw, 3rem)"}),
            ],
        );
        let pairs: Vec<(&str, &str)> = merged
            .iter()
            .map(|s| (s.slug.as_str(), s.size.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("40", "12px"), ("50", "1rem"), ("60", "20px"), ("gutter", "clamp(1rem, 4vw, 3rem)")]
        );
        assert_eq!(merged[1].name, "Base");
        assert_eq!(merged[3].name, "gutter");
    }

    #[test]
    fn descriptor_from_settings() {
        let settings = json!({"spacing": {"spacingScale": {
            "operator": "+", "increment": 4, "steps": 5, "mediumStep": 16, "unit": "px"
        }}});
        let scale = SpacingScale::from_settings(&settings).unwrap().unwrap();
        assert_eq!(scale.operator, Operator::Add);
        assert_eq!(scale.steps, 5);
        assert_eq!(scale.medium_step, 16.0);

        assert!(SpacingScale::from_settings(&json!({"spacing": {}})).unwrap().is_none());
    }

    #[test]
    fn oversized_descriptors_are_errors() {
        let descriptor = |steps: Value| {
            json!({"spacing": {"spacingScale": {
                "operator": "+", "increment": 4, "steps": steps, "mediumStep": 16, "unit": "px"
            }}})
        };
        assert!(matches!(
            SpacingScale::from_settings(&descriptor(json!(4_294_967_296u64))),
            Err(ScaleError::Malformed { .. })
        ));
        assert!(matches!(
            SpacingScale::from_settings(&descriptor(json!(3_000_000))),
            Err(ScaleError::TooManySteps { steps: 3_000_000 })
        ));
        assert!(SpacingScale::from_settings(&descriptor(json!(MAX_SCALE_STEPS))).is_ok());
    }

    #[test]
    fn step_limit_applies_to_direct_resolution() {
        let (sizes, diagnostics) = sizes(&scale(Operator::Add, 1.0, 3_000_000, 16.0, "px"));
        assert!(sizes.is_empty());
        assert_eq!(diagnostics.len(), 1);
        let diagnostic = diagnostics.iter().next().unwrap();
        assert_eq!(diagnostic.kind, DiagnosticKind::RangeViolation);
        assert_eq!(diagnostic.path.to_string(), "/steps");

        let steps = u32::try_from(MAX_SCALE_STEPS).unwrap();
        let (sizes, diagnostics) = self::sizes(&scale(Operator::Add, 1.0, steps, 1000.0, "px"));
        assert_eq!(sizes.len(), 100);
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn step_names() {
        assert_eq!(step_name(3), "2X-Large");
        assert_eq!(step_name(-4), "3X-Small");
    }
}
