//! # Fluid Typography
//!
//! Turns a static font size into a `clamp()` expression that interpolates
//! linearly between a minimum and a maximum size across a viewport range.
//!
//! ## Bounds
//!
//! - Both `min` and `max` given: used verbatim.
//! - `max` missing: the static size.
//! - `min` missing: the static size times `min_font_size_factor`, never
//!   below `min_font_size`.
//! - Neither given and the static size is at or below `min_font_size`: the
//!   size stays static.
//!
//! ## Formula
//!
//! All arithmetic happens in the unit of the static size (`px`, `rem` or
//! `em`, with a 16px root):
//!
//! ```text
//! clamp(MIN, MIN + ((1vw - VW_MIN / 100) * FACTOR), MAX)
//! FACTOR = 100 * (MAX - MIN) / (VW_MAX - VW_MIN) * scale_factor
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use themejson_core::CssLength;

/// Parameters of the interpolation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FluidOptions {
    /// Viewport width at which the minimum size applies.
    pub min_viewport_width: String,
    /// Viewport width at which the maximum size applies.
    pub max_viewport_width: String,
    /// Minimum size as a fraction of the static size, when not given.
    pub min_font_size_factor: f64,
    /// Floor for computed minimum sizes.
    pub min_font_size: String,
    /// Multiplier applied to the interpolation slope.
    pub scale_factor: f64,
}

impl Default for FluidOptions {
    fn default() -> Self {
        Self {
            min_viewport_width: "320px".to_string(),
            max_viewport_width: "1600px".to_string(),
            min_font_size_factor: 0.75,
            min_font_size: "14px".to_string(),
            scale_factor: 1.0,
        }
    }
}

/// Explicit bounds from a font-size preset's `fluid` member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FluidBounds {
    /// Size at the minimum viewport width.
    pub min: Option<String>,
    /// Size at the maximum viewport width.
    pub max: Option<String>,
}

impl FluidBounds {
    /// Read a preset's `fluid` member. `None` means fluid sizing is off for
    /// this preset (`fluid: false`).
    pub fn from_preset(fluid: Option<&Value>) -> Option<Self> {
        match fluid {
            Some(Value::Bool(false)) => None,
            Some(Value::Object(bounds)) => Some(Self {
                min: bounds.get("min").and_then(Value::as_str).map(str::to_string),
                max: bounds.get("max").and_then(Value::as_str).map(str::to_string),
            }),
            _ => Some(Self::default()),
        }
    }
}

/// Compute the fluid value for `size`, or `None` if it stays static.
pub fn fluid_font_size(size: &str, bounds: &FluidBounds, options: &FluidOptions) -> Option<String> {
    let static_size = CssLength::parse(size)?;
    let unit = static_size.unit.clone();
    if !matches!(unit.as_str(), "px" | "rem" | "em") {
        return None;
    }
    let floor = CssLength::parse(&options.min_font_size)?.convert_to(&unit)?;

    let length = |text: &str| -> Option<f64> { Some(CssLength::parse(text)?.convert_to(&unit)?.value) };
    let (min, min_value, max, max_value) = match (&bounds.min, &bounds.max) {
        (None, None) if static_size.value <= floor.value => return None,
        (min, max) => {
            let max = max.clone().unwrap_or_else(|| size.trim().to_string());
            let (min, min_value) = match min {
                Some(min) => (min.clone(), length(min)?),
                None => {
                    let value = (static_size.value * options.min_font_size_factor).max(floor.value);
                    (trimmed(value, &unit), value)
                }
            };
            let max_value = length(&max)?;
            (min, min_value, max, max_value)
        }
    };

    let vw_min = length(&options.min_viewport_width)?;
    let vw_max = length(&options.max_viewport_width)?;
    if vw_max <= vw_min {
        tracing::warn!(
            min = %options.min_viewport_width,
            max = %options.max_viewport_width,
            "fluid viewport range is empty; keeping font size static"
        );
        return None;
    }

    let factor = 100.0 * (max_value - min_value) / (vw_max - vw_min) * options.scale_factor;
    Some(format!(
        "clamp({min}, {} + ((1vw - {}) * {}), {max})",
        trimmed(min_value, &unit),
        trimmed(vw_min / 100.0, &unit),
        round3(factor),
    ))
}

/// `value` rounded to three decimals, trailing zeros trimmed.
fn round3(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{rounded:.3}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

fn trimmed(value: f64, unit: &str) -> String {
    format!("{}{unit}", round3(value))
}
