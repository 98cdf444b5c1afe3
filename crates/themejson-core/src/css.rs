//! # CSS Lengths
//!
//! Just enough CSS value parsing for the configuration format: recognizing
//! length/percentage strings (`16px`, `1.5rem`, `50%`, `clamp(...)`),
//! splitting them into number and unit, and printing numbers the way the
//! generated style sheets expect (at most two decimals, no trailing zeros).

use std::fmt;

/// Units accepted in length values.
pub const LENGTH_UNITS: &[&str] = &[
    "px", "em", "rem", "%", "vh", "vw", "vmin", "vmax", "svh", "lvh", "dvh", "svw", "lvw", "dvw",
    "ch", "ex", "lh", "rlh", "pt", "pc", "cm", "mm", "in", "cqw", "cqh",
];

/// Functional notations accepted as opaque lengths.
const LENGTH_FUNCTIONS: &[&str] = &["clamp", "calc", "min", "max", "var"];

/// Root font size used to convert between `px` and `rem`/`em`.
pub const ROOT_FONT_SIZE_PX: f64 = 16.0;

/// A numeric CSS length: value plus unit.
#[derive(Debug, Clone, PartialEq)]
pub struct CssLength {
    /// Numeric part.
    pub value: f64,
    /// Unit suffix; empty only for unitless zero.
    pub unit: String,
}

impl CssLength {
    /// Construct from parts.
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
        }
    }

    /// Parse a plain `<number><unit>` length. Functional notation is not
    /// decomposed and yields `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        let split = s
            .char_indices()
            .find(|&(i, c)| !(c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && i == 0)))
            .map_or(s.len(), |(i, _)| i);
        let (number, unit) = s.split_at(split);
        if number.is_empty() || number == "-" || number == "+" {
            return None;
        }
        let value: f64 = number.parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        let unit = unit.to_ascii_lowercase();
        if unit.is_empty() {
            return (value == 0.0).then(|| Self::new(0.0, ""));
        }
        LENGTH_UNITS
            .contains(&unit.as_str())
            .then(|| Self::new(value, unit))
    }

    /// Value in pixels for absolute-ish units (`px`, `rem`, `em`).
    pub fn to_px(&self) -> Option<f64> {
        match self.unit.as_str() {
            "px" => Some(self.value),
            "rem" | "em" => Some(self.value * ROOT_FONT_SIZE_PX),
            "" => Some(0.0),
            _ => None,
        }
    }

    /// Express this length in `unit` (`px`, `rem` or `em`), if convertible.
    pub fn convert_to(&self, unit: &str) -> Option<Self> {
        let px = self.to_px()?;
        match unit {
            "px" => Some(Self::new(px, "px")),
            "rem" | "em" => Some(Self::new(px / ROOT_FONT_SIZE_PX, unit)),
            _ => None,
        }
    }
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit)
    }
}

/// Returns true if `input` is a CSS length or percentage, including the
/// functional notations `clamp()`, `calc()`, `min()`, `max()` and `var()`.
pub fn is_length_or_percentage(input: &str) -> bool {
    let s = input.trim();
    if CssLength::parse(s).is_some() {
        return true;
    }
    match s.split_once('(') {
        Some((name, rest)) => {
            LENGTH_FUNCTIONS.contains(&name.trim()) && rest.ends_with(')') && rest.len() > 1
        }
        None => false,
    }
}

/// Format a number rounded to two decimals with trailing zeros removed.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{rounded:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
