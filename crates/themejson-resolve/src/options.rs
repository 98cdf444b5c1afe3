//! # Engine Options
//!
//! Tunables for a [`ThemeEngine`](crate::ThemeEngine) run. Every field has a
//! default, so an empty options file (or none at all) is valid.
//!
//! ```yaml
//! mode: strict
//! fluid:
//!   min_viewport_width: 360px
//!   max_viewport_width: 1440px
//! ```

use serde::{Deserialize, Serialize};

use themejson_schema::ValidationMode;

use crate::fluid::FluidOptions;

/// Options for validating, normalizing and resolving a theme.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineOptions {
    /// Whether styling a disabled feature blocks normalization.
    pub mode: ValidationMode,
    /// Fluid typography parameters.
    pub fluid: FluidOptions,
}

impl EngineOptions {
    /// Options with `mode` replaced.
    pub fn with_mode(mut self, mode: ValidationMode) -> Self {
        self.mode = mode;
        self
    }
}
