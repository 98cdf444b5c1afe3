//! # Normalization Errors
//!
//! Normalization either produces a complete [`ResolvedConfig`](crate::ResolvedConfig)
//! or nothing. These are the reasons it produces nothing. The diagnostics
//! that caused a refusal are returned separately by the validator, so the
//! errors only carry counts.

use serde_json::Value;
use thiserror::Error;

use themejson_core::{Diagnostic, DiagnosticKind, FieldPath, ThemeError};
use themejson_schema::MAX_SCALE_STEPS;

/// Why a document could not be normalized.
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// At least one fatal diagnostic (unsupported or missing version).
    #[error("normalization blocked by {fatal} fatal diagnostic(s)")]
    Blocked {
        /// Number of fatal diagnostics.
        fatal: usize,
    },

    /// Strict mode refuses documents that style disabled features.
    #[error("strict mode: {count} style propert(ies) set while the governing setting is disabled")]
    StrictModeViolation {
        /// Number of disabled-feature diagnostics.
        count: usize,
    },

    /// The document header could not be read.
    #[error(transparent)]
    Theme(#[from] ThemeError),
}

/// Why a spacing-scale descriptor produced no sizes.
#[derive(Error, Debug)]
pub enum ScaleError {
    /// The descriptor does not deserialize (wrong kinds, or `steps` beyond `u32`).
    #[error("malformed spacing scale: {source}")]
    Malformed {
        /// The descriptor as found in the settings node.
        value: Value,
        #[source]
        source: serde_json::Error,
    },

    /// More steps than are ever generated.
    #[error("spacing scale has {steps} steps; at most {max} are generated", max = MAX_SCALE_STEPS)]
    TooManySteps {
        /// Declared step count.
        steps: u32,
    },
}

impl ScaleError {
    /// The diagnostic reporting this error for the descriptor at `path`.
    pub fn to_diagnostic(&self, path: &FieldPath) -> Diagnostic {
        match self {
            Self::Malformed { value, .. } => Diagnostic::new(
                DiagnosticKind::FieldType,
                path.clone(),
                "a spacing scale descriptor",
                Some(value.clone()),
            ),
            Self::TooManySteps { steps } => Diagnostic::new(
                DiagnosticKind::RangeViolation,
                path.key("steps"),
                format!("integer from 1 to {MAX_SCALE_STEPS}"),
                Some(Value::from(*steps)),
            ),
        }
    }
}
