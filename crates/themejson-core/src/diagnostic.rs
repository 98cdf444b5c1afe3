//! # Diagnostics
//!
//! Structured reports produced while checking a configuration document.
//! Nothing in the pipeline throws on a single bad field: each problem is
//! recorded as one [`Diagnostic`] carrying the path, the expected kind, the
//! offending value and a [`Severity`].
//!
//! ## Taxonomy
//!
//! | Kind | Default severity | Raised when |
//! |------|------------------|-------------|
//! | `FatalSchemaError` | fatal | `version` missing or unsupported |
//! | `FieldTypeError` | error | value has the wrong JSON kind or format |
//! | `MissingFieldError` | error | a required item field is absent |
//! | `EnumViolationError` | error | value outside a closed set |
//! | `RangeError` | error | non-positive scale parameter |
//! | `InvalidSlugError` | error | slug is not kebab-case |
//! | `DuplicateSlugError` | error | slug repeated within an effective preset list |
//! | `UnknownFieldWarning` | warning | key not recognized (or not legal at block scope) |
//! | `UnknownBlockWarning` | warning | unrecognized `core/*` block |
//! | `DisabledFeatureWarning` | warning | style set although its toggle is off |
//! | `InvalidScaleStepWarning` | warning | generated spacing size is non-positive |

use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::path::FieldPath;

/// How serious a diagnostic is.
///
/// Ordered: `Warning < Error < Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Annotates the document; processing continues.
    Warning,
    /// The offending value is dropped; processing continues.
    Error,
    /// Blocks normalization entirely.
    Fatal,
}

impl Severity {
    /// Lowercase label used in text output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Fatal => "fatal",
        }
    }
}

/// What went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DiagnosticKind {
    /// Missing or unsupported `version`.
    #[serde(rename = "FatalSchemaError")]
    FatalSchema,
    /// Value has the wrong kind or format.
    #[serde(rename = "FieldTypeError")]
    FieldType,
    /// Required field absent.
    #[serde(rename = "MissingFieldError")]
    MissingField,
    /// Value outside a closed set of allowed strings.
    #[serde(rename = "EnumViolationError")]
    EnumViolation,
    /// Numeric value outside its allowed range.
    #[serde(rename = "RangeError")]
    RangeViolation,
    /// Slug that cannot become a CSS identifier.
    #[serde(rename = "InvalidSlugError")]
    InvalidSlug,
    /// Slug repeated within one effective preset list.
    #[serde(rename = "DuplicateSlugError")]
    DuplicateSlug,
    /// Key not recognized at this location.
    #[serde(rename = "UnknownFieldWarning")]
    UnknownField,
    /// `core/*` block identifier that is not a known core block.
    #[serde(rename = "UnknownBlockWarning")]
    UnknownBlock,
    /// Style property set while its governing setting is explicitly off.
    #[serde(rename = "DisabledFeatureWarning")]
    DisabledFeature,
    /// Generated spacing-scale step with a non-positive size.
    #[serde(rename = "InvalidScaleStepWarning")]
    InvalidScaleStep,
}

impl DiagnosticKind {
    /// Name used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FatalSchema => "FatalSchemaError",
            Self::FieldType => "FieldTypeError",
            Self::MissingField => "MissingFieldError",
            Self::EnumViolation => "EnumViolationError",
            Self::RangeViolation => "RangeError",
            Self::InvalidSlug => "InvalidSlugError",
            Self::DuplicateSlug => "DuplicateSlugError",
            Self::UnknownField => "UnknownFieldWarning",
            Self::UnknownBlock => "UnknownBlockWarning",
            Self::DisabledFeature => "DisabledFeatureWarning",
            Self::InvalidScaleStep => "InvalidScaleStepWarning",
        }
    }

    /// Severity assigned when no mode-specific override applies.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::FatalSchema => Severity::Fatal,
            Self::FieldType
            | Self::MissingField
            | Self::EnumViolation
            | Self::RangeViolation
            | Self::InvalidSlug
            | Self::DuplicateSlug => Severity::Error,
            Self::UnknownField
            | Self::UnknownBlock
            | Self::DisabledFeature
            | Self::InvalidScaleStep => Severity::Warning,
        }
    }
}

/// A single finding with structured context.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// What went wrong.
    pub kind: DiagnosticKind,
    /// How serious it is.
    pub severity: Severity,
    /// Where in the document.
    pub path: FieldPath,
    /// Human-readable description of what was expected at `path`.
    pub expected: String,
    /// The offending value, if one was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Value>,
}

impl Diagnostic {
    /// Create a diagnostic with the kind's default severity.
    pub fn new(
        kind: DiagnosticKind,
        path: FieldPath,
        expected: impl Into<String>,
        actual: Option<Value>,
    ) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            path,
            expected: expected.into(),
            actual,
        }
    }

    /// Override the severity.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Returns true if this diagnostic blocks normalization.
    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} at {}: expected {}",
            self.severity.as_str(),
            self.kind.as_str(),
            self.path,
            self.expected
        )?;
        match &self.actual {
            Some(actual) => write!(f, ", found {actual}"),
            None => Ok(()),
        }
    }
}

/// Ordered collection of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    diagnostics: Vec<Diagnostic>,
}

impl Diagnostics {
    /// An empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Append every diagnostic of `other`, preserving order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Returns the number of diagnostics.
    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    /// Returns true if there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    /// Returns true if any diagnostic is fatal.
    pub fn has_fatal(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_fatal)
    }

    /// The highest severity present, if any.
    pub fn max_severity(&self) -> Option<Severity> {
        self.diagnostics.iter().map(|d| d.severity).max()
    }

    /// All diagnostics of one kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.kind == kind)
    }

    /// Number of diagnostics of one kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.of_kind(kind).count()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

impl FromIterator<Diagnostic> for Diagnostics {
    fn from_iter<I: IntoIterator<Item = Diagnostic>>(iter: I) -> Self {
        Self {
            diagnostics: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "  {d}")?;
        }
        Ok(())
    }
}
