//! # themejson-core — Foundational Types for Theme Configuration
//!
//! This crate is the leaf of the themejson workspace. It defines the
//! primitives every other crate shares: validated identifiers, field
//! paths into a configuration document, the diagnostic taxonomy, CSS
//! length handling, preset categories, and the typed shapes of list items
//! (font faces, custom templates, template parts).
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for identifiers.** `Slug` and `BlockName` have
//!    validated constructors. A slug that is not kebab-case cannot be
//!    turned into a CSS identifier, so it cannot be constructed.
//!
//! 2. **Diagnostics are values, not errors.** Validation never fails fast;
//!    every problem becomes a [`Diagnostic`] with a path, the expected
//!    kind, the actual value and a severity.
//!
//! 3. **Single `PresetCategory` enum.** Every preset collection is named
//!    once, together with the identifiers derived from it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `themejson-*` crates.
//! - No I/O.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod css;
pub mod diagnostic;
pub mod document;
pub mod error;
pub mod identity;
pub mod path;
pub mod preset;

// Re-export primary types for ergonomic imports.
pub use css::{format_number, is_length_or_percentage, CssLength};
pub use diagnostic::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use document::{
    CustomTemplate, DocumentHeader, FontDisplay, FontFace, FontSource, FontWeight, TemplatePart,
    SUPPORTED_VERSION,
};
pub use error::{IdentifierError, ThemeError};
pub use identity::{BlockName, Slug};
pub use path::{FieldPath, Segment};
pub use preset::PresetCategory;
