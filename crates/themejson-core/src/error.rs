//! # Error Types — Structured Error Hierarchy
//!
//! Defines the error types shared by the themejson crates. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Problems found *inside* a configuration document are reported as
//!   [`Diagnostic`](crate::Diagnostic)s, not errors.
//! - Errors here describe operations that cannot proceed at all: a
//!   malformed identifier handed to a constructor, or a header that names
//!   an unsupported format version. Reading documents from disk is the
//!   CLI's concern and has its own error type there.

use thiserror::Error;

/// A document that cannot be processed at all.
#[derive(Error, Debug)]
pub enum ThemeError {
    /// The document header is missing or names an unsupported version.
    #[error("unsupported document version: expected {expected}, found {found}")]
    UnsupportedVersion {
        /// The version this implementation supports.
        expected: u64,
        /// What the document declared, rendered as JSON.
        found: String,
    },
}

/// Error constructing a validated identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentifierError {
    /// Slugs are embedded into CSS class and custom-property names.
    #[error("slug '{0}' is not kebab-case (lowercase alphanumerics separated by single hyphens)")]
    InvalidSlug(String),

    /// Block names must be `namespace/name`.
    #[error("block name '{0}' is not of the form 'namespace/name'")]
    InvalidBlockName(String),
}
