//! # Identifier Newtypes
//!
//! Newtype wrappers for the two identifier namespaces of a theme
//! configuration document: preset slugs and block names. You cannot pass
//! a `BlockName` where a `Slug` is expected, and neither can be built
//! from a string that would produce a broken CSS identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IdentifierError;

/// Kebab-case identifier of a preset, unique within its preset list.
///
/// Slugs are embedded verbatim into generated class names
/// (`has-<slug>-color`) and custom properties
/// (`--wp--preset--color--<slug>`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Slug(String);

/// Identifier of a block type, `namespace/name` (e.g. `core/paragraph`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BlockName(String);

/// Returns true if `s` is lowercase alphanumerics separated by single hyphens.
pub fn is_kebab_case(s: &str) -> bool {
    !s.is_empty()
        && s.split('-')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()))
}

impl Slug {
    /// Validate and wrap a slug.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidSlug`] if `slug` is not kebab-case.
    pub fn new(slug: impl Into<String>) -> Result<Self, IdentifierError> {
        let slug = slug.into();
        if is_kebab_case(&slug) {
            Ok(Self(slug))
        } else {
            Err(IdentifierError::InvalidSlug(slug))
        }
    }

    /// Access the slug text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl BlockName {
    /// Validate and wrap a block name.
    ///
    /// Both the namespace and the name must be kebab-case and separated by
    /// exactly one `/`.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::InvalidBlockName`] otherwise.
    pub fn new(name: impl Into<String>) -> Result<Self, IdentifierError> {
        let name = name.into();
        let valid = match name.split_once('/') {
            Some((namespace, block)) => is_kebab_case(namespace) && is_kebab_case(block),
            None => false,
        };
        if valid {
            Ok(Self(name))
        } else {
            Err(IdentifierError::InvalidBlockName(name))
        }
    }

    /// Access the full `namespace/name` text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part before the `/`.
    pub fn namespace(&self) -> &str {
        self.0.split_once('/').map_or("", |(ns, _)| ns)
    }

    /// True for blocks in the `core` namespace.
    pub fn is_core(&self) -> bool {
        self.namespace() == "core"
    }
}

impl TryFrom<String> for Slug {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<String> for BlockName {
    type Error = IdentifierError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Slug> for String {
    fn from(value: Slug) -> Self {
        value.0
    }
}

impl From<BlockName> for String {
    fn from(value: BlockName) -> Self {
        value.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for BlockName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
