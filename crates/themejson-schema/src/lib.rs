//! # themejson-schema — Field Registry & Validation
//!
//! Knows every field a theme configuration document may contain and checks
//! documents against that knowledge.
//!
//! ## Registry (`registry`)
//!
//! [`SchemaRegistry`] is a static tree of field definitions: kind, default,
//! required flag, preset category. The shared instance from [`registry()`]
//! is built once and never mutated.
//!
//! ## Block Rules (`blocks`)
//!
//! Block-scoped settings accept any well-formed `namespace/name`. The
//! [`BlockRule`] table narrows what a few core blocks may declare.
//!
//! ## Validation (`validate`)
//!
//! [`Validator::validate`] walks a document and returns every finding as an
//! ordered [`Diagnostics`](themejson_core::Diagnostics) collection. It never
//! stops early and never mutates its input.
//!
//! ## Crate Policy
//!
//! - Depends only on `themejson-core` internally.
//! - No I/O. Documents arrive already parsed.
//! - Diagnostics order is part of the contract: identical input yields an
//!   identical report.

pub mod blocks;
pub mod registry;
pub mod validate;

pub use blocks::{block_rule, is_known_core_block, BlockRule, KNOWN_CORE_BLOCKS};
pub use registry::{
    registry, FieldKind, FieldSpec, LookupError, SchemaNode, SchemaRegistry, APPEARANCE_TOOLS,
    MAX_SCALE_STEPS,
};
pub use validate::{is_preset_reference, ValidationMode, Validator};
