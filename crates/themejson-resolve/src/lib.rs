//! # themejson-resolve — Normalization & Preset Resolution
//!
//! Turns a validated theme configuration document into a fully-qualified
//! [`ResolvedConfig`] and expands its presets into concrete values.
//!
//! ## Stages
//!
//! - [`normalize`]: reduces a document to its explicit layer and resolves
//!   it over the registry defaults. Refuses documents with fatal
//!   diagnostics, and in strict mode documents that style disabled features.
//! - [`merge`]: the precedence-ordered merge every scope goes through
//!   (defaults, global, block), including the `appearanceTools` expansion.
//! - [`presets`]: preset lists, generated spacing scales ([`scale`]) and
//!   fluid font sizes ([`fluid`]).
//! - [`pipeline`]: [`ThemeEngine`], running validation, normalization and
//!   preset resolution as one unit of work.
//!
//! ## Crate Policy
//!
//! - No I/O. Documents arrive as parsed `serde_json::Value`s.
//! - The input document is never modified.
//! - Validation findings are diagnostics; only a refusal to normalize is an
//!   error ([`NormalizeError`]). A [`ScaleError`] met while resolving presets
//!   is reported as a diagnostic too.

pub mod error;
pub mod fluid;
pub mod merge;
pub mod normalize;
pub mod options;
pub mod pipeline;
pub mod presets;
pub mod resolved;
pub mod scale;

pub use error::{NormalizeError, ScaleError};
pub use fluid::{fluid_font_size, FluidBounds, FluidOptions};
pub use merge::ListPolicy;
pub use normalize::{Normalizer, ThemeLayer};
pub use options::EngineOptions;
pub use pipeline::{ProcessedTheme, ResolvedTheme, ThemeEngine, ThemePresets};
pub use presets::{CustomProperty, PresetResolver, PresetValue, ResolvedPreset, ResolvedPresets};
pub use resolved::{merge_themes, ResolvedBlock, ResolvedConfig};
pub use scale::{resolve_spacing_scale, Operator, SpacingScale, SpacingSize};
