//! # Theme Engine
//!
//! Runs the full pipeline over one document:
//!
//! ```text
//! document -> Validator -> Normalizer -> PresetResolver -> ResolvedTheme
//!                 |             |               |
//!                 +------- Diagnostics ---------+
//! ```
//!
//! Diagnostics are always returned, whether or not normalization went
//! ahead. The engine holds no per-document state, so one engine can
//! process any number of documents, from any number of threads.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use themejson_core::{Diagnostics, FieldPath};
use themejson_schema::{registry, SchemaRegistry, Validator};

use crate::error::NormalizeError;
use crate::normalize::Normalizer;
use crate::options::EngineOptions;
use crate::presets::{PresetResolver, ResolvedPresets};
use crate::resolved::{merge_themes, ResolvedConfig};

/// Presets of the global scope and of every block that declares settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThemePresets {
    /// Presets of the global settings.
    pub global: ResolvedPresets,
    /// Blocks without overrides share the global presets and are left out.
    pub blocks: BTreeMap<String, ResolvedPresets>,
}

impl ThemePresets {
    /// The presets in effect for `block`.
    pub fn for_block(&self, block: &str) -> &ResolvedPresets {
        self.blocks.get(block).unwrap_or(&self.global)
    }
}

/// A normalized configuration and its presets.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTheme {
    /// Normalized settings, styles and templates.
    pub config: ResolvedConfig,
    /// Presets resolved from `config`.
    pub presets: ThemePresets,
}

/// Everything one pipeline run produced.
#[derive(Debug)]
pub struct ProcessedTheme {
    /// Validation and preset-resolution diagnostics, in that order.
    pub diagnostics: Diagnostics,
    /// The resolved theme, or why normalization refused the document.
    pub outcome: Result<ResolvedTheme, NormalizeError>,
}

impl ProcessedTheme {
    /// The resolved theme, if normalization went ahead.
    pub fn theme(&self) -> Option<&ResolvedTheme> {
        self.outcome.as_ref().ok()
    }
}

/// Validates, normalizes and resolves theme documents.
#[derive(Debug, Clone)]
pub struct ThemeEngine {
    options: EngineOptions,
    registry: &'static SchemaRegistry,
}

impl Default for ThemeEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl ThemeEngine {
    /// An engine over the process-wide registry.
    pub fn new(options: EngineOptions) -> Self {
        Self {
            options,
            registry: registry(),
        }
    }

    /// Options every run uses.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// The registry documents are checked against.
    pub fn registry(&self) -> &'static SchemaRegistry {
        self.registry
    }

    /// Collect every diagnostic for `doc`.
    pub fn validate(&self, doc: &Value) -> Diagnostics {
        Validator::new(self.registry, self.options.mode).validate(doc)
    }

    /// Normalize `doc` given its validation diagnostics.
    ///
    /// # Errors
    ///
    /// See [`Normalizer::normalize`].
    pub fn normalize(
        &self,
        doc: &Value,
        diagnostics: &Diagnostics,
    ) -> Result<ResolvedConfig, NormalizeError> {
        Normalizer::new(self.registry, self.options.mode).normalize(doc, diagnostics)
    }

    /// Resolve the presets of `config`: the global scope and every block
    /// that declares overrides.
    ///
    /// A block whose spacing scale is inherited unchanged does not report
    /// the global scale's warnings a second time.
    pub fn resolve_presets(
        &self,
        config: &ResolvedConfig,
        diagnostics: &mut Diagnostics,
    ) -> ThemePresets {
        let resolver = PresetResolver::new(&self.options.fluid);
        let settings_path = FieldPath::root().key("settings");
        let global = resolver.resolve_presets(config.settings(), &settings_path, diagnostics);
        let scale_of = |settings: &Value| settings.pointer("/spacing/spacingScale").cloned();
        let global_scale = scale_of(config.settings());

        let mut blocks = BTreeMap::new();
        for (name, block) in config.blocks() {
            if !block.declares_overrides {
                continue;
            }
            let path = settings_path.key("blocks").key(name);
            let presets = if scale_of(&block.settings) == global_scale {
                resolver.resolve_presets(&block.settings, &path, &mut Diagnostics::new())
            } else {
                resolver.resolve_presets(&block.settings, &path, diagnostics)
            };
            blocks.insert(name.clone(), presets);
        }
        ThemePresets { global, blocks }
    }

    /// Run the whole pipeline over one document.
    pub fn process(&self, doc: &Value) -> ProcessedTheme {
        let mut diagnostics = self.validate(doc);
        tracing::debug!(diagnostics = diagnostics.len(), mode = ?self.options.mode, "document validated");
        let outcome = self.normalize(doc, &diagnostics).map(|config| {
            let presets = self.resolve_presets(&config, &mut diagnostics);
            ResolvedTheme { config, presets }
        });
        if let Err(err) = &outcome {
            tracing::info!(error = %err, "normalization refused");
        }
        ProcessedTheme {
            diagnostics,
            outcome,
        }
    }

    /// Process a parent and a child document and resolve the child over
    /// the parent. Diagnostics of both documents are returned, parent
    /// first; either document failing to normalize fails the run.
    pub fn process_with_parent(&self, parent: &Value, child: &Value) -> ProcessedTheme {
        let mut diagnostics = self.validate(parent);
        let parent_config = self.normalize(parent, &diagnostics);
        let child_diagnostics = self.validate(child);
        let child_config = self.normalize(child, &child_diagnostics);
        diagnostics.extend(child_diagnostics);

        let outcome = parent_config.and_then(|parent| {
            let child = child_config?;
            let config = merge_themes(self.registry, &parent, &child);
            let presets = self.resolve_presets(&config, &mut diagnostics);
            Ok(ResolvedTheme { config, presets })
        });
        ProcessedTheme {
            diagnostics,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use themejson_core::{DiagnosticKind, PresetCategory};
    use themejson_schema::ValidationMode;

    #[test]
    fn valid_document_resolves_presets() {
        let processed = ThemeEngine::default().process(&json!({
            "version": 2,
            "settings": {"color": {"palette": [
                {"name": "Primary", "slug": "primary", "color": "#005"}
            ]}}
        }));
        assert!(processed.diagnostics.is_empty());
        let theme = processed.theme().unwrap();
        let primary = theme
            .presets
            .global
            .find(PresetCategory::Palette, "primary")
            .unwrap();
        assert_eq!(primary.custom_property, "--wp--preset--color--primary");
        // default scale: 7 steps
        assert_eq!(theme.presets.global.get(PresetCategory::SpacingSizes).len(), 7);
    }

    #[test]
    fn inherited_scale_warnings_are_reported_once() {
        let processed = ThemeEngine::default().process(&json!({
            "version": 2,
            "settings": {
                "spacing": {"spacingScale": {"operator": "+", "increment": 10, "steps": 5, "mediumStep": 16, "unit": "px"}},
                "blocks": {"core/group": {"color": {"text": false}}}
            }
        }));
        assert_eq!(processed.diagnostics.count(DiagnosticKind::InvalidScaleStep), 1);
        let theme = processed.theme().unwrap();
        assert!(theme.presets.blocks.contains_key("core/group"));
        assert_eq!(
            theme.presets.for_block("core/quote"),
            &theme.presets.global
        );
    }

    #[test]
    fn fatal_header_still_reports_other_diagnostics() {
        let processed = ThemeEngine::default().process(&json!({
            "version": 1,
            "settings": {"color": {"text": "no"}}
        }));
        assert!(matches!(processed.outcome, Err(NormalizeError::Blocked { .. })));
        assert_eq!(processed.diagnostics.count(DiagnosticKind::FatalSchema), 1);
        assert_eq!(processed.diagnostics.count(DiagnosticKind::FieldType), 1);
    }

    #[test]
    fn parent_failure_fails_the_run() {
        let engine = ThemeEngine::new(EngineOptions::default().with_mode(ValidationMode::Strict));
        let processed = engine.process_with_parent(&json!({}), &json!({"version": 2}));
        assert!(processed.outcome.is_err());
        assert!(processed.diagnostics.has_fatal());
    }
}
