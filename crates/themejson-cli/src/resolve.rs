//! # Resolve Subcommand
//!
//! Prints what a theme resolves to, as pretty JSON:
//!
//! - the whole resolved configuration (default),
//! - one block's effective settings (`--block`),
//! - the resolved presets, globally or for one block (`--presets`),
//! - or the minimal equivalent document (`--export`).
//!
//! Diagnostics go to stderr so the JSON on stdout stays parseable.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde_json::Value;

use themejson_core::BlockName;
use themejson_resolve::{EngineOptions, ResolvedTheme, ThemeEngine};
use themejson_schema::ValidationMode;

/// Arguments for the `themejson resolve` subcommand.
#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Theme document to resolve.
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Parent theme the document is resolved over.
    #[arg(long)]
    pub parent: Option<PathBuf>,

    /// Only print the settings (or presets) in effect for this block.
    #[arg(long, value_name = "NAME")]
    pub block: Option<String>,

    /// Print resolved presets instead of settings.
    #[arg(long, conflicts_with = "export")]
    pub presets: bool,

    /// Print the minimal document that resolves to the same configuration.
    #[arg(long)]
    pub export: bool,

    /// Output path. Prints to stdout when absent.
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Refuse documents that style disabled features.
    #[arg(long)]
    pub strict: bool,
}

/// Execute the resolve subcommand.
///
/// Returns exit code: 0 on success, 1 if the theme could not be normalized.
pub fn run_resolve(args: &ResolveArgs, options: &EngineOptions) -> Result<u8> {
    if let Some(block) = &args.block {
        BlockName::new(block.as_str()).with_context(|| format!("invalid --block '{block}'"))?;
        if args.export {
            bail!("--block cannot be combined with --export");
        }
    }

    let options = if args.strict {
        options.clone().with_mode(ValidationMode::Strict)
    } else {
        options.clone()
    };
    let engine = ThemeEngine::new(options);

    let doc = crate::load_document(&args.path)?;
    let processed = match &args.parent {
        Some(parent) => {
            let parent_doc = crate::load_document(parent)?;
            engine.process_with_parent(&parent_doc, &doc)
        }
        None => engine.process(&doc),
    };

    for diagnostic in &processed.diagnostics {
        eprintln!("{diagnostic}");
    }
    let theme = match &processed.outcome {
        Ok(theme) => theme,
        Err(e) => {
            eprintln!("FAIL: {}: {e}", args.path.display());
            return Ok(1);
        }
    };

    let output = render(args, &engine, theme)?;
    let text = serde_json::to_string_pretty(&output).context("failed to serialize output")?;
    match &args.out {
        Some(out) => {
            std::fs::write(out, format!("{text}\n"))
                .with_context(|| format!("failed to write {}", out.display()))?;
            tracing::info!(path = %out.display(), "wrote resolved theme");
        }
        None => println!("{text}"),
    }
    Ok(0)
}

fn render(args: &ResolveArgs, engine: &ThemeEngine, theme: &ResolvedTheme) -> Result<Value> {
    let value = match (&args.block, args.presets, args.export) {
        (_, _, true) => theme.config.to_document(engine.registry()),
        (Some(block), true, _) => serde_json::to_value(theme.presets.for_block(block))?,
        (None, true, _) => serde_json::to_value(&theme.presets)?,
        (Some(block), false, _) => theme.config.settings_for_block(block).clone(),
        (None, false, _) => serde_json::to_value(&theme.config)?,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn args(path: PathBuf) -> ResolveArgs {
        ResolveArgs {
            path,
            parent: None,
            block: None,
            presets: false,
            export: false,
            out: None,
            strict: false,
        }
    }

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn writes_block_settings() {
        let dir = tempfile::tempdir().unwrap();
        let theme = write(
            dir.path(),
            "theme.json",
            r#"{"version": 2, "settings": {"color": {"text": false}, "blocks": {"core/quote": {"color": {"link": true}}}}}"#,
        );
        let out = dir.path().join("quote.json");
        let mut args = args(theme);
        args.block = Some("core/quote".into());
        args.out = Some(out.clone());

        assert_eq!(run_resolve(&args, &EngineOptions::default()).unwrap(), 0);
        let settings = read_json(&out);
        assert_eq!(settings["color"]["text"], serde_json::json!(false));
        assert_eq!(settings["color"]["link"], serde_json::json!(true));
    }

    #[test]
    fn writes_presets_over_parent() {
        let dir = tempfile::tempdir().unwrap();
        let parent = write(
            dir.path(),
            "parent.json",
            r##"{"version": 2, "settings": {"color": {"palette": [{"name": "Ink", "slug": "ink", "color": "#111"}]}}}"##,
        );
        let child = write(dir.path(), "child.yaml", "version: 2\n");
        let out = dir.path().join("presets.json");
        let mut args = args(child);
        args.parent = Some(parent);
        args.presets = true;
        args.out = Some(out.clone());

        assert_eq!(run_resolve(&args, &EngineOptions::default()).unwrap(), 0);
        let presets = read_json(&out);
        assert_eq!(presets["global"]["presets"]["palette"][0]["slug"], "ink");
    }

    #[test]
    fn refused_documents_exit_one() {
        let dir = tempfile::tempdir().unwrap();
        let theme = write(dir.path(), "theme.json", r#"{"version": 1}"#);
        assert_eq!(run_resolve(&args(theme), &EngineOptions::default()).unwrap(), 1);
    }

    #[test]
    fn malformed_block_name_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let theme = write(dir.path(), "theme.json", r#"{"version": 2}"#);
        let mut args = args(theme);
        args.block = Some("Not A Block".into());
        assert!(run_resolve(&args, &EngineOptions::default()).is_err());
    }
}
