//! # Validate Subcommand
//!
//! Checks theme documents and prints their diagnostics.
//!
//! A document passes when nothing in it is more serious than a warning.
//! In strict mode, styling a disabled feature is an error, so it fails the
//! document too.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Args;

use themejson_core::Severity;
use themejson_resolve::{EngineOptions, ThemeEngine};
use themejson_schema::ValidationMode;

/// Arguments for the `themejson validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Theme documents to validate (.json, .yaml or .yml).
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Treat styles on disabled features as errors.
    #[arg(long)]
    pub strict: bool,
}

/// Outcome for one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileStatus {
    Passed,
    Failed,
    Unreadable,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every file passes, 1 if any file has blocking
/// diagnostics, 2 if any file could not be read.
pub fn run_validate(args: &ValidateArgs, options: &EngineOptions) -> Result<u8> {
    let options = if args.strict {
        options.clone().with_mode(ValidationMode::Strict)
    } else {
        options.clone()
    };
    let engine = ThemeEngine::new(options);

    let statuses: Vec<FileStatus> = args
        .paths
        .iter()
        .map(|path| validate_single_path(&engine, path))
        .collect();

    let passed = statuses.iter().filter(|s| **s == FileStatus::Passed).count();
    if statuses.len() > 1 {
        println!("Themes: {}/{} passed", passed, statuses.len());
    }

    if statuses.contains(&FileStatus::Unreadable) {
        Ok(2)
    } else if statuses.contains(&FileStatus::Failed) {
        Ok(1)
    } else {
        Ok(0)
    }
}

fn validate_single_path(engine: &ThemeEngine, path: &Path) -> FileStatus {
    let doc = match crate::load_document(path) {
        Ok(doc) => doc,
        Err(e) => {
            println!("ERROR: {e}");
            return FileStatus::Unreadable;
        }
    };

    let diagnostics = engine.validate(&doc);
    tracing::info!(
        path = %path.display(),
        diagnostics = diagnostics.len(),
        "validated theme"
    );

    let blocking = diagnostics
        .max_severity()
        .is_some_and(|severity| severity >= Severity::Error);
    if blocking {
        println!("FAIL: {}", path.display());
    } else {
        println!("OK: {}", path.display());
    }
    if !diagnostics.is_empty() {
        println!("{diagnostics}");
    }

    if blocking {
        FileStatus::Failed
    } else {
        FileStatus::Passed
    }
}
