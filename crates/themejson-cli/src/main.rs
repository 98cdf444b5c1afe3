//! # themejson CLI entry point
//!
//! Parses command-line arguments, loads engine options and dispatches to
//! subcommand handlers.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use themejson_cli::load_options;
use themejson_cli::resolve::{run_resolve, ResolveArgs};
use themejson_cli::validate::{run_validate, ValidateArgs};

/// Theme configuration tooling.
///
/// Validates theme.json-style documents and prints their resolved settings
/// and presets.
#[derive(Parser, Debug)]
#[command(name = "themejson", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Engine options file (YAML or JSON).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate theme documents and print their diagnostics.
    Validate(ValidateArgs),

    /// Print resolved settings, block settings or presets as JSON.
    Resolve(ResolveArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let options = match load_options(cli.config.as_deref()) {
        Ok(options) => options,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::from(2);
        }
    };
    tracing::debug!(mode = ?options.mode, "engine options loaded");

    let result = match cli.command {
        Commands::Validate(args) => run_validate(&args, &options),
        Commands::Resolve(args) => run_resolve(&args, &options),
    };

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parse_validate_paths() {
        let cli = Cli::try_parse_from(["themejson", "validate", "a.json", "b.yaml"]).unwrap();
        if let Commands::Validate(args) = cli.command {
            assert_eq!(args.paths, vec![PathBuf::from("a.json"), PathBuf::from("b.yaml")]);
            assert!(!args.strict);
        } else {
            panic!("expected validate");
        }
    }

    #[test]
    fn cli_parse_validate_requires_a_path() {
        assert!(Cli::try_parse_from(["themejson", "validate"]).is_err());
    }

    #[test]
    fn cli_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "themejson",
            "validate",
            "theme.json",
            "--strict",
            "-vv",
            "--config",
            "engine.yaml",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("engine.yaml")));
        if let Commands::Validate(args) = cli.command {
            assert!(args.strict);
        }
    }

    #[test]
    fn cli_parse_resolve_basic() {
        let cli = Cli::try_parse_from(["themejson", "resolve", "theme.json"]).unwrap();
        if let Commands::Resolve(args) = cli.command {
            assert_eq!(args.path, PathBuf::from("theme.json"));
            assert!(args.parent.is_none());
            assert!(args.block.is_none());
            assert!(!args.presets);
            assert!(!args.export);
            assert!(args.out.is_none());
        } else {
            panic!("expected resolve");
        }
    }

    #[test]
    fn cli_parse_resolve_with_all_options() {
        let cli = Cli::try_parse_from([
            "themejson",
            "resolve",
            "child.json",
            "--parent",
            "parent.json",
            "--block",
            "core/button",
            "--presets",
            "-o",
            "out.json",
            "--strict",
        ])
        .unwrap();
        if let Commands::Resolve(args) = cli.command {
            assert_eq!(args.parent, Some(PathBuf::from("parent.json")));
            assert_eq!(args.block.as_deref(), Some("core/button"));
            assert!(args.presets);
            assert_eq!(args.out, Some(PathBuf::from("out.json")));
            assert!(args.strict);
        }
    }

    #[test]
    fn cli_parse_presets_conflicts_with_export() {
        assert!(
            Cli::try_parse_from(["themejson", "resolve", "t.json", "--presets", "--export"]).is_err()
        );
    }
}
