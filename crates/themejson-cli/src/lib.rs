//! # themejson-cli — Theme Configuration Tooling
//!
//! Provides the `themejson` command-line interface over the validation and
//! resolution crates. This is the only crate in the workspace that touches
//! the file system.
//!
//! ## Subcommands
//!
//! - `themejson validate`: diagnostics for one or more theme documents.
//! - `themejson resolve`: resolved settings, block settings, presets or the
//!   minimal exported document as JSON, optionally over a parent theme.
//!
//! ```bash
//! themejson validate themes/*.json --strict
//! themejson resolve themes/child.json --parent themes/full.json --presets
//! themejson -vv --config engine.yaml resolve theme.yaml --block core/button
//! ```
//!
//! ## Exit Codes
//!
//! `0` success, `1` blocking diagnostics, `2` operational failure (unreadable
//! files, bad options).

pub mod resolve;
pub mod validate;

use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

use themejson_resolve::EngineOptions;

/// Failure to read a document or an options file.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse YAML in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Parsed as YAML, but holds something JSON cannot represent.
    #[error("unsupported YAML in {}: {reason}", path.display())]
    YamlValue { path: PathBuf, reason: String },

    #[error("invalid options in {}: {reason}", path.display())]
    Options { path: PathBuf, reason: String },
}

/// On-disk format of a document, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` and `.yml` are YAML; anything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })
}

/// Load a theme document into the JSON value model.
pub fn load_document(path: &Path) -> Result<Value, LoadError> {
    let content = read(path)?;
    match DocumentFormat::from_path(path) {
        DocumentFormat::Json => serde_json::from_str(&content).map_err(|e| LoadError::Json {
            path: path.to_path_buf(),
            source: e,
        }),
        DocumentFormat::Yaml => {
            let yaml: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| LoadError::Yaml {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            yaml_to_json_value(yaml).map_err(|reason| LoadError::YamlValue {
                path: path.to_path_buf(),
                reason,
            })
        }
    }
}

/// Load engine options. No path means the defaults.
pub fn load_options(path: Option<&Path>) -> Result<EngineOptions, LoadError> {
    let Some(path) = path else {
        return Ok(EngineOptions::default());
    };
    let value = load_document(path)?;
    if value.is_null() {
        return Ok(EngineOptions::default());
    }
    serde_json::from_value(value).map_err(|e| LoadError::Options {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

/// Convert a `serde_yaml::Value` to a `serde_json::Value`.
///
/// Tagged values keep their inner value. Mapping keys must be strings, and
/// floats must be finite; anything else is an error rather than a silently
/// altered document.
pub fn yaml_to_json_value(yaml: serde_yaml::Value) -> Result<Value, String> {
    match yaml {
        serde_yaml::Value::Null => Ok(Value::Null),
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::from(i))
            } else if let Some(u) = n.as_u64() {
                Ok(Value::from(u))
            } else if let Some(f) = n.as_f64() {
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .ok_or_else(|| format!("cannot represent float {f} in JSON"))
            } else {
                Err(format!("unsupported YAML number: {n}"))
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::String(s)),
        serde_yaml::Value::Sequence(seq) => seq
            .into_iter()
            .map(yaml_to_json_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        serde_yaml::Value::Mapping(map) => {
            let mut obj = serde_json::Map::new();
            for (k, v) in map {
                let serde_yaml::Value::String(key) = k else {
                    return Err(format!("mapping key {k:?} is not a string"));
                };
                let value = yaml_to_json_value(v).map_err(|e| format!("{key}: {e}"))?;
                obj.insert(key, value);
            }
            Ok(Value::Object(obj))
        }
        serde_yaml::Value::Tagged(tagged) => yaml_to_json_value(tagged.value),
    }
}
