//! Configuration layering.
//!
//! Values are merged from lowest to highest precedence:
//!
//! 1. the `[export]` table of `client-export.toml` (or `--config`)
//! 2. `CLIENT_EXPORT_*` environment variables
//! 3. command-line flags
//!
//! Layers 2 and 3 are merged by clap before they reach this module.
//!
//! # Example file
//!
//! ```toml
//! [export]
//! application_name = "orders"
//! export_module_path = "../orders-client"
//! sources = ["src"]
//! ```
//!
//! Relative paths in the file are resolved against the file's directory.

use clap::Args;
use client_export_core::{Error, ExportConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "client-export.toml";

/// Source root scanned when neither flags nor file name one.
pub const DEFAULT_SOURCE_DIR: &str = "src";

/// Arguments selecting the sources to scan.
#[derive(Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Configuration file (defaults to ./client-export.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Source root to scan (repeatable)
    #[arg(short, long = "source", num_args = 1)]
    pub sources: Vec<PathBuf>,
}

/// Arguments for commands that write generated files.
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// Sources and configuration file
    #[command(flatten)]
    pub input: SourceArgs,

    /// Remote-target name written into every leaf interface
    #[arg(long, env = "CLIENT_EXPORT_APPLICATION_NAME")]
    pub application_name: Option<String>,

    /// Absolute path of the module receiving generated sources
    #[arg(long, env = "CLIENT_EXPORT_MODULE_PATH")]
    pub export_module_path: Option<PathBuf>,
}

/// Parsed `client-export.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// The `[export]` table
    #[serde(default)]
    pub export: ExportSection,
}

/// The `[export]` table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportSection {
    /// Remote-target name
    pub application_name: Option<String>,
    /// Output module path
    pub export_module_path: Option<PathBuf>,
    /// Source roots to scan
    #[serde(default)]
    pub sources: Vec<PathBuf>,
}

impl ConfigFile {
    /// Parses file content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the content is not valid TOML or
    /// contains unknown keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use client_export_cli::commands::config::ConfigFile;
    ///
    /// let file = ConfigFile::parse("[export]\napplication_name = \"orders\"\n").unwrap();
    /// assert_eq!(file.export.application_name.as_deref(), Some("orders"));
    /// assert!(ConfigFile::parse("[export]\nunknown = 1\n").is_err());
    /// ```
    pub fn parse(content: &str) -> Result<Self, Error> {
        toml::from_str(content).map_err(|e| Error::ConfigError {
            message: format!("invalid configuration file: {e}"),
        })
    }

    /// Reads and parses `path`, resolving relative paths against its
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigError {
            message: format!("cannot read {}: {e}", path.display()),
        })?;

        let mut file = Self::parse(&content).map_err(|e| Error::ConfigError {
            message: format!("{}: {e}", path.display()),
        })?;

        let absolute = std::path::absolute(path).map_err(|e| Error::ConfigError {
            message: format!("cannot resolve {}: {e}", path.display()),
        })?;
        let base = absolute.parent().unwrap_or_else(|| Path::new("/"));
        file.export.export_module_path = file
            .export
            .export_module_path
            .map(|p| base.join(p));
        file.export.sources = file.export.sources.iter().map(|p| base.join(p)).collect();

        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(file)
    }

    /// Loads the explicit file, or the default file if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if an explicit file is missing or any
    /// selected file is invalid.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, Error> {
        match explicit {
            Some(path) => Self::load(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Source roots to scan: flags win over the file, then [`DEFAULT_SOURCE_DIR`].
#[must_use]
pub fn resolve_sources(args: &SourceArgs, file: &ConfigFile) -> Vec<PathBuf> {
    if !args.sources.is_empty() {
        args.sources.clone()
    } else if !file.export.sources.is_empty() {
        file.export.sources.clone()
    } else {
        vec![PathBuf::from(DEFAULT_SOURCE_DIR)]
    }
}

/// Merges flags and environment over the file into a validated
/// [`ExportConfig`].
///
/// # Errors
///
/// Returns [`Error::ConfigError`] if a value is missing on every layer or
/// fails validation.
pub fn resolve_config(args: &ExportArgs, file: &ConfigFile) -> Result<ExportConfig, Error> {
    let application_name = args
        .application_name
        .clone()
        .or_else(|| file.export.application_name.clone())
        .unwrap_or_default();
    let export_module_path = args
        .export_module_path
        .clone()
        .or_else(|| file.export.export_module_path.clone())
        .unwrap_or_default();

    ExportConfig::new(application_name, export_module_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn export_args(name: Option<&str>, path: Option<&str>) -> ExportArgs {
        ExportArgs {
            input: SourceArgs::default(),
            application_name: name.map(ToString::to_string),
            export_module_path: path.map(PathBuf::from),
        }
    }

    #[test]
    fn test_parse_full_file() {
        let file = ConfigFile::parse(
            r#"
            [export]
            application_name = "orders"
            export_module_path = "/work/orders-client"
            sources = ["src", "generated"]
            "#,
        )
        .unwrap();

        assert_eq!(file.export.application_name.as_deref(), Some("orders"));
        assert_eq!(
            file.export.export_module_path,
            Some(PathBuf::from("/work/orders-client"))
        );
        assert_eq!(file.export.sources.len(), 2);
    }

    #[test]
    fn test_parse_empty_file() {
        assert_eq!(ConfigFile::parse("").unwrap(), ConfigFile::default());
    }

    #[test]
    fn test_parse_invalid_is_config_error() {
        let err = ConfigFile::parse("[export\n").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_load_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_CONFIG_FILE);
        std::fs::write(
            &path,
            "[export]\nexport_module_path = \"client\"\nsources = [\"src\"]\n",
        )
        .unwrap();

        let file = ConfigFile::load(&path).unwrap();
        assert_eq!(file.export.export_module_path, Some(dir.path().join("client")));
        assert_eq!(file.export.sources, [dir.path().join("src")]);
    }

    #[test]
    fn test_discover_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let err = ConfigFile::discover(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(err.is_config_error());
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn test_flags_override_file() {
        let file = ConfigFile::parse(
            "[export]\napplication_name = \"from-file\"\nexport_module_path = \"/file/out\"\n",
        )
        .unwrap();

        let config = resolve_config(&export_args(Some("from-flag"), None), &file).unwrap();
        assert_eq!(config.application_name(), "from-flag");
        assert_eq!(config.export_module_path(), Path::new("/file/out"));
    }

    #[test]
    fn test_missing_values_are_config_errors() {
        let err = resolve_config(&export_args(None, Some("/out")), &ConfigFile::default())
            .unwrap_err();
        assert!(err.is_config_error());

        let err = resolve_config(&export_args(Some("orders"), None), &ConfigFile::default())
            .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_relative_flag_path_is_rejected() {
        let err = resolve_config(
            &export_args(Some("orders"), Some("relative/out")),
            &ConfigFile::default(),
        )
        .unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_source_precedence() {
        let file = ConfigFile::parse("[export]\nsources = [\"from-file\"]\n").unwrap();
        let flags = SourceArgs {
            config: None,
            sources: vec![PathBuf::from("from-flag")],
        };

        assert_eq!(resolve_sources(&flags, &file), [PathBuf::from("from-flag")]);
        assert_eq!(
            resolve_sources(&SourceArgs::default(), &file),
            [PathBuf::from("from-file")]
        );
        assert_eq!(
            resolve_sources(&SourceArgs::default(), &ConfigFile::default()),
            [PathBuf::from(DEFAULT_SOURCE_DIR)]
        );
    }
}
