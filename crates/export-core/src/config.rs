//! Build-time configuration for client interface extraction.
//!
//! The host build pipeline supplies two required values: the application
//! identifier written into every leaf interface, and the absolute path of the
//! module that receives the generated sources. Both are validated once and the
//! resulting [`ExportConfig`] is threaded through every component call.
//!
//! # Examples
//!
//! ```
//! use client_export_core::ExportConfig;
//! use std::collections::HashMap;
//!
//! let mut options = HashMap::new();
//! options.insert("applicationName".to_string(), "order-service".to_string());
//! options.insert("exportModulePath".to_string(), "/work/order-client".to_string());
//!
//! let config = ExportConfig::from_options(&options).unwrap();
//! assert_eq!(config.application_name(), "order-service");
//! ```

use crate::{Error, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Host option key holding the application identifier.
pub const APPLICATION_NAME_OPTION: &str = "applicationName";

/// Host option key holding the absolute output module path.
pub const EXPORT_MODULE_PATH_OPTION: &str = "exportModulePath";

/// Source directory inside the output module that receives generated files.
pub const EXPORT_BASE_DIRECTORY: &str = "src/main/rust";

/// File extension of generated interfaces.
pub const GENERATED_FILE_EXTENSION: &str = "rs";

/// Validated extraction configuration.
///
/// Constructed once per invocation. Never read from ambient state after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    application_name: String,
    export_module_path: PathBuf,
}

impl ExportConfig {
    /// Creates a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the application name is blank or the
    /// module path is empty or relative.
    ///
    /// # Examples
    ///
    /// ```
    /// use client_export_core::ExportConfig;
    ///
    /// assert!(ExportConfig::new("orders", "/work/orders-client").is_ok());
    /// assert!(ExportConfig::new("", "/work/orders-client").is_err());
    /// assert!(ExportConfig::new("orders", "relative/dir").is_err());
    /// ```
    pub fn new(
        application_name: impl Into<String>,
        export_module_path: impl Into<PathBuf>,
    ) -> Result<Self> {
        let config = Self {
            application_name: application_name.into(),
            export_module_path: export_module_path.into(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Reads the configuration from a host option map.
    ///
    /// Looks up [`APPLICATION_NAME_OPTION`] and [`EXPORT_MODULE_PATH_OPTION`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] naming the first missing key, or any
    /// validation failure from [`ExportConfig::new`].
    pub fn from_options(options: &HashMap<String, String>) -> Result<Self> {
        let application_name = required_option(options, APPLICATION_NAME_OPTION)?;
        let export_module_path = required_option(options, EXPORT_MODULE_PATH_OPTION)?;
        Self::new(application_name, export_module_path)
    }

    /// Checks that both values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.application_name.trim().is_empty() {
            return Err(Error::ConfigError {
                message: format!("please set the {APPLICATION_NAME_OPTION} property"),
            });
        }

        if self.export_module_path.as_os_str().is_empty() {
            return Err(Error::ConfigError {
                message: format!("please set the {EXPORT_MODULE_PATH_OPTION} property"),
            });
        }

        if !self.export_module_path.is_absolute() {
            return Err(Error::ConfigError {
                message: format!(
                    "{EXPORT_MODULE_PATH_OPTION} must be an absolute path, got '{}'",
                    self.export_module_path.display()
                ),
            });
        }

        Ok(())
    }

    /// Remote-target name written into every leaf interface.
    #[must_use]
    pub fn application_name(&self) -> &str {
        &self.application_name
    }

    /// Absolute path of the module receiving generated sources.
    #[must_use]
    pub fn export_module_path(&self) -> &Path {
        &self.export_module_path
    }

    /// Root directory under which package directories are created.
    ///
    /// # Examples
    ///
    /// ```
    /// use client_export_core::ExportConfig;
    /// use std::path::Path;
    ///
    /// let config = ExportConfig::new("orders", "/work/client").unwrap();
    /// assert_eq!(config.source_root(), Path::new("/work/client/src/main/rust"));
    /// ```
    #[must_use]
    pub fn source_root(&self) -> PathBuf {
        self.export_module_path.join(EXPORT_BASE_DIRECTORY)
    }
}

fn required_option<'a>(options: &'a HashMap<String, String>, key: &str) -> Result<&'a str> {
    options
        .get(key)
        .map(String::as_str)
        .ok_or_else(|| Error::ConfigError {
            message: format!("please set the {key} property"),
        })
}
