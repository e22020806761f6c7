//! Error types for client interface extraction.
//!
//! A single error hierarchy is shared by every crate in the workspace so that
//! a round can report its failure upward with the original cause attached.
//!
//! # Examples
//!
//! ```
//! use client_export_core::{Error, Result};
//!
//! fn require_application_name(name: &str) -> Result<()> {
//!     if name.is_empty() {
//!         return Err(Error::ConfigError {
//!             message: "applicationName is not set".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//!
//! let err = require_application_name("").unwrap_err();
//! assert!(err.is_config_error());
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for client interface extraction.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error.
    ///
    /// A required build-time value is missing or invalid. Raised before any
    /// generation begins.
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration problem
        message: String,
    },

    /// Metadata inconsistency.
    ///
    /// The ancestry walk reached a supertype that cannot be resolved, found a
    /// cycle, or met a type that is neither a struct nor a trait. Also raised
    /// when a qualifying type lacks a required marker member.
    #[error("Inconsistent metadata for type '{type_name}': {reason}")]
    MetadataInconsistency {
        /// Fully-qualified name of the offending type
        type_name: String,
        /// What is inconsistent
        reason: String,
    },

    /// Emission error.
    ///
    /// Writing a generated file failed. The round aborts with the
    /// underlying I/O cause attached.
    #[error("Failed to emit {}", path.display())]
    EmissionError {
        /// Target file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Template registration or rendering failed.
    #[error("Template error: {message}")]
    TemplateError {
        /// Description of the template failure
        message: String,
    },

    /// A source file could not be read or parsed during discovery.
    #[error("Failed to parse {}: {message}", path.display())]
    SourceParseError {
        /// Source file path
        path: PathBuf,
        /// Parser or I/O message
        message: String,
    },

    /// Invalid argument error.
    ///
    /// Raised when CLI arguments or function parameters are invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Shorthand for building a [`Error::MetadataInconsistency`].
    ///
    /// # Examples
    ///
    /// ```
    /// use client_export_core::Error;
    ///
    /// let err = Error::inconsistent("api::Orders", "supertype 'Base' not found");
    /// assert!(err.is_metadata_inconsistency());
    /// ```
    #[must_use]
    pub fn inconsistent(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MetadataInconsistency {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a configuration error.
    ///
    /// # Examples
    ///
    /// ```
    /// use client_export_core::Error;
    ///
    /// let err = Error::ConfigError {
    ///     message: "exportModulePath is not set".to_string(),
    /// };
    /// assert!(err.is_config_error());
    /// ```
    #[must_use]
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::ConfigError { .. })
    }

    /// Returns `true` if this is a metadata inconsistency.
    #[must_use]
    pub const fn is_metadata_inconsistency(&self) -> bool {
        matches!(self, Self::MetadataInconsistency { .. })
    }

    /// Returns `true` if this is an emission (I/O) error.
    ///
    /// # Examples
    ///
    /// ```
    /// use client_export_core::Error;
    /// use std::io;
    ///
    /// let err = Error::EmissionError {
    ///     path: "/tmp/OrderClient.rs".into(),
    ///     source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
    /// };
    /// assert!(err.is_emission_error());
    /// ```
    #[must_use]
    pub const fn is_emission_error(&self) -> bool {
        matches!(self, Self::EmissionError { .. })
    }

    /// Returns `true` if this is a template error.
    #[must_use]
    pub const fn is_template_error(&self) -> bool {
        matches!(self, Self::TemplateError { .. })
    }

    /// Returns `true` if this is a source parse error.
    #[must_use]
    pub const fn is_source_parse_error(&self) -> bool {
        matches!(self, Self::SourceParseError { .. })
    }
}

/// Result type alias used throughout the workspace.
///
/// # Examples
///
/// ```
/// use client_export_core::{Result, Error};
///
/// fn non_blank(value: &str) -> Result<&str> {
///     if value.trim().is_empty() {
///         return Err(Error::InvalidArgument("blank value".to_string()));
///     }
///     Ok(value)
/// }
///
/// assert!(non_blank("orders").is_ok());
/// assert!(non_blank("  ").is_err());
/// ```
pub type Result<T> = std::result::Result<T, Error>;
