//! One extraction round over a registry snapshot.
//!
//! Types are processed sequentially in registry order. The first failure
//! aborts the round; files written for earlier types are kept.
//!
//! # Examples
//!
//! ```
//! use client_export_codegen::HandlebarsRenderer;
//! use client_export_core::{ExportConfig, TypeRegistry};
//! use client_export_files::ExtractionRound;
//! # use tempfile::TempDir;
//!
//! # let temp_dir = TempDir::new().unwrap();
//! let config = ExportConfig::new("orders", temp_dir.path()).unwrap();
//! let renderer = HandlebarsRenderer::new().unwrap();
//!
//! let report = ExtractionRound::new(&config, &renderer)
//!     .run(&TypeRegistry::new())
//!     .unwrap();
//! assert!(report.is_empty());
//! ```

use crate::filesystem::ExportOptions;
use crate::writer::{InterfaceWriter, LeafOutcome, TypeOutcome};
use client_export_codegen::filter::is_extraction_target;
use client_export_codegen::{InterfaceRenderer, plan};
use client_export_core::{ExportConfig, Result, TypeRegistry};
use serde::Serialize;

/// Outcome of a complete round.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RoundReport {
    types: Vec<TypeOutcome>,
}

impl RoundReport {
    /// Per-type outcomes in processing order.
    #[must_use]
    pub fn types(&self) -> &[TypeOutcome] {
        &self.types
    }

    /// Number of processed types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no type qualified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Number of leaf interfaces written in this round.
    #[must_use]
    pub fn leaves_written(&self) -> usize {
        self.count_leaves(LeafOutcome::Written)
    }

    /// Number of existing leaf interfaces left untouched.
    #[must_use]
    pub fn leaves_preserved(&self) -> usize {
        self.count_leaves(LeafOutcome::Preserved)
    }

    fn count_leaves(&self, outcome: LeafOutcome) -> usize {
        self.types.iter().filter(|t| t.leaf == outcome).count()
    }
}

/// Drives qualification, planning, and writing for one registry snapshot.
#[derive(Debug)]
pub struct ExtractionRound<'a, R> {
    config: &'a ExportConfig,
    writer: InterfaceWriter<'a, R>,
}

impl<'a, R: InterfaceRenderer> ExtractionRound<'a, R> {
    /// Creates a round writing with default options.
    #[must_use]
    pub const fn new(config: &'a ExportConfig, renderer: &'a R) -> Self {
        Self {
            config,
            writer: InterfaceWriter::new(config, renderer),
        }
    }

    /// Replaces the export options.
    #[must_use]
    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.writer = self.writer.with_options(options);
        self
    }

    /// Runs the round.
    ///
    /// # Errors
    ///
    /// - [`client_export_core::Error::ConfigError`] before anything is written
    /// - [`client_export_core::Error::MetadataInconsistency`] for a type whose
    ///   names or ancestry cannot be resolved
    /// - [`client_export_core::Error::TemplateError`] or
    ///   [`client_export_core::Error::EmissionError`] while writing
    pub fn run(&self, registry: &TypeRegistry) -> Result<RoundReport> {
        self.config.validate()?;

        tracing::info!(
            "Starting extraction round over {} types into {}",
            registry.len(),
            self.config.source_root().display()
        );

        let mut report = RoundReport::default();
        for ty in registry.iter().filter(|ty| is_extraction_target(ty)) {
            let plan = plan(registry, ty)?;
            let outcome = self.writer.write(&plan)?;

            tracing::info!(
                "Generated {} ({} methods, leaf {:?}) for {}",
                outcome.base_interface,
                outcome.method_count,
                outcome.leaf,
                outcome.qualified_name
            );
            report.types.push(outcome);
        }

        tracing::info!(
            "Extraction round finished: {} types, {} leaves written, {} preserved",
            report.len(),
            report.leaves_written(),
            report.leaves_preserved()
        );
        Ok(report)
    }
}
