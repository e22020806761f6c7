//! Two-artifact output policy.
//!
//! For every planned type the writer walks
//! `NotStarted → BaseWritten → (LeafChecked →) Done`:
//!
//! - the base interface is rendered and written unconditionally;
//! - if a leaf file already exists it is preserved and the walk ends;
//! - otherwise the leaf interface is rendered and written once.

use crate::filesystem::{ExportOptions, file_exists, write_file};
use client_export_codegen::{InterfacePlan, InterfaceRenderer};
use client_export_core::{ExportConfig, Result};
use serde::Serialize;
use std::path::PathBuf;

/// Progress of one type through the writer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WriterState {
    /// Nothing written yet
    NotStarted,
    /// Base interface written
    BaseWritten,
    /// No leaf file exists; the leaf will be written
    LeafChecked,
    /// Finished
    Done,
}

/// What happened to the leaf interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeafOutcome {
    /// The leaf did not exist and was written
    Written,
    /// An existing leaf was left untouched
    Preserved,
}

/// Result of writing one type.
#[derive(Debug, Clone, Serialize)]
pub struct TypeOutcome {
    /// Qualified name of the handler type
    pub qualified_name: String,
    /// Base interface name
    pub base_interface: String,
    /// Leaf interface name
    pub leaf_interface: String,
    /// Path of the base interface file
    pub base_path: PathBuf,
    /// Path of the leaf interface file
    pub leaf_path: PathBuf,
    /// Leaf outcome
    pub leaf: LeafOutcome,
    /// Number of methods in the base interface
    pub method_count: usize,
    /// States visited, in order
    pub states: Vec<WriterState>,
}

/// Writes the base and leaf interfaces of planned types.
#[derive(Debug)]
pub struct InterfaceWriter<'a, R> {
    config: &'a ExportConfig,
    renderer: &'a R,
    options: ExportOptions,
}

impl<'a, R: InterfaceRenderer> InterfaceWriter<'a, R> {
    /// Creates a writer with default export options.
    #[must_use]
    pub const fn new(config: &'a ExportConfig, renderer: &'a R) -> Self {
        Self {
            config,
            renderer,
            options: ExportOptions::new(),
        }
    }

    /// Replaces the export options.
    #[must_use]
    pub const fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Writes the interfaces of one planned type.
    ///
    /// # Errors
    ///
    /// Returns [`client_export_core::Error::TemplateError`] if rendering
    /// fails and [`client_export_core::Error::EmissionError`] if a file
    /// cannot be written. A base interface already written is kept.
    pub fn write(&self, plan: &InterfacePlan) -> Result<TypeOutcome> {
        let source_root = self.config.source_root();
        let names = plan.names();
        let base_path = names.base_file(&source_root);
        let leaf_path = names.leaf_file(&source_root);

        let mut state = WriterState::NotStarted;
        let mut states = vec![state];
        let mut leaf = LeafOutcome::Preserved;

        loop {
            state = match state {
                WriterState::NotStarted => {
                    let source = self.renderer.render(plan.base())?;
                    write_file(&base_path, &source, &self.options)?;
                    WriterState::BaseWritten
                }
                WriterState::BaseWritten => {
                    if file_exists(&leaf_path)? {
                        tracing::warn!(
                            "Leaf interface {} exists; leaving it untouched",
                            leaf_path.display()
                        );
                        WriterState::Done
                    } else {
                        WriterState::LeafChecked
                    }
                }
                WriterState::LeafChecked => {
                    let source = self
                        .renderer
                        .render(&plan.leaf(self.config.application_name()))?;
                    write_file(&leaf_path, &source, &self.options)?;
                    leaf = LeafOutcome::Written;
                    WriterState::Done
                }
                WriterState::Done => break,
            };
            states.push(state);
        }

        Ok(TypeOutcome {
            qualified_name: plan.qualified_name().to_string(),
            base_interface: names.base_name().to_string(),
            leaf_interface: names.extract_name().to_string(),
            base_path,
            leaf_path,
            leaf,
            method_count: plan.method_count(),
            states,
        })
    }
}
