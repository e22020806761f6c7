//! Inspect command implementation.
//!
//! A dry run: lists qualifying types with their resolved interface names
//! and translated signatures. Nothing is written.

use super::common::scan_sources;
use super::config::{ConfigFile, SourceArgs, resolve_sources};
use crate::formatters::format_output;
use anyhow::{Context, Result};
use client_export_codegen::{InterfacePlan, plan_round};
use client_export_core::cli::{ExitCode, OutputFormat};
use serde::Serialize;
use tracing::info;

/// One qualifying type as it would be generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InspectedType {
    /// Qualified name of the handler type
    pub qualified_name: String,
    /// Base interface module path
    pub base_interface: String,
    /// Leaf interface module path
    pub leaf_interface: String,
    /// Base path carried into the leaf's `remote_client` attribute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_path: Option<String>,
    /// Translated method signatures
    pub methods: Vec<String>,
}

impl From<&InterfacePlan> for InspectedType {
    fn from(plan: &InterfacePlan) -> Self {
        let names = plan.names();
        let base_path = names.base_path().trim();

        Self {
            qualified_name: plan.qualified_name().to_string(),
            base_interface: format!("{}::{}", names.base_package().module_path(), names.base_name()),
            leaf_interface: format!("{}::{}", names.package().module_path(), names.extract_name()),
            base_path: (!base_path.is_empty()).then(|| base_path.to_string()),
            methods: plan.base().methods.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Report printed by the inspect command.
#[derive(Debug, Clone, Serialize)]
pub struct InspectionReport {
    /// Number of `.rs` files parsed
    pub files_scanned: usize,
    /// Number of types discovered
    pub types_discovered: usize,
    /// Qualifying types
    pub types: Vec<InspectedType>,
}

/// Scans sources and plans every qualifying type without writing.
///
/// # Errors
///
/// Returns an error if sources cannot be scanned or a type cannot be
/// planned.
pub fn inspect(args: &SourceArgs) -> Result<InspectionReport> {
    let file = ConfigFile::discover(args.config.as_deref())
        .context("failed to load configuration file")?;
    let sources = resolve_sources(args, &file);

    let scanned = scan_sources(&sources).context("failed to scan sources")?;
    let plans = plan_round(&scanned.registry).context("failed to plan interfaces")?;

    Ok(InspectionReport {
        files_scanned: scanned.files_scanned,
        types_discovered: scanned.registry.len(),
        types: plans.iter().map(InspectedType::from).collect(),
    })
}

/// Runs the inspect command and prints its report.
///
/// # Errors
///
/// Returns an error if inspection fails or the report cannot be formatted.
pub fn run(args: &SourceArgs, output_format: OutputFormat) -> Result<ExitCode> {
    info!("Inspecting client interfaces");

    let report = inspect(args)?;
    println!("{}", format_output(&report, output_format)?);

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SOURCES: &str = r#"
        #[rest_controller]
        #[export]
        #[client_export(export_package = "clients")]
        #[request_mapping("/orders")]
        pub struct OrderController;

        impl OrderController {
            #[get_mapping("/{id}")]
            pub fn find(&self, #[path_variable] id: u64) -> Option<String> {
                None
            }
        }

        pub struct Helper;
    "#;

    fn source_args(dir: &TempDir) -> SourceArgs {
        SourceArgs {
            config: None,
            sources: vec![dir.path().to_path_buf()],
        }
    }

    #[test]
    fn test_inspect_lists_qualifying_types() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("api.rs"), SOURCES).unwrap();

        let report = inspect(&source_args(&dir)).unwrap();

        assert_eq!(report.types_discovered, 2);
        assert_eq!(report.types.len(), 1);

        let order = &report.types[0];
        assert_eq!(order.qualified_name, "api::OrderController");
        assert_eq!(order.base_interface, "crate::clients::base::OrderClientBase");
        assert_eq!(order.leaf_interface, "crate::clients::OrderClient");
        assert_eq!(order.base_path.as_deref(), Some("/orders"));
        assert_eq!(order.methods.len(), 1);
        assert!(order.methods[0].starts_with("#[get_mapping(\"/{id}\")] "));
        assert!(order.methods[0].ends_with(
            "fn find(&self, #[path_variable(\"id\")] id: u64) -> Option<String>"
        ));
    }

    #[test]
    fn test_inspect_writes_nothing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("api.rs"), SOURCES).unwrap();

        inspect(&source_args(&dir)).unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_inspect_empty_sources() {
        let dir = TempDir::new().unwrap();
        let report = inspect(&source_args(&dir)).unwrap();
        assert_eq!(report.files_scanned, 0);
        assert!(report.types.is_empty());
    }
}
