//! Generate command implementation.
//!
//! Scans the configured source roots, runs one extraction round, and prints
//! a report of the written interfaces.

use super::common::scan_sources;
use super::config::{ConfigFile, ExportArgs, resolve_config, resolve_sources};
use crate::formatters::format_output;
use anyhow::{Context, Result};
use client_export_codegen::HandlebarsRenderer;
use client_export_core::cli::{ExitCode, OutputFormat};
use client_export_files::{ExtractionRound, TypeOutcome};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Report printed after a round.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    /// Remote-target name used for leaf interfaces
    pub application_name: String,
    /// Output module
    pub export_module_path: PathBuf,
    /// Scanned source roots
    pub sources: Vec<PathBuf>,
    /// Number of `.rs` files parsed
    pub files_scanned: usize,
    /// Number of types that produced interfaces
    pub types_generated: usize,
    /// Leaf interfaces written this round
    pub leaves_written: usize,
    /// Existing leaf interfaces left untouched
    pub leaves_preserved: usize,
    /// Per-type outcomes
    pub outcomes: Vec<TypeOutcome>,
}

/// Runs the generate command and returns the report.
///
/// # Errors
///
/// Returns an error if configuration is invalid, sources cannot be scanned,
/// or the round fails.
pub fn generate(args: &ExportArgs) -> Result<GenerationReport> {
    let file = ConfigFile::discover(args.input.config.as_deref())
        .context("failed to load configuration file")?;
    let config = resolve_config(args, &file).context("invalid export configuration")?;
    let sources = resolve_sources(&args.input, &file);

    let scanned = scan_sources(&sources).context("failed to scan sources")?;
    let renderer = HandlebarsRenderer::new().context("failed to initialize templates")?;

    let report = ExtractionRound::new(&config, &renderer)
        .run(&scanned.registry)
        .context("extraction round failed")?;

    Ok(GenerationReport {
        application_name: config.application_name().to_string(),
        export_module_path: config.export_module_path().to_path_buf(),
        sources,
        files_scanned: scanned.files_scanned,
        types_generated: report.len(),
        leaves_written: report.leaves_written(),
        leaves_preserved: report.leaves_preserved(),
        outcomes: report.types().to_vec(),
    })
}

/// Runs the generate command and prints its report.
///
/// # Errors
///
/// Returns an error if generation fails or the report cannot be formatted.
pub fn run(args: &ExportArgs, output_format: OutputFormat) -> Result<ExitCode> {
    info!("Generating client interfaces");

    let report = generate(args)?;
    println!("{}", format_output(&report, output_format)?);

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::config::SourceArgs;
    use client_export_files::LeafOutcome;
    use tempfile::TempDir;

    const CONTROLLER: &str = r#"
        #[rest_controller]
        #[export]
        #[client_export(export_package = "clients")]
        pub struct PingController;

        impl PingController {
            #[get_mapping("/ping")]
            pub fn ping(&self) -> String {
                String::new()
            }
        }
    "#;

    fn args(src: &TempDir, out: &TempDir) -> ExportArgs {
        ExportArgs {
            input: SourceArgs {
                config: None,
                sources: vec![src.path().to_path_buf()],
            },
            application_name: Some("ping".to_string()),
            export_module_path: Some(out.path().to_path_buf()),
        }
    }

    #[test]
    fn test_generate_writes_and_reports() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        std::fs::write(src.path().join("api.rs"), CONTROLLER).unwrap();

        let report = generate(&args(&src, &out)).unwrap();

        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.types_generated, 1);
        assert_eq!(report.leaves_written, 1);
        assert_eq!(report.outcomes[0].leaf, LeafOutcome::Written);
        assert!(out
            .path()
            .join("src/main/rust/clients/base/PingClientBase.rs")
            .is_file());
    }

    #[test]
    fn test_missing_explicit_config_fails() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();

        let mut args = args(&src, &out);
        args.input.config = Some(src.path().join("absent.toml"));

        let err = generate(&args).unwrap_err();
        assert_eq!(crate::exit_code_for(&err), ExitCode::INVALID_INPUT);
    }
}
