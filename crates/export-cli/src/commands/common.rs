//! Helpers shared by the scanning commands.

use client_export_core::{Error, TypeRegistry};
use client_export_introspector::SourceScanner;
use std::path::PathBuf;

/// Registry built from one or more source roots.
#[derive(Debug)]
pub struct ScannedSources {
    /// The registry snapshot
    pub registry: TypeRegistry,
    /// Number of `.rs` files parsed
    pub files_scanned: usize,
}

/// Scans every root into a single registry.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] if a root is not a directory and
/// [`Error::SourceParseError`] if a file cannot be parsed.
pub fn scan_sources(sources: &[PathBuf]) -> Result<ScannedSources, Error> {
    let mut scanner = SourceScanner::new();

    for root in sources {
        if !root.is_dir() {
            return Err(Error::InvalidArgument(format!(
                "source root '{}' is not a directory",
                root.display()
            )));
        }
        let files = scanner.scan_dir(root)?;
        tracing::debug!("Scanned {files} files under {}", root.display());
    }

    let files_scanned = scanner.files_scanned();
    let registry = scanner.finish();
    tracing::info!(
        "Discovered {} types in {files_scanned} files",
        registry.len()
    );

    Ok(ScannedSources {
        registry,
        files_scanned,
    })
}
