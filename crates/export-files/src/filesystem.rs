//! Persistence of generated sources.
//!
//! Files are written atomically by default: content goes to a sibling
//! temporary file which is then renamed over the target, so a crash never
//! leaves a half-written interface behind.
//!
//! # Examples
//!
//! ```
//! use client_export_files::{write_file, ExportOptions};
//! # use tempfile::TempDir;
//!
//! # let temp_dir = TempDir::new().unwrap();
//! let path = temp_dir.path().join("clients/base/OrderClientBase.rs");
//! write_file(&path, "pub trait OrderClientBase {}\n", &ExportOptions::default()).unwrap();
//! assert!(path.exists());
//! ```

use client_export_core::{Error, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Options for writing generated files.
///
/// # Examples
///
/// ```
/// use client_export_files::ExportOptions;
///
/// let options = ExportOptions::default().with_atomic_writes(false);
/// assert!(!options.atomic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportOptions {
    /// Use atomic writes (write to temp file, then rename)
    pub atomic: bool,
}

impl ExportOptions {
    /// Creates new export options with defaults.
    ///
    /// Defaults:
    /// - atomic: true (safer)
    #[must_use]
    pub const fn new() -> Self {
        Self { atomic: true }
    }

    /// Sets whether to use atomic writes.
    #[must_use]
    pub const fn with_atomic_writes(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Writes `content` to `path`, creating parent directories as needed.
///
/// An existing file is replaced.
///
/// # Errors
///
/// Returns [`Error::EmissionError`] carrying `path` and the underlying I/O
/// error if any step fails.
pub fn write_file(path: &Path, content: &str, options: &ExportOptions) -> Result<()> {
    let emission = |source| Error::EmissionError {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(emission)?;
    }

    if options.atomic {
        let temp_path = temp_path_for(path);

        let written = fs::File::create(&temp_path).and_then(|mut file| {
            file.write_all(content.as_bytes())?;
            file.sync_all()
        });
        if let Err(e) = written.and_then(|()| fs::rename(&temp_path, path)) {
            let _ = fs::remove_file(&temp_path);
            return Err(emission(e));
        }
    } else {
        fs::write(path, content).map_err(emission)?;
    }

    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

/// Returns `true` if a file exists at `path`.
///
/// # Errors
///
/// Returns [`Error::EmissionError`] if existence cannot be determined.
pub fn file_exists(path: &Path) -> Result<bool> {
    path.try_exists().map_err(|source| Error::EmissionError {
        path: path.to_path_buf(),
        source,
    })
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_creates_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a/b/c/Client.rs");

        write_file(&path, "pub trait Client {}\n", &ExportOptions::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "pub trait Client {}\n");
        assert!(!temp.path().join("a/b/c/Client.rs.tmp").exists());
    }

    #[test]
    fn test_write_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Client.rs");

        write_file(&path, "old", &ExportOptions::default()).unwrap();
        write_file(&path, "new", &ExportOptions::default()).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_non_atomic_writes() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("x/Client.rs");
        let options = ExportOptions::new().with_atomic_writes(false);

        write_file(&path, "content", &options).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "content");
    }

    #[test]
    fn test_write_failure_is_emission_error() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("blocker");
        fs::write(&blocker, "file, not a directory").unwrap();
        let path = blocker.join("Client.rs");

        let err = write_file(&path, "content", &ExportOptions::default()).unwrap_err();
        assert!(err.is_emission_error());
        assert!(err.to_string().contains("Client.rs"));
    }

    #[test]
    fn test_file_exists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Client.rs");
        assert!(!file_exists(&path).unwrap());
        fs::write(&path, "").unwrap();
        assert!(file_exists(&path).unwrap());
    }

    #[test]
    fn test_temp_path_is_sibling() {
        assert_eq!(
            temp_path_for(Path::new("/out/Client.rs")),
            PathBuf::from("/out/Client.rs.tmp")
        );
    }
}
