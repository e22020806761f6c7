//! Discovery of candidate handler types in Rust sources.
//!
//! Parses Rust files with `syn` and builds the
//! [`TypeRegistry`](client_export_core::TypeRegistry) snapshot a generation
//! round runs against.

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod module_path;
pub mod scanner;
pub mod syntax;

pub use scanner::SourceScanner;
