//! Output writer for generated client interfaces.
//!
//! Persists the base and leaf interfaces planned by
//! `client-export-codegen`, applying the two-artifact policy: base
//! interfaces are regenerated every round, leaf interfaces are written once
//! and then belong to the user.
//!
//! # Examples
//!
//! ```
//! use client_export_codegen::HandlebarsRenderer;
//! use client_export_core::{
//!     Attribute, AttributeValue, CandidateType, ExportConfig, MethodDescriptor, TypeKind,
//!     TypeRegistry,
//! };
//! use client_export_files::{ExtractionRound, LeafOutcome};
//! # use tempfile::TempDir;
//!
//! # let temp_dir = TempDir::new().unwrap();
//! let mut registry = TypeRegistry::new();
//! registry.insert(
//!     CandidateType::builder("api::PingController", TypeKind::Struct)
//!         .attribute(Attribute::new("rest_controller"))
//!         .attribute(Attribute::new("export"))
//!         .attribute(
//!             Attribute::new("client_export")
//!                 .with_member("export_package", AttributeValue::str("clients")),
//!         )
//!         .method(
//!             MethodDescriptor::new("ping")
//!                 .with_attribute(Attribute::new("get_mapping").with_value(AttributeValue::str("/ping"))),
//!         )
//!         .build(),
//! );
//!
//! let config = ExportConfig::new("ping-service", temp_dir.path()).unwrap();
//! let renderer = HandlebarsRenderer::new().unwrap();
//! let report = ExtractionRound::new(&config, &renderer).run(&registry).unwrap();
//!
//! assert_eq!(report.types()[0].leaf, LeafOutcome::Written);
//! assert!(report.types()[0].base_path.exists());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod filesystem;
pub mod round;
pub mod writer;

pub use filesystem::{ExportOptions, write_file};
pub use round::{ExtractionRound, RoundReport};
pub use writer::{InterfaceWriter, LeafOutcome, TypeOutcome, WriterState};
