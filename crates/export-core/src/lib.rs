//! Core types and errors for client interface extraction.
//!
//! This crate provides the foundational types shared by every crate in the
//! workspace.
//!
//! # Architecture
//!
//! The core consists of:
//! - The metadata model (`CandidateType`, `MethodDescriptor`,
//!   `ParameterDescriptor`) and the `TypeRegistry` snapshot of one round
//! - The attribute model (`AttributeSet`, `Attribute`, `AttributeValue`)
//! - Strong domain types (`PackageName`)
//! - Error hierarchy with contextual information
//! - Build-time configuration (`ExportConfig`)

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

mod attributes;
mod config;
mod error;
mod model;
mod types;

pub mod cli;

pub use attributes::{Attribute, AttributeSet, AttributeValue, BindingKind, RouteKind, names};
pub use config::{
    APPLICATION_NAME_OPTION, EXPORT_BASE_DIRECTORY, EXPORT_MODULE_PATH_OPTION, ExportConfig,
    GENERATED_FILE_EXTENSION,
};
pub use error::{Error, Result};
pub use model::{
    CandidateType, CandidateTypeBuilder, MethodDescriptor, ParameterDescriptor,
    SignatureIdentity, Supertype, TypeKind, TypeRegistry,
};
pub use types::{BASE_PACKAGE_SEGMENT, PackageName, resolve_module_path};
