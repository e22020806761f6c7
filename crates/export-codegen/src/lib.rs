//! Client interface generation from handler metadata.
//!
//! Turns a [`TypeRegistry`](client_export_core::TypeRegistry) snapshot into
//! structured interface descriptions and renders them to Rust source using
//! Handlebars templates.
//!
//! # Pipeline
//!
//! 1. [`filter`] selects extraction targets and exported methods
//! 2. [`collector`] walks the ancestry chain with most-derived-wins precedence
//! 3. [`translator`] maps handler methods to client methods
//! 4. [`naming`] resolves interface names, packages, and file paths
//! 5. [`interface`] assembles per-type plans
//! 6. [`renderer`] prints each description to source

#![deny(unsafe_code)]
#![warn(missing_docs, missing_debug_implementations)]

pub mod collector;
pub mod filter;
pub mod interface;
pub mod naming;
pub mod renderer;
pub mod template_engine;
pub mod translator;
pub mod types;

pub use collector::{CollectedMethods, collect};
pub use interface::{InterfacePlan, plan, plan_round};
pub use naming::ExtractionNames;
pub use renderer::{HandlebarsRenderer, InterfaceRenderer};
pub use template_engine::TemplateEngine;
pub use types::{GeneratedInterfaceSpec, InterfaceKind, InterfaceRef, TranslatedMethod};
