//! Command implementations for the `client-export` CLI.
//!
//! Each command resolves its inputs, does its work through the library
//! crates, and prints a report in the requested output format.

pub mod common;
pub mod completions;
pub mod config;
pub mod generate;
pub mod inspect;
