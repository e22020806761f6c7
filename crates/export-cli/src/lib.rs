//! Client export CLI library.
//!
//! Exposes the command implementations and output formatters used by the
//! `client-export` binary so they can be tested without spawning it.

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::format_push_string)]

pub mod commands;
pub mod formatters;

use client_export_core::cli::ExitCode;

/// Picks the process exit code for a failed command.
///
/// Library errors anywhere in the context chain map through
/// [`ExitCode::for_error`]. Anything else is a generation error.
///
/// # Examples
///
/// ```
/// use client_export_cli::exit_code_for;
/// use client_export_core::cli::ExitCode;
/// use client_export_core::Error;
///
/// let err = anyhow::Error::new(Error::InvalidArgument("bad".into())).context("parsing flags");
/// assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
/// ```
#[must_use]
pub fn exit_code_for(error: &anyhow::Error) -> ExitCode {
    error
        .chain()
        .find_map(|cause| cause.downcast_ref::<client_export_core::Error>())
        .map_or(ExitCode::GENERATION_ERROR, ExitCode::for_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use client_export_core::Error;

    #[test]
    fn test_config_error_is_invalid_input() {
        let result: anyhow::Result<()> = Err(Error::ConfigError {
            message: "missing".to_string(),
        })
        .context("resolving configuration");

        assert_eq!(exit_code_for(&result.unwrap_err()), ExitCode::INVALID_INPUT);
    }

    #[test]
    fn test_metadata_error_is_generation_error() {
        let err = anyhow::Error::new(Error::inconsistent("api::A", "cycle"));
        assert_eq!(exit_code_for(&err), ExitCode::GENERATION_ERROR);
    }

    #[test]
    fn test_foreign_error_is_generation_error() {
        let err = anyhow::anyhow!("something else");
        assert_eq!(exit_code_for(&err), ExitCode::GENERATION_ERROR);
    }
}
