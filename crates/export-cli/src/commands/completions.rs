//! Shell completion generation command.
//!
//! Generates shell completion scripts for bash, zsh, fish, elvish, and
//! `PowerShell`.

use anyhow::Result;
use clap::Command;
use clap_complete::{Shell, generate};
use client_export_core::cli::ExitCode;
use std::io::{self, Write};
use tracing::info;

/// Writes the completion script for `shell` to `out`.
///
/// # Examples
///
/// ```
/// use client_export_cli::commands::completions;
/// use clap::Command;
/// use clap_complete::Shell;
///
/// let mut script = Vec::new();
/// completions::write_completions(Shell::Bash, &mut Command::new("client-export"), &mut script);
/// assert!(String::from_utf8(script).unwrap().contains("client-export"));
/// ```
pub fn write_completions(shell: Shell, cmd: &mut Command, out: &mut dyn Write) {
    let name = cmd.get_name().to_string();
    generate(shell, cmd, name, out);
}

/// Runs the completions command, printing the script to stdout.
///
/// # Errors
///
/// Never fails today; the `Result` matches the other commands.
#[allow(clippy::unnecessary_wraps)]
pub fn run(shell: Shell, cmd: &mut Command) -> Result<ExitCode> {
    info!("Generating {shell} completions");
    write_completions(shell, cmd, &mut io::stdout());
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn script(shell: Shell) -> String {
        let mut cmd = Command::new("client-export").subcommand(Command::new("generate"));
        let mut out = Vec::new();
        write_completions(shell, &mut cmd, &mut out);
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_bash_completions_mention_subcommands() {
        let bash = script(Shell::Bash);
        assert!(bash.contains("client-export"));
        assert!(bash.contains("generate"));
    }

    #[test]
    fn test_every_shell_produces_output() {
        for shell in [
            Shell::Bash,
            Shell::Zsh,
            Shell::Fish,
            Shell::PowerShell,
            Shell::Elvish,
        ] {
            assert!(!script(shell).is_empty(), "{shell} completions are empty");
        }
    }

    #[test]
    fn test_run_returns_success() {
        let mut cmd = Command::new("client-export");
        assert_eq!(run(Shell::Fish, &mut cmd).unwrap(), ExitCode::SUCCESS);
    }
}
