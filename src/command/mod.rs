//! External command execution module
//!
//! Handles:
//! - Spawning exactly one child process per call
//! - Capturing stdout as ordered lines and the numeric exit code
//! - Reporting a non-zero exit as data, not as an error
//! - Distinguishing launch failures (missing or unrunnable executable)

use std::process::{Command, Stdio};

use crate::models::{CommandResult, StampError};

/// Exit code recorded when the process was terminated by a signal
pub const SIGNALED_EXIT_CODE: i32 = -1;

/// Capability to run an external command and collect its output
pub trait CommandRunner {
    /// Run `program` with `args`, blocking until it exits.
    ///
    /// Only fails when the process cannot be spawned.
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandResult, StampError>;
}

/// Runs commands as real child processes
#[derive(Debug, Clone, Default)]
pub struct SystemCommandRunner;

impl SystemCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for SystemCommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandResult, StampError> {
        log::debug!("Executing: {} {}", program, args.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| StampError::Launch {
                program: program.to_string(),
                source,
            })?;

        let exit_code = output.status.code().unwrap_or(SIGNALED_EXIT_CODE);
        let mut output_lines = split_lines(&output.stdout);

        // stderr only matters as error text
        if exit_code != 0 {
            output_lines.extend(split_lines(&output.stderr));
        }

        Ok(CommandResult::new(exit_code, output_lines))
    }
}

/// Split raw process output into lines, dropping blank ones
fn split_lines(bytes: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(bytes)
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.to_string())
        .collect()
}
