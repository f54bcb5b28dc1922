//! Commit id resolution
//!
//! Asks the VCS for the current HEAD revision and turns every failure
//! into a descriptive placeholder so the build can carry on.

use crate::command::CommandRunner;
use crate::constants::{DEFAULT_VCS_EXECUTABLE, REV_PARSE_HEAD_ARGS, UNRESOLVED_COMMIT_ID};
use crate::models::{CommitId, StampError};

/// Resolves the current commit id through a [`CommandRunner`]
pub struct CommitIdResolver<R> {
    runner: R,
    executable: String,
}

impl<R: CommandRunner> CommitIdResolver<R> {
    pub fn new(runner: R) -> Self {
        Self::with_executable(runner, DEFAULT_VCS_EXECUTABLE)
    }

    pub fn with_executable(runner: R, executable: impl Into<String>) -> Self {
        Self {
            runner,
            executable: executable.into(),
        }
    }

    /// Resolve HEAD. Never fails; problems become a fallback message.
    pub fn resolve(&self) -> CommitId {
        let result = match self.runner.run(&self.executable, REV_PARSE_HEAD_ARGS) {
            Ok(result) => result,
            Err(err) => {
                log::debug!("Commit id resolution could not start: {}", err);
                return CommitId::fallback(format!(
                    "unable to launch '{}': {}",
                    self.executable,
                    launch_reason(&err)
                ));
            }
        };

        if result.output_lines().is_empty() {
            return CommitId::fallback(UNRESOLVED_COMMIT_ID);
        }

        if !result.is_success() {
            return CommitId::fallback(format!(
                "unexpected exit code [{}]: '{} {}' failed. {}",
                result.exit_code(),
                self.executable,
                REV_PARSE_HEAD_ARGS.join(" "),
                result.joined_output()
            ));
        }

        log::debug!(
            "Execute result: {} {}",
            result.exit_code(),
            result.output_lines()[0]
        );

        CommitId::resolved(result.joined_output())
    }
}

fn launch_reason(err: &StampError) -> String {
    match err {
        StampError::Launch { source, .. } => source.to_string(),
        other => other.to_string(),
    }
}
