//! Data models module
//!
//! Defines core data structures:
//! - CommandResult: Exit status and stdout lines of one process invocation
//! - CommitId: Resolved revision hash or a descriptive fallback
//! - TargetFileSpec: Where the generated constant lives on disk
//! - StepOutcome / StampReport: What a run did, for human and JSON output
//! - StampError: Error taxonomy shared by every stage

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::constants::{DEFAULT_SOURCE_EXTENSION, DEFAULT_SOURCE_ROOT, TYPE_NAME_SEPARATOR};


/// Build property map owned by the caller and handed to the publisher
pub type PropertyMap = BTreeMap<String, String>;

/// Result of running one external command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    exit_code: i32,
    output_lines: Vec<String>,
}

impl CommandResult {
    pub fn new(exit_code: i32, output_lines: Vec<String>) -> Self {
        Self {
            exit_code,
            output_lines,
        }
    }

    /// Process exit code, `-1` when the process was terminated by a signal
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Captured output in the order it was produced
    pub fn output_lines(&self) -> &[String] {
        &self.output_lines
    }

    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }

    /// All output lines concatenated without separators
    pub fn joined_output(&self) -> String {
        self.output_lines.concat()
    }
}

/// Commit identifier handed to the publishers
///
/// Either the hash reported by the VCS or a human-readable fallback
/// explaining why no hash could be obtained. Consumers treat both the
/// same way; `resolved` only feeds reporting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitId {
    value: String,
    resolved: bool,
}

impl CommitId {
    pub fn resolved(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            resolved: true,
        }
    }

    pub fn fallback(message: impl Into<String>) -> Self {
        Self {
            value: message.into(),
            resolved: false,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Location and naming of the source file carrying the commit constant
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFileSpec {
    /// Fully-qualified type name, e.g. `com.example.build.CommitId`
    pub type_name: String,
    /// Name of the string constant holding the commit id
    pub constant_name: String,
    /// Project base directory
    pub base_dir: PathBuf,
    /// Source root relative to `base_dir`
    pub source_root: PathBuf,
    /// Extension of the source file, without the dot
    pub extension: String,
}

impl TargetFileSpec {
    pub fn new(
        type_name: impl Into<String>,
        constant_name: impl Into<String>,
        base_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            constant_name: constant_name.into(),
            base_dir: base_dir.into(),
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            extension: DEFAULT_SOURCE_EXTENSION.to_string(),
        }
    }

    pub fn with_source_root(mut self, source_root: impl Into<PathBuf>) -> Self {
        self.source_root = source_root.into();
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Split the type name at its last qualifier into (package, simple name).
    ///
    /// A name without any qualifier yields an empty package.
    pub fn split_type_name(&self) -> (&str, &str) {
        match self.type_name.rfind(TYPE_NAME_SEPARATOR) {
            Some(index) => (
                &self.type_name[..index],
                &self.type_name[index + TYPE_NAME_SEPARATOR.len_utf8()..],
            ),
            None => ("", self.type_name.as_str()),
        }
    }

    /// Path of the source file relative to the base directory
    pub fn relative_path(&self) -> PathBuf {
        let mut path = self.source_root.clone();
        let mut segments = self.type_name.split(TYPE_NAME_SEPARATOR).peekable();
        while let Some(segment) = segments.next() {
            if segments.peek().is_some() {
                path.push(segment);
            } else {
                path.push(format!("{}.{}", segment, self.extension));
            }
        }
        path
    }

    /// Absolute (or base-relative) path of the source file
    pub fn path(&self) -> PathBuf {
        self.base_dir.join(self.relative_path())
    }

    pub fn exists(&self) -> bool {
        self.path().exists()
    }
}

/// Error taxonomy for commit resolution and publication
#[derive(Debug, thiserror::Error)]
pub enum StampError {
    /// The executable could not be started at all
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// A required name is missing or empty
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The existing file has no `<constant> ... "<value>"` site to splice into
    #[error("malformed target {}: {reason}", .path.display())]
    MalformedTarget { path: PathBuf, reason: String },

    #[error("value {0:?} cannot be embedded in a string literal")]
    UnsafeValue(String),
}

/// What happened to one publication step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum StepOutcome {
    /// Step turned off by configuration
    Disabled,
    /// Property written into the map
    Published { name: String },
    /// Source file generated from the template
    Created { path: PathBuf },
    /// Literal replaced inside an existing source file
    Edited { path: PathBuf },
    /// Step not attempted because of a configuration error
    Skipped { reason: String },
    /// Step attempted but failed
    Failed { error: String },
}

impl StepOutcome {
    /// True when the step changed the property map or a file
    pub fn is_applied(&self) -> bool {
        matches!(
            self,
            StepOutcome::Published { .. } | StepOutcome::Created { .. } | StepOutcome::Edited { .. }
        )
    }
}

/// Complete output structure for JSON serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampReport {
    pub commit_id: CommitId,
    pub property: StepOutcome,
    pub source_file: StepOutcome,
}
