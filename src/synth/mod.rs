//! Source file synthesis module
//!
//! Materializes the commit id as a string constant inside a source file:
//! - Template-based creation when the file does not exist yet
//! - Targeted literal replacement when it does, leaving every other byte alone
//!
//! Only the `<constant> ... "<value>"` pattern is recognised; the file is
//! never parsed as source code.

pub mod splice;

use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{StampError, TargetFileSpec};

pub use splice::{splice_literal, SpliceError};

/// How the constant gets into the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialization {
    /// Generate a new file from the template
    Create,
    /// Replace the literal value inside the existing file
    Edit,
}

impl Materialization {
    /// Pick the variant from whether the target file exists
    pub fn for_target(spec: &TargetFileSpec) -> Self {
        if spec.exists() {
            Materialization::Edit
        } else {
            Materialization::Create
        }
    }
}

/// Render the minimal source file declaring `constant = "value"`
pub fn render_source(spec: &TargetFileSpec, value: &str) -> String {
    let (package, simple_name) = spec.split_type_name();
    format!(
        "package {};\npublic class {}{{\npublic static final String {} = \"{}\";\n}}",
        package, simple_name, spec.constant_name, value
    )
}

/// Text to place between the quotes of the literal.
///
/// Backslashes are escaped; quotes and line breaks are refused since the
/// next edit locates the literal by its closing quote.
pub fn literal_text(value: &str) -> Result<String, StampError> {
    if value.contains(&['"', '\n', '\r'][..]) {
        return Err(StampError::UnsafeValue(value.to_string()));
    }
    Ok(value.replace('\\', "\\\\"))
}

/// Writes the commit constant into the file described by a [`TargetFileSpec`]
#[derive(Debug, Clone)]
pub struct SourceFileSynthesizer {
    spec: TargetFileSpec,
}

impl SourceFileSynthesizer {
    pub fn new(spec: TargetFileSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &TargetFileSpec {
        &self.spec
    }

    /// Create or edit depending on whether the file exists.
    ///
    /// Returns the variant used and the path written.
    pub fn materialize(&self, value: &str) -> Result<(Materialization, PathBuf), StampError> {
        let mode = Materialization::for_target(&self.spec);
        let path = match mode {
            Materialization::Create => self.create(value)?,
            Materialization::Edit => self.edit(value)?,
        };
        Ok((mode, path))
    }

    /// Generate a fresh file holding only the constant declaration
    pub fn create(&self, value: &str) -> Result<PathBuf, StampError> {
        let literal = literal_text(value)?;
        let path = self.spec.path();
        let source = render_source(&self.spec, &literal);
        log::debug!("Generated source for {}:\n{}", path.display(), source);

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| io_error(parent, source))?;
            }
        }
        fs::write(&path, source).map_err(|source| io_error(&path, source))?;
        Ok(path)
    }

    /// Replace the current literal of the constant in the existing file
    pub fn edit(&self, value: &str) -> Result<PathBuf, StampError> {
        let literal = literal_text(value)?;
        let path = self.spec.path();
        let original = fs::read_to_string(&path).map_err(|source| io_error(&path, source))?;

        let updated = splice_literal(&original, &self.spec.constant_name, &literal).map_err(|err| {
            StampError::MalformedTarget {
                path: path.clone(),
                reason: err.to_string(),
            }
        })?;
        log::debug!("Updated source for {}:\n{}", path.display(), updated);

        fs::write(&path, updated).map_err(|source| io_error(&path, source))?;
        Ok(path)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> StampError {
    StampError::Io {
        path: path.to_path_buf(),
        source,
    }
}
