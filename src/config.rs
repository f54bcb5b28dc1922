//! Configuration management
//!
//! Handles TOML configuration parsing and defaults for a stamping run

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use anyhow::{Context, Result};

use crate::constants::{
    DEFAULT_CLASS_CONSTANT, DEFAULT_CLASS_NAME, DEFAULT_CONFIG_FILE_NAME, DEFAULT_PROPERTY_NAME,
    DEFAULT_SOURCE_EXTENSION, DEFAULT_SOURCE_ROOT, DEFAULT_VCS_EXECUTABLE,
};
use crate::models::{StampError, TargetFileSpec};

/// Settings for one stamping run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StampConfig {
    /// Publish the commit id into the property map
    pub property_update: bool,
    /// Key of the published property
    pub property_name: String,
    /// Write the commit id into a source constant
    pub class_update: bool,
    /// Fully-qualified name of the type holding the constant
    pub class_name: String,
    /// Name of the constant
    pub class_constant: String,
    /// Project base directory
    pub base_dir: PathBuf,
    /// Source root relative to `base_dir`
    pub source_root: PathBuf,
    /// Source file extension
    pub source_extension: String,
    /// VCS executable queried for the commit id
    pub vcs_executable: String,
}

impl Default for StampConfig {
    fn default() -> Self {
        Self {
            property_update: true,
            property_name: DEFAULT_PROPERTY_NAME.to_string(),
            class_update: false,
            class_name: DEFAULT_CLASS_NAME.to_string(),
            class_constant: DEFAULT_CLASS_CONSTANT.to_string(),
            base_dir: PathBuf::from("."),
            source_root: PathBuf::from(DEFAULT_SOURCE_ROOT),
            source_extension: DEFAULT_SOURCE_EXTENSION.to_string(),
            vcs_executable: DEFAULT_VCS_EXECUTABLE.to_string(),
        }
    }
}

impl StampConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Conventional config file location inside a base directory
    pub fn default_config_path(base_dir: &Path) -> PathBuf {
        base_dir.join(DEFAULT_CONFIG_FILE_NAME)
    }

    /// Check the names the source file step needs
    pub fn validate_class_target(&self) -> Result<(), StampError> {
        if self.class_name.trim().is_empty() {
            return Err(StampError::Configuration(
                "class update is enabled, so 'class_name' must be a valid fully-qualified type name"
                    .to_string(),
            ));
        }
        if self.class_constant.trim().is_empty() {
            return Err(StampError::Configuration(
                "class update is enabled, so 'class_constant' must be a constant name".to_string(),
            ));
        }
        Ok(())
    }

    /// Target file derived from the class settings
    pub fn target_spec(&self) -> TargetFileSpec {
        TargetFileSpec::new(&self.class_name, &self.class_constant, &self.base_dir)
            .with_source_root(&self.source_root)
            .with_extension(&self.source_extension)
    }
}
