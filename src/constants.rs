//! Global constants for commitstamp
//!
//! Centralized location for defaults shared by the config layer and the CLI

/// Default key written into the build property map
pub const DEFAULT_PROPERTY_NAME: &str = "vcs.commit.id";

/// Default fully-qualified name of the generated type
pub const DEFAULT_CLASS_NAME: &str = "com.example.build.CommitId";

/// Default name of the generated string constant
pub const DEFAULT_CLASS_CONSTANT: &str = "COMMIT_ID";

/// Source root (relative to the base directory) that type names are mapped under
pub const DEFAULT_SOURCE_ROOT: &str = "src/main/java";

/// File extension of generated source files
pub const DEFAULT_SOURCE_EXTENSION: &str = "java";

/// Version control executable
pub const DEFAULT_VCS_EXECUTABLE: &str = "git";

/// Arguments asking the VCS for the current revision hash
pub const REV_PARSE_HEAD_ARGS: &[&str] = &["rev-parse", "HEAD"];

/// Config file looked up in the base directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE_NAME: &str = "commitstamp.toml";

/// Fallback commit id when the VCS produced no output at all
pub const UNRESOLVED_COMMIT_ID: &str = "unable to resolve commit id";

/// Qualifier separator in fully-qualified type names
pub const TYPE_NAME_SEPARATOR: char = '.';
