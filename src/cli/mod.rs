//! CLI argument parsing and validation module
//!
//! Handles command-line interface using clap, including:
//! - Config file discovery and loading
//! - Per-field overrides of the loaded configuration
//! - Properties file, output format and verbosity options

use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};
use anyhow::{Result, anyhow};

use commitstamp::config::StampConfig;

const LONG_VERSION: &str = concat!(
    env!("COMMITSTAMP_VERSION"),
    " (",
    env!("COMMITSTAMP_GIT_HASH"),
    ")"
);

/// Resolve the current git commit id and stamp it into build metadata
#[derive(Debug, Parser)]
#[command(
    name = "commitstamp",
    version = env!("COMMITSTAMP_VERSION"),
    long_version = LONG_VERSION,
    about = "Stamp the current git commit id into build properties or a source constant",
    long_about = "Resolves the current commit id with `git rev-parse HEAD` and publishes it as a build property and/or as a string constant in a generated or existing source file."
)]
pub struct Args {
    /// Project base directory
    #[arg(short = 'C', long = "base-dir", value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Config file (defaults to commitstamp.toml in the base directory, if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Do not publish the commit id as a build property
    #[arg(long = "no-property-update", action = ArgAction::SetTrue)]
    pub no_property_update: bool,

    /// Name of the build property
    #[arg(long, value_name = "NAME")]
    pub property_name: Option<String>,

    /// Write the commit id into a source file constant
    #[arg(long, action = ArgAction::SetTrue)]
    pub class_update: bool,

    /// Fully-qualified name of the type holding the constant
    #[arg(long, value_name = "FQN")]
    pub class_name: Option<String>,

    /// Name of the constant holding the commit id
    #[arg(long, value_name = "NAME")]
    pub class_constant: Option<String>,

    /// Source root relative to the base directory
    #[arg(long, value_name = "DIR")]
    pub source_root: Option<PathBuf>,

    /// Extension of the generated source file
    #[arg(long, value_name = "EXT")]
    pub source_extension: Option<String>,

    /// VCS executable used to resolve the commit id
    #[arg(long, value_name = "PROGRAM")]
    pub vcs_executable: Option<String>,

    /// Properties file holding the build property map (key=value lines)
    #[arg(short = 'p', long, value_name = "FILE")]
    pub properties_file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(short, long)]
    pub json: bool,

    /// Enable debug diagnostics
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Options that shape the process rather than the stamping run
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: StampConfig,
    pub properties_file: Option<PathBuf>,
    pub json_output: bool,
    pub log_level: log::LevelFilter,
}

/// Parse command line arguments and return configuration
pub fn parse_args() -> Result<RunOptions> {
    resolve_options(Args::parse())
}

/// Merge the config file and command-line overrides
pub fn resolve_options(args: Args) -> Result<RunOptions> {
    let base_dir = args.base_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    if !base_dir.is_dir() {
        return Err(anyhow!("Base directory does not exist: {}", base_dir.display()));
    }

    let mut config = load_config(args.config.as_deref(), &base_dir)?;
    config.base_dir = base_dir;

    if args.no_property_update {
        config.property_update = false;
    }
    if let Some(name) = args.property_name {
        config.property_name = name;
    }
    if args.class_update {
        config.class_update = true;
    }
    if let Some(name) = args.class_name {
        config.class_name = name;
    }
    if let Some(constant) = args.class_constant {
        config.class_constant = constant;
    }
    if let Some(root) = args.source_root {
        config.source_root = root;
    }
    if let Some(extension) = args.source_extension {
        config.source_extension = extension;
    }
    if let Some(executable) = args.vcs_executable {
        config.vcs_executable = executable;
    }

    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else if args.quiet {
        log::LevelFilter::Error
    } else {
        log::LevelFilter::Info
    };

    Ok(RunOptions {
        config,
        properties_file: args.properties_file,
        json_output: args.json,
        log_level,
    })
}

fn load_config(explicit: Option<&Path>, base_dir: &Path) -> Result<StampConfig> {
    match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(anyhow!("Config file does not exist: {}", path.display()));
            }
            StampConfig::load_from_file(path)
        }
        None => {
            let path = StampConfig::default_config_path(base_dir);
            if path.exists() {
                StampConfig::load_from_file(&path)
            } else {
                Ok(StampConfig::default())
            }
        }
    }
}
