//! commitstamp - commit id stamping library
//!
//! Resolves the current version-control commit id and injects it into
//! build metadata: a property map entry and/or a string constant in a
//! generated or existing source file.

pub mod command;
pub mod config;
pub mod constants;
pub mod models;
pub mod orchestrator;
pub mod output;
pub mod properties;
pub mod reporter;
pub mod resolver;
pub mod synth;

pub use command::{CommandRunner, SystemCommandRunner};
pub use config::StampConfig;
pub use models::{CommandResult, CommitId, PropertyMap, StampError, StampReport, StepOutcome, TargetFileSpec};
pub use orchestrator::Orchestrator;
pub use reporter::{LogReporter, MemoryReporter, Reporter};
pub use resolver::CommitIdResolver;
pub use synth::{Materialization, SourceFileSynthesizer};
