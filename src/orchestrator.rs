//! Stamping run orchestration
//!
//! Resolves the commit id once, then runs the property and source file
//! steps independently. A step that is skipped or fails never blocks the
//! other one, and nothing here aborts the caller.

use serde_json::json;

use crate::command::CommandRunner;
use crate::config::StampConfig;
use crate::models::{CommitId, PropertyMap, StampError, StampReport, StepOutcome};
use crate::properties::PropertyPublisher;
use crate::reporter::{ReportLevel, Reporter};
use crate::resolver::CommitIdResolver;
use crate::synth::{Materialization, SourceFileSynthesizer};

pub struct Orchestrator<'a, R> {
    config: StampConfig,
    resolver: CommitIdResolver<R>,
    reporter: &'a dyn Reporter,
}

impl<'a, R: CommandRunner> Orchestrator<'a, R> {
    pub fn new(config: StampConfig, runner: R, reporter: &'a dyn Reporter) -> Self {
        let resolver = CommitIdResolver::with_executable(runner, config.vcs_executable.clone());
        Self {
            config,
            resolver,
            reporter,
        }
    }

    /// Resolve the commit id and apply every enabled step
    pub fn run(&self, properties: &mut PropertyMap) -> StampReport {
        let commit_id = self.resolver.resolve();
        self.reporter.report(
            ReportLevel::Info,
            "commit_resolved",
            &format!("Commit id: {}", commit_id),
            json!({ "commit_id": commit_id.as_str(), "resolved": commit_id.is_resolved() }),
        );

        let property = if self.config.property_update {
            self.reporter.info("property_update", "Updating build property.");
            self.update_property(properties, &commit_id)
        } else {
            StepOutcome::Disabled
        };

        let source_file = if self.config.class_update {
            self.reporter.info("source_update", "Updating source file.");
            self.update_source_file(&commit_id)
        } else {
            StepOutcome::Disabled
        };

        StampReport {
            commit_id,
            property,
            source_file,
        }
    }

    fn update_property(&self, properties: &mut PropertyMap, commit_id: &CommitId) -> StepOutcome {
        let name = &self.config.property_name;
        match PropertyPublisher::publish(properties, name, commit_id.as_str()) {
            Ok(()) => {
                self.reporter.report(
                    ReportLevel::Debug,
                    "property_published",
                    &format!("[{}]: {}", name, commit_id),
                    json!({ "name": name, "value": commit_id.as_str() }),
                );
                StepOutcome::Published { name: name.clone() }
            }
            Err(err) => self.step_error("property_update_skipped", err),
        }
    }

    fn update_source_file(&self, commit_id: &CommitId) -> StepOutcome {
        if let Err(err) = self.config.validate_class_target() {
            return self.step_error("source_update_skipped", err);
        }

        let synthesizer = SourceFileSynthesizer::new(self.config.target_spec());
        let path = synthesizer.spec().path();
        let message = match Materialization::for_target(synthesizer.spec()) {
            Materialization::Create => {
                format!("Source file '{}' does not exist. Creating...", path.display())
            }
            Materialization::Edit => format!(
                "Source file '{}' exists. Setting constant '{}'.",
                path.display(),
                self.config.class_constant
            ),
        };
        self.reporter.report(
            ReportLevel::Info,
            "source_target",
            &message,
            json!({ "path": path.display().to_string() }),
        );

        match synthesizer.materialize(commit_id.as_str()) {
            Ok((Materialization::Create, path)) => StepOutcome::Created { path },
            Ok((Materialization::Edit, path)) => StepOutcome::Edited { path },
            Err(err) => self.step_error("source_update_failed", err),
        }
    }

    /// Report a step failure and turn it into an outcome
    fn step_error(&self, event: &str, err: StampError) -> StepOutcome {
        let kind = match err {
            StampError::Configuration(_) => "configuration",
            StampError::Io { .. } => "io",
            StampError::MalformedTarget { .. } => "malformed_target",
            StampError::UnsafeValue(_) => "unsafe_value",
            StampError::Launch { .. } => "launch",
        };
        self.reporter.report(
            ReportLevel::Error,
            event,
            &err.to_string(),
            json!({ "kind": kind }),
        );

        match err {
            StampError::Configuration(reason) => StepOutcome::Skipped { reason },
            other => StepOutcome::Failed {
                error: other.to_string(),
            },
        }
    }
}
