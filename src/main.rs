#![forbid(unsafe_code)]

mod cli;

use anyhow::{Context, Result};

use commitstamp::properties::PropertiesFile;
use commitstamp::{output, LogReporter, Orchestrator, PropertyMap, SystemCommandRunner};

fn main() -> Result<()> {
    let options = cli::parse_args()?;

    env_logger::Builder::new()
        .filter_level(options.log_level)
        .parse_default_env()
        .format_target(false)
        .init();

    // The property map is owned here and handed to the run
    let mut properties_file = match options.properties_file {
        Some(ref path) => Some(
            PropertiesFile::load(path)
                .with_context(|| format!("Failed to load properties file {}", path.display()))?,
        ),
        None => None,
    };
    let mut properties = properties_file
        .as_ref()
        .map(PropertiesFile::to_map)
        .unwrap_or_else(PropertyMap::new);

    let reporter = LogReporter::new();
    let orchestrator = Orchestrator::new(options.config, SystemCommandRunner::new(), &reporter);
    let report = orchestrator.run(&mut properties);

    if let (Some(path), Some(file)) = (&options.properties_file, properties_file.as_mut()) {
        if report.property.is_applied() {
            file.apply(&properties);
            file.store(path)
                .with_context(|| format!("Failed to write properties file {}", path.display()))?;
        }
    }

    if options.json_output {
        println!("{}", output::format_json(&report)?);
    } else {
        print!("{}", output::format_human(&report));
    }

    Ok(())
}
