// Application layer: wires CLI arguments, optional TOML config, planner and report storage.

use crate::adapters::storage::LocalStorage;
use crate::config::toml_config::TomlConfig;
use crate::config::CliConfig;
use crate::core::planner::CommutePlanner;
use crate::core::{ConfigProvider, SourceKind};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Picks where endpoints, response fields, timeout and user agent come from.
///
/// With `--config` the TOML file replaces the CLI endpoint and timeout flags
/// entirely; otherwise the CLI arguments are used.
pub fn resolve_settings(cli: &CliConfig) -> Result<Box<dyn ConfigProvider>> {
    let Some(path) = &cli.config else {
        return Ok(Box::new(cli.clone()));
    };

    tracing::info!("📁 Loading configuration from: {}", path);
    let config = TomlConfig::from_file(path)?;
    config.validate()?;

    for kind in SourceKind::ALL {
        if cli.endpoint(kind) != kind.default_endpoint() {
            tracing::warn!(
                "Ignoring CLI endpoint for {}; using {} from {}",
                kind,
                config.endpoint(kind),
                path
            );
        }
    }

    Ok(Box::new(config))
}

/// `--output-path` wins over the TOML `[output]` path.
pub fn resolve_output_path<'a>(
    cli: &'a CliConfig,
    settings: &'a dyn ConfigProvider,
) -> Option<&'a str> {
    cli.output_path.as_deref().or(settings.output_path())
}

/// Collects the commute report and returns it as pretty JSON.
pub async fn run(cli: &CliConfig) -> Result<String> {
    cli.validate()?;

    let settings = resolve_settings(cli)?;
    let planner = CommutePlanner::from_config(settings.as_ref())?;

    let report = if cli.raw {
        serde_json::to_value(planner.collect_raw(&cli.location, &cli.destination).await)?
    } else {
        serde_json::to_value(planner.plan(&cli.location, &cli.destination).await)?
    };

    if let Some(output_path) = resolve_output_path(cli, settings.as_ref()) {
        LocalStorage::save_report(output_path, &report).await?;
        tracing::info!("📁 Report saved to: {}", output_path);
    }

    Ok(serde_json::to_string_pretty(&report)?)
}
