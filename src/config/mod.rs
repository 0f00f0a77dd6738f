pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, SourceKind};
#[cfg(feature = "cli")]
use crate::domain::model::{
    DEFAULT_BIKE_SHARE_ENDPOINT, DEFAULT_RIDE_SHARE_ENDPOINT, DEFAULT_TRANSPORT_ENDPOINT,
};
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const MAX_TIMEOUT_SECONDS: u64 = 300;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "commute-planner")]
#[command(about = "Collect public transport, bike-sharing and ride-sharing options for a trip")]
pub struct CliConfig {
    #[arg(long, help = "Where the trip starts")]
    pub location: String,

    #[arg(long, help = "Where the trip ends")]
    pub destination: String,

    #[arg(long, default_value = DEFAULT_TRANSPORT_ENDPOINT)]
    pub transport_endpoint: String,

    #[arg(long, default_value = DEFAULT_BIKE_SHARE_ENDPOINT)]
    pub bike_share_endpoint: String,

    #[arg(long, default_value = DEFAULT_RIDE_SHARE_ENDPOINT)]
    pub ride_share_endpoint: String,

    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECONDS)]
    pub timeout_seconds: u64,

    #[arg(long, help = "Load endpoints, timeout and output path from a TOML file")]
    pub config: Option<String>,

    #[arg(long, help = "Also write the JSON report to this file")]
    pub output_path: Option<String>,

    #[arg(long, help = "Print the undecoded response bodies")]
    pub raw: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn endpoint(&self, kind: SourceKind) -> &str {
        match kind {
            SourceKind::PublicTransport => &self.transport_endpoint,
            SourceKind::BikeSharing => &self.bike_share_endpoint,
            SourceKind::RideSharing => &self.ride_share_endpoint,
        }
    }

    fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds
    }

    fn output_path(&self) -> Option<&str> {
        self.output_path.as_deref()
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validation::validate_non_empty_string("location", &self.location)?;
        validation::validate_non_empty_string("destination", &self.destination)?;

        validation::validate_url("transport_endpoint", &self.transport_endpoint)?;
        validation::validate_url("bike_share_endpoint", &self.bike_share_endpoint)?;
        validation::validate_url("ride_share_endpoint", &self.ride_share_endpoint)?;

        validation::validate_range(
            "timeout_seconds",
            self.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;

        if let Some(path) = &self.output_path {
            validation::validate_path("output_path", path)?;
        }
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }

        Ok(())
    }
}
