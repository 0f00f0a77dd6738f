pub mod adapters;
#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{http::HttpCommuteSource, storage::LocalStorage};
pub use config::toml_config::TomlConfig;
pub use core::planner::CommutePlanner;
pub use domain::model::{CommuteOptions, RawCommuteData, RawResponse, SourceKind};
pub use domain::ports::{CommuteSource, ConfigProvider, Storage};
pub use utils::error::{CommuteError, Result};
