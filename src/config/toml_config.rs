use crate::config::{DEFAULT_TIMEOUT_SECONDS, MAX_TIMEOUT_SECONDS};
use crate::core::{ConfigProvider, SourceKind};
use crate::domain::model::DEFAULT_USER_AGENT;
use crate::utils::error::{CommuteError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub http: HttpConfig,
    pub output: Option<OutputConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "SourceConfig::public_transport")]
    pub public_transport: SourceConfig,
    #[serde(default = "SourceConfig::bike_sharing")]
    pub bike_sharing: SourceConfig,
    #[serde(default = "SourceConfig::ride_sharing")]
    pub ride_sharing: SourceConfig,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            public_transport: SourceConfig::public_transport(),
            bike_sharing: SourceConfig::bike_sharing(),
            ride_sharing: SourceConfig::ride_sharing(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub endpoint: String,
    /// Overrides the array field read from the response body.
    pub field: Option<String>,
}

impl SourceConfig {
    fn for_kind(kind: SourceKind) -> Self {
        Self {
            endpoint: kind.default_endpoint().to_string(),
            field: None,
        }
    }

    fn public_transport() -> Self {
        Self::for_kind(SourceKind::PublicTransport)
    }

    fn bike_sharing() -> Self {
        Self::for_kind(SourceKind::BikeSharing)
    }

    fn ride_sharing() -> Self {
        Self::for_kind(SourceKind::RideSharing)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    pub user_agent: Option<String>,
}

fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout(),
            user_agent: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CommuteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CommuteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TRANSPORT_API})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CommuteError::ConfigError {
            message: format!("invalid environment variable pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn source(&self, kind: SourceKind) -> &SourceConfig {
        match kind {
            SourceKind::PublicTransport => &self.sources.public_transport,
            SourceKind::BikeSharing => &self.sources.bike_sharing,
            SourceKind::RideSharing => &self.sources.ride_sharing,
        }
    }
}

impl ConfigProvider for TomlConfig {
    fn endpoint(&self, kind: SourceKind) -> &str {
        &self.source(kind).endpoint
    }

    fn response_field(&self, kind: SourceKind) -> &str {
        self.source(kind)
            .field
            .as_deref()
            .unwrap_or(kind.response_field())
    }

    fn timeout_seconds(&self) -> u64 {
        self.http.timeout_seconds
    }

    fn user_agent(&self) -> &str {
        self.http
            .user_agent
            .as_deref()
            .unwrap_or(DEFAULT_USER_AGENT)
    }

    fn output_path(&self) -> Option<&str> {
        self.output.as_ref().map(|o| o.path.as_str())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        for kind in SourceKind::ALL {
            let source = self.source(kind);
            validation::validate_url(&format!("sources.{}.endpoint", kind), &source.endpoint)?;
            if let Some(field) = &source.field {
                validation::validate_non_empty_string(&format!("sources.{}.field", kind), field)?;
            }
        }

        validation::validate_range(
            "http.timeout_seconds",
            self.http.timeout_seconds,
            1,
            MAX_TIMEOUT_SECONDS,
        )?;

        if let Some(user_agent) = &self.http.user_agent {
            validation::validate_header_value("http.user_agent", user_agent)?;
        }

        if let Some(output) = &self.output {
            validation::validate_path("output.path", &output.path)?;
        }

        Ok(())
    }
}
