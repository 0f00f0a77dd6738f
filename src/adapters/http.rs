use crate::domain::model::{RawResponse, SourceKind};
use crate::domain::ports::{CommuteSource, ConfigProvider};
use crate::utils::error::{CommuteError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// 建立共用的 HTTP client
///
/// Builder failures come from configuration (timeout, user agent), never
/// from the network, so they are reported as configuration errors.
pub fn build_client<C: ConfigProvider + ?Sized>(config: &C) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds()))
        .user_agent(config.user_agent())
        .build()
        .map_err(|e| CommuteError::ConfigError {
            message: format!(
                "cannot build HTTP client (user agent {:?}): {}",
                config.user_agent(),
                e
            ),
        })
}

#[derive(Debug, Clone)]
pub struct HttpCommuteSource {
    kind: SourceKind,
    endpoint: String,
    field: String,
    client: Client,
}

impl HttpCommuteSource {
    pub fn new(
        kind: SourceKind,
        endpoint: impl Into<String>,
        field: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            kind,
            endpoint: endpoint.into(),
            field: field.into(),
            client,
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(
        kind: SourceKind,
        config: &C,
        client: Client,
    ) -> Self {
        Self::new(
            kind,
            config.endpoint(kind),
            config.response_field(kind),
            client,
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl CommuteSource for HttpCommuteSource {
    fn kind(&self) -> SourceKind {
        self.kind
    }

    fn response_field(&self) -> &str {
        &self.field
    }

    async fn fetch_raw(&self, location: &str, destination: &str) -> Result<RawResponse> {
        tracing::debug!("Requesting {} data from: {}", self.kind, self.endpoint);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("location", location), ("destination", destination)])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("{} response status: {}", self.kind, status);

        if !status.is_success() {
            return Err(CommuteError::UnexpectedStatus {
                url: response.url().to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let json_data: Value =
            serde_json::from_str(&body).map_err(|e| CommuteError::InvalidResponse {
                source_kind: self.kind.to_string(),
                message: format!("body is not valid JSON: {}", e),
            })?;

        match json_data {
            Value::Object(obj) => Ok(obj),
            other => Err(CommuteError::InvalidResponse {
                source_kind: self.kind.to_string(),
                message: format!("expected a JSON object, got {}", json_type_name(&other)),
            }),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
