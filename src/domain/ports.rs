use crate::domain::model::{RawResponse, SourceKind, DEFAULT_USER_AGENT};
use crate::utils::error::{CommuteError, Result};
use async_trait::async_trait;
use serde_json::Value;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self, kind: SourceKind) -> &str;

    fn response_field(&self, kind: SourceKind) -> &str {
        kind.response_field()
    }

    fn timeout_seconds(&self) -> u64;

    fn user_agent(&self) -> &str {
        DEFAULT_USER_AGENT
    }

    fn output_path(&self) -> Option<&str>;
}

/// A single commute data source.
#[async_trait]
pub trait CommuteSource: Send + Sync {
    fn kind(&self) -> SourceKind;

    fn response_field(&self) -> &str {
        self.kind().response_field()
    }

    async fn fetch_raw(&self, location: &str, destination: &str) -> Result<RawResponse>;

    async fn fetch(&self, location: &str, destination: &str) -> Result<Vec<Value>> {
        let raw = self.fetch_raw(location, destination).await?;
        extract_field(&raw, self.response_field())
    }
}

/// 取出指定的陣列欄位，內容原封不動
pub fn extract_field(raw: &RawResponse, field: &str) -> Result<Vec<Value>> {
    match raw.get(field) {
        Some(Value::Array(items)) => Ok(items.clone()),
        _ => Err(CommuteError::MissingFieldError {
            field: field.to_string(),
        }),
    }
}
