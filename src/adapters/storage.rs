use crate::domain::ports::Storage;
use crate::utils::error::{CommuteError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Report storage rooted at a directory on the local disk.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_dir: PathBuf,
}

impl LocalStorage {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// 將輸出路徑拆成目錄與檔名，例如 `dir/x.json` -> (`dir`, `x.json`)
    pub fn split_output_path(output_path: &str) -> Result<(PathBuf, String)> {
        let path = Path::new(output_path);
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| CommuteError::InvalidConfigValueError {
                field: "output_path".to_string(),
                value: output_path.to_string(),
                reason: "Path must end with a file name".to_string(),
            })?;
        let base_dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
        Ok((base_dir, file_name.to_string()))
    }

    /// Writes `report` as pretty JSON to `output_path` and returns the bytes written.
    pub async fn save_report<T: Serialize + ?Sized>(output_path: &str, report: &T) -> Result<usize> {
        let (base_dir, file_name) = Self::split_output_path(output_path)?;
        let data = serde_json::to_vec_pretty(report)?;

        Self::new(base_dir).write_file(&file_name, &data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), output_path);
        Ok(data.len())
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_dir.join(path)
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        Ok(tokio::fs::read(self.resolve(path)).await?)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.resolve(path);

        // 空字串代表目前目錄，不需要建立
        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        Ok(())
    }
}
