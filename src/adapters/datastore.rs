use crate::utils::error::{IntakeError, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;

/// JSON array file holding every candidate record.
///
/// Entries are kept as raw JSON so that fields this tool does not know about
/// survive the rewrite. No locking: two concurrent runs can lose each other's
/// records.
#[derive(Debug, Clone)]
pub struct JsonDatastore {
    path: PathBuf,
}

impl JsonDatastore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Vec<Value>> {
        let content = fs::read_to_string(&self.path).await.map_err(|e| {
            let message = if e.kind() == std::io::ErrorKind::NotFound {
                "datastore file not found".to_string()
            } else {
                e.to_string()
            };
            self.error(message)
        })?;

        serde_json::from_str::<Vec<Value>>(&content)
            .map_err(|e| self.error(format!("expected a JSON array of records: {}", e)))
    }

    /// Overwrites the file with the full array, pretty-printed with two-space indent.
    pub async fn save(&self, entries: &[Value]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).await?;
        Ok(())
    }

    fn error(&self, message: String) -> IntakeError {
        IntakeError::DatastoreError {
            path: self.path.display().to_string(),
            message,
        }
    }
}
