use crate::domain::model::{CandidateProfile, PublishSummary, Relocation};
use crate::domain::vocabulary::RoleVocabulary;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub trait ConfigProvider: Send + Sync {
    fn inbox_path(&self) -> &Path;
    fn archive_path(&self) -> &Path;
    fn storage_path(&self) -> &Path;
    fn datastore_path(&self) -> &Path;
    fn repo_root(&self) -> &Path;
    fn vocabulary(&self) -> &RoleVocabulary;
    fn qualifications(&self) -> &[String];
}

pub trait TextExtractor: Send + Sync {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// Side-effecting step that makes newly ingested records visible elsewhere.
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, added: usize) -> Result<PublishSummary>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// Reads every existing datastore entry.
    async fn load(&self) -> Result<Vec<serde_json::Value>>;
    /// Lists eligible inbox files.
    async fn scan(&self) -> Result<Vec<PathBuf>>;
    /// Extracts text and derives the candidate's fields.
    async fn analyze(&self, path: &Path) -> Result<CandidateProfile>;
    /// Copies the file into storage and moves it out of the inbox.
    async fn relocate(&self, path: &Path) -> Result<Relocation>;
    /// Rewrites the whole datastore.
    async fn store(&self, entries: &[serde_json::Value]) -> Result<()>;
    async fn publish(&self, added: usize) -> Result<PublishSummary>;
}
