use crate::adapters::{scan_inbox, FileRelocator, JsonDatastore};
use crate::core::profile::build_profile;
use crate::core::{
    CandidateProfile, ConfigProvider, Pipeline, PublishSummary, Publisher, Relocation,
    TextExtractor,
};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Inbox -> datastore pipeline backed by the local filesystem.
pub struct IntakePipeline<C: ConfigProvider, X: TextExtractor> {
    config: C,
    extractor: X,
    datastore: JsonDatastore,
    relocator: FileRelocator,
    publisher: Box<dyn Publisher>,
}

impl<C: ConfigProvider, X: TextExtractor> IntakePipeline<C, X> {
    pub fn new(config: C, extractor: X, publisher: Box<dyn Publisher>) -> Self {
        let datastore = JsonDatastore::new(config.datastore_path());
        let relocator = FileRelocator::new(
            config.storage_path().to_path_buf(),
            config.archive_path().to_path_buf(),
            config.repo_root().to_path_buf(),
        );

        Self {
            config,
            extractor,
            datastore,
            relocator,
            publisher,
        }
    }
}

#[async_trait::async_trait]
impl<C: ConfigProvider, X: TextExtractor> Pipeline for IntakePipeline<C, X> {
    async fn load(&self) -> Result<Vec<serde_json::Value>> {
        tracing::debug!("Reading datastore {}", self.datastore.path().display());
        self.datastore.load().await
    }

    async fn scan(&self) -> Result<Vec<PathBuf>> {
        tracing::debug!("Scanning inbox {}", self.config.inbox_path().display());
        scan_inbox(self.config.inbox_path()).await
    }

    async fn analyze(&self, path: &Path) -> Result<CandidateProfile> {
        let text = self.extractor.extract(path).await?;
        tracing::debug!("Extracted {} characters from {}", text.len(), path.display());

        let profile = build_profile(
            &text,
            self.config.vocabulary(),
            self.config.qualifications(),
        );
        tracing::info!(
            "{} -> {} ({} skill(s))",
            path.display(),
            profile.role,
            profile.skills.len()
        );
        Ok(profile)
    }

    async fn relocate(&self, path: &Path) -> Result<Relocation> {
        self.relocator.relocate(path).await
    }

    async fn store(&self, entries: &[serde_json::Value]) -> Result<()> {
        self.datastore.save(entries).await
    }

    async fn publish(&self, added: usize) -> Result<PublishSummary> {
        self.publisher.publish(added).await
    }
}
