pub mod toml_config;

use crate::adapters::git::DEFAULT_COMMIT_MESSAGE;
use crate::core::fields::DEFAULT_QUALIFICATIONS;
use crate::core::ConfigProvider;
use crate::domain::vocabulary::RoleVocabulary;
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{self, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use toml_config::TomlConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "resume-intake")]
#[command(about = "Ingest resumes from an inbox into a git-tracked JSON datastore")]
pub struct CliConfig {
    /// TOML configuration file; command line flags take precedence
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory scanned for new .pdf/.docx resumes [default: ./inbox]
    #[arg(long)]
    pub inbox: Option<PathBuf>,

    /// Where ingested originals are moved [default: ./processed]
    #[arg(long)]
    pub archive: Option<PathBuf>,

    /// Where timestamped copies are stored [default: <repo-root>/resumes]
    #[arg(long)]
    pub storage: Option<PathBuf>,

    /// JSON datastore file [default: <repo-root>/data/resumes.json]
    #[arg(long)]
    pub datastore: Option<PathBuf>,

    /// Git checkout that holds the storage directory and datastore [default: .]
    #[arg(long)]
    pub repo_root: Option<PathBuf>,

    /// Skip git pull/add/commit/push after ingesting
    #[arg(long)]
    pub no_publish: bool,

    /// Show what would be ingested without moving files or writing anything
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub inbox_path: PathBuf,
    pub archive_path: PathBuf,
    pub storage_path: PathBuf,
    pub datastore_path: PathBuf,
    pub repo_root: PathBuf,
    pub vocabulary: RoleVocabulary,
    pub qualifications: Vec<String>,
    pub publish_enabled: bool,
    pub commit_message: String,
}

impl IntakeConfig {
    /// Default layout around a repository root.
    pub fn with_repo_root<P: Into<PathBuf>>(repo_root: P) -> Self {
        let repo_root = repo_root.into();
        Self {
            inbox_path: PathBuf::from("./inbox"),
            archive_path: PathBuf::from("./processed"),
            storage_path: repo_root.join("resumes"),
            datastore_path: repo_root.join("data").join("resumes.json"),
            repo_root,
            vocabulary: RoleVocabulary::default(),
            qualifications: DEFAULT_QUALIFICATIONS.iter().map(|d| d.to_string()).collect(),
            publish_enabled: true,
            commit_message: DEFAULT_COMMIT_MESSAGE.to_string(),
        }
    }

    pub fn from_cli(cli: &CliConfig) -> Result<Self> {
        let file_config = match &cli.config {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                config
            }
            None => TomlConfig::default(),
        };

        Ok(Self::resolve(cli, file_config))
    }

    /// Command line flags win over the file, the file wins over defaults.
    pub fn resolve(cli: &CliConfig, file: TomlConfig) -> Self {
        let paths = file.paths.clone();
        let repo_root = cli
            .repo_root
            .clone()
            .or(paths.repo_root)
            .unwrap_or_else(|| PathBuf::from("."));
        let mut config = Self::with_repo_root(repo_root);

        if let Some(inbox) = cli.inbox.clone().or(paths.inbox) {
            config.inbox_path = inbox;
        }
        if let Some(archive) = cli.archive.clone().or(paths.archive) {
            config.archive_path = archive;
        }
        if let Some(storage) = cli.storage.clone().or(paths.storage) {
            config.storage_path = storage;
        }
        if let Some(datastore) = cli.datastore.clone().or(paths.datastore) {
            config.datastore_path = datastore;
        }

        config.publish_enabled = !cli.no_publish && file.publish_enabled().unwrap_or(true);
        if let Some(message) = file.commit_message() {
            config.commit_message = message.to_string();
        }
        if let Some(degrees) = file.degrees() {
            config.qualifications = degrees.to_vec();
        }
        if let Some(roles) = file.roles {
            config.vocabulary = roles;
        }

        config
    }
}

impl ConfigProvider for IntakeConfig {
    fn inbox_path(&self) -> &Path {
        &self.inbox_path
    }

    fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    fn datastore_path(&self) -> &Path {
        &self.datastore_path
    }

    fn repo_root(&self) -> &Path {
        &self.repo_root
    }

    fn vocabulary(&self) -> &RoleVocabulary {
        &self.vocabulary
    }

    fn qualifications(&self) -> &[String] {
        &self.qualifications
    }
}

impl Validate for IntakeConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("inbox", &self.inbox_path)?;
        validation::validate_path("archive", &self.archive_path)?;
        validation::validate_path("storage", &self.storage_path)?;
        validation::validate_path("datastore", &self.datastore_path)?;
        validation::validate_path("repo_root", &self.repo_root)?;

        if self.inbox_path == self.archive_path {
            return Err(IntakeError::InvalidConfigValueError {
                field: "archive".to_string(),
                value: self.archive_path.display().to_string(),
                reason: "Archive directory must differ from the inbox".to_string(),
            });
        }

        validation::validate_non_empty_string("publish.commit_message", &self.commit_message)?;
        toml_config::validate_vocabulary(&self.vocabulary)?;
        Ok(())
    }
}
