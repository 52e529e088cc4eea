use crate::domain::vocabulary::RoleVocabulary;
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{self, Validate};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

lazy_static! {
    static ref ENV_VAR_RE: Regex = Regex::new(r"\$\{([^}]+)\}").unwrap();
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub paths: PathsConfig,
    pub publish: Option<PublishConfig>,
    pub qualifications: Option<QualificationsConfig>,
    pub roles: Option<RoleVocabulary>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathsConfig {
    pub inbox: Option<PathBuf>,
    pub archive: Option<PathBuf>,
    pub storage: Option<PathBuf>,
    pub datastore: Option<PathBuf>,
    pub repo_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublishConfig {
    pub enabled: Option<bool>,
    pub commit_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualificationsConfig {
    pub degrees: Vec<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${RESUME_REPO})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .to_string()
    }

    pub fn publish_enabled(&self) -> Option<bool> {
        self.publish.as_ref().and_then(|p| p.enabled)
    }

    pub fn commit_message(&self) -> Option<&str> {
        self.publish
            .as_ref()
            .and_then(|p| p.commit_message.as_deref())
    }

    pub fn degrees(&self) -> Option<&[String]> {
        self.qualifications.as_ref().map(|q| q.degrees.as_slice())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        let paths = [
            ("paths.inbox", &self.paths.inbox),
            ("paths.archive", &self.paths.archive),
            ("paths.storage", &self.paths.storage),
            ("paths.datastore", &self.paths.datastore),
            ("paths.repo_root", &self.paths.repo_root),
        ];
        for (field, path) in paths {
            if let Some(path) = path {
                validation::validate_path(field, path)?;
            }
        }

        if let Some(message) = self.commit_message() {
            validation::validate_non_empty_string("publish.commit_message", message)?;
        }

        if let Some(degrees) = self.degrees() {
            validation::validate_non_empty_list("qualifications.degrees", degrees)?;
        }

        if let Some(roles) = &self.roles {
            validate_vocabulary(roles)?;
        }

        Ok(())
    }
}

pub fn validate_vocabulary(vocabulary: &RoleVocabulary) -> Result<()> {
    validation::validate_non_empty_list("roles", vocabulary.roles())?;
    validation::validate_unique(
        "roles.name",
        vocabulary.roles().iter().map(|role| role.name.as_str()),
    )?;

    for role in vocabulary.roles() {
        validation::validate_non_empty_string("roles.name", &role.name)?;
        if role.keywords.is_empty() {
            return Err(IntakeError::InvalidConfigValueError {
                field: "roles.keywords".to_string(),
                value: role.name.clone(),
                reason: "Role needs at least one keyword".to_string(),
            });
        }
    }

    Ok(())
}
