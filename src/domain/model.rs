use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Fields derived from a document's text, before the file is relocated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateProfile {
    pub name: String,
    pub email: String,
    pub role: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub qualification: String,
}

/// One datastore entry. Field order matches the on-disk JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: String,
    pub email: String,
    pub role: String,
    pub skills: Vec<String>,
    pub experience: String,
    pub qualification: String,
    pub file: String,
    pub uploaded_at: String,
}

impl CandidateRecord {
    pub fn from_profile(profile: CandidateProfile, file: String, uploaded_at: String) -> Self {
        Self {
            name: profile.name,
            email: profile.email,
            role: profile.role,
            skills: profile.skills,
            experience: profile.experience,
            qualification: profile.qualification,
            file,
            uploaded_at,
        }
    }
}

/// Where an ingested file ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    /// Full path of the timestamped copy in storage.
    pub stored_path: PathBuf,
    /// Path recorded in the datastore, relative to the repository root when possible.
    pub record_path: String,
    /// Full path of the original after it left the inbox.
    pub archived_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileOutcome {
    Ingested {
        file: String,
        stored_as: String,
        role: String,
    },
    Previewed {
        file: String,
        role: String,
        skills: Vec<String>,
    },
    Failed {
        file: String,
        reason: String,
    },
}

impl FileOutcome {
    pub fn file(&self) -> &str {
        match self {
            FileOutcome::Ingested { file, .. }
            | FileOutcome::Previewed { file, .. }
            | FileOutcome::Failed { file, .. } => file,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, FileOutcome::Failed { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PublishStep {
    pub name: String,
    pub success: bool,
    pub exit_code: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PublishSummary {
    pub steps: Vec<PublishStep>,
}

impl PublishSummary {
    pub fn all_succeeded(&self) -> bool {
        self.steps.iter().all(|step| step.success)
    }

    pub fn failed_steps(&self) -> impl Iterator<Item = &PublishStep> {
        self.steps.iter().filter(|step| !step.success)
    }
}

/// Result of one run over the inbox.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub outcomes: Vec<FileOutcome>,
    pub added: usize,
    pub publish: Option<PublishSummary>,
    pub dry_run: bool,
}

impl IngestReport {
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|outcome| outcome.is_failure())
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }
}
