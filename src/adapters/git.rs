use crate::core::{PublishStep, PublishSummary, Publisher};
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::process::Command;

pub const DEFAULT_COMMIT_MESSAGE: &str = "Added {count} new resumes";

/// Pulls, stages, commits and pushes the repository holding the datastore.
///
/// A step exiting non-zero is logged and reported but does not stop the
/// remaining steps. Only failing to start the program is an error.
#[derive(Debug, Clone)]
pub struct GitPublisher {
    repo_root: PathBuf,
    message_template: String,
    program: String,
}

impl GitPublisher {
    pub fn new<P: Into<PathBuf>>(repo_root: P) -> Self {
        Self {
            repo_root: repo_root.into(),
            message_template: DEFAULT_COMMIT_MESSAGE.to_string(),
            program: "git".to_string(),
        }
    }

    /// `{count}` in the template is replaced by the number of added records.
    pub fn with_message_template<S: Into<String>>(mut self, template: S) -> Self {
        self.message_template = template.into();
        self
    }

    pub fn with_program<S: Into<String>>(mut self, program: S) -> Self {
        self.program = program.into();
        self
    }

    pub fn commit_message(&self, added: usize) -> String {
        self.message_template.replace("{count}", &added.to_string())
    }

    fn steps(&self, added: usize) -> Vec<(&'static str, Vec<String>)> {
        vec![
            ("pull", vec!["pull".to_string()]),
            ("add", vec!["add".to_string(), ".".to_string()]),
            (
                "commit",
                vec![
                    "commit".to_string(),
                    "-m".to_string(),
                    self.commit_message(added),
                ],
            ),
            ("push", vec!["push".to_string()]),
        ]
    }
}

#[async_trait]
impl Publisher for GitPublisher {
    async fn publish(&self, added: usize) -> Result<PublishSummary> {
        let mut summary = PublishSummary::default();

        for (name, args) in self.steps(added) {
            tracing::info!("Running {} {}", self.program, args.join(" "));
            let status = Command::new(&self.program)
                .args(&args)
                .current_dir(&self.repo_root)
                .status()
                .await
                .map_err(|e| IntakeError::PublishError {
                    message: format!("could not run {} {}: {}", self.program, name, e),
                })?;

            if !status.success() {
                tracing::warn!("{} {} exited with {}", self.program, name, status);
            }
            summary.steps.push(PublishStep {
                name: name.to_string(),
                success: status.success(),
                exit_code: status.code(),
            });
        }

        Ok(summary)
    }
}

/// Publisher for runs that must not touch version control.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPublisher;

#[async_trait]
impl Publisher for NoopPublisher {
    async fn publish(&self, added: usize) -> Result<PublishSummary> {
        tracing::info!("Publishing disabled, {} record(s) left uncommitted", added);
        Ok(PublishSummary::default())
    }
}
