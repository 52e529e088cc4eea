use crate::core::{CandidateRecord, FileOutcome, IngestReport, Pipeline};
use crate::utils::error::Result;
use std::path::Path;

pub struct IntakeEngine<P: Pipeline> {
    pipeline: P,
    dry_run: bool,
}

impl<P: Pipeline> IntakeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            dry_run: false,
        }
    }

    /// Analyze inbox files without relocating them, writing the datastore or publishing.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub async fn run(&self) -> Result<IngestReport> {
        let mut entries = self.pipeline.load().await?;
        tracing::info!("Loaded {} existing record(s)", entries.len());

        let files = self.pipeline.scan().await?;
        tracing::info!("Found {} eligible file(s) in the inbox", files.len());

        let mut report = IngestReport {
            dry_run: self.dry_run,
            ..IngestReport::default()
        };

        for path in files {
            let file = display_name(&path);
            println!("Processing: {}", file);

            let outcome = if self.dry_run {
                self.preview_file(&path, file).await
            } else {
                match self.ingest_file(&path).await {
                    Ok(record) => {
                        let outcome = FileOutcome::Ingested {
                            file,
                            stored_as: record.file.clone(),
                            role: record.role.clone(),
                        };
                        entries.push(serde_json::to_value(&record)?);
                        report.added += 1;
                        outcome
                    }
                    Err(e) => {
                        tracing::warn!("Skipping {}: {}", file, e);
                        FileOutcome::Failed {
                            file,
                            reason: e.to_string(),
                        }
                    }
                }
            };

            report.outcomes.push(outcome);
        }

        if report.added == 0 {
            tracing::info!("No new records, datastore left untouched");
            return Ok(report);
        }

        self.pipeline.store(&entries).await?;
        tracing::info!("Datastore now holds {} record(s)", entries.len());

        let summary = self.pipeline.publish(report.added).await?;
        for step in summary.failed_steps() {
            tracing::warn!("Publish step '{}' failed (exit code {:?})", step.name, step.exit_code);
        }
        report.publish = Some(summary);

        Ok(report)
    }

    async fn ingest_file(&self, path: &Path) -> Result<CandidateRecord> {
        let profile = self.pipeline.analyze(path).await?;
        let relocation = self.pipeline.relocate(path).await?;
        tracing::debug!(
            "Stored {} as {} and archived to {}",
            path.display(),
            relocation.stored_path.display(),
            relocation.archived_path.display()
        );

        Ok(CandidateRecord::from_profile(
            profile,
            relocation.record_path,
            uploaded_at(),
        ))
    }

    async fn preview_file(&self, path: &Path, file: String) -> FileOutcome {
        match self.pipeline.analyze(path).await {
            Ok(profile) => FileOutcome::Previewed {
                file,
                role: profile.role,
                skills: profile.skills,
            },
            Err(e) => FileOutcome::Failed {
                file,
                reason: e.to_string(),
            },
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

fn uploaded_at() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CandidateProfile, PublishStep, PublishSummary, Relocation};
    use crate::utils::error::IntakeError;
    use std::path::PathBuf;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct MockState {
        stored: Option<Vec<serde_json::Value>>,
        published: Vec<usize>,
        relocated: Vec<PathBuf>,
    }

    #[derive(Clone, Default)]
    struct MockPipeline {
        files: Vec<PathBuf>,
        state: Arc<Mutex<MockState>>,
    }

    impl MockPipeline {
        fn with_files(files: &[&str]) -> Self {
            Self {
                files: files.iter().map(PathBuf::from).collect(),
                state: Arc::default(),
            }
        }
    }

    #[async_trait::async_trait]
    impl Pipeline for MockPipeline {
        async fn load(&self) -> Result<Vec<serde_json::Value>> {
            Ok(vec![serde_json::json!({"name": "Existing", "file": "resumes/old.pdf"})])
        }

        async fn scan(&self) -> Result<Vec<PathBuf>> {
            Ok(self.files.clone())
        }

        async fn analyze(&self, path: &Path) -> Result<CandidateProfile> {
            if path.to_string_lossy().contains("broken") {
                return Err(IntakeError::PdfExtractionError {
                    path: path.display().to_string(),
                    message: "invalid xref table".to_string(),
                });
            }
            Ok(CandidateProfile {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                role: "QA Engineer".to_string(),
                skills: vec!["selenium".to_string()],
                experience: "Not Mentioned".to_string(),
                qualification: "Not Mentioned".to_string(),
            })
        }

        async fn relocate(&self, path: &Path) -> Result<Relocation> {
            if path.to_string_lossy().contains("locked") {
                return Err(IntakeError::RelocationError {
                    path: path.display().to_string(),
                    message: "move to archive failed: Is a directory".to_string(),
                });
            }
            self.state.lock().await.relocated.push(path.to_path_buf());
            let name = display_name(path);
            Ok(Relocation {
                stored_path: PathBuf::from("repo/resumes").join(format!("1700000000_{}", name)),
                record_path: format!("resumes/1700000000_{}", name),
                archived_path: PathBuf::from("processed").join(&name),
            })
        }

        async fn store(&self, entries: &[serde_json::Value]) -> Result<()> {
            self.state.lock().await.stored = Some(entries.to_vec());
            Ok(())
        }

        async fn publish(&self, added: usize) -> Result<PublishSummary> {
            self.state.lock().await.published.push(added);
            Ok(PublishSummary {
                steps: vec![PublishStep {
                    name: "push".to_string(),
                    success: true,
                    exit_code: Some(0),
                }],
            })
        }
    }

    #[tokio::test]
    async fn test_run_appends_records_and_publishes_once() {
        let pipeline = MockPipeline::with_files(&["inbox/a.pdf", "inbox/b.docx"]);
        let state = pipeline.state.clone();
        let report = IntakeEngine::new(pipeline).run().await.unwrap();

        assert_eq!(report.added, 2);
        assert_eq!(report.failed_count(), 0);
        assert!(report.publish.as_ref().unwrap().all_succeeded());

        let state = state.lock().await;
        let stored = state.stored.as_ref().unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0]["name"], "Existing");
        assert_eq!(stored[2]["file"], "resumes/1700000000_b.docx");
        assert_eq!(stored[2]["role"], "QA Engineer");
        assert_eq!(state.published, vec![2]);
    }

    #[tokio::test]
    async fn test_failed_file_does_not_stop_the_batch() {
        let pipeline = MockPipeline::with_files(&["inbox/broken.pdf", "inbox/good.pdf"]);
        let state = pipeline.state.clone();
        let report = IntakeEngine::new(pipeline).run().await.unwrap();

        assert_eq!(report.added, 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.outcomes[0].file(), "broken.pdf");
        assert!(report.outcomes[0].is_failure());

        let state = state.lock().await;
        assert_eq!(state.relocated, vec![PathBuf::from("inbox/good.pdf")]);
        assert_eq!(state.stored.as_ref().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_nothing_added_skips_store_and_publish() {
        let pipeline = MockPipeline::with_files(&["inbox/broken.pdf"]);
        let state = pipeline.state.clone();
        let report = IntakeEngine::new(pipeline).run().await.unwrap();

        assert_eq!(report.added, 0);
        assert!(report.publish.is_none());

        let state = state.lock().await;
        assert!(state.stored.is_none());
        assert!(state.published.is_empty());
    }

    #[tokio::test]
    async fn test_relocation_failure_leaves_datastore_and_publisher_alone() {
        let pipeline = MockPipeline::with_files(&["inbox/locked.pdf"]);
        let state = pipeline.state.clone();
        let report = IntakeEngine::new(pipeline).run().await.unwrap();

        assert_eq!(report.added, 0);
        assert!(matches!(
            &report.outcomes[0],
            FileOutcome::Failed { file, reason } if file == "locked.pdf" && reason.contains("move to archive failed")
        ));
        assert!(report.publish.is_none());

        let state = state.lock().await;
        assert!(state.relocated.is_empty());
        assert!(state.stored.is_none());
        assert!(state.published.is_empty());
    }

    #[tokio::test]
    async fn test_relocation_failure_is_not_recorded() {
        let pipeline = MockPipeline::with_files(&["inbox/locked.pdf", "inbox/open.pdf"]);
        let state = pipeline.state.clone();
        let report = IntakeEngine::new(pipeline).run().await.unwrap();

        assert_eq!(report.added, 1);
        assert_eq!(report.failed_count(), 1);

        let state = state.lock().await;
        let stored = state.stored.as_ref().unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1]["file"], "resumes/1700000000_open.pdf");
        assert_eq!(state.published, vec![1]);
    }

    #[tokio::test]
    async fn test_dry_run_only_previews() {
        let pipeline = MockPipeline::with_files(&["inbox/a.pdf"]);
        let state = pipeline.state.clone();
        let report = IntakeEngine::new(pipeline)
            .with_dry_run(true)
            .run()
            .await
            .unwrap();

        assert!(report.dry_run);
        assert_eq!(report.added, 0);
        assert!(matches!(
            &report.outcomes[0],
            FileOutcome::Previewed { role, .. } if role == "QA Engineer"
        ));

        let state = state.lock().await;
        assert!(state.relocated.is_empty());
        assert!(state.stored.is_none());
        assert!(state.published.is_empty());
    }
}
