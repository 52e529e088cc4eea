use crate::core::Relocation;
use crate::utils::error::{IntakeError, Result};
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Copies ingested files into storage and moves the originals to the archive.
#[derive(Debug, Clone)]
pub struct FileRelocator {
    storage_dir: PathBuf,
    archive_dir: PathBuf,
    repo_root: PathBuf,
}

impl FileRelocator {
    pub fn new<P: Into<PathBuf>>(storage_dir: P, archive_dir: P, repo_root: P) -> Self {
        Self {
            storage_dir: storage_dir.into(),
            archive_dir: archive_dir.into(),
            repo_root: repo_root.into(),
        }
    }

    /// The record is only valid once both the copy and the move succeed. If the
    /// move fails the stored copy is removed again.
    pub async fn relocate(&self, source: &Path) -> Result<Relocation> {
        let file_name = source
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .ok_or_else(|| self.error(source, "path has no file name"))?;

        fs::create_dir_all(&self.storage_dir)
            .await
            .map_err(|e| self.error(&self.storage_dir, e))?;
        fs::create_dir_all(&self.archive_dir)
            .await
            .map_err(|e| self.error(&self.archive_dir, e))?;

        let stored_name = self
            .free_stored_name(chrono::Utc::now().timestamp(), &file_name)
            .await?;
        let stored_path = self.storage_dir.join(&stored_name);
        fs::copy(source, &stored_path)
            .await
            .map_err(|e| self.error(source, format!("copy to storage failed: {}", e)))?;

        let archived_path = self.archive_dir.join(&file_name);
        if let Err(e) = move_file(source, &archived_path).await {
            if let Err(cleanup) = fs::remove_file(&stored_path).await {
                tracing::warn!(
                    "Could not remove stored copy {}: {}",
                    stored_path.display(),
                    cleanup
                );
            }
            return Err(self.error(source, format!("move to archive failed: {}", e)));
        }

        Ok(Relocation {
            record_path: self.record_path(&stored_name),
            stored_path,
            archived_path,
        })
    }

    /// `{timestamp}_{name}`, or `{timestamp}_{n}_{name}` when a file processed
    /// in the same second already took that name.
    async fn free_stored_name(&self, timestamp: i64, file_name: &str) -> Result<String> {
        let mut candidate = stored_name(timestamp, 0, file_name);
        let mut counter = 0;
        while fs::try_exists(self.storage_dir.join(&candidate))
            .await
            .map_err(|e| self.error(&self.storage_dir, e))?
        {
            counter += 1;
            candidate = stored_name(timestamp, counter, file_name);
        }
        Ok(candidate)
    }

    /// Storage path as written into the datastore: relative to the repository
    /// root with forward slashes, or the full path if storage lives elsewhere.
    fn record_path(&self, stored_name: &str) -> String {
        match self.storage_dir.strip_prefix(&self.repo_root) {
            Ok(relative) => relative
                .components()
                .filter_map(|c| match c {
                    Component::Normal(part) => Some(part.to_string_lossy().to_string()),
                    _ => None,
                })
                .chain(std::iter::once(stored_name.to_string()))
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => self.storage_dir.join(stored_name).display().to_string(),
        }
    }

    fn error<E: ToString>(&self, path: &Path, message: E) -> IntakeError {
        IntakeError::RelocationError {
            path: path.display().to_string(),
            message: message.to_string(),
        }
    }
}

pub fn stored_name(timestamp: i64, counter: u32, file_name: &str) -> String {
    if counter == 0 {
        format!("{}_{}", timestamp, file_name)
    } else {
        format!("{}_{}_{}", timestamp, counter, file_name)
    }
}

/// Rename, falling back to copy and delete when the archive is on another filesystem.
async fn move_file(from: &Path, to: &Path) -> std::io::Result<()> {
    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            tracing::debug!(
                "Rename of {} failed ({}), copying instead",
                from.display(),
                rename_err
            );
            if fs::copy(from, to).await.is_err() {
                return Err(rename_err);
            }
            fs::remove_file(from).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn layout(root: &Path) -> (FileRelocator, PathBuf) {
        let inbox = root.join("inbox");
        std::fs::create_dir_all(&inbox).unwrap();
        let relocator = FileRelocator::new(
            root.join("repo").join("resumes"),
            root.join("processed"),
            root.join("repo"),
        );
        (relocator, inbox)
    }

    #[test]
    fn test_stored_name_format() {
        assert_eq!(stored_name(1700000000, 0, "cv.pdf"), "1700000000_cv.pdf");
        assert_eq!(stored_name(1700000000, 2, "cv.pdf"), "1700000000_2_cv.pdf");
    }

    #[tokio::test]
    async fn test_relocate_copies_then_archives() {
        let dir = TempDir::new().unwrap();
        let (relocator, inbox) = layout(dir.path());
        let source = inbox.join("jane.pdf");
        std::fs::write(&source, b"resume bytes").unwrap();

        let relocation = relocator.relocate(&source).await.unwrap();

        assert!(!source.exists());
        assert_eq!(relocation.archived_path, dir.path().join("processed").join("jane.pdf"));
        assert_eq!(std::fs::read(&relocation.archived_path).unwrap(), b"resume bytes");
        assert_eq!(std::fs::read(&relocation.stored_path).unwrap(), b"resume bytes");

        let stored_name = relocation
            .stored_path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .to_string();
        assert!(stored_name.ends_with("_jane.pdf"));
        assert_eq!(relocation.record_path, format!("resumes/{}", stored_name));
    }

    #[tokio::test]
    async fn test_failed_move_removes_stored_copy() {
        let dir = TempDir::new().unwrap();
        let (relocator, inbox) = layout(dir.path());
        let source = inbox.join("jane.pdf");
        std::fs::write(&source, b"resume bytes").unwrap();

        // A non-empty directory in the way defeats both rename and copy.
        let blocker = dir.path().join("processed").join("jane.pdf");
        std::fs::create_dir_all(&blocker).unwrap();
        std::fs::write(blocker.join("keep"), b"x").unwrap();

        let err = relocator.relocate(&source).await.unwrap_err();

        assert!(matches!(err, IntakeError::RelocationError { .. }));
        assert!(err.to_string().contains("move to archive failed"));
        let stored: Vec<_> = std::fs::read_dir(dir.path().join("repo").join("resumes"))
            .unwrap()
            .collect();
        assert!(stored.is_empty());
        assert_eq!(std::fs::read(&source).unwrap(), b"resume bytes");
        assert!(blocker.join("keep").exists());
    }

    #[tokio::test]
    async fn test_same_second_names_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let (relocator, _) = layout(dir.path());
        std::fs::create_dir_all(dir.path().join("repo").join("resumes")).unwrap();
        std::fs::write(
            dir.path().join("repo").join("resumes").join("42_cv.pdf"),
            b"first",
        )
        .unwrap();

        let name = relocator.free_stored_name(42, "cv.pdf").await.unwrap();
        assert_eq!(name, "42_1_cv.pdf");
    }

    #[tokio::test]
    async fn test_storage_outside_repo_records_full_path() {
        let dir = TempDir::new().unwrap();
        let relocator = FileRelocator::new(
            dir.path().join("elsewhere"),
            dir.path().join("processed"),
            dir.path().join("repo"),
        );

        let path = relocator.record_path("1_cv.pdf");
        assert_eq!(
            path,
            dir.path().join("elsewhere").join("1_cv.pdf").display().to_string()
        );
    }

    #[tokio::test]
    async fn test_missing_source_is_a_relocation_error() {
        let dir = TempDir::new().unwrap();
        let (relocator, inbox) = layout(dir.path());

        let err = relocator.relocate(&inbox.join("gone.pdf")).await.unwrap_err();
        assert!(matches!(err, IntakeError::RelocationError { .. }));
        let stored: Vec<_> = std::fs::read_dir(dir.path().join("repo").join("resumes"))
            .unwrap()
            .collect();
        assert!(stored.is_empty());
    }
}
