use crate::adapters::text::FileType;
use crate::utils::error::{IntakeError, Result};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Regular files (or links to them) in `inbox` with a supported extension,
/// sorted by file name.
pub async fn scan_inbox(inbox: &Path) -> Result<Vec<PathBuf>> {
    let scan_error = |e: std::io::Error| IntakeError::ScanError {
        path: inbox.display().to_string(),
        message: e.to_string(),
    };

    let mut entries = fs::read_dir(inbox).await.map_err(scan_error)?;
    let mut files = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(scan_error)? {
        let path = entry.path();
        if !FileType::from_path(&path).is_supported() {
            tracing::debug!("Ignoring {}", path.display());
            continue;
        }
        // fs::metadata follows symlinks, DirEntry::file_type does not.
        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => files.push(path),
            Ok(_) => {}
            Err(e) => tracing::warn!("Skipping {}: {}", path.display(), e),
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
