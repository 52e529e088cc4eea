//! Text extraction from resume documents

use crate::core::TextExtractor;
use crate::utils::error::{IntakeError, Result};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    Pdf,
    Docx,
    Unknown,
}

impl FileType {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("pdf") => FileType::Pdf,
            Some("docx") => FileType::Docx,
            _ => FileType::Unknown,
        }
    }

    pub fn is_supported(self) -> bool {
        self != FileType::Unknown
    }
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        let display = path.display().to_string();

        // pdf-extract is synchronous and can be slow on large scans.
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| IntakeError::PdfExtractionError {
                path: display.clone(),
                message: e.to_string(),
            })?
            .map_err(|e| IntakeError::PdfExtractionError {
                path: display,
                message: e.to_string(),
            })
    }
}

pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).await?;
        let doc = docx_rs::read_docx(&bytes).map_err(|e| IntakeError::DocxExtractionError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        // Body paragraphs only, one per line. Tables are not read.
        let mut paragraphs = Vec::new();
        for child in doc.document.children {
            if let docx_rs::DocumentChild::Paragraph(p) = child {
                let mut line = String::new();
                for child in p.children {
                    if let docx_rs::ParagraphChild::Run(run) = child {
                        for child in run.children {
                            if let docx_rs::RunChild::Text(t) = child {
                                line.push_str(&t.text);
                            }
                        }
                    }
                }
                paragraphs.push(line);
            }
        }

        Ok(paragraphs.join("\n"))
    }
}

/// Routes a document to the extractor for its extension.
#[derive(Debug, Clone, Default)]
pub struct DocumentReader;

impl TextExtractor for DocumentReader {
    async fn extract(&self, path: &Path) -> Result<String> {
        match FileType::from_path(path) {
            FileType::Pdf => {
                tracing::debug!("Extracting text from PDF: {}", path.display());
                PdfExtractor.extract(path).await
            }
            FileType::Docx => {
                tracing::debug!("Extracting text from DOCX: {}", path.display());
                DocxExtractor.extract(path).await
            }
            FileType::Unknown => {
                tracing::debug!("No text layer for {}, using empty text", path.display());
                Ok(String::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use tempfile::TempDir;

    #[test]
    fn test_file_type_is_case_insensitive() {
        assert_eq!(FileType::from_path(Path::new("cv.PDF")), FileType::Pdf);
        assert_eq!(FileType::from_path(Path::new("cv.Docx")), FileType::Docx);
        assert_eq!(FileType::from_path(Path::new("cv.doc")), FileType::Unknown);
        assert_eq!(FileType::from_path(Path::new("README")), FileType::Unknown);
        assert!(!FileType::Unknown.is_supported());
    }

    #[tokio::test]
    async fn test_docx_paragraphs_become_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("jane.docx");
        let file = std::fs::File::create(&path).unwrap();
        Docx::new()
            .add_paragraph(Paragraph::new().add_run(Run::new().add_text("Jane Doe")))
            .add_paragraph(
                Paragraph::new()
                    .add_run(Run::new().add_text("Skilled in "))
                    .add_run(Run::new().add_text("react, node")),
            )
            .build()
            .pack(file)
            .unwrap();

        let text = DocumentReader.extract(&path).await.unwrap();
        assert_eq!(text, "Jane Doe\nSkilled in react, node");
    }

    #[tokio::test]
    async fn test_corrupt_docx_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.docx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        let err = DocumentReader.extract(&path).await.unwrap_err();
        assert!(matches!(err, IntakeError::DocxExtractionError { .. }));
    }

    #[tokio::test]
    async fn test_corrupt_pdf_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"%PDF-1.4 truncated").unwrap();

        let err = DocumentReader.extract(&path).await.unwrap_err();
        assert!(matches!(err, IntakeError::PdfExtractionError { .. }));
    }

    #[tokio::test]
    async fn test_unknown_extension_yields_empty_text() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "Jane Doe").unwrap();

        assert_eq!(DocumentReader.extract(&path).await.unwrap(), "");
    }
}
