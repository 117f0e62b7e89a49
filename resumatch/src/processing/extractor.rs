use async_trait::async_trait;
use std::path::Path;
use tokio::process::Command;

use crate::error::{AppError, Result};

/// Extracts plain text from a staged document file.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String>;
}

/// Shells out to `pdftotext` (Poppler). `-layout` preserves the physical
/// layout, which matters for resume formatting.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let output = Command::new("pdftotext")
            .arg("-layout")
            .arg(path)
            .arg("-")
            .output()
            .await
            .map_err(|e| AppError::Extraction(format!("failed to run pdftotext: {e}")))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(AppError::Extraction(format!(
                "pdftotext exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
