use axum::body::Bytes;
use nanoid::nanoid;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempPath;

use crate::analyzer::{AnalysisPayload, AnalyzerClient};
use crate::auth::AuthUser;
use crate::config::IngestConfig;
use crate::db::RecordStore;
use crate::error::{AppError, Result};
use crate::models::AnalysisRecord;
use crate::storage::ObjectStore;

use super::TextExtractor;

/// Candidate names the analysis service reports when it cannot infer an
/// identity from the resume text.
const NAME_SENTINELS: &[&str] = &["Unknown", "Unknown Candidate"];

/// One uploaded document, as received from the multipart form.
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Debug)]
pub struct IngestOutcome {
    pub record: AnalysisRecord,
    /// The raw analysis payload, echoed back to the uploader.
    pub payload: serde_json::Value,
}

/// Turns one uploaded document into a persisted [`AnalysisRecord`].
///
/// Stages run sequentially on the request's own task and short-circuit on
/// the first failure. The staged temp file is removed on every exit path;
/// the object-store upload is never rolled back.
pub struct IngestionPipeline {
    records: Arc<dyn RecordStore>,
    objects: Arc<dyn ObjectStore>,
    extractor: Arc<dyn TextExtractor>,
    analyzer: AnalyzerClient,
    staging_dir: PathBuf,
}

impl IngestionPipeline {
    pub fn new(
        records: Arc<dyn RecordStore>,
        objects: Arc<dyn ObjectStore>,
        extractor: Arc<dyn TextExtractor>,
        analyzer: AnalyzerClient,
        config: &IngestConfig,
    ) -> Self {
        Self {
            records,
            objects,
            extractor,
            analyzer,
            staging_dir: PathBuf::from(&config.staging_dir),
        }
    }

    pub async fn ingest(&self, owner: &AuthUser, upload: UploadedFile) -> Result<IngestOutcome> {
        // Dropping the TempPath removes the staged file, so cleanup holds on
        // every return below.
        let staged = self.stage(&upload).await?;

        let extracted = self.extractor.extract(&staged).await?;

        self.objects
            .put(&upload.filename, &staged, &upload.content_type)
            .await?;

        // Validated only after the durable upload: a rejected document still
        // leaves a copy in the object store. Current behavior, covered by a
        // regression test.
        if extracted.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "could not extract text from the document; it may be a non-text or image-only file"
                    .to_string(),
            ));
        }

        let (report, raw) = match self.analyzer.analyze(&extracted).await? {
            AnalysisPayload::Parsed { report, raw } => (report, raw),
            AnalysisPayload::Malformed(_) => {
                return Err(AppError::Internal(
                    "analysis service returned an unexpected payload shape".to_string(),
                ));
            }
        };

        let mut record = AnalysisRecord::new(nanoid!(), owner.subject.clone());
        record.candidate_name =
            resolve_candidate_name(report.ai_analysis.candidate_name.as_deref(), &upload.filename);
        record.original_filename = upload.filename.clone();
        record.profession_summary = report.summary.unwrap_or_default();
        let probability = report.placement_probability.unwrap_or(0.0);
        record.placement_probability = probability;
        record.match_percentage = probability as i64;
        record.content_rating = report.ai_analysis.content_rating.unwrap_or(0);
        record.verdict = report.ai_analysis.verdict.unwrap_or_default();
        record.file_path = format!("/uploads/{}", upload.filename);
        record.analysis_payload = raw.clone();

        if let Err(e) = self.records.create_record(&record).await {
            // The upload above is not compensated; an orphaned blob remains.
            tracing::warn!(
                key = %upload.filename,
                error = %e,
                "record persistence failed after object upload"
            );
            return Err(e);
        }

        if let Err(e) = staged.close() {
            tracing::warn!(error = %e, "failed to remove staged upload");
        }

        Ok(IngestOutcome {
            record,
            payload: raw,
        })
    }

    async fn stage(&self, upload: &UploadedFile) -> Result<TempPath> {
        tokio::fs::create_dir_all(&self.staging_dir).await?;

        let mut file = tempfile::Builder::new()
            .prefix("resume-")
            .tempfile_in(&self.staging_dir)?;
        file.write_all(&upload.bytes)?;
        file.flush()?;

        Ok(file.into_temp_path())
    }
}

fn resolve_candidate_name(reported: Option<&str>, filename: &str) -> String {
    if let Some(name) = reported {
        let trimmed = name.trim();
        if !trimmed.is_empty() && !NAME_SENTINELS.contains(&trimmed) {
            return trimmed.to_string();
        }
    }

    Path::new(filename)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| filename.to_string())
}
