use axum::extract::{Multipart, State};
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::AppState;
use crate::auth::AuthUser;
use crate::error::{AppError, Result};
use crate::processing::UploadedFile;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub data: serde_json::Value,
    pub id: String,
}

/// `POST /upload` — multipart form with a `resume` field.
///
/// Runs the full ingestion pipeline synchronously and returns the persisted
/// record's id together with the raw analysis payload.
pub async fn upload_resume(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut upload: Option<UploadedFile> = None;

    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("resume") {
            continue;
        }

        let filename = field.file_name().unwrap_or("resume.pdf").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/pdf")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::InvalidInput(format!("failed to read upload: {e}")))?;

        upload = Some(UploadedFile {
            filename,
            content_type,
            bytes,
        });
        break;
    }

    let upload = upload.ok_or_else(|| AppError::InvalidInput("no file uploaded".to_string()))?;

    let outcome = state.pipeline.ingest(&user, upload).await?;

    Ok(Json(UploadResponse {
        message: "Analysis Complete".to_string(),
        data: outcome.payload,
        id: outcome.record.id,
    }))
}
