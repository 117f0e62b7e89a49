use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::api::AppState;
use crate::error::Result;

/// `GET /uploads/{filename}` — stream the stored blob back verbatim.
///
/// Any authenticated identity can request any filename; ownership is not
/// checked here.
pub async fn get_resume(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response> {
    let download = state.objects.get(&filename).await?;

    let content_type = download
        .content_type
        .or_else(|| {
            mime_guess::from_path(&filename)
                .first_raw()
                .map(str::to_string)
        })
        .unwrap_or_else(|| "application/pdf".to_string());

    let headers = [
        (header::CONTENT_TYPE, content_type),
        (
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{filename}\""),
        ),
    ];

    Ok((headers, Body::from_stream(download.body)).into_response())
}
