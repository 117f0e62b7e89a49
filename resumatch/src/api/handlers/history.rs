use axum::extract::State;
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::AppState;
use crate::auth::AuthUser;
use crate::error::Result;
use crate::models::AnalysisRecord;

/// Fixed history window; there is no pagination beyond it.
const HISTORY_LIMIT: u32 = 50;

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub data: Vec<AnalysisRecord>,
}

/// `GET /history` — the caller's 50 most recent analyses, newest first.
pub async fn get_history(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<HistoryResponse>> {
    let data = state
        .records
        .recent_records_for_owner(&user.subject, HISTORY_LIMIT)
        .await?;

    Ok(Json(HistoryResponse { data }))
}
