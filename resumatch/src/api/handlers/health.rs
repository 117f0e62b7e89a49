use axum::Json;
use serde_json::{json, Value};

/// `GET /health` — always 200, no collaborator checks.
pub async fn health_check() -> Json<Value> {
    Json(json!({"status": "OK"}))
}
