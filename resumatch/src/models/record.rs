use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The persisted outcome of analyzing one uploaded resume.
///
/// Created exactly once by the ingestion pipeline after every preceding stage
/// has succeeded, and never mutated afterward. Readers only ever see complete
/// records filtered by `owner_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: String,
    /// Identity-claim subject of the uploader. Immutable.
    pub owner_id: String,
    pub candidate_name: String,
    pub original_filename: String,
    pub profession_summary: String,
    /// Reported by the analysis service, trusted as-is.
    pub placement_probability: f64,
    /// Derived by direct cast from `placement_probability`.
    pub match_percentage: i64,
    pub content_rating: i64,
    pub verdict: String,
    /// Logical reference into the object store, not a filesystem path.
    pub file_path: String,
    /// Full raw analysis response, kept opaque so the analyzer's schema can
    /// evolve without a record migration.
    pub analysis_payload: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl AnalysisRecord {
    pub fn new(id: String, owner_id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            owner_id,
            candidate_name: String::new(),
            original_filename: String::new(),
            profession_summary: String::new(),
            placement_probability: 0.0,
            match_percentage: 0,
            content_rating: 0,
            verdict: String::new(),
            file_path: String::new(),
            analysis_payload: serde_json::Value::Null,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}
