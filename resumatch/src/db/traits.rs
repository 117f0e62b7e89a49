use async_trait::async_trait;

use crate::error::Result;
use crate::models::AnalysisRecord;

/// Persistence operations for analysis records.
///
/// Records are write-once: there is deliberately no update operation, and
/// deletion is soft (readers filter it out).
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn create_record(&self, record: &AnalysisRecord) -> Result<()>;

    /// Most recent non-deleted records for one owner, newest first.
    async fn recent_records_for_owner(
        &self,
        owner_id: &str,
        limit: u32,
    ) -> Result<Vec<AnalysisRecord>>;
}
