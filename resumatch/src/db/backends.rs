use async_trait::async_trait;

use crate::error::Result;
use crate::models::AnalysisRecord;

use super::connection::Database;
use super::repository::AnalysisRepository;
use super::traits::RecordStore;

/// libsql-backed implementation of [`RecordStore`].
pub struct LibSqlRecordStore {
    db: Database,
}

impl LibSqlRecordStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RecordStore for LibSqlRecordStore {
    async fn create_record(&self, record: &AnalysisRecord) -> Result<()> {
        let conn = self.db.connect()?;
        AnalysisRepository::create(&conn, record).await
    }

    async fn recent_records_for_owner(
        &self,
        owner_id: &str,
        limit: u32,
    ) -> Result<Vec<AnalysisRecord>> {
        let conn = self.db.connect()?;
        AnalysisRepository::recent_for_owner(&conn, owner_id, limit).await
    }
}
