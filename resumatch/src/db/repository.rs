use chrono::{DateTime, Utc};
use libsql::{params, Connection};

use crate::error::Result;
use crate::models::AnalysisRecord;

pub struct AnalysisRepository;

impl AnalysisRepository {
    pub async fn create(conn: &Connection, record: &AnalysisRecord) -> Result<()> {
        conn.execute(
            r#"
            INSERT INTO analyses (
                id, owner_id, candidate_name, original_filename, profession_summary,
                placement_probability, match_percentage, content_rating, verdict,
                file_path, analysis_payload, created_at, updated_at, deleted_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14
            )
            "#,
            params![
                record.id.clone(),
                record.owner_id.clone(),
                record.candidate_name.clone(),
                record.original_filename.clone(),
                record.profession_summary.clone(),
                record.placement_probability,
                record.match_percentage,
                record.content_rating,
                record.verdict.clone(),
                record.file_path.clone(),
                serde_json::to_string(&record.analysis_payload)?,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
                record.deleted_at.map(|dt| dt.to_rfc3339()),
            ],
        )
        .await?;

        Ok(())
    }

    pub async fn recent_for_owner(
        conn: &Connection,
        owner_id: &str,
        limit: u32,
    ) -> Result<Vec<AnalysisRecord>> {
        let mut rows = conn
            .query(
                r#"
                SELECT id, owner_id, candidate_name, original_filename, profession_summary,
                       placement_probability, match_percentage, content_rating, verdict,
                       file_path, analysis_payload, created_at, updated_at, deleted_at
                FROM analyses
                WHERE owner_id = ?1 AND deleted_at IS NULL
                ORDER BY created_at DESC
                LIMIT ?2
                "#,
                params![owner_id, limit as i64],
            )
            .await?;

        let mut records = Vec::new();
        while let Some(row) = rows.next().await? {
            records.push(Self::row_to_record(&row)?);
        }
        Ok(records)
    }

    fn row_to_record(row: &libsql::Row) -> Result<AnalysisRecord> {
        Ok(AnalysisRecord {
            id: row.get(0)?,
            owner_id: row.get(1)?,
            candidate_name: row.get(2)?,
            original_filename: row.get(3)?,
            profession_summary: row.get(4)?,
            placement_probability: row.get(5)?,
            match_percentage: row.get(6)?,
            content_rating: row.get(7)?,
            verdict: row.get(8)?,
            file_path: row.get(9)?,
            analysis_payload: serde_json::from_str(&row.get::<String>(10)?)
                .unwrap_or(serde_json::Value::Null),
            created_at: parse_timestamp(&row.get::<String>(11)?),
            updated_at: parse_timestamp(&row.get::<String>(12)?),
            deleted_at: row
                .get::<Option<String>>(13)?
                .map(|raw| parse_timestamp(&raw)),
        })
    }
}

fn parse_timestamp(raw: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::schema;
    use pretty_assertions::assert_eq;

    async fn setup_test_db() -> Connection {
        let conn = libsql::Builder::new_local(":memory:")
            .build()
            .await
            .unwrap()
            .connect()
            .unwrap();
        schema::init_schema(&conn).await.unwrap();
        conn
    }

    fn sample_record(id: &str, owner: &str) -> AnalysisRecord {
        let mut record = AnalysisRecord::new(id.to_string(), owner.to_string());
        record.candidate_name = "Jane Doe".to_string();
        record.original_filename = "jane.pdf".to_string();
        record.profession_summary = "Senior backend engineer".to_string();
        record.placement_probability = 87.0;
        record.match_percentage = 87;
        record.content_rating = 91;
        record.verdict = "Highly Recommended".to_string();
        record.file_path = "/uploads/jane.pdf".to_string();
        record.analysis_payload = serde_json::json!({"summary": "Senior backend engineer"});
        record
    }

    #[tokio::test]
    async fn test_create_and_fetch_roundtrip() {
        let conn = setup_test_db().await;
        let record = sample_record("rec-1", "user-1");
        AnalysisRepository::create(&conn, &record).await.unwrap();

        let fetched = AnalysisRepository::recent_for_owner(&conn, "user-1", 50)
            .await
            .unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].candidate_name, "Jane Doe");
        assert_eq!(fetched[0].match_percentage, 87);
        assert_eq!(
            fetched[0].analysis_payload["summary"],
            "Senior backend engineer"
        );
        assert!(fetched[0].deleted_at.is_none());
    }

    #[tokio::test]
    async fn test_recent_for_owner_scopes_by_owner() {
        let conn = setup_test_db().await;
        AnalysisRepository::create(&conn, &sample_record("rec-1", "user-1"))
            .await
            .unwrap();
        AnalysisRepository::create(&conn, &sample_record("rec-2", "user-2"))
            .await
            .unwrap();

        let fetched = AnalysisRepository::recent_for_owner(&conn, "user-1", 50)
            .await
            .unwrap();
        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].owner_id, "user-1");
    }

    #[tokio::test]
    async fn test_recent_for_owner_orders_newest_first_and_limits() {
        let conn = setup_test_db().await;
        for i in 0..5 {
            let mut record = sample_record(&format!("rec-{i}"), "user-1");
            record.created_at = Utc::now() + chrono::Duration::seconds(i);
            AnalysisRepository::create(&conn, &record).await.unwrap();
        }

        let fetched = AnalysisRepository::recent_for_owner(&conn, "user-1", 3)
            .await
            .unwrap();
        assert_eq!(fetched.len(), 3);
        assert_eq!(fetched[0].id, "rec-4");
        assert_eq!(fetched[2].id, "rec-2");
    }

    #[tokio::test]
    async fn test_soft_deleted_records_are_hidden() {
        let conn = setup_test_db().await;
        let mut record = sample_record("rec-1", "user-1");
        record.deleted_at = Some(Utc::now());
        AnalysisRepository::create(&conn, &record).await.unwrap();

        let fetched = AnalysisRepository::recent_for_owner(&conn, "user-1", 50)
            .await
            .unwrap();
        assert!(fetched.is_empty());
    }
}
