use libsql::Connection;

use crate::error::Result;

pub async fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS analyses (
            id TEXT PRIMARY KEY,
            owner_id TEXT NOT NULL,
            candidate_name TEXT NOT NULL DEFAULT '',
            original_filename TEXT NOT NULL DEFAULT '',
            profession_summary TEXT NOT NULL DEFAULT '',
            placement_probability REAL NOT NULL DEFAULT 0,
            match_percentage INTEGER NOT NULL DEFAULT 0,
            content_rating INTEGER NOT NULL DEFAULT 0,
            verdict TEXT NOT NULL DEFAULT '',
            file_path TEXT NOT NULL DEFAULT '',
            analysis_payload TEXT NOT NULL DEFAULT 'null',
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL,
            deleted_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_analyses_owner_id ON analyses(owner_id);
        CREATE INDEX IF NOT EXISTS idx_analyses_created_at ON analyses(created_at);
        "#,
    )
    .await?;

    Ok(())
}
