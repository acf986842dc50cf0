//! PostgreSQL implementation of RecordStore.
//!
//! Each record is one row in `comment_analyses`, with the flat item in a
//! JSONB column. Scans page by `comment_id` (keyset pagination), so a scan
//! never holds a transaction open across pages.

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;
use sqlx::{PgPool, Row};

use crate::domain::feedback::{AnalysisRecord, StoredItem};
use crate::ports::{RecordStore, RecordStoreError, ScanCursor, ScanPage};

/// PostgreSQL implementation of RecordStore.
#[derive(Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
    page_size: i64,
}

impl PostgresRecordStore {
    /// Creates a new PostgresRecordStore.
    pub fn new(pool: PgPool, page_size: u32) -> Self {
        Self {
            pool,
            page_size: i64::from(page_size.max(1)),
        }
    }

    /// Opens a connection pool to `url`.
    pub async fn connect(url: &str, max_connections: u32) -> Result<PgPool, sqlx::Error> {
        PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
    }

    /// Applies the bundled migrations.
    pub async fn migrate(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(pool).await
    }
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn put(&self, record: &AnalysisRecord) -> Result<(), RecordStoreError> {
        sqlx::query(
            r#"
            INSERT INTO comment_analyses (comment_id, item)
            VALUES ($1, $2)
            "#,
        )
        .bind(record.comment_id().as_str())
        .bind(Json(record.to_item()))
        .execute(&self.pool)
        .await
        .map_err(|e| RecordStoreError::Write {
            comment_id: record.comment_id().to_string(),
            message: format!("Failed to insert record: {}", e),
        })?;

        Ok(())
    }

    async fn scan_page(&self, cursor: Option<ScanCursor>) -> Result<ScanPage, RecordStoreError> {
        let after = cursor.as_ref().map(ScanCursor::as_str);

        let rows = sqlx::query(
            r#"
            SELECT comment_id, item
            FROM comment_analyses
            WHERE $1::TEXT IS NULL OR comment_id > $1
            ORDER BY comment_id
            LIMIT $2
            "#,
        )
        .bind(after)
        .bind(self.page_size)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RecordStoreError::Scan(format!("Failed to scan records: {}", e)))?;

        let mut items = Vec::with_capacity(rows.len());
        let mut last_id = None;
        for row in rows {
            let comment_id: String = row
                .try_get("comment_id")
                .map_err(|e| RecordStoreError::Scan(e.to_string()))?;
            let Json(item): Json<StoredItem> = row
                .try_get("item")
                .map_err(|e| RecordStoreError::Scan(e.to_string()))?;
            items.push(item);
            last_id = Some(comment_id);
        }

        // A full page may be followed by more rows; the next call finds out.
        let next_cursor = if items.len() as i64 == self.page_size {
            last_id.map(ScanCursor::new)
        } else {
            None
        };

        Ok(ScanPage { items, next_cursor })
    }
}
