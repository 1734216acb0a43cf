use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::Record;

use super::{DocumentStore, StoreError};

/// Postgres-backed document store. Each record lands as one JSONB row
/// in the `records` table, tagged with the collection it belongs to.
pub struct PgStore {
    pool: PgPool,
    collection: String,
}

impl PgStore {
    pub fn new(pool: PgPool, collection: String) -> Self {
        Self { pool, collection }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert(&self, record: &Record) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO records (collection, doc) VALUES ($1, $2)")
            .bind(&self.collection)
            .bind(&record.doc)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
