pub mod memory;
pub mod pg;

use async_trait::async_trait;

use crate::models::Record;

pub use memory::MemoryStore;
pub use pg::PgStore;

#[derive(Debug)]
pub struct StoreError {
    pub message: String,
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<String> for StoreError {
    fn from(s: String) -> Self {
        StoreError { message: s }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError {
            message: err.to_string(),
        }
    }
}

/// Append-only persistence boundary. Records are never updated or
/// deleted once inserted.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn insert(&self, record: &Record) -> Result<(), StoreError>;
}
