use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::models::Record;

use super::{DocumentStore, StoreError};

/// In-memory document store. Used by the integration tests; clones
/// share the same underlying collection.
#[derive(Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Vec<Record>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<Record> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A poisoned lock still guards a valid list, so recover it.
    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, record: &Record) -> Result<(), StoreError> {
        self.lock().push(record.clone());
        Ok(())
    }
}
