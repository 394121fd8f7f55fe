use async_trait::async_trait;
use tokio::sync::RwLock;

use super::DateStorage;
use crate::errors::ServiceError;
use crate::model::StoreDocument;

/// Process-local store. Useful for tests and for running without a data file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    doc: RwLock<StoreDocument>,
}

impl MemoryStore {
    pub fn new(doc: StoreDocument) -> Self {
        Self { doc: RwLock::new(doc) }
    }
}

#[async_trait]
impl DateStorage for MemoryStore {
    async fn read(&self) -> Result<StoreDocument, ServiceError> {
        Ok(self.doc.read().await.clone())
    }

    async fn write(&self, doc: &StoreDocument) -> Result<(), ServiceError> {
        *self.doc.write().await = doc.clone();
        Ok(())
    }
}
