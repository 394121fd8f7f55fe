//! Storage abstractions for the date document.
//!
//! Handlers only see `DateStorage`; the file-backed store is used in
//! production and the in-memory store in tests.

use async_trait::async_trait;

use crate::errors::ServiceError;
use crate::model::StoreDocument;

pub mod json_file_store;
pub mod memory_store;

pub use json_file_store::JsonFileStore;
pub use memory_store::MemoryStore;

/// Whole-document persistence. Every call reads or replaces the full document.
#[async_trait]
pub trait DateStorage: Send + Sync {
    async fn read(&self) -> Result<StoreDocument, ServiceError>;
    async fn write(&self, doc: &StoreDocument) -> Result<(), ServiceError>;
}
