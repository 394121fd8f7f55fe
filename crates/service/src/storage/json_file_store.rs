use std::{ffi::OsString, path::PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use super::DateStorage;
use crate::errors::ServiceError;
use crate::model::StoreDocument;

/// JSON file-backed document store.
///
/// The file is read in full on every `read` and replaced in full on every
/// `write`; nothing is cached between calls. Writes go to a sibling `.tmp`
/// file first and are renamed into place.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    file_path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.file_path
    }

    /// Write an empty document if the file is missing. The parent directory
    /// must already exist. Returns whether a new file was written.
    pub async fn create_if_missing(&self) -> Result<bool, ServiceError> {
        let exists = fs::try_exists(&self.file_path)
            .await
            .map_err(|e| ServiceError::storage("stat data file", e))?;
        if exists {
            return Ok(false);
        }
        self.write(&StoreDocument::default()).await?;
        info!(file = %self.file_path.display(), "seeded empty data file");
        Ok(true)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .file_path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| OsString::from("data.json"));
        name.push(".tmp");
        self.file_path.with_file_name(name)
    }
}

#[async_trait]
impl DateStorage for JsonFileStore {
    async fn read(&self) -> Result<StoreDocument, ServiceError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::storage("read data file", e))?;
        serde_json::from_slice(&bytes).map_err(|e| ServiceError::storage("parse data file", e))
    }

    async fn write(&self, doc: &StoreDocument) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(doc).map_err(|e| ServiceError::storage("serialize document", e))?;
        let tmp = self.tmp_path();
        fs::write(&tmp, data)
            .await
            .map_err(|e| ServiceError::storage("write data file", e))?;
        fs::rename(&tmp, &self.file_path)
            .await
            .map_err(|e| ServiceError::storage("replace data file", e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file() -> PathBuf {
        let dir = std::env::temp_dir().join(format!("date_store_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir.join("data.json")
    }

    #[tokio::test]
    async fn seeds_then_round_trips_document() -> Result<(), anyhow::Error> {
        let path = temp_file();
        let store = JsonFileStore::new(&path);

        assert!(store.create_if_missing().await?);
        assert!(!store.create_if_missing().await?);
        assert_eq!(store.read().await?, StoreDocument::default());

        let doc = StoreDocument {
            available_dates: vec!["2024-01-01".into()],
            occupied_dates: vec!["2024-02-01".into(), "2024-02-02".into()],
        };
        store.write(&doc).await?;

        // a fresh handle sees the same file contents
        assert_eq!(JsonFileStore::new(&path).read().await?, doc);
        assert!(!fs::try_exists(store.tmp_path()).await?);

        let _ = fs::remove_dir_all(path.parent().expect("parent")).await;
        Ok(())
    }

    #[tokio::test]
    async fn writes_two_space_pretty_json() -> Result<(), anyhow::Error> {
        let path = temp_file();
        let store = JsonFileStore::new(&path);
        store.create_if_missing().await?;
        store
            .write(&StoreDocument { available_dates: vec!["2024-03-03".into()], occupied_dates: vec![] })
            .await?;

        let text = fs::read_to_string(&path).await?;
        assert_eq!(text, "{\n  \"availableDates\": [\n    \"2024-03-03\"\n  ],\n  \"occupiedDates\": []\n}");

        let _ = fs::remove_dir_all(path.parent().expect("parent")).await;
        Ok(())
    }

    #[tokio::test]
    async fn missing_or_malformed_file_is_storage_error() -> Result<(), anyhow::Error> {
        let path = temp_file();
        let store = JsonFileStore::new(&path);
        assert!(matches!(store.read().await, Err(ServiceError::Storage(_))));

        store.create_if_missing().await?;
        fs::write(&path, b"{ not json").await?;
        assert!(matches!(store.read().await, Err(ServiceError::Storage(_))));

        let _ = fs::remove_dir_all(path.parent().expect("parent")).await;
        Ok(())
    }
}
