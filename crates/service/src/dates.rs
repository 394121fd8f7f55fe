use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::calendar;
use crate::errors::ServiceError;
use crate::model::{merge_unique, Collection, StoreDocument};
use crate::storage::DateStorage;

/// Date collection operations over a whole-document store.
///
/// Every mutation reads the full document, changes one collection and writes
/// the full document back. Mutations are serialized by `write_lock` so two
/// concurrent requests cannot overwrite each other's changes.
pub struct DateService {
    storage: Arc<dyn DateStorage>,
    write_lock: Mutex<()>,
}

impl DateService {
    pub fn new(storage: Arc<dyn DateStorage>) -> Self {
        Self { storage, write_lock: Mutex::new(()) }
    }

    pub async fn get_all(&self) -> Result<StoreDocument, ServiceError> {
        self.storage.read().await
    }

    /// Set the collection to exactly `dates`.
    pub async fn replace(&self, collection: Collection, dates: Vec<String>) -> Result<Vec<String>, ServiceError> {
        self.mutate(collection, |current| *current = dates).await
    }

    /// Union `dates` into the collection; returns the updated collection.
    pub async fn merge(&self, collection: Collection, dates: Vec<String>) -> Result<Vec<String>, ServiceError> {
        self.mutate(collection, |current| merge_unique(current, dates)).await
    }

    pub async fn clear(&self, collection: Collection) -> Result<(), ServiceError> {
        self.mutate(collection, |dates| dates.clear()).await.map(|_| ())
    }

    /// Expand `from..=to` into days and union them into the collection.
    /// Dates are validated before storage is touched.
    pub async fn add_range(&self, collection: Collection, from: &str, to: &str) -> Result<Vec<String>, ServiceError> {
        let days = calendar::expand_range(from, to)?;
        debug!(%collection, from, to, days = days.len(), "expanded date range");
        self.mutate(collection, |current| merge_unique(current, days)).await
    }

    async fn mutate<F>(&self, collection: Collection, f: F) -> Result<Vec<String>, ServiceError>
    where
        F: FnOnce(&mut Vec<String>),
    {
        let _guard = self.write_lock.lock().await;
        let mut doc = self.storage.read().await?;
        f(doc.dates_mut(collection));
        self.storage.write(&doc).await?;
        let dates = doc.dates(collection).to_vec();
        debug!(%collection, count = dates.len(), "collection written");
        Ok(dates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{JsonFileStore, MemoryStore};

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn service_with(doc: StoreDocument) -> DateService {
        DateService::new(Arc::new(MemoryStore::new(doc)))
    }

    #[tokio::test]
    async fn replace_is_idempotent() -> Result<(), anyhow::Error> {
        let svc = service_with(StoreDocument::default());
        let input = strings(&["2024-01-02", "2024-01-01"]);

        let first = svc.replace(Collection::Available, input.clone()).await?;
        let second = svc.replace(Collection::Available, input.clone()).await?;
        assert_eq!(first, input);
        assert_eq!(second, input);
        assert_eq!(svc.get_all().await?.available_dates, input);
        Ok(())
    }

    #[tokio::test]
    async fn replace_leaves_other_collection_alone() -> Result<(), anyhow::Error> {
        let svc = service_with(StoreDocument {
            available_dates: strings(&["2024-01-01"]),
            occupied_dates: strings(&["2024-06-01"]),
        });
        svc.replace(Collection::Occupied, strings(&["2024-07-01"])).await?;
        let doc = svc.get_all().await?;
        assert_eq!(doc.available_dates, strings(&["2024-01-01"]));
        assert_eq!(doc.occupied_dates, strings(&["2024-07-01"]));
        Ok(())
    }

    #[tokio::test]
    async fn merge_is_set_union() -> Result<(), anyhow::Error> {
        let svc = service_with(StoreDocument {
            available_dates: strings(&["2024-01-01", "2024-01-02"]),
            occupied_dates: vec![],
        });
        let merged = svc
            .merge(Collection::Available, strings(&["2024-01-02", "2024-01-03", "2024-01-03"]))
            .await?;
        assert_eq!(merged, strings(&["2024-01-01", "2024-01-02", "2024-01-03"]));
        assert_eq!(svc.get_all().await?.available_dates, merged);
        Ok(())
    }

    #[tokio::test]
    async fn clear_always_empties() -> Result<(), anyhow::Error> {
        let svc = service_with(StoreDocument {
            available_dates: vec![],
            occupied_dates: strings(&["2024-01-01", "2024-01-02"]),
        });
        svc.clear(Collection::Occupied).await?;
        svc.clear(Collection::Occupied).await?;
        assert!(svc.get_all().await?.occupied_dates.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn add_range_unions_generated_days() -> Result<(), anyhow::Error> {
        let svc = service_with(StoreDocument {
            available_dates: vec![],
            occupied_dates: strings(&["2024-01-31"]),
        });
        let dates = svc.add_range(Collection::Occupied, "2024-01-30", "2024-02-02").await?;
        assert_eq!(dates, strings(&["2024-01-31", "2024-01-30", "2024-02-01", "2024-02-02"]));
        Ok(())
    }

    #[tokio::test]
    async fn reversed_range_changes_nothing() -> Result<(), anyhow::Error> {
        let existing = strings(&["2024-03-05"]);
        let svc = service_with(StoreDocument { available_dates: existing.clone(), occupied_dates: vec![] });
        let dates = svc.add_range(Collection::Available, "2024-03-10", "2024-03-01").await?;
        assert_eq!(dates, existing);
        Ok(())
    }

    #[tokio::test]
    async fn bad_range_fails_before_storage() -> Result<(), anyhow::Error> {
        // pointing at a file that does not exist: a storage access would fail with Storage
        let missing = std::env::temp_dir().join(format!("missing_{}.json", uuid::Uuid::new_v4()));
        let svc = DateService::new(Arc::new(JsonFileStore::new(missing)));
        let err = svc
            .add_range(Collection::Available, "not-a-date", "2024-01-01")
            .await
            .expect_err("invalid date");
        assert!(err.is_validation());
        Ok(())
    }

    #[tokio::test]
    async fn storage_failures_surface() {
        let missing = std::env::temp_dir().join(format!("missing_{}.json", uuid::Uuid::new_v4()));
        let svc = DateService::new(Arc::new(JsonFileStore::new(missing)));
        assert!(matches!(svc.get_all().await, Err(ServiceError::Storage(_))));
        assert!(matches!(svc.clear(Collection::Available).await, Err(ServiceError::Storage(_))));
    }

    #[tokio::test]
    async fn concurrent_merges_lose_nothing() -> Result<(), anyhow::Error> {
        let dir = std::env::temp_dir().join(format!("date_svc_{}", uuid::Uuid::new_v4()));
        tokio::fs::create_dir_all(&dir).await?;
        let store = JsonFileStore::new(dir.join("data.json"));
        store.create_if_missing().await?;
        let svc = Arc::new(DateService::new(Arc::new(store)));

        let mut handles = Vec::new();
        for day in 1..=20 {
            let svc = Arc::clone(&svc);
            handles.push(tokio::spawn(async move {
                svc.merge(Collection::Available, vec![format!("2024-05-{day:02}")]).await
            }));
        }
        for h in handles {
            h.await??;
        }

        let mut stored = svc.get_all().await?.available_dates;
        stored.sort();
        let expected: Vec<String> = (1..=20).map(|d| format!("2024-05-{d:02}")).collect();
        assert_eq!(stored, expected);

        let _ = tokio::fs::remove_dir_all(&dir).await;
        Ok(())
    }
}
