use std::collections::HashMap;
use std::sync::Arc;

use fxgate_core::error::AppError;
use fxgate_core::models::CredentialRecord;
use fxgate_core::traits::CredentialStore;
use tokio::sync::RwLock;

/// Process-lifetime credential store.
///
/// Records vanish on restart. Clones share the same map. Concurrent writes
/// to the same username are last-writer-wins.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    records: Arc<RwLock<HashMap<String, CredentialRecord>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch a record by username.
    pub async fn get(&self, username: &str) -> Option<CredentialRecord> {
        self.records.read().await.get(username).cloned()
    }

    /// Insert or overwrite a record. Returns the record it replaced, if any.
    pub async fn put(&self, username: &str, record: CredentialRecord) -> Option<CredentialRecord> {
        let previous = self
            .records
            .write()
            .await
            .insert(username.to_string(), record);
        if previous.is_some() {
            tracing::debug!(username, "Overwrote existing credential record");
        }
        previous
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

// -- Trait implementation --

impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, username: &str) -> Result<Option<CredentialRecord>, AppError> {
        Ok(MemoryCredentialStore::get(self, username).await)
    }

    async fn put(&self, username: &str, record: CredentialRecord) -> Result<(), AppError> {
        MemoryCredentialStore::put(self, username, record).await;
        Ok(())
    }
}
