use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::CacheStore;
use crate::errors::StoreResult;
use crate::models::{CacheEntry, ContentHash, Label};

/// In-process cache store; contents do not survive a restart
#[derive(Clone, Default)]
pub struct MemoryCacheStore {
    entries: Arc<RwLock<HashMap<ContentHash, CacheEntry>>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &ContentHash) -> StoreResult<Option<CacheEntry>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put(&self, key: &ContentHash, labels: &[Label]) -> StoreResult<()> {
        let mut entries = self.entries.write().await;
        entries.entry(key.clone()).or_insert_with(|| CacheEntry {
            key: key.clone(),
            labels: labels.to_vec(),
            created: Utc::now(),
        });
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
