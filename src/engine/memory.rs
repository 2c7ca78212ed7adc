use std::sync::Arc;
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tracing::debug;

use super::CatalogStore;
use crate::{CatalogError, Item, Result};

/// An in-process [`CatalogStore`] backed by a concurrent [`DashMap`].
///
/// Nothing is persisted; all clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    items: Arc<DashMap<String, Item>>,
}

impl MemoryStore {
    /// creates an empty `MemoryStore`
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Item>> {
        Ok(self.items.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn find(&self, name: &str) -> Result<Option<Item>> {
        Ok(self.items.get(name).map(|entry| entry.value().clone()))
    }

    async fn insert(&self, item: &Item) -> Result<()> {
        match self.items.entry(item.name.clone()) {
            Entry::Occupied(_) => Err(CatalogError::DuplicateKey(item.name.clone())),
            Entry::Vacant(slot) => {
                slot.insert(item.clone());
                debug!(name = %item.name, "inserted item");
                Ok(())
            }
        }
    }

    async fn replace(&self, item: &Item) -> Result<u64> {
        match self.items.get_mut(&item.name) {
            Some(mut existing) => {
                *existing = item.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, name: &str) -> Result<u64> {
        Ok(self.items.remove(name).map_or(0, |_| 1))
    }
}
