use std::path::Path;
use async_trait::async_trait;
use clap::crate_version;
use sled::{Db, IVec};
use tracing::{debug, info, instrument, warn};

use super::CatalogStore;
use crate::{CatalogError, Item, Result};

/// A [`CatalogStore`] kept in an embedded [`sled`] database.
///
/// Items are stored as JSON documents keyed by their name. Every write is flushed to disk
/// before it is acknowledged.
///
/// [`sled`]: https://docs.rs/sled/latest/sled/
#[derive(Debug, Clone)]
pub struct SledStore {
    db: Db,
}

impl SledStore {
    /// opens (or creates) a `SledStore` in the given `working_dir`. If the `working_dir` does
    /// not exist it will be created.
    #[instrument]
    pub fn open(working_dir: &Path) -> Result<SledStore> {
        info!("opening sled catalog engine version {}", crate_version!());
        let db = sled::open(working_dir)?;
        debug!(recovered = db.was_recovered(), items = db.len());
        Ok(SledStore { db })
    }

    /// wraps an already opened sled database
    pub fn new(db: Db) -> Self {
        SledStore { db }
    }
}

fn decode(value: &IVec) -> Result<Item> {
    Ok(serde_json::from_slice(value)?)
}

impl SledStore {
    /// runs `f` against the database on tokio's blocking pool, keeping sled's disk I/O off the
    /// async workers
    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(Db) -> Result<T> + Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || f(db)).await?
    }
}

#[async_trait]
impl CatalogStore for SledStore {
    async fn list(&self) -> Result<Vec<Item>> {
        self.blocking(|db| {
            let mut items = Vec::new();
            for entry in db.iter() {
                let (key, value) = entry?;
                match decode(&value) {
                    Ok(item) => items.push(item),
                    Err(e) => {
                        let key = String::from_utf8_lossy(&key);
                        warn!(%key, "Error decoding item: {}", e);
                    }
                }
            }
            Ok(items)
        })
        .await
    }

    async fn find(&self, name: &str) -> Result<Option<Item>> {
        let name = name.to_string();
        self.blocking(move |db| db.get(name.as_bytes())?.as_ref().map(decode).transpose())
            .await
    }

    async fn insert(&self, item: &Item) -> Result<()> {
        let name = item.name.clone();
        let value = serde_json::to_vec(item)?;
        self.blocking(move |db| {
            // only succeeds if the key is currently absent
            if db
                .compare_and_swap(name.as_bytes(), None as Option<&[u8]>, Some(value))?
                .is_err()
            {
                return Err(CatalogError::DuplicateKey(name));
            }
            db.flush()?;
            Ok(())
        })
        .await
    }

    async fn replace(&self, item: &Item) -> Result<u64> {
        let name = item.name.clone();
        let value = serde_json::to_vec(item)?;
        self.blocking(move |db| {
            let previous =
                db.fetch_and_update(name.as_bytes(), |old| old.map(|_| value.clone()))?;
            match previous {
                Some(_) => {
                    db.flush()?;
                    Ok(1)
                }
                None => Ok(0),
            }
        })
        .await
    }

    async fn delete(&self, name: &str) -> Result<u64> {
        let name = name.to_string();
        self.blocking(move |db| match db.remove(name.as_bytes())? {
            Some(_) => {
                db.flush()?;
                Ok(1)
            }
            None => Ok(0),
        })
        .await
    }
}
