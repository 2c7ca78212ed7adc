//! This module provides the storage engines the catalog can run on.
//! The default engine is [`MongoStore`], a thin wrapper over a MongoDB collection. The
//! [`SledStore`] engine keeps items in an embedded [`sled`] database on the local disk, and
//! [`MemoryStore`] keeps them in a concurrent in-process map (handy for tests and demos).
//!
//! [`sled`]: https://docs.rs/sled/latest/sled/
use async_trait::async_trait;
use crate::{Item, Result};

/// A trait for the basic CRUD functionality of a catalog storage engine.
///
/// Implementors are cheap handles onto a shared store: cloning one must not copy the data,
/// and every clone must be usable concurrently from many request handlers.
#[async_trait]
pub trait CatalogStore: Clone + Send + Sync + 'static {
    /// returns every item in the store, in no particular order
    async fn list(&self) -> Result<Vec<Item>>;

    /// Gets the item with the given `name`
    ///
    /// Returns `None` if no such item exists.
    async fn find(&self, name: &str) -> Result<Option<Item>>;

    /// inserts a new `item`
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateKey` (or a driver error) if an item with the same name
    /// is already stored.
    async fn insert(&self, item: &Item) -> Result<()>;

    /// replaces the stored item having the same name as `item`
    ///
    /// Returns the number of records that matched, `0` if there was no such item.
    async fn replace(&self, item: &Item) -> Result<u64>;

    /// Removes the item with the given `name` from the store
    ///
    /// Returns the number of records removed, `0` if there was no such item.
    async fn delete(&self, name: &str) -> Result<u64>;
}

mod memory;
mod mongo;
mod sled_engine;

pub use self::memory::MemoryStore;
pub use self::mongo::{
    MongoConfig, MongoStore, DEFAULT_COLLECTION, DEFAULT_DATABASE, DEFAULT_MONGO_URI,
};
pub use self::sled_engine::SledStore;
