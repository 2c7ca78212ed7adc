use tracing::debug;
use crate::engine::CatalogStore;
use crate::{CatalogError, Item, ItemQuery, Result};

/// The five catalog operations, over any [`CatalogStore`].
///
/// Every operation validates its input before touching the store, so a request that fails
/// validation never reaches the engine.
#[derive(Debug, Clone)]
pub struct Catalog<S: CatalogStore> {
    store: S,
}

impl<S: CatalogStore> Catalog<S> {
    /// Create a new `Catalog` that keeps its items in the given `store`
    pub fn new(store: S) -> Self {
        Catalog { store }
    }

    /// returns every item in the catalog, in no particular order
    pub async fn list(&self) -> Result<Vec<Item>> {
        self.store.list().await
    }

    /// looks up the item named by the `item` parameter
    ///
    /// # Errors
    /// [`CatalogError::ItemNotFound`] if there is no such item
    pub async fn price(&self, query: &ItemQuery) -> Result<Item> {
        let name = query.name()?;
        self.store
            .find(name)
            .await?
            .ok_or_else(|| CatalogError::ItemNotFound(name.to_string()))
    }

    /// inserts a new item built from the `item` and `price` parameters and returns it
    ///
    /// Duplicate names are not checked for here; rejecting them is up to the store.
    pub async fn create(&self, query: &ItemQuery) -> Result<Item> {
        let item = Item::new(query.name()?, query.price()?);
        self.store.insert(&item).await?;
        debug!(name = %item.name, price = item.price, "created item");
        Ok(item)
    }

    /// replaces the price of an existing item and returns the updated item
    ///
    /// # Errors
    /// [`CatalogError::ItemNotFound`] if no stored item matched
    pub async fn update(&self, query: &ItemQuery) -> Result<Item> {
        let item = Item::new(query.name()?, query.price()?);
        match self.store.replace(&item).await? {
            0 => Err(CatalogError::ItemNotFound(item.name)),
            _ => Ok(item),
        }
    }

    /// removes the named item and returns its name
    ///
    /// # Errors
    /// [`CatalogError::ItemNotFound`] if nothing was removed
    pub async fn delete(&self, query: &ItemQuery) -> Result<String> {
        let name = query.name()?;
        match self.store.delete(name).await? {
            0 => Err(CatalogError::ItemNotFound(name.to_string())),
            _ => Ok(name.to_string()),
        }
    }
}
