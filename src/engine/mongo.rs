use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{self, doc, Document};
use mongodb::error::{ErrorKind as MongoErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, IndexModel};
use tracing::{debug, info, instrument, warn};

use super::CatalogStore;
use crate::{CatalogError, Item, Result};

/// the server error code MongoDB reports for a unique index violation
const DUPLICATE_KEY_CODE: i32 = 11000;

/// default connection string of the MongoDB deployment
pub const DEFAULT_MONGO_URI: &str = "mongodb://localhost:27017";
/// default database holding the item collection
pub const DEFAULT_DATABASE: &str = "testdb";
/// default name of the item collection
pub const DEFAULT_COLLECTION: &str = "items";

/// Where the MongoDB backed catalog lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    /// a `mongodb://` connection string
    pub uri: String,
    /// name of the database holding the collection
    pub database: String,
    /// name of the item collection
    pub collection: String,
}

impl Default for MongoConfig {
    fn default() -> Self {
        MongoConfig {
            uri: DEFAULT_MONGO_URI.to_string(),
            database: DEFAULT_DATABASE.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
        }
    }
}

/// A [`CatalogStore`] backed by a MongoDB collection.
///
/// The driver's [`Collection`] handle is internally reference counted and pools its
/// connections, so clones of a `MongoStore` are cheap and share one connection pool.
#[derive(Debug, Clone)]
pub struct MongoStore {
    collection: Collection<Item>,
}

impl MongoStore {
    /// connects to the MongoDB deployment described by `config`.
    ///
    /// The deployment is pinged before this returns, and a unique index on `name` is
    /// created if it does not already exist.
    ///
    /// # Errors
    /// returns [`CatalogError::Mongo`] if the deployment can't be reached or the index can't
    /// be created
    #[instrument(skip_all, fields(database = %config.database, collection = %config.collection))]
    pub async fn connect(config: &MongoConfig) -> Result<MongoStore> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        let client = Client::with_options(options)?;

        let db = client.database(&config.database);
        db.run_command(doc! { "ping": 1 }).await?;
        info!("Connected to MongoDB!");

        let store = MongoStore::new(db.collection(&config.collection));
        store.ensure_name_index().await?;
        Ok(store)
    }

    /// wraps an existing collection handle
    pub fn new(collection: Collection<Item>) -> Self {
        MongoStore { collection }
    }

    async fn ensure_name_index(&self) -> Result<()> {
        let index = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let created = self.collection.create_index(index).await?;
        debug!(index = %created.index_name, "unique name index in place");
        Ok(())
    }
}

/// true if `err` is a unique index violation
fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        MongoErrorKind::Write(WriteFailure::WriteError(write_error))
            if write_error.code == DUPLICATE_KEY_CODE
    )
}

/// converts a raw document into an [`Item`], logging and discarding documents of another shape
fn decode(document: Document) -> Option<Item> {
    match bson::from_document(document) {
        Ok(item) => Some(item),
        Err(e) => {
            warn!("Error decoding item: {}", e);
            None
        }
    }
}

#[async_trait]
impl CatalogStore for MongoStore {
    async fn list(&self) -> Result<Vec<Item>> {
        // raw documents, so that one malformed record doesn't fail the whole listing
        let mut cursor = self
            .collection
            .clone_with_type::<Document>()
            .find(doc! {})
            .await?;
        let mut items = Vec::new();
        while let Some(document) = cursor.try_next().await? {
            items.extend(decode(document));
        }
        debug!(count = items.len(), "listed items");
        Ok(items)
    }

    async fn find(&self, name: &str) -> Result<Option<Item>> {
        Ok(self.collection.find_one(doc! { "name": name }).await?)
    }

    async fn insert(&self, item: &Item) -> Result<()> {
        match self.collection.insert_one(item).await {
            Ok(result) => {
                debug!(id = %result.inserted_id, name = %item.name, "inserted item");
                Ok(())
            }
            Err(e) if is_duplicate_key(&e) => Err(CatalogError::DuplicateKey(item.name.clone())),
            Err(e) => Err(e.into()),
        }
    }

    async fn replace(&self, item: &Item) -> Result<u64> {
        let result = self
            .collection
            .replace_one(doc! { "name": item.name.as_str() }, item)
            .await?;
        debug!(matched = result.matched_count, modified = result.modified_count, "replaced item");
        Ok(result.matched_count)
    }

    async fn delete(&self, name: &str) -> Result<u64> {
        let result = self.collection.delete_one(doc! { "name": name }).await?;
        Ok(result.deleted_count)
    }
}
