#![deny(missing_docs)]
//! An item catalog served over HTTP, kept in a document store, plus a client for a movie-info
//! gRPC service.
//!
//! This crate provides the [`Catalog`] operations and the [`CatalogServer`] that exposes them,
//! the storage engines they run on, and a [`MovieClient`] (with an in-memory
//! [`MovieLibrary`] to talk to). The [`catalog-server`], [`movie-client`] and
//! [`movie-server`] executables wire these together.
//!
//! ## Supported Catalog Operations
//! Items are `{name, price}` records keyed by their name. The catalog supports five
//! operations:
//!
//! - `list` every item in the store
//! - look up the `price` of an item by name
//! - `create` a new item from a name and a price
//! - `update` the price of an existing item
//! - `delete` an item by name
//!
//! Each is exposed as an HTTP route of the same name, taking its inputs from the query
//! string (`item`, `price`). Successful lookups answer with JSON; failures answer with a plain
//! text message and a status code:
//!
//! - 400 if the input is malformed, e.g. a price that is not a non-negative number
//! - 404 if no item matched
//! - 500 if the store failed
//!
//! See the [`Catalog`] type and the [`ErrorKind`] enum for more information.
//!
//! ## Storage Engines
//! [`CatalogStore`] is the trait every storage engine implements. The server receives a
//! store handle when it is created and shares clones of it with every request handler; there
//! is no global state.
//!
//! - [`MongoStore`] keeps items in a MongoDB collection (`testdb.items` by default). A unique
//! index on `name` makes the database reject duplicate names.
//! - [`SledStore`] keeps items in an embedded [`sled`] database on the local disk.
//! - [`MemoryStore`] keeps items in a concurrent in-process map.
//!
//! ## Movie Info
//! The [`movie`] module holds bindings for the `movieapi.MovieInfo` gRPC service, generated
//! from `proto/movieapi.proto` at build time. [`MovieClient`] performs the two calls of that
//! service, `GetMovieInfo` and `SetMovieInfo`, each bounded by a fixed timeout.
//!
//! [`sled`]: https://docs.rs/sled/latest/sled/
//! [`catalog-server`]: ../catalog_server/index.html
//! [`movie-client`]: ../movie_client/index.html
//! [`movie-server`]: ../movie_server/index.html

pub use catalog::Catalog;
pub use engine::{CatalogStore, MemoryStore, MongoConfig, MongoStore, SledStore};
pub use error::{CatalogError, ErrorKind, Result};
pub use item::{parse_price, Item, ItemQuery};
pub use movie::{MovieClient, MovieLibrary};
pub use server::{shutdown_signal, ApiError, CatalogServer};

mod catalog;
pub mod config;
pub mod engine;
mod error;
mod item;
pub mod logging;
pub mod movie;
mod server;
