use std::convert::Infallible;
use std::future::Future;
use axum::extract::{FromRequestParts, Query, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::{TcpListener, ToSocketAddrs};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::engine::CatalogStore;
use crate::{Catalog, CatalogError, ErrorKind, Item, ItemQuery, Result};

/// An HTTP server exposing a [`Catalog`] over five routes:
///
/// | route     | params          | success body           |
/// |-----------|-----------------|------------------------|
/// | `/list`   |                 | JSON array of items    |
/// | `/price`  | `item`          | JSON item              |
/// | `/create` | `item`, `price` | JSON item              |
/// | `/update` | `item`, `price` | JSON item              |
/// | `/delete` | `item`          | `Item <name> deleted`  |
///
/// Failures are answered with a plain text body and 400 (validation), 404 (not found) or
/// 500 (store error).
///
/// The server receives its store handle at construction time. Each request handler gets a
/// clone of that handle, and uses it to process the request.
///
/// # Example
/// ```rust,no_run
/// use catalog::{CatalogServer, MemoryStore};
/// # async fn run() -> catalog::Result<()> {
/// let server = CatalogServer::new(MemoryStore::new());
/// server.run("localhost:8000").await?;
/// # Ok(())
/// # }
/// ```
pub struct CatalogServer<S: CatalogStore> {
    catalog: Catalog<S>,
}

impl<S: CatalogStore> CatalogServer<S> {
    /// Create a new `CatalogServer` over the given [`CatalogStore`] implementation.
    pub fn new(store: S) -> Self {
        CatalogServer {
            catalog: Catalog::new(store),
        }
    }

    /// builds the axum [`Router`] serving the catalog routes
    pub fn router(&self) -> Router {
        Router::new()
            .route("/list", get(list::<S>))
            .route("/price", get(price::<S>))
            .route("/create", get(create::<S>).post(create::<S>))
            .route("/update", get(update::<S>).post(update::<S>).put(update::<S>))
            .route("/delete", get(delete::<S>).post(delete::<S>).delete(delete::<S>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.catalog.clone())
    }

    /// starts a server listening on the given address, and serves requests until Ctrl-C is
    /// received
    ///
    /// # Errors
    /// returns [`CatalogError::Io`] if the listener could not be bound
    pub async fn run<A: ToSocketAddrs>(self, addr: A) -> Result<()> {
        let listener = TcpListener::bind(addr).await?;
        info!("Listening on http://{}", listener.local_addr()?);
        self.serve(listener, shutdown_signal()).await
    }

    /// serves requests arriving on an already bound `listener` until `shutdown` completes
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await?;
        info!("server stopped");
        Ok(())
    }
}

/// a [`CatalogError`] together with the action that was being attempted when it occurred
#[derive(Debug)]
pub struct ApiError {
    action: &'static str,
    source: CatalogError,
}

impl ApiError {
    fn during(action: &'static str) -> impl FnOnce(CatalogError) -> ApiError {
        move |source| ApiError { action, source }
    }

    /// the HTTP status this error is answered with
    pub fn status(&self) -> StatusCode {
        match self.source.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Store => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self.source.kind() {
            ErrorKind::Store => {
                error!("Error {}: {}", self.action, self.source);
                format!("Error {}: {}", self.action, self.source)
            }
            _ => {
                warn!("rejected request: {}", self.source);
                self.source.to_string()
            }
        };
        (status, body).into_response()
    }
}

impl<T: Send + Sync> FromRequestParts<T> for ItemQuery {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &T,
    ) -> std::result::Result<Self, Self::Rejection> {
        // a list of pairs never fails to decode, and keeps repeated parameters
        let pairs = Query::<Vec<(String, String)>>::from_request_parts(parts, state)
            .await
            .map(|Query(pairs)| pairs)
            .unwrap_or_default();
        Ok(pairs.into_iter().collect())
    }
}

async fn list<S: CatalogStore>(
    State(catalog): State<Catalog<S>>,
) -> std::result::Result<Json<Vec<Item>>, ApiError> {
    catalog
        .list()
        .await
        .map(Json)
        .map_err(ApiError::during("listing items"))
}

async fn price<S: CatalogStore>(
    State(catalog): State<Catalog<S>>,
    query: ItemQuery,
) -> std::result::Result<Json<Item>, ApiError> {
    catalog
        .price(&query)
        .await
        .map(Json)
        .map_err(ApiError::during("looking up item"))
}

async fn create<S: CatalogStore>(
    State(catalog): State<Catalog<S>>,
    query: ItemQuery,
) -> std::result::Result<Json<Item>, ApiError> {
    catalog
        .create(&query)
        .await
        .map(Json)
        .map_err(ApiError::during("creating item"))
}

async fn update<S: CatalogStore>(
    State(catalog): State<Catalog<S>>,
    query: ItemQuery,
) -> std::result::Result<Json<Item>, ApiError> {
    catalog
        .update(&query)
        .await
        .map(Json)
        .map_err(ApiError::during("updating item"))
}

async fn delete<S: CatalogStore>(
    State(catalog): State<Catalog<S>>,
    query: ItemQuery,
) -> std::result::Result<String, ApiError> {
    catalog
        .delete(&query)
        .await
        .map(|name| format!("Item {} deleted", name))
        .map_err(ApiError::during("deleting item"))
}

/// completes once Ctrl-C is received
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("unable to listen for the shutdown signal: {}", e);
        // without a signal handler the server just runs until killed
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
