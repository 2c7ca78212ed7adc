use thiserror::Error;

/// type alias for all operations in this crate that could fail with a [`CatalogError`]
pub type Result<T> = std::result::Result<T, CatalogError>;

/// The three ways a catalog request can fail, as seen by a caller.
///
/// Every [`CatalogError`] maps onto exactly one of these, and the HTTP layer maps each of
/// these onto exactly one status code.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// the request itself was malformed (HTTP 400)
    Validation,
    /// no record matched the request (HTTP 404)
    NotFound,
    /// the underlying store, transport or file system failed (HTTP 500)
    Store,
}

/// The Error variants used throughout the catalog crate.
///
/// Lower level errors from third party crates are wrapped via `#[from]` so they can be
/// propagated with `?`.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// a price parameter was missing, unparseable, negative or not finite
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// a required query parameter was absent or empty
    #[error("Missing required parameter: {0}")]
    MissingParam(&'static str),

    /// no item with the given name exists in the store
    #[error("No such item: {0}")]
    ItemNotFound(String),

    /// an item with the given name already exists in the store
    #[error("duplicate key: an item named {0} already exists")]
    DuplicateKey(String),

    /// errors reported by the MongoDB driver
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// errors reported by the sled engine
    #[error("sled error: {0}")]
    Sled(#[from] sled::Error),

    /// Serde Error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// variant for errors caused from IO
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// a blocking storage task panicked or was cancelled
    #[error("storage task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// a command line option or address could not be parsed
    #[error("{0}")]
    Parsing(String),

    /// the gRPC channel could not be established
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// the remote side answered a gRPC call with a non-OK status
    #[error("RPC failed: {0}")]
    Rpc(#[from] tonic::Status),
}

impl CatalogError {
    /// classifies this error into one of the three caller visible [`ErrorKind`]s
    pub fn kind(&self) -> ErrorKind {
        match self {
            CatalogError::InvalidPrice(_) | CatalogError::MissingParam(_) => ErrorKind::Validation,
            CatalogError::ItemNotFound(_) => ErrorKind::NotFound,
            _ => ErrorKind::Store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_are_classified() {
        assert_eq!(CatalogError::InvalidPrice("x".into()).kind(), ErrorKind::Validation);
        assert_eq!(CatalogError::MissingParam("item").kind(), ErrorKind::Validation);
        assert_eq!(CatalogError::ItemNotFound("Widget".into()).kind(), ErrorKind::NotFound);
        assert_eq!(CatalogError::DuplicateKey("Widget".into()).kind(), ErrorKind::Store);
    }

    #[test]
    fn driver_errors_are_store_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk on fire");
        assert_eq!(CatalogError::from(io).kind(), ErrorKind::Store);
        assert_eq!(
            CatalogError::from(tonic::Status::not_found("nope")).kind(),
            ErrorKind::Store
        );
    }

    #[test]
    fn messages_match_the_plain_text_bodies() {
        assert_eq!(
            CatalogError::ItemNotFound("Widget".into()).to_string(),
            "No such item: Widget"
        );
        assert_eq!(
            CatalogError::MissingParam("item").to_string(),
            "Missing required parameter: item"
        );
    }
}
