//! The movie-info side of the crate: gRPC bindings for the `movieapi.MovieInfo` service, a
//! [`MovieClient`] that talks to it, and [`MovieLibrary`], an in-memory implementation of the
//! service.

mod client;
mod library;
pub mod proto;

pub use self::client::MovieClient;
pub use self::library::{MovieLibrary, SUCCESS};
pub use self::proto::movie_info_server::{MovieInfo, MovieInfoServer};
pub use self::proto::{MovieData, MovieReply, MovieRequest, Status};

/// the title looked up when the client is given none
pub const DEFAULT_TITLE: &str = "Pulp fiction";

/// the record the client writes after its lookup
pub fn new_movie_data() -> MovieData {
    MovieData {
        title: "New Movie".to_string(),
        year: "2024".to_string(),
        director: "New Director".to_string(),
        cast: vec!["Actor1".to_string(), "Actor2".to_string()],
    }
}
