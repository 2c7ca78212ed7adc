use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tracing::{debug, info};

use super::proto::movie_info_client::MovieInfoClient;
use super::proto::{MovieData, MovieReply, MovieRequest, Status};
use crate::Result;

/// `MovieClient` contains the functionality for communication with a movie-info service.
///
/// Every call, as well as the initial connection, is bounded by the same timeout. Nothing is
/// retried: a call that times out fails with [`CatalogError::Rpc`].
///
/// [`CatalogError::Rpc`]: crate::CatalogError::Rpc
#[derive(Debug, Clone)]
pub struct MovieClient {
    inner: MovieInfoClient<Channel>,
    timeout: Duration,
}

impl MovieClient {
    /// creates a client and establishes a connection to the service at the given `addr`,
    /// e.g. `http://localhost:50051`
    ///
    /// # Errors
    /// returns [`CatalogError::Transport`] if `addr` is not a valid URI or the service can't
    /// be reached within `timeout`
    ///
    /// [`CatalogError::Transport`]: crate::CatalogError::Transport
    pub async fn connect(addr: &str, timeout: Duration) -> Result<Self> {
        let channel = Endpoint::from_shared(addr.to_string())?
            .connect_timeout(timeout)
            .timeout(timeout)
            .connect()
            .await?;
        info!("connected to movie-info service at {}", addr);

        Ok(MovieClient {
            inner: MovieInfoClient::new(channel),
            timeout,
        })
    }

    /// fetches the year, director and cast of the movie with the given `title`
    pub async fn get_movie_info(&mut self, title: &str) -> Result<MovieReply> {
        let mut request = tonic::Request::new(MovieRequest {
            title: title.to_string(),
        });
        request.set_timeout(self.timeout);
        debug!("GetMovieInfo {:?}", title);

        Ok(self.inner.get_movie_info(request).await?.into_inner())
    }

    /// sends `movie` to the service to be stored, returning the service's status reply
    pub async fn set_movie_info(&mut self, movie: MovieData) -> Result<Status> {
        debug!("SetMovieInfo {:?}", movie);
        let mut request = tonic::Request::new(movie);
        request.set_timeout(self.timeout);

        Ok(self.inner.set_movie_info(request).await?.into_inner())
    }
}
