use std::sync::Arc;
use dashmap::DashMap;
use tonic::{Request, Response};
use tracing::debug;

use super::proto::movie_info_server::MovieInfo;
use super::proto::{MovieData, MovieReply, MovieRequest, Status};

/// the status code returned for every successful write
pub const SUCCESS: &str = "Success";

#[derive(Debug, Clone)]
struct Movie {
    year: i32,
    director: String,
    cast: Vec<String>,
}

/// An in-memory movie-info service, keyed by exact title.
#[derive(Debug, Clone, Default)]
pub struct MovieLibrary {
    movies: Arc<DashMap<String, Movie>>,
}

impl MovieLibrary {
    /// creates an empty library
    pub fn new() -> Self {
        MovieLibrary::default()
    }

    /// creates a library that already knows about "Pulp fiction"
    pub fn with_classics() -> Self {
        let library = MovieLibrary::new();
        library.movies.insert(
            "Pulp fiction".to_string(),
            Movie {
                year: 1994,
                director: "Quentin Tarantino".to_string(),
                cast: vec![
                    "John Travolta".to_string(),
                    "Uma Thurman".to_string(),
                    "Samuel Jackson".to_string(),
                ],
            },
        );
        library
    }

    /// adds or replaces a movie
    ///
    /// # Errors
    /// `INVALID_ARGUMENT` if the title is blank or the year is not a number
    pub fn store(&self, movie: MovieData) -> std::result::Result<(), tonic::Status> {
        if movie.title.trim().is_empty() {
            return Err(tonic::Status::invalid_argument("a movie needs a title"));
        }
        let year = movie.year.trim().parse::<i32>().map_err(|_| {
            tonic::Status::invalid_argument(format!("invalid year: {:?}", movie.year))
        })?;

        self.movies.insert(
            movie.title,
            Movie {
                year,
                director: movie.director,
                cast: movie.cast,
            },
        );
        Ok(())
    }

    /// the number of movies in the library
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// true if the library has no movies
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[tonic::async_trait]
impl MovieInfo for MovieLibrary {
    async fn get_movie_info(
        &self,
        request: Request<MovieRequest>,
    ) -> std::result::Result<Response<MovieReply>, tonic::Status> {
        let title = request.into_inner().title;
        debug!("GetMovieInfo {:?}", title);

        let movie = self
            .movies
            .get(&title)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| tonic::Status::not_found(format!("no movie titled {:?}", title)))?;

        Ok(Response::new(MovieReply {
            year: movie.year,
            director: movie.director,
            cast: movie.cast,
        }))
    }

    async fn set_movie_info(
        &self,
        request: Request<MovieData>,
    ) -> std::result::Result<Response<Status>, tonic::Status> {
        let movie = request.into_inner();
        debug!("SetMovieInfo {:?}", movie.title);
        self.store(movie)?;

        Ok(Response::new(Status {
            code: SUCCESS.to_string(),
        }))
    }
}
