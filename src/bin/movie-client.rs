//! The movie-client executable looks a movie up on a movie-info gRPC service, then stores a
//! hardcoded movie there, logging both replies.
//!
//! `movie-client [TITLE] [--addr URI] [--timeout-ms MILLIS]`
//!
//!     TITLE defaults to "Pulp fiction". --addr defaults to http://localhost:50051.
//!     Connecting and each call are bounded by --timeout-ms (one second by default).
//!     Any failure is fatal: an error is printed and the exit code is non-zero.

use std::process::exit;
use catalog::config::{movie_client_command, MovieClientOpt};
use catalog::logging::subscriber_config;
use catalog::movie::new_movie_data;
use catalog::{MovieClient, Result};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let matches = movie_client_command().get_matches();
    let opt = match MovieClientOpt::from_matches(&matches) {
        Ok(opt) => opt,
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };

    // configure a subscriber that will log messages to STDERR
    subscriber_config(opt.verbose);

    if let Err(e) = run(opt).await {
        error!("{}", e);
        exit(1);
    }
}

/// connects, gets the info of `opt.title`, then sets the info of a new movie
async fn run(opt: MovieClientOpt) -> Result<()> {
    let mut client = MovieClient::connect(&opt.addr, opt.timeout).await?;

    let reply = client.get_movie_info(&opt.title).await?;
    info!(
        "Movie Info for {} {} {} {:?}",
        opt.title, reply.year, reply.director, reply.cast
    );

    let status = client.set_movie_info(new_movie_data()).await?;
    info!("Set Movie Info status: {}", status.code);
    Ok(())
}
