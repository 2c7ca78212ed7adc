//! this binary starts an in-memory movie-info gRPC service
//! to see the list of options, type: `movie-server --help`

use std::process::exit;
use catalog::config::{movie_server_command, MovieServerOpt};
use catalog::logging::subscriber_config;
use catalog::movie::MovieInfoServer;
use catalog::{shutdown_signal, MovieLibrary, Result};
use tonic::transport::Server;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let matches = movie_server_command().get_matches();
    let opt = match MovieServerOpt::from_matches(&matches) {
        Ok(opt) => opt,
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };

    subscriber_config(opt.verbose);

    if let Err(e) = run(opt).await {
        error!("movie-server failed: {}", e);
        exit(1);
    }
}

async fn run(opt: MovieServerOpt) -> Result<()> {
    let library = MovieLibrary::with_classics();
    info!("movie-server {}", env!("CARGO_PKG_VERSION"));
    info!("Serving {} movies on {}", library.len(), opt.addr);

    Server::builder()
        .add_service(MovieInfoServer::new(library))
        .serve_with_shutdown(opt.addr, shutdown_signal())
        .await?;
    Ok(())
}
