//! this binary starts the catalog server
//! to see the list of options, type: `catalog-server --help`

use std::process::exit;
use catalog::config::{server_command, ServerOpt, StoreEngine};
use catalog::logging::subscriber_config;
use catalog::{CatalogServer, CatalogStore, MemoryStore, MongoStore, Result, SledStore};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let matches = server_command().get_matches();

    // validate command line options, store them in ServerOpt
    let opt = match ServerOpt::from_matches(&matches) {
        Ok(opt) => opt,
        Err(err) => {
            eprintln!("{}", err);
            exit(1);
        }
    };

    // set up a tracing subscriber to log to STDERR
    subscriber_config(opt.verbose);

    // start the server
    if let Err(e) = run(opt).await {
        error!("catalog-server failed: {}", e);
        exit(1);
    }
}

async fn run(opt: ServerOpt) -> Result<()> {
    info!("catalog-server {}", env!("CARGO_PKG_VERSION"));
    info!("Storage engine: {}", opt.engine);

    match opt.engine {
        StoreEngine::Mongo => run_with_store(MongoStore::connect(&opt.mongo).await?, &opt.addr).await,
        StoreEngine::Sled => run_with_store(SledStore::open(&opt.data_dir)?, &opt.addr).await,
        StoreEngine::Memory => run_with_store(MemoryStore::new(), &opt.addr).await,
    }
}

async fn run_with_store<S: CatalogStore>(store: S, addr: &str) -> Result<()> {
    let server = CatalogServer::new(store);
    server.run(addr).await
}
