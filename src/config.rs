//! Command line configuration for the `catalog-server`, `movie-client` and `movie-server`
//! executables. Every option can also be given through an environment variable.
use std::fmt;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::PathBuf;
use std::time::Duration;
use clap::{crate_version, value_parser, Arg, ArgAction, ArgMatches, Command, ValueEnum};
use tonic::codegen::http::Uri;

use crate::engine::{MongoConfig, DEFAULT_COLLECTION, DEFAULT_DATABASE, DEFAULT_MONGO_URI};
use crate::movie::DEFAULT_TITLE;
use crate::{CatalogError, Result};

/// default address the catalog server listens on
pub const DEFAULT_CATALOG_ADDRESS: &str = "localhost:8000";
/// default address of the movie-info service
pub const DEFAULT_MOVIE_ADDRESS: &str = "http://localhost:50051";
/// default address the movie-info server listens on
pub const DEFAULT_MOVIE_LISTEN_ADDRESS: &str = "127.0.0.1:50051";
/// default per call timeout of the movie client, in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 1000;

/// The storage engines the catalog server can run on
#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StoreEngine {
    /// a MongoDB collection
    Mongo,
    /// an embedded sled database
    Sled,
    /// an in-process map, lost on exit
    Memory,
}

impl fmt::Display for StoreEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StoreEngine::Mongo => "mongo",
            StoreEngine::Sled => "sled",
            StoreEngine::Memory => "memory",
        };
        f.write_str(name)
    }
}

/// [`ServerOpt`] holds parsed and validated options of the catalog server
#[derive(Debug, Clone)]
pub struct ServerOpt {
    /// the `host:port` the server listens on
    pub addr: String,
    /// the storage engine to use
    pub engine: StoreEngine,
    /// where the mongo engine's collection lives
    pub mongo: MongoConfig,
    /// the directory the sled engine keeps its files in
    pub data_dir: PathBuf,
    /// log at debug level
    pub verbose: bool,
}

/// [`MovieClientOpt`] holds parsed and validated options of the movie client
#[derive(Debug, Clone)]
pub struct MovieClientOpt {
    /// the URI of the movie-info service
    pub addr: String,
    /// the title to look up
    pub title: String,
    /// bound on the connection attempt and on each call
    pub timeout: Duration,
    /// log at debug level
    pub verbose: bool,
}

/// [`MovieServerOpt`] holds parsed and validated options of the movie-info server
#[derive(Debug, Clone)]
pub struct MovieServerOpt {
    /// the address the server listens on
    pub addr: SocketAddr,
    /// log at debug level
    pub verbose: bool,
}

fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::SetTrue)
        .help("log at debug level")
}

/// the command line interface of `catalog-server`
pub fn server_command() -> Command {
    Command::new("catalog-server")
        .version(crate_version!())
        .author("strohs <strohs1@gmail.com>")
        .about("an item catalog served over HTTP")
        .arg(Arg::new("addr")
            .long("addr")
            .value_name("HOST:PORT")
            .env("CATALOG_ADDR")
            .help("sets the HOST:PORT that the server listens on")
            .default_value(DEFAULT_CATALOG_ADDRESS))
        .arg(Arg::new("engine")
            .long("engine")
            .value_name("ENGINE_NAME")
            .env("CATALOG_ENGINE")
            .help("sets the storage engine to use")
            .value_parser(value_parser!(StoreEngine))
            .default_value("mongo"))
        .arg(Arg::new("mongo-uri")
            .long("mongo-uri")
            .value_name("URI")
            .env("MONGODB_URI")
            .help("connection string of the MongoDB deployment (mongo engine)")
            .default_value(DEFAULT_MONGO_URI))
        .arg(Arg::new("database")
            .long("database")
            .value_name("NAME")
            .env("CATALOG_DATABASE")
            .help("database holding the item collection (mongo engine)")
            .default_value(DEFAULT_DATABASE))
        .arg(Arg::new("collection")
            .long("collection")
            .value_name("NAME")
            .env("CATALOG_COLLECTION")
            .help("name of the item collection (mongo engine)")
            .default_value(DEFAULT_COLLECTION))
        .arg(Arg::new("data-dir")
            .long("data-dir")
            .value_name("DIR")
            .env("CATALOG_DATA_DIR")
            .help("directory holding the database files (sled engine)")
            .value_parser(value_parser!(PathBuf))
            .default_value("."))
        .arg(verbose_arg())
}

/// the command line interface of `movie-client`
pub fn movie_client_command() -> Command {
    Command::new("movie-client")
        .version(crate_version!())
        .author("strohs <strohs1@gmail.com>")
        .about("looks a movie up on a movie-info service, then stores a new one")
        .arg(Arg::new("TITLE")
            .index(1)
            .help("the title to look up")
            .default_value(DEFAULT_TITLE))
        .arg(Arg::new("addr")
            .long("addr")
            .value_name("URI")
            .env("MOVIE_ADDR")
            .help("sets the address of the movie-info service")
            .default_value(DEFAULT_MOVIE_ADDRESS))
        .arg(Arg::new("timeout-ms")
            .long("timeout-ms")
            .value_name("MILLIS")
            .help("bound on connecting and on each call")
            .value_parser(value_parser!(u64).range(1..))
            .default_value("1000"))
        .arg(verbose_arg())
}

/// the command line interface of `movie-server`
pub fn movie_server_command() -> Command {
    Command::new("movie-server")
        .version(crate_version!())
        .author("strohs <strohs1@gmail.com>")
        .about("an in-memory movie-info gRPC service")
        .arg(Arg::new("addr")
            .long("addr")
            .value_name("IP_ADDR:PORT")
            .env("MOVIE_LISTEN_ADDR")
            .help("sets the IP_ADDR:PORT that the server listens on")
            .default_value(DEFAULT_MOVIE_LISTEN_ADDRESS))
        .arg(verbose_arg())
}

/// fetches a string argument that has a default value
fn string_arg(matches: &ArgMatches, id: &str) -> Result<String> {
    matches
        .get_one::<String>(id)
        .cloned()
        .ok_or_else(|| CatalogError::Parsing(format!("missing value for --{}", id)))
}

/// checks that `addr` resolves to at least one socket address
fn validate_host_port(addr: &str) -> Result<()> {
    let resolved = addr
        .to_socket_addrs()
        .map(|mut addrs| addrs.next().is_some())
        .unwrap_or(false);
    if resolved {
        Ok(())
    } else {
        Err(CatalogError::Parsing(format!("could not parse {} into a host and port", addr)))
    }
}

/// accepts `host:port` or a full `http(s)://host:port` URI, returning the latter
pub fn normalize_service_uri(addr: &str) -> Result<String> {
    let uri = if addr.contains("://") {
        addr.to_string()
    } else {
        format!("http://{}", addr)
    };

    let invalid = || CatalogError::Parsing(format!("could not parse {} into a service URI", addr));
    let parsed: Uri = uri.parse().map_err(|_| invalid())?;
    match (parsed.scheme_str(), parsed.host()) {
        (Some("http") | Some("https"), Some(host)) if !host.is_empty() => Ok(uri),
        _ => Err(invalid()),
    }
}

impl ServerOpt {
    /// builds a validated `ServerOpt` from parsed command line arguments
    ///
    /// # Errors
    /// returns [`CatalogError::Parsing`] if the listen address does not resolve
    pub fn from_matches(matches: &ArgMatches) -> Result<ServerOpt> {
        let addr = string_arg(matches, "addr")?;
        validate_host_port(&addr)?;

        Ok(ServerOpt {
            addr,
            engine: matches
                .get_one::<StoreEngine>("engine")
                .copied()
                .unwrap_or(StoreEngine::Mongo),
            mongo: MongoConfig {
                uri: string_arg(matches, "mongo-uri")?,
                database: string_arg(matches, "database")?,
                collection: string_arg(matches, "collection")?,
            },
            data_dir: matches
                .get_one::<PathBuf>("data-dir")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(".")),
            verbose: matches.get_flag("verbose"),
        })
    }
}

impl MovieClientOpt {
    /// builds a validated `MovieClientOpt` from parsed command line arguments
    ///
    /// # Errors
    /// returns [`CatalogError::Parsing`] if the service address is not a usable URI
    pub fn from_matches(matches: &ArgMatches) -> Result<MovieClientOpt> {
        let timeout_ms = matches
            .get_one::<u64>("timeout-ms")
            .copied()
            .unwrap_or(DEFAULT_TIMEOUT_MS);

        Ok(MovieClientOpt {
            addr: normalize_service_uri(&string_arg(matches, "addr")?)?,
            title: string_arg(matches, "TITLE")?,
            timeout: Duration::from_millis(timeout_ms),
            verbose: matches.get_flag("verbose"),
        })
    }
}

impl MovieServerOpt {
    /// builds a validated `MovieServerOpt` from parsed command line arguments
    ///
    /// # Errors
    /// returns [`CatalogError::Parsing`] if the address is not an `IP:PORT` pair
    pub fn from_matches(matches: &ArgMatches) -> Result<MovieServerOpt> {
        let addr = string_arg(matches, "addr")?;
        let addr: SocketAddr = addr.parse().map_err(|_| {
            CatalogError::Parsing(format!("could not parse {} into an IP address and port", addr))
        })?;

        Ok(MovieServerOpt {
            addr,
            verbose: matches.get_flag("verbose"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_defaults() {
        let matches = server_command().try_get_matches_from(["catalog-server"]).unwrap();
        let opt = ServerOpt::from_matches(&matches).unwrap();

        assert_eq!(opt.addr, DEFAULT_CATALOG_ADDRESS);
        assert_eq!(opt.engine, StoreEngine::Mongo);
        assert!(!opt.verbose);
    }

    #[test]
    fn server_engine_and_address() {
        let matches = server_command()
            .try_get_matches_from([
                "catalog-server", "--engine", "sled", "--addr", "127.0.0.1:9000",
                "--data-dir", "/tmp/catalog", "-v",
            ])
            .unwrap();
        let opt = ServerOpt::from_matches(&matches).unwrap();

        assert_eq!(opt.engine, StoreEngine::Sled);
        assert_eq!(opt.addr, "127.0.0.1:9000");
        assert_eq!(opt.data_dir, PathBuf::from("/tmp/catalog"));
        assert!(opt.verbose);
    }

    #[test]
    fn unknown_engines_are_rejected_by_the_parser() {
        assert!(server_command()
            .try_get_matches_from(["catalog-server", "--engine", "postgres"])
            .is_err());
    }

    #[test]
    fn server_address_must_have_a_port() {
        let matches = server_command()
            .try_get_matches_from(["catalog-server", "--addr", "no-port-here"])
            .unwrap();
        assert!(matches!(ServerOpt::from_matches(&matches), Err(CatalogError::Parsing(_))));
    }

    #[test]
    fn movie_client_defaults() {
        let matches = movie_client_command().try_get_matches_from(["movie-client"]).unwrap();
        let opt = MovieClientOpt::from_matches(&matches).unwrap();

        assert_eq!(opt.title, DEFAULT_TITLE);
        assert_eq!(opt.addr, DEFAULT_MOVIE_ADDRESS);
        assert_eq!(opt.timeout, Duration::from_secs(1));
    }

    #[test]
    fn movie_client_title_and_bare_address() {
        let matches = movie_client_command()
            .try_get_matches_from(["movie-client", "Heat", "--addr", "localhost:6000"])
            .unwrap();
        let opt = MovieClientOpt::from_matches(&matches).unwrap();

        assert_eq!(opt.title, "Heat");
        assert_eq!(opt.addr, "http://localhost:6000");
    }

    #[test]
    fn service_uris_need_an_http_scheme_and_host() {
        assert!(normalize_service_uri("ftp://localhost:1").is_err());
        assert!(normalize_service_uri("http://").is_err());
        assert_eq!(normalize_service_uri("https://movies:443").unwrap(), "https://movies:443");
    }

    #[test]
    fn movie_server_needs_an_ip_address() {
        let matches = movie_server_command()
            .try_get_matches_from(["movie-server", "--addr", "localhost:50051"])
            .unwrap();
        assert!(MovieServerOpt::from_matches(&matches).is_err());
    }

    #[test]
    fn client_and_server_read_different_address_variables() {
        let env_of = |command: Command| {
            command
                .get_arguments()
                .find(|arg| arg.get_id() == "addr")
                .and_then(|arg| arg.get_env())
                .map(|name| name.to_string_lossy().into_owned())
        };
        assert_eq!(env_of(movie_client_command()).as_deref(), Some("MOVIE_ADDR"));
        assert_eq!(env_of(movie_server_command()).as_deref(), Some("MOVIE_LISTEN_ADDR"));
    }
}
