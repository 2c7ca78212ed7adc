//! Logging setup shared by the executables.
use tracing_subscriber::EnvFilter;

/// configures a tracing subscriber that will log to STDERR
///
/// `RUST_LOG` takes precedence when set. Otherwise this crate logs at `info`, or at `debug`
/// when `verbose` is true.
pub fn subscriber_config(verbose: bool) {
    let default_directives = if verbose { "catalog=debug,tower_http=debug,info" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives));

    let result = tracing_subscriber::fmt()
        .with_env_filter(filter)
        // log to stderr instead of stdout
        .with_writer(std::io::stderr)
        .try_init();

    if let Err(e) = result {
        eprintln!("setting tracing default subscriber failed: {}", e);
    }
}
