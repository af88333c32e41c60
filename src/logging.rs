use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "grid_snake=info";

/// Installs a `tracing` subscriber appending to `path`.
///
/// The terminal belongs to the UI while the game runs, so logs only go to a
/// file. `RUST_LOG` overrides the default filter.
pub fn init_file_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(io::Error::other)
}
