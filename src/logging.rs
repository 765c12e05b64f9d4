//! Logging configuration and initialization

use tracing::{debug, trace};
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set
#[must_use]
pub fn default_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "wordle_server=info,tower_http=info",
        1 => "wordle_server=debug,tower_http=debug",
        _ => "wordle_server=trace,tower_http=trace",
    }
}

/// Initialize tracing for the process
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_logging(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();

    debug!("logging initialized with verbosity {verbose}");
    trace!("args: {:?}", std::env::args().collect::<Vec<_>>());
}
