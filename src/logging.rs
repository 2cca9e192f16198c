// src/logging.rs
// =============================================================================
// Sets up tracing output.
//
// Logs go to stderr so that --json output on stdout can be piped straight
// into other tools. RUST_LOG overrides the default filter.
// =============================================================================

use tracing_subscriber::EnvFilter;

pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,title_grabber=debug"
    } else {
        "info,title_grabber=info"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
