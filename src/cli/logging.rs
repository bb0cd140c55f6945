//! Log output setup

use tracing_subscriber::EnvFilter;

/// Default filter for a verbosity count; `RUST_LOG` overrides it.
pub fn default_directive(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "term_courier=debug,info",
        _ => "trace",
    }
}

/// Install the stderr subscriber
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    // A second init (tests, embedding) keeps the existing subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
