use tracing_subscriber::fmt;
use tracing_subscriber::EnvFilter;

/// Env var holding a tracing filter directive, e.g. `media_carousel=debug`.
pub const LOG_ENV: &str = "MEDIA_CAROUSEL_LOG";

/// Initialize tracing on stderr so stdout stays free for snapshots. Call once
/// per process.
///
/// `MEDIA_CAROUSEL_LOG` wins when set; otherwise the level is `warn`, or
/// `debug` with `verbose`.
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| default_filter(verbose));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .init();
}

fn default_filter(verbose: bool) -> EnvFilter {
    EnvFilter::new(if verbose { "debug" } else { "warn" })
}
