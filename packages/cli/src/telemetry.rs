// ABOUTME: Tracing subscriber setup for the cloudpub binary
// ABOUTME: Logs go to stderr so command output on stdout stays parseable

use cloudpub_config::DEFAULT_LOG_FILTER;
use tracing::warn;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Parse a `CLOUDPUB_LOG` directive
pub fn parse_filter(filter: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(filter)
}

/// Install the global subscriber. Safe to call more than once.
///
/// Returns `false` when `filter` was rejected and the default filter was used.
pub fn init_tracing(filter: &str) -> bool {
    let (env_filter, rejected) = match parse_filter(filter) {
        Ok(env_filter) => (env_filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_LOG_FILTER), Some(e)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();

    match rejected {
        Some(e) => {
            eprintln!(
                "Ignoring invalid CLOUDPUB_LOG filter '{}' ({}), using '{}'",
                filter, e, DEFAULT_LOG_FILTER
            );
            warn!(filter, error = %e, "Invalid log filter, using default");
            false
        }
        None => true,
    }
}
