//! Logging setup
//!
//! Logs go to stderr so a report written to stdout stays clean. `RUST_LOG`
//! takes precedence over the default level.

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset
pub fn default_directive(debug: bool) -> &'static str {
    if debug {
        "scorepulse=debug"
    } else {
        "scorepulse=info"
    }
}

/// Install the global tracing subscriber
///
/// Safe to call more than once; later calls are ignored.
pub fn init(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(debug)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "scorepulse=info");
        assert_eq!(default_directive(true), "scorepulse=debug");
    }

    #[test]
    fn test_init_twice() {
        init(false);
        init(true);
    }
}
