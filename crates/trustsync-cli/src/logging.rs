//! Tracing subscriber setup.

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_LEVEL: &str = "info";

/// Install a stderr `fmt` subscriber filtered by `level`.
///
/// An unparsable filter falls back to `info` rather than failing.
pub fn init(level: &str) -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| anyhow!("initialize logging subscriber: {err}"))
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level.trim()).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

#[cfg(test)]
mod tests {
    use super::filter;

    #[test]
    fn accepts_directives() {
        assert_eq!(filter(" debug ").to_string(), "debug");
        assert_eq!(filter("trustsync=trace").to_string(), "trustsync=trace");
    }
}
