//! Diagnostics go to stderr so converted values on stdout stay clean

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Filter used when `RUST_LOG` is unset. Quiet unless `--verbose` is given.
fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "coinconv=debug,reqwest=info"
    } else {
        "off"
    }
}

fn build_filter(verbose: bool, env_directives: Option<&str>) -> EnvFilter {
    env_directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directives(verbose)))
}

/// Installs the global subscriber. A valid `RUST_LOG` wins over `verbose`.
pub fn init_logging(verbose: bool) {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(verbose, env_directives.as_deref());

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}
