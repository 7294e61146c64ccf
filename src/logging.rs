use eyre::{
    Context as _,
    Result,
};
use tracing_subscriber::{
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
};

const CRATES: [&str; 3] = ["haproxy_status", "haproxy_status_config", "haproxy_status_stats"];

pub fn init_errors() -> Result<()> {
    color_eyre::install()
}

/// Logs go to stderr, stdout carries the stats. `RUST_LOG` overrides the default filter.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_directives(verbose)))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_filter(filter))
        .with(tracing_error::ErrorLayer::default())
        .try_init()
        .context("Failed to initialize tracing subscriber")
}

fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "warn" };
    CRATES
        .iter()
        .fold("warn".to_string(), |directives, krate| format!("{directives},{krate}={level}"))
}
