//! # HAProxy stats
//!
//! Fetches the CSV report of HAProxy's stats page and normalizes it into [`StatRecord`]s.
//!
//! - **`fetcher`**: builds the `;csv` URL and GETs the raw report through a [`Transport`]
//! - **`normalizer`**: parses the report into records, all or nothing
//! - **`record`**: [`StatRecord`] and [`EntityType`], serialized with HAProxy's column names
//! - **`render`**: JSON and table output
//!
//! ```no_run
//! let config = haproxy_status_config::Config::default();
//! for record in haproxy_status_stats::status(&config)? {
//!     println!("{}/{}: {}", record.proxy_name, record.service_name, record.status);
//! }
//! # Ok::<(), haproxy_status_stats::StatusError>(())
//! ```

#[macro_use]
extern crate tracing;

pub mod error;
pub mod fetcher;
pub mod normalizer;
pub mod record;
pub mod render;

pub use error::{
    ParseError,
    StatusError,
    TableError,
    TransportError,
};
pub use fetcher::{
    fetch,
    Transport,
};
pub use normalizer::parse;
pub use record::{
    EntityType,
    StatRecord,
};
pub use render::render;

use haproxy_status_config::Config;

/// Fetches and parses one stats snapshot using a fresh HTTP client.
pub fn status(config: &Config) -> Result<Vec<StatRecord>, StatusError> {
    let transport = fetcher::default_transport(config)?;
    status_with(&transport, config)
}

/// Like [`status`] with a caller supplied transport.
pub fn status_with(transport: &impl Transport, config: &Config) -> Result<Vec<StatRecord>, StatusError> {
    let data = fetch(transport, config)?;
    let records = parse(&data)?;
    info!(records = records.len(), "Collected stats snapshot");
    Ok(records)
}
