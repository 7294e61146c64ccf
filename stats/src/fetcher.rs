//! Downloads the raw stats report.
//!
//! The stats page has to be enabled in HAProxy, for example:
//!
//! ```text
//! frontend stats
//!     bind *:9999
//!     mode http
//!     stats enable
//!     stats uri /haproxy?stats
//! ```

use crate::error::TransportError;
use haproxy_status_config::Config;
use std::time::Duration;
use url::Url;

/// Suffix selecting the machine readable report.
pub const CSV_SUFFIX: &str = ";csv";

/// Something that can GET a URL and hand back the body.
pub trait Transport {
    fn get(&self, url: &Url, timeout: Duration) -> Result<Vec<u8>, TransportError>;
}

impl Transport for reqwest::blocking::Client {
    /// The body is returned whatever the status code; non-success codes are only logged.
    fn get(&self, url: &Url, timeout: Duration) -> Result<Vec<u8>, TransportError> {
        let request_error = |source| TransportError::Request {
            url: url.to_string(),
            source,
        };

        let response = reqwest::blocking::Client::get(self, url.clone())
            .timeout(timeout)
            .send()
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%url, %status, "Stats page answered with a non-success status, parsing the body anyway");
        }

        // Consumes the response, releasing the connection.
        let body = response.bytes().map_err(request_error)?;
        Ok(body.to_vec())
    }
}

/// Client used when the caller does not bring its own transport.
pub fn default_transport(config: &Config) -> Result<reqwest::blocking::Client, TransportError> {
    reqwest::blocking::Client::builder()
        .timeout(config.timeout)
        .build()
        .map_err(TransportError::Client)
}

/// `http://{host}:{port}{path};csv`
pub fn stats_url(config: &Config) -> Result<Url, TransportError> {
    let url = format!("http://{}:{}{}{CSV_SUFFIX}", config.host, config.port, config.path);
    Url::parse(&url).map_err(|source| TransportError::InvalidUrl { url, source })
}

/// Fetches the report once. No retries.
#[instrument(level = "debug", skip_all, fields(host = %config.host, port = config.port))]
pub fn fetch(transport: &impl Transport, config: &Config) -> Result<Vec<u8>, TransportError> {
    let url = stats_url(config)?;
    debug!(%url, timeout = ?config.timeout, "Fetching stats");

    let body = transport.get(&url, config.timeout)?;
    debug!(bytes = body.len(), "Fetched stats");

    Ok(body)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(host: &str, port: u16, path: &str) -> Config {
        Config {
            host: host.to_string(),
            port,
            path: path.to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn default_url() {
        let url = stats_url(&Config::default()).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9999/haproxy?stats;csv");
    }

    #[test]
    fn custom_url() {
        let url = stats_url(&config("lb.internal", 8404, "/stats")).unwrap();
        assert_eq!(url.as_str(), "http://lb.internal:8404/stats;csv");
        assert_eq!(url.path(), "/stats;csv");
    }

    #[test]
    fn invalid_host() {
        let err = stats_url(&config("bad host", 80, "/")).unwrap_err();
        assert!(matches!(err, TransportError::InvalidUrl { .. }));
    }

    struct Canned(&'static [u8]);

    impl Transport for Canned {
        fn get(&self, url: &Url, timeout: Duration) -> Result<Vec<u8>, TransportError> {
            assert_eq!(url.query(), Some("stats;csv"));
            assert_eq!(timeout, Duration::from_secs(5));
            Ok(self.0.to_vec())
        }
    }

    #[test]
    fn fetch_returns_body_unmodified() {
        let body = fetch(&Canned(b"# pxname\n\xff"), &Config::default()).unwrap();
        assert_eq!(body, b"# pxname\n\xff".to_vec());
    }
}
