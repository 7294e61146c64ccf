use crate::OutputFormat;
use clap::Parser;
use std::{
    path::PathBuf,
    time::Duration,
};

/// Fetch HAProxy runtime statistics and print them.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, about, long_about = None, disable_version_flag = true)]
pub struct Args {
    /// Show version.
    #[clap(short = 'v', long = "version", action)]
    pub version: bool,

    /// HAProxy host serving the stats page.
    #[clap(short = 'H', long = "haproxy-host", env = "HAPROXY_STATUS_HOST", value_name = "HOST")]
    pub haproxy_host: Option<String>,

    /// HAProxy stats port.
    #[clap(short = 'P', long = "haproxy-port", env = "HAPROXY_STATUS_PORT", value_name = "PORT")]
    pub haproxy_port: Option<u16>,

    /// Path of the stats page, as configured with `stats uri`.
    #[clap(long = "haproxy-path", env = "HAPROXY_STATUS_PATH", value_name = "PATH")]
    pub haproxy_path: Option<String>,

    /// Request timeout, e.g. `5s` or `1500ms`.
    #[clap(short = 't', long, env = "HAPROXY_STATUS_TIMEOUT", value_name = "DURATION", value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Output format.
    #[clap(long, value_enum, env = "HAPROXY_STATUS_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Configuration file to use instead of the one in the config directory.
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the output to this file instead of stdout.
    #[clap(long = "output-file", value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Enable debug logging.
    #[clap(long = "verbose", action)]
    pub verbose: bool,
}

mod config_ext {
    use super::*;
    use config::{
        Map,
        Source,
        Value,
    };
    use std::collections::HashMap;

    impl Source for Args {
        fn clone_into_box(&self) -> Box<dyn Source + Send + Sync> {
            Box::new((*self).clone())
        }

        fn collect(&self) -> Result<Map<String, Value>, config::ConfigError> {
            let mut cache = HashMap::<String, Value>::new();
            if let Some(host) = &self.haproxy_host {
                cache.insert("host".to_string(), host.clone().into());
            }
            if let Some(port) = self.haproxy_port {
                cache.insert("port".to_string(), (port as u64).into());
            }
            if let Some(path) = &self.haproxy_path {
                cache.insert("path".to_string(), path.clone().into());
            }
            if let Some(timeout) = self.timeout {
                cache.insert(
                    "timeout".to_string(),
                    humantime::format_duration(timeout).to_string().into(),
                );
            }
            if let Some(format) = self.format {
                cache.insert("format".to_string(), format.to_string().into());
            }
            Ok(cache)
        }
    }
}
