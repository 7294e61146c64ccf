//! Settings for reaching the HAProxy stats page.
//!
//! Values are layered, later sources winning:
//!
//! 1. the embedded `default-config.yaml`
//! 2. `config.yaml` in [`get_config_dir`] (or the file passed with `--config`)
//! 3. command line flags and their `HAPROXY_STATUS_*` environment variables

#[macro_use]
extern crate tracing;

mod app_config;
mod args;
mod output_format;

pub use app_config::get_config_dir;
pub use args::Args;
pub use output_format::OutputFormat;
use serde::{
    Deserialize,
    Serialize,
};
use std::{
    collections::HashMap,
    path::Path,
    time::Duration,
};

const DEFAULT_CONFIG: &str = include_str!("default-config.yaml");
const CONFIG_FILE: &str = "config.yaml";

/// Where and how to fetch the stats report.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Host of the stats frontend. Defaults to `127.0.0.1`.
    pub host: String,
    /// Port of the stats frontend. Defaults to `9999`.
    pub port: u16,
    /// Path of the stats page, `;csv` is appended when fetching. Defaults to `/haproxy?stats`.
    pub path: String,
    /// Timeout of the whole request. Defaults to five seconds.
    #[serde(with = "humantime_duration")]
    pub timeout: Duration,
    #[serde(default)]
    pub format: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        serde_yml::from_str(DEFAULT_CONFIG).expect("Failed to parse default config")
    }
}

impl config::Source for Config {
    fn clone_into_box(&self) -> Box<dyn config::Source + Send + Sync> {
        Box::new((*self).clone())
    }

    fn collect(&self) -> Result<config::Map<String, config::Value>, config::ConfigError> {
        let mut cache = HashMap::<String, config::Value>::new();
        cache.insert("host".to_string(), self.host.clone().into());
        cache.insert("port".to_string(), (self.port as u64).into());
        cache.insert("path".to_string(), self.path.clone().into());
        cache.insert(
            "timeout".to_string(),
            humantime::format_duration(self.timeout).to_string().into(),
        );
        cache.insert("format".to_string(), self.format.to_string().into());
        Ok(cache)
    }
}

impl Config {
    /// Builds the configuration from defaults, the config file and `args`.
    ///
    /// A file given with `--config` must exist, the one in the config directory is optional.
    pub fn new(args: &Args) -> Result<Self, config::ConfigError> {
        match &args.config {
            Some(path) => Self::load(args, path, true),
            None => Self::load(args, &get_config_dir().join(CONFIG_FILE), false),
        }
    }

    #[instrument(level = "debug", skip(args))]
    pub fn load(args: &Args, file: &Path, required: bool) -> Result<Self, config::ConfigError> {
        let builder = config::Config::builder()
            .add_source(Config::default())
            .add_source(
                config::File::from(file)
                    .format(config::FileFormat::Yaml)
                    .required(required),
            )
            .add_source(args.clone());

        let cfg: Self = builder.build()?.try_deserialize()?;
        debug!(host = %cfg.host, port = cfg.port, path = %cfg.path, timeout = ?cfg.timeout, "Loaded config");

        Ok(cfg)
    }
}

mod humantime_duration {
    use serde::{
        Deserialize,
        Deserializer,
        Serializer,
    };
    use std::time::Duration;

    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&humantime::format_duration(*duration))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let value = String::deserialize(deserializer)?;
        humantime::parse_duration(&value).map_err(serde::de::Error::custom)
    }
}
