//! Loader for toxwatch configuration with file + environment overlays.
//!
//! The file supplies key-value sections (`reddit`, `feed`, `model`, `server`);
//! `TOXWATCH_`-prefixed environment variables override individual keys, and
//! `${VAR}` placeholders inside string values are expanded so credentials can
//! live outside the file.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

/// Top-level configuration for the toxwatch binary.
///
/// Every section except `feed` and `server` is fully required: a missing
/// Reddit credential or artifact path fails [`ToxwatchConfigLoader::load`]
/// before the process does any work.
#[derive(Debug, Clone, Deserialize)]
pub struct ToxwatchConfig {
    pub reddit: RedditConfig,
    pub model: ModelConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Credentials for a Reddit "script" application.
#[derive(Debug, Clone, Deserialize)]
pub struct RedditConfig {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    pub user_agent: String,
}

/// Locations of the pretrained classifier artifacts.
#[derive(Debug, Clone, Deserialize)]
pub struct ModelConfig {
    pub weights_path: String,
    pub vocab_path: String,
}

/// Which community to poll, how much, and how often.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_subreddit")]
    pub subreddit: String,
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            subreddit: default_subreddit(),
            limit: default_limit(),
            poll_interval_secs: default_poll_interval(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
        }
    }
}

fn default_subreddit() -> String {
    "MachineLearning".into()
}
fn default_limit() -> u32 {
    20
}
fn default_poll_interval() -> u64 {
    300
}
fn default_bind_addr() -> String {
    "127.0.0.1:8080".into()
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (file + env overrides).
pub struct ToxwatchConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for ToxwatchConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ToxwatchConfigLoader {
    /// Start with sensible defaults: config file + `TOXWATCH_` env overrides.
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("TOXWATCH").separator("__"));
        Self { builder }
    }

    /// Attach a config file; the `config` crate infers format by suffix, so
    /// TOML, YAML, and INI all work.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self.builder.add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Allow tests to merge inline YAML snippets.
    ///
    /// ```
    /// use toxwatch_config::ToxwatchConfigLoader;
    ///
    /// let cfg = ToxwatchConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// reddit:
    ///   client_id: "id"
    ///   client_secret: "secret"
    ///   username: "bot"
    ///   password: "hunter2"
    ///   user_agent: "toxwatch/0.1 by bot"
    /// model:
    ///   weights_path: "model.bin"
    ///   vocab_path: "vocab.json"
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.feed.limit, 20);
    /// assert_eq!(cfg.server.bind_addr, "127.0.0.1:8080");
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources.
    ///
    /// Merged values go through `serde_json::Value` first so `${VAR}`
    /// placeholders can be expanded recursively before the strongly typed
    /// structs are materialised.
    pub fn load(self) -> Result<ToxwatchConfig, ConfigError> {
        let cfg = self.builder.build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        let typed: ToxwatchConfig =
            serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
