//! Per-environment overrides layered over one configuration tree.
//!
//! ```yaml
//! database:
//!   host: localhost
//! production:
//!   database:
//!     host: 10.0.0.5
//! ```
//!
//! With env `production`, `database.host` reads `production.database.host` first and
//! only falls back to the bare `database.host` when that lookup fails, so un-prefixed
//! entries act as defaults for every environment.

use std::fmt;

use tracing::debug;

use crate::coerce::Coerce;
use crate::config::Config;
use crate::error::Result;
use crate::normalize::Normalize;
use crate::value::{Map, Value};

#[derive(Debug, Clone)]
pub struct EnvConfig {
    env: String,
    config: Config,
}

impl EnvConfig {
    pub fn new(env: impl Into<String>, config: Config) -> Self {
        Self {
            env: env.into(),
            config,
        }
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Handle on `path` in the wrapped config. No environment prefix is applied.
    pub fn get(&self, path: &str) -> Result<Config> {
        self.config.get(path)
    }

    /// Write to `path` in the wrapped config. No environment prefix is applied.
    pub fn set<V>(&self, path: &str, value: V) -> Result<()>
    where
        V: Normalize + fmt::Debug,
    {
        self.config.set(path, value)
    }

    /// Read `<env>.<path>`, falling back to `<path>`.
    ///
    /// When both fail, the error is the one from the bare path.
    ///
    /// # Examples
    /// ```
    /// use dotted_cfg::{Config, EnvConfig};
    ///
    /// let cfg = Config::from_json(r#"{"dev": {"host": "h1"}, "host": "h2"}"#).unwrap();
    /// assert_eq!(EnvConfig::new("dev", cfg.clone()).string("host").unwrap(), "h1");
    /// assert_eq!(EnvConfig::new("prod", cfg).string("host").unwrap(), "h2");
    /// ```
    pub fn get_as<T: Coerce>(&self, path: &str) -> Result<T> {
        let scoped = format!("{}.{}", self.env, path);
        match self.config.get_as(&scoped) {
            Ok(v) => Ok(v),
            Err(e) => {
                debug!(env = %self.env, path, error = %e, "no env override, using bare path");
                self.config.get_as(path)
            }
        }
    }

    /// [`EnvConfig::get_as`], or `fallback` on any error.
    pub fn get_or<T: Coerce>(&self, path: &str, fallback: T) -> T {
        self.get_as(path).unwrap_or(fallback)
    }

    /// [`EnvConfig::get_as`], or the type's zero value on any error.
    pub fn get_or_default<T: Coerce + Default>(&self, path: &str) -> T {
        self.get_as(path).unwrap_or_default()
    }

    pub fn bool(&self, path: &str) -> Result<bool> {
        self.get_as(path)
    }

    pub fn bool_or(&self, path: &str, fallback: bool) -> bool {
        self.get_or(path, fallback)
    }

    pub fn bool_or_default(&self, path: &str) -> bool {
        self.get_or_default(path)
    }

    pub fn float64(&self, path: &str) -> Result<f64> {
        self.get_as(path)
    }

    pub fn float64_or(&self, path: &str, fallback: f64) -> f64 {
        self.get_or(path, fallback)
    }

    pub fn float64_or_default(&self, path: &str) -> f64 {
        self.get_or_default(path)
    }

    pub fn int(&self, path: &str) -> Result<i64> {
        self.get_as(path)
    }

    pub fn int_or(&self, path: &str, fallback: i64) -> i64 {
        self.get_or(path, fallback)
    }

    pub fn int_or_default(&self, path: &str) -> i64 {
        self.get_or_default(path)
    }

    pub fn list(&self, path: &str) -> Result<Vec<Value>> {
        self.get_as(path)
    }

    pub fn list_or(&self, path: &str, fallback: Vec<Value>) -> Vec<Value> {
        self.get_or(path, fallback)
    }

    pub fn list_or_default(&self, path: &str) -> Vec<Value> {
        self.get_or_default(path)
    }

    pub fn map(&self, path: &str) -> Result<Map> {
        self.get_as(path)
    }

    pub fn map_or(&self, path: &str, fallback: Map) -> Map {
        self.get_or(path, fallback)
    }

    pub fn map_or_default(&self, path: &str) -> Map {
        self.get_or_default(path)
    }

    pub fn string(&self, path: &str) -> Result<String> {
        self.get_as(path)
    }

    pub fn string_or(&self, path: &str, fallback: &str) -> String {
        self.get_as(path).unwrap_or_else(|_| fallback.to_string())
    }

    pub fn string_or_default(&self, path: &str) -> String {
        self.get_or_default(path)
    }
}
