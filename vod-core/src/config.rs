//! # Configuration
//!
//! The SDK reads its settings from a simple string key/value store.
//! Applications may fill it by hand or import environment variables:
//!
//! ```rust
//! use vod_core::VodConfig;
//!
//! let mut config = VodConfig::new();
//! config.set("vod.host", "vod.example.com");
//! assert_eq!(config.get("vod.host"), Some("vod.example.com"));
//! ```
//!
//! `load_env("VOD")` maps `VOD__VOD__HOST=example.com` to `vod.host`.
//! Typed settings are read from a [`VodConfigSnapshot`] by
//! [`ClientOptions::from_config`](crate::ClientOptions::from_config).

use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct VodConfig {
    values: HashMap<String, String>,
}

impl VodConfig {
    /// Create an empty config store.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Set a configuration key to a string value.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.values.insert(key.into(), value.into());
    }

    /// Get a configuration value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(|s| s.as_str())
    }

    /// Check whether a key is present.
    pub fn has(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Import every `{prefix}__A__B=value` variable as key `a.b`.
    pub fn load_env(&mut self, prefix: &str) {
        self.load_vars(prefix, std::env::vars());
    }

    fn load_vars<I>(&mut self, prefix: &str, vars: I)
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let prefix = format!("{prefix}__");
        for (key, value) in vars {
            if let Some(stripped) = key.strip_prefix(&prefix) {
                let normalized = stripped.to_lowercase().replace("__", ".");
                self.set(normalized, value);
            }
        }
    }

    pub fn snapshot(&self) -> VodConfigSnapshot {
        VodConfigSnapshot::new(self.values.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct VodConfigSnapshot {
    map: HashMap<String, String>,
}

impl VodConfigSnapshot {
    pub(crate) fn new(map: HashMap<String, String>) -> Self {
        Self { map }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(|s| s.as_str())
    }

    pub fn get_string(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.get(key).and_then(|v| v.parse::<u64>().ok())
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(|v| v.parse::<bool>().ok())
    }

    /// Parse a humantime duration such as `30s` or `1h`.
    pub fn get_duration(&self, key: &str) -> Option<Duration> {
        self.get(key)
            .and_then(|v| humantime::parse_duration(v.trim()).ok())
    }
}
