// Client options.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::VodConfigSnapshot;
use crate::errors::{VodError, VodResult};

pub const DEFAULT_HOST: &str = "vod.volcengineapi.com";
pub const DEFAULT_VERSION: &str = "2020-08-01";

/// Settings shared by every call a [`VodClient`](crate::VodClient) makes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientOptions {
    /// OpenAPI host
    pub host: String,
    /// OpenAPI scheme (`https` or `http`)
    pub scheme: String,
    /// OpenAPI version sent with every action
    pub version: String,
    /// Request timeout for OpenAPI calls
    #[serde(with = "humantime_serde")]
    pub timeout: Duration,
    /// Default lifetime of upload credentials
    #[serde(with = "humantime_serde")]
    pub upload_auth_expiry: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            scheme: "https".to_string(),
            version: DEFAULT_VERSION.to_string(),
            timeout: Duration::from_secs(30),
            upload_auth_expiry: Duration::from_secs(3600), // 1 hour
        }
    }
}

impl ClientOptions {
    /// Overlay `vod.*` keys from a config snapshot onto the defaults.
    pub fn from_config(config: &VodConfigSnapshot) -> VodResult<Self> {
        let mut options = Self::default();

        if let Some(host) = config.get_string("vod.host") {
            options.host = host;
        }
        if let Some(scheme) = config.get_string("vod.scheme") {
            options.scheme = scheme;
        }
        if let Some(version) = config.get_string("vod.version") {
            options.version = version;
        }
        if config.get("vod.timeout").is_some() {
            options.timeout = config
                .get_duration("vod.timeout")
                .ok_or_else(|| VodError::bad_request("vod.timeout is not a valid duration"))?;
        }
        if config.get("vod.upload_auth_expiry").is_some() {
            options.upload_auth_expiry = config
                .get_duration("vod.upload_auth_expiry")
                .ok_or_else(|| {
                    VodError::bad_request("vod.upload_auth_expiry is not a valid duration")
                })?;
        }

        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> VodResult<()> {
        if self.host.trim().is_empty() {
            return Err(VodError::bad_request("host cannot be empty"));
        }
        if self.scheme != "https" && self.scheme != "http" {
            return Err(VodError::bad_request(format!(
                "unsupported scheme '{}'",
                self.scheme
            )));
        }
        if self.version.trim().is_empty() {
            return Err(VodError::bad_request("version cannot be empty"));
        }
        Ok(())
    }

    /// Base URL of the OpenAPI endpoint, e.g. `https://vod.volcengineapi.com`.
    pub fn endpoint(&self) -> String {
        format!("{}://{}", self.scheme, self.host)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = scheme.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_upload_auth_expiry(mut self, expiry: Duration) -> Self {
        self.upload_auth_expiry = expiry;
        self
    }
}
