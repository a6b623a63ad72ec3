//! Configuration structures for OVHcloud clients.
//!
//! This module provides the provider-level configuration: which API endpoint to
//! talk to, how to authenticate, and transport limits.

use crate::types::{OvhEndpoint, DEFAULT_ENDPOINT};
use crate::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use url::Url;
use validator::{Validate, ValidationError};

/// Environment variable naming the API endpoint.
pub const ENV_ENDPOINT: &str = "OVH_ENDPOINT";
/// Environment variable holding the OAuth2 access token.
pub const ENV_ACCESS_TOKEN: &str = "OVH_ACCESS_TOKEN";
/// Environment variable overriding the request timeout in seconds.
pub const ENV_REQUEST_TIMEOUT: &str = "OVH_REQUEST_TIMEOUT";

/// Configuration for an OVHcloud client instance.
#[derive(Clone, Serialize, Deserialize, Validate)]
pub struct OvhClientConfig {
    /// Endpoint name (`ovh-eu`, `ovh-ca`, ...) or a custom API base URL
    #[validate(custom(function = "validate_endpoint"))]
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// OAuth2 access token sent as a bearer token
    #[serde(default, skip_serializing)]
    pub access_token: Option<String>,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Maximum number of retry attempts for transient failures
    #[validate(range(min = 0, max = 10))]
    #[serde(default)]
    pub max_retries: u32,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

const fn default_tls_verify() -> bool {
    true
}

const fn default_request_timeout_secs() -> u64 {
    30
}

fn validate_endpoint(value: &str) -> Result<(), ValidationError> {
    if value.parse::<OvhEndpoint>().is_ok() {
        return Ok(());
    }
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::new("endpoint")),
    }
}

impl OvhClientConfig {
    /// Create a new client configuration for an endpoint name or URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is neither a known name nor a valid URL.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            endpoint: endpoint.into(),
            ..Self::default()
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Build a configuration from `OVH_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable holds an invalid value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(endpoint) = lookup(ENV_ENDPOINT).filter(|v| !v.is_empty()) {
            config.endpoint = endpoint;
        }
        config.access_token = lookup(ENV_ACCESS_TOKEN).filter(|v| !v.is_empty());
        if let Some(timeout) = lookup(ENV_REQUEST_TIMEOUT) {
            config.request_timeout_secs = timeout.parse().map_err(|_| {
                Error::ConfigError(format!("{ENV_REQUEST_TIMEOUT} is not a number: {timeout}"))
            })?;
        }

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Set the OAuth2 access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set maximum retry attempts.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolve the configured endpoint into the API base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint cannot be resolved.
    pub fn base_url(&self) -> Result<Url, Error> {
        let raw = match self.endpoint.parse::<OvhEndpoint>() {
            Ok(named) => named.base_url().to_string(),
            Err(_) => self.endpoint.clone(),
        };
        Url::parse(&raw).map_err(|e| Error::ConfigError(format!("Invalid API endpoint: {e}")))
    }
}

impl Default for OvhClientConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            access_token: None,
            tls_verify: default_tls_verify(),
            request_timeout_secs: default_request_timeout_secs(),
            max_retries: 0,
        }
    }
}

impl fmt::Debug for OvhClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OvhClientConfig")
            .field("endpoint", &self.endpoint)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .field("tls_verify", &self.tls_verify)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}
