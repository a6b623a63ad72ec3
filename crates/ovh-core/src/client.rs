//! HTTP client utilities and retry logic.
//!
//! This module provides the shared [`ServiceClient`] used by every API crate,
//! its configuration, the retry policy and the [`Endpoint`] path type.

use crate::config::OvhClientConfig;
use crate::types::ApiFamily;
use crate::{Error, Result};
use reqwest::{Client, ClientBuilder, Method, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, info, warn};
use url::Url;

// API family timeout configurations (in seconds)

/// Default timeout for order requests
pub const ORDER_DEFAULT_TIMEOUT: u64 = 30;

/// Default timeout for cloud requests
pub const CLOUD_DEFAULT_TIMEOUT: u64 = 30;

/// Default timeout for vRack requests
pub const VRACK_DEFAULT_TIMEOUT: u64 = 20;

// Connection pool settings

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

// Retry settings

/// Default initial retry delay in milliseconds
pub const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Default maximum retry delay in milliseconds (for exponential backoff)
pub const DEFAULT_RETRY_MAX_DELAY_MS: u64 = 5000;

/// Retry policy with exponential backoff.
///
/// Only transient failures (timeouts, connection errors, 429 and 5xx answers)
/// of idempotent requests (`GET`, `PUT`, `DELETE`) are retried; a `POST` is
/// sent once whatever the policy. The default policy performs no retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retry attempts
    pub max_retries: u32,

    /// Initial delay before first retry
    pub initial_delay: Duration,

    /// Maximum delay between retries (cap for exponential backoff)
    pub max_delay: Duration,

    /// Backoff multiplier (typically 2 for exponential backoff)
    pub backoff_multiplier: u32,
}

impl RetryPolicy {
    /// Create a retry policy with no retries.
    #[must_use]
    pub const fn no_retry() -> Self {
        Self {
            max_retries: 0,
            initial_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            max_delay: Duration::from_millis(DEFAULT_RETRY_MAX_DELAY_MS),
            backoff_multiplier: 2,
        }
    }

    /// Set the maximum number of retries.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the initial delay.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = delay;
        self
    }

    /// Set the maximum delay.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Set the backoff multiplier.
    #[must_use]
    pub const fn with_backoff_multiplier(mut self, multiplier: u32) -> Self {
        self.backoff_multiplier = multiplier;
        self
    }

    /// Calculate delay for a given attempt number.
    ///
    /// Uses exponential backoff: delay = min(initial_delay * multiplier^(attempt-1), max_delay)
    #[must_use]
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        if attempt == 0 {
            return Duration::from_secs(0);
        }

        let multiplier = self.backoff_multiplier.saturating_pow(attempt - 1);
        let delay = self.initial_delay.saturating_mul(multiplier);

        std::cmp::min(delay, self.max_delay)
    }

    /// Check if retries are enabled.
    #[must_use]
    pub const fn has_retries(&self) -> bool {
        self.max_retries > 0
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::no_retry()
    }
}

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Retry policy
    pub retry_policy: RetryPolicy,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable request logging
    pub enable_logging: bool,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry_policy: RetryPolicy::no_retry(),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_logging: true,
            enable_compression: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable logging.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.enable_logging = enabled;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// API path made of individually escaped segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
}

impl Endpoint {
    /// Create an endpoint from its path segments.
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a segment.
    #[must_use]
    pub fn push(mut self, segment: impl ToString) -> Self {
        self.segments.push(segment.to_string());
        self
    }

    /// Raw (unescaped) path segments.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Join the endpoint onto an API base URL, escaping every segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot carry a path.
    pub fn resolve(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|()| Error::InvalidEndpoint(format!("`{base}` cannot be a base URL")))?
            .pop_if_empty()
            .extend(&self.segments);
        Ok(url)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

/// Builder for [`ServiceClient`].
#[derive(Debug, Clone)]
pub struct ServiceClientBuilder {
    family: ApiFamily,
    base_url: Url,
    http_config: ClientConfig,
    user_agent: Option<String>,
    access_token: Option<Arc<SecretString>>,
    tls_verify: bool,
}

impl ServiceClientBuilder {
    /// Create a builder for an API family served from `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(family: ApiFamily, base_url: impl AsRef<str>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url.as_ref())?;
        Ok(Self {
            family,
            base_url,
            http_config: ClientConfig::new().with_timeout(timeout),
            user_agent: None,
            access_token: None,
            tls_verify: true,
        })
    }

    /// Create a builder from a provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured endpoint cannot be resolved.
    pub fn from_config(family: ApiFamily, config: &OvhClientConfig) -> Result<Self> {
        let base_url = config.base_url()?;
        let http_config = ClientConfig::new()
            .with_timeout(config.timeout())
            .with_retry_policy(RetryPolicy::no_retry().with_max_retries(config.max_retries));

        let mut builder = Self {
            family,
            base_url,
            http_config,
            user_agent: None,
            access_token: None,
            tls_verify: config.tls_verify,
        };
        if let Some(token) = &config.access_token {
            builder = builder.with_access_token(token.clone());
        }
        Ok(builder)
    }

    /// Override the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Override the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.http_config.retry_policy = retry;
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Configure the OAuth2 access token sent as a bearer token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(Arc::new(SecretString::from(token.into())));
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be created.
    pub fn build(self) -> Result<ServiceClient> {
        let mut builder = ClientBuilder::new()
            .timeout(self.http_config.timeout)
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host)
            .gzip(self.http_config.enable_compression)
            .connect_timeout(Duration::from_secs(10));

        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent.clone());
        }

        if !self.tls_verify {
            warn!(family = %self.family, "TLS verification disabled for OVHcloud client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder.build().map_err(|err| {
            Error::ConfigError(format!(
                "Failed to build {} HTTP client: {err}",
                self.family.label()
            ))
        })?;

        Ok(ServiceClient {
            http,
            family: self.family,
            base_url: self.base_url,
            access_token: self.access_token,
            retry_policy: self.http_config.retry_policy,
            enable_logging: self.http_config.enable_logging,
        })
    }
}

/// Shared asynchronous HTTP client for one OVHcloud API family.
#[derive(Clone)]
pub struct ServiceClient {
    http: Client,
    family: ApiFamily,
    base_url: Url,
    access_token: Option<Arc<SecretString>>,
    retry_policy: RetryPolicy,
    enable_logging: bool,
}

impl ServiceClient {
    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Return the API family this client talks to.
    #[must_use]
    pub const fn family(&self) -> ApiFamily {
        self.family
    }

    /// Return a client for another API family sharing the same connection pool
    /// and credentials.
    #[must_use]
    pub fn for_family(&self, family: ApiFamily) -> Self {
        Self {
            family,
            ..self.clone()
        }
    }

    /// Send a GET request and decode the JSON answer.
    ///
    /// # Errors
    ///
    /// Returns the mapped API error wrapped with the verb and endpoint.
    pub async fn get<R>(&self, endpoint: &Endpoint) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.send_json::<(), R>(Method::GET, endpoint, None).await
    }

    /// Send a request with an optional JSON body and decode the JSON answer.
    ///
    /// # Errors
    ///
    /// Returns the mapped API error wrapped with the verb and endpoint.
    pub async fn send_json<B, R>(
        &self,
        method: Method,
        endpoint: &Endpoint,
        body: Option<&B>,
    ) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let verb = method.to_string();
        let response = self
            .execute(method, endpoint, body)
            .await
            .map_err(|err| err.for_request(&verb, endpoint.to_string()))?;

        response.json::<R>().await.map_err(|err| {
            Error::ParseError(format!(
                "Failed to parse {} response: {err}",
                self.family.label()
            ))
            .for_request(verb, endpoint.to_string())
        })
    }

    /// Send a request with an optional JSON body, ignoring the answer body.
    ///
    /// # Errors
    ///
    /// Returns the mapped API error wrapped with the verb and endpoint.
    pub async fn send_unit<B>(&self, method: Method, endpoint: &Endpoint, body: Option<&B>) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let verb = method.to_string();
        self.execute(method, endpoint, body)
            .await
            .map(drop)
            .map_err(|err| err.for_request(verb, endpoint.to_string()))
    }

    async fn execute<B>(&self, method: Method, endpoint: &Endpoint, body: Option<&B>) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let url = endpoint.resolve(&self.base_url)?;
        let mut attempt = 0;

        loop {
            let mut request = self
                .http
                .request(method.clone(), url.clone())
                .header("Accept", "application/json");
            if let Some(token) = &self.access_token {
                request = request.bearer_auth(token.expose_secret());
            }
            if let Some(payload) = body {
                request = request.json(payload);
            }

            if self.enable_logging {
                info!(family = %self.family, %method, %endpoint, attempt, "Sending OVHcloud request");
            }

            let error = match request.send().await {
                Ok(response) if response.status().is_success() => return Ok(response),
                Ok(response) => {
                    let status = response.status();
                    let text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unknown error".to_string());
                    map_status_to_error(self.family, status, &text)
                }
                Err(err) => Error::from(err),
            };

            if !is_transient(&error)
                || !is_idempotent(&method)
                || attempt >= self.retry_policy.max_retries
            {
                return Err(error);
            }

            attempt += 1;
            let delay = self.retry_policy.delay_for_attempt(attempt);
            debug!(%endpoint, ?delay, "Retrying OVHcloud request after transient failure");
            sleep(delay).await;
        }
    }
}

#[derive(Deserialize)]
struct ApiErrorBody {
    message: String,
}

fn is_idempotent(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::PUT | Method::DELETE)
}

const fn is_transient(error: &Error) -> bool {
    matches!(
        error,
        Error::Timeout(_) | Error::ServiceUnavailable(_) | Error::HttpError(_)
    )
}

fn map_status_to_error(family: ApiFamily, status: StatusCode, text: &str) -> Error {
    let message = serde_json::from_str::<ApiErrorBody>(text)
        .map(|body| body.message)
        .unwrap_or_else(|_| text.to_string());
    let label = family.label();

    match status {
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Error::InvalidRequest(format!("{label} authentication failed: {message}"))
        }
        StatusCode::TOO_MANY_REQUESTS
        | StatusCode::BAD_GATEWAY
        | StatusCode::SERVICE_UNAVAILABLE
        | StatusCode::GATEWAY_TIMEOUT => {
            Error::ServiceUnavailable(format!("{label} temporarily unavailable: {message}"))
        }
        status if status.is_server_error() => {
            Error::ServiceUnavailable(format!("{label} server error {status}: {message}"))
        }
        status => Error::ApiError {
            status: status.as_u16(),
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(server: &MockServer) -> ServiceClient {
        ServiceClientBuilder::new(ApiFamily::Cloud, server.uri(), Duration::from_secs(5))
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_retry_policy_defaults_to_no_retry() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 0);
        assert!(!policy.has_retries());
    }

    #[test]
    fn test_retry_policy_exponential_backoff() {
        let policy = RetryPolicy::no_retry()
            .with_max_retries(5)
            .with_initial_delay(Duration::from_millis(100))
            .with_backoff_multiplier(2)
            .with_max_delay(Duration::from_millis(500));

        assert!(policy.has_retries());
        assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(0));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(400));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_millis(500));
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::new()
            .with_timeout(Duration::from_secs(60))
            .with_pool_idle_timeout(Duration::from_secs(120))
            .with_pool_max_idle(20)
            .with_logging(false)
            .with_compression(false);

        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.retry_policy.max_retries, 0);
        assert_eq!(config.pool_idle_timeout, Duration::from_secs(120));
        assert_eq!(config.pool_max_idle_per_host, 20);
        assert!(!config.enable_logging);
        assert!(!config.enable_compression);
    }

    #[test]
    fn test_endpoint_resolve_escapes_segments() {
        let base = Url::parse("https://eu.api.ovh.com/1.0").unwrap();
        let endpoint = Endpoint::new(["cloud", "project"]).push("a b/c");
        let url = endpoint.resolve(&base).unwrap();
        assert_eq!(url.path(), "/1.0/cloud/project/a%20b%2Fc");
        assert_eq!(endpoint.to_string(), "/cloud/project/a b/c");
    }

    #[test]
    fn test_endpoint_resolve_on_root_base() {
        let base = Url::parse("http://127.0.0.1:8080").unwrap();
        let url = Endpoint::new(["me", "order"]).push(42).resolve(&base).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8080/me/order/42");
    }

    #[test]
    fn test_builder_from_config() {
        let config = OvhClientConfig::new("ovh-eu")
            .unwrap()
            .with_access_token("token")
            .with_max_retries(2);
        let client = ServiceClientBuilder::from_config(ApiFamily::Order, &config)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "https://eu.api.ovh.com/1.0");
        assert_eq!(client.family(), ApiFamily::Order);
        assert_eq!(client.for_family(ApiFamily::Vrack).family(), ApiFamily::Vrack);
    }

    #[tokio::test]
    async fn get_sends_bearer_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cloud/project/p1"))
            .and(header("Authorization", "Bearer token-123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ServiceClientBuilder::new(ApiFamily::Cloud, server.uri(), Duration::from_secs(5))
            .unwrap()
            .with_access_token("token-123")
            .build()
            .unwrap();
        let value: serde_json::Value = client
            .get(&Endpoint::new(["cloud", "project", "p1"]))
            .await
            .unwrap();
        assert_eq!(value["status"], "ok");
    }

    #[tokio::test]
    async fn not_found_is_wrapped_with_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/cloud/project/missing"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"message": "This service does not exist"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .get::<serde_json::Value>(&Endpoint::new(["cloud", "project", "missing"]))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(
            err.to_string(),
            "calling GET /cloud/project/missing: Not found: This service does not exist"
        );
    }

    #[tokio::test]
    async fn ovh_specific_status_is_preserved() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/cloud/project/p1/terminate"))
            .respond_with(
                ResponseTemplate::new(460).set_body_json(json!({"message": "Service is expired"})),
            )
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .send_unit::<()>(Method::POST, &Endpoint::new(["cloud", "project", "p1", "terminate"]), None)
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), Some(460));
        assert!(matches!(
            err.root(),
            Error::ApiError { message, .. } if message == "Service is expired"
        ));
    }

    #[tokio::test]
    async fn put_sends_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/cloud/project/p1"))
            .and(body_json(json!({"description": "demo"})))
            .respond_with(ResponseTemplate::new(200).set_body_string("null"))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .send_unit(
                Method::PUT,
                &Endpoint::new(["cloud", "project", "p1"]),
                Some(&json!({"description": "demo"})),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn transient_failures_are_not_retried_by_default() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vrack/pn-1"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .get::<serde_json::Value>(&Endpoint::new(["vrack", "pn-1"]))
            .await
            .unwrap_err();
        assert!(matches!(err.root(), Error::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn transient_failures_follow_retry_policy() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/vrack/pn-1"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/vrack/pn-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "pn-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let client = ServiceClientBuilder::new(ApiFamily::Vrack, server.uri(), Duration::from_secs(5))
            .unwrap()
            .with_retry_policy(
                RetryPolicy::no_retry()
                    .with_max_retries(1)
                    .with_initial_delay(Duration::from_millis(1)),
            )
            .build()
            .unwrap();
        let value: serde_json::Value = client.get(&Endpoint::new(["vrack", "pn-1"])).await.unwrap();
        assert_eq!(value["name"], "pn-1");
    }

    #[tokio::test]
    async fn post_is_never_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/order/cart/c1/checkout"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let client = ServiceClientBuilder::new(ApiFamily::Order, server.uri(), Duration::from_secs(5))
            .unwrap()
            .with_retry_policy(
                RetryPolicy::no_retry()
                    .with_max_retries(3)
                    .with_initial_delay(Duration::from_millis(1)),
            )
            .build()
            .unwrap();
        let err = client
            .send_json::<_, serde_json::Value>(
                Method::POST,
                &Endpoint::new(["order", "cart", "c1", "checkout"]),
                Some(&json!({})),
            )
            .await
            .unwrap_err();
        assert!(matches!(err.root(), Error::ServiceUnavailable(_)));
    }

    #[tokio::test]
    async fn client_errors_map_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/cloud/project/p1"))
            .respond_with(ResponseTemplate::new(400).set_body_string("plain failure"))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = client
            .send_unit(Method::PUT, &Endpoint::new(["cloud", "project", "p1"]), Some(&json!({})))
            .await
            .unwrap_err();
        assert_eq!(
            err.root(),
            &Error::ApiError {
                status: 400,
                message: "plain failure".to_string()
            }
        );
    }
}
