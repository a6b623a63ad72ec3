//! Asynchronous vRack client implementation.

use crate::models::{AttachIpLoadbalancingRequest, VrackIpLoadbalancing, VrackTask};
use crate::Result;
use ovh_core::client::{
    ClientConfig, Endpoint, RetryPolicy, ServiceClient, ServiceClientBuilder,
    VRACK_DEFAULT_TIMEOUT,
};
use ovh_core::config::OvhClientConfig;
use ovh_core::types::ApiFamily;
use reqwest::Method;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("ovh-vrack/", env!("CARGO_PKG_VERSION"));

/// Builder for [`VrackClient`].
#[derive(Debug, Clone)]
pub struct VrackClientBuilder {
    inner: ServiceClientBuilder,
}

impl VrackClientBuilder {
    /// Create a builder for the specified base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(
            ApiFamily::Vrack,
            base_url,
            Duration::from_secs(VRACK_DEFAULT_TIMEOUT),
        )?
        .with_user_agent(USER_AGENT);

        Ok(Self { inner: builder })
    }

    /// Create a builder from a provider configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured endpoint cannot be resolved.
    pub fn from_config(config: &OvhClientConfig) -> Result<Self> {
        let builder =
            ServiceClientBuilder::from_config(ApiFamily::Vrack, config)?.with_user_agent(USER_AGENT);
        Ok(Self { inner: builder })
    }

    /// Override the retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.inner = self.inner.with_retry_policy(retry);
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_http_config(config);
        self
    }

    /// Configure the OAuth2 access token.
    #[must_use]
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.with_access_token(token);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn build(self) -> Result<VrackClient> {
        let inner = self.inner.build()?;
        Ok(VrackClient { inner })
    }
}

/// Asynchronous vRack client.
#[derive(Clone)]
pub struct VrackClient {
    inner: ServiceClient,
}

impl VrackClient {
    /// Construct a client directly from the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        VrackClientBuilder::new(base_url)?.build()
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// Attach an IP load balancer to a vRack.
    pub async fn attach_ip_loadbalancing(
        &self,
        service_name: &str,
        request: &AttachIpLoadbalancingRequest,
    ) -> Result<VrackTask> {
        let endpoint = vrack_endpoint(service_name).push("ipLoadbalancing");
        self.inner
            .send_json(Method::POST, &endpoint, Some(request))
            .await
    }

    /// Fetch an IP load balancer attachment.
    pub async fn get_ip_loadbalancing(
        &self,
        service_name: &str,
        ip_loadbalancing: &str,
    ) -> Result<VrackIpLoadbalancing> {
        self.inner
            .get(&attachment_endpoint(service_name, ip_loadbalancing))
            .await
    }

    /// Detach an IP load balancer from a vRack.
    pub async fn detach_ip_loadbalancing(
        &self,
        service_name: &str,
        ip_loadbalancing: &str,
    ) -> Result<VrackTask> {
        self.inner
            .send_json::<(), _>(
                Method::DELETE,
                &attachment_endpoint(service_name, ip_loadbalancing),
                None,
            )
            .await
    }

    /// Fetch a vRack task.
    pub async fn get_task(&self, service_name: &str, task_id: i64) -> Result<VrackTask> {
        self.inner
            .get(&vrack_endpoint(service_name).push("task").push(task_id))
            .await
    }
}

fn vrack_endpoint(service_name: &str) -> Endpoint {
    Endpoint::new(["vrack", service_name])
}

fn attachment_endpoint(service_name: &str, ip_loadbalancing: &str) -> Endpoint {
    vrack_endpoint(service_name)
        .push("ipLoadbalancing")
        .push(ip_loadbalancing)
}
