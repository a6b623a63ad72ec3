//! Asynchronous Public Cloud project client implementation.

use crate::models::{
    CloudProject, CloudProjectUpdateRequest, ConfirmTerminationRequest, TerminationToken,
};
use crate::Result;
use async_trait::async_trait;
use ovh_core::client::{
    ClientConfig, Endpoint, RetryPolicy, ServiceClient, ServiceClientBuilder,
    CLOUD_DEFAULT_TIMEOUT,
};
use ovh_core::config::OvhClientConfig;
use ovh_core::types::ApiFamily;
use ovh_core::Error;
use ovh_order::Termination;
use reqwest::Method;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("ovh-cloud/", env!("CARGO_PKG_VERSION"));

/// Builder for [`CloudClient`].
#[derive(Debug, Clone)]
pub struct CloudClientBuilder {
    inner: ServiceClientBuilder,
}

impl CloudClientBuilder {
    /// Create a builder for the specified base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(
            ApiFamily::Cloud,
            base_url,
            Duration::from_secs(CLOUD_DEFAULT_TIMEOUT),
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
            ServiceClientBuilder::from_config(ApiFamily::Cloud, config)?.with_user_agent(USER_AGENT);
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
    pub fn build(self) -> Result<CloudClient> {
        let inner = self.inner.build()?;
        Ok(CloudClient { inner })
    }
}

/// Asynchronous Public Cloud project client.
#[derive(Clone)]
pub struct CloudClient {
    inner: ServiceClient,
}

impl CloudClient {
    /// Construct a client directly from the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        CloudClientBuilder::new(base_url)?.build()
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// Return the underlying service client.
    #[must_use]
    pub const fn service_client(&self) -> &ServiceClient {
        &self.inner
    }

    /// Fetch a project.
    pub async fn get_project(&self, service_name: &str) -> Result<CloudProject> {
        self.inner.get(&project_endpoint(service_name)).await
    }

    /// Update a project.
    pub async fn update_project(
        &self,
        service_name: &str,
        request: &CloudProjectUpdateRequest,
    ) -> Result<()> {
        self.inner
            .send_unit(Method::PUT, &project_endpoint(service_name), Some(request))
            .await
    }

    /// Request the termination of a project and return the confirmation token.
    pub async fn terminate_project(&self, service_name: &str) -> Result<String> {
        let endpoint = project_endpoint(service_name).push("terminate");
        let token: Option<TerminationToken> = self
            .inner
            .send_json::<(), _>(Method::POST, &endpoint, None)
            .await?;

        token.map(TerminationToken::into_token).ok_or_else(|| {
            Error::ParseError(format!("{endpoint} answered without a termination token"))
        })
    }

    /// Confirm the termination of a project.
    pub async fn confirm_project_termination(&self, service_name: &str, token: &str) -> Result<()> {
        let endpoint = project_endpoint(service_name).push("confirmTermination");
        let request = ConfirmTerminationRequest {
            token: token.to_string(),
        };
        self.inner
            .send_unit(Method::POST, &endpoint, Some(&request))
            .await
    }
}

#[async_trait]
impl Termination for CloudClient {
    async fn terminate(&self, service_name: &str) -> Result<String> {
        self.terminate_project(service_name).await
    }

    async fn confirm_termination(&self, service_name: &str, token: &str) -> Result<()> {
        self.confirm_project_termination(service_name, token).await
    }
}

fn project_endpoint(service_name: &str) -> Endpoint {
    Endpoint::new(["cloud", "project", service_name])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PROJECT: &str = "aabbccddeeff40000000000000000000";

    fn test_client(server: &MockServer) -> CloudClient {
        CloudClient::new(server.uri()).unwrap()
    }

    #[tokio::test]
    async fn get_project_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/cloud/project/{PROJECT}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "projectId": PROJECT,
                "projectName": "demo",
                "status": "ok",
                "access": "full",
                "iam": {"id": "1", "urn": format!("urn:v1:eu:resource:publicCloudProject:{PROJECT}")}
            })))
            .mount(&server)
            .await;

        let project = test_client(&server).get_project(PROJECT).await.unwrap();
        assert_eq!(project.project_name.as_deref(), Some("demo"));
        assert!(project.urn().unwrap().ends_with(PROJECT));
    }

    #[tokio::test]
    async fn update_project_puts_description() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("/cloud/project/{PROJECT}").as_str()))
            .and(body_json(json!({"description": "prod"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server)
            .update_project(
                PROJECT,
                &CloudProjectUpdateRequest {
                    description: Some("prod".to_string()),
                },
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn terminate_returns_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/cloud/project/{PROJECT}/terminate").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "tok-1"})))
            .mount(&server)
            .await;

        let token = test_client(&server).terminate_project(PROJECT).await.unwrap();
        assert_eq!(token, "tok-1");
    }

    #[tokio::test]
    async fn terminate_without_token_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/cloud/project/{PROJECT}/terminate").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(null)))
            .mount(&server)
            .await;

        let err = test_client(&server)
            .terminate_project(PROJECT)
            .await
            .unwrap_err();
        assert_eq!(err.error_code(), "PARSE_ERROR");
    }

    #[tokio::test]
    async fn terminate_already_terminating_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/cloud/project/{PROJECT}/terminate").as_str()))
            .respond_with(
                ResponseTemplate::new(460)
                    .set_body_json(json!({"message": "This service is expired"})),
            )
            .mount(&server)
            .await;

        let err = test_client(&server)
            .terminate_project(PROJECT)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), Some(460));
        assert!(err
            .to_string()
            .starts_with(&format!("calling POST /cloud/project/{PROJECT}/terminate")));
    }
}
