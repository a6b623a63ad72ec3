//! Asynchronous Order API client implementation.

use crate::models::{
    AddCartItemRequest, AddCartOptionRequest, CheckoutRequest, CreateCartRequest, Order,
    OrderCart, OrderCartItem, OrderDetail, OrderDetailOperation, OrderStatus, PlanConfiguration,
};
use crate::Result;
use ovh_core::client::{
    ClientConfig, Endpoint, RetryPolicy, ServiceClient, ServiceClientBuilder,
    ORDER_DEFAULT_TIMEOUT,
};
use ovh_core::config::OvhClientConfig;
use ovh_core::types::ApiFamily;
use reqwest::Method;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = concat!("ovh-order/", env!("CARGO_PKG_VERSION"));

/// Builder for [`OrderClient`].
#[derive(Debug, Clone)]
pub struct OrderClientBuilder {
    inner: ServiceClientBuilder,
}

impl OrderClientBuilder {
    /// Create a builder for the specified base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(
            ApiFamily::Order,
            base_url,
            Duration::from_secs(ORDER_DEFAULT_TIMEOUT),
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
            ServiceClientBuilder::from_config(ApiFamily::Order, config)?.with_user_agent(USER_AGENT);
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
    pub fn build(self) -> Result<OrderClient> {
        let inner = self.inner.build()?;
        Ok(OrderClient { inner })
    }
}

/// Asynchronous Order API client.
#[derive(Clone)]
pub struct OrderClient {
    inner: ServiceClient,
}

impl OrderClient {
    /// Construct a client directly from the base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        OrderClientBuilder::new(base_url)?.build()
    }

    /// Reuse the connection pool and credentials of another client.
    #[must_use]
    pub fn from_service_client(client: &ServiceClient) -> Self {
        Self {
            inner: client.for_family(ApiFamily::Order),
        }
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        self.inner.base_url()
    }

    /// Create a new cart.
    pub async fn create_cart(&self, request: &CreateCartRequest) -> Result<OrderCart> {
        let endpoint = Endpoint::new(["order", "cart"]);
        self.inner
            .send_json(Method::POST, &endpoint, Some(request))
            .await
    }

    /// Assign a cart to the authenticated account.
    pub async fn assign_cart(&self, cart_id: &str) -> Result<()> {
        let endpoint = cart_endpoint(cart_id).push("assign");
        self.inner
            .send_unit::<()>(Method::POST, &endpoint, None)
            .await
    }

    /// Add a plan of `product` to a cart.
    pub async fn add_cart_item(
        &self,
        cart_id: &str,
        product: &str,
        request: &AddCartItemRequest,
    ) -> Result<OrderCartItem> {
        let endpoint = cart_endpoint(cart_id).push(product);
        self.inner
            .send_json(Method::POST, &endpoint, Some(request))
            .await
    }

    /// Attach a configuration to a cart item.
    pub async fn configure_cart_item(
        &self,
        cart_id: &str,
        item_id: i64,
        configuration: &PlanConfiguration,
    ) -> Result<()> {
        let endpoint = cart_endpoint(cart_id)
            .push("item")
            .push(item_id)
            .push("configuration");
        self.inner
            .send_unit(Method::POST, &endpoint, Some(configuration))
            .await
    }

    /// Add a plan option of `product` to a cart.
    pub async fn add_cart_option(
        &self,
        cart_id: &str,
        product: &str,
        request: &AddCartOptionRequest,
    ) -> Result<OrderCartItem> {
        let endpoint = cart_endpoint(cart_id).push(product).push("options");
        self.inner
            .send_json(Method::POST, &endpoint, Some(request))
            .await
    }

    /// Check a cart out, turning it into an order.
    pub async fn checkout(&self, cart_id: &str, request: &CheckoutRequest) -> Result<Order> {
        let endpoint = cart_endpoint(cart_id).push("checkout");
        self.inner
            .send_json(Method::POST, &endpoint, Some(request))
            .await
    }

    /// Fetch an order.
    pub async fn get_order(&self, order_id: i64) -> Result<Order> {
        self.inner.get(&order_endpoint(order_id)).await
    }

    /// Fetch the processing status of an order.
    pub async fn get_order_status(&self, order_id: i64) -> Result<OrderStatus> {
        self.inner
            .get(&order_endpoint(order_id).push("status"))
            .await
    }

    /// List the detail identifiers of an order.
    pub async fn list_order_details(&self, order_id: i64) -> Result<Vec<i64>> {
        self.inner
            .get(&order_endpoint(order_id).push("details"))
            .await
    }

    /// Fetch one order detail.
    pub async fn get_order_detail(&self, order_id: i64, detail_id: i64) -> Result<OrderDetail> {
        self.inner
            .get(&order_endpoint(order_id).push("details").push(detail_id))
            .await
    }

    /// List the operation identifiers of an order detail.
    pub async fn list_order_detail_operations(
        &self,
        order_id: i64,
        detail_id: i64,
    ) -> Result<Vec<i64>> {
        let endpoint = order_endpoint(order_id)
            .push("details")
            .push(detail_id)
            .push("operations");
        self.inner.get(&endpoint).await
    }

    /// Fetch one operation of an order detail.
    pub async fn get_order_detail_operation(
        &self,
        order_id: i64,
        detail_id: i64,
        operation_id: i64,
    ) -> Result<OrderDetailOperation> {
        let endpoint = order_endpoint(order_id)
            .push("details")
            .push(detail_id)
            .push("operations")
            .push(operation_id);
        self.inner.get(&endpoint).await
    }
}

fn cart_endpoint(cart_id: &str) -> Endpoint {
    Endpoint::new(["order", "cart", cart_id])
}

fn order_endpoint(order_id: i64) -> Endpoint {
    Endpoint::new(["me", "order"]).push(order_id)
}
