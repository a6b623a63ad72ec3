//! Purchase and termination flows of services bought through an order.

use crate::client::OrderClient;
use crate::models::{CheckoutRequest, CreateCartRequest, Order, OrderRequest, OrderStatus};
use crate::Result;
use async_trait::async_trait;
use ovh_core::error::STATUS_ALREADY_TERMINATING;
use ovh_core::task::{wait_for_task, PollPolicy, TaskPoller, TaskSnapshot, TaskStatus};
use ovh_core::Error;
use tracing::{debug, info};

/// Default delay between two order status polls.
pub const ORDER_POLL_INTERVAL_SECS: u64 = 30;

/// Default number of order status polls.
pub const ORDER_POLL_ATTEMPTS: u32 = 120;

/// Default polling policy for order delivery.
#[must_use]
pub const fn default_order_policy() -> PollPolicy {
    PollPolicy::new(
        ORDER_POLL_ATTEMPTS,
        std::time::Duration::from_secs(ORDER_POLL_INTERVAL_SECS),
    )
}

/// Polls the delivery status of orders; the task ID is the order ID.
#[derive(Clone)]
pub struct OrderDeliveryPoller {
    client: OrderClient,
}

impl OrderDeliveryPoller {
    /// Create a poller.
    #[must_use]
    pub const fn new(client: OrderClient) -> Self {
        Self { client }
    }
}

fn delivery_status(status: OrderStatus) -> TaskStatus {
    match status {
        OrderStatus::Delivered => TaskStatus::Done,
        OrderStatus::Cancelled | OrderStatus::Cancelling => TaskStatus::Cancelled,
        OrderStatus::NotPaid => TaskStatus::Error,
        OrderStatus::Checking
        | OrderStatus::Delivering
        | OrderStatus::DocumentsRequested
        | OrderStatus::Unknown => TaskStatus::Running,
    }
}

#[async_trait]
impl TaskPoller for OrderDeliveryPoller {
    async fn poll(&self, task_id: i64) -> Result<Option<TaskSnapshot>> {
        let status = self.client.get_order_status(task_id).await?;
        Ok(Some(TaskSnapshot {
            status: delivery_status(status),
            raw_status: status.as_str().to_string(),
        }))
    }
}

/// Buy `product` as described by `request` and wait for the order delivery.
///
/// # Errors
///
/// Returns any API error of the cart and checkout calls, [`Error::TaskFailed`]
/// if the order is cancelled or left unpaid, and [`Error::Timeout`] if it is
/// not delivered within `policy`.
pub async fn create_order(
    client: &OrderClient,
    product: &str,
    request: &OrderRequest,
    policy: PollPolicy,
) -> Result<Order> {
    let cart = client
        .create_cart(&CreateCartRequest {
            ovh_subsidiary: request.ovh_subsidiary.clone(),
            description: request.description.clone(),
        })
        .await?;
    debug!(cart_id = %cart.cart_id, product, "created cart");

    client.assign_cart(&cart.cart_id).await?;

    let item = client
        .add_cart_item(&cart.cart_id, product, &request.item_request())
        .await?;
    for configuration in &request.plan.configuration {
        client
            .configure_cart_item(&cart.cart_id, item.item_id, configuration)
            .await?;
    }

    for option in request.option_requests(item.item_id) {
        client
            .add_cart_option(&cart.cart_id, product, &option)
            .await?;
    }

    let order = client
        .checkout(&cart.cart_id, &CheckoutRequest::default())
        .await?;
    info!(order_id = order.order_id, product, "order checked out, waiting for delivery");

    let poller = OrderDeliveryPoller::new(client.clone());
    wait_for_task(
        &poller,
        &format!("order {}", order.order_id),
        order.order_id,
        policy,
    )
    .await?;

    Ok(order)
}

/// Two-step termination of a service: request a token, then confirm it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Termination: Send + Sync {
    /// Request termination and return the confirmation token.
    async fn terminate(&self, service_name: &str) -> Result<String>;

    /// Confirm termination with the token returned by [`Termination::terminate`].
    async fn confirm_termination(&self, service_name: &str, token: &str) -> Result<()>;
}

/// Returns true if a termination request failed because the service is
/// already gone or already being terminated.
#[must_use]
pub fn is_already_terminated(error: &Error) -> bool {
    matches!(
        error.status_code(),
        Some(404 | STATUS_ALREADY_TERMINATING)
    )
}

/// Terminate `service_name`, succeeding when it is already gone.
///
/// # Errors
///
/// Returns errors of the terminate call other than "already gone", and any
/// error of the confirmation call.
pub async fn terminate_service<T>(termination: &T, service_name: &str) -> Result<()>
where
    T: Termination + ?Sized,
{
    let token = match termination.terminate(service_name).await {
        Ok(token) => token,
        Err(err) if is_already_terminated(&err) => {
            info!(service_name, status = ?err.status_code(), "service already terminated");
            return Ok(());
        }
        Err(err) => return Err(err),
    };

    termination.confirm_termination(service_name, &token).await?;
    info!(service_name, "termination confirmed");
    Ok(())
}
