//! Resolution of the service name delivered by an order.
//!
//! Resources bought through an order are identified by their order ID. The
//! service name is read from the first order line; in some regions that line
//! only carries a placeholder (`*`), and the real name has to be found in the
//! delivery operations of the line.

use crate::client::OrderClient;
use crate::models::{Order, OrderDetail, OrderDetailOperation};
use crate::Result;
use async_trait::async_trait;
use ovh_core::identifier::IdentifierFormat;
use ovh_core::Error;
use tracing::{debug, warn};

/// Read access to orders, their lines and delivery operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderLookup: Send + Sync {
    /// Fetch an order.
    async fn order(&self, order_id: i64) -> Result<Order>;

    /// Fetch every line of an order, in API order.
    async fn order_details(&self, order_id: i64) -> Result<Vec<OrderDetail>>;

    /// Fetch every delivery operation of an order line, in API order.
    async fn order_detail_operations(
        &self,
        order_id: i64,
        detail_id: i64,
    ) -> Result<Vec<OrderDetailOperation>>;
}

#[async_trait]
impl OrderLookup for OrderClient {
    async fn order(&self, order_id: i64) -> Result<Order> {
        self.get_order(order_id).await
    }

    async fn order_details(&self, order_id: i64) -> Result<Vec<OrderDetail>> {
        let ids = self.list_order_details(order_id).await?;
        let mut details = Vec::with_capacity(ids.len());
        for detail_id in ids {
            details.push(self.get_order_detail(order_id, detail_id).await?);
        }
        Ok(details)
    }

    async fn order_detail_operations(
        &self,
        order_id: i64,
        detail_id: i64,
    ) -> Result<Vec<OrderDetailOperation>> {
        let ids = self.list_order_detail_operations(order_id, detail_id).await?;
        let mut operations = Vec::with_capacity(ids.len());
        for operation_id in ids {
            operations.push(
                self.get_order_detail_operation(order_id, detail_id, operation_id)
                    .await?,
            );
        }
        Ok(operations)
    }
}

/// An order together with its lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedOrder {
    /// The order
    pub order: Order,
    /// Its lines, in API order
    pub details: Vec<OrderDetail>,
}

impl ResolvedOrder {
    /// First order line, which names the delivered service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InternalError`] if the order has no line.
    pub fn first_detail(&self) -> Result<&OrderDetail> {
        self.details
            .first()
            .ok_or_else(|| no_details(self.order.order_id))
    }
}

fn no_details(order_id: i64) -> Error {
    Error::InternalError(format!("order {order_id} has no order details"))
}

/// Parse a resource ID holding an order ID.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] if `id` is not a positive integer.
pub fn parse_order_id(id: &str) -> Result<i64> {
    match id.trim().parse::<i64>() {
        Ok(order_id) if order_id > 0 => Ok(order_id),
        Ok(_) => Err(Error::InvalidRequest(format!(
            "order id `{id}` must be positive"
        ))),
        Err(err) => Err(Error::InvalidRequest(format!(
            "could not parse order id `{id}`: {err}"
        ))),
    }
}

/// Look up an order and its lines.
///
/// Returns `None` only when the order itself is not found; a missing or
/// failing line lookup is an error.
///
/// # Errors
///
/// Propagates lookup errors other than a missing order, and fails with
/// [`Error::InternalError`] when the order has no line.
pub async fn find_order<L>(lookup: &L, order_id: i64) -> Result<Option<ResolvedOrder>>
where
    L: OrderLookup + ?Sized,
{
    let order = match lookup.order(order_id).await {
        Ok(order) => order,
        Err(err) if err.is_not_found() => return Ok(None),
        Err(err) => return Err(err),
    };
    let details = lookup.order_details(order_id).await?;
    if details.is_empty() {
        return Err(no_details(order_id));
    }
    Ok(Some(ResolvedOrder { order, details }))
}

/// Determine the service name delivered by `resolved`.
///
/// The first line's domain is returned as is when it has the expected
/// `format`. Otherwise the line's operations are fetched once and the first
/// resource name with that format wins. When nothing matches, the domain is
/// returned unchanged and a warning is logged.
///
/// # Errors
///
/// Propagates errors of the operations lookup, and fails when the order has
/// no line.
pub async fn resolve_service_name<L>(
    lookup: &L,
    resolved: &ResolvedOrder,
    format: IdentifierFormat,
) -> Result<String>
where
    L: OrderLookup + ?Sized,
{
    let detail = resolved.first_detail()?;
    if format.matches(&detail.domain) {
        return Ok(detail.domain.clone());
    }

    let order_id = resolved.order.order_id;
    debug!(
        order_id,
        detail_id = detail.order_detail_id,
        domain = %detail.domain,
        "order domain is not a service name, looking up operations"
    );
    let operations = lookup
        .order_detail_operations(order_id, detail.order_detail_id)
        .await
        .map_err(|err| err.context("could not read order details operations"))?;

    if let Some(operation) = operations
        .into_iter()
        .find(|operation| format.matches(&operation.resource.name))
    {
        return Ok(operation.resource.name);
    }

    warn!(
        order_id,
        domain = %detail.domain,
        "no order operation names a service, keeping the order domain"
    );
    Ok(detail.domain.clone())
}
