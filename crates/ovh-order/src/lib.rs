//! Order API client, order lifecycle and service identifier resolution for OVHcloud.
//!
//! Provides typed structures and an asynchronous client for the `/order/cart` and
//! `/me/order` APIs, the purchase and termination flows shared by resources that
//! are bought through an order, and the resolution of the service name an order
//! delivered.

#![deny(missing_docs)]

pub mod client;
pub mod lifecycle;
pub mod models;
pub mod resolver;

pub use client::{OrderClient, OrderClientBuilder};
pub use lifecycle::{
    create_order, default_order_policy, is_already_terminated, terminate_service,
    OrderDeliveryPoller, Termination,
};
pub use models::{
    Order, OrderDetail, OrderDetailOperation, OrderPlan, OrderRequest, OrderState, OrderStatus,
    PlanConfiguration,
};
pub use resolver::{find_order, parse_order_id, resolve_service_name, OrderLookup, ResolvedOrder};

/// Convenient result alias that reuses the shared OVHcloud error type.
pub type Result<T> = ovh_core::Result<T>;
