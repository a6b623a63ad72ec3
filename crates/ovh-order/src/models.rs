//! Order API models and order related resource attributes.

use chrono::{DateTime, Utc};
use ovh_core::resource::{AttributeSchema, AttributeType, Presence};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Shopping cart as returned by `POST /order/cart`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderCart {
    /// Cart identifier.
    pub cart_id: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Expiration of the cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire: Option<DateTime<Utc>>,
    /// Whether the cart has been checked out.
    #[serde(default)]
    pub read_only: bool,
    /// Item identifiers.
    #[serde(default)]
    pub items: Vec<i64>,
}

/// Body of `POST /order/cart`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CreateCartRequest {
    /// Subsidiary the order is placed with (FR, GB, US, ...).
    pub ovh_subsidiary: String,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Item of a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderCartItem {
    /// Item identifier.
    pub item_id: i64,
    /// Owning cart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_id: Option<String>,
    /// Product identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
    /// Item settings (plan code, pricing mode, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
}

/// Body of `POST /order/cart/{cartId}/{product}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    /// Plan code.
    pub plan_code: String,
    /// Billing duration (ISO 8601, e.g. `P1M`).
    pub duration: String,
    /// Pricing mode.
    pub pricing_mode: String,
    /// Quantity.
    pub quantity: u32,
    /// Catalog the plan comes from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_name: Option<String>,
}

/// Body of `POST /order/cart/{cartId}/{product}/options`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AddCartOptionRequest {
    /// Item the option attaches to.
    pub item_id: i64,
    /// Plan code of the option.
    pub plan_code: String,
    /// Billing duration.
    pub duration: String,
    /// Pricing mode.
    pub pricing_mode: String,
    /// Quantity.
    pub quantity: u32,
}

/// Body of `POST /order/cart/{cartId}/item/{itemId}/configuration`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanConfiguration {
    /// Configuration label.
    pub label: String,
    /// Configuration value.
    pub value: String,
}

/// Body of `POST /order/cart/{cartId}/checkout`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    /// Pay with the account's preferred payment method.
    pub auto_pay_with_preferred_payment_method: bool,
    /// Waive the retractation period.
    pub waive_retractation_period: bool,
}

impl Default for CheckoutRequest {
    fn default() -> Self {
        Self {
            auto_pay_with_preferred_payment_method: true,
            waive_retractation_period: false,
        }
    }
}

/// Purchase order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier.
    pub order_id: i64,
    /// Creation date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Expiration date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<DateTime<Utc>>,
    /// Order page URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Invoice URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    /// Price breakdown (kept as raw JSON).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prices: Option<Value>,
}

/// One line of an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    /// Detail identifier.
    pub order_detail_id: i64,
    /// Service the line is about; `*` when not known at order time.
    pub domain: String,
    /// Line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Quantity (serde_json::Value to accept numbers and numeric strings).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Value>,
}

/// Resource touched by an order operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationResource {
    /// Resource name (the service name once delivered).
    pub name: String,
    /// Resource state.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Resource type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub resource_type: Option<String>,
}

/// Delivery operation recorded on an order detail.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailOperation {
    /// Operation identifier.
    pub id: i64,
    /// Operation status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Operation type.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub operation_type: Option<String>,
    /// Resource delivered by the operation.
    pub resource: OperationResource,
}

/// Processing status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrderStatus {
    /// Payment is being checked
    Checking,
    /// Services are being delivered
    Delivering,
    /// Everything was delivered
    Delivered,
    /// Cancellation in progress
    Cancelling,
    /// Order cancelled
    Cancelled,
    /// Waiting for documents
    DocumentsRequested,
    /// Order not paid
    NotPaid,
    /// Status not known
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// Status name as used by the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Checking => "checking",
            Self::Delivering => "delivering",
            Self::Delivered => "delivered",
            Self::Cancelling => "cancelling",
            Self::Cancelled => "cancelled",
            Self::DocumentsRequested => "documentsRequested",
            Self::NotPaid => "notPaid",
            Self::Unknown => "unknown",
        }
    }
}

/// Plan to order, as configured on a resource.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderPlan {
    /// Plan code.
    pub plan_code: String,
    /// Billing duration.
    pub duration: String,
    /// Pricing mode.
    pub pricing_mode: String,
    /// Catalog name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_name: Option<String>,
    /// Item configurations.
    #[serde(default)]
    pub configuration: Vec<PlanConfiguration>,
}

/// Everything needed to purchase a service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderRequest {
    /// Subsidiary the order is placed with.
    pub ovh_subsidiary: String,
    /// Cart description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Main plan.
    pub plan: OrderPlan,
    /// Additional plan options.
    #[serde(default)]
    pub plan_options: Vec<OrderPlan>,
}

impl OrderRequest {
    /// Build the item request for the main plan.
    #[must_use]
    pub fn item_request(&self) -> AddCartItemRequest {
        AddCartItemRequest {
            plan_code: self.plan.plan_code.clone(),
            duration: self.plan.duration.clone(),
            pricing_mode: self.plan.pricing_mode.clone(),
            quantity: 1,
            catalog_name: self.plan.catalog_name.clone(),
        }
    }

    /// Build the option requests attached to `item_id`.
    #[must_use]
    pub fn option_requests(&self, item_id: i64) -> Vec<AddCartOptionRequest> {
        self.plan_options
            .iter()
            .map(|option| AddCartOptionRequest {
                item_id,
                plan_code: option.plan_code.clone(),
                duration: option.duration.clone(),
                pricing_mode: option.pricing_mode.clone(),
                quantity: 1,
            })
            .collect()
    }
}

/// Computed `order` attribute of resources bought through an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderState {
    /// Order identifier.
    pub order_id: i64,
    /// Creation date.
    pub date: Option<DateTime<Utc>>,
    /// Expiration date.
    pub expiration_date: Option<DateTime<Utc>>,
    /// Order lines.
    pub details: Vec<OrderDetail>,
}

impl OrderState {
    /// Build the state from an order and its lines.
    #[must_use]
    pub fn new(order: &Order, details: &[OrderDetail]) -> Self {
        Self {
            order_id: order.order_id,
            date: order.date,
            expiration_date: order.expiration_date,
            details: details.to_vec(),
        }
    }

    /// Attribute value: a single-element list holding the order block.
    #[must_use]
    pub fn to_attribute(&self) -> Value {
        let details: Vec<Value> = self
            .details
            .iter()
            .map(|detail| {
                json!({
                    "order_detail_id": detail.order_detail_id,
                    "domain": detail.domain,
                    "description": detail.description,
                    "quantity": detail.quantity.as_ref().map(quantity_string),
                })
            })
            .collect();

        json!([{
            "order_id": self.order_id,
            "date": self.date.map(|d| d.to_rfc3339()),
            "expiration_date": self.expiration_date.map(|d| d.to_rfc3339()),
            "details": details,
        }])
    }
}

fn quantity_string(quantity: &Value) -> String {
    match quantity {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `ovh_subsidiary` attribute.
pub const OVH_SUBSIDIARY_ATTRIBUTE: AttributeSchema =
    AttributeSchema::new("ovh_subsidiary", AttributeType::String, Presence::Required).force_new();
/// `plan` attribute.
pub const PLAN_ATTRIBUTE: AttributeSchema =
    AttributeSchema::new("plan", AttributeType::List, Presence::Required).force_new();
/// `plan_option` attribute.
pub const PLAN_OPTION_ATTRIBUTE: AttributeSchema =
    AttributeSchema::new("plan_option", AttributeType::List, Presence::Optional).force_new();
/// Computed `order` attribute.
pub const ORDER_ATTRIBUTE: AttributeSchema =
    AttributeSchema::new("order", AttributeType::List, Presence::Computed);
