//! Data structures for the vRack API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// IP load balancer attached to a vRack.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VrackIpLoadbalancing {
    /// vRack service name.
    pub vrack: String,
    /// IP load balancer service name.
    pub ip_loadbalancing: String,
}

/// Body of `POST /vrack/{serviceName}/ipLoadbalancing`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AttachIpLoadbalancingRequest {
    /// IP load balancer to attach.
    pub ip_loadbalancing: String,
}

/// Asynchronous vRack task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VrackTask {
    /// Task identifier.
    pub id: i64,
    /// Function the task performs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,
    /// Task status (`init`, `todo`, `doing`, `done`, `error`, ...).
    pub status: String,
    /// vRack the task runs on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,
    /// Service the task is about.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_domain: Option<String>,
    /// Last status change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<DateTime<Utc>>,
    /// Planned execution date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub todo_date: Option<DateTime<Utc>>,
}
