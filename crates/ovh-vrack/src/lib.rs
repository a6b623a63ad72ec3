//! vRack client and IP load balancing attachment resource for OVHcloud.
//!
//! Provides typed structures and an asynchronous client for the `/vrack` API,
//! polling of vRack tasks, and the `ovh_vrack_iploadbalancing` resource that
//! attaches an IP load balancer to a vRack.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod resource;
pub mod task;

pub use client::{VrackClient, VrackClientBuilder};
pub use models::{AttachIpLoadbalancingRequest, VrackIpLoadbalancing, VrackTask};
pub use resource::{
    VrackIpLoadbalancingConfig, VrackIpLoadbalancingResource, VrackIpLoadbalancingState,
};
pub use task::{default_task_policy, wait_for_vrack_task, VrackTaskPoller};

/// Convenient result alias that reuses the shared OVHcloud error type.
pub type Result<T> = ovh_core::Result<T>;
