//! Public Cloud project client and resource for OVHcloud.
//!
//! Provides typed structures and an asynchronous client for the `/cloud/project`
//! API, and the `ovh_cloud_project` resource that buys a project through an
//! order and manages it afterwards.

#![deny(missing_docs)]

pub mod client;
pub mod models;
pub mod resource;

pub use client::{CloudClient, CloudClientBuilder};
pub use models::{CloudProject, CloudProjectIam, CloudProjectUpdateRequest, TerminationToken};
pub use resource::{CloudProjectConfig, CloudProjectResource, CloudProjectState};

/// Convenient result alias that reuses the shared OVHcloud error type.
pub type Result<T> = ovh_core::Result<T>;
