//! # ovh-core
//!
//! Core types and utilities for managing OVHcloud resources.
//!
//! This crate provides the shared error type, the HTTP service client, client
//! configuration and the lifecycle building blocks (identifier format, task
//! waiting, resource trait) used by the API-specific crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status code mapping
//! - [`client`] - HTTP service client, retry policy and endpoint paths
//! - [`config`] - Configuration structures for OVHcloud clients
//! - [`types`] - OVHcloud API endpoints
//! - [`identifier`] - Service identifier format checks
//! - [`task`] - Bounded polling of asynchronous server-side operations
//! - [`resource`] - Resource lifecycle trait and attribute schema

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod identifier;
pub mod resource;
pub mod task;
pub mod types;

// Re-export commonly used types
pub use error::{Error, Result};
