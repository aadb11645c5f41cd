//! Plancks Gateway - Cluster access and service control
//!
//! This crate provides:
//! - [`ClusterGateway`]: the seam between Plancks and the cluster control plane
//! - [`DockerGateway`]: Engine API implementation over HTTP
//! - [`InMemoryCluster`]: map-backed implementation for tests and development
//! - [`ServiceController`]: list/reconcile, create and remove services

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod config;
pub mod controller;
pub mod docker;
pub mod error;
pub mod memory;
pub mod traits;

pub use config::GatewayConfig;
pub use controller::ServiceController;
pub use docker::DockerGateway;
pub use error::{GatewayError, GatewayResult};
pub use memory::InMemoryCluster;
pub use traits::ClusterGateway;
