//! Gateway trait definition

use crate::error::GatewayResult;
use async_trait::async_trait;
use plancks_types::{Node, Service, ServiceId, ServiceRequest, Task, TaskFilter};

/// Access to the cluster control plane
///
/// Implementations own their connection; callers share one handle through
/// `Arc<dyn ClusterGateway>` instead of connecting per call.
#[async_trait]
pub trait ClusterGateway: Send + Sync {
    /// List all services
    async fn list_services(&self) -> GatewayResult<Vec<Service>>;

    /// List all nodes
    async fn list_nodes(&self) -> GatewayResult<Vec<Node>>;

    /// List tasks matching a filter
    async fn list_tasks(&self, filter: &TaskFilter) -> GatewayResult<Vec<Task>>;

    /// Create a replicated service
    async fn create_service(&self, request: &ServiceRequest) -> GatewayResult<ServiceId>;

    /// Remove a service by ID
    async fn remove_service(&self, id: &ServiceId) -> GatewayResult<()>;
}
