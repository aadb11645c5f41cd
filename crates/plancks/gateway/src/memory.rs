//! In-memory gateway implementation

use crate::error::{GatewayError, GatewayResult};
use crate::traits::ClusterGateway;
use async_trait::async_trait;
use plancks_types::{
    Node, NodeId, NodeStatus, Service, ServiceId, ServiceMode, ServiceRequest, Task, TaskFilter,
};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cluster held in memory, for development and testing
///
/// No scheduler runs here: tasks exist only when inserted explicitly.
#[derive(Debug, Default)]
pub struct InMemoryCluster {
    services: Arc<RwLock<HashMap<ServiceId, Service>>>,
    nodes: Arc<RwLock<HashMap<NodeId, Node>>>,
    tasks: Arc<RwLock<Vec<Task>>>,
}

impl InMemoryCluster {
    /// Create an empty cluster
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a service
    pub async fn insert_service(&self, service: Service) {
        let mut services = self.services.write().await;
        services.insert(service.id.clone(), service);
    }

    /// Insert or replace a node
    pub async fn insert_node(&self, node: Node) {
        let mut nodes = self.nodes.write().await;
        nodes.insert(node.id.clone(), node);
    }

    /// Change the status of a known node
    pub async fn set_node_status(&self, id: &NodeId, status: NodeStatus) -> GatewayResult<()> {
        let mut nodes = self.nodes.write().await;
        let node = nodes
            .get_mut(id)
            .ok_or_else(|| GatewayError::NotFound(format!("node {}", id)))?;
        node.status = status;
        Ok(())
    }

    /// Add a task
    pub async fn insert_task(&self, task: Task) {
        let mut tasks = self.tasks.write().await;
        tasks.push(task);
    }
}

#[async_trait]
impl ClusterGateway for InMemoryCluster {
    async fn list_services(&self) -> GatewayResult<Vec<Service>> {
        let services = self.services.read().await;
        Ok(services.values().cloned().collect())
    }

    async fn list_nodes(&self) -> GatewayResult<Vec<Node>> {
        let nodes = self.nodes.read().await;
        Ok(nodes.values().cloned().collect())
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> GatewayResult<Vec<Task>> {
        let tasks = self.tasks.read().await;
        Ok(tasks.iter().filter(|t| filter.matches(t)).cloned().collect())
    }

    async fn create_service(&self, request: &ServiceRequest) -> GatewayResult<ServiceId> {
        let mut services = self.services.write().await;
        if services.values().any(|s| s.name == request.name) {
            return Err(GatewayError::Api {
                status: 409,
                message: format!("service {} already exists", request.name),
            });
        }

        let id = ServiceId::generate();
        services.insert(
            id.clone(),
            Service {
                id: id.clone(),
                name: request.name.clone(),
                image: request.image.clone(),
                mode: ServiceMode::replicated(request.replicas),
            },
        );
        Ok(id)
    }

    async fn remove_service(&self, id: &ServiceId) -> GatewayResult<()> {
        let removed = self.services.write().await.remove(id);
        if removed.is_none() {
            return Err(GatewayError::NotFound(format!("service {}", id)));
        }

        let mut tasks = self.tasks.write().await;
        tasks.retain(|t| &t.service_id != id);
        Ok(())
    }
}
