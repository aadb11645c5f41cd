//! Service controller
//!
//! Glues the gateway to the reconciler: lists the cluster, reconciles it and
//! hands back a name-sorted snapshot. Also creates and removes services.

use crate::error::GatewayResult;
use crate::traits::ClusterGateway;
use plancks_reconciler::reconcile_detailed;
use plancks_types::{ServiceId, ServiceRequest, ServiceState, TaskFilter};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Service operations over an explicitly supplied gateway
#[derive(Clone)]
pub struct ServiceController {
    gateway: Arc<dyn ClusterGateway>,
}

impl ServiceController {
    pub fn new(gateway: Arc<dyn ClusterGateway>) -> Self {
        Self { gateway }
    }

    /// Reconciled state of every replicated service, sorted by name.
    ///
    /// Tasks and nodes are only listed when at least one service exists.
    #[instrument(skip(self))]
    pub async fn service_states(&self) -> GatewayResult<Vec<ServiceState>> {
        let services = self.gateway.list_services().await?;
        if services.is_empty() {
            debug!("No services in cluster");
            return Ok(Vec::new());
        }

        let filter = TaskFilter::for_services(services.iter().map(|s| &s.id));
        let tasks = self.gateway.list_tasks(&filter).await?;
        let nodes = self.gateway.list_nodes().await?;

        debug!(
            services = services.len(),
            nodes = nodes.len(),
            tasks = tasks.len(),
            "Reconciling cluster state"
        );

        let result = reconcile_detailed(&services, &nodes, &tasks);
        for id in &result.skipped {
            warn!(service_id = %id, "Replicated service has no replica count, skipping");
        }

        let mut states: Vec<ServiceState> = result.states.into_values().collect();
        ServiceState::sort_by_name(&mut states);
        Ok(states)
    }

    /// Create a replicated service
    #[instrument(skip(self, request), fields(service = %request.name))]
    pub async fn create_service(&self, request: &ServiceRequest) -> GatewayResult<ServiceId> {
        let id = self.gateway.create_service(request).await.map_err(|e| {
            warn!(error = %e, "Failed to create service");
            e
        })?;

        info!(
            service_id = %id,
            image = %request.image,
            replicas = request.replicas,
            "Created service"
        );
        Ok(id)
    }

    /// Remove services, returning how many were removed.
    ///
    /// A failure on one service is logged and does not stop the rest.
    pub async fn remove_services(&self, services: &[ServiceState]) -> usize {
        let mut removed = 0;

        for service in services {
            info!(service_id = %service.id, name = %service.name, "Removing service");

            match self.gateway.remove_service(&service.id).await {
                Ok(()) => removed += 1,
                Err(e) => {
                    warn!(
                        service_id = %service.id,
                        error = %e,
                        "Failed to remove service"
                    );
                }
            }
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GatewayError;
    use crate::memory::InMemoryCluster;
    use async_trait::async_trait;
    use plancks_types::{
        Node, NodeId, NodeStatus, Service, ServiceMode, Task, TaskId, TaskState,
    };
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn task(service: &ServiceId, node: &str, observed: TaskState) -> Task {
        Task {
            id: TaskId::new("t1"),
            service_id: service.clone(),
            node_id: NodeId::new(node),
            desired_state: TaskState::Running,
            observed_state: observed,
        }
    }

    #[tokio::test]
    async fn test_service_states_sorted_and_reconciled() {
        let cluster = Arc::new(InMemoryCluster::new());
        cluster.insert_node(Node::new(NodeId::new("n1"), NodeStatus::Ready)).await;
        cluster.insert_node(Node::new(NodeId::new("n2"), NodeStatus::Down)).await;

        let controller = ServiceController::new(cluster.clone());
        let web = controller
            .create_service(&ServiceRequest::new("web", "nginx", 3))
            .await
            .unwrap();
        let api = controller
            .create_service(&ServiceRequest::new("api", "api:2", 1))
            .await
            .unwrap();
        cluster
            .insert_service(Service {
                id: ServiceId::new("agent"),
                name: "agent".into(),
                image: "agent:1".into(),
                mode: ServiceMode::Global,
            })
            .await;

        cluster.insert_task(task(&web, "n1", TaskState::Running)).await;
        cluster.insert_task(task(&web, "n2", TaskState::Running)).await;
        cluster.insert_task(task(&web, "n1", TaskState::Pending)).await;
        cluster.insert_task(task(&api, "n1", TaskState::Running)).await;

        let states = controller.service_states().await.unwrap();
        let names: Vec<_> = states.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["api", "web"]);

        assert_eq!(states[0].replicas_running, 1);
        assert!(states[0].is_converged());
        assert_eq!(states[1].replicas_running, 1);
        assert_eq!(states[1].replicas_required, 3);
    }

    #[tokio::test]
    async fn test_node_going_down_drops_running_count() {
        let cluster = Arc::new(InMemoryCluster::new());
        let node = NodeId::new("n1");
        cluster.insert_node(Node::new(node.clone(), NodeStatus::Ready)).await;

        let controller = ServiceController::new(cluster.clone());
        let id = controller
            .create_service(&ServiceRequest::new("web", "nginx", 1))
            .await
            .unwrap();
        cluster.insert_task(task(&id, "n1", TaskState::Running)).await;

        assert_eq!(controller.service_states().await.unwrap()[0].replicas_running, 1);

        cluster.set_node_status(&node, NodeStatus::Down).await.unwrap();
        assert_eq!(controller.service_states().await.unwrap()[0].replicas_running, 0);
    }

    /// Gateway that counts listing calls and fails removals for one id
    #[derive(Default)]
    struct CountingGateway {
        inner: InMemoryCluster,
        task_lists: AtomicUsize,
        node_lists: AtomicUsize,
        fail_remove: Option<ServiceId>,
    }

    #[async_trait]
    impl ClusterGateway for CountingGateway {
        async fn list_services(&self) -> GatewayResult<Vec<Service>> {
            self.inner.list_services().await
        }

        async fn list_nodes(&self) -> GatewayResult<Vec<Node>> {
            self.node_lists.fetch_add(1, Ordering::SeqCst);
            self.inner.list_nodes().await
        }

        async fn list_tasks(&self, filter: &TaskFilter) -> GatewayResult<Vec<Task>> {
            self.task_lists.fetch_add(1, Ordering::SeqCst);
            self.inner.list_tasks(filter).await
        }

        async fn create_service(&self, request: &ServiceRequest) -> GatewayResult<ServiceId> {
            self.inner.create_service(request).await
        }

        async fn remove_service(&self, id: &ServiceId) -> GatewayResult<()> {
            if self.fail_remove.as_ref() == Some(id) {
                return Err(GatewayError::Api {
                    status: 500,
                    message: "rpc error".into(),
                });
            }
            self.inner.remove_service(id).await
        }
    }

    #[tokio::test]
    async fn test_empty_cluster_skips_task_and_node_listing() {
        let gateway = Arc::new(CountingGateway::default());
        let controller = ServiceController::new(gateway.clone());

        assert!(controller.service_states().await.unwrap().is_empty());
        assert_eq!(gateway.task_lists.load(Ordering::SeqCst), 0);
        assert_eq!(gateway.node_lists.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_remove_services_continues_past_failures() {
        let broken = ServiceId::new("broken");
        let gateway = Arc::new(CountingGateway {
            fail_remove: Some(broken.clone()),
            ..Default::default()
        });
        gateway
            .inner
            .insert_service(Service {
                id: broken.clone(),
                name: "broken".into(),
                image: "img".into(),
                mode: ServiceMode::replicated(1),
            })
            .await;

        let controller = ServiceController::new(gateway.clone());
        controller
            .create_service(&ServiceRequest::new("a", "img", 1))
            .await
            .unwrap();
        controller
            .create_service(&ServiceRequest::new("z", "img", 1))
            .await
            .unwrap();

        let states = controller.service_states().await.unwrap();
        assert_eq!(states.len(), 3);

        let removed = controller.remove_services(&states).await;
        assert_eq!(removed, 2);

        let left = controller.service_states().await.unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, broken);
    }
}
