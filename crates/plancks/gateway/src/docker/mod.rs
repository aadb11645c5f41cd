//! Docker Engine gateway
//!
//! Talks to a swarm manager's Engine API over HTTP.

mod wire;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::traits::ClusterGateway;
use async_trait::async_trait;
use plancks_types::{Node, Service, ServiceId, ServiceRequest, Task, TaskFilter};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use wire::{CreateResponse, ErrorBody, ServiceSpec, SwarmNode, SwarmService, SwarmTask};

/// HTTP gateway to a swarm manager
pub struct DockerGateway {
    client: Client,
    base_url: String,
}

impl DockerGateway {
    /// Create a new gateway
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let base_url = config.base_url()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        tracing::debug!(base_url = %base_url, "Created engine gateway");

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> GatewayResult<T> {
        let resp = self.client.get(self.url(path)).query(query).send().await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(&self, resp: Response) -> GatewayResult<T> {
        let resp = Self::check_status(resp).await?;
        resp.json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))
    }

    async fn check_status(resp: Response) -> GatewayResult<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let text = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&text)
            .map(|body| body.message)
            .unwrap_or(text);

        match status {
            StatusCode::NOT_FOUND => Err(GatewayError::NotFound(message)),
            _ => Err(GatewayError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

#[async_trait]
impl ClusterGateway for DockerGateway {
    async fn list_services(&self) -> GatewayResult<Vec<Service>> {
        let services: Vec<SwarmService> = self.get("/services", &[]).await?;
        Ok(services.into_iter().map(Service::from).collect())
    }

    async fn list_nodes(&self) -> GatewayResult<Vec<Node>> {
        let nodes: Vec<SwarmNode> = self.get("/nodes", &[]).await?;
        Ok(nodes.into_iter().map(Node::from).collect())
    }

    async fn list_tasks(&self, filter: &TaskFilter) -> GatewayResult<Vec<Task>> {
        let mut query = Vec::new();
        if !filter.services.is_empty() {
            let services: Vec<&str> = filter.services.iter().map(|s| s.as_str()).collect();
            let filters = serde_json::json!({ "service": services });
            query.push(("filters", serde_json::to_string(&filters)?));
        }

        let tasks: Vec<SwarmTask> = self.get("/tasks", &query).await?;
        Ok(tasks.into_iter().map(Task::from).collect())
    }

    async fn create_service(&self, request: &ServiceRequest) -> GatewayResult<ServiceId> {
        let spec = ServiceSpec::from(request);
        let resp = self
            .client
            .post(self.url("/services/create"))
            .json(&spec)
            .send()
            .await?;
        let created: CreateResponse = self.handle_response(resp).await?;

        for warning in created.warnings.unwrap_or_default() {
            tracing::warn!(service = %request.name, warning = %warning, "Engine warning");
        }

        Ok(ServiceId::new(created.id))
    }

    async fn remove_service(&self, id: &ServiceId) -> GatewayResult<()> {
        let resp = self
            .client
            .delete(self.url(&format!("/services/{}", id.as_str())))
            .send()
            .await?;
        Self::check_status(resp).await?;
        Ok(())
    }
}
