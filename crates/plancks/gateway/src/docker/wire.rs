//! Engine API JSON shapes
//!
//! Only the fields the controller reads or writes are modelled; everything
//! else in the engine's payloads is ignored.

use plancks_types::{
    Node, NodeId, NodeStatus, Service, ServiceId, ServiceMode, ServiceRequest, Task, TaskId,
    TaskState,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SwarmService {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default)]
    pub spec: ServiceSpec,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ServiceSpec {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mode: Mode,
    #[serde(default)]
    pub task_template: TaskTemplate,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Mode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicated: Option<Replicated>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global: Option<serde_json::Value>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Replicated {
    #[serde(default)]
    pub replicas: Option<u64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TaskTemplate {
    #[serde(default)]
    pub container_spec: ContainerSpec,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<ResourceRequirements>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ContainerSpec {
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct ResourceRequirements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limits: Option<Limits>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct Limits {
    #[serde(default)]
    pub memory_bytes: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SwarmNode {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default)]
    pub status: NodeState,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct NodeState {
    #[serde(default)]
    pub state: NodeStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct SwarmTask {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "ServiceID")]
    pub service_id: String,
    #[serde(rename = "NodeID", default)]
    pub node_id: String,
    pub desired_state: TaskState,
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct TaskStatus {
    pub state: TaskState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub(crate) struct CreateResponse {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default)]
    pub warnings: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

impl From<SwarmService> for Service {
    fn from(s: SwarmService) -> Self {
        let mode = match s.spec.mode.replicated {
            Some(replicated) => ServiceMode::Replicated {
                replicas: replicated.replicas,
            },
            // global and job modes are not reconciled
            None => ServiceMode::Global,
        };

        Service {
            id: ServiceId::new(s.id),
            name: s.spec.name,
            image: s.spec.task_template.container_spec.image,
            mode,
        }
    }
}

impl From<SwarmNode> for Node {
    fn from(n: SwarmNode) -> Self {
        Node::new(NodeId::new(n.id), n.status.state)
    }
}

impl From<SwarmTask> for Task {
    fn from(t: SwarmTask) -> Self {
        Task {
            id: TaskId::new(t.id),
            service_id: ServiceId::new(t.service_id),
            node_id: NodeId::new(t.node_id),
            desired_state: t.desired_state,
            observed_state: t.status.state,
        }
    }
}

impl From<&ServiceRequest> for ServiceSpec {
    fn from(req: &ServiceRequest) -> Self {
        let resources = (req.memory_limit_mib > 0).then(|| ResourceRequirements {
            limits: Some(Limits {
                memory_bytes: req.memory_limit_bytes(),
            }),
        });

        ServiceSpec {
            name: req.name.clone(),
            mode: Mode {
                replicated: Some(Replicated {
                    replicas: Some(req.replicas),
                }),
                global: None,
            },
            task_template: TaskTemplate {
                container_spec: ContainerSpec {
                    image: req.image.clone(),
                },
                resources,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_replicated_service_from_engine_json() {
        let raw = json!({
            "ID": "9mnpnzenvg8p8tdbtq4wvbkcz",
            "Version": { "Index": 19 },
            "Spec": {
                "Name": "web",
                "Mode": { "Replicated": { "Replicas": 3 } },
                "TaskTemplate": {
                    "ContainerSpec": { "Image": "nginx:1.25@sha256:abc" }
                }
            }
        });
        let service: Service = serde_json::from_value::<SwarmService>(raw).unwrap().into();

        assert_eq!(service.id.as_str(), "9mnpnzenvg8p8tdbtq4wvbkcz");
        assert_eq!(service.name, "web");
        assert_eq!(service.image, "nginx:1.25@sha256:abc");
        assert_eq!(service.required_replicas(), Some(3));
    }

    #[test]
    fn test_global_and_job_modes_are_not_replicated() {
        for mode in [json!({ "Global": {} }), json!({ "ReplicatedJob": {} })] {
            let raw = json!({ "ID": "x", "Spec": { "Name": "agent", "Mode": mode } });
            let service: Service = serde_json::from_value::<SwarmService>(raw).unwrap().into();
            assert_eq!(service.mode, ServiceMode::Global);
        }
    }

    #[test]
    fn test_replicated_without_count_is_kept_malformed() {
        let raw = json!({ "ID": "x", "Spec": { "Mode": { "Replicated": {} } } });
        let service: Service = serde_json::from_value::<SwarmService>(raw).unwrap().into();
        assert_eq!(service.mode, ServiceMode::Replicated { replicas: None });
    }

    #[test]
    fn test_node_and_task_from_engine_json() {
        let node: Node = serde_json::from_value::<SwarmNode>(json!({
            "ID": "n1",
            "Status": { "State": "down", "Addr": "10.0.0.2" }
        }))
        .unwrap()
        .into();
        assert_eq!(node.status, NodeStatus::Down);

        let task: Task = serde_json::from_value::<SwarmTask>(json!({
            "ID": "t1",
            "ServiceID": "s1",
            "NodeID": "n1",
            "DesiredState": "running",
            "Status": { "State": "preparing", "Message": "preparing" }
        }))
        .unwrap()
        .into();
        assert_eq!(task.desired_state, TaskState::Running);
        assert_eq!(task.observed_state, TaskState::Preparing);
    }

    #[test]
    fn test_unassigned_task_has_empty_node() {
        let task: Task = serde_json::from_value::<SwarmTask>(json!({
            "ID": "t1",
            "ServiceID": "s1",
            "DesiredState": "running",
            "Status": { "State": "pending" }
        }))
        .unwrap()
        .into();
        assert_eq!(task.node_id.as_str(), "");
    }

    #[test]
    fn test_create_spec_json() {
        let req = ServiceRequest::new("web", "nginx", 2).with_memory_limit_mib(64);
        let body = serde_json::to_value(ServiceSpec::from(&req)).unwrap();

        assert_eq!(
            body,
            json!({
                "Name": "web",
                "Mode": { "Replicated": { "Replicas": 2 } },
                "TaskTemplate": {
                    "ContainerSpec": { "Image": "nginx" },
                    "Resources": { "Limits": { "MemoryBytes": 67108864 } }
                }
            })
        );
    }

    #[test]
    fn test_create_spec_without_limit_omits_resources() {
        let body = serde_json::to_value(ServiceSpec::from(&ServiceRequest::new("a", "b", 1))).unwrap();
        assert!(body["TaskTemplate"].get("Resources").is_none());
    }
}
