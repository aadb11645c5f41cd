//! Service state emission

use crate::nodes::ActiveNodes;
use crate::tally::ReplicaTally;
use plancks_types::{Node, Service, ServiceId, ServiceMode, ServiceState, Task};
use std::collections::HashMap;

/// Full result of a reconciliation pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    /// One record per well-formed replicated service
    pub states: HashMap<ServiceId, ServiceState>,

    /// Counters the records were built from
    pub tally: ReplicaTally,

    /// Replicated services dropped for lacking a replica count
    pub skipped: Vec<ServiceId>,
}

/// Reconcile observed cluster state into per-service replica counts.
///
/// Services that are not replicated produce no record. A replicated service
/// without a replica count is malformed and is skipped rather than failing
/// the whole pass.
pub fn reconcile(
    services: &[Service],
    nodes: &[Node],
    tasks: &[Task],
) -> HashMap<ServiceId, ServiceState> {
    reconcile_detailed(services, nodes, tasks).states
}

/// Like [`reconcile`], also returning the task tally and skipped services.
pub fn reconcile_detailed(services: &[Service], nodes: &[Node], tasks: &[Task]) -> Reconciliation {
    let active = ActiveNodes::from_roster(nodes);
    let tally = ReplicaTally::collect(&active, tasks);

    let mut states = HashMap::with_capacity(services.len());
    let mut skipped = Vec::new();

    for service in services {
        let required = match service.mode {
            ServiceMode::Replicated {
                replicas: Some(required),
            } => required,
            ServiceMode::Replicated { replicas: None } => {
                skipped.push(service.id.clone());
                continue;
            }
            ServiceMode::Global => continue,
        };

        states.insert(
            service.id.clone(),
            ServiceState {
                id: service.id.clone(),
                name: service.name.clone(),
                image: service.image.clone(),
                replicas_running: tally.running(&service.id),
                replicas_required: required,
            },
        );
    }

    Reconciliation {
        states,
        tally,
        skipped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plancks_types::{NodeId, NodeStatus, TaskId, TaskState};

    fn service(id: &str, mode: ServiceMode) -> Service {
        Service {
            id: ServiceId::new(id),
            name: format!("{}-name", id),
            image: format!("{}:latest", id),
            mode,
        }
    }

    fn node(id: &str, status: NodeStatus) -> Node {
        Node::new(NodeId::new(id), status)
    }

    fn task(service: &str, node: &str, observed: TaskState, desired: TaskState) -> Task {
        Task {
            id: TaskId::new("t1"),
            service_id: ServiceId::new(service),
            node_id: NodeId::new(node),
            desired_state: desired,
            observed_state: observed,
        }
    }

    fn scenario_a() -> (Vec<Service>, Vec<Node>, Vec<Task>) {
        let services = vec![service("S1", ServiceMode::replicated(3))];
        let nodes = vec![node("N1", NodeStatus::Ready), node("N2", NodeStatus::Down)];
        let tasks = vec![
            task("S1", "N1", TaskState::Running, TaskState::Running),
            task("S1", "N2", TaskState::Running, TaskState::Running),
            task("S1", "N1", TaskState::Pending, TaskState::Running),
        ];
        (services, nodes, tasks)
    }

    #[test]
    fn test_running_counts_only_active_running_tasks() {
        let (services, nodes, tasks) = scenario_a();
        let states = reconcile(&services, &nodes, &tasks);

        assert_eq!(states.len(), 1);
        let s1 = &states[&ServiceId::new("S1")];
        assert_eq!(s1.replicas_running, 1);
        assert_eq!(s1.replicas_required, 3);
        assert_eq!(s1.name, "S1-name");
        assert_eq!(s1.image, "S1:latest");
    }

    #[test]
    fn test_global_services_are_excluded() {
        let (mut services, nodes, tasks) = scenario_a();
        services.push(service("S2", ServiceMode::Global));

        let states = reconcile(&services, &nodes, &tasks);
        assert_eq!(states.len(), 1);
        assert!(states.contains_key(&ServiceId::new("S1")));
        assert!(!states.contains_key(&ServiceId::new("S2")));
    }

    #[test]
    fn test_task_on_unlisted_node_never_counts() {
        let services = vec![service("S1", ServiceMode::replicated(1))];
        let nodes = vec![node("N1", NodeStatus::Ready)];
        let tasks = vec![task("S1", "ghost", TaskState::Running, TaskState::Running)];

        let states = reconcile(&services, &nodes, &tasks);
        assert_eq!(states[&ServiceId::new("S1")].replicas_running, 0);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(reconcile(&[], &[], &[]).is_empty());

        let services = vec![
            service("a", ServiceMode::replicated(2)),
            service("b", ServiceMode::replicated(0)),
            service("c", ServiceMode::Global),
        ];
        let states = reconcile(&services, &[], &[]);
        assert_eq!(states.len(), 2);
        assert!(states.values().all(|s| s.replicas_running == 0));
        assert_eq!(states[&ServiceId::new("b")].replicas_required, 0);
    }

    #[test]
    fn test_missing_replica_count_is_skipped() {
        let services = vec![
            service("ok", ServiceMode::replicated(1)),
            service("bad", ServiceMode::Replicated { replicas: None }),
        ];
        let result = reconcile_detailed(&services, &[], &[]);

        assert_eq!(result.states.len(), 1);
        assert!(result.states.contains_key(&ServiceId::new("ok")));
        assert_eq!(result.skipped, vec![ServiceId::new("bad")]);
    }

    #[test]
    fn test_tasks_for_unlisted_services_are_ignored() {
        let services = vec![service("S1", ServiceMode::replicated(1))];
        let nodes = vec![node("N1", NodeStatus::Ready)];
        let tasks = vec![task("other", "N1", TaskState::Running, TaskState::Running)];

        let result = reconcile_detailed(&services, &nodes, &tasks);
        assert_eq!(result.states[&ServiceId::new("S1")].replicas_running, 0);
        assert_eq!(result.tally.running(&ServiceId::new("other")), 1);
    }

    #[test]
    fn test_detailed_exposes_non_shutdown_count() {
        let (services, nodes, mut tasks) = scenario_a();
        tasks.push(task("S1", "N1", TaskState::Running, TaskState::Shutdown));

        let result = reconcile_detailed(&services, &nodes, &tasks);
        assert_eq!(result.tally.non_shutdown(&ServiceId::new("S1")), 3);
        assert_eq!(result.states[&ServiceId::new("S1")].replicas_running, 2);
    }
}
