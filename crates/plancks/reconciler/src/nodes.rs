//! Active node set

use plancks_types::{Node, NodeId};
use std::collections::HashSet;

/// Ids of nodes eligible to host countable running work
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveNodes {
    ids: HashSet<NodeId>,
}

impl ActiveNodes {
    /// Collect every node whose status is not `Down`.
    pub fn from_roster(nodes: &[Node]) -> Self {
        let ids = nodes
            .iter()
            .filter(|n| n.is_active())
            .map(|n| n.id.clone())
            .collect();
        Self { ids }
    }

    /// Nodes absent from the roster are never active.
    pub fn contains(&self, id: &NodeId) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
