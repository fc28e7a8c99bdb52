//! The finished memory network handed to the optimizer.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::{StateLink, StateNode};

/// Expanded second-order network: the output of the multiplex pipeline.
///
/// `states` is sorted ascending by `(layer, phys)` and a state node's
/// position in it is its assigned index; `weights[i]` is the total
/// outgoing weight attributed to `states[i]`. `links` is sorted by
/// `(source, target)`. For a fixed input the whole structure is
/// byte-for-byte reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryNetwork {
    /// Size of the shared physical node index space after layer
    /// reconciliation.
    pub num_phys_nodes: u32,
    pub states: Vec<StateNode>,
    pub links: Vec<StateLink>,
    /// Out-weight per state node, indexed like `states`.
    pub weights: Vec<f64>,
    /// Sum of all per-state weights.
    pub total_weight: f64,
    /// Distinct state links generated.
    pub num_links: u64,
    /// Link insertions that merged into an existing edge (diagnostic).
    pub num_aggregated_links: u64,
    /// Optional display names keyed by physical node index.
    pub node_names: HashMap<u32, String>,
}

impl MemoryNetwork {
    pub fn num_states(&self) -> usize {
        self.states.len()
    }

    /// Assigned index of a state node, if it exists in this network.
    pub fn index_of(&self, state: StateNode) -> Option<usize> {
        self.states.binary_search(&state).ok()
    }

    /// Out-weight of a state node, if it exists in this network.
    pub fn weight_of(&self, state: StateNode) -> Option<f64> {
        self.index_of(state).map(|i| self.weights[i])
    }

    /// All links leaving `source`, in target order.
    pub fn out_links(&self, source: StateNode) -> impl Iterator<Item = &StateLink> {
        self.links.iter().filter(move |l| l.source == source)
    }

    /// Weight of the link `source -> target`, if present.
    pub fn link_weight(&self, source: StateNode, target: StateNode) -> Option<f64> {
        self.links
            .binary_search_by(|l| (l.source, l.target).cmp(&(source, target)))
            .ok()
            .map(|i| self.links[i].weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_state_network() -> MemoryNetwork {
        let a = StateNode::new(0, 0);
        let b = StateNode::new(0, 1);
        MemoryNetwork {
            num_phys_nodes: 2,
            states: vec![a, b],
            links: vec![StateLink::new(a, b, 2.0)],
            weights: vec![2.0, 0.0],
            total_weight: 2.0,
            num_links: 1,
            num_aggregated_links: 0,
            node_names: HashMap::new(),
        }
    }

    #[test]
    fn test_index_lookup() {
        let net = two_state_network();
        assert_eq!(net.index_of(StateNode::new(0, 0)), Some(0));
        assert_eq!(net.index_of(StateNode::new(0, 1)), Some(1));
        assert_eq!(net.index_of(StateNode::new(1, 0)), None);
    }

    #[test]
    fn test_link_weight_lookup() {
        let net = two_state_network();
        let a = StateNode::new(0, 0);
        let b = StateNode::new(0, 1);
        assert_eq!(net.link_weight(a, b), Some(2.0));
        assert_eq!(net.link_weight(b, a), None);
    }
}
