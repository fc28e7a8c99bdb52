//! State-link aggregation, inter-link redistribution and indexing.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use tracing::{info, warn};

use crate::model::{InterLinkKey, MemoryNetwork, StateLink, StateNode};

/// Accumulates the state nodes and state links of the memory network
/// under construction, then assigns the final deterministic indices.
///
/// Both tables are ordered by state node, so every iteration the
/// builder performs is independent of discovery order.
#[derive(Debug, Default)]
pub struct MemoryBuilder {
    /// source → (target → summed weight).
    links: BTreeMap<StateNode, BTreeMap<StateNode, f64>>,
    /// state node → accumulated out-weight.
    nodes: BTreeMap<StateNode, f64>,
    num_links: u64,
    num_aggregated_links: u64,
}

impl MemoryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or aggregate the directed state link `from -> to`.
    ///
    /// A weight of 0 still creates the edge; callers use that to make a
    /// node reachable through the link tables without adding weight.
    pub fn insert_state_link(&mut self, from: StateNode, to: StateNode, weight: f64) {
        let entry = self.links.entry(from).or_default().entry(to);
        match entry {
            std::collections::btree_map::Entry::Occupied(mut e) => {
                *e.get_mut() += weight;
                self.num_aggregated_links += 1;
            }
            std::collections::btree_map::Entry::Vacant(e) => {
                e.insert(weight);
                self.num_links += 1;
            }
        }
    }

    /// Register a state node, adding `weight` to its out-weight total.
    /// A node may be registered any number of times, including with 0.
    pub fn register_state_node(&mut self, state: StateNode, weight: f64) {
        *self.nodes.entry(state).or_insert(0.0) += weight;
    }

    /// Redistribute one aggregated inter-link entry.
    ///
    /// The weight is spread over the out-links that physical node
    /// `key.phys` already has inside the destination layer, each
    /// scaled by its share of their total. Cross-layer out-links that
    /// earlier entries may have attached to the same source state node
    /// do not take part. If the node has no out-links in the
    /// destination layer the entry's weight is discarded.
    pub fn redistribute_inter_link(&mut self, key: InterLinkKey, weight: f64) {
        let InterLinkKey { phys, layer1, layer2 } = key;
        let destination = StateNode::new(layer2, phys);

        let out_links: Vec<(StateNode, f64)> = self
            .links
            .get(&destination)
            .map(|targets| {
                targets
                    .iter()
                    .filter(|(target, _)| target.layer == layer2)
                    .map(|(&target, &w)| (target, w))
                    .collect()
            })
            .unwrap_or_default();

        let sum: f64 = out_links.iter().map(|(_, w)| w).sum();
        if sum <= 0.0 {
            warn!(
                phys,
                from_layer = layer1,
                to_layer = layer2,
                dropped_weight = weight,
                "inter-link target has no outgoing links in its layer, weight discarded"
            );
            return;
        }

        let from = StateNode::new(layer1, phys);
        for (target, link_weight) in out_links {
            self.insert_state_link(from, target, weight * link_weight / sum);
            self.register_state_node(from, 0.0);
        }
    }

    /// Assign indices and produce the finished network.
    ///
    /// Two-pass by construction: the node table is already sorted by
    /// `(layer, phys)`, so position in it is the assigned index.
    pub fn finish(self, node_names: HashMap<u32, String>, num_phys_nodes: u32) -> MemoryNetwork {
        let states: Vec<StateNode> = self.nodes.keys().copied().collect();
        let weights: Vec<f64> = self.nodes.values().copied().collect();
        let total_weight: f64 = weights.iter().sum();

        let mut links = Vec::with_capacity(self.num_links as usize);
        for (&source, targets) in &self.links {
            debug_assert!(self.nodes.contains_key(&source));
            for (&target, &weight) in targets {
                debug_assert!(self.nodes.contains_key(&target));
                links.push(StateLink::new(source, target, weight));
            }
        }

        info!(
            state_nodes = states.len(),
            state_links = self.num_links,
            aggregated_links = self.num_aggregated_links,
            total_weight,
            "memory network generated"
        );

        MemoryNetwork {
            num_phys_nodes,
            states,
            links,
            weights,
            total_weight,
            num_links: self.num_links,
            num_aggregated_links: self.num_aggregated_links,
            node_names,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_state_links_aggregate() {
        let mut b = MemoryBuilder::new();
        let a = StateNode::new(0, 0);
        let c = StateNode::new(0, 1);
        b.insert_state_link(a, c, 1.0);
        b.insert_state_link(a, c, 2.0);
        b.register_state_node(a, 3.0);
        b.register_state_node(c, 0.0);

        let net = b.finish(HashMap::new(), 0);
        assert_eq!(net.num_links, 1);
        assert_eq!(net.num_aggregated_links, 1);
        assert_eq!(net.link_weight(a, c), Some(3.0));
    }

    #[test]
    fn test_zero_weight_link_registers_edge() {
        let mut b = MemoryBuilder::new();
        let a = StateNode::new(0, 0);
        let c = StateNode::new(1, 0);
        b.insert_state_link(a, c, 0.0);
        b.register_state_node(a, 0.0);
        b.register_state_node(c, 0.0);

        let net = b.finish(HashMap::new(), 0);
        assert_eq!(net.num_links, 1);
        assert_eq!(net.link_weight(a, c), Some(0.0));
        assert_eq!(net.total_weight, 0.0);
    }

    #[test]
    fn test_redistribution_is_proportional() {
        let mut b = MemoryBuilder::new();
        // Node 0 in layer 1 has out-links 0->1 (w 1) and 0->2 (w 3)
        b.insert_state_link(StateNode::new(1, 0), StateNode::new(1, 1), 1.0);
        b.register_state_node(StateNode::new(1, 0), 1.0);
        b.register_state_node(StateNode::new(1, 1), 0.0);
        b.insert_state_link(StateNode::new(1, 0), StateNode::new(1, 2), 3.0);
        b.register_state_node(StateNode::new(1, 0), 3.0);
        b.register_state_node(StateNode::new(1, 2), 0.0);

        b.redistribute_inter_link(InterLinkKey::new(0, 0, 1), 8.0);

        let net = b.finish(HashMap::new(), 0);
        let from = StateNode::new(0, 0);
        assert_eq!(net.link_weight(from, StateNode::new(1, 1)), Some(2.0));
        assert_eq!(net.link_weight(from, StateNode::new(1, 2)), Some(6.0));
        // Source registered with zero out-weight
        assert_eq!(net.weight_of(from), Some(0.0));
    }

    #[test]
    fn test_redistribution_skips_cross_layer_out_links() {
        let mut b = MemoryBuilder::new();
        // (1,0) has one intra out-link and one cross-layer out-link from
        // an earlier redistribution; only the intra link takes part.
        b.insert_state_link(StateNode::new(1, 0), StateNode::new(1, 1), 2.0);
        b.register_state_node(StateNode::new(1, 0), 2.0);
        b.register_state_node(StateNode::new(1, 1), 0.0);
        b.insert_state_link(StateNode::new(1, 0), StateNode::new(2, 5), 7.0);
        b.register_state_node(StateNode::new(2, 5), 0.0);

        b.redistribute_inter_link(InterLinkKey::new(0, 0, 1), 4.0);

        let net = b.finish(HashMap::new(), 0);
        let from = StateNode::new(0, 0);
        assert_eq!(net.link_weight(from, StateNode::new(1, 1)), Some(4.0));
        assert_eq!(net.link_weight(from, StateNode::new(2, 5)), None);
    }

    #[test]
    fn test_redistribution_with_no_out_links_drops_weight() {
        let mut b = MemoryBuilder::new();
        b.redistribute_inter_link(InterLinkKey::new(3, 0, 1), 5.0);
        let net = b.finish(HashMap::new(), 0);
        assert_eq!(net.num_states(), 0);
        assert_eq!(net.num_links, 0);
    }

    #[test]
    fn test_finish_orders_states_by_layer_then_node() {
        let mut b = MemoryBuilder::new();
        b.register_state_node(StateNode::new(1, 0), 0.0);
        b.register_state_node(StateNode::new(0, 5), 1.0);
        b.register_state_node(StateNode::new(0, 2), 2.0);

        let net = b.finish(HashMap::new(), 0);
        assert_eq!(net.states, vec![
            StateNode::new(0, 2),
            StateNode::new(0, 5),
            StateNode::new(1, 0),
        ]);
        assert_eq!(net.weights, vec![2.0, 1.0, 0.0]);
        assert_eq!(net.total_weight, 3.0);
    }
}
