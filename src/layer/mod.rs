//! Per-layer weighted simple graph over physical node indices.
//!
//! One `LayerGraph` accumulates the intra-layer links of a single
//! multiplex layer. Duplicate declarations of the same ordered pair
//! aggregate by summing weights. After parsing, `finalize` fixes the
//! addressable node count; the multiplex builder may finalize a layer a
//! second time with a larger enforced count so that all layers share
//! one physical index space.

use std::collections::BTreeMap;

use tracing::debug;

/// Directed adjacency: source node → (target node → summed weight).
///
/// Ordered on both levels so that state-link generation walks links in
/// a deterministic order.
pub type LinkMap = BTreeMap<u32, BTreeMap<u32, f64>>;

#[derive(Debug, Clone, Default)]
pub struct LayerGraph {
    links: LinkMap,
    /// Highest node index referenced by any link.
    max_node_index: Option<u32>,
    num_nodes: u32,
    num_links: u64,
    num_aggregated_links: u64,
    total_weight: f64,
    node_names: Vec<String>,
}

impl LayerGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a link `n1 -> n2`. Repeated declarations of the same pair
    /// sum their weights.
    pub fn add_link(&mut self, n1: u32, n2: u32, weight: f64) {
        let high = n1.max(n2);
        self.max_node_index = Some(self.max_node_index.map_or(high, |m| m.max(high)));
        self.total_weight += weight;

        let entry = self.links.entry(n1).or_default().entry(n2);
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

    /// Fix the addressable node count: the highest referenced index plus
    /// one, or `enforced_num_nodes` if that is larger. Safe to call
    /// again with a larger count; links are untouched, only the range
    /// grows.
    pub fn finalize(&mut self, enforced_num_nodes: Option<u32>) {
        let referenced = self.max_node_index.map_or(0, |m| m + 1);
        self.num_nodes = referenced.max(enforced_num_nodes.unwrap_or(0)).max(self.num_nodes);
        debug!(
            num_nodes = self.num_nodes,
            num_links = self.num_links,
            aggregated = self.num_aggregated_links,
            total_weight = self.total_weight,
            "layer finalized"
        );
    }

    pub fn num_nodes(&self) -> u32 {
        self.num_nodes
    }

    pub fn num_links(&self) -> u64 {
        self.num_links
    }

    /// Link declarations that merged into an already-declared pair.
    pub fn num_aggregated_links(&self) -> u64 {
        self.num_aggregated_links
    }

    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    pub fn link_map(&self) -> &LinkMap {
        &self.links
    }

    pub fn node_names(&self) -> &[String] {
        &self.node_names
    }

    pub fn set_node_names(&mut self, names: Vec<String>) {
        self.node_names = names;
    }

    /// Move the display names out (the multiplex builder adopts the
    /// first layer's table).
    pub fn take_node_names(&mut self) -> Vec<String> {
        std::mem::take(&mut self.node_names)
    }
}
