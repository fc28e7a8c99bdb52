//! State nodes and state links of the expanded graph.

use serde::{Deserialize, Serialize};

/// A node in the second-order network: "being at physical node `phys`
/// having arrived through layer `layer`".
///
/// The derived `Ord` is lexicographic over `(layer, phys)`; ordered
/// containers keyed by `StateNode` therefore iterate in exactly the
/// order the final index assignment uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StateNode {
    pub layer: u32,
    pub phys: u32,
}

impl StateNode {
    pub fn new(layer: u32, phys: u32) -> Self {
        Self { layer, phys }
    }
}

impl std::fmt::Display for StateNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.layer, self.phys)
    }
}

/// A directed weighted edge between two state nodes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StateLink {
    pub source: StateNode,
    pub target: StateNode,
    pub weight: f64,
}

impl StateLink {
    pub fn new(source: StateNode, target: StateNode, weight: f64) -> Self {
        Self { source, target, weight }
    }
}
