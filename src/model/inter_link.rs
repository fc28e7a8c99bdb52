//! Aggregation key for inter-layer link declarations.

use serde::{Deserialize, Serialize};

/// Identity of an inter-layer link: physical node `phys` moving from
/// `layer1` to `layer2`. Equal keys from different input lines sum
/// their weights in the aggregation table.
///
/// Derived `Ord` is lexicographic over `(phys, layer1, layer2)`, giving
/// the inter-link table a deterministic iteration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct InterLinkKey {
    pub phys: u32,
    pub layer1: u32,
    pub layer2: u32,
}

impl InterLinkKey {
    pub fn new(phys: u32, layer1: u32, layer2: u32) -> Self {
        Self { phys, layer1, layer2 }
    }

    /// Same-layer entries carry no cross-layer transition and are
    /// skipped by the builder.
    pub fn is_self_transition(&self) -> bool {
        self.layer1 == self.layer2
    }
}
