//! Ingestion configuration.

use serde::{Deserialize, Serialize};

/// Input formats understood by the ingestion layer.
///
/// The multiplex pipeline only accepts [`InputFormat::Multiplex`];
/// selecting anything else routes to a different reader upstream, and
/// reaching this crate with it is a contract violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputFormat {
    #[default]
    Multiplex,
    LinkList,
    Pajek,
}

/// How an inter-layer link is turned into state links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InterLinkStrategy {
    /// Spread the inter-link weight across the node's intra-layer
    /// out-links in the destination layer, proportionally to their
    /// weights. Inter-links whose node has no out-links there are
    /// dropped.
    #[default]
    Redistribute,
    /// Direct passthrough: a single state link to the same physical
    /// node in the destination layer, carrying the full weight.
    PhysicalSwitch,
}

/// Configuration for multiplex ingestion and memory-network expansion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub input_format: InputFormat,
    /// Subtracted from every parsed integer field. 1 converts the
    /// conventional 1-based input indexing to internal 0-based.
    pub index_offset: u32,
    /// Whether a self-link `n -> n` contributes to the source state
    /// node's out-weight.
    pub include_self_links: bool,
    pub inter_link_strategy: InterLinkStrategy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_format: InputFormat::Multiplex,
            index_offset: 1,
            include_self_links: false,
            inter_link_strategy: InterLinkStrategy::default(),
        }
    }
}

impl Config {
    /// Treat input indices as already 0-based.
    pub fn zero_based(mut self) -> Self {
        self.index_offset = 0;
        self
    }

    pub fn with_self_links(mut self) -> Self {
        self.include_self_links = true;
        self
    }

    pub fn with_strategy(mut self, strategy: InterLinkStrategy) -> Self {
        self.inter_link_strategy = strategy;
        self
    }

    pub fn with_input_format(mut self, format: InputFormat) -> Self {
        self.input_format = format;
        self
    }
}
