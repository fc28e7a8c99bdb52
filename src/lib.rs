//! # memplex-rs — Multiplex Network to Memory Network Expansion
//!
//! Ingests a multiplex network — several graph layers over one physical
//! node set, plus links that cross layers — and expands it into a
//! second-order *memory network*: a directed weighted graph whose nodes
//! are `(layer, physical node)` pairs. A downstream community-detection
//! optimizer can then treat layer-dependent flow as an ordinary
//! first-order random walk on the expanded graph.
//!
//! ## Pipeline
//!
//! ```text
//! text lines → parse (intra/inter records)
//!            → per-layer graphs + inter-link table
//!            → layer reconciliation (equal node counts)
//!            → memory builder (state links, redistribution, indexing)
//!            → MemoryNetwork
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use memplex_rs::{read_multiplex, Config};
//!
//! # fn example() -> memplex_rs::Result<()> {
//! let network = read_multiplex("data/multiplex.net", Config::default())?;
//!
//! for (index, state) in network.states.iter().enumerate() {
//!     println!("{index}: layer {} node {}", state.layer, state.phys);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Input grammar: blank lines and `#` comments are skipped; `*Intra` /
//! `*Inter` headers switch the record mode (intra at start of file);
//! intra records are `level n1 n2 [weight]`, inter records are
//! `node level1 level2 [weight]`, 1-based unless configured otherwise.

// ============================================================================
// Modules
// ============================================================================

pub mod config;
pub mod model;
pub mod parse;
pub mod layer;
pub mod multiplex;
pub mod export;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{StateNode, StateLink, InterLinkKey, MemoryNetwork};

// ============================================================================
// Re-exports: Configuration
// ============================================================================

pub use config::{Config, InputFormat, InterLinkStrategy};

// ============================================================================
// Re-exports: Pipeline
// ============================================================================

pub use layer::LayerGraph;
pub use multiplex::MultiplexNetwork;

use std::path::Path;

/// Parse a multiplex network file and expand it into a memory network.
///
/// One-call convenience over [`MultiplexNetwork`]: reads the whole file,
/// enforces the two-layer minimum, reconciles layer node counts and
/// builds the expanded graph.
pub fn read_multiplex<P: AsRef<Path>>(path: P, config: Config) -> Result<MemoryNetwork> {
    let mut net = MultiplexNetwork::new(config);
    net.read_file(path)?;
    net.into_memory_network()
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A record line could not be parsed in the current section mode.
    #[error("Format error: {message} in line '{line}'")]
    FileFormat { message: String, line: String },

    /// Structurally valid input that violates a required invariant.
    #[error("Input domain error: {0}")]
    InputDomain(String),

    /// Contract violation by the caller, not a data problem.
    #[error("Implementation error: {0}")]
    Implementation(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Format error naming the offending raw line.
    pub(crate) fn format(message: impl Into<String>, line: &str) -> Self {
        Error::FileFormat {
            message: message.into(),
            line: line.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
