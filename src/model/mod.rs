//! # Memory Network Model
//!
//! Pure data types that cross every boundary: parser ↔ accumulator ↔
//! builder ↔ downstream optimizer. No I/O, no state, no config here.

pub mod state;
pub mod inter_link;
pub mod memory_network;

pub use state::{StateNode, StateLink};
pub use inter_link::InterLinkKey;
pub use memory_network::MemoryNetwork;
