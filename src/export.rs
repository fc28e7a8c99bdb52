//! Memory network export — text listing and JSON.
//!
//! The listing is for inspection and interchange, not a contract with
//! the optimizer:
//!
//! ```text
//! *States
//! <index> <layer> <phys> <weight>
//! *Links
//! <from-index> <to-index> <weight>
//! ```

use std::io::Write;

use crate::model::MemoryNetwork;
use crate::Result;

/// Write a `*States` / `*Links` listing of the network.
pub fn write_states(network: &MemoryNetwork, writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "# memplex-rs memory network")?;
    writeln!(
        writer,
        "# {} state nodes, {} state links, total weight {}",
        network.num_states(),
        network.num_links,
        network.total_weight
    )?;

    writeln!(writer, "*States")?;
    for (index, state) in network.states.iter().enumerate() {
        write!(writer, "{index} {} {} {}", state.layer, state.phys, network.weights[index])?;
        if let Some(name) = network.node_names.get(&state.phys) {
            write!(writer, " \"{name}\"")?;
        }
        writeln!(writer)?;
    }

    writeln!(writer, "*Links")?;
    for link in &network.links {
        let from = index_of(network, link.source)?;
        let to = index_of(network, link.target)?;
        writeln!(writer, "{from} {to} {}", link.weight)?;
    }
    Ok(())
}

fn index_of(network: &MemoryNetwork, state: crate::model::StateNode) -> Result<usize> {
    network.index_of(state).ok_or_else(|| {
        crate::Error::Implementation(format!("state node {state} has no assigned index"))
    })
}

/// Serialize the network as pretty-printed JSON.
pub fn to_json(network: &MemoryNetwork) -> Result<String> {
    Ok(serde_json::to_string_pretty(network)?)
}
