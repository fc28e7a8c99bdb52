//! Multiplex network accumulation and memory-network expansion.
//!
//! `MultiplexNetwork` drives the whole pipeline: it reads the input
//! line by line (growing layers on demand and aggregating inter-link
//! declarations), enforces the two-layer minimum, reconciles layer node
//! counts to the global maximum, and then hands the finalized layers to
//! the [`builder::MemoryBuilder`] for state-link generation,
//! proportional redistribution and deterministic indexing.

pub mod builder;

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::config::{Config, InputFormat, InterLinkStrategy};
use crate::layer::LayerGraph;
use crate::model::{InterLinkKey, MemoryNetwork, StateNode};
use crate::parse::{self, LineKind};
use crate::{Error, Result};

use builder::MemoryBuilder;

/// Accumulator for a multiplex network: per-layer graphs plus the
/// aggregated inter-layer link table.
#[derive(Debug)]
pub struct MultiplexNetwork {
    config: Config,
    layers: Vec<LayerGraph>,
    inter_links: BTreeMap<InterLinkKey, f64>,
    node_names: Vec<String>,
    num_intra_links_found: u64,
    num_inter_links_found: u64,
}

impl MultiplexNetwork {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            layers: Vec::new(),
            inter_links: BTreeMap::new(),
            node_names: Vec::new(),
            num_intra_links_found: 0,
            num_inter_links_found: 0,
        }
    }

    // ========================================================================
    // Input
    // ========================================================================

    /// Read a multiplex network file.
    ///
    /// Fails with [`Error::Implementation`] if the configured input
    /// format is not [`InputFormat::Multiplex`], before touching the
    /// file.
    pub fn read_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.check_input_format()?;
        let path = path.as_ref();
        info!(path = %path.display(), "parsing multiplex network");
        let file = File::open(path)?;
        self.read_lines(BufReader::new(file))
    }

    /// Read multiplex records from any buffered reader.
    pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<()> {
        self.check_input_format()?;
        self.read_lines(reader)
    }

    fn check_input_format(&self) -> Result<()> {
        if self.config.input_format != InputFormat::Multiplex {
            return Err(Error::Implementation(
                "multiplex network only supports multiplex data input".into(),
            ));
        }
        Ok(())
    }

    fn read_lines<R: BufRead>(&mut self, reader: R) -> Result<()> {
        let mut intra = true;
        for line in reader.lines() {
            let line = line?;
            match parse::classify(&line) {
                LineKind::Blank | LineKind::Comment => {}
                LineKind::SectionIntra => intra = true,
                LineKind::SectionInter => intra = false,
                LineKind::Record(record) => {
                    if intra {
                        let r = parse::parse_intra(record, self.config.index_offset)?;
                        self.add_intra_link(r.layer, r.n1, r.n2, r.weight);
                    } else {
                        let r = parse::parse_inter(record, self.config.index_offset)?;
                        self.add_inter_link(r.phys, r.layer1, r.layer2, r.weight);
                    }
                }
            }
        }

        if self.layers.len() < 2 {
            return Err(Error::InputDomain(
                "need at least two layers of network data for a multiplex network".into(),
            ));
        }

        info!(
            intra_links = self.num_intra_links_found,
            inter_links = self.num_inter_links_found,
            layers = self.layers.len(),
            "parsing done"
        );
        Ok(())
    }

    // ========================================================================
    // Accumulation
    // ========================================================================

    /// Add an intra-layer link, growing the layer vector on demand.
    pub fn add_intra_link(&mut self, layer: u32, n1: u32, n2: u32, weight: f64) {
        while self.layers.len() < layer as usize + 1 {
            self.layers.push(LayerGraph::new());
        }
        self.layers[layer as usize].add_link(n1, n2, weight);
        self.num_intra_links_found += 1;
    }

    /// Add an inter-layer link declaration; equal keys sum additively.
    pub fn add_inter_link(&mut self, phys: u32, layer1: u32, layer2: u32, weight: f64) {
        *self
            .inter_links
            .entry(InterLinkKey::new(phys, layer1, layer2))
            .or_insert(0.0) += weight;
        self.num_inter_links_found += 1;
    }

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn layers(&self) -> &[LayerGraph] {
        &self.layers
    }

    pub fn inter_links(&self) -> &BTreeMap<InterLinkKey, f64> {
        &self.inter_links
    }

    // ========================================================================
    // Reconciliation + expansion
    // ========================================================================

    /// Expand the accumulated multiplex into a memory network.
    ///
    /// Phases: finalize layers, reconcile node counts, generate intra
    /// state links, redistribute inter links, index the state nodes.
    pub fn into_memory_network(mut self) -> Result<MemoryNetwork> {
        if self.layers.len() < 2 {
            return Err(Error::InputDomain(
                "need at least two layers of network data for a multiplex network".into(),
            ));
        }

        let max_num_nodes = self.reconcile_layers();
        debug!(num_nodes = max_num_nodes, "layers reconciled");

        info!("generating memory network");
        let mut builder = MemoryBuilder::new();
        self.generate_intra_state_links(&mut builder);
        self.generate_inter_state_links(&mut builder);

        let names = self
            .node_names
            .into_iter()
            .enumerate()
            .map(|(i, name)| (i as u32, name))
            .collect();
        Ok(builder.finish(names, max_num_nodes))
    }

    /// Finalize every layer, then re-finalize the smaller ones so all
    /// layers address the same physical node range. Adopts display
    /// names from the first layer that has any.
    fn reconcile_layers(&mut self) -> u32 {
        let mut max_num_nodes = 0;
        let mut different_node_count = false;
        for layer in &mut self.layers {
            layer.finalize(None);
            let n = layer.num_nodes();
            if max_num_nodes != 0 && n != max_num_nodes {
                different_node_count = true;
            }
            max_num_nodes = max_num_nodes.max(n);

            if self.node_names.is_empty() && !layer.node_names().is_empty() {
                self.node_names = layer.take_node_names();
            }
        }

        if different_node_count {
            for (index, layer) in self.layers.iter_mut().enumerate() {
                if layer.num_nodes() != max_num_nodes {
                    info!(
                        layer = index + 1,
                        from = layer.num_nodes(),
                        to = max_num_nodes,
                        "adjusting for equal number of nodes"
                    );
                    layer.finalize(Some(max_num_nodes));
                }
            }
        }
        max_num_nodes
    }

    /// Turn each layer's intra links into state links within that layer.
    fn generate_intra_state_links(&self, builder: &mut MemoryBuilder) {
        for (layer_index, layer) in self.layers.iter().enumerate() {
            let layer_index = layer_index as u32;
            for (&n1, targets) in layer.link_map() {
                for (&n2, &weight) in targets {
                    builder.insert_state_link(
                        StateNode::new(layer_index, n1),
                        StateNode::new(layer_index, n2),
                        weight,
                    );
                    // Out-weight is attributed at the source; a self-link
                    // only counts when self-links are included.
                    if self.config.include_self_links || n1 != n2 {
                        builder.register_state_node(StateNode::new(layer_index, n1), weight);
                    }
                    builder.register_state_node(StateNode::new(layer_index, n2), 0.0);
                }
            }
        }
    }

    /// Turn each aggregated inter-link entry into state links according
    /// to the configured strategy. Same-layer entries are skipped.
    fn generate_inter_state_links(&self, builder: &mut MemoryBuilder) {
        for (&key, &weight) in &self.inter_links {
            if key.is_self_transition() {
                continue;
            }
            match self.config.inter_link_strategy {
                InterLinkStrategy::Redistribute => {
                    builder.redistribute_inter_link(key, weight);
                }
                InterLinkStrategy::PhysicalSwitch => {
                    let from = StateNode::new(key.layer1, key.phys);
                    let to = StateNode::new(key.layer2, key.phys);
                    builder.insert_state_link(from, to, weight);
                    builder.register_state_node(from, 0.0);
                    builder.register_state_node(to, 0.0);
                }
            }
        }
    }
}
