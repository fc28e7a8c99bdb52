//! End-to-end tests for the export surface.

use memplex_rs::{export, Config, MultiplexNetwork, StateNode};

fn sample() -> memplex_rs::MemoryNetwork {
    let input = "*Intra\n1 1 2 2\n2 1 2\n*Inter\n1 1 2 4\n";
    let mut net = MultiplexNetwork::new(Config::default());
    net.read_from(input.as_bytes()).unwrap();
    net.into_memory_network().unwrap()
}

// ============================================================================
// 1. Text listing
// ============================================================================

#[test]
fn test_listing_indices_match_assignment() {
    let net = sample();
    let mut out = Vec::new();
    export::write_states(&net, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let states_at = text.find("*States").unwrap();
    let links_at = text.find("*Links").unwrap();
    assert!(states_at < links_at);

    // One state line per assigned index, in order
    let state_lines: Vec<&str> = text[states_at..links_at]
        .lines()
        .skip(1)
        .filter(|l| !l.is_empty())
        .collect();
    assert_eq!(state_lines.len(), net.num_states());
    for (index, line) in state_lines.iter().enumerate() {
        assert!(line.starts_with(&format!("{index} ")));
    }
}

#[test]
fn test_listing_link_uses_assigned_indices() {
    let net = sample();
    let mut out = Vec::new();
    export::write_states(&net, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();

    let from = net.index_of(StateNode::new(0, 0)).unwrap();
    let to = net.index_of(StateNode::new(0, 1)).unwrap();
    assert!(text.contains(&format!("{from} {to} 2")));
}

// ============================================================================
// 2. JSON
// ============================================================================

#[test]
fn test_json_preserves_totals() {
    let net = sample();
    let json = export::to_json(&net).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total_weight"].as_f64(), Some(net.total_weight));
    assert_eq!(value["num_links"].as_u64(), Some(net.num_links));
}
