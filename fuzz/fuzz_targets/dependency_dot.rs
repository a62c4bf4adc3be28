#![no_main]

use jaguar_core::{DependencyGraph, DotStyle};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let graph = DependencyGraph::from_system_text(data);
    let dot = graph.to_dot(&DotStyle::default());
    assert_eq!(dot.is_empty(), graph.is_empty());
    for (source, target) in graph.edges() {
        assert_ne!(source, target);
        assert!(graph.contains_node(source) && graph.contains_node(target));
    }
    let _ = graph.feedback_loops();
});
