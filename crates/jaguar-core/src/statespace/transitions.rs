//! State transitions and their attractors.
//!
//! # Overview
//!
//! Every edge statement of a state-space DOT is one [`Transition`]. The
//! transition graph of a deterministic system is a functional graph: each
//! state has exactly one successor, so every trajectory ends on a cycle.
//! Those terminal cycles are the system's limit cycles; cycles of length 1
//! are fixed points.
//!
//! [`find_attractors`] reports strongly connected components that contain a
//! cycle and have no transition leaving them. It also accepts
//! non-deterministic graphs; there a terminal component may not be a simple
//! cycle, and its states are listed in [`StateKey`] order instead of walk
//! order.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};
use std::fmt;

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tracing::{debug, instrument};

use crate::statespace::edge_labels;
use crate::statespace::key::StateKey;

/// One edge statement of a state-space graph. Labels are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Transition {
    pub source: String,
    pub target: String,
}

/// A terminal cycle of the transition graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attractor {
    /// States in cycle order, starting from the smallest [`StateKey`].
    pub states: Vec<String>,
}

impl Attractor {
    /// Number of states on the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// A fixed point is a state that maps to itself.
    #[must_use]
    pub fn is_fixed_point(&self) -> bool {
        self.states.len() == 1
    }
}

impl fmt::Display for Attractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fixed_point() {
            return write!(f, "fixed point: {}", self.states[0]);
        }
        write!(f, "cycle of length {}: ", self.states.len())?;
        for state in &self.states {
            write!(f, "{state} -> ")?;
        }
        match self.states.first() {
            Some(first) => write!(f, "{first}"),
            None => Ok(()),
        }
    }
}

/// Parse every edge statement of a state-space DOT, in input order.
///
/// Only the first edge statement on a line is read; lines without one are
/// ignored.
#[must_use]
pub fn parse_transitions(dot: &str) -> Vec<Transition> {
    dot.lines()
        .filter_map(edge_labels)
        .map(|(source, target)| Transition {
            source: source.to_string(),
            target: target.to_string(),
        })
        .collect()
}

/// Find the attractors of a transition graph.
///
/// Sorted by cycle length, then by the key of the first state.
#[must_use]
#[instrument(skip(transitions), fields(transitions = transitions.len()))]
pub fn find_attractors(transitions: &[Transition]) -> Vec<Attractor> {
    let (graph, _) = build_transition_graph(transitions);

    let mut attractors: Vec<Attractor> = kosaraju_scc(&graph)
        .into_iter()
        .filter(|component| is_cyclic(&graph, component) && is_terminal(&graph, component))
        .map(|component| Attractor {
            states: cycle_order(&graph, &component),
        })
        .collect();

    attractors.sort_by_cached_key(|a| {
        (
            a.len(),
            a.states.first().map(|s| StateKey::from_label(s)).unwrap_or_default(),
        )
    });
    debug!(attractors = attractors.len(), "found attractors");
    attractors
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn build_transition_graph(
    transitions: &[Transition],
) -> (DiGraph<String, ()>, HashMap<String, NodeIndex>) {
    let mut graph = DiGraph::<String, ()>::new();
    let mut node_map: HashMap<String, NodeIndex> = HashMap::new();

    for t in transitions {
        let s = *node_map
            .entry(t.source.clone())
            .or_insert_with(|| graph.add_node(t.source.clone()));
        let d = *node_map
            .entry(t.target.clone())
            .or_insert_with(|| graph.add_node(t.target.clone()));
        if !graph.contains_edge(s, d) {
            graph.add_edge(s, d, ());
        }
    }

    (graph, node_map)
}

fn is_cyclic(graph: &DiGraph<String, ()>, component: &[NodeIndex]) -> bool {
    component.len() > 1 || component.first().is_some_and(|n| graph.contains_edge(*n, *n))
}

fn is_terminal(graph: &DiGraph<String, ()>, component: &[NodeIndex]) -> bool {
    let members: HashSet<NodeIndex> = component.iter().copied().collect();
    component
        .iter()
        .flat_map(|n| graph.edges(*n))
        .all(|e| members.contains(&e.target()))
}

/// Walk the component from its smallest state. Falls back to key order when
/// the walk does not visit every member exactly once.
fn cycle_order(graph: &DiGraph<String, ()>, component: &[NodeIndex]) -> Vec<String> {
    let key_of = |idx: NodeIndex| StateKey::from_label(&graph[idx]);

    let mut by_key: Vec<NodeIndex> = component.to_vec();
    by_key.sort_by_cached_key(|idx| (key_of(*idx), graph[*idx].clone()));

    let Some(&start) = by_key.first() else {
        return Vec::new();
    };

    let mut walk = vec![start];
    let mut seen: HashSet<NodeIndex> = HashSet::from([start]);
    let mut current = start;
    loop {
        let mut successors = graph.neighbors(current);
        let (Some(next), None) = (successors.next(), successors.next()) else {
            break;
        };
        if !seen.insert(next) {
            break;
        }
        walk.push(next);
        current = next;
    }

    let order = if walk.len() == component.len() {
        walk
    } else {
        by_key
    };
    order.into_iter().map(|idx| graph[idx].clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(source: &str, target: &str) -> Transition {
        Transition {
            source: source.to_string(),
            target: target.to_string(),
        }
    }

    #[test]
    fn parse_reads_edge_statements_in_order() {
        let dot = "digraph {\n  \"0 1\" -> \"1 0\";\n  label=\"x\";\n  \"1 0\"->\"0 1\";\n}";
        assert_eq!(
            parse_transitions(dot),
            vec![t("0 1", "1 0"), t("1 0", "0 1")]
        );
    }

    #[test]
    fn fixed_point_and_two_cycle() {
        let transitions = [
            t("0 0", "0 0"),
            t("0 1", "1 0"),
            t("1 0", "0 1"),
            t("1 1", "0 0"),
        ];
        let attractors = find_attractors(&transitions);
        assert_eq!(attractors.len(), 2);

        assert!(attractors[0].is_fixed_point());
        assert_eq!(attractors[0].states, vec!["0 0"]);

        assert_eq!(attractors[1].states, vec!["0 1", "1 0"]);
        assert_eq!(attractors[1].to_string(), "cycle of length 2: 0 1 -> 1 0 -> 0 1");
    }

    #[test]
    fn transient_states_are_not_attractors() {
        // 0 → 1 → 2 → 3 → 1 (three-cycle reached from 0)
        let transitions = [
            t("0 0 0", "0 0 1"),
            t("0 0 1", "0 1 0"),
            t("0 1 0", "0 1 1"),
            t("0 1 1", "0 0 1"),
        ];
        let attractors = find_attractors(&transitions);
        assert_eq!(attractors.len(), 1);
        assert_eq!(attractors[0].states, vec!["0 0 1", "0 1 0", "0 1 1"]);
    }

    #[test]
    fn cycle_starts_at_smallest_key() {
        // 1 1 → 1 0 → 0 1 → 1 1; smallest key is "0 1" (weight 1, value 1).
        let transitions = [t("1 1", "1 0"), t("1 0", "0 1"), t("0 1", "1 1")];
        let attractors = find_attractors(&transitions);
        assert_eq!(attractors[0].states, vec!["0 1", "1 1", "1 0"]);
    }

    #[test]
    fn non_terminal_cycle_is_skipped() {
        let transitions = [t("0", "1"), t("1", "0"), t("1", "1 1"), t("1 1", "1 1")];
        let attractors = find_attractors(&transitions);
        assert_eq!(attractors.len(), 1);
        assert_eq!(attractors[0].to_string(), "fixed point: 1 1");
    }

    #[test]
    fn branching_component_lists_states_by_key() {
        let transitions = [t("0", "1"), t("1", "0"), t("0", "0")];
        let attractors = find_attractors(&transitions);
        assert_eq!(attractors.len(), 1);
        assert_eq!(attractors[0].states, vec!["0", "1"]);
    }

    #[test]
    fn long_cycle_is_walked_in_order() {
        let n = 5000_u32;
        let label = |i: u32| format!("{i:013b}");
        let transitions: Vec<Transition> =
            (0..n).map(|i| t(&label(i), &label((i + 1) % n))).collect();
        let attractors = find_attractors(&transitions);
        assert_eq!(attractors.len(), 1);
        assert_eq!(attractors[0].len(), 5000);
        assert_eq!(attractors[0].states[0], label(0));
        assert_eq!(attractors[0].states[1], label(1));
        assert_eq!(attractors[0].states[4999], label(4999));
    }

    #[test]
    fn no_transitions_no_attractors() {
        assert!(find_attractors(&[]).is_empty());
        assert!(parse_transitions("digraph {}\n").is_empty());
    }
}
