//! Variable dependency graph extracted from equation text.
//!
//! # Overview
//!
//! An equation system is free text. Lines of the form `<var> = <expr>` are
//! equations; everything else (blank lines, `#` comments, header lines such
//! as `NUMBER OF VARIABLES: 3`) is skipped without complaint. Each equation
//! contributes its target and every variable its right-hand side reads.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "A's equation **reads** B". Edges point from the
//! defined variable to the variables it depends on, which is the reverse of
//! a dataflow arrow. For `x2 = x1 + x3` we insert `x2 → x1` and `x2 → x3`.
//!
//! ## Determinism
//!
//! Nodes and edges live in `BTreeSet`s, so iteration (and therefore the
//! emitted DOT) is sorted and identical for identical input.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeSet, HashMap};

use petgraph::algo::kosaraju_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use tracing::{debug, instrument};

use crate::grammar::{IndexedVariables, VariableGrammar};
use crate::graph::emit::{DotStyle, emit_digraph};
use crate::label::subscript_label;

// ---------------------------------------------------------------------------
// Equation parsing
// ---------------------------------------------------------------------------

/// One accepted equation line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    /// Variable assigned on the left-hand side.
    pub target: String,
    /// Variables read on the right-hand side, in order of appearance.
    /// Repeats and self-references are kept as written.
    pub references: Vec<String>,
}

/// Parse the equation lines of `text` using the `x<digits>` grammar.
#[must_use]
pub fn parse_equations(text: &str) -> Vec<Equation> {
    parse_equations_with(text, &IndexedVariables)
}

/// Parse the equation lines of `text` using `grammar`.
#[must_use]
pub fn parse_equations_with<G: VariableGrammar + ?Sized>(text: &str, grammar: &G) -> Vec<Equation> {
    let mut equations = Vec::new();
    let mut skipped = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some(target) = grammar.assignment_target(line) else {
            skipped += 1;
            continue;
        };

        let rhs = line.split_once('=').map_or("", |(_, rhs)| rhs);
        let references = grammar
            .references(rhs)
            .into_iter()
            .map(str::to_string)
            .collect();

        equations.push(Equation {
            target: target.to_string(),
            references,
        });
    }

    debug!(
        equations = equations.len(),
        skipped, "parsed equation system"
    );
    equations
}

// ---------------------------------------------------------------------------
// DependencyGraph
// ---------------------------------------------------------------------------

/// Directed dependency graph over the variables of an equation system.
///
/// Nodes are variable names. An edge `A → B` means "A's equation reads B".
/// Self-references never produce an edge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    nodes: BTreeSet<String>,
    edges: BTreeSet<(String, String)>,
}

impl DependencyGraph {
    /// Build the graph from an equation-system text with the default grammar.
    #[must_use]
    #[instrument(skip(text), fields(bytes = text.len()))]
    pub fn from_system_text(text: &str) -> Self {
        Self::from_equations(&parse_equations(text))
    }

    /// Build the graph from an equation-system text with a custom grammar.
    #[must_use]
    pub fn from_system_text_with<G: VariableGrammar + ?Sized>(text: &str, grammar: &G) -> Self {
        Self::from_equations(&parse_equations_with(text, grammar))
    }

    /// Build the graph from already parsed equations.
    #[must_use]
    pub fn from_equations(equations: &[Equation]) -> Self {
        let mut graph = Self::default();

        for eq in equations {
            graph.nodes.insert(eq.target.clone());
            for var in &eq.references {
                graph.nodes.insert(var.clone());
                if *var != eq.target {
                    graph.edges.insert((eq.target.clone(), var.clone()));
                }
            }
        }

        graph
    }

    /// Return `true` when no variable was found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Variables in sorted order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// Edges as `(reader, read)` pairs, sorted.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.edges.iter().map(|(s, t)| (s.as_str(), t.as_str()))
    }

    #[must_use]
    pub fn contains_node(&self, var: &str) -> bool {
        self.nodes.contains(var)
    }

    #[must_use]
    pub fn contains_edge(&self, source: &str, target: &str) -> bool {
        self.edges.contains(&(source.to_owned(), target.to_owned()))
    }

    /// Variables that `var`'s equation reads (outgoing edges), sorted.
    #[must_use]
    pub fn reads_of(&self, var: &str) -> Vec<&str> {
        self.edges()
            .filter(|(s, _)| *s == var)
            .map(|(_, t)| t)
            .collect()
    }

    /// Variables whose equations read `var` (incoming edges), sorted.
    #[must_use]
    pub fn readers_of(&self, var: &str) -> Vec<&str> {
        self.edges()
            .filter(|(_, t)| *t == var)
            .map(|(s, _)| s)
            .collect()
    }

    /// BLAKE3 fingerprint of the node and edge sets.
    ///
    /// Equal graphs hash equally regardless of how the source text was
    /// laid out; any node or edge change produces a different hash.
    #[must_use]
    pub fn content_hash(&self) -> String {
        let mut hasher = blake3::Hasher::new();
        for node in &self.nodes {
            hasher.update(node.as_bytes());
            hasher.update(b"\x00");
        }
        hasher.update(b"\x01");
        for (source, target) in &self.edges {
            hasher.update(source.as_bytes());
            hasher.update(b"\x00");
            hasher.update(target.as_bytes());
            hasher.update(b"\x00");
        }
        format!("blake3:{}", hasher.finalize())
    }

    /// Convert to a petgraph `DiGraph`, inserting nodes in sorted order.
    #[must_use]
    pub fn to_digraph(&self) -> (DiGraph<String, ()>, HashMap<String, NodeIndex>) {
        let mut graph = DiGraph::<String, ()>::with_capacity(self.nodes.len(), self.edges.len());
        let mut node_map = HashMap::with_capacity(self.nodes.len());

        for node in &self.nodes {
            let idx = graph.add_node(node.clone());
            node_map.insert(node.clone(), idx);
        }
        for (source, target) in &self.edges {
            if let (Some(&s), Some(&t)) = (node_map.get(source), node_map.get(target)) {
                graph.add_edge(s, t, ());
            }
        }

        (graph, node_map)
    }

    /// Groups of variables that (transitively) read each other.
    ///
    /// Each group is a strongly connected component with more than one
    /// member, sorted; the list of groups is sorted too.
    #[must_use]
    pub fn feedback_loops(&self) -> Vec<Vec<String>> {
        let (graph, _) = self.to_digraph();

        let mut loops: Vec<Vec<String>> = kosaraju_scc(&graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut vars: Vec<String> = component
                    .into_iter()
                    .filter_map(|idx| graph.node_weight(idx).cloned())
                    .collect();
                vars.sort_unstable();
                vars
            })
            .collect();

        loops.sort_unstable();
        loops
    }

    /// Emit the graph as DOT with subscript node labels.
    ///
    /// Returns an empty string when the graph is empty, meaning "nothing to
    /// render".
    #[must_use]
    pub fn to_dot(&self, style: &DotStyle) -> String {
        if self.is_empty() {
            return String::new();
        }
        emit_digraph(style, self.nodes(), self.edges(), subscript_label)
    }
}

/// Build the dependency DOT for `text` with the default style.
///
/// Returns an empty string when `text` contains no equations.
#[must_use]
pub fn build_dependency_dot(text: &str) -> String {
    DependencyGraph::from_system_text(text).to_dot(&DotStyle::default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
