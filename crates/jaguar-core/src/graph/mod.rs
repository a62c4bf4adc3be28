//! Dependency graph module.
//!
//! # Overview
//!
//! ```text
//! equation-system text
//!        ↓  dependency::parse_equations()      (grammar::VariableGrammar)
//! Vec<Equation>
//!        ↓  dependency::DependencyGraph::from_equations()
//! DependencyGraph (sorted node and edge sets)
//!        ↓  DependencyGraph::to_dot()          (emit::emit_digraph + label)
//! DOT text, or "" when there is nothing to render
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use jaguar_core::graph::{dependency::DependencyGraph, emit::DotStyle};
//!
//! let graph = DependencyGraph::from_system_text("x1 = x2\nx2 = x1 + x3");
//! assert_eq!(graph.edge_count(), 3);
//! let dot = graph.to_dot(&DotStyle::default());
//! assert!(dot.contains("\"x2\" -> \"x3\";"));
//! ```

pub mod dependency;
pub mod emit;

pub use dependency::{DependencyGraph, Equation, build_dependency_dot, parse_equations};
pub use emit::DotStyle;
