#![forbid(unsafe_code)]
//! jaguar-core library.
//!
//! Pure text transformations behind the jaguar tool: extracting a variable
//! dependency graph from an equation system, emitting it as Graphviz DOT,
//! and canonicalizing externally produced state-space graphs.
//!
//! # Conventions
//!
//! - **Errors**: Nothing here fails. Malformed input lines are skipped and
//!   "nothing found" is an empty string or an empty collection.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`); never print.

pub mod grammar;
pub mod graph;
pub mod label;
pub mod statespace;

pub use grammar::{IndexedVariables, PatternGrammar, VariableGrammar};
pub use graph::dependency::{DependencyGraph, Equation, build_dependency_dot, parse_equations};
pub use graph::emit::DotStyle;
pub use label::subscript_label;
pub use statespace::canonical::canonicalize_statespace_dot;
pub use statespace::key::StateKey;
pub use statespace::transitions::{Attractor, Transition, find_attractors, parse_transitions};
