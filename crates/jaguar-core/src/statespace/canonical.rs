//! Canonical edge order for state-space DOT.
//!
//! # Overview
//!
//! Graphviz lays nodes out roughly in the order their edges appear. Sorting
//! the simulator's edge statements by source state (see [`StateKey`]) groups
//! the rendering by distance from the all-zero state without touching the
//! layout engine.
//!
//! The transformation is a pure line permutation:
//!
//! 1. The closing line (last line that trims to `}`) is set aside.
//! 2. Lines containing an edge statement are edge lines; all other lines are
//!    prefix lines and keep their relative order.
//! 3. Edge lines are stable-sorted by the key of their source label.
//! 4. Output: prefix lines, sorted edge lines, closing line (if any).
//!
//! No line is added, removed or edited, and applying the transformation to
//! its own output changes nothing.

use tracing::{debug, instrument};

use crate::graph::emit::CLOSING_LINE;
use crate::statespace::edge_labels;
use crate::statespace::key::StateKey;

/// Reorder the edge statements of a state-space DOT text.
///
/// Lines are joined with `\n`; a trailing newline in the input is not
/// preserved. A closing line is never synthesised.
#[must_use]
#[instrument(skip(dot), fields(bytes = dot.len()))]
pub fn canonicalize_statespace_dot(dot: &str) -> String {
    let lines: Vec<&str> = dot.lines().collect();
    let closing = lines.iter().rposition(|line| line.trim() == CLOSING_LINE);

    let mut prefix: Vec<&str> = Vec::with_capacity(lines.len());
    let mut edges: Vec<(StateKey, &str)> = Vec::new();

    for (idx, line) in lines.iter().copied().enumerate() {
        if Some(idx) == closing {
            continue;
        }
        match edge_labels(line) {
            Some((source, _)) => edges.push((StateKey::from_label(source), line)),
            None => prefix.push(line),
        }
    }

    // `sort_by` is stable: equal keys keep their input order.
    edges.sort_by(|a, b| a.0.cmp(&b.0));
    debug!(
        prefix = prefix.len(),
        edges = edges.len(),
        closing = closing.is_some(),
        "canonicalized state-space edges"
    );

    let mut out = prefix;
    out.extend(edges.into_iter().map(|(_, line)| line));
    if let Some(idx) = closing {
        out.push(lines[idx]);
    }
    out.join("\n")
}

/// Return `true` if `dot` contains at least one state-transition edge.
#[must_use]
pub fn has_transitions(dot: &str) -> bool {
    dot.lines().any(|line| edge_labels(line).is_some())
}
