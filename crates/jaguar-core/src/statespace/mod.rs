//! State-space graphs produced by the external simulator.
//!
//! The simulator writes a DOT file whose edge statements look like
//!
//! ```text
//!   "0 0 1" -> "0 1 1";
//! ```
//!
//! where each quoted label is one system state as space-separated binary
//! digits. This module never rewrites those lines; it only reorders them
//! ([`canonical`]) or reads them ([`transitions`]).

pub mod canonical;
pub mod key;
pub mod transitions;

use std::sync::OnceLock;

use regex::Regex;

/// Edge statement between two quoted binary state labels.
///
/// Group 1 is the source label, group 2 the target label.
pub(crate) fn edge_statement_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#""([01 ]+)"\s*->\s*"([01 ]+)""#).expect("edge statement pattern is valid")
    })
}

/// Return the `(source, target)` labels of the first edge statement in
/// `line`, verbatim (spaces included).
pub(crate) fn edge_labels(line: &str) -> Option<(&str, &str)> {
    let caps = edge_statement_re().captures(line)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}
