//! `jaguar canon`: reorder the edges of a state-space DOT.

use std::path::PathBuf;

use clap::Args;
use jaguar_core::canonicalize_statespace_dot;
use jaguar_core::statespace::canonical::has_transitions;
use serde::Serialize;
use tracing::warn;

use crate::output::{OutputMode, render_mode, write_artifact};

/// Arguments for `jaguar canon`.
#[derive(Args, Debug, Default)]
pub struct CanonArgs {
    /// State-space DOT file; omit or pass `-` to read stdin.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CanonOutput {
    dot: String,
    has_transitions: bool,
}

/// Execute `jaguar canon`.
pub fn run_canon(args: &CanonArgs, output: OutputMode) -> anyhow::Result<()> {
    let raw = super::read_input(args.file.as_deref())?;
    let payload = canonicalize(&raw);
    if !payload.has_transitions {
        warn!("input contains no state transitions");
    }

    render_mode(output, &payload, write_canon, write_canon)
}

fn write_canon(payload: &CanonOutput, w: &mut dyn std::io::Write) -> std::io::Result<()> {
    write_artifact(w, &payload.dot)
}

fn canonicalize(raw: &str) -> CanonOutput {
    let dot = canonicalize_statespace_dot(raw);
    CanonOutput {
        has_transitions: has_transitions(&dot),
        dot,
    }
}
