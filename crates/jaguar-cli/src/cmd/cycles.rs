//! `jaguar cycles`: list the attractors of a state-space DOT.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use jaguar_core::{Attractor, find_attractors, parse_transitions};
use serde::Serialize;

use crate::output::{OutputMode, render_mode};

/// Arguments for `jaguar cycles`.
#[derive(Args, Debug, Default)]
pub struct CyclesArgs {
    /// State-space DOT file; omit or pass `-` to read stdin.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct AttractorRow {
    states: Vec<String>,
    fixed_point: bool,
}

#[derive(Debug, Serialize)]
struct CyclesOutput {
    transitions: usize,
    attractors: Vec<AttractorRow>,
}

impl From<&Attractor> for AttractorRow {
    fn from(attractor: &Attractor) -> Self {
        Self {
            states: attractor.states.clone(),
            fixed_point: attractor.is_fixed_point(),
        }
    }
}

/// Execute `jaguar cycles`.
pub fn run_cycles(args: &CyclesArgs, output: OutputMode) -> anyhow::Result<()> {
    let dot = super::read_input(args.file.as_deref())?;
    let payload = collect(&dot);
    render_mode(output, &payload, render_cycles_text, render_cycles_human)
}

fn collect(dot: &str) -> CyclesOutput {
    let transitions = parse_transitions(dot);
    let attractors = find_attractors(&transitions);
    CyclesOutput {
        transitions: transitions.len(),
        attractors: attractors.iter().map(AttractorRow::from).collect(),
    }
}

/// One attractor per line, states tab-separated.
fn render_cycles_text(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for row in &payload.attractors {
        writeln!(w, "{}", row.states.join("\t"))?;
    }
    Ok(())
}

fn render_cycles_human(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.attractors.is_empty() {
        writeln!(w, "No attractors found.")?;
        return Ok(());
    }

    writeln!(
        w,
        "Attractors ({}) from {} transitions",
        payload.attractors.len(),
        payload.transitions
    )?;
    for (idx, row) in payload.attractors.iter().enumerate() {
        if row.fixed_point {
            writeln!(w, "\n{}. fixed point", idx + 1)?;
        } else {
            writeln!(w, "\n{}. cycle of length {}", idx + 1, row.states.len())?;
        }
        for state in &row.states {
            writeln!(w, "  - {state}")?;
        }
    }
    Ok(())
}
