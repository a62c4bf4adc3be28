//! `jaguar deps`: print the variable dependency graph of an equation system.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use jaguar_core::DependencyGraph;
use serde::Serialize;

use crate::config::JaguarConfig;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode, write_artifact};

/// Arguments for `jaguar deps`.
#[derive(Args, Debug, Default)]
pub struct DepsArgs {
    /// Equation system file; omit or pass `-` to read stdin.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct DepsOutput {
    dot: String,
    nodes: Vec<String>,
    edges: Vec<(String, String)>,
    feedback_loops: Vec<Vec<String>>,
    content_hash: String,
}

impl DepsOutput {
    fn from_graph(graph: &DependencyGraph, config: &JaguarConfig) -> Self {
        Self {
            dot: graph.to_dot(&config.style),
            nodes: graph.nodes().map(str::to_string).collect(),
            edges: graph
                .edges()
                .map(|(s, t)| (s.to_string(), t.to_string()))
                .collect(),
            feedback_loops: graph.feedback_loops(),
            content_hash: graph.content_hash(),
        }
    }
}

/// Execute `jaguar deps`.
pub fn run_deps(args: &DepsArgs, output: OutputMode, config: &JaguarConfig) -> anyhow::Result<()> {
    let text = super::read_input(args.file.as_deref())?;
    let graph = DependencyGraph::from_system_text(&text);
    let payload = DepsOutput::from_graph(&graph, config);

    render_mode(
        output,
        &payload,
        |p, w| write_artifact(w, &p.dot),
        render_deps_pretty,
    )
}

fn render_deps_pretty(payload: &DepsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.dot.is_empty() {
        writeln!(w, "No dependency graph: no equations found.")?;
        return Ok(());
    }

    write_artifact(w, &payload.dot)?;
    writeln!(w)?;
    pretty_section(w, "Summary")?;
    pretty_kv(w, "variables", payload.nodes.len().to_string())?;
    pretty_kv(w, "dependencies", payload.edges.len().to_string())?;
    for group in &payload.feedback_loops {
        pretty_kv(w, "feedback", group.join(", "))?;
    }
    pretty_kv(w, "hash", &payload.content_hash)?;
    Ok(())
}
