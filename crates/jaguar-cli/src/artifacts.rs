//! The full analysis pipeline for one equation system.
//!
//! # Overview
//!
//! 1. Write the system text to `<scratch>/<system_name>.pds`.
//! 2. Run the simulator there, if its program exists.
//! 3. Canonicalize `<system_name>-statespace.dot` and render it.
//! 4. Read `<system_name>-limitcycles.txt`, or derive attractors from the
//!    state graph when the simulator wrote no report.
//! 5. Build the dependency DOT and render it.
//!
//! Every external step degrades to an empty artifact and a `warn!` log.
//! Only scratch-directory I/O is a hard error.

use anyhow::{Context, Result};
use jaguar_core::statespace::canonical::has_transitions;
use jaguar_core::{
    DependencyGraph, canonicalize_statespace_dot, find_attractors, parse_transitions,
};
use serde::Serialize;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

use crate::config::JaguarConfig;
use crate::tools::{render_graph, run_tool};

/// Where the limit-cycle text came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitCycleSource {
    /// The simulator's own report.
    Simulator,
    /// Attractors of the canonicalized state graph.
    Computed,
    #[default]
    Unavailable,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SystemArtifacts {
    pub statespace_svg: String,
    pub depgraph_svg: String,
    pub limit_cycles: String,
    pub limit_cycles_source: LimitCycleSource,
    /// Canonicalized state-space DOT.
    pub statespace_dot: String,
    pub dependency_dot: String,
    pub dependency_hash: String,
    pub variables: usize,
    pub feedback_loops: Vec<Vec<String>>,
}

/// Run the pipeline in a fresh scratch directory.
///
/// # Errors
///
/// Fails only if the scratch directory or the `.pds` file cannot be
/// created. Simulator and renderer failures yield empty artifacts.
#[instrument(skip_all, fields(bytes = system_text.len()))]
pub fn compute_system_artifacts(
    system_text: &str,
    config: &JaguarConfig,
    project_root: &Path,
) -> Result<SystemArtifacts> {
    let scratch = tempfile::tempdir().context("Failed to create scratch directory")?;
    let work = scratch.path();
    let sim = &config.simulator;

    let pds = work.join(sim.system_file());
    std::fs::write(&pds, system_text)
        .with_context(|| format!("Failed to write {}", pds.display()))?;

    let simulator = sim.program_path(project_root);
    let simulated = simulator.exists();
    if simulated {
        if let Err(err) = run_tool(&simulator, [&sim.system_name], work) {
            warn!(error = %err, "simulator failed; using whatever it wrote");
        }
    } else {
        warn!(
            program = %simulator.display(),
            "simulator not found; state space unavailable"
        );
    }

    let mut artifacts = SystemArtifacts::default();

    if let Some(raw) = read_output(&work.join(sim.statespace_file()), simulated) {
        artifacts.statespace_dot = canonicalize_statespace_dot(&raw);
        artifacts.statespace_svg =
            render_or_placeholder(config, work, "statespace", &artifacts.statespace_dot);
    }

    if let Some(report) = read_output(&work.join(sim.limit_cycles_file()), false) {
        artifacts.limit_cycles = report;
        artifacts.limit_cycles_source = LimitCycleSource::Simulator;
    } else if has_transitions(&artifacts.statespace_dot) {
        let attractors = find_attractors(&parse_transitions(&artifacts.statespace_dot));
        artifacts.limit_cycles = attractors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n");
        artifacts.limit_cycles_source = LimitCycleSource::Computed;
    }

    let graph = DependencyGraph::from_system_text(system_text);
    artifacts.variables = graph.node_count();
    artifacts.dependency_hash = graph.content_hash();
    artifacts.feedback_loops = graph.feedback_loops();
    artifacts.dependency_dot = graph.to_dot(&config.style);
    if !artifacts.dependency_dot.is_empty() {
        artifacts.depgraph_svg =
            render_or_placeholder(config, work, "dependency", &artifacts.dependency_dot);
    }

    info!(
        statespace = !artifacts.statespace_svg.is_empty(),
        dependency = !artifacts.depgraph_svg.is_empty(),
        limit_cycles = ?artifacts.limit_cycles_source,
        "computed system artifacts"
    );
    Ok(artifacts)
}

/// Read a simulator output file.
///
/// A missing file is a warning only when `expected` is set. Any other
/// failure, such as output that is not UTF-8, is always a warning.
fn read_output(path: &Path, expected: bool) -> Option<String> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) if err.kind() == ErrorKind::NotFound && !expected => {
            debug!(path = %path.display(), "simulator output not written");
            None
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                error = %err,
                "unreadable simulator output; leaving placeholder"
            );
            None
        }
    }
}

fn render_or_placeholder(config: &JaguarConfig, work: &Path, stem: &str, dot: &str) -> String {
    match render_in(config, work, stem, dot) {
        Ok(svg) => svg,
        Err(err) => {
            warn!(graph = stem, error = %err, "render failed; leaving placeholder");
            String::new()
        }
    }
}

fn render_in(config: &JaguarConfig, work: &Path, stem: &str, dot: &str) -> Result<String> {
    let dot_path = work.join(format!("{stem}.dot"));
    std::fs::write(&dot_path, dot)
        .with_context(|| format!("Failed to write {}", dot_path.display()))?;
    let out_path = work.join(format!("{stem}.{}", config.renderer.format));
    Ok(render_graph(&config.renderer, &dot_path, &out_path, work)?)
}

/// Write non-empty artifacts into `dir`. Returns the file names written.
///
/// # Errors
///
/// Returns an error if `dir` cannot be created or a file cannot be written.
pub fn write_artifacts(artifacts: &SystemArtifacts, dir: &Path) -> Result<Vec<String>> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create {}", dir.display()))?;

    let files = [
        ("statespace.svg", &artifacts.statespace_svg),
        ("dependency.svg", &artifacts.depgraph_svg),
        ("statespace.dot", &artifacts.statespace_dot),
        ("dependency.dot", &artifacts.dependency_dot),
        ("limitcycles.txt", &artifacts.limit_cycles),
    ];

    let mut written = Vec::new();
    for (name, content) in files {
        if content.is_empty() {
            continue;
        }
        let path = dir.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        written.push(name.to_string());
    }
    Ok(written)
}
