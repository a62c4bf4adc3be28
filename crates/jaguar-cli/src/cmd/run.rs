//! `jaguar run`: full analysis of an equation system.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::artifacts::{LimitCycleSource, SystemArtifacts, compute_system_artifacts, write_artifacts};
use crate::config::JaguarConfig;
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};
use crate::session::{SessionStore, normalize_submission};

/// Arguments for `jaguar run`.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Equation system file, or `-` for stdin. Without it the session's last
    /// system is analysed again.
    pub file: Option<PathBuf>,

    /// Write the non-empty artifacts into this directory.
    #[arg(long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RunOutput {
    system_text: String,
    #[serde(flatten)]
    artifacts: SystemArtifacts,
    written: Vec<String>,
}

/// Execute `jaguar run`.
pub fn run_run(
    args: &RunArgs,
    output: OutputMode,
    config: &JaguarConfig,
    project_root: &Path,
) -> anyhow::Result<()> {
    let store = SessionStore::from_config(config, project_root);
    let system_text = match args.file.as_deref() {
        Some(path) => {
            let text = normalize_submission(&super::read_input(Some(path))?);
            store.save(&text)?;
            text
        }
        None => store.last_system_text()?,
    };

    let artifacts = compute_system_artifacts(&system_text, config, project_root)?;
    let written = match args.out_dir.as_deref() {
        Some(dir) => {
            let written = write_artifacts(&artifacts, dir)?;
            info!(dir = %dir.display(), files = written.len(), "wrote artifacts");
            written
        }
        None => Vec::new(),
    };

    let payload = RunOutput {
        system_text,
        artifacts,
        written,
    };
    render_mode(output, &payload, render_run_text, render_run_pretty)
}

fn availability(content: &str) -> String {
    if content.is_empty() {
        "unavailable".to_string()
    } else {
        format!("{} bytes", content.len())
    }
}

const fn source_label(source: LimitCycleSource) -> &'static str {
    match source {
        LimitCycleSource::Simulator => "simulator",
        LimitCycleSource::Computed => "computed",
        LimitCycleSource::Unavailable => "unavailable",
    }
}

/// `key<TAB>value` rows for scripting.
fn render_run_text(payload: &RunOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let a = &payload.artifacts;
    writeln!(w, "variables\t{}", a.variables)?;
    writeln!(w, "dependency_hash\t{}", a.dependency_hash)?;
    writeln!(w, "statespace_svg\t{}", a.statespace_svg.len())?;
    writeln!(w, "dependency_svg\t{}", a.depgraph_svg.len())?;
    writeln!(w, "limit_cycles\t{}", source_label(a.limit_cycles_source))?;
    for name in &payload.written {
        writeln!(w, "written\t{name}")?;
    }
    Ok(())
}

fn render_run_pretty(payload: &RunOutput, w: &mut dyn Write) -> std::io::Result<()> {
    let a = &payload.artifacts;

    pretty_section(w, "System")?;
    pretty_kv(w, "variables", a.variables.to_string())?;
    pretty_kv(w, "hash", &a.dependency_hash)?;
    for group in &a.feedback_loops {
        pretty_kv(w, "feedback", group.join(", "))?;
    }

    writeln!(w)?;
    pretty_section(w, "Graphs")?;
    pretty_kv(w, "state space", availability(&a.statespace_svg))?;
    pretty_kv(w, "dependency", availability(&a.depgraph_svg))?;

    writeln!(w)?;
    pretty_section(
        w,
        &format!("Limit cycles ({})", source_label(a.limit_cycles_source)),
    )?;
    if a.limit_cycles.trim().is_empty() {
        writeln!(w, "(none)")?;
    } else {
        for line in a.limit_cycles.lines() {
            writeln!(w, "{line}")?;
        }
    }

    if !payload.written.is_empty() {
        writeln!(w)?;
        pretty_section(w, "Written")?;
        for name in &payload.written {
            writeln!(w, "{name}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunOutput {
        RunOutput {
            system_text: "x1 = x2".to_string(),
            artifacts: SystemArtifacts {
                variables: 2,
                dependency_hash: "blake3:abc".to_string(),
                depgraph_svg: "<svg/>".to_string(),
                limit_cycles: "fixed point: 0 0".to_string(),
                limit_cycles_source: LimitCycleSource::Computed,
                ..SystemArtifacts::default()
            },
            written: vec!["dependency.svg".to_string()],
        }
    }

    #[test]
    fn run_args_parse_out_dir() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: RunArgs,
        }

        let parsed = Wrapper::parse_from(["test", "-", "--out-dir", "out"]);
        assert_eq!(parsed.args.file, Some(PathBuf::from("-")));
        assert_eq!(parsed.args.out_dir, Some(PathBuf::from("out")));
    }

    #[test]
    fn text_rows() {
        let mut out = Vec::new();
        render_run_text(&sample(), &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("variables\t2\n"));
        assert!(rendered.contains("statespace_svg\t0\n"));
        assert!(rendered.contains("dependency_svg\t6\n"));
        assert!(rendered.contains("limit_cycles\tcomputed\n"));
        assert!(rendered.ends_with("written\tdependency.svg\n"));
    }

    #[test]
    fn pretty_sections() {
        let mut out = Vec::new();
        render_run_pretty(&sample(), &mut out).expect("render");
        let rendered = String::from_utf8(out).expect("utf8");
        assert!(rendered.contains("state space:   unavailable"));
        assert!(rendered.contains("dependency:    6 bytes"));
        assert!(rendered.contains("Limit cycles (computed)\n"));
        assert!(rendered.contains("fixed point: 0 0\n"));
    }

    #[test]
    fn json_flattens_artifacts() {
        let json = serde_json::to_value(sample()).expect("json");
        assert_eq!(json["variables"], 2);
        assert_eq!(json["limit_cycles_source"], "computed");
        assert_eq!(json["system_text"], "x1 = x2");
    }
}
