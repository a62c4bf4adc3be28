//! `jaguar view`: print one rendered graph of the session's system.

use std::path::Path;

use clap::{Args, ValueEnum};

use crate::artifacts::compute_system_artifacts;
use crate::config::JaguarConfig;
use crate::output::{CliError, OutputMode, render_error, render_mode, write_artifact};
use crate::session::SessionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GraphKind {
    Statespace,
    Dependency,
}

/// Arguments for `jaguar view`.
#[derive(Args, Debug)]
pub struct ViewArgs {
    /// Which graph to print.
    #[arg(value_enum)]
    pub kind: GraphKind,
}

#[derive(Debug, serde::Serialize)]
struct ViewOutput {
    kind: &'static str,
    svg: String,
}

const fn kind_name(kind: GraphKind) -> &'static str {
    match kind {
        GraphKind::Statespace => "statespace",
        GraphKind::Dependency => "dependency",
    }
}

/// Execute `jaguar view`.
pub fn run_view(
    args: &ViewArgs,
    output: OutputMode,
    config: &JaguarConfig,
    project_root: &Path,
) -> anyhow::Result<()> {
    let text = SessionStore::from_config(config, project_root).last_system_text()?;
    let artifacts = compute_system_artifacts(&text, config, project_root)?;
    let svg = match args.kind {
        GraphKind::Statespace => artifacts.statespace_svg,
        GraphKind::Dependency => artifacts.depgraph_svg,
    };

    let name = kind_name(args.kind);
    if svg.is_empty() {
        render_error(
            output,
            &CliError::with_details(
                format!("nothing to show: the {name} graph is unavailable"),
                "check that the simulator and renderer are installed, then `jaguar run`",
                "nothing_to_show",
            ),
        )?;
        anyhow::bail!("nothing to show");
    }

    let payload = ViewOutput { kind: name, svg };
    render_mode(output, &payload, write_svg, write_svg)
}

fn write_svg(payload: &ViewOutput, w: &mut dyn std::io::Write) -> std::io::Result<()> {
    write_artifact(w, &payload.svg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_args_parse_kind() {
        use clap::Parser;

        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            args: ViewArgs,
        }

        let parsed = Wrapper::parse_from(["test", "statespace"]);
        assert_eq!(parsed.args.kind, GraphKind::Statespace);
        assert!(Wrapper::try_parse_from(["test", "limitcycles"]).is_err());
    }

    #[test]
    fn unavailable_graph_is_an_error() {
        let root = tempfile::tempdir().expect("tempdir");
        let mut config = JaguarConfig::default();
        config.renderer.program = root.path().join("no-dot").to_string_lossy().into_owned();
        let err = run_view(
            &ViewArgs {
                kind: GraphKind::Dependency,
            },
            OutputMode::Text,
            &config,
            root.path(),
        )
        .expect_err("renderer is missing");
        assert_eq!(err.to_string(), "nothing to show");
    }
}
