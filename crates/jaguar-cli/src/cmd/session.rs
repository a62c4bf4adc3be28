//! `jaguar session`: inspect or reset the stored system text.

use std::io::Write;
use std::path::Path;

use clap::Subcommand;
use serde::Serialize;

use crate::config::JaguarConfig;
use crate::output::{OutputMode, render_mode, write_artifact};
use crate::session::SessionStore;

#[derive(Subcommand, Debug)]
pub enum SessionCommand {
    #[command(about = "Print the last submitted system (or the default one)")]
    Show,
    #[command(about = "Forget the last submitted system")]
    Clear,
}

#[derive(Debug, Serialize)]
struct ShowOutput {
    saved: bool,
    text: String,
}

#[derive(Debug, Serialize)]
struct ClearOutput {
    cleared: bool,
}

/// Execute `jaguar session <command>`.
pub fn run_session(
    command: &SessionCommand,
    output: OutputMode,
    config: &JaguarConfig,
    project_root: &Path,
) -> anyhow::Result<()> {
    let store = SessionStore::from_config(config, project_root);
    match command {
        SessionCommand::Show => {
            let payload = ShowOutput {
                saved: store.has_saved(),
                text: store.last_system_text()?,
            };
            render_mode(output, &payload, write_show, write_show)
        }
        SessionCommand::Clear => {
            let payload = ClearOutput {
                cleared: store.clear()?,
            };
            render_mode(output, &payload, render_clear_human, render_clear_human)
        }
    }
}

fn write_show(payload: &ShowOutput, w: &mut dyn Write) -> std::io::Result<()> {
    write_artifact(w, &payload.text)
}

fn render_clear_human(payload: &ClearOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.cleared {
        writeln!(w, "Session cleared.")
    } else {
        writeln!(w, "Nothing stored.")
    }
}
