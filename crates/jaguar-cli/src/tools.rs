//! External programs: the simulator and the Graphviz renderer.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, instrument};

use crate::config::RendererConfig;

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("{program} not found")]
    NotFound { program: String },
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{program} exited with {status}: {stderr}")]
    ExitStatus {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("{program} did not produce {}", path.display())]
    MissingOutput { program: String, path: PathBuf },
}

/// Run `program` with `args` in `cwd` and wait for it.
///
/// # Errors
///
/// Returns [`ToolError::NotFound`] if the program cannot be located,
/// [`ToolError::Spawn`] for other launch failures and
/// [`ToolError::ExitStatus`] if it exits unsuccessfully.
#[instrument(skip_all, fields(program = %program.as_ref().to_string_lossy()))]
pub fn run_tool<P, I, S>(program: P, args: I, cwd: &Path) -> Result<(), ToolError>
where
    P: AsRef<OsStr>,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let name = program.as_ref().to_string_lossy().into_owned();
    let output = Command::new(program.as_ref())
        .args(args)
        .current_dir(cwd)
        .output()
        .map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ToolError::NotFound {
                    program: name.clone(),
                }
            } else {
                ToolError::Spawn {
                    program: name.clone(),
                    source,
                }
            }
        })?;

    if !output.status.success() {
        return Err(ToolError::ExitStatus {
            program: name,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    debug!(program = %name, "tool finished");
    Ok(())
}

/// Render `dot_path` into `out_path` and return the rendered text.
///
/// # Errors
///
/// Any [`ToolError`] from running the renderer, or
/// [`ToolError::MissingOutput`] if the output file is absent afterwards.
pub fn render_graph(
    renderer: &RendererConfig,
    dot_path: &Path,
    out_path: &Path,
    cwd: &Path,
) -> Result<String, ToolError> {
    let format_flag = format!("-T{}", renderer.format);
    run_tool(
        &renderer.program,
        [
            OsStr::new(&format_flag),
            OsStr::new("-o"),
            out_path.as_os_str(),
            dot_path.as_os_str(),
        ],
        cwd,
    )?;
    std::fs::read_to_string(out_path).map_err(|_| ToolError::MissingOutput {
        program: renderer.program.clone(),
        path: out_path.to_path_buf(),
    })
}
