pub mod canon;
pub mod completions;
pub mod cycles;
pub mod deps;
pub mod run;
pub mod session;
pub mod view;

use anyhow::Context;
use std::io::Read;
use std::path::Path;

/// Read a command's input text: the named file, or stdin when the path is
/// omitted or `-`.
pub fn read_input(file: Option<&Path>) -> anyhow::Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}
