//! Last-submitted system text, persisted between invocations.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::config::JaguarConfig;

/// System shown when nothing has been submitted yet.
pub const DEFAULT_SYSTEM_TEXT: &str = "NUMBER OF VARIABLES: 3\n\
                                       NUMBER OF STATES: 2\n\
                                       x1 = x2\n\
                                       x2 = x1 + x3\n\
                                       x3 = x2 + x1\n";

const LAST_SYSTEM_FILE: &str = "last_system.pds";

/// Trim a submission; blank input falls back to [`DEFAULT_SYSTEM_TEXT`].
#[must_use]
pub fn normalize_submission(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        DEFAULT_SYSTEM_TEXT.to_string()
    } else {
        trimmed.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn from_config(config: &JaguarConfig, project_root: &Path) -> Self {
        Self::new(project_root.join(&config.session.dir))
    }

    fn last_system_path(&self) -> PathBuf {
        self.dir.join(LAST_SYSTEM_FILE)
    }

    pub fn has_saved(&self) -> bool {
        self.last_system_path().is_file()
    }

    /// The stored system text, or [`DEFAULT_SYSTEM_TEXT`] when none is stored.
    pub fn last_system_text(&self) -> Result<String> {
        let path = self.last_system_path();
        if !path.exists() {
            return Ok(DEFAULT_SYSTEM_TEXT.to_string());
        }
        std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))
    }

    pub fn save(&self, text: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.last_system_path();
        std::fs::write(&path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), bytes = text.len(), "saved session system");
        Ok(())
    }

    /// Remove the stored text. Returns `false` if nothing was stored.
    pub fn clear(&self) -> Result<bool> {
        let path = self.last_system_path();
        if !path.exists() {
            return Ok(false);
        }
        std::fs::remove_file(&path)
            .with_context(|| format!("Failed to remove {}", path.display()))?;
        Ok(true)
    }
}
