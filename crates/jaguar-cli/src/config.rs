use jaguar_core::DotStyle;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file, looked up in the project root.
pub const CONFIG_FILE: &str = "jaguar.toml";

pub const SIMULATOR_ENV: &str = "JAGUAR_SIMULATOR";
pub const RENDERER_ENV: &str = "JAGUAR_RENDERER";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JaguarConfig {
    #[serde(default)]
    pub simulator: SimulatorConfig,
    #[serde(default)]
    pub renderer: RendererConfig,
    #[serde(default)]
    pub style: DotStyle,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Simulator executable. Relative paths resolve against the project root.
    #[serde(default = "default_simulator_program")]
    pub program: PathBuf,
    /// Base name of the `.pds` file and of the simulator's output files.
    #[serde(default = "default_system_name")]
    pub system_name: String,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            program: default_simulator_program(),
            system_name: default_system_name(),
        }
    }
}

impl SimulatorConfig {
    #[must_use]
    pub fn program_path(&self, project_root: &Path) -> PathBuf {
        if self.program.is_absolute() {
            self.program.clone()
        } else {
            project_root.join(&self.program)
        }
    }

    #[must_use]
    pub fn system_file(&self) -> String {
        format!("{}.pds", self.system_name)
    }

    #[must_use]
    pub fn statespace_file(&self) -> String {
        format!("{}-statespace.dot", self.system_name)
    }

    #[must_use]
    pub fn limit_cycles_file(&self) -> String {
        format!("{}-limitcycles.txt", self.system_name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RendererConfig {
    /// Graphviz executable; bare names are looked up on `PATH`.
    #[serde(default = "default_renderer_program")]
    pub program: String,
    #[serde(default = "default_renderer_format")]
    pub format: String,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            program: default_renderer_program(),
            format: default_renderer_format(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_session_dir")]
    pub dir: PathBuf,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: default_session_dir(),
        }
    }
}

/// Load the configuration for `project_root`.
///
/// An explicit path must exist. Without one, `jaguar.toml` in the project
/// root is optional and defaults apply when it is absent. Environment
/// overrides are applied last.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file cannot be read or is not valid TOML.
pub fn load_config(
    project_root: &Path,
    explicit: Option<&Path>,
) -> Result<JaguarConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = project_root.join(CONFIG_FILE);
            if !path.exists() {
                return Ok(with_env_overrides(JaguarConfig::default()));
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
        path: path.clone(),
        source,
    })?;
    let config = parse_config(&content).map_err(|source| ConfigError::Parse { path, source })?;
    Ok(with_env_overrides(config))
}

fn parse_config(content: &str) -> Result<JaguarConfig, toml::de::Error> {
    toml::from_str::<JaguarConfig>(content)
}

fn with_env_overrides(config: JaguarConfig) -> JaguarConfig {
    apply_overrides(
        config,
        std::env::var(SIMULATOR_ENV).ok(),
        std::env::var(RENDERER_ENV).ok(),
    )
}

fn apply_overrides(
    mut config: JaguarConfig,
    simulator: Option<String>,
    renderer: Option<String>,
) -> JaguarConfig {
    if let Some(program) = simulator.filter(|p| !p.trim().is_empty()) {
        config.simulator.program = PathBuf::from(program);
    }
    if let Some(program) = renderer.filter(|p| !p.trim().is_empty()) {
        config.renderer.program = program;
    }
    config
}

fn default_simulator_program() -> PathBuf {
    PathBuf::from("bin/simFDS")
}

fn default_system_name() -> String {
    "system".to_string()
}

fn default_renderer_program() -> String {
    "dot".to_string()
}

fn default_renderer_format() -> String {
    "svg".to_string()
}

fn default_session_dir() -> PathBuf {
    PathBuf::from(".jaguar")
}
