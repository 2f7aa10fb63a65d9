use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default number of rows kept in the ranked table.
pub const DEFAULT_LIMIT: usize = 50;

/// Default node count at which betweenness switches to the parallel path.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 512;

/// Project config file looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "clout.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rank: RankConfig,
    #[serde(default)]
    pub centrality: CentralityConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankConfig {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

/// Which shortest-path distances closeness centrality averages over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosenessDirection {
    /// Distances from the node to the nodes it can reach.
    #[default]
    Outgoing,
    /// Distances to the node from the nodes that can reach it.
    Incoming,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CentralityConfig {
    #[serde(default)]
    pub closeness: ClosenessDirection,
    /// Graphs with at least this many nodes compute betweenness on the
    /// rayon pool. `0` disables the parallel path.
    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl Default for CentralityConfig {
    fn default() -> Self {
        Self {
            closeness: ClosenessDirection::default(),
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

/// Parse a config file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML for
/// [`Config`].
pub fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<Config>(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Resolve the effective config.
///
/// Precedence: `explicit` path, then `clout.toml` in `working_dir`, then
/// `<config_dir>/clout/config.toml`, then built-in defaults.
///
/// # Errors
///
/// Returns an error if `explicit` does not exist, or if the selected file
/// cannot be read or parsed.
pub fn resolve_config(explicit: Option<&Path>, working_dir: &Path) -> Result<Config> {
    if let Some(path) = explicit {
        if !path.exists() {
            bail!("Config file {} does not exist", path.display());
        }
        return load_config_file(path);
    }

    match discover_config_path(working_dir) {
        Some(path) => {
            debug!(path = %path.display(), "using config file");
            load_config_file(&path)
        }
        None => Ok(Config::default()),
    }
}

fn discover_config_path(working_dir: &Path) -> Option<PathBuf> {
    let project = working_dir.join(PROJECT_CONFIG_FILE);
    if project.exists() {
        return Some(project);
    }

    let user = dirs::config_dir()?.join("clout/config.toml");
    user.exists().then_some(user)
}

const fn default_limit() -> usize {
    DEFAULT_LIMIT
}

const fn default_parallel_threshold() -> usize {
    DEFAULT_PARALLEL_THRESHOLD
}
