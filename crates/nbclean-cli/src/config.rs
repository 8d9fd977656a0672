//! Configuration loading for nbclean.
//!
//! Precedence order (highest to lowest):
//! 1. Command-line arguments
//! 2. Project config (`.nbclean.toml` in the current or a parent directory)
//! 3. User config (`~/.nbclean.toml`)
//! 4. Built-in defaults

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// File name searched for in the working directory and its ancestors
pub const CONFIG_FILE_NAME: &str = ".nbclean.toml";

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory searched for notebooks when no file pattern is given.
    /// Relative paths are resolved against the directory holding the config
    /// file.
    pub nbs_path: Option<PathBuf>,

    /// Default for `--clear-all`
    pub clear_all: Option<bool>,
}

impl Config {
    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let Some(nbs_path) = config.nbs_path.take() {
            let base = path.parent().unwrap_or_else(|| Path::new("."));
            config.nbs_path = Some(base.join(nbs_path));
        }
        Ok(config)
    }

    /// Nearest `.nbclean.toml` in `start` or one of its ancestors
    pub fn find_project_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Discover and merge the user and project configs for `cwd`.
    pub fn discover(cwd: &Path) -> Result<Self> {
        let home = dirs::home_dir();
        Self::discover_with_home(cwd, home.as_deref())
    }

    /// Same as [`Config::discover`] with an explicit home directory.
    pub fn discover_with_home(cwd: &Path, home: Option<&Path>) -> Result<Self> {
        let user = match home.map(|dir| dir.join(CONFIG_FILE_NAME)) {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading user config");
                Some(Self::load_from_file(&path)?)
            }
            _ => None,
        };

        let project = match Self::find_project_config(cwd) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading project config");
                Some(Self::load_from_file(&path)?)
            }
            None => None,
        };

        Ok(Self::merge(user, project))
    }

    /// Merge configs, project settings taking precedence over user settings
    pub fn merge(user_config: Option<Self>, project_config: Option<Self>) -> Self {
        let user = user_config.unwrap_or_default();
        let project = project_config.unwrap_or_default();
        Self {
            nbs_path: project.nbs_path.or(user.nbs_path),
            clear_all: project.clear_all.or(user.clear_all),
        }
    }

    /// Notebook directory, falling back to `cwd`
    pub fn nbs_path_or(&self, cwd: &Path) -> PathBuf {
        self.nbs_path.clone().unwrap_or_else(|| cwd.to_path_buf())
    }

    /// Resolve `--clear-all`: an explicit flag either way wins, otherwise the
    /// config, otherwise false
    pub fn resolve_clear_all(&self, flag: Option<bool>) -> bool {
        flag.or(self.clear_all).unwrap_or(false)
    }
}
