//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use caisse_data::HttpGateway;

use crate::config::{CaisseConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// Register configuration, environment overrides applied.
    pub config: CaisseConfig,
    /// File the configuration came from, if any.
    pub config_path: Option<PathBuf>,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (mut config, config_path) = if let Some(path) = config_path {
            (CaisseConfig::load(path)?, Some(PathBuf::from(path)))
        } else {
            match find_config_file(&cwd) {
                Some(path) => (CaisseConfig::load(&path.to_string_lossy())?, Some(path)),
                None => (CaisseConfig::default(), None),
            }
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());

        Ok(Self {
            config,
            config_path,
            output,
            cwd,
        })
    }

    /// Client for the configured store server.
    pub fn gateway(&self) -> Result<HttpGateway> {
        HttpGateway::new(&self.config.server).context("Invalid [server] configuration")
    }
}

/// Find a config file in the directory tree, starting at `start`.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        for name in &CONFIG_NAMES {
            let candidate = current.join(name);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        if !current.pop() {
            return None;
        }
    }
}
