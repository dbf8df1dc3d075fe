//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use shopdesk_core::{AppConfig, ShopApp};
use shopdesk_data::{FetchClient, ReqwestTransport};

use crate::config::{CliConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Where `config` was read from, if anywhere.
    pub config_path: Option<PathBuf>,
    /// Resolved application configuration.
    pub app: AppConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from an explicit config file or the nearest one found
    /// from the working directory upward.
    pub fn load(config_path: Option<&str>, api_url: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = match config_path {
            Some(path) => (CliConfig::load(path)?, Some(PathBuf::from(path))),
            None => match find_config(&cwd, |path, e| {
                output.warn(&format!("Ignoring {}: {:#}", path.display(), e))
            }) {
                Some((path, config)) => (config, Some(path)),
                None => (CliConfig::default(), None),
            },
        };

        let app = config.app_config(api_url);
        output.debug(&format!("API base URL: {}", app.api.base_url));

        Ok(Self {
            config,
            config_path,
            app,
            output,
            cwd,
        })
    }

    /// Client rooted at the configured API.
    pub fn api_client(&self) -> Result<FetchClient> {
        let transport = ReqwestTransport::new().context("Failed to create HTTP client")?;
        Ok(self.app.api.client(Arc::new(transport)))
    }

    /// Client for arbitrary absolute URLs.
    pub fn plain_client(&self) -> Result<FetchClient> {
        FetchClient::http().context("Failed to create HTTP client")
    }

    /// A fresh application session.
    pub fn shop_app(&self) -> Result<ShopApp> {
        ShopApp::connect(self.app.clone()).context("Failed to start session")
    }
}

/// Find the nearest config file, walking up from `start`.
///
/// Files that exist but fail to load are passed to `on_skip` and the search
/// continues.
pub fn find_config(
    start: &Path,
    mut on_skip: impl FnMut(&Path, &anyhow::Error),
) -> Option<(PathBuf, CliConfig)> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_FILE_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                match CliConfig::load(&config_path) {
                    Ok(config) => return Some((config_path, config)),
                    Err(e) => on_skip(&config_path, &e),
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}
