//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use shopdesk_core::AppConfig;
use shopdesk_data::ApiConfig;
use shopdesk_observability::{LogFormat, ToastOptions, ToasterConfig, DEFAULT_FILTER};

/// File names searched for, in order, in each directory.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["shopdesk.toml", ".shopdesk.toml", "shopdesk.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// API configuration.
    #[serde(default)]
    pub api: ApiSection,

    /// Default toast options.
    #[serde(default)]
    pub toast: ToastOptions,

    /// Toast container policy.
    #[serde(default)]
    pub toaster: ToasterConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CliConfig {
    /// Load config from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Build the application configuration.
    ///
    /// The API URL comes from, in order: `flag`, this file, the
    /// `SHOPDESK_API_URL` environment variable, the built-in fallback.
    pub fn app_config(&self, flag: Option<&str>) -> AppConfig {
        let env = std::env::var(shopdesk_data::API_URL_ENV).ok();
        AppConfig {
            api: resolve_api(flag, self.api.base_url.as_deref(), env),
            toast: self.toast.clone(),
            toaster: self.toaster,
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

/// Pick the first non-blank API URL among `flag` and `file`, else fall back
/// to the environment value and finally the default.
pub fn resolve_api(flag: Option<&str>, file: Option<&str>, env: Option<String>) -> ApiConfig {
    let pick = |value: Option<&str>| {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(ApiConfig::new)
    };
    pick(flag)
        .or_else(|| pick(file))
        .unwrap_or_else(|| ApiConfig::resolve(env))
}

/// `[api]` section.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiSection {
    /// REST API base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Output format (human or json).
    #[serde(default)]
    pub format: LogFormat,

    /// `tracing` filter used when `RUST_LOG` is unset.
    #[serde(default = "default_filter")]
    pub filter: String,
}

fn default_filter() -> String {
    DEFAULT_FILTER.to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_filter(),
        }
    }
}

/// Generate a default shopdesk.toml config file.
pub fn generate_default_config(base_url: &str) -> String {
    format!(
        r#"# Shopdesk configuration

[api]
base_url = "{base_url}"

[toast]
timeout_ms = 3000
position = "bottom-right"
close_on_click = true
pause_on_hover = false
draggable = false
hide_progress_bar = false
icon = true

[toaster]
max_toasts = 20
newest_on_top = true

[logging]
format = "human"
filter = "{filter}"
"#,
        base_url = base_url,
        filter = DEFAULT_FILTER,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdesk_data::DEFAULT_API_URL;
    use shopdesk_observability::ToastPosition;
    use std::time::Duration;

    #[test]
    fn test_load_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shopdesk.toml");
        std::fs::write(
            &path,
            r#"
[api]
base_url = "http://localhost:3000/api"

[toast]
timeout_ms = 5000
position = "top-center"

[logging]
format = "json"
"#,
        )
        .unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("http://localhost:3000/api"));
        assert_eq!(config.toast.timeout, Some(Duration::from_secs(5)));
        assert_eq!(config.toast.position, ToastPosition::TopCenter);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.filter, DEFAULT_FILTER);
        assert_eq!(config.toaster.max_toasts, 20);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shopdesk.json");
        std::fs::write(&path, r#"{ "toaster": { "max_toasts": 5 } }"#).unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config.toaster.max_toasts, 5);
        assert!(config.toaster.newest_on_top);
        assert!(config.api.base_url.is_none());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shopdesk.toml");
        std::fs::write(&path, "[api\nbase_url = 1").unwrap();

        let err = CliConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse TOML config"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        let mut config = CliConfig::default();
        config.api.base_url = Some("https://api.test".to_string());

        config.save(&path).unwrap();
        assert_eq!(CliConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_default_template_parses() {
        let config: CliConfig = toml::from_str(&generate_default_config("https://api.test")).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("https://api.test"));
        assert_eq!(config.toast, ToastOptions::default());
        assert_eq!(config.toaster, ToasterConfig::default());
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_api_url_precedence() {
        let env = || Some("https://env.test".to_string());

        assert_eq!(
            resolve_api(Some("https://flag.test"), Some("https://file.test"), env()).base_url,
            "https://flag.test"
        );
        assert_eq!(
            resolve_api(None, Some("https://file.test"), env()).base_url,
            "https://file.test"
        );
        assert_eq!(resolve_api(Some("  "), None, env()).base_url, "https://env.test");
        assert_eq!(resolve_api(None, None, None).base_url, DEFAULT_API_URL);
    }
}
