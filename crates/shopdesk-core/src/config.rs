//! Application configuration.

use serde::{Deserialize, Serialize};
use shopdesk_data::ApiConfig;
use shopdesk_observability::{ToastOptions, ToasterConfig};

/// Configuration for a shopdesk session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Remote API location.
    pub api: ApiConfig,
    /// Default options for every toast.
    pub toast: ToastOptions,
    /// Toast container policy.
    pub toaster: ToasterConfig,
}

impl AppConfig {
    /// Create a configuration for the given API base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig::new(base_url),
            ..Default::default()
        }
    }

    /// Defaults, with the API URL taken from the environment.
    pub fn from_env() -> Self {
        Self {
            api: ApiConfig::from_env(),
            ..Default::default()
        }
    }

    /// Replace the API base URL.
    pub fn with_api_url(mut self, base_url: impl Into<String>) -> Self {
        self.api = ApiConfig::new(base_url);
        self
    }

    /// Replace the default toast options.
    pub fn with_toast(mut self, toast: ToastOptions) -> Self {
        self.toast = toast;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopdesk_data::DEFAULT_API_URL;

    #[test]
    fn test_app_config_default() {
        let config = AppConfig::default();

        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.toast, ToastOptions::default());
        assert_eq!(config.toaster.max_toasts, 20);
    }

    #[test]
    fn test_app_config_with_api_url() {
        let config = AppConfig::default().with_api_url("http://localhost:3000/api");
        assert_eq!(config.api.base_url, "http://localhost:3000/api");
        assert!(config.toaster.newest_on_top);
    }

    #[test]
    fn test_app_config_partial_json() {
        let config: AppConfig = serde_json::from_str(
            r#"{ "api": { "base_url": "https://api.test" }, "toast": { "timeout_ms": 0 } }"#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "https://api.test");
        assert_eq!(config.toast.timeout, None);
        assert!(config.toast.close_on_click);
    }
}
