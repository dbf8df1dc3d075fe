//! API endpoint configuration.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{FetchClient, Transport, JSON_CONTENT_TYPE};

/// Environment variable that overrides the API base URL.
pub const API_URL_ENV: &str = "SHOPDESK_API_URL";

/// Public mock endpoint used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "https://68615b7a8e7486408445b929.mockapi.io/api/v1";

/// Where the REST API lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL every resource path is appended to.
    pub base_url: String,
}

impl ApiConfig {
    /// Use an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Read [`API_URL_ENV`], falling back to [`DEFAULT_API_URL`].
    pub fn from_env() -> Self {
        Self::resolve(std::env::var(API_URL_ENV).ok())
    }

    /// Pick `value` when it is set and non-blank, else the default.
    pub fn resolve(value: Option<String>) -> Self {
        match value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
        {
            Some(url) => Self::new(url),
            None => Self::default(),
        }
    }

    /// Build a client rooted at the base URL that sends JSON on every request.
    pub fn client(&self, transport: Arc<dyn Transport>) -> FetchClient {
        FetchClient::new(transport)
            .with_base_url(self.base_url.clone())
            .with_default_header("Content-Type", JSON_CONTENT_TYPE)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}
