//! Layout selection by path.

use std::fmt;

use serde::Serialize;

/// Prefix that switches the shell to the dashboard layout.
pub const DASHBOARD_PREFIX: &str = "/dashboard";

/// Page shell wrapping the routed view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    /// Public storefront shell.
    Landing,
    /// Admin shell.
    Dashboard,
}

impl Layout {
    /// Pick the layout for `path`.
    ///
    /// This is a plain prefix test on the raw path, so `/dashboard-old` is
    /// also a dashboard path.
    pub fn for_path(path: &str) -> Self {
        if path.starts_with(DASHBOARD_PREFIX) {
            Layout::Dashboard
        } else {
            Layout::Landing
        }
    }

    pub fn is_dashboard(self) -> bool {
        self == Layout::Dashboard
    }

    pub fn is_landing(self) -> bool {
        self == Layout::Landing
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Layout::Landing => "landing",
            Layout::Dashboard => "dashboard",
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
