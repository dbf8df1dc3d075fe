//! Toast notifications.
//!
//! A [`Toaster`] holds the currently visible toasts. Views call
//! [`Toaster::success`] and friends; the shell renders [`Toaster::active`]
//! and calls [`Toaster::expire`] on its tick. Every toast is also emitted as a
//! `tracing` event so headless runs keep a record of what the user saw.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
    Info,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Error => write!(f, "error"),
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// Screen corner or edge a toast is anchored to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToastPosition {
    TopLeft,
    TopCenter,
    TopRight,
    BottomLeft,
    BottomCenter,
    #[default]
    BottomRight,
}

/// Default auto-dismiss delay.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(3000);

/// Per-toast display options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastOptions {
    /// Auto-dismiss delay; `None` keeps the toast until dismissed.
    /// Serialized as `timeout_ms`, where `0` means no auto-dismiss.
    #[serde(rename = "timeout_ms", with = "timeout_ms")]
    pub timeout: Option<Duration>,
    pub position: ToastPosition,
    pub close_on_click: bool,
    pub pause_on_hover: bool,
    pub draggable: bool,
    pub hide_progress_bar: bool,
    /// Show the severity icon.
    pub icon: bool,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            position: ToastPosition::default(),
            close_on_click: true,
            pause_on_hover: false,
            draggable: false,
            hide_progress_bar: false,
            icon: true,
        }
    }
}

impl ToastOptions {
    /// Apply per-call overrides on top of these options.
    pub fn merged(&self, overrides: &ToastOverrides) -> Self {
        Self {
            timeout: overrides.timeout.unwrap_or(self.timeout),
            position: overrides.position.unwrap_or(self.position),
            close_on_click: overrides.close_on_click.unwrap_or(self.close_on_click),
            pause_on_hover: overrides.pause_on_hover.unwrap_or(self.pause_on_hover),
            draggable: overrides.draggable.unwrap_or(self.draggable),
            hide_progress_bar: overrides.hide_progress_bar.unwrap_or(self.hide_progress_bar),
            icon: overrides.icon.unwrap_or(self.icon),
        }
    }
}

mod timeout_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        let ms = value.map_or(0, |d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX));
        s.serialize_u64(ms)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        let ms = u64::deserialize(d)?;
        Ok((ms > 0).then(|| Duration::from_millis(ms)))
    }
}

/// Options a single call may override. Unset fields keep the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToastOverrides {
    pub timeout: Option<Option<Duration>>,
    pub position: Option<ToastPosition>,
    pub close_on_click: Option<bool>,
    pub pause_on_hover: Option<bool>,
    pub draggable: Option<bool>,
    pub hide_progress_bar: Option<bool>,
    pub icon: Option<bool>,
}

impl ToastOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the auto-dismiss delay.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(Some(timeout));
        self
    }

    /// Keep the toast until it is dismissed.
    pub fn sticky(mut self) -> Self {
        self.timeout = Some(None);
        self
    }

    pub fn position(mut self, position: ToastPosition) -> Self {
        self.position = Some(position);
        self
    }

    pub fn close_on_click(mut self, enabled: bool) -> Self {
        self.close_on_click = Some(enabled);
        self
    }
}

/// Container-wide policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToasterConfig {
    /// Most toasts visible at once; the oldest is dropped beyond this.
    pub max_toasts: usize,
    /// List the most recent toast first.
    pub newest_on_top: bool,
}

impl Default for ToasterConfig {
    fn default() -> Self {
        Self {
            max_toasts: 20,
            newest_on_top: true,
        }
    }
}

/// Handle to a shown toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ToastId(u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

/// A visible toast.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: ToastId,
    pub severity: Severity,
    pub message: String,
    pub options: ToastOptions,
    pub shown_at: Instant,
}

impl Toast {
    /// When the toast times out, if ever.
    pub fn expires_at(&self) -> Option<Instant> {
        self.options.timeout.map(|t| self.shown_at + t)
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.expires_at().is_some_and(|at| now >= at)
    }
}

/// The set of visible toasts.
#[derive(Debug, Clone, Default)]
pub struct Toaster {
    config: ToasterConfig,
    defaults: ToastOptions,
    // Oldest first.
    toasts: VecDeque<Toast>,
    next_id: u64,
}

impl Toaster {
    /// Create a toaster with the given policy and default options.
    pub fn new(config: ToasterConfig, defaults: ToastOptions) -> Self {
        Self {
            config,
            defaults,
            toasts: VecDeque::new(),
            next_id: 0,
        }
    }

    pub fn config(&self) -> &ToasterConfig {
        &self.config
    }

    pub fn defaults(&self) -> &ToastOptions {
        &self.defaults
    }

    pub fn success(&mut self, message: impl Into<String>, overrides: Option<ToastOverrides>) -> ToastId {
        self.show(Severity::Success, message, overrides)
    }

    pub fn error(&mut self, message: impl Into<String>, overrides: Option<ToastOverrides>) -> ToastId {
        self.show(Severity::Error, message, overrides)
    }

    pub fn info(&mut self, message: impl Into<String>, overrides: Option<ToastOverrides>) -> ToastId {
        self.show(Severity::Info, message, overrides)
    }

    pub fn warning(&mut self, message: impl Into<String>, overrides: Option<ToastOverrides>) -> ToastId {
        self.show(Severity::Warning, message, overrides)
    }

    /// Show a toast of any severity.
    pub fn show(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        overrides: Option<ToastOverrides>,
    ) -> ToastId {
        let message = message.into();
        let options = match overrides {
            Some(o) => self.defaults.merged(&o),
            None => self.defaults.clone(),
        };

        self.next_id += 1;
        let id = ToastId(self.next_id);

        match severity {
            Severity::Success | Severity::Info => {
                tracing::info!(toast = %id, %severity, "{}", message)
            }
            Severity::Warning => tracing::warn!(toast = %id, %severity, "{}", message),
            Severity::Error => tracing::error!(toast = %id, %severity, "{}", message),
        }

        self.toasts.push_back(Toast {
            id,
            severity,
            message,
            options,
            shown_at: Instant::now(),
        });
        while self.toasts.len() > self.config.max_toasts {
            if let Some(evicted) = self.toasts.pop_front() {
                tracing::trace!(toast = %evicted.id, "evicted");
            }
        }

        id
    }

    /// Visible toasts in display order.
    pub fn active(&self) -> Vec<&Toast> {
        if self.config.newest_on_top {
            self.toasts.iter().rev().collect()
        } else {
            self.toasts.iter().collect()
        }
    }

    pub fn get(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    /// Remove a toast. Returns whether it was visible.
    pub fn dismiss(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|t| t.id != id);
        self.toasts.len() != before
    }

    /// Handle a click on a toast; dismisses it only if `close_on_click`.
    pub fn click(&mut self, id: ToastId) -> bool {
        match self.get(id) {
            Some(toast) if toast.options.close_on_click => self.dismiss(id),
            _ => false,
        }
    }

    /// Drop every toast whose timeout has elapsed at `now`. Returns how many
    /// were removed.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.toasts.len();
        self.toasts.retain(|t| !t.is_expired(now));
        before - self.toasts.len()
    }

    /// Remove all toasts.
    pub fn clear(&mut self) {
        self.toasts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(toaster: &Toaster) -> Vec<&str> {
        toaster.active().iter().map(|t| t.message.as_str()).collect()
    }

    #[test]
    fn test_default_options() {
        let options = ToastOptions::default();
        assert_eq!(options.timeout, Some(Duration::from_millis(3000)));
        assert_eq!(options.position, ToastPosition::BottomRight);
        assert!(options.close_on_click);
        assert!(!options.pause_on_hover);
        assert!(!options.draggable);
        assert!(!options.hide_progress_bar);
        assert!(options.icon);

        let config = ToasterConfig::default();
        assert_eq!(config.max_toasts, 20);
        assert!(config.newest_on_top);
    }

    #[test]
    fn test_overrides_merge_over_defaults() {
        let merged = ToastOptions::default().merged(
            &ToastOverrides::new()
                .sticky()
                .position(ToastPosition::TopCenter),
        );
        assert_eq!(merged.timeout, None);
        assert_eq!(merged.position, ToastPosition::TopCenter);
        assert!(merged.close_on_click);

        let unchanged = ToastOptions::default().merged(&ToastOverrides::new());
        assert_eq!(unchanged, ToastOptions::default());
    }

    #[test]
    fn test_options_from_toml() {
        let options: ToastOptions = toml::from_str(
            r#"
            timeout_ms = 5000
            position = "top-right"
            "#,
        )
        .unwrap();
        assert_eq!(options.timeout, Some(Duration::from_secs(5)));
        assert_eq!(options.position, ToastPosition::TopRight);
        assert!(options.close_on_click);

        let sticky: ToastOptions = toml::from_str("timeout_ms = 0").unwrap();
        assert_eq!(sticky.timeout, None);
    }

    #[test]
    fn test_newest_on_top_ordering() {
        let mut toaster = Toaster::default();
        toaster.info("first", None);
        toaster.success("second", None);
        assert_eq!(messages(&toaster), vec!["second", "first"]);

        let mut oldest_first = Toaster::new(
            ToasterConfig {
                newest_on_top: false,
                ..ToasterConfig::default()
            },
            ToastOptions::default(),
        );
        oldest_first.info("first", None);
        oldest_first.info("second", None);
        assert_eq!(messages(&oldest_first), vec!["first", "second"]);
    }

    #[test]
    fn test_oldest_evicted_beyond_max() {
        let mut toaster = Toaster::new(
            ToasterConfig {
                max_toasts: 2,
                newest_on_top: true,
            },
            ToastOptions::default(),
        );
        let first = toaster.info("a", None);
        toaster.info("b", None);
        toaster.info("c", None);

        assert_eq!(toaster.len(), 2);
        assert!(toaster.get(first).is_none());
        assert_eq!(messages(&toaster), vec!["c", "b"]);
    }

    #[test]
    fn test_click_respects_close_on_click() {
        let mut toaster = Toaster::default();
        let closable = toaster.warning("closable", None);
        let pinned = toaster.error(
            "pinned",
            Some(ToastOverrides::new().close_on_click(false)),
        );

        assert!(toaster.click(closable));
        assert!(!toaster.click(pinned));
        assert!(toaster.get(pinned).is_some());
        assert!(toaster.dismiss(pinned));
        assert!(!toaster.dismiss(pinned));
        assert!(toaster.is_empty());
    }

    #[test]
    fn test_expire_drops_timed_out_toasts_only() {
        let mut toaster = Toaster::default();
        toaster.success("short", None);
        toaster.info("long", Some(ToastOverrides::new().timeout(Duration::from_secs(60))));
        let sticky = toaster.error("sticky", Some(ToastOverrides::new().sticky()));

        assert_eq!(toaster.expire(Instant::now()), 0);

        let later = Instant::now() + Duration::from_secs(4);
        assert_eq!(toaster.expire(later), 1);
        assert_eq!(messages(&toaster), vec!["sticky", "long"]);

        let much_later = Instant::now() + Duration::from_secs(3600);
        assert_eq!(toaster.expire(much_later), 1);
        assert!(toaster.get(sticky).is_some());
        assert!(toaster.get(sticky).unwrap().expires_at().is_none());
    }

    #[test]
    fn test_ids_are_unique_and_display() {
        let mut toaster = Toaster::default();
        let a = toaster.info("a", None);
        let b = toaster.info("b", None);
        assert_ne!(a, b);
        assert!(a < b);
        assert_eq!(a.to_string(), "toast-1");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
