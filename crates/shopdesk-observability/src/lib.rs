//! Observability for shopdesk.
//!
//! This crate provides:
//! - `init_tracing` / `LogFormat` - one-shot `tracing` subscriber setup
//! - `Toaster` - transient user notifications, mirrored into the log

mod logging;
mod notify;

pub use logging::*;
pub use notify::*;
