//! Prelude for convenient imports.
//!
//! ```rust,ignore
//! use shopdesk_core::prelude::*;
//! ```

pub use crate::{AppConfig, AppError, AppResult, OrderSummary, ShopApp};

pub use shopdesk_commerce::prelude::*;
pub use shopdesk_data::{ApiConfig, FetchClient, Transport};
pub use shopdesk_observability::{Severity, Toast, ToastOptions, ToastOverrides, Toaster};
pub use shopdesk_router::{Layout, Page};
