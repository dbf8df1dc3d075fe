//! Error types for shopdesk-core.

use shopdesk_data::FetchError;
use shopdesk_router::RouteError;
use thiserror::Error;

/// Errors surfaced by application flows.
#[derive(Error, Debug)]
pub enum AppError {
    /// A remote call failed. The inner error is passed through unchanged.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A route parameter that should be an id did not parse.
    #[error("Invalid id: {0:?}")]
    InvalidId(String),

    /// The route table could not be built.
    #[error("Route table error: {0}")]
    Route(#[from] RouteError),
}

impl AppError {
    /// The remote failure, if this is one.
    pub fn as_fetch(&self) -> Option<&FetchError> {
        match self {
            AppError::Fetch(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type for application flows.
pub type AppResult<T> = Result<T, AppError>;
