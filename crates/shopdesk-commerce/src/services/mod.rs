//! Typed REST wrappers over the remote API.
//!
//! Each resource gets five operations (`get_all`, `get_by_id`, `create`,
//! `update`, `delete`), one request apiece. Failures are logged with a
//! description of what was attempted and handed back unchanged; nothing is
//! retried or cached here.

mod rest;

pub use rest::RestService;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::Serialize;
use shopdesk_data::FetchError;

use crate::account::User;
use crate::catalog::Product;

/// A REST collection the services know how to address.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync {
    /// Identifier type used in item paths.
    type Id: Copy + fmt::Display + Send + Sync;

    /// Collection path relative to the API base, e.g. `/products`.
    const COLLECTION: &'static str;
    /// Singular noun for log context, e.g. `product`.
    const NOUN: &'static str;
    /// Plural noun for log context, e.g. `products`.
    const NOUN_PLURAL: &'static str;

    /// Path of a single item.
    fn item_path(id: Self::Id) -> String {
        format!("{}/{}", Self::COLLECTION, id)
    }
}

/// Product CRUD over `/products`.
pub type ProductService = RestService<Product>;

/// User CRUD over `/users`.
pub type UserService = RestService<User>;

/// Log a failed remote call with its context and hand the error back as-is.
pub fn handle_api_error(error: FetchError, context: &str) -> FetchError {
    tracing::error!(context, error = %error, "Error {}", context);
    error
}
