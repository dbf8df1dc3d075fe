//! Dashboard-managed accounts.

mod user;

pub use user::User;
