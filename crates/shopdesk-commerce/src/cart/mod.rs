//! Shopping cart module.
//!
//! The cart lives for one session: it starts empty when the store is built
//! and is never persisted.

mod item;
mod store;

pub use item::CartItem;
pub use store::{CartEvent, CartStore, CartTotals, SubscriptionId};
