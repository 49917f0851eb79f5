//! `movienight-store` — authoritative state for the suggestion lifecycle.
//!
//! The store owns three things and is their single mutation point:
//!
//! - confirmed suggestions, keyed by user id (one per user, replace on
//!   re-confirm)
//! - pending (unconfirmed) suggestions, keyed by user id, expiring five
//!   minutes after creation with a lazy read-time check
//! - the weekly lock flag that gates both writers between poll dispatch
//!   and the weekly reset
//!
//! Confirmed suggestions and the lock flag are persisted as a JSON
//! snapshot rewritten on every mutating operation; pending suggestions
//! are deliberately in-memory only.

pub mod error;
pub mod snapshot;
pub mod store;

pub use error::{Result, StoreError};
pub use store::SuggestionStore;
