//! `movienight-telegram` — the chat transport.
//!
//! A thin teloxide adapter: long-polls Telegram, filters to the single
//! configured group, routes text through `movienight-commands`, and
//! sends replies, photos, and the weekly vote poll. Connection and auth
//! lifecycle are teloxide's concern.

pub mod adapter;
pub mod handler;
pub mod send;

pub use adapter::{PollDispatch, TelegramAdapter};
