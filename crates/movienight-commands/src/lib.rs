//! `movienight-commands` — routing for the group-chat command surface.
//!
//! The channel adapter hands every inbound group message to
//! [`handle_message`]; confirmations ("yes") are checked first, then
//! `!`-prefixed commands. Anything else returns `None` and is ignored,
//! so normal group conversation passes through untouched.

pub mod handlers;
pub mod parse;
pub mod poll;

use std::sync::Arc;

use movienight_core::CommandReply;
use movienight_scheduler::Scheduler;
use movienight_store::SuggestionStore;
use movienight_tmdb::TmdbClient;

use crate::parse::{is_confirmation, parse_command};

/// Everything the command handlers need, constructed once at startup and
/// shared by reference — no hidden global lookups.
pub struct BotContext {
    pub store: Arc<SuggestionStore>,
    pub scheduler: Arc<Scheduler>,
    pub tmdb: TmdbClient,
}

/// Route one inbound message. `None` means "not addressed to the bot".
pub async fn handle_message(
    ctx: &BotContext,
    text: &str,
    sender_id: &str,
    sender_name: &str,
) -> Option<CommandReply> {
    if is_confirmation(text) {
        return handlers::confirm(ctx, sender_id, sender_name);
    }

    let parsed = parse_command(text)?;
    match parsed.command.as_str() {
        "help" => Some(handlers::help()),
        "status" => Some(handlers::status(ctx)),
        "list" => Some(handlers::list(ctx)),
        "suggest" => Some(handlers::suggest(ctx, &parsed.args, sender_id, sender_name).await),
        _ => None,
    }
}
