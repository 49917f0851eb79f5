//! Telegram message handler registered in the teloxide Dispatcher.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::debug;

use movienight_commands::{handle_message, BotContext};
use movienight_core::config::TelegramConfig;

use crate::send;

/// Runs for every incoming `Message`. Ignores bots, media-only messages,
/// and anything outside the configured group; everything else goes
/// through the command router.
pub async fn handle_update(
    bot: Bot,
    msg: Message,
    ctx: Arc<BotContext>,
    config: TelegramConfig,
) -> ResponseResult<()> {
    if msg.from.as_ref().map(|u| u.is_bot).unwrap_or(false) {
        return Ok(());
    }

    // Single-group deployment: drop traffic from every other chat.
    if msg.chat.id.0 != config.group_chat_id {
        debug!(chat_id = msg.chat.id.0, "ignoring message outside the configured group");
        return Ok(());
    }

    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    let sender_id = from.id.0.to_string();
    let sender_name = from.full_name();

    let Some(text) = msg.text() else {
        return Ok(());
    };

    debug!(sender = %sender_name, text, "group message");

    if let Some(reply) = handle_message(&ctx, text, &sender_id, &sender_name).await {
        send::send_reply(&bot, msg.chat.id, &reply).await;
    }

    Ok(())
}
