//! Telegram channel adapter.
//!
//! Wraps a teloxide `Bot` + `Dispatcher` and drives the long-polling
//! event loop until the process exits. A separate delivery task receives
//! built polls from the scheduler's dispatch callback over mpsc, so the
//! dispatcher loop never blocks on poll sends.

use std::sync::Arc;

use teloxide::prelude::*;
use tokio::sync::mpsc;
use tracing::{info, warn};

use movienight_commands::BotContext;
use movienight_core::config::TelegramConfig;
use movienight_core::PollContent;

use crate::handler::handle_update;
use crate::send;

/// What the poll-dispatch callback asks the transport to send at
/// deadline time.
#[derive(Debug)]
pub enum PollDispatch {
    /// Intro message followed by a native Telegram poll.
    Poll(PollContent),
    /// A plain notice, e.g. when the week had no suggestions.
    Notice(String),
}

pub struct TelegramAdapter {
    ctx: Arc<BotContext>,
    config: TelegramConfig,
}

impl TelegramAdapter {
    pub fn new(config: TelegramConfig, ctx: Arc<BotContext>) -> Self {
        Self { ctx, config }
    }

    /// Connect to Telegram and drive the long-polling loop.
    ///
    /// Never returns — runs for the lifetime of the process.
    pub async fn run(self, poll_rx: mpsc::Receiver<PollDispatch>) {
        let bot = Bot::new(&self.config.bot_token);
        let group = ChatId(self.config.group_chat_id);

        tokio::spawn(run_poll_delivery(bot.clone(), group, poll_rx));

        info!(group = group.0, "Telegram: starting long-polling dispatcher");

        let handler = Update::filter_message().endpoint(handle_update);

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![self.ctx, self.config])
            .default_handler(|_upd| async {})
            .build()
            .dispatch()
            .await;
    }
}

/// Background task that delivers weekly polls to the group.
///
/// A send failure is logged and the item dropped; the store stays locked
/// either way, and the operator can re-fire via the HTTP trigger.
async fn run_poll_delivery(bot: Bot, group: ChatId, mut rx: mpsc::Receiver<PollDispatch>) {
    info!("Telegram poll delivery task started");
    while let Some(dispatch) = rx.recv().await {
        let result = match dispatch {
            PollDispatch::Poll(poll) => send::send_poll(&bot, group, &poll).await,
            PollDispatch::Notice(text) => bot.send_message(group, text).await.map(|_| ()),
        };
        if let Err(e) = result {
            warn!(error = %e, "Telegram: poll delivery failed");
        }
    }
    warn!("Telegram poll delivery task ended (channel closed)");
}
