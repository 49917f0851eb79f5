//! Message sending helpers for the Telegram adapter.

use teloxide::prelude::*;
use teloxide::types::{InputFile, InputPollOption};
use tracing::warn;

use movienight_core::{CommandReply, PollContent};

/// Deliver a command reply: a photo with caption when the reply carries
/// an image, plain text otherwise. A failed photo send falls back to a
/// plain text message so the user never gets silence.
pub async fn send_reply(bot: &Bot, chat_id: ChatId, reply: &CommandReply) {
    if let Some(ref image_url) = reply.image_url {
        match image_url.parse::<url::Url>() {
            Ok(parsed) => {
                let sent = bot
                    .send_photo(chat_id, InputFile::url(parsed))
                    .caption(&reply.text)
                    .await;
                match sent {
                    Ok(_) => return,
                    Err(e) => {
                        warn!(error = %e, "Telegram: photo send failed; falling back to text")
                    }
                }
            }
            Err(e) => warn!(error = %e, url = %image_url, "Telegram: bad image URL"),
        }
    }

    if let Err(e) = bot.send_message(chat_id, &reply.text).await {
        warn!(error = %e, "Telegram: failed to send reply");
    }
}

/// Send the intro message followed by the native vote poll.
pub async fn send_poll(
    bot: &Bot,
    chat_id: ChatId,
    poll: &PollContent,
) -> Result<(), teloxide::RequestError> {
    bot.send_message(chat_id, &poll.intro).await?;

    let options: Vec<InputPollOption> = poll
        .options
        .iter()
        .map(|text| InputPollOption {
            text: text.clone(),
            formatting: None,
        })
        .collect();

    bot.send_poll(chat_id, &poll.question, options)
        .is_anonymous(false)
        .allows_multiple_answers(poll.selectable_count > 1)
        .await?;

    Ok(())
}
