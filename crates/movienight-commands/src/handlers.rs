//! The individual command handlers.

use tracing::error;

use movienight_core::CommandReply;
use movienight_store::StoreError;

use crate::poll::format_suggestions_list;
use crate::BotContext;

const LOCKED_MESSAGE: &str =
    "Suggestions are currently locked. They will reopen Saturday at midnight.";

/// `!suggest <title>` — look the title up and park it as a pending
/// suggestion awaiting a "yes".
pub async fn suggest(
    ctx: &BotContext,
    args: &str,
    sender_id: &str,
    sender_name: &str,
) -> CommandReply {
    if ctx.store.is_locked() {
        return CommandReply::text(LOCKED_MESSAGE);
    }

    let title = args.trim();
    if title.is_empty() {
        return CommandReply::text("Please provide a movie title. Example: !suggest Inception");
    }

    let movie = match ctx.tmdb.search(title).await {
        Ok(Some(movie)) => movie,
        Ok(None) => {
            return CommandReply::text(format!(
                "Could not find a movie matching \"{title}\". Try a different search term."
            ));
        }
        Err(e) => {
            error!(error = %e, title, "TMDB lookup failed");
            return CommandReply::text(
                "Sorry, there was an error searching for that movie. Please try again.",
            );
        }
    };

    if let Err(StoreError::Locked) = ctx.store.set_pending_suggestion(movie.clone(), sender_id, sender_name) {
        return CommandReply::text(LOCKED_MESSAGE);
    }

    let text = format!(
        "Found: *{}* ({}) ⭐ {}\n{}\n\nReply \"yes\" to confirm or \"!suggest <different movie>\" to try again.",
        movie.title, movie.year, movie.rating, movie.overview
    );
    CommandReply {
        text,
        image_url: movie.poster_url,
    }
}

/// A bare "yes" — promote the sender's pending suggestion to a confirmed
/// one. `None` when there is nothing (or nothing unexpired) to confirm.
pub fn confirm(ctx: &BotContext, sender_id: &str, sender_name: &str) -> Option<CommandReply> {
    let pending = ctx.store.get_pending_suggestion(sender_id)?;
    let previous = ctx.store.get_suggestion(sender_id);

    match ctx
        .store
        .add_suggestion(pending.movie.clone(), sender_id, sender_name)
    {
        Ok(()) => {
            let mut text = format!(
                "*{}* ({}) has been added to this week's suggestions!",
                pending.movie.title, pending.movie.year
            );
            if let Some(previous) = previous {
                text.push_str(&format!(
                    "\n\n(Replaced your previous suggestion: {})",
                    previous.movie.title
                ));
            }
            if let Some(ref imdb_url) = pending.movie.imdb_url {
                text.push_str(&format!("\n\n{imdb_url}"));
            }
            Some(CommandReply::text(text))
        }
        Err(StoreError::Locked) => Some(CommandReply::text(LOCKED_MESSAGE)),
    }
}

/// `!list` — current suggestions plus the time until the poll while
/// suggestions are still open.
pub fn list(ctx: &BotContext) -> CommandReply {
    let mut text = format_suggestions_list(&ctx.store);
    if ctx.store.get_suggestion_count() > 0 && !ctx.store.is_locked() {
        text.push_str(&format!("\n\nPoll in {}", ctx.scheduler.time_until_deadline()));
    }
    CommandReply::text(text)
}

/// `!status` — deadline, countdown, count, lock state.
pub fn status(ctx: &BotContext) -> CommandReply {
    let mut text = format!(
        "Deadline: {}\nTime remaining: {}\nSuggestions so far: {}",
        ctx.scheduler.deadline_string(),
        ctx.scheduler.time_until_deadline(),
        ctx.store.get_suggestion_count()
    );
    if ctx.store.is_locked() {
        text.push_str("\n\n");
        text.push_str(LOCKED_MESSAGE);
    }
    CommandReply::text(text)
}

/// `!help` — command summary.
pub fn help() -> CommandReply {
    CommandReply::text(
        "Movie Night Bot Commands:\n\n\
         !suggest <title> - Suggest a movie\n\
         !list - See all suggestions\n\
         !status - Time until poll\n\
         !help - This message\n\n\
         After suggesting a movie, reply \"yes\" to confirm your selection.",
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use movienight_core::Movie;
    use movienight_scheduler::Scheduler;
    use movienight_store::SuggestionStore;
    use movienight_tmdb::TmdbClient;

    use super::*;
    use crate::handle_message;

    fn context() -> BotContext {
        let store = Arc::new(SuggestionStore::in_memory());
        let scheduler =
            Arc::new(Scheduler::new(Arc::clone(&store), chrono_tz::Europe::Berlin, 5, 12).unwrap());
        BotContext {
            store,
            scheduler,
            tmdb: TmdbClient::new("test-key"),
        }
    }

    fn movie(title: &str) -> Movie {
        Movie {
            id: 603,
            title: title.to_string(),
            year: 1999,
            rating: 8.2,
            overview: "A hacker learns the truth.".to_string(),
            poster_url: None,
            imdb_url: Some("https://www.imdb.com/title/tt0133093/".to_string()),
        }
    }

    #[tokio::test]
    async fn suggest_while_locked_never_hits_the_network() {
        let ctx = context();
        ctx.store.lock();
        let reply = handle_message(&ctx, "!suggest The Matrix", "u1", "Alice")
            .await
            .unwrap();
        assert_eq!(reply.text, LOCKED_MESSAGE);
    }

    #[tokio::test]
    async fn suggest_without_title_shows_usage() {
        let ctx = context();
        let reply = handle_message(&ctx, "!suggest", "u1", "Alice").await.unwrap();
        assert!(reply.text.contains("Example: !suggest"));
    }

    #[tokio::test]
    async fn yes_with_pending_confirms_it() {
        let ctx = context();
        ctx.store
            .set_pending_suggestion(movie("The Matrix"), "u1", "Alice")
            .unwrap();

        let reply = handle_message(&ctx, "yes", "u1", "Alice").await.unwrap();
        assert!(reply.text.contains("has been added"));
        assert!(reply.text.contains("imdb.com"));
        assert_eq!(ctx.store.get_suggestion_count(), 1);
        assert!(ctx.store.get_pending_suggestion("u1").is_none());
    }

    #[tokio::test]
    async fn yes_mentions_the_replaced_suggestion() {
        let ctx = context();
        ctx.store.add_suggestion(movie("Alien"), "u1", "Alice").unwrap();
        ctx.store
            .set_pending_suggestion(movie("The Matrix"), "u1", "Alice")
            .unwrap();

        let reply = handle_message(&ctx, "yes", "u1", "Alice").await.unwrap();
        assert!(reply.text.contains("Replaced your previous suggestion: Alien"));
        assert_eq!(ctx.store.get_suggestion_count(), 1);
    }

    #[tokio::test]
    async fn yes_without_pending_is_ignored() {
        let ctx = context();
        assert!(handle_message(&ctx, "yes", "u1", "Alice").await.is_none());
    }

    #[tokio::test]
    async fn yes_on_locked_store_reports_locked() {
        let ctx = context();
        ctx.store
            .set_pending_suggestion(movie("The Matrix"), "u1", "Alice")
            .unwrap();
        ctx.store.lock();

        let reply = handle_message(&ctx, "yes", "u1", "Alice").await.unwrap();
        assert_eq!(reply.text, LOCKED_MESSAGE);
        assert_eq!(ctx.store.get_suggestion_count(), 0);
    }

    #[tokio::test]
    async fn status_reports_lock_state() {
        let ctx = context();
        let reply = handle_message(&ctx, "!status", "u1", "Alice").await.unwrap();
        assert!(reply.text.contains("Deadline: Friday 12:00 (Europe/Berlin)"));
        assert!(!reply.text.contains("locked"));

        ctx.store.lock();
        let reply = handle_message(&ctx, "!status", "u1", "Alice").await.unwrap();
        assert!(reply.text.contains("locked"));
    }

    #[tokio::test]
    async fn list_appends_countdown_only_while_open() {
        let ctx = context();
        ctx.store.add_suggestion(movie("Heat"), "u2", "Bob").unwrap();

        let reply = handle_message(&ctx, "!list", "u1", "Alice").await.unwrap();
        assert!(reply.text.contains("Poll in "));

        ctx.store.lock();
        let reply = handle_message(&ctx, "!list", "u1", "Alice").await.unwrap();
        assert!(!reply.text.contains("Poll in "));
    }

    #[tokio::test]
    async fn unknown_command_and_chatter_are_ignored() {
        let ctx = context();
        assert!(handle_message(&ctx, "!frobnicate", "u1", "Alice").await.is_none());
        assert!(handle_message(&ctx, "hello everyone", "u1", "Alice").await.is_none());
    }

    #[tokio::test]
    async fn help_lists_the_commands() {
        let ctx = context();
        let reply = handle_message(&ctx, "!help", "u1", "Alice").await.unwrap();
        assert!(reply.text.contains("!suggest"));
        assert!(reply.text.contains("!list"));
        assert!(reply.text.contains("!status"));
    }
}
