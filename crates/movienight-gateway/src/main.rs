use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tokio::sync::{mpsc, watch};
use tracing::{error, info};

use movienight_commands::{poll::build_poll, BotContext};
use movienight_core::MovieNightConfig;
use movienight_scheduler::Scheduler;
use movienight_store::SuggestionStore;
use movienight_telegram::{PollDispatch, TelegramAdapter};
use movienight_tmdb::TmdbClient;

mod app;
mod http;

const NO_SUGGESTIONS_NOTICE: &str =
    "No movie suggestions this week! Use !suggest <movie title> to add suggestions for next week.";

#[derive(Parser)]
#[command(version, about = "Movie night group-chat bot")]
struct Cli {
    /// Path to the TOML config file (default: movienight.toml).
    #[arg(long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movienight=info,movienight_gateway=info,tower_http=debug".into()),
        )
        .init();

    let cli = Cli::parse();
    let config =
        MovieNightConfig::load(cli.config.as_deref()).context("failed to load configuration")?;
    let tz = config.deadline.tz()?;

    // Store first: the snapshot load tells us where last week left off.
    let store = Arc::new(SuggestionStore::open(&config.storage.snapshot_path));
    let scheduler = Arc::new(Scheduler::new(
        Arc::clone(&store),
        tz,
        config.deadline.day,
        config.deadline.hour,
    )?);
    let ctx = Arc::new(BotContext {
        store: Arc::clone(&store),
        scheduler: Arc::clone(&scheduler),
        tmdb: TmdbClient::new(config.tmdb.api_key.clone()),
    });

    // Dispatch channel: scheduler callback → Telegram delivery task.
    let (poll_tx, poll_rx) = mpsc::channel::<PollDispatch>(8);

    {
        let store = Arc::clone(&store);
        scheduler.on_poll_time(move || {
            let store = Arc::clone(&store);
            let poll_tx = poll_tx.clone();
            async move {
                let dispatch = match build_poll(&store) {
                    Some(poll) => {
                        info!(options = poll.options.len(), "dispatching weekly poll");
                        PollDispatch::Poll(poll)
                    }
                    None => PollDispatch::Notice(NO_SUGGESTIONS_NOTICE.to_string()),
                };
                poll_tx
                    .send(dispatch)
                    .await
                    .map_err(|_| anyhow::anyhow!("poll delivery channel closed"))
            }
        });
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(Arc::clone(&scheduler).run(shutdown_rx));

    info!(
        deadline = %scheduler.deadline_string(),
        remaining = %scheduler.time_until_deadline(),
        suggestions = store.get_suggestion_count(),
        "movie night bot starting"
    );

    // Operator HTTP surface.
    let state = Arc::new(app::AppState {
        store: Arc::clone(&store),
        scheduler: Arc::clone(&scheduler),
    });
    let router = app::build_router(state);
    let addr: SocketAddr = format!("{}:{}", config.http.bind, config.http.port)
        .parse()
        .context("invalid http bind address")?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(%addr, "operator HTTP surface listening");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, router).await {
            error!(error = %e, "http server exited");
        }
    });

    // The Telegram adapter runs in the foreground; ctrl-c stops the world.
    let adapter = TelegramAdapter::new(config.telegram.clone(), ctx);
    tokio::select! {
        _ = adapter.run(poll_rx) => {
            error!("Telegram dispatcher exited unexpectedly");
        }
        _ = tokio::signal::ctrl_c() => {
            info!("shutdown requested");
        }
    }

    let _ = shutdown_tx.send(true);
    Ok(())
}
