use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use chrono_tz::Tz;
use tokio::sync::watch;
use tracing::{error, info, warn};

use movienight_store::SuggestionStore;

use crate::deadline::{format_time_until, Deadline};
use crate::error::Result;

/// The reset trigger is fixed at Saturday 00:00 local time, independent
/// of the configured deadline day/hour, so suggestions reopen at a
/// predictable point after any poll.
const RESET_DAY: u8 = 6;
const RESET_HOUR: u8 = 0;

/// Tick cadence of the trigger loop.
const TICK_SECS: u64 = 1;

type PollFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;
type PollCallback = Box<dyn Fn() -> PollFuture + Send + Sync>;

/// Drives the two weekly triggers and the manual one.
///
/// The poll trigger locks the store and invokes the registered dispatch
/// callback; the reset trigger clears the store and releases the lock.
/// Both funnel into the store's synchronous mutations, so trigger
/// firings never interleave their effects — but the dispatch callback
/// itself is async and may suspend on network I/O, during which the
/// store stays locked and suggestion attempts correctly fail.
pub struct Scheduler {
    poll_at: Deadline,
    reset_at: Deadline,
    store: Arc<SuggestionStore>,
    poll_callback: Mutex<Option<PollCallback>>,
}

impl Scheduler {
    pub fn new(store: Arc<SuggestionStore>, tz: Tz, day: u8, hour: u8) -> Result<Self> {
        Ok(Self {
            poll_at: Deadline::new(tz, day, hour)?,
            reset_at: Deadline::new(tz, RESET_DAY, RESET_HOUR)?,
            store,
            poll_callback: Mutex::new(None),
        })
    }

    /// Register the poll-dispatch callback. Exactly one may be
    /// registered; registering again silently replaces the previous one.
    pub fn on_poll_time<F, Fut>(&self, callback: F)
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = anyhow::Result<()>> + Send + 'static,
    {
        let mut slot = self.poll_callback.lock().unwrap();
        *slot = Some(Box::new(move || Box::pin(callback())));
    }

    /// Fire the poll now: lock the store, then run the dispatch callback.
    ///
    /// Locking an already-locked store is a no-op, so manual triggering
    /// is idempotent. A dispatch failure leaves the store locked until
    /// the weekly reset — suggestions are not reopened mid-failure.
    pub async fn trigger_poll(&self) {
        let fut = {
            let guard = self.poll_callback.lock().unwrap();
            let Some(callback) = guard.as_ref() else {
                warn!("poll time reached but no dispatch callback is registered");
                return;
            };
            self.store.lock();
            callback()
        };

        if let Err(e) = fut.await {
            error!(error = %e, "poll dispatch failed; store stays locked until the weekly reset");
        }
    }

    /// Main trigger loop. Ticks every second until `shutdown` broadcasts
    /// `true`, firing whichever trigger instant has been passed and then
    /// recomputing it.
    pub async fn run(self: Arc<Self>, mut shutdown: watch::Receiver<bool>) {
        let mut next_poll = self.poll_at.next_from(Utc::now());
        let mut next_reset = self.reset_at.next_from(Utc::now());
        info!(
            poll = %next_poll.to_rfc3339(),
            reset = %next_reset.to_rfc3339(),
            deadline = %self.poll_at.label(),
            "scheduler started"
        );

        let mut interval = tokio::time::interval(std::time::Duration::from_secs(TICK_SECS));
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    let now = Utc::now();
                    if now >= next_poll {
                        info!("poll trigger fired");
                        self.trigger_poll().await;
                        next_poll = self.poll_at.next_from(Utc::now());
                    }
                    if now >= next_reset {
                        info!("weekly reset fired; suggestions reopened");
                        self.store.reset();
                        next_reset = self.reset_at.next_from(Utc::now());
                    }
                }
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        info!("scheduler shutting down");
                        break;
                    }
                }
            }
        }
    }

    /// Next poll instant, computed from live current time.
    pub fn next_deadline(&self) -> chrono::DateTime<Utc> {
        self.poll_at.next_from(Utc::now())
    }

    /// Human-readable time remaining until the next poll.
    pub fn time_until_deadline(&self) -> String {
        let remaining = self.next_deadline() - Utc::now();
        format_time_until(remaining.num_milliseconds())
    }

    /// Display string for the recurring deadline.
    pub fn deadline_string(&self) -> String {
        self.poll_at.label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn scheduler(store: Arc<SuggestionStore>) -> Scheduler {
        Scheduler::new(store, chrono_tz::Europe::Berlin, 5, 12).unwrap()
    }

    fn movie() -> movienight_core::Movie {
        movienight_core::Movie {
            id: 603,
            title: "The Matrix".to_string(),
            year: 1999,
            rating: 8.2,
            overview: "A hacker learns the truth.".to_string(),
            poster_url: None,
            imdb_url: None,
        }
    }

    #[tokio::test]
    async fn trigger_locks_store_and_runs_callback() {
        let store = Arc::new(SuggestionStore::in_memory());
        let sched = scheduler(Arc::clone(&store));

        let fired = Arc::new(AtomicUsize::new(0));
        let fired2 = Arc::clone(&fired);
        sched.on_poll_time(move || {
            let fired = Arc::clone(&fired2);
            async move {
                fired.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        sched.trigger_poll().await;
        assert!(store.is_locked());
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn trigger_without_callback_is_a_noop() {
        let store = Arc::new(SuggestionStore::in_memory());
        let sched = scheduler(Arc::clone(&store));

        sched.trigger_poll().await;
        assert!(!store.is_locked());
    }

    #[tokio::test]
    async fn trigger_is_idempotent_when_already_locked() {
        let store = Arc::new(SuggestionStore::in_memory());
        let sched = scheduler(Arc::clone(&store));
        sched.on_poll_time(|| async { Ok(()) });

        sched.trigger_poll().await;
        sched.trigger_poll().await;
        assert!(store.is_locked());
    }

    #[tokio::test]
    async fn callback_failure_leaves_store_locked() {
        let store = Arc::new(SuggestionStore::in_memory());
        let sched = scheduler(Arc::clone(&store));
        sched.on_poll_time(|| async { anyhow::bail!("send failed") });

        sched.trigger_poll().await;
        assert!(store.is_locked());
        assert!(matches!(
            store.add_suggestion(movie(), "u1", "Alice"),
            Err(movienight_store::StoreError::Locked)
        ));
    }

    #[tokio::test]
    async fn registering_again_replaces_the_callback() {
        let store = Arc::new(SuggestionStore::in_memory());
        let sched = scheduler(Arc::clone(&store));

        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let c = Arc::clone(&first);
        sched.on_poll_time(move || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });
        let c = Arc::clone(&second);
        sched.on_poll_time(move || {
            let c = Arc::clone(&c);
            async move {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
        });

        sched.trigger_poll().await;
        assert_eq!(first.load(Ordering::SeqCst), 0);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }
}
