//! Countdown timer core
//!
//! Owns the remaining-time value for a payment-code expiry window, ticks it
//! down once per second while running, and stops automatically at zero. A
//! [`Countdown`] is both the control handle and the read surface: `stop` and
//! `restart` mutate the shared state synchronously, the ticker task
//! decrements it out of band, and every change is published on a watch
//! channel so a consuming view can re-render on each tick.

mod ticker;

use std::sync::{Arc, Mutex, MutexGuard};

use tokio::{
    sync::{watch, Notify},
    task::JoinHandle,
};
use tracing::{debug, info, warn};

use crate::state::{CountdownState, Phase, TimeLeft};

/// Fields behind the state mutex
#[derive(Debug)]
struct Inner {
    state: CountdownState,
    /// Bumped on every restart; ticks from an older schedule check it and bail
    epoch: u64,
}

/// State shared between the handle and the ticker task
#[derive(Debug)]
struct Shared {
    total_duration_seconds: u64,
    inner: Mutex<Inner>,
    update_tx: watch::Sender<CountdownState>,
    resume: Notify,
}

impl Shared {
    /// Lock the state, recovering from poisoning
    ///
    /// The state is a plain record that stays valid even if a peer panicked
    /// while holding the guard, so a poisoned lock is not an error here.
    fn lock_inner(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Publish a state snapshot to watchers
    fn publish(&self, snapshot: CountdownState) {
        if let Err(e) = self.update_tx.send(snapshot) {
            warn!("Failed to send countdown update: {}", e);
        }
    }
}

/// A live countdown instance
///
/// Created with [`Countdown::start`]; ticking begins immediately unless the
/// duration is zero. Dropping the value cancels the ticker task, so the
/// periodic tick is released on every exit path even when [`Countdown::stop`]
/// was never called.
#[derive(Debug)]
pub struct Countdown {
    shared: Arc<Shared>,
    update_rx: watch::Receiver<CountdownState>,
    ticker: JoinHandle<()>,
}

impl Countdown {
    /// Start a countdown of the given duration in whole seconds
    ///
    /// A zero-second countdown is immediately expired and never schedules a
    /// tick. Must be called from within a Tokio runtime.
    pub fn start(duration_seconds: u64) -> Self {
        let state = CountdownState::new(duration_seconds);
        let (update_tx, update_rx) = watch::channel(state.clone());

        let shared = Arc::new(Shared {
            total_duration_seconds: duration_seconds,
            inner: Mutex::new(Inner { state, epoch: 0 }),
            update_tx,
            resume: Notify::new(),
        });

        let ticker = tokio::spawn(ticker::ticker_task(Arc::clone(&shared)));
        info!("Countdown started for {}s", duration_seconds);

        Self {
            shared,
            update_rx,
            ticker,
        }
    }

    /// Stop the countdown, freezing the remaining time
    ///
    /// Idempotent. Cancellation is synchronous: a tick that fires after this
    /// returns observes the stopped state and never decrements.
    pub fn stop(&self) {
        let snapshot = {
            let mut inner = self.shared.lock_inner();
            if !inner.state.running {
                debug!("Stop requested on a countdown that is not running");
                return;
            }
            inner.state.running = false;
            inner.state.clone()
        };

        info!(
            "Countdown stopped with {}s remaining",
            snapshot.seconds_remaining
        );
        self.shared.publish(snapshot);
    }

    /// Restart the countdown at the originally configured duration
    ///
    /// Resets the clock to the full duration (not the value at the time of a
    /// stop) and resumes ticking, whether the countdown was running, stopped,
    /// or expired. The previous tick schedule is invalidated before the next
    /// tick can fire, so no duplicate tick streams exist.
    pub fn restart(&self) {
        let snapshot = {
            let mut inner = self.shared.lock_inner();
            inner.epoch = inner.epoch.wrapping_add(1);
            inner.state.seconds_remaining = self.shared.total_duration_seconds;
            inner.state.running = self.shared.total_duration_seconds > 0;
            inner.state.clone()
        };

        info!(
            "Countdown restarted at {}s",
            snapshot.total_duration_seconds
        );
        self.shared.publish(snapshot);
        self.shared.resume.notify_one();
    }

    /// Get a snapshot of the current countdown state
    pub fn snapshot(&self) -> CountdownState {
        self.shared.lock_inner().state.clone()
    }

    /// Get the remaining time decomposed into minutes and seconds
    pub fn time_left(&self) -> TimeLeft {
        self.snapshot().time_left()
    }

    /// Get the current observable phase
    pub fn phase(&self) -> Phase {
        self.snapshot().phase()
    }

    /// Check if the tick process is currently active
    pub fn is_running(&self) -> bool {
        self.snapshot().running
    }

    /// Get the originally configured duration
    pub fn total_duration_seconds(&self) -> u64 {
        self.shared.total_duration_seconds
    }

    /// Subscribe to per-tick state updates
    ///
    /// The receiver holds the latest state and is updated on every tick and
    /// on every stop/restart, so a consuming view can re-render with the
    /// current time left through its own mechanism.
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.update_rx.clone()
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.ticker.abort();
        debug!("Countdown ticker cancelled on teardown");
    }
}

#[cfg(test)]
mod tests {
    use super::ticker::TICK_PERIOD;
    use super::*;
    use crate::state::Phase;
    use tokio::{task, time};

    /// Let the ticker task observe the latest command and anchor its schedule
    /// before the test advances the clock
    async fn settle() {
        task::yield_now().await;
        task::yield_now().await;
    }

    /// Simulate `n` one-second ticks on the paused test clock
    async fn tick(n: u64) {
        for _ in 0..n {
            time::advance(TICK_PERIOD).await;
            task::yield_now().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn starts_with_full_duration() {
        let countdown = Countdown::start(125);
        settle().await;

        let left = countdown.time_left();
        assert_eq!(left.minutes, 2);
        assert_eq!(left.seconds, 5);
        assert_eq!(left.minutes * 60 + left.seconds, 125);
        assert_eq!(countdown.phase(), Phase::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_decrement_once_per_second() {
        let countdown = Countdown::start(10);
        settle().await;

        tick(1).await;
        assert_eq!(countdown.snapshot().seconds_remaining, 9);

        tick(3).await;
        assert_eq!(countdown.snapshot().seconds_remaining, 6);
        assert_eq!(countdown.phase(), Phase::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn expires_and_stays_terminal() {
        let countdown = Countdown::start(3);
        settle().await;

        tick(3).await;
        let state = countdown.snapshot();
        assert_eq!(state.seconds_remaining, 0);
        assert!(!state.running);
        assert_eq!(countdown.phase(), Phase::Expired);

        // Additional ticks must not decrement past the terminal state
        tick(5).await;
        assert_eq!(countdown.snapshot().seconds_remaining, 0);
        assert_eq!(countdown.phase(), Phase::Expired);
    }

    #[tokio::test(start_paused = true)]
    async fn stop_freezes_remaining_and_is_idempotent() {
        let countdown = Countdown::start(30);
        settle().await;

        tick(5).await;
        countdown.stop();
        assert_eq!(countdown.phase(), Phase::Stopped);

        tick(10).await;
        assert_eq!(countdown.snapshot().seconds_remaining, 25);

        countdown.stop();
        tick(4).await;
        assert_eq!(countdown.snapshot().seconds_remaining, 25);
        assert_eq!(countdown.phase(), Phase::Stopped);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_resets_to_original_duration_while_running() {
        let countdown = Countdown::start(10);
        settle().await;

        tick(4).await;
        assert_eq!(countdown.snapshot().seconds_remaining, 6);

        countdown.restart();
        settle().await;
        assert_eq!(countdown.snapshot().seconds_remaining, 10);
        assert_eq!(countdown.phase(), Phase::Running);

        tick(1).await;
        assert_eq!(countdown.snapshot().seconds_remaining, 9);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_resumes_from_stopped() {
        let countdown = Countdown::start(20);
        settle().await;

        tick(7).await;
        countdown.stop();
        assert_eq!(countdown.snapshot().seconds_remaining, 13);

        countdown.restart();
        settle().await;
        assert_eq!(countdown.snapshot().seconds_remaining, 20);
        assert_eq!(countdown.phase(), Phase::Running);

        tick(2).await;
        assert_eq!(countdown.snapshot().seconds_remaining, 18);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_revives_an_expired_countdown() {
        let countdown = Countdown::start(2);
        settle().await;

        tick(2).await;
        assert_eq!(countdown.phase(), Phase::Expired);

        countdown.restart();
        settle().await;
        assert_eq!(countdown.snapshot().seconds_remaining, 2);
        assert_eq!(countdown.phase(), Phase::Running);

        tick(1).await;
        assert_eq!(countdown.snapshot().seconds_remaining, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_is_immediately_expired() {
        let countdown = Countdown::start(0);
        settle().await;

        let state = countdown.snapshot();
        assert_eq!(state.seconds_remaining, 0);
        assert!(!state.running);
        assert_eq!(countdown.phase(), Phase::Expired);

        tick(3).await;
        assert_eq!(countdown.snapshot().seconds_remaining, 0);

        // Restarting a zero-second countdown stays expired
        countdown.restart();
        settle().await;
        assert_eq!(countdown.phase(), Phase::Expired);
        assert!(!countdown.is_running());
    }

    #[tokio::test(start_paused = true)]
    async fn payment_window_scenario() {
        let countdown = Countdown::start(125);
        settle().await;
        assert_eq!(countdown.time_left().to_string(), "2:05");

        tick(65).await;
        assert_eq!(countdown.time_left().to_string(), "1:00");

        countdown.stop();
        tick(10).await;
        assert_eq!(countdown.time_left().to_string(), "1:00");

        countdown.restart();
        settle().await;
        assert_eq!(countdown.time_left().to_string(), "2:05");
    }

    #[tokio::test(start_paused = true)]
    async fn subscriber_observes_ticks() {
        let countdown = Countdown::start(10);
        let mut updates = countdown.subscribe();
        settle().await;

        tick(1).await;
        assert_eq!(updates.borrow_and_update().seconds_remaining, 9);

        countdown.stop();
        let latest = updates.borrow_and_update().clone();
        assert!(!latest.running);
        assert_eq!(latest.seconds_remaining, 9);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels_ticking() {
        let countdown = Countdown::start(5);
        let updates = countdown.subscribe();
        settle().await;

        tick(1).await;
        assert_eq!(updates.borrow().seconds_remaining, 4);

        drop(countdown);
        tick(3).await;
        // No further updates once the owning handle is gone
        assert_eq!(updates.borrow().seconds_remaining, 4);
    }
}
