//! Periodic tick task for the countdown core

use std::{sync::Arc, time::Duration};

use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use super::Shared;

/// Cadence of the decrement callback
pub(super) const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that decrements the countdown once per second
///
/// One task per countdown instance, owning at most one tick schedule at a
/// time. While stopped or expired it parks on the resume notification
/// instead of holding a timer, so a countdown that never runs never
/// schedules a tick.
pub(super) async fn ticker_task(shared: Arc<Shared>) {
    loop {
        // Park until there is something to tick
        let epoch = {
            let inner = shared.lock_inner();
            inner.state.running.then_some(inner.epoch)
        };
        let epoch = match epoch {
            Some(epoch) => epoch,
            None => {
                shared.resume.notified().await;
                continue;
            }
        };

        // A restart bumps the epoch and this schedule is abandoned for a
        // fresh one, so restarts re-anchor the cadence instead of stacking
        // a second tick stream. Missed firings are skipped, not compensated.
        let mut ticks = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
        ticks.set_missed_tick_behavior(MissedTickBehavior::Skip);
        debug!("Tick schedule started (epoch {})", epoch);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    let snapshot = {
                        let mut inner = shared.lock_inner();
                        if inner.epoch != epoch || !inner.state.running {
                            // Cancelled while this tick was pending
                            break;
                        }
                        if inner.state.seconds_remaining > 0 {
                            inner.state.seconds_remaining -= 1;
                        }
                        if inner.state.seconds_remaining == 0 {
                            inner.state.running = false;
                        }
                        inner.state.clone()
                    };

                    let expired = !snapshot.running;
                    shared.publish(snapshot);
                    if expired {
                        debug!("Countdown expired, tick schedule released");
                        break;
                    }
                }
                _ = shared.resume.notified() => {
                    let stale = {
                        let inner = shared.lock_inner();
                        inner.epoch != epoch || !inner.state.running
                    };
                    if stale {
                        break;
                    }
                    // Wakeup from an already-applied restart; the current
                    // schedule is still the valid one
                }
            }
        }
    }
}
