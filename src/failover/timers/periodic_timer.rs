use crate::actor;
use crate::failover::timers::time::{Clock, RealClock};
use tokio::sync::watch;
use tokio::time::{Duration, Instant};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum TimerKind {
    /// Drives the state machine: `MESSAGES_PER_INTERVAL_FACTOR` ticks per election interval.
    Cycle,
    /// Republishes the status record.
    StatusUpdate,
}

/// TimerTick is what the actor receives. Ticks from a timer generation the actor has already
/// replaced are stale and ignored.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) struct TimerTick {
    pub kind: TimerKind,
    pub generation: u64,
}

/// PeriodicTimerHandle owns a background task that ticks the actor every period. The first tick
/// fires immediately. Dropping the handle stops the task.
pub(crate) struct PeriodicTimerHandle {
    period: watch::Sender<Duration>,
}

struct PeriodicTimerTask<C: Clock> {
    tick: TimerTick,
    period: watch::Receiver<Duration>,
    actor_client: actor::WeakActorClient,
    clock: C,
}

impl PeriodicTimerHandle {
    pub(crate) fn spawn_timer_task(tick: TimerTick, period: Duration, actor_client: actor::WeakActorClient) -> Self {
        let (task, handle) = PeriodicTimerTask::new(tick, period, actor_client, RealClock);
        tokio::task::spawn(task.run());

        handle
    }

    /// The new period counts from the start of the last tick.
    pub(crate) fn set_period(&self, period: Duration) {
        let _ = self.period.send(period);
    }
}

impl<C: Clock + Send + Sync + 'static> PeriodicTimerTask<C> {
    fn new(
        tick: TimerTick,
        period: Duration,
        actor_client: actor::WeakActorClient,
        clock: C,
    ) -> (Self, PeriodicTimerHandle) {
        let (tx, rx) = watch::channel(period);

        let task = PeriodicTimerTask {
            tick,
            period: rx,
            actor_client,
            clock,
        };

        (task, PeriodicTimerHandle { period: tx })
    }

    async fn run(mut self) {
        loop {
            // Handle dropped while the last tick was being handled.
            if self.period.has_changed().is_err() {
                return;
            }

            let tick_start = self.clock.now();

            // The actor acks once the tick is handled, so a slow tick delays the next one instead
            // of piling ticks up in the mailbox.
            if self.actor_client.timer_tick(self.tick).await.is_err() {
                return;
            }

            loop {
                let deadline = tick_start.checked_add(*self.period.borrow());
                tokio::select! {
                    biased;
                    changed = self.period.changed() => {
                        if changed.is_err() {
                            // Handle dropped.
                            return;
                        }
                    }
                    _ = sleep_until(&mut self.clock, deadline) => break,
                }
            }
        }
    }
}

/// A deadline past the end of time never comes.
async fn sleep_until<C: Clock>(clock: &mut C, deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => clock.sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
