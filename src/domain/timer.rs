// src/domain/timer.rs
use std::sync::Arc;
use std::time::Duration;
use log::{debug, info};
use parking_lot::Mutex;
use super::core::AuctionStatus;
use super::scheduler::Scheduler;
use super::subject::AuctionSubject;

pub const DEFAULT_PHASE_INTERVAL: Duration = Duration::from_secs(10);

pub type SharedSubject = Arc<Mutex<AuctionSubject>>;

struct TimerState<H> {
    phase: u8,
    pending: Option<H>,
    // Bumped on every schedule and cancel; a callback carrying an older
    // generation lost a race with start/stop and must do nothing.
    generation: u64,
}

struct Inner<S: Scheduler> {
    subject: SharedSubject,
    scheduler: S,
    interval: Duration,
    state: Mutex<TimerState<S::Handle>>,
}

/// Walks one subject through active, going once, going twice and sold,
/// one phase per interval. Restarting puts it back at active.
pub struct PhaseTimer<S: Scheduler> {
    inner: Arc<Inner<S>>,
}

impl<S: Scheduler> Clone for PhaseTimer<S> {
    fn clone(&self) -> Self {
        PhaseTimer { inner: Arc::clone(&self.inner) }
    }
}

impl<S: Scheduler> PhaseTimer<S> {
    pub fn new(subject: SharedSubject, scheduler: S, interval: Duration) -> Self {
        PhaseTimer {
            inner: Arc::new(Inner {
                subject,
                scheduler,
                interval,
                state: Mutex::new(TimerState {
                    phase: 0,
                    pending: None,
                    generation: 0,
                }),
            }),
        }
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    pub fn phase(&self) -> u8 {
        self.inner.state.lock().phase
    }

    pub fn is_pending(&self) -> bool {
        self.inner.state.lock().pending.is_some()
    }

    pub fn start(&self) {
        let mut state = self.inner.state.lock();
        Inner::restart(&self.inner, &mut state);
        info!(
            "Auction timer started for '{}'. Next phase in {:?}",
            self.inner.subject.lock().get_state().item_name,
            self.inner.interval
        );
    }

    /// Runs `action` on the subject with the timer held, so no phase change
    /// can slip in between, and restarts the countdown if it returns true.
    pub fn start_if<F>(&self, action: F) -> bool
    where
        F: FnOnce(&mut AuctionSubject) -> bool,
    {
        let mut state = self.inner.state.lock();
        let restart = {
            let mut subject = self.inner.subject.lock();
            action(&mut *subject)
        };
        if restart {
            Inner::restart(&self.inner, &mut state);
            debug!("Auction timer restarted");
        }
        restart
    }

    pub fn stop(&self) {
        let mut state = self.inner.state.lock();
        if self.inner.cancel_pending(&mut state) {
            info!("Auction timer stopped");
        }
    }
}

impl<S: Scheduler> Inner<S> {
    fn cancel_pending(&self, state: &mut TimerState<S::Handle>) -> bool {
        state.generation += 1;
        match state.pending.take() {
            Some(handle) => {
                self.scheduler.cancel(handle);
                true
            }
            None => false,
        }
    }

    fn restart(this: &Arc<Self>, state: &mut TimerState<S::Handle>) {
        this.cancel_pending(state);
        state.phase = 0;
        Inner::schedule_next(this, state);
    }

    fn schedule_next(this: &Arc<Self>, state: &mut TimerState<S::Handle>) {
        state.generation += 1;
        let generation = state.generation;
        let timer = Arc::clone(this);
        let handle = this.scheduler.schedule_after(
            this.interval,
            Box::new(move || timer.on_phase_elapsed(generation)),
        );
        state.pending = Some(handle);
        debug!("Phase {} ends in {:?}", state.phase, this.interval);
    }

    fn on_phase_elapsed(self: Arc<Self>, generation: u64) {
        let mut state = self.state.lock();
        if state.generation != generation {
            debug!("Ignoring stale phase callback");
            return;
        }
        // This callback is the pending one and is now running.
        state.pending = None;
        state.phase += 1;

        match state.phase {
            1 => {
                self.subject.lock().advance_phase_status(AuctionStatus::GoingOnce);
                Inner::schedule_next(&self, &mut state);
            }
            2 => {
                self.subject.lock().advance_phase_status(AuctionStatus::GoingTwice);
                Inner::schedule_next(&self, &mut state);
            }
            3 => {
                self.subject.lock().mark_sold();
                state.generation += 1;
            }
            _ => {
                state.generation += 1;
            }
        }
    }
}
