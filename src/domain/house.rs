// src/domain/house.rs
use std::sync::Arc;
use std::time::Duration;
use log::info;
use parking_lot::Mutex;
use crate::money::Amount;
use super::core::Errors;
use super::generator::ItemGenerator;
use super::observers::Observer;
use super::scheduler::Scheduler;
use super::states::AuctionState;
use super::subject::AuctionSubject;
use super::timer::{PhaseTimer, SharedSubject};

/// The running auction: one subject and the timer bound to it.
///
/// Lock order is timer before subject; observers must not call back into
/// the house.
pub struct AuctionHouse<S: Scheduler> {
    subject: SharedSubject,
    timer: PhaseTimer<S>,
}

impl<S: Scheduler> AuctionHouse<S> {
    pub fn new(generator: Arc<dyn ItemGenerator>, scheduler: S, phase_interval: Duration) -> Self {
        let subject = Arc::new(Mutex::new(AuctionSubject::new(generator)));
        let timer = PhaseTimer::new(Arc::clone(&subject), scheduler, phase_interval);
        AuctionHouse { subject, timer }
    }

    /// Starts the phase timer for the current item.
    pub fn open(&self) {
        self.timer.start();
    }

    pub fn close(&self) {
        self.timer.stop();
    }

    pub fn state(&self) -> AuctionState {
        self.subject.lock().get_state()
    }

    pub fn timer(&self) -> &PhaseTimer<S> {
        &self.timer
    }

    pub fn attach(&self, observer_id: impl Into<String>, observer: Box<dyn Observer>) {
        self.subject.lock().attach(observer_id, observer);
    }

    pub fn detach(&self, observer_id: &str) {
        self.subject.lock().detach(observer_id);
    }

    pub fn is_attached(&self, observer_id: &str) -> bool {
        self.subject.lock().is_attached(observer_id)
    }

    pub fn observer_count(&self) -> usize {
        self.subject.lock().observer_count()
    }

    /// An accepted bid restarts the phase countdown from active.
    pub fn place_bid(&self, bidder_name: &str, amount: Amount) -> bool {
        self.timer.start_if(|subject| subject.place_bid(bidder_name, amount))
    }

    /// Lists a new item, keeping every attached observer. Only allowed once
    /// the current item has been sold.
    pub fn start_new_auction(&self) -> Result<AuctionState, Errors> {
        let mut state = None;
        self.timer.start_if(|subject| {
            if subject.status().is_sold() {
                subject.reset();
                state = Some(subject.get_state());
            }
            state.is_some()
        });
        let state = state.ok_or(Errors::AuctionStillActive)?;
        info!("New auction started for '{}'", state.item_name);
        Ok(state)
    }
}
