// src/domain/subject.rs
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use log::{error, info, warn};
use crate::money::Amount;
use super::core::{AuctionStatus, ObserverId};
use super::generator::{ItemGenerator, NewItem};
use super::observers::Observer;
use super::states::AuctionState;

/// The observed auction item.
///
/// Every mutating operation either changes nothing or ends in exactly one
/// broadcast of the fully updated state.
pub struct AuctionSubject {
    state: AuctionState,
    observers: HashMap<ObserverId, Box<dyn Observer>>,
    generator: Arc<dyn ItemGenerator>,
}

impl AuctionSubject {
    pub fn new(generator: Arc<dyn ItemGenerator>) -> Self {
        let subject = AuctionSubject {
            state: listing(generator.generate_item()),
            observers: HashMap::new(),
            generator,
        };
        subject.log_created();
        subject
    }

    /// Replaces the item with a freshly generated one and reopens bidding.
    pub fn reset(&mut self) {
        self.state = listing(self.generator.generate_item());
        self.log_created();
        self.broadcast();
    }

    fn log_created(&self) {
        info!(
            "Auction item '{}' created with starting bid: ${}",
            self.state.item_name, self.state.starting_bid
        );
    }

    pub fn get_state(&self) -> AuctionState {
        self.state.clone()
    }

    pub fn status(&self) -> AuctionStatus {
        self.state.status
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn is_attached(&self, observer_id: &str) -> bool {
        self.observers.contains_key(observer_id)
    }

    /// Registers an observer and delivers the current state to it right away.
    /// Attaching an id that is already registered does nothing.
    pub fn attach(&mut self, observer_id: impl Into<ObserverId>, observer: Box<dyn Observer>) {
        let observer_id = observer_id.into();
        if self.observers.contains_key(&observer_id) {
            return;
        }
        info!("Observer attached: {}", observer_id);
        notify(&observer_id, observer.as_ref(), &self.state);
        self.observers.insert(observer_id, observer);
    }

    pub fn detach(&mut self, observer_id: &str) {
        if self.observers.remove(observer_id).is_some() {
            info!("Observer detached: {}", observer_id);
        }
    }

    fn broadcast(&self) {
        for (observer_id, observer) in &self.observers {
            notify(observer_id, observer.as_ref(), &self.state);
        }
    }

    pub fn place_bid(&mut self, bidder_name: &str, amount: Amount) -> bool {
        if self.state.status.is_sold() {
            warn!("Bid by {} for ${} failed: auction is sold", bidder_name, amount);
            return false;
        }
        if amount <= self.state.current_bid {
            warn!(
                "Bid by {} for ${} failed: must be higher than current bid (${})",
                bidder_name, amount, self.state.current_bid
            );
            return false;
        }

        self.state.current_bid = amount;
        self.state.highest_bidder = Some(bidder_name.to_string());
        // A new bid always revives a stalling auction.
        self.state.status = AuctionStatus::Active;
        info!("New bid: ${} by {}", amount, bidder_name);
        self.broadcast();
        true
    }

    /// Moves to an intermediate phase status. Has no effect once sold, and
    /// never sets `Sold` itself: that is `mark_sold`'s job.
    pub fn advance_phase_status(&mut self, status: AuctionStatus) {
        if self.state.status.is_sold() {
            return;
        }
        if status.is_sold() {
            warn!("Ignoring phase status '{}': use mark_sold", status);
            return;
        }
        self.state.status = status;
        info!("Auction status for '{}': {}", self.state.item_name, status);
        self.broadcast();
    }

    pub fn mark_sold(&mut self) {
        if self.state.status.is_sold() {
            return;
        }
        self.state.status = AuctionStatus::Sold;
        match &self.state.highest_bidder {
            Some(bidder) => info!(
                "Auction for '{}' SOLD to {} for ${}!",
                self.state.item_name, bidder, self.state.current_bid
            ),
            None => info!("Auction for '{}' closed without bids", self.state.item_name),
        }
        self.broadcast();
    }
}

fn listing(item: NewItem) -> AuctionState {
    AuctionState {
        item_name: item.name,
        description: item.description,
        starting_bid: item.starting_price,
        current_bid: item.starting_price,
        highest_bidder: None,
        status: AuctionStatus::Active,
    }
}

// Failures are logged and swallowed; the observer stays registered.
fn notify(observer_id: &str, observer: &dyn Observer, state: &AuctionState) {
    match panic::catch_unwind(AssertUnwindSafe(|| observer.update(state))) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => warn!("Error notifying observer {}: {}", observer_id, err),
        Err(_) => error!("Observer {} panicked while being notified", observer_id),
    }
}
