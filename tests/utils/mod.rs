#![allow(dead_code)]
use live_auction::domain::{
    AuctionHouse, AuctionState, AuctionSubject, ItemGenerator, ManualScheduler, NewItem,
    Observer, ObserverError,
};
use live_auction::money::Amount;
use std::sync::{Arc, Mutex};
use std::time::Duration;
// See https://users.rust-lang.org/t/sharing-code-and-macros-in-tests-directory/3098/7

pub fn usd(units: i64) -> Amount {
    Amount::units(units)
}

pub fn sample_item_name() -> String {
    "Vintage Bronze Clock".to_string()
}

pub fn sample_starting_bid() -> Amount {
    usd(50)
}

pub fn phase_interval() -> Duration {
    Duration::from_secs(10)
}

/// Hands out the same item every time, numbering the names so resets are visible.
pub struct FixedItemGenerator {
    starting_price: Amount,
    generated: Mutex<u32>,
}

impl FixedItemGenerator {
    pub fn new(starting_price: Amount) -> Self {
        FixedItemGenerator {
            starting_price,
            generated: Mutex::new(0),
        }
    }
}

impl ItemGenerator for FixedItemGenerator {
    fn generate_item(&self) -> NewItem {
        let mut generated = self.generated.lock().unwrap();
        *generated += 1;
        let name = if *generated == 1 {
            sample_item_name()
        } else {
            format!("{} #{}", sample_item_name(), generated)
        };
        NewItem {
            name,
            description: "A sample item".to_string(),
            starting_price: self.starting_price,
        }
    }
}

pub fn sample_generator() -> Arc<FixedItemGenerator> {
    Arc::new(FixedItemGenerator::new(sample_starting_bid()))
}

pub fn sample_subject() -> AuctionSubject {
    AuctionSubject::new(sample_generator())
}

pub fn sample_house() -> (AuctionHouse<Arc<ManualScheduler>>, Arc<ManualScheduler>) {
    let scheduler = Arc::new(ManualScheduler::new());
    let house = AuctionHouse::new(sample_generator(), Arc::clone(&scheduler), phase_interval());
    (house, scheduler)
}

/// Remembers every state it is notified with.
#[derive(Clone, Default)]
pub struct RecordingObserver {
    received: Arc<Mutex<Vec<AuctionState>>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed(&self) -> Box<dyn Observer> {
        Box::new(self.clone())
    }

    pub fn received(&self) -> Vec<AuctionState> {
        self.received.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.received.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<AuctionState> {
        self.received.lock().unwrap().last().cloned()
    }
}

impl Observer for RecordingObserver {
    fn update(&self, state: &AuctionState) -> Result<(), ObserverError> {
        self.received.lock().unwrap().push(state.clone());
        Ok(())
    }
}

/// Fails on every notification, counting the attempts.
#[derive(Clone, Default)]
pub struct FailingObserver {
    attempts: Arc<Mutex<usize>>,
}

impl FailingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn boxed(&self) -> Box<dyn Observer> {
        Box::new(self.clone())
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

impl Observer for FailingObserver {
    fn update(&self, _state: &AuctionState) -> Result<(), ObserverError> {
        *self.attempts.lock().unwrap() += 1;
        Err(ObserverError::Failed("view crashed".to_string()))
    }
}

/// Panics on every notification.
pub struct PanickingObserver;

impl Observer for PanickingObserver {
    fn update(&self, _state: &AuctionState) -> Result<(), ObserverError> {
        panic!("observer blew up");
    }
}
