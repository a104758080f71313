use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{AuctionHouse, AuctionState, BidderName, Command, Scheduler, TokioScheduler};
use crate::money::Amount;
use super::hub::SessionHub;

/// Shared by every worker: the running auction and the live sessions.
pub struct AppState<S: Scheduler = TokioScheduler> {
    pub house: Arc<AuctionHouse<S>>,
    pub hub: Arc<SessionHub>,
}

impl<S: Scheduler> AppState<S> {
    pub fn new(house: AuctionHouse<S>) -> Self {
        AppState {
            house: Arc::new(house),
            hub: Arc::new(SessionHub::new()),
        }
    }
}

impl<S: Scheduler> Clone for AppState<S> {
    fn clone(&self) -> Self {
        AppState {
            house: Arc::clone(&self.house),
            hub: Arc::clone(&self.hub),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BidRequest {
    #[serde(rename = "bidderName")]
    pub bidder_name: BidderName,
    #[serde(rename = "bidAmount")]
    pub bid_amount: Amount,
}

impl BidRequest {
    pub fn to_command(&self) -> Command {
        Command::PlaceBid {
            bidder: self.bidder_name.clone(),
            amount: self.bid_amount,
        }
    }
}

/// Identifies one UI component on one connection. Its display form is the
/// opaque observer id registered with the subject.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObserverKey {
    pub connection_id: Uuid,
    pub component_id: String,
}

impl ObserverKey {
    pub fn new(connection_id: Uuid, component_id: impl Into<String>) -> Self {
        ObserverKey {
            connection_id,
            component_id: component_id.into(),
        }
    }
}

impl fmt::Display for ObserverKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.connection_id, self.component_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMsg {
    AttachObserver { component_id: String },
    DetachObserver { component_id: String },
    PlaceBid { bidder_name: BidderName, bid_amount: Amount },
    StartNewAuction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMsg {
    AuctionUpdate { component_id: String, state: AuctionState },
    NewAuctionStarted { state: AuctionState },
    AuctionError { message: String },
}
