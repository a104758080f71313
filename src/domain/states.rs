// src/domain/states.rs
use serde::{Deserialize, Serialize};
use crate::money::Amount;
use super::core::{AuctionStatus, BidderName};

/// Snapshot of the auction item handed to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionState {
    #[serde(rename = "itemName")]
    pub item_name: String,
    pub description: String,
    #[serde(rename = "startingBid")]
    pub starting_bid: Amount,
    #[serde(rename = "currentBid")]
    pub current_bid: Amount,
    #[serde(rename = "highestBidder")]
    pub highest_bidder: Option<BidderName>,
    #[serde(rename = "auctionStatus")]
    pub status: AuctionStatus,
}

impl AuctionState {
    pub fn has_ended(&self) -> bool {
        self.status.is_sold()
    }

    /// The winning bidder and price, once sold with at least one bid.
    pub fn try_get_amount_and_winner(&self) -> Option<(Amount, BidderName)> {
        match (&self.status, &self.highest_bidder) {
            (AuctionStatus::Sold, Some(bidder)) => Some((self.current_bid, bidder.clone())),
            _ => None,
        }
    }
}
