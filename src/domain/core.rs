// src/domain/core.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use crate::money::Amount;

pub type ObserverId = String;
pub type BidderName = String;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionStatus {
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "going once")]
    GoingOnce,
    #[serde(rename = "going twice")]
    GoingTwice,
    #[serde(rename = "sold")]
    Sold,
}

impl AuctionStatus {
    pub fn is_sold(&self) -> bool {
        matches!(self, AuctionStatus::Sold)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AuctionStatus::Active => "active",
            AuctionStatus::GoingOnce => "going once",
            AuctionStatus::GoingTwice => "going twice",
            AuctionStatus::Sold => "sold",
        }
    }
}

impl fmt::Display for AuctionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuctionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(AuctionStatus::Active),
            "going once" => Ok(AuctionStatus::GoingOnce),
            "going twice" => Ok(AuctionStatus::GoingTwice),
            "sold" => Ok(AuctionStatus::Sold),
            _ => Err(format!("Unknown auction status: {}", s)),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Errors {
    #[error("Auction is closed")]
    AuctionClosed,

    #[error("Must place bid over highest bid: {0}")]
    MustPlaceBidOverHighestBid(Amount),

    #[error("Bidder name cannot be empty")]
    InvalidBidder,

    #[error("Cannot start a new auction while one is active")]
    AuctionStillActive,
}
