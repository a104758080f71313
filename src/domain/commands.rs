use serde::{Deserialize, Serialize};
use crate::money::Amount;
use super::core::BidderName;
use super::states::AuctionState;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum Command {
    #[serde(rename = "PlaceBid")]
    PlaceBid {
        #[serde(rename = "bidderName")]
        bidder: BidderName,
        #[serde(rename = "bidAmount")]
        amount: Amount,
    },

    #[serde(rename = "StartNewAuction")]
    StartNewAuction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "$type")]
pub enum CommandSuccess {
    #[serde(rename = "BidAccepted")]
    BidAccepted {
        #[serde(rename = "bidderName")]
        bidder: BidderName,
        #[serde(rename = "bidAmount")]
        amount: Amount,
        state: AuctionState,
    },

    #[serde(rename = "AuctionStarted")]
    AuctionStarted {
        state: AuctionState,
    },
}
