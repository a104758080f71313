// src/domain/mod.rs
pub mod commands;
pub mod core;
pub mod generator;
pub mod house;
pub mod observers;
pub mod scheduler;
pub mod states;
pub mod subject;
pub mod timer;

pub use self::commands::*;
pub use self::core::*;
pub use self::generator::*;
pub use self::house::*;
pub use self::observers::*;
pub use self::scheduler::*;
pub use self::states::*;
pub use self::subject::*;
pub use self::timer::*;

pub fn handle<S: Scheduler>(command: Command, house: &AuctionHouse<S>) -> Result<CommandSuccess, Errors> {
    match command {
        Command::PlaceBid { bidder, amount } => {
            let bidder = bidder.trim().to_string();
            if bidder.is_empty() {
                return Err(Errors::InvalidBidder);
            }
            if house.place_bid(&bidder, amount) {
                Ok(CommandSuccess::BidAccepted { bidder, amount, state: house.state() })
            } else {
                let state = house.state();
                if state.has_ended() {
                    Err(Errors::AuctionClosed)
                } else {
                    Err(Errors::MustPlaceBidOverHighestBid(state.current_bid))
                }
            }
        }

        Command::StartNewAuction => {
            let state = house.start_new_auction()?;
            Ok(CommandSuccess::AuctionStarted { state })
        }
    }
}
