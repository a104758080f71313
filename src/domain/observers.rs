// src/domain/observers.rs
use thiserror::Error;
use super::states::AuctionState;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ObserverError {
    #[error("Observer is disconnected")]
    Disconnected,

    #[error("Observer failed: {0}")]
    Failed(String),
}

/// Receives every state change of the subject it is attached to.
///
/// Called synchronously while the subject is locked, so implementations
/// must be cheap and must not call back into the subject.
pub trait Observer: Send {
    fn update(&self, state: &AuctionState) -> Result<(), ObserverError>;
}

/// Adapts a closure into an [`Observer`].
pub struct FnObserver<F>(pub F);

impl<F> Observer for FnObserver<F>
where
    F: Fn(&AuctionState) -> Result<(), ObserverError> + Send,
{
    fn update(&self, state: &AuctionState) -> Result<(), ObserverError> {
        (self.0)(state)
    }
}
