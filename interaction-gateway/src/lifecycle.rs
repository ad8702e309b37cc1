use crate::Error;
use model::interaction::InteractionResponse;
use std::sync::OnceLock;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    NotResponded,
    Responded,
}

/// Tracks the single initial response an interaction may carry. Transitions only
/// ever go from `NotResponded` to `Responded`.
#[derive(Debug, Default)]
pub struct ResponseLifecycle {
    initial: OnceLock<InteractionResponse>,
}

impl ResponseLifecycle {
    pub fn new() -> ResponseLifecycle {
        ResponseLifecycle::default()
    }

    pub fn state(&self) -> LifecycleState {
        match self.initial.get() {
            Some(_) => LifecycleState::Responded,
            None => LifecycleState::NotResponded,
        }
    }

    pub fn record(&self, response: InteractionResponse) -> Result<(), Error> {
        self.initial
            .set(response)
            .map_err(|_| Error::AlreadyResponded)
    }

    pub fn ensure_responded(&self) -> Result<(), Error> {
        match self.state() {
            LifecycleState::Responded => Ok(()),
            LifecycleState::NotResponded => Err(Error::NoInitialResponse),
        }
    }

    pub fn initial_response(&self) -> Option<&InteractionResponse> {
        self.initial.get()
    }
}
