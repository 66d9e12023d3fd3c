//! Error types for round operations.

use thiserror::Error;

/// Errors reported by a [`CardSource`](crate::source::CardSource).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SourceError {
    /// The source could not be reached or reported failure.
    #[error("card source unavailable")]
    Unavailable,
    /// A draw was attempted without an initialized deck handle.
    #[error("deck handle is absent or uninitialized")]
    InvalidState,
    /// The deck has fewer cards left than requested.
    #[error("not enough cards left in the deck")]
    Exhausted,
}

/// Errors that can occur while driving a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The action is not valid in the current round phase.
    #[error("invalid round phase for this action")]
    InvalidState,
    /// A draw is already outstanding for this round.
    #[error("a draw is already pending")]
    DrawPending,
    /// The result belongs to a round that has since been replaced.
    #[error("result belongs to a stale round")]
    Stale,
    /// The card source failed.
    #[error(transparent)]
    Source(#[from] SourceError),
}
