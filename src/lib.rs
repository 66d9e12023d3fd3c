//! A single-round blackjack state machine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that owns the round state: hand
//! valuation, the player's turn, the dealer's fixed policy, and outcome
//! resolution. Cards come from a [`CardSource`]; the [`Table`] driver runs a
//! round against one and paces the dealer's narrated steps with a [`Pacer`].
//!
//! # Example
//!
//! ```
//! use bjround::{NoPacing, RoundPhase, Shoe, Table, TableOptions};
//!
//! let mut table = Table::new(Shoe::new(42), NoPacing, TableOptions::default());
//! futures::executor::block_on(async {
//!     table.start_round().await.unwrap();
//!     assert_eq!(table.state().phase(), RoundPhase::PlayerTurn);
//!     let outcome = table.stand().await.unwrap();
//!     assert_eq!(table.state().outcome(), Some(outcome));
//! });
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod pacing;
pub mod result;
pub mod source;
pub mod table;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use error::{ActionError, SourceError};
pub use game::{
    DealerAction, DrawPurpose, DrawRequest, Game, Generation, RoundObserver, RoundPhase,
    RoundState, next_action,
};
pub use hand::{BLACKJACK, Hand, HandValue};
pub use options::TableOptions;
#[cfg(feature = "tokio")]
pub use pacing::TokioPacer;
pub use pacing::{NoPacing, Pacer};
pub use result::{Outcome, compare_scores, resolve};
pub use source::{CardSource, DeckHandle, Shoe};
pub use table::Table;
