//! Round state machine.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::mem;

use crate::error::{ActionError, SourceError};
use crate::source::DeckHandle;

mod actions;
mod deal;
pub mod dealer;
pub mod state;

pub use dealer::{DealerAction, next_action};
pub use state::{Generation, RoundPhase, RoundState};

/// Receives the round state after every discrete step.
pub trait RoundObserver {
    /// Called synchronously with the new state.
    fn on_update(&mut self, state: &RoundState);
}

impl<F: FnMut(&RoundState)> RoundObserver for F {
    fn on_update(&mut self, state: &RoundState) {
        self(state);
    }
}

/// What an outstanding draw is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrawPurpose {
    /// Two cards each to player and dealer.
    InitialDeal,
    /// One card to the player.
    PlayerHit,
    /// One card to the dealer.
    DealerHit,
}

impl DrawPurpose {
    const fn count(self) -> usize {
        match self {
            Self::InitialDeal => 4,
            Self::PlayerHit | Self::DealerHit => 1,
        }
    }
}

/// A draw the caller must perform against the card source.
///
/// Hand the source's answer back through [`Game::complete_draw`]. The request
/// is tagged with the round it was issued for and with its own sequence
/// number, so a retried draw never matches the request it replaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRequest {
    generation: Generation,
    sequence: u64,
    purpose: DrawPurpose,
    deck: DeckHandle,
}

impl DrawRequest {
    /// Returns the round this request belongs to.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns the sequence number of this draw.
    #[must_use]
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Returns what the draw is for.
    #[must_use]
    pub const fn purpose(&self) -> DrawPurpose {
        self.purpose
    }

    /// Returns the deck to draw from.
    #[must_use]
    pub const fn deck(&self) -> &DeckHandle {
        &self.deck
    }

    /// Returns the number of cards to draw.
    #[must_use]
    pub const fn count(&self) -> usize {
        self.purpose.count()
    }
}

/// A single-round blackjack state machine.
///
/// The game owns the current [`RoundState`] and never talks to a card source
/// itself. Actions that need cards return a [`DrawRequest`]; the caller
/// performs the draw and reports back with [`Game::complete_draw`]. Starting a
/// new round bumps the generation so late results from the previous round are
/// discarded.
pub struct Game {
    state: RoundState,
    deck: Option<DeckHandle>,
    pending: Option<DrawRequest>,
    draws: u64,
    observers: Vec<Box<dyn RoundObserver>>,
}

impl Game {
    /// Creates a game with no round started.
    ///
    /// # Example
    ///
    /// ```
    /// use bjround::{Game, RoundPhase};
    ///
    /// let game = Game::new();
    /// assert_eq!(game.state().phase(), RoundPhase::Dealing);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RoundState::dealing(Generation::default()),
            deck: None,
            pending: None,
            draws: 0,
            observers: Vec::new(),
        }
    }

    /// Registers an observer for every state change.
    pub fn subscribe(&mut self, observer: impl RoundObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Returns the current round state.
    #[must_use]
    pub const fn state(&self) -> &RoundState {
        &self.state
    }

    /// Returns the current round generation.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.state.generation()
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        self.state.phase()
    }

    /// Returns the installed deck handle, if any.
    #[must_use]
    pub const fn deck(&self) -> Option<&DeckHandle> {
        self.deck.as_ref()
    }

    /// Sets the dealer narration line for the given round.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Stale`] if `generation` is not the current round
    /// and [`ActionError::InvalidState`] outside the dealer's turn.
    pub fn narrate(&mut self, generation: Generation, text: &str) -> Result<(), ActionError> {
        self.ensure_current(generation)?;
        if self.phase() != RoundPhase::DealerTurn {
            return Err(ActionError::InvalidState);
        }
        self.update(|state| state.with_narration(text));
        Ok(())
    }

    fn ensure_current(&self, generation: Generation) -> Result<(), ActionError> {
        if generation == self.generation() {
            Ok(())
        } else {
            log::warn!(
                "discarding result for round {:?} (current {:?})",
                generation,
                self.generation()
            );
            Err(ActionError::Stale)
        }
    }

    fn ensure_phase(&self, phase: RoundPhase) -> Result<(), ActionError> {
        if self.pending.is_some() {
            return Err(ActionError::DrawPending);
        }
        if self.phase() != phase {
            return Err(ActionError::InvalidState);
        }
        Ok(())
    }

    /// Records an outstanding draw and hands back the request for it.
    fn issue_draw(&mut self, purpose: DrawPurpose) -> Result<DrawRequest, ActionError> {
        let deck = self.deck.ok_or(SourceError::InvalidState)?;
        self.draws += 1;
        let request = DrawRequest {
            generation: self.generation(),
            sequence: self.draws,
            purpose,
            deck,
        };

        log::debug!(
            "requesting {} card(s) for {purpose:?} (draw {})",
            request.count(),
            request.sequence
        );

        self.pending = Some(request);
        self.update(|state| state.with_draw_pending(true));
        Ok(request)
    }

    /// Replaces the current state with the result of `step` and notifies
    /// observers.
    fn update(&mut self, step: impl FnOnce(RoundState) -> RoundState) {
        let state = mem::take(&mut self.state);
        self.state = step(state);
        self.notify();
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer.on_update(&self.state);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("state", &self.state)
            .field("deck", &self.deck)
            .field("pending", &self.pending)
            .field("observers", &self.observers.len())
            .finish()
    }
}
