//! Round state types and their transitions.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::card::Card;
use crate::hand::Hand;
use crate::result::{Outcome, compare_scores};

/// Round phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RoundPhase {
    /// Shuffling and dealing the initial cards.
    #[default]
    Dealing,
    /// Waiting for the player to hit or stand.
    PlayerTurn,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Round has ended with an outcome.
    RoundOver,
}

/// Identifies one round. Results tagged with an older generation are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Generation(pub(crate) u64);

impl Generation {
    pub(crate) const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Snapshot of a single round.
///
/// Each step of the round produces a new value through the transition
/// methods below; the [`Game`](super::Game) owns the current one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoundState {
    generation: Generation,
    phase: RoundPhase,
    player_hand: Hand,
    dealer_hand: Hand,
    dealer_hole_hidden: bool,
    outcome: Option<Outcome>,
    dealer_narration: Option<String>,
    player_score: Option<u8>,
    draw_pending: bool,
}

impl RoundState {
    /// Fresh state for a round that is about to be dealt.
    #[must_use]
    pub fn dealing(generation: Generation) -> Self {
        Self {
            generation,
            dealer_hole_hidden: true,
            ..Self::default()
        }
    }

    /// Returns the round this state belongs to.
    #[must_use]
    pub const fn generation(&self) -> Generation {
        self.generation
    }

    /// Returns the current phase.
    #[must_use]
    pub const fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Returns the player's hand.
    #[must_use]
    pub const fn player_hand(&self) -> &Hand {
        &self.player_hand
    }

    /// Returns the dealer's hand.
    #[must_use]
    pub const fn dealer_hand(&self) -> &Hand {
        &self.dealer_hand
    }

    /// Returns whether the dealer's second card is still face down.
    #[must_use]
    pub const fn dealer_hole_hidden(&self) -> bool {
        self.dealer_hole_hidden
    }

    /// Returns the outcome, set only once the round is over.
    #[must_use]
    pub const fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Returns the dealer's current narration line.
    #[must_use]
    pub fn dealer_narration(&self) -> Option<&str> {
        self.dealer_narration.as_deref()
    }

    /// Player score fixed when the dealer turn began.
    #[must_use]
    pub const fn player_score(&self) -> Option<u8> {
        self.player_score
    }

    /// Returns whether a draw is outstanding.
    #[must_use]
    pub const fn draw_pending(&self) -> bool {
        self.draw_pending
    }

    /// Returns whether the hit control should be enabled.
    #[must_use]
    pub const fn can_hit(&self) -> bool {
        matches!(self.phase, RoundPhase::PlayerTurn) && !self.draw_pending
    }

    /// Returns whether the round has ended.
    #[must_use]
    pub const fn is_over(&self) -> bool {
        matches!(self.phase, RoundPhase::RoundOver)
    }

    pub(crate) const fn with_draw_pending(mut self, pending: bool) -> Self {
        self.draw_pending = pending;
        self
    }

    pub(crate) fn with_narration(mut self, text: impl Into<String>) -> Self {
        self.dealer_narration = Some(text.into());
        self
    }

    /// Applies the initial four cards: player, dealer, player, dealer (hole).
    pub(crate) fn dealt(mut self, cards: Vec<Card>) -> Self {
        for (index, mut card) in cards.into_iter().enumerate() {
            if index % 2 == 0 {
                self.player_hand.add_card(card);
            } else {
                card.set_face_down(index == 3);
                self.dealer_hand.add_card(card);
            }
        }
        self.phase = RoundPhase::PlayerTurn;
        self
    }

    pub(crate) fn player_drew(mut self, card: Card) -> Self {
        self.player_hand.add_card(card);
        if self.player_hand.is_busted() {
            self.reveal_hole();
            self.finish(Outcome::PlayerBusted)
        } else {
            self
        }
    }

    pub(crate) fn player_stood(mut self) -> Self {
        self.reveal_hole();
        self.player_score = Some(self.player_hand.effective_score());
        self.phase = RoundPhase::DealerTurn;
        self
    }

    pub(crate) fn dealer_drew(mut self, card: Card) -> Self {
        self.dealer_hand.add_card(card);
        self
    }

    pub(crate) fn dealer_stood(self) -> Self {
        let player_score = self
            .player_score
            .unwrap_or_else(|| self.player_hand.effective_score());
        let outcome = compare_scores(player_score, self.dealer_hand.effective_score());
        self.finish(outcome)
    }

    pub(crate) fn dealer_busted(self) -> Self {
        self.finish(Outcome::DealerBusted)
    }

    fn reveal_hole(&mut self) {
        self.dealer_hand.reveal();
        self.dealer_hole_hidden = false;
    }

    const fn finish(mut self, outcome: Outcome) -> Self {
        self.phase = RoundPhase::RoundOver;
        self.outcome = Some(outcome);
        self
    }
}
