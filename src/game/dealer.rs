//! Dealer policy and the dealer's turn.

use crate::error::ActionError;
use crate::hand::{BLACKJACK, Hand};
use crate::result::Outcome;

use super::{DrawPurpose, DrawRequest, Game, RoundPhase, RoundState};

/// Highest total the dealer must still draw on.
pub const DEALER_HITS_THROUGH: u8 = 16;

/// Narration shown as the dealer's turn begins.
pub const NARRATION_BEGIN: &str = "The dealer begins their turn...";
/// Narration shown when the dealer's hand is revealed.
pub const NARRATION_REVEAL: &str = "Let me show my hand...";
/// Narration shown before each dealer draw.
pub const NARRATION_DRAW: &str = "Dealer draws a card...";
/// Narration shown when the dealer stands.
pub const NARRATION_STAND: &str = "Dealer stays...";
/// Narration shown when the dealer busts.
pub const NARRATION_BUST: &str = "Dealer busts...";

/// The dealer's next move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DealerAction {
    /// Draw another card.
    Hit,
    /// Keep the current hand.
    Stand,
    /// The hand is over 21.
    Bust,
}

impl DealerAction {
    /// Applies the threshold rule to a high total: hit through 16, stand on
    /// 17 to 21, bust above.
    #[must_use]
    pub const fn for_high_total(high_total: u8) -> Self {
        if high_total <= DEALER_HITS_THROUGH {
            Self::Hit
        } else if high_total <= BLACKJACK {
            Self::Stand
        } else {
            Self::Bust
        }
    }

    /// Narration line announcing this action.
    #[must_use]
    pub const fn narration(self) -> &'static str {
        match self {
            Self::Hit => NARRATION_DRAW,
            Self::Stand => NARRATION_STAND,
            Self::Bust => NARRATION_BUST,
        }
    }
}

/// Decides the dealer's next action from the hand's high total.
///
/// Every ace counts 11 here, so the dealer stands on a soft 17 and a hand
/// such as two aces is a bust.
#[must_use]
pub fn next_action(dealer_hand: &Hand) -> DealerAction {
    DealerAction::for_high_total(dealer_hand.value().high_total)
}

impl Game {
    /// Returns what the dealer policy says to do next.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::InvalidState`] outside the dealer's turn.
    pub fn dealer_action(&self) -> Result<DealerAction, ActionError> {
        if self.phase() != RoundPhase::DealerTurn {
            return Err(ActionError::InvalidState);
        }
        Ok(next_action(self.state.dealer_hand()))
    }

    /// Requests one card for the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the dealer's turn, a draw is pending, the
    /// policy does not call for a hit, or no deck has been installed.
    pub fn request_dealer_draw(&mut self) -> Result<DrawRequest, ActionError> {
        self.ensure_phase(RoundPhase::DealerTurn)?;
        if next_action(self.state.dealer_hand()) != DealerAction::Hit {
            return Err(ActionError::InvalidState);
        }
        self.issue_draw(DrawPurpose::DealerHit)
    }

    /// Ends the dealer's turn once the policy stands or busts.
    ///
    /// A standing dealer wins ties against the player's fixed score.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the dealer's turn, a draw is pending, or
    /// the policy still calls for a hit.
    pub fn settle(&mut self) -> Result<Outcome, ActionError> {
        self.ensure_phase(RoundPhase::DealerTurn)?;
        let step: fn(RoundState) -> RoundState = match next_action(self.state.dealer_hand()) {
            DealerAction::Hit => return Err(ActionError::InvalidState),
            DealerAction::Stand => RoundState::dealer_stood,
            DealerAction::Bust => RoundState::dealer_busted,
        };
        self.update(step);

        let outcome = self.state.outcome().ok_or(ActionError::InvalidState)?;
        log::info!("round {:?} over: {outcome:?}", self.generation());
        Ok(outcome)
    }
}
