extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;
use crate::error::{ActionError, SourceError};

use super::{DrawPurpose, DrawRequest, Game, RoundPhase, RoundState};

impl Game {
    /// Player action: Hit (request one card).
    ///
    /// The hit control is locked until the returned request is completed.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn, a draw is already
    /// pending, or no deck has been installed.
    pub fn request_hit(&mut self) -> Result<DrawRequest, ActionError> {
        self.ensure_phase(RoundPhase::PlayerTurn)?;
        self.issue_draw(DrawPurpose::PlayerHit)
    }

    /// Player action: Stand (end the player's turn).
    ///
    /// Reveals the dealer's hole card and fixes the player's score for the
    /// rest of the round.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn or a draw is pending.
    pub fn stand(&mut self) -> Result<(), ActionError> {
        self.ensure_phase(RoundPhase::PlayerTurn)?;
        self.update(RoundState::player_stood);
        log::debug!(
            "player stands on {}",
            self.state.player_hand().effective_score()
        );
        Ok(())
    }

    /// Applies the card source's answer to an outstanding draw.
    ///
    /// On failure nothing is added to either hand and the action that issued
    /// the request may be retried.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Stale`] if the request belongs to an earlier
    /// round or was superseded by a later draw, [`ActionError::InvalidState`]
    /// if no draw is outstanding, and the source's error if the draw failed or
    /// came back short.
    pub fn complete_draw(
        &mut self,
        request: DrawRequest,
        drawn: Result<Vec<Card>, SourceError>,
    ) -> Result<(), ActionError> {
        self.ensure_current(request.generation())?;
        match self.pending {
            Some(pending) if pending == request => self.pending = None,
            Some(pending) => {
                log::warn!(
                    "discarding draw {} (outstanding draw is {})",
                    request.sequence(),
                    pending.sequence()
                );
                return Err(ActionError::Stale);
            }
            None => return Err(ActionError::InvalidState),
        }

        let cards = match drawn {
            Ok(cards) if cards.len() == request.count() => cards,
            Ok(cards) => {
                log::warn!(
                    "source returned {} of {} cards for {:?}",
                    cards.len(),
                    request.count(),
                    request.purpose()
                );
                self.update(|state| state.with_draw_pending(false));
                return Err(SourceError::Unavailable.into());
            }
            Err(err) => {
                log::warn!("draw for {:?} failed: {err}", request.purpose());
                self.update(|state| state.with_draw_pending(false));
                return Err(err.into());
            }
        };

        if let Some(deck) = self.deck.as_mut() {
            deck.remaining = deck.remaining.saturating_sub(cards.len());
        }

        match request.purpose() {
            DrawPurpose::InitialDeal => {
                self.update(|state| state.with_draw_pending(false).dealt(cards));
            }
            DrawPurpose::PlayerHit => {
                self.update(|state| {
                    cards
                        .into_iter()
                        .fold(state.with_draw_pending(false), RoundState::player_drew)
                });
            }
            DrawPurpose::DealerHit => {
                self.update(|state| {
                    cards
                        .into_iter()
                        .fold(state.with_draw_pending(false), RoundState::dealer_drew)
                });
            }
        }

        log::debug!(
            "{:?} applied: player {} / dealer {}",
            request.purpose(),
            self.state.player_hand().effective_score(),
            self.state.dealer_hand().effective_score()
        );
        if let Some(outcome) = self.state.outcome() {
            log::info!("round {:?} over: {outcome:?}", self.generation());
        }

        Ok(())
    }
}
