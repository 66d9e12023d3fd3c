use crate::error::{ActionError, SourceError};
use crate::source::DeckHandle;

use super::{DrawPurpose, DrawRequest, Game, Generation, RoundPhase, RoundState};

impl Game {
    /// Starts a new round, discarding the current one.
    ///
    /// Both hands and the outcome are cleared immediately and the deck handle
    /// is dropped. Any draw still in flight for the previous round will be
    /// rejected as stale when it completes.
    pub fn begin_round(&mut self) -> Generation {
        let generation = self.generation().next();
        if self.pending.take().is_some() {
            log::debug!("abandoning pending draw from round {:?}", self.generation());
        }
        self.deck = None;

        log::info!("starting round {generation:?}");
        self.update(|_| RoundState::dealing(generation));
        generation
    }

    /// Installs the deck shuffled for `generation`.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::Stale`] for an old round,
    /// [`ActionError::InvalidState`] outside the dealing phase, and passes
    /// through the source's error if the shuffle failed. The round stays in
    /// the dealing phase on error.
    pub fn accept_deck(
        &mut self,
        generation: Generation,
        shuffled: Result<DeckHandle, SourceError>,
    ) -> Result<(), ActionError> {
        self.ensure_current(generation)?;
        if self.phase() != RoundPhase::Dealing {
            return Err(ActionError::InvalidState);
        }

        match shuffled {
            Ok(deck) => {
                log::debug!("deck {} installed ({} cards)", deck.id, deck.remaining);
                self.deck = Some(deck);
                Ok(())
            }
            Err(err) => {
                log::warn!("shuffle failed: {err}");
                Err(err.into())
            }
        }
    }

    /// Requests the initial four cards.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not being dealt, a draw is already
    /// pending, or no deck has been installed.
    pub fn request_deal(&mut self) -> Result<DrawRequest, ActionError> {
        self.ensure_phase(RoundPhase::Dealing)?;
        self.issue_draw(DrawPurpose::InitialDeal)
    }
}
