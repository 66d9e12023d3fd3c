//! Async driver that plays rounds against a card source.

use crate::error::ActionError;
use crate::game::dealer::{DealerAction, NARRATION_BEGIN, NARRATION_REVEAL};
use crate::game::{DrawRequest, Game, Generation, RoundObserver, RoundState};
use crate::options::TableOptions;
use crate::pacing::{NoPacing, Pacer};
use crate::result::Outcome;
use crate::source::CardSource;

/// Plays rounds by pairing a [`Game`] with a card source and a pacer.
///
/// The presentation layer calls [`start_round`](Self::start_round),
/// [`hit`](Self::hit) and [`stand`](Self::stand), and renders every state
/// passed to its observers.
pub struct Table<S, P = NoPacing> {
    game: Game,
    source: S,
    pacer: P,
    options: TableOptions,
}

impl<S: CardSource> Table<S> {
    /// Creates a table that never pauses between dealer steps.
    #[must_use]
    pub fn unpaced(source: S, options: TableOptions) -> Self {
        Self::new(source, NoPacing, options)
    }
}

#[expect(
    clippy::future_not_send,
    reason = "a table and its observers live on a single task"
)]
impl<S: CardSource, P: Pacer> Table<S, P> {
    /// Creates a table.
    #[must_use]
    pub fn new(source: S, pacer: P, options: TableOptions) -> Self {
        Self {
            game: Game::new(),
            source,
            pacer,
            options,
        }
    }

    /// Registers an observer for every state change.
    pub fn subscribe(&mut self, observer: impl RoundObserver + 'static) {
        self.game.subscribe(observer);
    }

    /// Returns the current round state.
    #[must_use]
    pub const fn state(&self) -> &RoundState {
        self.game.state()
    }

    /// Returns the underlying state machine.
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Returns the card source.
    pub const fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Returns the table options.
    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    /// Starts a new round: shuffles a fresh deck and deals.
    ///
    /// The previous round is discarded before the shuffle begins.
    ///
    /// # Errors
    ///
    /// Returns the source's error if the shuffle or the deal fails; the round
    /// stays in the dealing phase. Retry with [`deal`](Self::deal) or by
    /// starting over.
    pub async fn start_round(&mut self) -> Result<(), ActionError> {
        let generation = self.game.begin_round();
        let shuffled = self.source.shuffle(self.options.decks).await;
        self.game.accept_deck(generation, shuffled)?;
        self.deal().await
    }

    /// Deals the initial cards of the current round.
    ///
    /// # Errors
    ///
    /// Returns an error if the round is not in the dealing phase, no deck is
    /// installed, or the draw fails.
    pub async fn deal(&mut self) -> Result<(), ActionError> {
        let request = self.game.request_deal()?;
        self.fulfil(request).await
    }

    /// Player action: Hit.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn or the draw fails. On
    /// a failed draw the player's hand is unchanged and the hit can be retried.
    pub async fn hit(&mut self) -> Result<(), ActionError> {
        let request = self.game.request_hit()?;
        self.fulfil(request).await
    }

    /// Player action: Stand. Plays out the dealer's turn.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the player's turn or a dealer draw fails.
    /// After a failed draw, continue with [`resume_dealer`](Self::resume_dealer).
    pub async fn stand(&mut self) -> Result<Outcome, ActionError> {
        self.game.stand()?;
        let generation = self.game.generation();

        self.game.narrate(generation, NARRATION_BEGIN)?;
        self.pause().await;
        self.game.narrate(generation, NARRATION_REVEAL)?;
        self.pause().await;

        self.play_dealer(generation).await
    }

    /// Continues the dealer's turn after an interrupted draw.
    ///
    /// # Errors
    ///
    /// Returns an error if it is not the dealer's turn or a dealer draw fails.
    pub async fn resume_dealer(&mut self) -> Result<Outcome, ActionError> {
        let generation = self.game.generation();
        self.play_dealer(generation).await
    }

    async fn play_dealer(&mut self, generation: Generation) -> Result<Outcome, ActionError> {
        loop {
            let action = self.game.dealer_action()?;
            self.game.narrate(generation, action.narration())?;

            match action {
                DealerAction::Hit => {
                    self.pause().await;
                    let request = self.game.request_dealer_draw()?;
                    self.fulfil(request).await?;
                }
                DealerAction::Stand => {
                    self.pause().await;
                    return self.game.settle();
                }
                DealerAction::Bust => return self.game.settle(),
            }
        }
    }

    async fn fulfil(&mut self, request: DrawRequest) -> Result<(), ActionError> {
        let drawn = self.source.draw(request.deck(), request.count()).await;
        self.game.complete_draw(request, drawn)
    }

    async fn pause(&mut self) {
        self.pacer.pause(self.options.dealer_pause).await;
    }
}
