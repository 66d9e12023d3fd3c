//! Card sources and the in-process shoe.

extern crate alloc;

use alloc::format;
use alloc::vec::Vec;
use core::future::Future;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::SourceError;

/// Base URL for card face images.
pub const IMAGE_BASE: &str = "https://deckofcardsapi.com/static/img";

/// Handle to a shuffled deck held by a card source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeckHandle {
    /// Source-assigned deck identifier.
    pub id: u64,
    /// Cards left in the deck.
    pub remaining: usize,
}

/// Where the round gets its cards from.
///
/// Both operations may suspend. The engine never interprets card images.
pub trait CardSource {
    /// Shuffles a fresh deck made of `decks` standard decks.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unavailable`] if the source cannot be reached or
    /// reports failure.
    fn shuffle(&mut self, decks: u8) -> impl Future<Output = Result<DeckHandle, SourceError>>;

    /// Draws `count` cards from the deck behind `deck`.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unavailable`] on transport failure,
    /// [`SourceError::InvalidState`] if the handle is unknown, and
    /// [`SourceError::Exhausted`] if the deck runs out.
    fn draw(
        &mut self,
        deck: &DeckHandle,
        count: usize,
    ) -> impl Future<Output = Result<Vec<Card>, SourceError>>;
}

/// An in-process, seeded multi-deck shoe.
///
/// Every shuffle builds a new deck with a new id; handles from earlier
/// shuffles are rejected.
pub struct Shoe {
    cards: Vec<Card>,
    deck_id: Option<u64>,
    next_id: u64,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates an empty shoe with the given seed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjround::Shoe;
    ///
    /// let shoe = Shoe::new(42);
    /// assert_eq!(shoe.cards_remaining(), 0);
    /// ```
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            cards: Vec::new(),
            deck_id: None,
            next_id: 1,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates and shuffles a shoe with the specified number of decks.
    fn create_shoe(num_decks: u8, rng: &mut ChaCha8Rng) -> Vec<Card> {
        let mut cards = Vec::with_capacity(num_decks as usize * DECK_SIZE);

        for _ in 0..num_decks {
            for suit in Suit::ALL {
                for rank in Rank::ALL {
                    let card = Card::new(rank, suit);
                    let image = format!("{IMAGE_BASE}/{}.png", card.code());
                    cards.push(card.with_image(image));
                }
            }
        }

        cards.shuffle(rng);
        cards
    }

    /// Replaces the shoe contents with freshly shuffled decks.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Unavailable`] if `decks` is zero.
    pub fn reshuffle(&mut self, decks: u8) -> Result<DeckHandle, SourceError> {
        if decks == 0 {
            return Err(SourceError::Unavailable);
        }

        self.cards = Self::create_shoe(decks, &mut self.rng);
        let id = self.next_id;
        self.next_id += 1;
        self.deck_id = Some(id);

        log::debug!("shuffled deck {id} ({} cards)", self.cards.len());

        Ok(DeckHandle {
            id,
            remaining: self.cards.len(),
        })
    }

    /// Takes `count` cards off the top of the current deck.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::InvalidState`] if `deck` is not the current
    /// deck, or [`SourceError::Exhausted`] if too few cards are left.
    pub fn take(&mut self, deck: &DeckHandle, count: usize) -> Result<Vec<Card>, SourceError> {
        if self.deck_id != Some(deck.id) {
            return Err(SourceError::InvalidState);
        }
        if self.cards.len() < count {
            return Err(SourceError::Exhausted);
        }

        let mut drawn = self.cards.split_off(self.cards.len() - count);
        drawn.reverse();
        Ok(drawn)
    }

    /// Returns the number of cards remaining in the shoe.
    #[must_use]
    pub fn cards_remaining(&self) -> usize {
        self.cards.len()
    }
}

impl CardSource for Shoe {
    async fn shuffle(&mut self, decks: u8) -> Result<DeckHandle, SourceError> {
        self.reshuffle(decks)
    }

    async fn draw(&mut self, deck: &DeckHandle, count: usize) -> Result<Vec<Card>, SourceError> {
        self.take(deck, count)
    }
}
