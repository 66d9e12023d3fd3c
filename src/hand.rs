//! Hand representation and valuation.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;

/// Highest total a hand can hold without busting.
pub const BLACKJACK: u8 = 21;

/// The two valuations of a hand.
///
/// `low_total` counts every ace as 1 and `high_total` counts every ace as 11.
/// Face cards count 10 in both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HandValue {
    /// Total with every ace counted as 1.
    pub low_total: u8,
    /// Total with every ace counted as 11.
    pub high_total: u8,
}

impl HandValue {
    /// Returns `high_total` if it does not bust, otherwise `low_total`.
    #[must_use]
    pub const fn effective_score(self) -> u8 {
        if self.high_total <= BLACKJACK {
            self.high_total
        } else {
            self.low_total
        }
    }

    /// Returns whether even the low total is over 21.
    #[must_use]
    pub const fn is_busted(self) -> bool {
        self.low_total > BLACKJACK
    }
}

fn evaluate_cards<'a>(cards: impl IntoIterator<Item = &'a Card>) -> HandValue {
    let mut value = HandValue {
        low_total: 0,
        high_total: 0,
    };

    for card in cards {
        value.low_total = value.low_total.saturating_add(card.rank.low_value());
        value.high_total = value.high_total.saturating_add(card.rank.high_value());
    }

    value
}

/// An ordered hand of cards belonging to the player or the dealer.
///
/// Cards are kept in deal order and are only ever appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Turns every face-down card face up.
    pub fn reveal(&mut self) {
        for card in &mut self.cards {
            card.set_face_down(false);
        }
    }

    /// Calculates both totals of the hand.
    #[must_use]
    pub fn value(&self) -> HandValue {
        evaluate_cards(&self.cards)
    }

    /// Single comparable score of the hand.
    #[must_use]
    pub fn effective_score(&self) -> u8 {
        self.value().effective_score()
    }

    /// Returns whether the hand is bust (low total over 21).
    #[must_use]
    pub fn is_busted(&self) -> bool {
        self.value().is_busted()
    }

    /// Effective score of the face-up cards only.
    #[must_use]
    pub fn visible_value(&self) -> u8 {
        evaluate_cards(self.cards.iter().filter(|c| !c.is_face_down())).effective_score()
    }

    /// Returns whether the hand holds at least one ace.
    #[must_use]
    pub fn has_ace(&self) -> bool {
        self.cards.iter().any(Card::is_ace)
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl FromIterator<Card> for Hand {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}
