//! Round outcomes and their resolution.

use crate::hand::Hand;

/// Terminal result of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The player's hand went over 21.
    PlayerBusted,
    /// The dealer's hand went over 21.
    DealerBusted,
    /// The dealer stood on a score at least as high as the player's.
    DealerWins,
    /// The dealer stood on a lower score than the player's.
    PlayerWins,
}

impl Outcome {
    /// Returns whether the player won the round.
    #[must_use]
    pub const fn player_won(self) -> bool {
        matches!(self, Self::DealerBusted | Self::PlayerWins)
    }

    /// Short status line for the presentation layer.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::PlayerBusted => "You busted!",
            Self::DealerBusted => "Dealer busted - you win!",
            Self::DealerWins => "Dealer won.",
            Self::PlayerWins => "You won!",
        }
    }
}

/// Compares two standing scores. Equal scores go to the dealer.
#[must_use]
pub const fn compare_scores(player_score: u8, dealer_score: u8) -> Outcome {
    if dealer_score >= player_score {
        Outcome::DealerWins
    } else {
        Outcome::PlayerWins
    }
}

/// Resolves finished hands into an outcome.
///
/// Busts are checked before scores, player first.
#[must_use]
pub fn resolve(player: &Hand, dealer: &Hand, player_busted: bool, dealer_busted: bool) -> Outcome {
    if player_busted {
        Outcome::PlayerBusted
    } else if dealer_busted {
        Outcome::DealerBusted
    } else {
        compare_scores(player.effective_score(), dealer.effective_score())
    }
}
