//! Card types and their text form.

use core::fmt;
use core::str::FromStr;

use crate::error::CardParseError;

/// Card suit.
///
/// The joker suit is reserved; a standard shoe never contains it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Suit {
    /// Joker.
    Joker,
    /// Diamonds.
    Diamonds,
    /// Clubs.
    Clubs,
    /// Hearts.
    Hearts,
    /// Spades.
    Spades,
}

impl Suit {
    /// The four suits of a standard deck.
    pub const STANDARD: [Self; 4] = [Self::Diamonds, Self::Clubs, Self::Hearts, Self::Spades];

    const fn symbol(self) -> char {
        match self {
            Self::Joker => 'J',
            Self::Diamonds => 'D',
            Self::Clubs => 'C',
            Self::Hearts => 'H',
            Self::Spades => 'S',
        }
    }

    const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'J' => Some(Self::Joker),
            'D' => Some(Self::Diamonds),
            'C' => Some(Self::Clubs),
            'H' => Some(Self::Hearts),
            'S' => Some(Self::Spades),
            _ => None,
        }
    }
}

/// A playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    /// The suit of the card.
    pub suit: Suit,
    /// The rank of the card (1 = Ace, 11 = Jack, 12 = Queen, 13 = King).
    pub rank: u8,
}

const RANKS: [char; 13] = [
    'A', '2', '3', '4', '5', '6', '7', '8', '9', 'T', 'J', 'Q', 'K',
];

impl Card {
    /// Creates a new card.
    ///
    /// Note: This function does not validate the rank. Values outside 1..=13
    /// are accepted but count as zero points when evaluating a hand.
    #[must_use]
    pub const fn new(suit: Suit, rank: u8) -> Self {
        Self { suit, rank }
    }

    /// Returns whether the card is an ace.
    #[must_use]
    pub const fn is_ace(&self) -> bool {
        self.rank == 1
    }

    /// Returns whether the card counts ten points (10, J, Q, K).
    #[must_use]
    pub const fn is_ten_valued(&self) -> bool {
        matches!(self.rank, 10..=13)
    }

    /// Point value of the card with aces counted as one.
    #[must_use]
    pub const fn points(&self) -> u8 {
        match self.rank {
            1..=9 => self.rank,
            10..=13 => 10,
            _ => 0,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rank = match self.rank {
            1..=13 => RANKS[self.rank as usize - 1],
            _ => '?',
        };
        write!(f, "{rank}{}", self.suit.symbol())
    }
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Parses the two-character form, e.g. `AH`, `TD`, `7S`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let (Some(rank), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CardParseError::Length);
        };

        let rank = RANKS
            .iter()
            .position(|&r| r == rank.to_ascii_uppercase())
            .ok_or(CardParseError::Rank(rank))?;
        let suit = Suit::from_symbol(suit.to_ascii_uppercase()).ok_or(CardParseError::Suit(suit))?;

        Ok(Self::new(suit, rank as u8 + 1))
    }
}

/// Number of cards per deck.
pub const DECK_SIZE: usize = 52;
