//! The card source the round engine draws from.

use alloc::vec::Vec;

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

use crate::card::{Card, DECK_SIZE, Suit};
use crate::error::ShoeError;

/// A source of cards for the round engine.
///
/// The engine only ever asks how many cards are left, takes the front card,
/// or asks for a fresh shuffled set between rounds.
pub trait CardSource {
    /// Returns the number of cards left to deal.
    fn remaining(&self) -> usize;

    /// Removes and returns the front card.
    ///
    /// # Errors
    ///
    /// Returns [`ShoeError::Exhausted`] when no cards are left.
    fn deal_one(&mut self) -> Result<Card, ShoeError>;

    /// Replaces the remaining cards with a freshly shuffled full set.
    fn reshuffle(&mut self);
}

/// A multi-deck shoe shuffled with a seeded `ChaCha8` generator.
#[derive(Debug, Clone)]
pub struct Shoe {
    /// Cards left, the next card to deal is last.
    cards: Vec<Card>,
    decks: u8,
    rng: ChaCha8Rng,
}

impl Shoe {
    /// Creates a shuffled shoe of `decks` standard decks.
    #[must_use]
    pub fn new(decks: u8, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let cards = Self::create_cards(decks, &mut rng);
        Self { cards, decks, rng }
    }

    /// Creates a shoe that deals exactly `cards`, front first.
    ///
    /// Once the stacked cards are used up the shoe is exhausted until it is
    /// reshuffled, at which point it holds `decks` shuffled decks.
    #[must_use]
    pub fn stacked(decks: u8, cards: &[Card], seed: u64) -> Self {
        let mut cards = cards.to_vec();
        cards.reverse();
        Self {
            cards,
            decks,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Returns the number of decks a full shoe holds.
    #[must_use]
    pub const fn decks(&self) -> u8 {
        self.decks
    }

    /// Reveals the next card without removing it.
    #[must_use]
    pub fn peek(&self) -> Option<&Card> {
        self.cards.last()
    }

    fn create_cards(decks: u8, rng: &mut ChaCha8Rng) -> Vec<Card> {
        let mut cards = Vec::with_capacity(decks as usize * DECK_SIZE);

        for _ in 0..decks {
            for suit in Suit::STANDARD {
                for rank in 1..=13 {
                    cards.push(Card::new(suit, rank));
                }
            }
        }

        cards.shuffle(rng);
        cards
    }
}

impl CardSource for Shoe {
    fn remaining(&self) -> usize {
        self.cards.len()
    }

    fn deal_one(&mut self) -> Result<Card, ShoeError> {
        self.cards.pop().ok_or(ShoeError::Exhausted)
    }

    fn reshuffle(&mut self) {
        self.cards = Self::create_cards(self.decks, &mut self.rng);
        log::debug!("reshuffled {} decks", self.decks);
    }
}
