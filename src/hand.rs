//! Hand representation and evaluation.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;
use crate::options::RoundingMode;

/// Evaluates cards into `(value, soft)`.
///
/// Aces count one point; the first ace seen while the running total is at
/// most 11 is promoted to eleven. Cards are taken in descending point order,
/// so at most one ace is ever promoted.
fn evaluate_cards(cards: &[Card]) -> (u8, bool) {
    let mut points: Vec<u8> = cards.iter().map(Card::points).collect();
    points.sort_unstable_by(|a, b| b.cmp(a));

    let mut value: u8 = 0;
    let mut soft = false;

    for point in points {
        value = value.saturating_add(point);
        if point == 1 && value <= 11 {
            value += 10;
            soft = true;
        }
    }

    (value, soft)
}

/// Settlement outcome of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Not settled yet.
    #[default]
    Undecided,
    /// The hand beat the dealer (or was a natural).
    Won,
    /// The hand lost (bust, surrender, dealer blackjack, lower value).
    Lost,
    /// The hand tied the dealer.
    Push,
}

/// A participant's hand.
#[derive(Debug, Clone, Default)]
pub struct Hand {
    /// Cards in the hand.
    cards: Vec<Card>,
    /// Bet amount for this hand.
    bet: usize,
    /// Whether the hand can take more cards.
    done: bool,
    /// Settlement outcome.
    outcome: Outcome,
    /// Whether the bet was doubled.
    doubled: bool,
    /// Whether the first decision has been taken.
    acted: bool,
    /// Whether this hand is from a split.
    from_split: bool,
    /// Whether the hand was paid as a natural.
    natural: bool,
    /// Whether the hand was surrendered.
    surrendered: bool,
    /// Total staked on this hand, including a double.
    stake: usize,
    /// Total credited back for this hand.
    paid: usize,
}

impl Hand {
    /// Creates a new empty hand with the given bet.
    #[must_use]
    pub const fn new(bet: usize) -> Self {
        Self {
            cards: Vec::new(),
            bet,
            done: false,
            outcome: Outcome::Undecided,
            doubled: false,
            acted: false,
            from_split: false,
            natural: false,
            surrendered: false,
            stake: bet,
            paid: 0,
        }
    }

    /// Adds a dealt card without counting it as a decision.
    ///
    /// A hand that goes over 21 is finished and lost on the spot.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);

        if self.is_bust() {
            self.done = true;
            self.outcome = Outcome::Lost;
        }
    }

    /// Takes one more card as the player's decision.
    pub fn hit(&mut self, card: Card) {
        self.acted = true;
        self.add_card(card);
    }

    /// Stops taking cards.
    pub const fn stand(&mut self) {
        self.acted = true;
        self.done = true;
    }

    /// Doubles the bet, takes exactly one card and stands.
    ///
    /// The extra stake must already have been debited by the caller.
    pub fn double_down(&mut self, card: Card) {
        self.stake += self.bet;
        self.bet *= 2;
        self.doubled = true;
        self.hit(card);
        self.stand();
    }

    /// Splits a pair, moving the second card into a new hand with the same bet.
    ///
    /// Both hands are left with one card and may each take their own first
    /// decision. Returns `None` without changing anything when the hand is
    /// not a pair.
    pub fn split(&mut self) -> Option<Self> {
        if !self.is_splittable() {
            return None;
        }

        let card = self.cards.pop()?;
        self.acted = false;
        self.from_split = true;

        let mut hand = Self::new(self.bet);
        hand.cards.push(card);
        hand.from_split = true;
        Some(hand)
    }

    /// Gives up the hand, keeping the forfeited half of the bet on it.
    ///
    /// Returns the refunded half, which the caller credits back.
    pub const fn surrender(&mut self, rounding: RoundingMode) -> usize {
        let refund = rounding.half(self.bet);
        self.bet -= refund;
        self.paid += refund;
        self.surrendered = true;
        self.acted = true;
        self.done = true;
        self.outcome = Outcome::Lost;
        refund
    }

    /// Marks a natural as won and clears its bet.
    ///
    /// The caller pays the premium from the returned bet before the field is
    /// cleared, so the generic payout pass never pays the hand again.
    pub const fn blackjack(&mut self) -> usize {
        let bet = self.bet;
        self.bet = 0;
        self.natural = true;
        self.done = true;
        self.outcome = Outcome::Won;
        bet
    }

    /// Finishes the hand with the given outcome.
    pub(crate) const fn resolve(&mut self, outcome: Outcome) {
        self.done = true;
        self.outcome = outcome;
    }

    /// Records an amount credited to the owner for this hand.
    pub(crate) const fn record_payment(&mut self, amount: usize) {
        self.paid += amount;
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the bet amount for this hand.
    #[must_use]
    pub const fn bet(&self) -> usize {
        self.bet
    }

    /// Returns whether the hand can take no more cards.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        self.done
    }

    /// Returns the settlement outcome.
    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Returns whether the bet was doubled.
    #[must_use]
    pub const fn is_doubled(&self) -> bool {
        self.doubled
    }

    /// Returns whether the first decision has been taken on this hand.
    #[must_use]
    pub const fn has_acted(&self) -> bool {
        self.acted
    }

    /// Returns whether this hand is from a split.
    #[must_use]
    pub const fn is_from_split(&self) -> bool {
        self.from_split
    }

    /// Returns whether the hand was paid as a natural blackjack.
    #[must_use]
    pub const fn is_natural(&self) -> bool {
        self.natural
    }

    /// Returns whether the hand was surrendered.
    #[must_use]
    pub const fn is_surrendered(&self) -> bool {
        self.surrendered
    }

    /// Returns the total amount staked on this hand.
    #[must_use]
    pub const fn stake(&self) -> usize {
        self.stake
    }

    /// Returns the total amount credited back for this hand so far.
    #[must_use]
    pub const fn paid(&self) -> usize {
        self.paid
    }

    /// Calculates the value of the hand.
    #[must_use]
    pub fn value(&self) -> u8 {
        evaluate_cards(&self.cards).0
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        evaluate_cards(&self.cards).1
    }

    /// Returns whether the hand is two cards worth 21.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.value() == 21
    }

    /// Returns whether the hand is over 21.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.value() > 21
    }

    /// Returns whether the hand is a pair that can be split.
    ///
    /// Ten-valued cards all pair with each other.
    #[must_use]
    pub fn is_splittable(&self) -> bool {
        match self.cards.as_slice() {
            [a, b] => a.rank == b.rank || (a.is_ten_valued() && b.is_ten_valued()),
            _ => false,
        }
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
