//! Players and the dealer.

use alloc::vec;
use alloc::vec::Vec;

use crate::error::{ActionError, BetError};
use crate::hand::{Hand, Outcome};

/// Which side of the table a participant sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// A betting player.
    Player,
    /// The house.
    Dealer,
}

/// A seat at the table: bankroll plus the hands played this round.
///
/// Players and the dealer share this shape. The dealer always bets zero and
/// holds exactly one hand.
#[derive(Debug, Clone)]
pub struct Participant {
    id: u8,
    role: Role,
    bankroll: usize,
    hands: Vec<Hand>,
    active: usize,
    insurance: Option<usize>,
    insurance_payout: usize,
}

impl Participant {
    /// Creates a player with the given bankroll.
    #[must_use]
    pub const fn player(id: u8, bankroll: usize) -> Self {
        Self::with_role(id, Role::Player, bankroll)
    }

    /// Creates the dealer.
    #[must_use]
    pub const fn dealer() -> Self {
        Self::with_role(u8::MAX, Role::Dealer, 0)
    }

    const fn with_role(id: u8, role: Role, bankroll: usize) -> Self {
        Self {
            id,
            role,
            bankroll,
            hands: Vec::new(),
            active: 0,
            insurance: None,
            insurance_payout: 0,
        }
    }

    /// Places this round's wager.
    ///
    /// Debits the bankroll and replaces the hands with a single fresh hand
    /// carrying the bet.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::InsufficientFunds`] without changing anything if
    /// the amount exceeds the bankroll.
    pub fn place_bet(&mut self, amount: usize) -> Result<(), BetError> {
        if amount > self.bankroll {
            return Err(BetError::InsufficientFunds);
        }

        self.bankroll -= amount;
        self.reset_hands(amount);
        Ok(())
    }

    /// Replaces the hands with a single fresh hand carrying `bet`.
    pub(crate) fn reset_hands(&mut self, bet: usize) {
        self.hands = vec![Hand::new(bet)];
        self.active = 0;
        self.insurance = None;
        self.insurance_payout = 0;
    }

    /// Splits the active hand and stakes the new hand from the bankroll.
    ///
    /// The new hand is inserted right after the active one.
    ///
    /// # Errors
    ///
    /// Returns [`ActionError::HandNotFound`], [`ActionError::CannotSplit`] or
    /// [`ActionError::InsufficientFunds`] without changing anything.
    pub fn split_active(&mut self) -> Result<(), ActionError> {
        let bankroll = self.bankroll;
        let hand = self.active_hand_mut().ok_or(ActionError::HandNotFound)?;

        if !hand.is_splittable() {
            return Err(ActionError::CannotSplit);
        }
        if bankroll < hand.bet() {
            return Err(ActionError::InsufficientFunds);
        }

        let new_hand = hand.split().ok_or(ActionError::CannotSplit)?;
        self.bankroll -= new_hand.bet();
        self.hands.insert(self.active + 1, new_hand);
        Ok(())
    }

    /// Returns the seat id.
    #[must_use]
    pub const fn id(&self) -> u8 {
        self.id
    }

    /// Returns the participant's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns the current bankroll.
    #[must_use]
    pub const fn bankroll(&self) -> usize {
        self.bankroll
    }

    /// Adds winnings or refunds to the bankroll.
    pub const fn credit(&mut self, amount: usize) {
        self.bankroll += amount;
    }

    /// Takes `amount` from the bankroll.
    ///
    /// # Errors
    ///
    /// Returns [`BetError::InsufficientFunds`] without changing anything if
    /// the bankroll is short.
    pub const fn debit(&mut self, amount: usize) -> Result<(), BetError> {
        if amount > self.bankroll {
            return Err(BetError::InsufficientFunds);
        }
        self.bankroll -= amount;
        Ok(())
    }

    /// Returns this round's hands.
    #[must_use]
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub(crate) fn hands_mut(&mut self) -> &mut [Hand] {
        &mut self.hands
    }

    /// Returns whether the participant has a hand this round.
    #[must_use]
    pub fn is_seated_in_round(&self) -> bool {
        !self.hands.is_empty()
    }

    /// Returns the index of the active hand.
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// Returns the hand currently being played.
    #[must_use]
    pub fn active_hand(&self) -> Option<&Hand> {
        self.hands.get(self.active)
    }

    /// Returns the hand currently being played, mutably.
    pub fn active_hand_mut(&mut self) -> Option<&mut Hand> {
        self.hands.get_mut(self.active)
    }

    /// Moves the cursor to the next hand.
    pub fn advance(&mut self) {
        if self.active < self.hands.len() {
            self.active += 1;
        }
    }

    /// Moves the cursor past every hand.
    pub fn finish(&mut self) {
        self.active = self.hands.len();
    }

    /// Returns whether every hand has been played.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.active >= self.hands.len()
    }

    /// Returns whether any hand still waits for the showdown.
    #[must_use]
    pub fn has_unresolved_hand(&self) -> bool {
        self.hands
            .iter()
            .any(|hand| hand.outcome() == Outcome::Undecided)
    }

    /// Returns the insurance wager, `None` if no decision was made.
    #[must_use]
    pub const fn insurance(&self) -> Option<usize> {
        self.insurance
    }

    pub(crate) const fn set_insurance(&mut self, amount: usize) {
        self.insurance = Some(amount);
    }

    /// Returns the amount credited for insurance this round.
    #[must_use]
    pub const fn insurance_payout(&self) -> usize {
        self.insurance_payout
    }

    pub(crate) const fn set_insurance_payout(&mut self, amount: usize) {
        self.insurance_payout = amount;
    }

    /// Drops this round's hands and insurance.
    pub fn clear(&mut self) {
        self.hands.clear();
        self.active = 0;
        self.insurance = None;
        self.insurance_payout = 0;
    }
}
