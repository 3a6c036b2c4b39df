//! Round result types for showdown.

extern crate alloc;

use alloc::vec::Vec;

use crate::hand::{Hand, Outcome};

/// How a single hand ended, for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    /// Player wins (dealer busts or player has higher value).
    Win,
    /// Player loses to the dealer's hand or a dealer blackjack.
    Lose,
    /// Push (tie).
    Push,
    /// Player went over 21.
    Bust,
    /// Player had a natural blackjack.
    Blackjack,
    /// Player surrendered.
    Surrendered,
}

impl HandOutcome {
    /// Classifies a settled hand.
    #[must_use]
    pub fn of(hand: &Hand) -> Self {
        if hand.is_natural() {
            Self::Blackjack
        } else if hand.is_surrendered() {
            Self::Surrendered
        } else if hand.is_bust() {
            Self::Bust
        } else {
            match hand.outcome() {
                Outcome::Won => Self::Win,
                Outcome::Push => Self::Push,
                Outcome::Lost | Outcome::Undecided => Self::Lose,
            }
        }
    }
}

/// Result for a single hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandResult {
    /// The hand index (for split hands).
    pub hand_index: usize,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// Total staked on the hand, including a double.
    pub stake: usize,
    /// Total credited back for the hand over the round.
    pub payout: usize,
    /// Whether the hand was doubled.
    pub doubled: bool,
    /// The player's hand value.
    pub player_value: u8,
    /// The dealer's hand value.
    pub dealer_value: u8,
}

/// Result for a single player after showdown.
#[derive(Debug, Clone)]
pub struct PlayerResult {
    /// The player ID.
    pub player_id: u8,
    /// Results for each hand (multiple if split).
    pub hands: Vec<HandResult>,
    /// Total credited for all hands and insurance.
    pub total_payout: usize,
    /// Net result (positive = profit, negative = loss).
    pub net: isize,
    /// Insurance bet amount (0 if no insurance taken).
    pub insurance_bet: usize,
    /// Insurance payout (0 if dealer didn't have blackjack or no insurance taken).
    pub insurance_payout: usize,
    /// Bankroll after settlement.
    pub bankroll: usize,
}

/// Result of the entire round after showdown.
#[derive(Debug, Clone)]
pub struct RoundResult {
    /// The round number.
    pub round: u32,
    /// Results for each player.
    pub players: Vec<PlayerResult>,
    /// The dealer's final hand value.
    pub dealer_value: u8,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// What the house won (positive) or lost (negative) this round.
    pub house_net: isize,
}
