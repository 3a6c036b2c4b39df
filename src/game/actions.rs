use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use crate::card::Card;
use crate::error::ActionError;
use crate::hand::Hand;
use crate::shoe::CardSource;

use super::{Game, GameState};

/// A player decision on the active hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Take another card.
    Hit,
    /// Keep the hand as it is.
    Stand,
    /// Double the bet, take one card and stand.
    DoubleDown,
    /// Split a pair into two hands.
    Split,
    /// Give up the hand for half the bet back.
    Surrender,
}

impl Action {
    /// Every action, in menu order.
    pub const ALL: [Self; 5] = [
        Self::Hit,
        Self::Stand,
        Self::DoubleDown,
        Self::Split,
        Self::Surrender,
    ];

    /// Short key used on the console.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Hit => "h",
            Self::Stand => "s",
            Self::DoubleDown => "d",
            Self::Split => "p",
            Self::Surrender => "u",
        }
    }

    /// Word used on the console.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Stand => "stand",
            Self::DoubleDown => "double",
            Self::Split => "split",
            Self::Surrender => "surrender",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Action {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        Self::ALL
            .into_iter()
            .find(|action| {
                token.eq_ignore_ascii_case(action.key())
                    || token.eq_ignore_ascii_case(action.label())
            })
            .ok_or(ActionError::UnknownAction)
    }
}

impl<S: CardSource> Game<S> {
    /// Validates that `hand_index` is the live hand of the player on turn and
    /// returns the player's seat index.
    fn ensure_player_turn(&self, player_id: u8, hand_index: usize) -> Result<usize, ActionError> {
        if self.state != GameState::PlayerTurn {
            return Err(ActionError::InvalidState);
        }

        let index = self
            .player_index(player_id)
            .ok_or(ActionError::PlayerNotFound)?;
        let player = &self.players[index];
        let hand = player
            .hands()
            .get(hand_index)
            .ok_or(ActionError::HandNotFound)?;

        if index != self.turn || player.active_index() != hand_index {
            return Err(ActionError::NotYourTurn);
        }
        if hand.is_done() {
            return Err(ActionError::HandNotActive);
        }

        Ok(index)
    }

    fn hand_mut(&mut self, index: usize, hand_index: usize) -> Result<&mut Hand, ActionError> {
        self.players[index]
            .hands_mut()
            .get_mut(hand_index)
            .ok_or(ActionError::HandNotFound)
    }

    fn advance_after_hand(&mut self, index: usize) -> Result<(), ActionError> {
        self.players[index].advance();
        self.settle_turn()?;
        Ok(())
    }

    /// Applies `action` to the given hand.
    ///
    /// # Errors
    ///
    /// Returns the error of the underlying action.
    pub fn act(
        &mut self,
        player_id: u8,
        hand_index: usize,
        action: Action,
    ) -> Result<(), ActionError> {
        match action {
            Action::Hit => self.hit(player_id, hand_index).map(|_| ()),
            Action::Stand => self.stand(player_id, hand_index),
            Action::DoubleDown => self.double_down(player_id, hand_index).map(|_| ()),
            Action::Split => self.split(player_id, hand_index),
            Action::Surrender => self.surrender(player_id, hand_index).map(|_| ()),
        }
    }

    /// Returns the actions the player on turn may take on the active hand.
    pub fn legal_actions(&self) -> Vec<Action> {
        let Some(player) = self.players.get(self.turn) else {
            return Vec::new();
        };
        let Some(hand) = player.active_hand() else {
            return Vec::new();
        };
        if self.state != GameState::PlayerTurn || hand.is_done() {
            return Vec::new();
        }

        let funded = player.bankroll() >= hand.bet();
        let first = !hand.has_acted();

        Action::ALL
            .into_iter()
            .filter(|action| match action {
                Action::Hit | Action::Stand => true,
                Action::DoubleDown => {
                    first
                        && funded
                        && (!hand.is_from_split() || self.options.double_after_split)
                }
                Action::Split => first && funded && hand.is_splittable(),
                Action::Surrender => first && self.options.surrender,
            })
            .collect()
    }

    /// Player action: Hit (draw a card).
    ///
    /// A hand that busts is finished and the turn moves on; otherwise the
    /// player decides again, even on 21.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, it is not the
    /// player's turn, the player or hand cannot be found, the hand is not
    /// active, or the shoe is empty.
    pub fn hit(&mut self, player_id: u8, hand_index: usize) -> Result<Card, ActionError> {
        let index = self.ensure_player_turn(player_id, hand_index)?;

        let card = self.draw()?;
        let hand = self.hand_mut(index, hand_index)?;
        hand.hit(card);

        if hand.is_done() {
            log::debug!("player {player_id} busts with {}", hand.value());
            self.advance_after_hand(index)?;
        }

        Ok(card)
    }

    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, it is not the
    /// player's turn, the player or hand cannot be found, or the hand is not
    /// active. Moving to the next hand can also fail if the shoe is empty.
    pub fn stand(&mut self, player_id: u8, hand_index: usize) -> Result<(), ActionError> {
        let index = self.ensure_player_turn(player_id, hand_index)?;

        self.hand_mut(index, hand_index)?.stand();
        self.advance_after_hand(index)
    }

    /// Player action: Double down (double bet, receive one card, then stand).
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, it is not the
    /// player's turn, the player or hand cannot be found, the hand already
    /// took a decision, the player lacks funds, or the shoe is empty.
    pub fn double_down(&mut self, player_id: u8, hand_index: usize) -> Result<Card, ActionError> {
        let index = self.ensure_player_turn(player_id, hand_index)?;

        let player = &self.players[index];
        let hand = &player.hands()[hand_index];

        if hand.has_acted() {
            return Err(ActionError::CannotDouble);
        }
        if hand.is_from_split() && !self.options.double_after_split {
            return Err(ActionError::CannotDouble);
        }

        let bet = hand.bet();
        if player.bankroll() < bet {
            return Err(ActionError::InsufficientFunds);
        }

        let card = self.draw()?;
        let player = &mut self.players[index];
        player
            .debit(bet)
            .map_err(|_| ActionError::InsufficientFunds)?;
        let hand = self.hand_mut(index, hand_index)?;
        hand.double_down(card);

        log::debug!(
            "player {player_id} doubles to {} and draws {card}",
            hand.bet()
        );
        self.advance_after_hand(index)?;
        Ok(card)
    }

    /// Player action: Split (split a pair into two hands).
    ///
    /// The new hand is staked with the same bet. The first hand is dealt its
    /// second card now; the other gets its second card when its turn comes.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, it is not the
    /// player's turn, the player or hand cannot be found, the hand already
    /// took a decision or is not a pair, the player lacks funds, or the shoe
    /// is empty.
    pub fn split(&mut self, player_id: u8, hand_index: usize) -> Result<(), ActionError> {
        let index = self.ensure_player_turn(player_id, hand_index)?;

        if self.players[index].hands()[hand_index].has_acted() {
            return Err(ActionError::CannotSplit);
        }

        self.players[index].split_active()?;
        log::debug!("player {player_id} splits hand {hand_index}");

        self.settle_turn()?;
        Ok(())
    }

    /// Player action: Surrender (forfeit half the bet).
    ///
    /// Returns the refunded half.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, surrender is
    /// disabled, it is not the player's turn, the player or hand cannot be
    /// found, or the hand already took a decision.
    pub fn surrender(&mut self, player_id: u8, hand_index: usize) -> Result<usize, ActionError> {
        let index = self.ensure_player_turn(player_id, hand_index)?;

        if !self.options.surrender {
            return Err(ActionError::CannotSurrender);
        }

        let rounding = self.options.rounding_surrender;
        let hand = self.hand_mut(index, hand_index)?;
        if hand.has_acted() {
            return Err(ActionError::CannotSurrender);
        }

        let refund = hand.surrender(rounding);
        self.players[index].credit(refund);
        log::debug!("player {player_id} surrenders, {refund} returned");

        self.advance_after_hand(index)?;
        Ok(refund)
    }

    /// Checks if it's the specified player's turn on the specified hand.
    pub fn is_player_turn(&self, player_id: u8, hand_index: usize) -> bool {
        self.current_player() == Some(player_id) && self.current_turn().hand_index == hand_index
    }
}
