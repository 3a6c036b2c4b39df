use crate::error::{BetError, DealError, ShoeError};
use crate::hand::{Hand, Outcome};
use crate::participant::Participant;
use crate::shoe::CardSource;

use super::{Game, GameState};

impl<S: CardSource> Game<S> {
    fn deal_one_card_to_players(&mut self) -> Result<(), DealError> {
        for index in 0..self.players.len() {
            if !self.players[index].is_seated_in_round() {
                continue;
            }
            let card = self.draw()?;
            if let Some(hand) = self.players[index].hands_mut().first_mut() {
                hand.add_card(card);
            }
        }
        Ok(())
    }

    fn deal_one_card_to_dealer(&mut self) -> Result<(), DealError> {
        let card = self.draw()?;
        if let Some(hand) = self.dealer.hands_mut().first_mut() {
            hand.add_card(card);
        }
        Ok(())
    }

    /// Places a bet for the specified player.
    ///
    /// A bet of zero is accepted; the player plays the round for nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state, the player cannot
    /// be found, the player already bet this round, or the player lacks funds.
    pub fn bet(&mut self, player_id: u8, amount: usize) -> Result<(), BetError> {
        if self.state != GameState::Betting {
            return Err(BetError::InvalidState);
        }

        let index = self.player_index(player_id).ok_or(BetError::PlayerNotFound)?;
        let player = &mut self.players[index];
        if player.is_seated_in_round() {
            return Err(BetError::AlreadyBet);
        }

        player.place_bet(amount)?;
        log::debug!("player {player_id} bets {amount}");
        Ok(())
    }

    /// Returns whether the specified player has bet this round.
    pub fn has_bet(&self, player_id: u8) -> bool {
        self.player(player_id)
            .is_some_and(Participant::is_seated_in_round)
    }

    /// Deals initial cards to all players and the dealer.
    ///
    /// Cards go round the table twice: one to each betting player in seat
    /// order, one to the dealer, then the second card the same way. Naturals
    /// are paid at once. If the dealer shows an ace and insurance is offered
    /// the game moves to [`GameState::Insurance`]; otherwise the dealer peeks
    /// on an ace or ten and a dealer blackjack ends the round.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in betting state, no bets have been
    /// placed, or there are not enough cards in the shoe.
    pub fn deal(&mut self) -> Result<(), DealError> {
        if self.state != GameState::Betting {
            return Err(DealError::InvalidState);
        }

        let player_count = self
            .players
            .iter()
            .filter(|p| p.is_seated_in_round())
            .count();
        if player_count == 0 {
            return Err(DealError::NoBets);
        }

        let cards_needed = (player_count + 1) * 2;
        if self.cards_remaining() < cards_needed {
            return Err(DealError::NotEnoughCards);
        }

        self.deal_one_card_to_players()?;
        self.deal_one_card_to_dealer()?;
        self.deal_one_card_to_players()?;
        self.deal_one_card_to_dealer()?;

        log::debug!(
            "dealt {player_count} player(s), dealer shows {:?}",
            self.dealer_up_card()
        );

        let multiple = self.options.blackjack_return;
        for player in &mut self.players {
            let natural = player.hands().first().is_some_and(|hand| {
                hand.outcome() == Outcome::Undecided && hand.is_blackjack()
            });
            if natural {
                Self::pay_natural(player, 0, multiple);
                player.advance();
            }
        }

        let Some(up_card) = self.dealer_up_card() else {
            return Err(DealError::NotEnoughCards);
        };

        if up_card.is_ace() && self.options.insurance && self.any_unresolved_hands() {
            self.state = GameState::Insurance;
            return Ok(());
        }

        if (up_card.is_ace() || up_card.is_ten_valued()) && self.peek_for_blackjack() {
            return Ok(());
        }

        self.begin_player_turns()?;
        Ok(())
    }

    /// Checks the dealer's hole card and ends the round on a dealer blackjack.
    ///
    /// Every unresolved hand loses, insurance is paid, and every player is
    /// done. Returns `true` if the dealer had blackjack.
    pub(super) fn peek_for_blackjack(&mut self) -> bool {
        let dealer_blackjack = self
            .dealer
            .hands()
            .first()
            .is_some_and(Hand::is_blackjack);
        if !dealer_blackjack {
            return false;
        }

        let multiple = self.options.insurance_return;
        for player in &mut self.players {
            for hand in player.hands_mut() {
                if hand.outcome() == Outcome::Undecided {
                    hand.resolve(Outcome::Lost);
                }
            }

            let insurance = player.insurance().unwrap_or(0);
            if insurance > 0 {
                let payout = insurance * multiple;
                player.credit(payout);
                player.set_insurance_payout(payout);
            }
            player.finish();
        }

        if let Some(hand) = self.dealer.hands_mut().first_mut() {
            hand.stand();
        }
        self.hole_revealed = true;
        self.state = GameState::RoundOver;
        log::debug!("dealer blackjack, round over");
        true
    }

    /// Opens player turns at the first hand that needs a decision.
    pub(super) fn begin_player_turns(&mut self) -> Result<(), ShoeError> {
        self.state = GameState::PlayerTurn;
        self.turn = 0;
        self.settle_turn()
    }
}
