use crate::error::InsuranceError;
use crate::participant::Participant;
use crate::shoe::CardSource;

use super::{Game, GameState};

impl<S: CardSource> Game<S> {
    /// Returns whether insurance is currently being offered.
    pub fn is_insurance_offered(&self) -> bool {
        self.state == GameState::Insurance
    }

    /// Returns whether the player may place an insurance wager this round.
    ///
    /// Players whose hand was already settled by a natural are not asked.
    pub fn is_insurance_eligible(&self, player_id: u8) -> bool {
        self.player(player_id)
            .is_some_and(Participant::has_unresolved_hand)
    }

    /// Returns the largest insurance wager the player may place:
    /// half the hand's bet, capped by the bankroll.
    ///
    /// # Errors
    ///
    /// Returns an error if the player is not found or has no hand to insure.
    pub fn insurance_limit(&self, player_id: u8) -> Result<usize, InsuranceError> {
        let player = self
            .player(player_id)
            .ok_or(InsuranceError::PlayerNotFound)?;
        let bet = player
            .hands()
            .first()
            .ok_or(InsuranceError::NotEligible)?
            .bet();
        Ok((bet / 2).min(player.bankroll()))
    }

    /// Places an insurance wager for the specified player.
    ///
    /// An amount of zero declines insurance. The wager is debited at once;
    /// if the dealer has blackjack it is repaid at
    /// [`insurance_return`](crate::GameOptions::insurance_return) times.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The game is not in the insurance state
    /// - The player is not found or has no unresolved hand
    /// - The player has already made an insurance decision
    /// - The amount exceeds [`insurance_limit`](Self::insurance_limit)
    pub fn insure(&mut self, player_id: u8, amount: usize) -> Result<(), InsuranceError> {
        if self.state != GameState::Insurance {
            return Err(InsuranceError::InvalidState);
        }

        let index = self
            .player_index(player_id)
            .ok_or(InsuranceError::PlayerNotFound)?;
        let player = &self.players[index];

        if !player.has_unresolved_hand() {
            return Err(InsuranceError::NotEligible);
        }
        if player.insurance().is_some() {
            return Err(InsuranceError::AlreadyDecided);
        }

        let limit = self.insurance_limit(player_id)?;
        if amount > limit {
            return Err(InsuranceError::ExceedsLimit { limit });
        }

        let player = &mut self.players[index];
        player
            .debit(amount)
            .map_err(|_| InsuranceError::ExceedsLimit { limit })?;
        player.set_insurance(amount);

        log::debug!("player {player_id} insures for {amount}");
        Ok(())
    }

    /// Declines insurance for the specified player.
    ///
    /// # Errors
    ///
    /// Same as [`insure`](Self::insure).
    pub fn decline_insurance(&mut self, player_id: u8) -> Result<(), InsuranceError> {
        self.insure(player_id, 0)
    }

    /// Checks if all eligible players have made their insurance decision.
    pub fn all_insurance_decided(&self) -> bool {
        self.players
            .iter()
            .filter(|p| p.has_unresolved_hand())
            .all(|p| p.insurance().is_some())
    }

    /// Finishes the insurance phase and peeks at the dealer's hole card.
    ///
    /// If the dealer has blackjack the round ends immediately; insurance is
    /// paid and every unresolved hand loses. Otherwise insurance wagers are
    /// lost and player turns begin.
    ///
    /// Returns `true` if the dealer has blackjack.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in insurance state or some eligible
    /// player has not decided.
    pub fn finish_insurance(&mut self) -> Result<bool, InsuranceError> {
        if self.state != GameState::Insurance {
            return Err(InsuranceError::InvalidState);
        }
        if !self.all_insurance_decided() {
            return Err(InsuranceError::Undecided);
        }

        if self.peek_for_blackjack() {
            return Ok(true);
        }

        self.begin_player_turns()?;
        Ok(false)
    }

    /// Returns the insurance bet for the specified player.
    pub fn get_insurance_bet(&self, player_id: u8) -> Option<usize> {
        self.player(player_id).and_then(Participant::insurance)
    }
}
