//! Round engine and state management.

use alloc::vec::Vec;

use crate::card::Card;
use crate::error::{ShoeError, TableError};
use crate::hand::{Hand, Outcome};
use crate::options::GameOptions;
use crate::participant::Participant;
use crate::shoe::{CardSource, Shoe};

mod actions;
mod bet;
mod dealer;
mod insurance;
pub mod state;

pub use actions::Action;
pub use state::{GameState, TurnPosition};

/// Most players a table can seat; the dealer holds the last ID.
pub const MAX_PLAYERS: usize = u8::MAX as usize;

/// A blackjack round engine for one table.
///
/// The game owns the card source, the seated players and the dealer. Each
/// phase of a round is a method that checks the current [`GameState`] and
/// rejects out-of-order calls without changing anything.
#[derive(Debug, Clone)]
pub struct Game<S = Shoe> {
    /// Cards in the shoe.
    shoe: S,
    /// Game options.
    options: GameOptions,
    /// Current game state.
    state: GameState,
    /// Seated players in seat order.
    players: Vec<Participant>,
    /// The house.
    dealer: Participant,
    /// Index of the player whose turn it is.
    turn: usize,
    /// Whether the dealer's hole card is face up.
    hole_revealed: bool,
    /// Whether the current round has been paid out.
    settled: bool,
    /// Rounds started so far.
    round: u32,
}

impl Game {
    /// Creates a new game with a shuffled shoe from the given seed.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{Game, GameOptions};
    ///
    /// let game = Game::new(GameOptions::default().with_decks(6), 42);
    /// assert_eq!(game.cards_remaining(), 6 * 52);
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        let shoe = Shoe::new(options.decks, seed);
        Self::with_shoe(options, shoe)
    }
}

impl<S: CardSource> Game<S> {
    /// Creates a new game drawing from the given card source.
    #[must_use]
    pub const fn with_shoe(options: GameOptions, shoe: S) -> Self {
        Self {
            shoe,
            options,
            state: GameState::WaitingForPlayers,
            players: Vec::new(),
            dealer: Participant::dealer(),
            turn: 0,
            hole_revealed: false,
            settled: false,
            round: 0,
        }
    }

    /// Joins the game with the specified bankroll.
    ///
    /// Returns the assigned player ID: the lowest one not held by a seated
    /// player. Seat order is join order.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::TableFull`] once every ID below the dealer's
    /// ([`MAX_PLAYERS`] seats) is taken.
    pub fn join(&mut self, bankroll: usize) -> Result<u8, TableError> {
        let id = (0..u8::MAX)
            .find(|id| self.player_index(*id).is_none())
            .ok_or(TableError::TableFull)?;
        self.players.push(Participant::player(id, bankroll));
        log::debug!("player {id} joins with {bankroll}");
        Ok(id)
    }

    /// Leaves the game.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress.
    pub fn leave(&mut self, player_id: u8) -> Result<(), TableError> {
        if self.state != GameState::WaitingForPlayers {
            return Err(TableError::RoundInProgress);
        }
        self.players.retain(|p| p.id() != player_id);
        Ok(())
    }

    /// Reshuffles the shoe.
    ///
    /// # Errors
    ///
    /// Returns an error once cards have been dealt this round.
    pub fn reshuffle(&mut self) -> Result<(), TableError> {
        if self.state != GameState::WaitingForPlayers && self.state != GameState::Betting {
            return Err(TableError::RoundInProgress);
        }
        self.shoe.reshuffle();
        Ok(())
    }

    /// Returns whether the shoe is below the reshuffle low-water mark.
    pub fn needs_reshuffle(&self) -> bool {
        self.shoe.remaining() < self.options.reshuffle_below
    }

    /// Starts a new round and opens betting.
    ///
    /// Reshuffles first when the shoe is below the low-water mark and
    /// returns `true` if it did.
    ///
    /// # Errors
    ///
    /// Returns an error if the previous round has not been cleared.
    pub fn start_round(&mut self) -> Result<bool, TableError> {
        if self.state != GameState::WaitingForPlayers {
            return Err(TableError::RoundInProgress);
        }

        let reshuffled = self.needs_reshuffle();
        if reshuffled {
            self.shoe.reshuffle();
        }

        self.round += 1;
        self.dealer.reset_hands(0);
        for player in &mut self.players {
            player.clear();
        }
        self.turn = 0;
        self.hole_revealed = false;
        self.settled = false;
        self.state = GameState::Betting;

        log::debug!(
            "round {} started, {} cards in shoe",
            self.round,
            self.shoe.remaining()
        );
        Ok(reshuffled)
    }

    /// Draws a card from the shoe.
    fn draw(&mut self) -> Result<Card, ShoeError> {
        let card = self.shoe.deal_one()?;
        log::trace!("drew {card}");
        Ok(card)
    }

    fn player_index(&self, player_id: u8) -> Option<usize> {
        self.players.iter().position(|p| p.id() == player_id)
    }

    /// Pays a natural on the given hand and clears its bet.
    fn pay_natural(player: &mut Participant, hand_index: usize, multiple: usize) {
        let Some(hand) = player.hands_mut().get_mut(hand_index) else {
            return;
        };
        let amount = hand.blackjack() * multiple;
        hand.record_payment(amount);
        player.credit(amount);
        log::debug!("player {} blackjack pays {amount}", player.id());
    }

    /// Moves the turn to the next hand that needs a decision.
    ///
    /// Hands left with one card by a split are filled to two first. A
    /// two-card 21 at the first decision is settled here: a natural is paid,
    /// a split hand stands. When no hand is left the dealer plays.
    fn settle_turn(&mut self) -> Result<(), ShoeError> {
        while let Some(player) = self.players.get(self.turn) {
            let Some(hand) = player.active_hand() else {
                self.turn += 1;
                continue;
            };
            if hand.is_done() {
                self.players[self.turn].advance();
                continue;
            }

            let hand_index = player.active_index();
            while self.players[self.turn].hands()[hand_index].len() < 2 {
                let card = self.draw()?;
                self.players[self.turn].hands_mut()[hand_index].add_card(card);
            }

            let player = &mut self.players[self.turn];
            let hand = &mut player.hands_mut()[hand_index];
            if !hand.has_acted() && hand.is_blackjack() {
                if hand.is_from_split() {
                    hand.stand();
                } else {
                    Self::pay_natural(player, hand_index, self.options.blackjack_return);
                }
                player.advance();
                continue;
            }

            return Ok(());
        }

        log::debug!("all players done, dealer turn");
        self.state = GameState::DealerTurn;
        Ok(())
    }

    /// Returns whether any player hand still waits for the showdown.
    fn any_unresolved_hands(&self) -> bool {
        self.players.iter().any(Participant::has_unresolved_hand)
    }

    /// Returns the game options.
    pub const fn options(&self) -> &GameOptions {
        &self.options
    }

    /// Returns the number of cards remaining in the shoe.
    pub fn cards_remaining(&self) -> usize {
        self.shoe.remaining()
    }

    /// Returns the card source.
    pub const fn shoe(&self) -> &S {
        &self.shoe
    }

    /// Returns the card source mutably, e.g. to stack it between rounds.
    pub const fn shoe_mut(&mut self) -> &mut S {
        &mut self.shoe
    }

    /// Returns the current game state.
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Returns the number of rounds started.
    pub const fn round(&self) -> u32 {
        self.round
    }

    /// Returns the number of seated players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Returns the seated players in seat order.
    pub fn players(&self) -> &[Participant] {
        &self.players
    }

    /// Returns the specified player.
    pub fn player(&self, player_id: u8) -> Option<&Participant> {
        self.players.iter().find(|p| p.id() == player_id)
    }

    /// Returns the current bankroll for the specified player.
    pub fn get_money(&self, player_id: u8) -> Option<usize> {
        self.player(player_id).map(Participant::bankroll)
    }

    /// Returns the dealer.
    pub const fn dealer(&self) -> &Participant {
        &self.dealer
    }

    /// Returns the dealer's face-up card.
    pub fn dealer_up_card(&self) -> Option<Card> {
        self.dealer
            .hands()
            .first()
            .and_then(|hand| hand.cards().first())
            .copied()
    }

    /// Returns whether the dealer's hole card is face up.
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Returns the current turn position.
    pub fn current_turn(&self) -> TurnPosition {
        TurnPosition {
            player_index: self.turn,
            hand_index: self
                .players
                .get(self.turn)
                .map_or(0, Participant::active_index),
        }
    }

    /// Returns the player ID whose turn it is.
    ///
    /// Returns `None` outside player turns.
    pub fn current_player(&self) -> Option<u8> {
        if self.state != GameState::PlayerTurn {
            return None;
        }
        self.players.get(self.turn).map(Participant::id)
    }

    /// Clears all hands (called at the end of a round).
    ///
    /// This also resets the turn position and returns the game to the
    /// `WaitingForPlayers` state.
    pub fn clear_round(&mut self) {
        for player in &mut self.players {
            player.clear();
        }
        self.dealer.clear();
        self.turn = 0;
        self.hole_revealed = false;
        self.settled = false;
        self.state = GameState::WaitingForPlayers;
    }

    /// Abandons the round in progress, refunding every open wager, and clears
    /// the table.
    ///
    /// Hands already settled keep their result. Insurance is refunded only
    /// while the insurance phase is still open.
    ///
    /// Returns the total amount refunded.
    pub fn abandon_round(&mut self) -> usize {
        let mut refunded = 0;
        if !self.settled {
            let insurance_open = self.state == GameState::Insurance;
            for player in &mut self.players {
                let mut amount: usize = player
                    .hands()
                    .iter()
                    .filter(|hand| hand.outcome() == Outcome::Undecided)
                    .map(Hand::bet)
                    .sum();
                if insurance_open {
                    amount += player.insurance().unwrap_or(0);
                }
                player.credit(amount);
                refunded += amount;
            }
        }

        log::warn!("round {} abandoned, {refunded} refunded", self.round);
        self.clear_round();
        refunded
    }
}
