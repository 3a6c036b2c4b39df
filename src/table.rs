//! Driving rounds from an interactive table.
//!
//! The engine in [`Game`] only validates; it never asks for anything. A
//! [`Table`] is the other side: it answers the questions a dealer would ask
//! (how many players, how much to bet, insurance, which action) and is told
//! what happened. [`play_round`] wires the two together and re-asks whenever
//! the engine rejects an answer.

use alloc::vec::Vec;

use crate::card::Card;
use crate::error::{ActionError, BetError, InsuranceError, RoundError};
use crate::game::{Action, Game, GameState, TurnPosition};
use crate::hand::Hand;
use crate::participant::Participant;
use crate::result::RoundResult;
use crate::shoe::CardSource;

/// Why an answer from the table was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The wager was not accepted.
    Bet(BetError),
    /// The insurance wager was not accepted.
    Insurance(InsuranceError),
    /// The action is not allowed on this hand.
    Action(ActionError),
}

/// Something the table may want to show.
#[derive(Debug, Clone, Copy)]
pub enum Event<'a> {
    /// A round has started.
    RoundStarted {
        /// The round number.
        round: u32,
    },
    /// The shoe was below the low-water mark and has been reshuffled.
    Reshuffled,
    /// Initial cards are on the table.
    Dealt {
        /// Seated players in seat order.
        players: &'a [Participant],
        /// The dealer; only the up-card should be shown.
        dealer: &'a Participant,
    },
    /// A player was dealt a natural and has been paid.
    Blackjack {
        /// The player.
        player_id: u8,
        /// Amount credited.
        payout: usize,
    },
    /// The dealer has blackjack; the round ends without player turns.
    DealerBlackjack {
        /// The dealer's hand.
        dealer: &'a Hand,
    },
    /// A player hand is finished.
    HandFinished {
        /// The player.
        player_id: u8,
        /// Index of the hand.
        hand_index: usize,
        /// The finished hand.
        hand: &'a Hand,
    },
    /// The dealer drew a card.
    DealerDraw(Card),
    /// The round has been paid out.
    Settled(&'a RoundResult),
    /// An answer was rejected and will be asked for again.
    Rejected {
        /// The player whose answer was rejected.
        player_id: u8,
        /// The reason.
        reason: Rejection,
    },
}

/// Points in a round where an interactive table may pause for effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pace {
    /// After a blackjack is announced.
    Blackjack,
    /// After each dealer draw.
    DealerDraw,
    /// After a player hand is finished.
    HandFinished,
}

/// The interactive side of the table.
///
/// Every `ask_*` call blocks until an answer is available. Answers are only
/// proposals; the engine may reject them, in which case the table is told
/// through [`Event::Rejected`] and asked again.
pub trait Table {
    /// How many players sit down.
    fn ask_player_count(&mut self) -> usize;

    /// Starting bankroll for the player in `seat` (zero-based).
    fn ask_starting_bankroll(&mut self, seat: usize) -> usize;

    /// This round's wager for `player`.
    fn ask_bet(&mut self, player: &Participant) -> usize;

    /// Insurance wager for `player`, at most `max`; zero declines.
    fn ask_insurance(&mut self, player: &Participant, max: usize) -> usize;

    /// Decision for `hand`. `legal` lists the actions the engine will accept.
    fn ask_action(&mut self, player: &Participant, hand: &Hand, legal: &[Action]) -> Action;

    /// Shows something that happened.
    fn notify(&mut self, _event: Event<'_>) {}

    /// Pauses for presentation.
    fn pace(&mut self, _pace: Pace) {}

    /// Returns whether the table has gone away, e.g. its input ended.
    ///
    /// Checked after every answer; a closed table ends the round with
    /// [`RoundError::Closed`] instead of being asked again.
    fn is_closed(&self) -> bool {
        false
    }
}

/// Asks the table who sits down and seats them.
///
/// Returns the assigned player IDs in seat order. Seating stops when the
/// table is full or closed.
pub fn seat_players<S: CardSource, T: Table>(game: &mut Game<S>, table: &mut T) -> Vec<u8> {
    let count = table.ask_player_count();
    let mut ids = Vec::new();
    for seat in 0..count {
        if table.is_closed() {
            break;
        }
        let bankroll = table.ask_starting_bankroll(seat);
        if table.is_closed() {
            break;
        }
        match game.join(bankroll) {
            Ok(id) => ids.push(id),
            Err(err) => {
                log::warn!("seat {seat} not seated: {err}");
                break;
            }
        }
    }
    ids
}

/// Plays one full round at the table.
///
/// # Errors
///
/// Returns an error if the round cannot start, no one bets, the shoe runs
/// out mid-round, or the table closes. Rejected answers are not errors; they
/// are asked again. On error the round is left as it was; call
/// [`Game::abandon_round`] to refund open bets.
pub fn play_round<S: CardSource, T: Table>(
    game: &mut Game<S>,
    table: &mut T,
) -> Result<RoundResult, RoundError> {
    if table.is_closed() {
        return Err(RoundError::Closed);
    }
    if game.start_round()? {
        table.notify(Event::Reshuffled);
    }
    table.notify(Event::RoundStarted {
        round: game.round(),
    });

    let ids: Vec<u8> = game.players().iter().map(Participant::id).collect();

    for &id in &ids {
        collect_bet(game, table, id)?;
    }

    game.deal()?;
    table.notify(Event::Dealt {
        players: game.players(),
        dealer: game.dealer(),
    });

    for player in game.players() {
        for hand in player.hands().iter().filter(|hand| hand.is_natural()) {
            table.notify(Event::Blackjack {
                player_id: player.id(),
                payout: hand.paid(),
            });
            table.pace(Pace::Blackjack);
        }
    }

    if game.is_insurance_offered() {
        for &id in &ids {
            if game.is_insurance_eligible(id) {
                collect_insurance(game, table, id)?;
            }
        }
        game.finish_insurance()?;
    }

    if game.state() == GameState::RoundOver {
        if let Some(hand) = game.dealer().hands().first().filter(|hand| hand.is_blackjack()) {
            table.notify(Event::DealerBlackjack { dealer: hand });
        }
    }

    while game.state() == GameState::PlayerTurn {
        play_turn(game, table)?;
    }

    if game.state() == GameState::DealerTurn {
        for card in game.dealer_play()? {
            table.notify(Event::DealerDraw(card));
            table.pace(Pace::DealerDraw);
        }
    }

    let result = game.showdown()?;
    table.notify(Event::Settled(&result));
    game.clear_round();
    Ok(result)
}

fn collect_bet<S: CardSource, T: Table>(
    game: &mut Game<S>,
    table: &mut T,
    player_id: u8,
) -> Result<(), RoundError> {
    while let Some(player) = game.player(player_id) {
        let amount = table.ask_bet(player);
        if table.is_closed() {
            return Err(RoundError::Closed);
        }
        match game.bet(player_id, amount) {
            Ok(()) => break,
            Err(BetError::InsufficientFunds) => table.notify(Event::Rejected {
                player_id,
                reason: Rejection::Bet(BetError::InsufficientFunds),
            }),
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn collect_insurance<S: CardSource, T: Table>(
    game: &mut Game<S>,
    table: &mut T,
    player_id: u8,
) -> Result<(), RoundError> {
    loop {
        let max = game.insurance_limit(player_id)?;
        let Some(player) = game.player(player_id) else {
            return Err(InsuranceError::PlayerNotFound.into());
        };
        let amount = table.ask_insurance(player, max);
        if table.is_closed() {
            return Err(RoundError::Closed);
        }
        match game.insure(player_id, amount) {
            Ok(()) => return Ok(()),
            Err(err @ InsuranceError::ExceedsLimit { .. }) => table.notify(Event::Rejected {
                player_id,
                reason: Rejection::Insurance(err),
            }),
            Err(err) => return Err(err.into()),
        }
    }
}

fn play_turn<S: CardSource, T: Table>(game: &mut Game<S>, table: &mut T) -> Result<(), RoundError> {
    let turn = game.current_turn();
    let legal = game.legal_actions();
    let Some(player) = game.players().get(turn.player_index) else {
        return Err(ActionError::InvalidState.into());
    };
    let Some(hand) = player.active_hand() else {
        return Err(ActionError::HandNotFound.into());
    };

    let player_id = player.id();
    let action = table.ask_action(player, hand, &legal);
    if table.is_closed() {
        return Err(RoundError::Closed);
    }

    match game.act(player_id, turn.hand_index, action) {
        Ok(()) => {
            announce_finished(game, table, turn);
            Ok(())
        }
        Err(err) if err.is_recoverable() => {
            table.notify(Event::Rejected {
                player_id,
                reason: Rejection::Action(err),
            });
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

/// Announces every hand the turn cursor moved past since `from`, including
/// hands the engine finished on its own (split 21s). Naturals were already
/// announced at the deal.
fn announce_finished<S: CardSource, T: Table>(game: &Game<S>, table: &mut T, from: TurnPosition) {
    let players = game.players();
    let to = if game.state() == GameState::PlayerTurn {
        game.current_turn()
    } else {
        TurnPosition {
            player_index: players.len(),
            hand_index: 0,
        }
    };

    for (player_index, player) in players
        .iter()
        .enumerate()
        .take(to.player_index + 1)
        .skip(from.player_index)
    {
        let first = if player_index == from.player_index {
            from.hand_index
        } else {
            0
        };
        let last = if player_index == to.player_index {
            to.hand_index
        } else {
            player.hands().len()
        };

        for (hand_index, hand) in player.hands().iter().enumerate().take(last).skip(first) {
            if hand.is_done() && !hand.is_natural() {
                table.notify(Event::HandFinished {
                    player_id: player.id(),
                    hand_index,
                    hand,
                });
                table.pace(Pace::HandFinished);
            }
        }
    }
}
