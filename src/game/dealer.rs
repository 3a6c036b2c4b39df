use alloc::vec::Vec;

use crate::card::Card;
use crate::error::ShowdownError;
use crate::hand::{Hand, Outcome};
use crate::result::{HandOutcome, HandResult, PlayerResult, RoundResult};
use crate::shoe::CardSource;

use super::{Game, GameState};

impl<S: CardSource> Game<S> {
    /// Returns whether the dealer must draw to `hand` under the table rules.
    fn dealer_must_draw(&self, hand: &Hand) -> bool {
        let value = hand.value();
        value < 17 || (value == 17 && hand.is_soft() && self.options.dealer_hits_soft_17)
    }

    /// Dealer plays their hand according to the rules.
    ///
    /// The dealer reveals the hole card and draws while under 17, and on a
    /// soft 17 when [`dealer_hits_soft_17`](crate::GameOptions::dealer_hits_soft_17)
    /// is set. When every player hand is already settled the dealer does not
    /// draw at all.
    ///
    /// Returns the cards drawn by the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in dealer turn state or the shoe is
    /// empty while the dealer must draw.
    pub fn dealer_play(&mut self) -> Result<Vec<Card>, ShowdownError> {
        if self.state != GameState::DealerTurn {
            return Err(ShowdownError::InvalidState);
        }

        self.hole_revealed = true;
        let mut drawn_cards = Vec::new();

        if !self.any_unresolved_hands() {
            log::debug!("no hands left to play against, dealer stands");
            self.state = GameState::RoundOver;
            return Ok(drawn_cards);
        }

        while let Some(hand) = self.dealer.hands().first() {
            if !self.dealer_must_draw(hand) {
                break;
            }

            let card = self.draw()?;
            if let Some(hand) = self.dealer.hands_mut().first_mut() {
                hand.add_card(card);
            }
            log::debug!("dealer draws {card}");
            drawn_cards.push(card);
        }

        if let Some(hand) = self.dealer.hands_mut().first_mut() {
            if !hand.is_done() {
                hand.stand();
            }
        }

        self.state = GameState::RoundOver;
        Ok(drawn_cards)
    }

    /// Performs the showdown and pays out.
    ///
    /// Every hand still undecided is compared with the dealer: a dealer bust
    /// or a higher value wins and is credited twice its bet, an equal value
    /// pushes and gets its bet back, anything else loses. Hands already
    /// settled by a bust, natural, surrender or dealer blackjack are reported
    /// without being paid again.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in round-over state or the round
    /// was already settled.
    pub fn showdown(&mut self) -> Result<RoundResult, ShowdownError> {
        if self.state != GameState::RoundOver {
            return Err(ShowdownError::InvalidState);
        }
        if self.settled {
            return Err(ShowdownError::AlreadySettled);
        }

        let (dealer_value, dealer_bust, dealer_blackjack) = self
            .dealer
            .hands()
            .first()
            .map_or((0, false, false), |hand| {
                (hand.value(), hand.is_bust(), hand.is_blackjack())
            });

        let mut player_results = Vec::new();
        let mut house_net: isize = 0;

        for player in &mut self.players {
            if !player.is_seated_in_round() {
                continue;
            }

            let mut hand_results = Vec::new();
            let mut total_payout: usize = 0;
            let mut total_stake: usize = 0;
            let mut credited: usize = 0;

            for (hand_index, hand) in player.hands_mut().iter_mut().enumerate() {
                if hand.outcome() == Outcome::Undecided {
                    let player_value = hand.value();
                    let (outcome, payout) = if dealer_bust || player_value > dealer_value {
                        (Outcome::Won, hand.bet() * 2)
                    } else if player_value == dealer_value {
                        (Outcome::Push, hand.bet())
                    } else {
                        (Outcome::Lost, 0)
                    };
                    hand.resolve(outcome);
                    hand.record_payment(payout);
                    credited += payout;
                }

                total_stake += hand.stake();
                total_payout += hand.paid();

                hand_results.push(HandResult {
                    hand_index,
                    outcome: HandOutcome::of(hand),
                    stake: hand.stake(),
                    payout: hand.paid(),
                    doubled: hand.is_doubled(),
                    player_value: hand.value(),
                    dealer_value,
                });
            }

            player.credit(credited);

            let insurance_bet = player.insurance().unwrap_or(0);
            let insurance_payout = player.insurance_payout();
            total_stake += insurance_bet;
            total_payout += insurance_payout;

            #[expect(clippy::cast_possible_wrap, reason = "payout values fit in isize")]
            let net = total_payout as isize - total_stake as isize;
            house_net -= net;

            log::debug!(
                "player {} settles {} hand(s), net {net}",
                player.id(),
                hand_results.len()
            );

            player_results.push(PlayerResult {
                player_id: player.id(),
                hands: hand_results,
                total_payout,
                net,
                insurance_bet,
                insurance_payout,
                bankroll: player.bankroll(),
            });
        }

        self.settled = true;

        Ok(RoundResult {
            round: self.round,
            players: player_results,
            dealer_value,
            dealer_bust,
            dealer_blackjack,
            house_net,
        })
    }
}
