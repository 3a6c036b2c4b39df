//! Game integration tests.

use bjtable::{
    Action, ActionError, BetError, Card, CardSource, DECK_SIZE, DealError, Game, GameOptions,
    GameState, HandOutcome, InsuranceError, MAX_PLAYERS, Role, RoundingMode, Shoe, ShowdownError,
    TableError,
};

fn cards(text: &str) -> Vec<Card> {
    text.split_whitespace()
        .map(|card| card.parse().unwrap())
        .collect()
}

/// A game whose shoe deals `draws` in order and never reshuffles on its own.
fn stacked_game(options: GameOptions, draws: &str) -> Game {
    let options = options.with_reshuffle_below(0);
    let shoe = Shoe::stacked(options.decks, &cards(draws), 1);
    Game::with_shoe(options, shoe)
}

/// Seats one player with `bankroll`, bets `bet` and deals.
fn dealt_game(options: GameOptions, draws: &str, bankroll: usize, bet: usize) -> (Game, u8) {
    let mut game = stacked_game(options, draws);
    let player = game.join(bankroll).unwrap();
    game.start_round().unwrap();
    game.bet(player, bet).unwrap();
    game.deal().unwrap();
    (game, player)
}

#[test]
fn options_builder_sets_fields() {
    let options = GameOptions::default()
        .with_decks(4)
        .with_reshuffle_below(52)
        .with_dealer_hits_soft_17(false)
        .with_blackjack_return(2)
        .with_insurance_return(2)
        .with_surrender(false)
        .with_insurance(false)
        .with_double_after_split(false)
        .with_rounding_surrender(RoundingMode::Down);

    assert_eq!(options.decks, 4);
    assert_eq!(options.reshuffle_below, 52);
    assert!(!options.dealer_hits_soft_17);
    assert_eq!(options.blackjack_return, 2);
    assert_eq!(options.insurance_return, 2);
    assert!(!options.surrender);
    assert!(!options.insurance);
    assert!(!options.double_after_split);
    assert_eq!(options.rounding_surrender, RoundingMode::Down);
}

#[test]
fn reshuffle_when_below_low_water_mark() {
    let options = GameOptions::default().with_decks(1);
    let shoe = Shoe::stacked(1, &cards("2H 3H"), 1);
    let mut game = Game::with_shoe(options, shoe);

    assert!(game.needs_reshuffle());
    assert!(game.start_round().unwrap());
    assert_eq!(game.cards_remaining(), DECK_SIZE);
    assert!(!game.needs_reshuffle());
}

#[test]
fn fresh_game_does_not_reshuffle() {
    let mut game = Game::new(GameOptions::default(), 3);
    assert_eq!(game.cards_remaining(), 2 * DECK_SIZE);
    assert!(!game.start_round().unwrap());
    assert_eq!(game.round(), 1);
}

#[test]
fn reshuffle_rejected_mid_round() {
    let (mut game, _) = dealt_game(GameOptions::default(), "5D 9S 6C 2D", 100, 10);
    assert_eq!(game.reshuffle().unwrap_err(), TableError::RoundInProgress);
    assert_eq!(game.start_round().unwrap_err(), TableError::RoundInProgress);
}

#[test]
fn bet_errors() {
    let mut game = stacked_game(GameOptions::default(), "5D 9S 6C 2D");
    let player = game.join(10).unwrap();

    assert_eq!(game.bet(player, 5).unwrap_err(), BetError::InvalidState);

    game.start_round().unwrap();
    assert_eq!(
        game.bet(player, 20).unwrap_err(),
        BetError::InsufficientFunds
    );
    assert_eq!(game.get_money(player), Some(10));
    assert_eq!(
        game.bet(player + 1, 1).unwrap_err(),
        BetError::PlayerNotFound
    );

    game.bet(player, 0).unwrap();
    assert!(game.has_bet(player));
    assert_eq!(game.bet(player, 1).unwrap_err(), BetError::AlreadyBet);
}

#[test]
fn deal_errors() {
    let mut game = stacked_game(GameOptions::default(), "5D 9S 6C");
    let player = game.join(100).unwrap();

    assert_eq!(game.deal().unwrap_err(), DealError::InvalidState);

    game.start_round().unwrap();
    assert_eq!(game.deal().unwrap_err(), DealError::NoBets);

    game.bet(player, 10).unwrap();
    assert_eq!(game.deal().unwrap_err(), DealError::NotEnoughCards);
    assert_eq!(game.state(), GameState::Betting);
    assert_eq!(game.cards_remaining(), 3);
}

#[test]
fn leave_only_between_rounds() {
    let mut game = stacked_game(GameOptions::default(), "5D 9S 6C 2D");
    let first = game.join(100).unwrap();
    let second = game.join(50).unwrap();
    assert_ne!(first, second);

    game.start_round().unwrap();
    assert_eq!(game.leave(second).unwrap_err(), TableError::RoundInProgress);

    game.clear_round();
    game.leave(second).unwrap();
    assert_eq!(game.player_count(), 1);
    assert!(game.player(second).is_none());
}

#[test]
fn join_fills_the_table_then_reuses_freed_ids() {
    let mut game = Game::new(GameOptions::default(), 5);
    for expected in 0..u8::MAX {
        assert_eq!(game.join(100), Ok(expected));
    }
    assert_eq!(game.join(100), Err(TableError::TableFull));
    assert_eq!(game.player_count(), MAX_PLAYERS);
    assert!(game.player(game.dealer().id()).is_none());

    game.leave(7).unwrap();
    assert_eq!(game.join(40), Ok(7));
    assert_eq!(game.get_money(7), Some(40));
}

#[test]
fn deal_goes_round_the_table_twice() {
    let mut game = stacked_game(GameOptions::default(), "2D 3D 4D 5D 6D 7D 8D 9D");
    let ids: Vec<u8> = (0..3).map(|_| game.join(100).unwrap()).collect();
    game.start_round().unwrap();
    for &id in &ids {
        game.bet(id, 10).unwrap();
    }
    game.deal().unwrap();

    for (id, expected) in ids.iter().zip(["2D 6D", "3D 7D", "4D 8D"]) {
        let player = game.player(*id).unwrap();
        assert_eq!(player.role(), Role::Player);
        assert_eq!(player.hands()[0].cards(), cards(expected));
    }
    assert_eq!(game.dealer().role(), Role::Dealer);
    assert_eq!(game.dealer().hands()[0].cards(), cards("5D 9D"));
    assert_eq!(game.dealer_up_card(), "5D".parse().ok());
    assert_eq!(game.current_player(), Some(ids[0]));
}

#[test]
fn shoe_can_be_restacked_between_rounds() {
    let (mut game, player) = dealt_game(GameOptions::default(), "TD 9S 6C 7D", 100, 10);
    game.surrender(player, 0).unwrap();
    game.dealer_play().unwrap();
    game.showdown().unwrap();
    game.clear_round();
    assert_eq!(game.shoe().remaining(), 0);

    let decks = game.shoe().decks();
    *game.shoe_mut() = Shoe::stacked(decks, &cards("AH 9S KS 7D"), 1);
    assert_eq!(game.cards_remaining(), 4);

    game.start_round().unwrap();
    game.bet(player, 10).unwrap();
    game.deal().unwrap();
    assert!(game.player(player).unwrap().hands()[0].is_natural());
    assert_eq!(game.shoe().remaining(), 0);
}

#[test]
fn basic_round_flow() {
    let (mut game, player) = dealt_game(GameOptions::default(), "5D 9S 6C 2D TH 7C", 100, 10);

    assert_eq!(game.state(), GameState::PlayerTurn);
    assert_eq!(game.get_money(player), Some(90));
    assert_eq!(game.dealer_up_card(), Some("9S".parse::<Card>().unwrap()));
    assert!(!game.is_hole_revealed());
    assert_eq!(game.current_player(), Some(player));
    assert!(game.is_player_turn(player, 0));

    let card = game.hit(player, 0).unwrap();
    assert_eq!(card.to_string(), "TH");
    // 21 after a hit still waits for the player.
    assert_eq!(game.state(), GameState::PlayerTurn);
    assert_eq!(game.player(player).unwrap().hands()[0].value(), 21);

    game.stand(player, 0).unwrap();
    assert_eq!(game.state(), GameState::DealerTurn);
    assert_eq!(game.current_player(), None);

    let drawn = game.dealer_play().unwrap();
    assert_eq!(drawn, cards("7C"));
    assert!(game.is_hole_revealed());
    assert_eq!(game.state(), GameState::RoundOver);

    let result = game.showdown().unwrap();
    assert_eq!(result.round, 1);
    assert_eq!(result.dealer_value, 18);
    assert!(!result.dealer_bust);
    let hand = result.players[0].hands[0];
    assert_eq!(hand.outcome, HandOutcome::Win);
    assert_eq!(hand.payout, 20);
    assert_eq!(hand.player_value, 21);
    assert_eq!(result.players[0].net, 10);
    assert_eq!(result.players[0].bankroll, 110);
    assert_eq!(result.house_net, -10);

    game.clear_round();
    assert_eq!(game.state(), GameState::WaitingForPlayers);
    assert_eq!(game.get_money(player), Some(110));
}

#[test]
fn hit_with_empty_shoe_returns_error() {
    let (mut game, player) = dealt_game(GameOptions::default(), "5D 9S 6C 2D", 100, 10);

    let err = game.hit(player, 0).unwrap_err();
    assert_eq!(err, ActionError::ShoeExhausted);
    assert!(!err.is_recoverable());
    assert_eq!(game.state(), GameState::PlayerTurn);
    assert_eq!(game.player(player).unwrap().hands()[0].len(), 2);
}

#[test]
fn bust_ends_the_hand() {
    let (mut game, player) = dealt_game(GameOptions::default(), "TD 9S 6C 7D KH", 100, 10);

    game.hit(player, 0).unwrap();
    assert_eq!(game.state(), GameState::DealerTurn);

    // Nothing left to play against, so the dealer does not draw.
    assert!(game.dealer_play().unwrap().is_empty());
    let result = game.showdown().unwrap();
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Bust);
    assert_eq!(result.players[0].bankroll, 90);
    assert_eq!(result.house_net, 10);
}

#[test]
fn turn_order_is_enforced() {
    let mut game = stacked_game(GameOptions::default(), "5D 6D 9S 5C 6C 2D");
    let first = game.join(100).unwrap();
    let second = game.join(100).unwrap();
    game.start_round().unwrap();
    game.bet(first, 10).unwrap();
    game.bet(second, 10).unwrap();
    game.deal().unwrap();

    assert_eq!(game.current_player(), Some(first));
    assert_eq!(game.hit(second, 0).unwrap_err(), ActionError::NotYourTurn);
    assert_eq!(game.hit(first, 1).unwrap_err(), ActionError::HandNotFound);
    assert_eq!(game.hit(9, 0).unwrap_err(), ActionError::PlayerNotFound);

    game.stand(first, 0).unwrap();
    assert_eq!(game.current_player(), Some(second));
    assert_eq!(game.current_turn().player_index, 1);
    assert_eq!(game.stand(first, 0).unwrap_err(), ActionError::NotYourTurn);
}

#[test]
fn natural_is_paid_at_deal() {
    let (mut game, player) = dealt_game(GameOptions::default(), "AH 9S KS 7D", 100, 10);

    assert_eq!(game.get_money(player), Some(120));
    let hand = &game.player(player).unwrap().hands()[0];
    assert!(hand.is_natural());
    assert_eq!(hand.bet(), 0);
    assert_eq!(game.state(), GameState::DealerTurn);

    assert!(game.dealer_play().unwrap().is_empty());
    let result = game.showdown().unwrap();
    let hand = result.players[0].hands[0];
    assert_eq!(hand.outcome, HandOutcome::Blackjack);
    assert_eq!(hand.stake, 10);
    assert_eq!(hand.payout, 30);
    assert_eq!(result.players[0].net, 20);
    assert_eq!(result.players[0].bankroll, 120);
}

#[test]
fn natural_stands_against_dealer_blackjack() {
    let (mut game, player) = dealt_game(GameOptions::default(), "AH KS KD AC", 100, 10);

    assert_eq!(game.state(), GameState::RoundOver);
    let result = game.showdown().unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Blackjack);
    assert_eq!(game.get_money(player), Some(120));
}

#[test]
fn dealer_blackjack_with_ten_up_ends_round() {
    let (mut game, player) = dealt_game(GameOptions::default(), "9D KS 9C AH", 100, 10);

    assert_eq!(game.state(), GameState::RoundOver);
    assert!(game.is_hole_revealed());
    assert_eq!(game.hit(player, 0).unwrap_err(), ActionError::InvalidState);

    let result = game.showdown().unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.dealer_value, 21);
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Lose);
    assert_eq!(result.players[0].bankroll, 90);
}

#[test]
fn insurance_flow_with_dealer_blackjack() {
    let (mut game, player) = dealt_game(GameOptions::default(), "TD AS 9C KH", 100, 10);

    assert_eq!(game.state(), GameState::Insurance);
    assert!(game.is_insurance_offered());
    assert!(game.is_insurance_eligible(player));
    assert_eq!(game.insurance_limit(player), Ok(5));
    assert_eq!(
        game.finish_insurance().unwrap_err(),
        InsuranceError::Undecided
    );
    assert_eq!(
        game.insure(player, 6).unwrap_err(),
        InsuranceError::ExceedsLimit { limit: 5 }
    );

    game.insure(player, 5).unwrap();
    assert_eq!(game.get_money(player), Some(85));
    assert_eq!(game.get_insurance_bet(player), Some(5));
    assert_eq!(
        game.insure(player, 1).unwrap_err(),
        InsuranceError::AlreadyDecided
    );

    assert!(game.finish_insurance().unwrap());
    assert_eq!(game.state(), GameState::RoundOver);
    assert_eq!(game.get_money(player), Some(100));

    let result = game.showdown().unwrap();
    let player_result = &result.players[0];
    assert_eq!(player_result.hands[0].outcome, HandOutcome::Lose);
    assert_eq!(player_result.insurance_bet, 5);
    assert_eq!(player_result.insurance_payout, 15);
    assert_eq!(player_result.net, 0);
    assert_eq!(result.house_net, 0);
}

#[test]
fn insurance_declined_and_dealer_plays_on() {
    let (mut game, player) = dealt_game(GameOptions::default(), "TD AS 9C 6H 5C TC", 100, 10);

    assert_eq!(game.state(), GameState::Insurance);
    game.decline_insurance(player).unwrap();
    assert!(game.all_insurance_decided());
    assert!(!game.finish_insurance().unwrap());
    assert_eq!(game.state(), GameState::PlayerTurn);

    game.stand(player, 0).unwrap();
    // Soft 17 draws by default: A6 + 5 is hard 12, then ten busts.
    assert_eq!(game.dealer_play().unwrap(), cards("5C TC"));

    let result = game.showdown().unwrap();
    assert!(result.dealer_bust);
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Win);
    assert_eq!(game.get_money(player), Some(110));
}

#[test]
fn insurance_rejects_wrong_state() {
    let mut game = Game::new(GameOptions::default(), 1);
    let player = game.join(100).unwrap();
    assert_eq!(
        game.insure(player, 1).unwrap_err(),
        InsuranceError::InvalidState
    );
    assert_eq!(
        game.finish_insurance().unwrap_err(),
        InsuranceError::InvalidState
    );
}

#[test]
fn dealer_stands_on_soft_17_when_configured() {
    let options = GameOptions::default()
        .with_insurance(false)
        .with_dealer_hits_soft_17(false);
    let (mut game, player) = dealt_game(options, "TD AS 8C 6H", 100, 10);

    assert_eq!(game.state(), GameState::PlayerTurn);
    game.stand(player, 0).unwrap();
    assert!(game.dealer_play().unwrap().is_empty());

    let result = game.showdown().unwrap();
    assert_eq!(result.dealer_value, 17);
    assert_eq!(result.players[0].hands[0].outcome, HandOutcome::Win);
}

#[test]
fn double_down_allowed_and_updates_bet() {
    let (mut game, player) = dealt_game(GameOptions::default(), "5D 9S 6C 7D TH 2C", 100, 10);

    let card = game.double_down(player, 0).unwrap();
    assert_eq!(card.to_string(), "TH");
    assert_eq!(game.get_money(player), Some(80));
    let hand = &game.player(player).unwrap().hands()[0];
    assert!(hand.is_doubled());
    assert_eq!(hand.bet(), 20);
    assert_eq!(game.state(), GameState::DealerTurn);

    assert_eq!(game.dealer_play().unwrap(), cards("2C"));
    let result = game.showdown().unwrap();
    let hand = result.players[0].hands[0];
    assert!(hand.doubled);
    assert_eq!(hand.stake, 20);
    assert_eq!(hand.payout, 40);
    assert_eq!(result.players[0].bankroll, 120);
}

#[test]
fn double_down_rejected_after_first_decision() {
    let (mut game, player) = dealt_game(GameOptions::default(), "5D 9S 6C 7D 2H", 100, 10);

    game.hit(player, 0).unwrap();
    assert_eq!(
        game.double_down(player, 0).unwrap_err(),
        ActionError::CannotDouble
    );
}

#[test]
fn double_down_needs_funds() {
    let (mut game, player) = dealt_game(GameOptions::default(), "5D 9S 6C 7D 2H", 10, 10);

    assert_eq!(
        game.double_down(player, 0).unwrap_err(),
        ActionError::InsufficientFunds
    );
    assert_eq!(game.cards_remaining(), 1);
}

#[test]
fn split_creates_two_hands() {
    let (mut game, player) =
        dealt_game(GameOptions::default(), "8H 9S 8D 7D 3C TC 6H", 100, 10);

    game.split(player, 0).unwrap();
    assert_eq!(game.get_money(player), Some(80));
    let hands = game.player(player).unwrap().hands();
    assert_eq!(hands.len(), 2);
    assert_eq!(hands[0].cards(), cards("8H 3C"));
    assert_eq!(hands[1].cards(), cards("8D"));
    assert!(hands[1].is_from_split());
    assert_eq!(game.current_turn().hand_index, 0);

    game.stand(player, 0).unwrap();
    assert_eq!(game.current_turn().hand_index, 1);
    assert_eq!(
        game.player(player).unwrap().hands()[1].cards(),
        cards("8D TC")
    );

    game.stand(player, 1).unwrap();
    assert_eq!(game.state(), GameState::DealerTurn);
    assert_eq!(game.dealer_play().unwrap(), cards("6H"));

    let result = game.showdown().unwrap();
    assert!(result.dealer_bust);
    assert_eq!(result.players[0].hands.len(), 2);
    assert!(
        result.players[0]
            .hands
            .iter()
            .all(|hand| hand.outcome == HandOutcome::Win)
    );
    assert_eq!(result.players[0].bankroll, 120);
}

#[test]
fn split_rejects_non_pair() {
    let (mut game, player) = dealt_game(GameOptions::default(), "8H 9S 9D 7D", 100, 10);
    assert_eq!(game.split(player, 0).unwrap_err(), ActionError::CannotSplit);
    assert_eq!(game.get_money(player), Some(90));
}

#[test]
fn split_21_is_not_a_natural() {
    let (mut game, player) =
        dealt_game(GameOptions::default(), "AH 9S AD 7D KC KD 2C", 100, 10);

    game.split(player, 0).unwrap();
    // Both split hands reach 21 on their second card and stand.
    assert_eq!(game.state(), GameState::DealerTurn);
    assert_eq!(game.get_money(player), Some(80));

    assert_eq!(game.dealer_play().unwrap(), cards("2C"));
    let result = game.showdown().unwrap();
    for hand in &result.players[0].hands {
        assert_eq!(hand.outcome, HandOutcome::Win);
        assert_eq!(hand.payout, 20);
    }
    assert_eq!(result.players[0].bankroll, 120);
}

#[test]
fn surrender_refunds_half_bet() {
    let (mut game, player) = dealt_game(GameOptions::default(), "TD 9S 6C 7D", 100, 10);

    assert_eq!(game.surrender(player, 0), Ok(5));
    assert_eq!(game.get_money(player), Some(95));
    assert_eq!(game.state(), GameState::DealerTurn);
    assert!(game.dealer_play().unwrap().is_empty());

    let result = game.showdown().unwrap();
    let hand = result.players[0].hands[0];
    assert_eq!(hand.outcome, HandOutcome::Surrendered);
    assert_eq!(hand.stake, 10);
    assert_eq!(hand.payout, 5);
    assert_eq!(result.players[0].net, -5);
    assert_eq!(result.house_net, 5);
}

#[test]
fn surrender_rounds_odd_refunds_up_by_default() {
    let (mut game, player) = dealt_game(GameOptions::default(), "TD 9S 6C 7D", 100, 5);
    assert_eq!(game.options().rounding_surrender, RoundingMode::Up);
    assert_eq!(game.surrender(player, 0), Ok(3));
    assert_eq!(game.get_money(player), Some(98));
}

#[test]
fn surrender_rounding_and_disabled() {
    let options = GameOptions::default().with_rounding_surrender(RoundingMode::Down);
    let (mut game, player) = dealt_game(options, "TD 9S 6C 7D", 100, 5);
    assert_eq!(game.surrender(player, 0), Ok(2));
    assert_eq!(game.get_money(player), Some(97));

    let options = GameOptions::default().with_surrender(false);
    let (mut game, player) = dealt_game(options, "TD 9S 6C 7D", 100, 10);
    assert_eq!(
        game.surrender(player, 0).unwrap_err(),
        ActionError::CannotSurrender
    );
}

#[test]
fn legal_actions_follow_hand_state() {
    let (mut game, player) = dealt_game(GameOptions::default(), "8H 9S 8D 7D 2C", 100, 10);

    assert_eq!(game.legal_actions(), Action::ALL.to_vec());

    game.act(player, 0, "h".parse().unwrap()).unwrap();
    assert_eq!(game.legal_actions(), vec![Action::Hit, Action::Stand]);
}

#[test]
fn action_tokens_parse() {
    assert_eq!("h".parse::<Action>(), Ok(Action::Hit));
    assert_eq!(" Stand ".parse::<Action>(), Ok(Action::Stand));
    assert_eq!("double".parse::<Action>(), Ok(Action::DoubleDown));
    assert_eq!("P".parse::<Action>(), Ok(Action::Split));
    assert_eq!("surrender".parse::<Action>(), Ok(Action::Surrender));
    assert_eq!(
        "fold".parse::<Action>().unwrap_err(),
        ActionError::UnknownAction
    );
}

#[test]
fn showdown_rejects_wrong_state() {
    let mut game = Game::new(GameOptions::default(), 1);
    assert_eq!(game.showdown().unwrap_err(), ShowdownError::InvalidState);
    assert_eq!(game.dealer_play().unwrap_err(), ShowdownError::InvalidState);
}

#[test]
fn showdown_pays_once() {
    let (mut game, player) = dealt_game(GameOptions::default(), "TD 9S 9C 7D KC", 100, 10);

    game.stand(player, 0).unwrap();
    game.dealer_play().unwrap();
    game.showdown().unwrap();
    assert_eq!(game.showdown().unwrap_err(), ShowdownError::AlreadySettled);
    assert_eq!(game.get_money(player), Some(110));
}

#[test]
fn abandon_round_refunds_open_bets() {
    let (mut game, player) = dealt_game(GameOptions::default(), "5D 9S 6C 2D", 100, 10);

    assert_eq!(game.abandon_round(), 10);
    assert_eq!(game.get_money(player), Some(100));
    assert_eq!(game.state(), GameState::WaitingForPlayers);
    assert!(game.player(player).unwrap().hands().is_empty());
}
