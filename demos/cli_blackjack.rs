//! CLI blackjack example.
//!
//! Seats any number of players at one console and plays rounds until
//! everyone is broke or declines another round. Entering `q` or closing
//! stdin leaves the table; open bets of an unfinished round are returned.

use core::time::Duration;
use std::io::{self, Write};
use std::thread;
use std::time::{SystemTime, UNIX_EPOCH};

use bjtable::{
    Action, Card, Event, Game, GameOptions, Hand, HandOutcome, Pace, Participant, Rejection,
    Role, RoundError, RoundResult, Suit, Table, play_round, seat_players,
};
use clap::Parser;

/// Play blackjack against the dealer at the console.
#[derive(Parser, Debug)]
#[command(name = "cli_blackjack")]
struct Args {
    /// Seed for the shoe; defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,

    /// Decks in the shoe.
    #[arg(long, default_value_t = 2)]
    decks: u8,

    /// Reshuffle at round start when fewer cards remain.
    #[arg(long, default_value_t = 25)]
    reshuffle_below: usize,

    /// Dealer stands on soft 17 instead of drawing.
    #[arg(long)]
    stand_soft_17: bool,

    /// Pause in milliseconds after dealer draws and finished hands.
    #[arg(long, default_value_t = 600)]
    pace_ms: u64,
}

struct Console {
    pause: Duration,
    /// Set once stdin ends or someone quits.
    closed: bool,
}

impl Console {
    /// Prompts for a whole number; marks the console closed on quit.
    fn number(&mut self, prompt: &str) -> usize {
        prompt_usize(prompt).unwrap_or_else(|| {
            self.closed = true;
            0
        })
    }
}

impl Table for Console {
    fn ask_player_count(&mut self) -> usize {
        while !self.closed {
            let count = self.number("How many players? ");
            if count > 0 {
                return count;
            }
            if !self.closed {
                println!("At least one player must sit down.");
            }
        }
        0
    }

    fn ask_starting_bankroll(&mut self, seat: usize) -> usize {
        self.number(&format!("Starting money for player {}: ", seat + 1))
    }

    fn ask_bet(&mut self, player: &Participant) -> usize {
        self.number(&format!(
            "Player {} has {}. Bet: ",
            player.id() + 1,
            player.bankroll()
        ))
    }

    fn ask_insurance(&mut self, player: &Participant, max: usize) -> usize {
        self.number(&format!(
            "Player {}, dealer shows an ace. Insurance (0-{max}, 0 declines): ",
            player.id() + 1
        ))
    }

    fn ask_action(&mut self, player: &Participant, hand: &Hand, legal: &[Action]) -> Action {
        println!(
            "Player {}: {} (value {}, bet {})",
            player.id() + 1,
            format_hand(hand),
            hand.value(),
            hand.bet()
        );
        println!("{}", format_actions(legal));

        loop {
            let Some(line) = prompt_line("Action: ") else {
                self.closed = true;
                return Action::Stand;
            };
            match line.parse() {
                Ok(action) => return action,
                Err(err) => println!("{err}."),
            }
        }
    }

    fn notify(&mut self, event: Event<'_>) {
        match event {
            Event::RoundStarted { round } => println!("\n=== Round {round} ==="),
            Event::Reshuffled => println!("Shoe reshuffled."),
            Event::Dealt { players, dealer } => print_table(players, dealer),
            Event::Blackjack { player_id, payout } => {
                println!("Player {} has blackjack! Paid {payout}.", player_id + 1);
            }
            Event::DealerBlackjack { dealer } => {
                println!("Dealer has blackjack: {}", format_hand(dealer));
            }
            Event::HandFinished { player_id, hand, .. } => {
                let verdict = if hand.is_bust() {
                    "busts"
                } else if hand.is_surrendered() {
                    "surrenders"
                } else {
                    "stands"
                };
                println!(
                    "Player {} {verdict} with {} ({}).",
                    player_id + 1,
                    format_hand(hand),
                    hand.value()
                );
            }
            Event::DealerDraw(card) => println!("Dealer draws {}.", format_card(&card)),
            Event::Settled(result) => print_result(result),
            Event::Rejected { reason, .. } => match reason {
                Rejection::Bet(err) => println!("Bet rejected: {err}."),
                Rejection::Insurance(err) => println!("Insurance rejected: {err}."),
                Rejection::Action(err) => println!("Action rejected: {err}."),
            },
        }
    }

    fn pace(&mut self, pace: Pace) {
        log::trace!("pause after {pace:?}");
        thread::sleep(self.pause);
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    });
    log::info!("shuffling {} deck(s) with seed {seed}", args.decks);

    let options = GameOptions::default()
        .with_decks(args.decks)
        .with_reshuffle_below(args.reshuffle_below)
        .with_dealer_hits_soft_17(!args.stand_soft_17);
    let mut game = Game::new(options, seed);
    let mut console = Console {
        pause: Duration::from_millis(args.pace_ms),
        closed: false,
    };

    println!("Blackjack CLI example (q quits)");
    seat_players(&mut game, &mut console);
    if console.closed {
        println!("Goodbye.");
        return;
    }

    loop {
        let broke: Vec<u8> = game
            .players()
            .iter()
            .filter(|player| player.bankroll() == 0)
            .map(Participant::id)
            .collect();
        for id in broke {
            println!("Player {} is out of money and leaves the table.", id + 1);
            if let Err(err) = game.leave(id) {
                log::error!("player {id} could not leave: {err}");
            }
        }

        if game.player_count() == 0 {
            println!("No players left. Game over.");
            break;
        }

        match play_round(&mut game, &mut console) {
            Ok(_) => {}
            Err(RoundError::Closed) => {
                let refunded = game.abandon_round();
                println!("Leaving mid-round; {refunded} returned to players. Goodbye.");
                break;
            }
            Err(err) => {
                log::error!("round {} aborted: {err}", game.round());
                let refunded = game.abandon_round();
                println!("Round aborted ({err}); {refunded} returned to players.");
            }
        }

        let again = prompt_line("Play another round? (y/n): ");
        if !matches!(again.as_deref(), Some("y" | "yes")) {
            println!("Goodbye.");
            break;
        }
    }
}

/// Reads one trimmed, lowercased line.
///
/// Returns `None` when stdin is closed or unreadable, or on `q`/`quit`.
fn prompt_line(prompt: &str) -> Option<String> {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) => {
            println!();
            return None;
        }
        Ok(_) => {}
        Err(err) => {
            log::error!("cannot read stdin: {err}");
            return None;
        }
    }

    let line = input.trim().to_lowercase();
    if matches!(line.as_str(), "q" | "quit") {
        return None;
    }
    Some(line)
}

fn prompt_usize(prompt: &str) -> Option<usize> {
    loop {
        match prompt_line(prompt)?.parse::<usize>() {
            Ok(value) => return Some(value),
            Err(_) => println!("Please enter a whole number."),
        }
    }
}

fn print_table(players: &[Participant], dealer: &Participant) {
    let up_card = dealer
        .hands()
        .first()
        .and_then(|hand| hand.cards().first())
        .map_or_else(|| "(no cards)".to_string(), format_card);
    println!("\n{}: {up_card} ??", seat_name(dealer));

    for player in players {
        for (index, hand) in player.hands().iter().enumerate() {
            println!(
                "{} hand {index}: {} | value {} | bet {}",
                seat_name(player),
                format_hand(hand),
                hand.value(),
                hand.stake()
            );
        }
    }
    println!();
}

fn seat_name(participant: &Participant) -> String {
    match participant.role() {
        Role::Dealer => "Dealer".to_string(),
        Role::Player => format!("Player {}", participant.id() + 1),
    }
}

fn print_result(result: &RoundResult) {
    let dealer = if result.dealer_bust {
        "busts".to_string()
    } else {
        result.dealer_value.to_string()
    };
    println!("\nDealer {dealer}.");

    for player in &result.players {
        for hand in &player.hands {
            let verdict = match hand.outcome {
                HandOutcome::Win => colorize("wins", "32"),
                HandOutcome::Blackjack => colorize("blackjack", "32"),
                HandOutcome::Push => colorize("push", "33"),
                HandOutcome::Lose => colorize("loses", "31"),
                HandOutcome::Bust => colorize("bust", "31"),
                HandOutcome::Surrendered => colorize("surrendered", "90"),
            };
            println!(
                "Player {} hand {}: {} {verdict} (paid {} on {})",
                player.player_id + 1,
                hand.hand_index,
                hand.player_value,
                hand.payout,
                hand.stake
            );
        }
        if player.insurance_bet > 0 {
            println!(
                "Player {} insurance: paid {} on {}",
                player.player_id + 1,
                player.insurance_payout,
                player.insurance_bet
            );
        }
        println!(
            "Player {} net {} | bankroll {}",
            player.player_id + 1,
            player.net,
            player.bankroll
        );
    }
}

fn format_actions(legal: &[Action]) -> String {
    let parts: Vec<String> = Action::ALL
        .into_iter()
        .map(|action| {
            let text = format!("[{}]{}", action.key(), action.label());
            if legal.contains(&action) {
                colorize(&text, "32")
            } else {
                colorize(&text, "90")
            }
        })
        .collect();
    format!("Actions: {}", parts.join(" "))
}

fn colorize(text: &str, code: &str) -> String {
    format!("\u{1b}[{code}m{text}\u{1b}[0m")
}

fn format_hand(hand: &Hand) -> String {
    if hand.is_empty() {
        return "(empty)".to_string();
    }
    hand.cards()
        .iter()
        .map(format_card)
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: &Card) -> String {
    let color_code = match card.suit {
        Suit::Hearts | Suit::Diamonds => "31",
        Suit::Clubs => "32",
        Suit::Spades => "34",
        Suit::Joker => "35",
    };
    colorize(&card.to_string(), color_code)
}
