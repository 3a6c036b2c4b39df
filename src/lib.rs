//! A single-table blackjack round engine with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that runs one table: betting, the
//! initial deal, insurance, player decisions, dealer play and payout. Every
//! step is a method that validates the current [`GameState`], so a caller can
//! drive a round step by step, or hand the questions to a [`Table`] and let
//! [`play_round`] drive it.
//!
//! # Example
//!
//! ```
//! use bjtable::{Card, Game, GameOptions, GameState, Shoe};
//!
//! let cards: Vec<Card> = ["5D", "9S", "6C", "2D"]
//!     .iter()
//!     .map(|text| text.parse().unwrap())
//!     .collect();
//! let shoe = Shoe::stacked(2, &cards, 7);
//! let options = GameOptions::default().with_reshuffle_below(0);
//! let mut game = Game::with_shoe(options, shoe);
//!
//! let id = game.join(100).unwrap();
//! game.start_round().unwrap();
//! game.bet(id, 10).unwrap();
//! game.deal().unwrap();
//! assert_eq!(game.state(), GameState::PlayerTurn);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod participant;
pub mod result;
pub mod shoe;
pub mod table;

// Re-export main types
pub use card::{Card, DECK_SIZE, Suit};
pub use error::{
    ActionError, BetError, CardParseError, DealError, InsuranceError, RoundError, ShoeError,
    ShowdownError, TableError,
};
pub use game::{Action, Game, GameState, MAX_PLAYERS, TurnPosition};
pub use hand::{Hand, Outcome};
pub use options::{GameOptions, RoundingMode};
pub use participant::{Participant, Role};
pub use result::{HandOutcome, HandResult, PlayerResult, RoundResult};
pub use shoe::{CardSource, Shoe};
pub use table::{Event, Pace, Rejection, Table, play_round, seat_players};
