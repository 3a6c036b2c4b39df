//! Error types for game operations.

use thiserror::Error;

/// Errors that can occur when parsing a card from its text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardParseError {
    /// The text is not exactly two characters.
    #[error("a card is written as two characters, e.g. `AH`")]
    Length,
    /// Unknown rank character.
    #[error("unknown rank `{0}`")]
    Rank(char),
    /// Unknown suit character.
    #[error("unknown suit `{0}`")]
    Suit(char),
}

/// Errors raised by a card source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShoeError {
    /// No cards left in the shoe.
    #[error("the shoe is exhausted")]
    Exhausted,
}

/// Errors that can occur during betting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BetError {
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Insufficient funds.
    #[error("insufficient funds")]
    InsufficientFunds,
    /// Invalid game state for betting.
    #[error("invalid game state for betting")]
    InvalidState,
    /// Player already placed a bet this round.
    #[error("player already placed a bet this round")]
    AlreadyBet,
}

/// Errors that can occur during dealing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid game state for dealing.
    #[error("invalid game state for dealing")]
    InvalidState,
    /// No players have placed bets.
    #[error("no players have placed bets")]
    NoBets,
    /// Not enough cards in the shoe.
    #[error("not enough cards in the shoe")]
    NotEnoughCards,
}

/// Errors that can occur during player actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game state for this action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// Not this player's turn.
    #[error("not this player's turn")]
    NotYourTurn,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Hand not found.
    #[error("hand not found")]
    HandNotFound,
    /// Hand is not active.
    #[error("hand is not active")]
    HandNotActive,
    /// Cannot double down on this hand.
    #[error("cannot double down on this hand")]
    CannotDouble,
    /// Cannot split this hand.
    #[error("cannot split this hand")]
    CannotSplit,
    /// Cannot surrender at this point.
    #[error("cannot surrender at this point")]
    CannotSurrender,
    /// Insufficient funds for this action.
    #[error("insufficient funds for this action")]
    InsufficientFunds,
    /// The action token was not recognised.
    #[error("unknown action")]
    UnknownAction,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    ShoeExhausted,
}

impl ActionError {
    /// Returns whether the caller can recover by asking for another action.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::InvalidState | Self::ShoeExhausted)
    }
}

/// Errors that can occur during insurance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsuranceError {
    /// Invalid game state for insurance.
    #[error("invalid game state for insurance")]
    InvalidState,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Player has no unresolved hand to insure.
    #[error("player has no hand to insure")]
    NotEligible,
    /// Insurance amount exceeds half the bet or the bankroll.
    #[error("insurance is limited to {limit}")]
    ExceedsLimit {
        /// Largest insurance wager the player may place.
        limit: usize,
    },
    /// Player already made insurance decision.
    #[error("player already made insurance decision")]
    AlreadyDecided,
    /// Some eligible players have not decided yet.
    #[error("some players have not made an insurance decision")]
    Undecided,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    ShoeExhausted,
}

/// Errors that can occur during the dealer turn and showdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShowdownError {
    /// Invalid game state for showdown.
    #[error("invalid game state for showdown")]
    InvalidState,
    /// The round has already been settled.
    #[error("the round has already been settled")]
    AlreadySettled,
    /// No cards left in the shoe.
    #[error("no cards left in the shoe")]
    NoCards,
}

/// Errors that can occur during reshuffling or seating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TableError {
    /// Invalid game state, a round is in progress.
    #[error("a round is in progress")]
    RoundInProgress,
    /// Every seat is taken.
    #[error("the table is full")]
    TableFull,
}

/// Errors that abort a round driven by [`play_round`](crate::table::play_round).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// The round could not be started.
    #[error(transparent)]
    Table(#[from] TableError),
    /// The initial deal failed.
    #[error(transparent)]
    Deal(#[from] DealError),
    /// A player action failed unrecoverably.
    #[error(transparent)]
    Action(#[from] ActionError),
    /// The insurance phase failed.
    #[error(transparent)]
    Insurance(#[from] InsuranceError),
    /// Dealer play or settlement failed.
    #[error(transparent)]
    Showdown(#[from] ShowdownError),
    /// A betting step failed unrecoverably.
    #[error(transparent)]
    Bet(#[from] BetError),
    /// The table closed before the round finished.
    #[error("the table closed mid-round")]
    Closed,
}

impl From<ShoeError> for DealError {
    fn from(_: ShoeError) -> Self {
        Self::NotEnoughCards
    }
}

impl From<ShoeError> for ActionError {
    fn from(_: ShoeError) -> Self {
        Self::ShoeExhausted
    }
}

impl From<ShoeError> for InsuranceError {
    fn from(_: ShoeError) -> Self {
        Self::ShoeExhausted
    }
}

impl From<ShoeError> for ShowdownError {
    fn from(_: ShoeError) -> Self {
        Self::NoCards
    }
}
