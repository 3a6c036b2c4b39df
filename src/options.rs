//! Game configuration options.

/// Rounding mode for halved stakes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
}

impl RoundingMode {
    /// Returns half of `amount`, rounded by this mode.
    ///
    /// ```
    /// use bjtable::RoundingMode;
    ///
    /// assert_eq!(RoundingMode::Down.half(5), 2);
    /// assert_eq!(RoundingMode::Up.half(5), 3);
    /// assert_eq!(RoundingMode::Up.half(10), 5);
    /// ```
    #[must_use]
    pub const fn half(self, amount: usize) -> usize {
        match self {
            Self::Down => amount / 2,
            Self::Up => amount.div_ceil(2),
        }
    }
}

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjtable::GameOptions;
///
/// let options = GameOptions::default()
///     .with_decks(6)
///     .with_reshuffle_below(52)
///     .with_dealer_hits_soft_17(false);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameOptions {
    /// Number of decks in a full shoe.
    pub decks: u8,
    /// Low-water mark: the shoe is reshuffled at round start when fewer
    /// cards than this remain.
    pub reshuffle_below: usize,
    /// Whether the dealer draws on soft 17.
    pub dealer_hits_soft_17: bool,
    /// Multiple of the bet credited for a natural blackjack.
    pub blackjack_return: usize,
    /// Multiple of the insurance wager credited when the dealer has blackjack.
    pub insurance_return: usize,
    /// Whether surrender is allowed.
    pub surrender: bool,
    /// Whether insurance is offered.
    pub insurance: bool,
    /// Whether double down is allowed after split.
    pub double_after_split: bool,
    /// Rounding mode for the refunded half of a surrendered bet.
    pub rounding_surrender: RoundingMode,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            decks: 2,
            reshuffle_below: 25,
            dealer_hits_soft_17: true,
            blackjack_return: 3,
            insurance_return: 3,
            surrender: true,
            insurance: true,
            double_after_split: true,
            rounding_surrender: RoundingMode::Up,
        }
    }
}

impl GameOptions {
    /// Sets the number of decks.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_decks(6);
    /// assert_eq!(options.decks, 6);
    /// ```
    #[must_use]
    pub const fn with_decks(mut self, decks: u8) -> Self {
        self.decks = decks;
        self
    }

    /// Sets the reshuffle low-water mark.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_reshuffle_below(40);
    /// assert_eq!(options.reshuffle_below, 40);
    /// ```
    #[must_use]
    pub const fn with_reshuffle_below(mut self, cards: usize) -> Self {
        self.reshuffle_below = cards;
        self
    }

    /// Sets whether the dealer hits soft 17.
    #[must_use]
    pub const fn with_dealer_hits_soft_17(mut self, hits: bool) -> Self {
        self.dealer_hits_soft_17 = hits;
        self
    }

    /// Sets the multiple of the bet credited for a natural.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_blackjack_return(2);
    /// assert_eq!(options.blackjack_return, 2);
    /// ```
    #[must_use]
    pub const fn with_blackjack_return(mut self, multiple: usize) -> Self {
        self.blackjack_return = multiple;
        self
    }

    /// Sets the multiple of the insurance wager credited on dealer blackjack.
    #[must_use]
    pub const fn with_insurance_return(mut self, multiple: usize) -> Self {
        self.insurance_return = multiple;
        self
    }

    /// Sets whether surrender is allowed.
    #[must_use]
    pub const fn with_surrender(mut self, allowed: bool) -> Self {
        self.surrender = allowed;
        self
    }

    /// Sets whether insurance is offered.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_insurance(false);
    /// assert!(!options.insurance);
    /// ```
    #[must_use]
    pub const fn with_insurance(mut self, offered: bool) -> Self {
        self.insurance = offered;
        self
    }

    /// Sets whether double down is allowed after split.
    #[must_use]
    pub const fn with_double_after_split(mut self, allowed: bool) -> Self {
        self.double_after_split = allowed;
        self
    }

    /// Sets the rounding mode for surrender refunds.
    #[must_use]
    pub const fn with_rounding_surrender(mut self, mode: RoundingMode) -> Self {
        self.rounding_surrender = mode;
        self
    }
}
