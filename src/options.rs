//! Game configuration options.

use serde::{Deserialize, Serialize};

/// X01 variant, which determines the starting score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GameType {
    /// Start at 301.
    #[serde(rename = "301")]
    X301,
    /// Start at 501.
    #[default]
    #[serde(rename = "501")]
    X501,
    /// Start at 701.
    #[serde(rename = "701")]
    X701,
}

impl GameType {
    /// Score every player counts down from.
    #[must_use]
    pub const fn starting_score(self) -> u32 {
        match self {
            Self::X301 => 301,
            Self::X501 => 501,
            Self::X701 => 701,
        }
    }
}

/// Granularity of score entry, which decides how much a single undo removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// One submission per turn; undo removes the whole turn.
    #[default]
    PerTurn,
    /// Darts are entered one by one; undo removes only the last dart's share.
    PerDart,
}

/// Default window within which a repeated X01 submission is discarded.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Configuration options for an X01 match.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use dartscore::{GameType, X01Options};
///
/// let options = X01Options::default()
///     .with_game_type(GameType::X301)
///     .with_total_legs(3)
///     .with_double_in(true);
/// assert_eq!(options.game_type.starting_score(), 301);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct X01Options {
    /// Starting score variant.
    pub game_type: GameType,
    /// Number of legs in the match (best of).
    pub total_legs: u32,
    /// Whether the first scoring dart of a leg must be a double.
    pub double_in: bool,
    /// Whether the checkout dart must be a double.
    pub double_out: bool,
    /// Duplicate-submission window in milliseconds. 0 disables it.
    pub debounce_ms: u64,
    /// Score entry granularity.
    pub input_mode: InputMode,
}

impl Default for X01Options {
    fn default() -> Self {
        Self {
            game_type: GameType::X501,
            total_legs: 1,
            double_in: false,
            double_out: true,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            input_mode: InputMode::PerTurn,
        }
    }
}

impl X01Options {
    /// Sets the starting score variant.
    ///
    /// # Example
    ///
    /// ```
    /// use dartscore::{GameType, X01Options};
    ///
    /// let options = X01Options::default().with_game_type(GameType::X701);
    /// assert_eq!(options.game_type, GameType::X701);
    /// ```
    #[must_use]
    pub const fn with_game_type(mut self, game_type: GameType) -> Self {
        self.game_type = game_type;
        self
    }

    /// Sets the number of legs in the match.
    #[must_use]
    pub const fn with_total_legs(mut self, legs: u32) -> Self {
        self.total_legs = legs;
        self
    }

    /// Sets whether a leg must be started on a double.
    #[must_use]
    pub const fn with_double_in(mut self, required: bool) -> Self {
        self.double_in = required;
        self
    }

    /// Sets whether a leg must be finished on a double.
    ///
    /// # Example
    ///
    /// ```
    /// use dartscore::X01Options;
    ///
    /// let options = X01Options::default().with_double_out(false);
    /// assert!(!options.double_out);
    /// ```
    #[must_use]
    pub const fn with_double_out(mut self, required: bool) -> Self {
        self.double_out = required;
        self
    }

    /// Sets the duplicate-submission window.
    #[must_use]
    pub const fn with_debounce_ms(mut self, millis: u64) -> Self {
        self.debounce_ms = millis;
        self
    }

    /// Sets the score entry granularity.
    #[must_use]
    pub const fn with_input_mode(mut self, mode: InputMode) -> Self {
        self.input_mode = mode;
        self
    }
}
