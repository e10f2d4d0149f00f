//! Turn resolution: double-in gate, bust rules, checkout, and rotation.

use crate::notation::merge_hits;

use super::state::{TurnEntry, TurnOutcome, X01GameState, X01Player};

/// Multiplier of a dart thrown at the double ring.
pub const DOUBLE: u32 = 2;

/// A score submission for the player whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throw<'a> {
    /// Points scored by the darts of the turn.
    pub score: u32,
    /// Darts used (1-3).
    pub darts: u32,
    /// Ring multiplier of the final dart, when known.
    pub last_dart_multiplier: Option<u32>,
    /// Notations of the darts thrown (`"T20"`, `"D16"`), for hit statistics.
    pub notations: &'a [&'a str],
}

impl<'a> Throw<'a> {
    /// Creates a throw without multiplier or notation details.
    #[must_use]
    pub const fn new(score: u32, darts: u32) -> Self {
        Self {
            score,
            darts,
            last_dart_multiplier: None,
            notations: &[],
        }
    }

    /// Sets the ring multiplier of the final dart.
    #[must_use]
    pub const fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.last_dart_multiplier = Some(multiplier);
        self
    }

    /// Sets the notations of the darts thrown.
    #[must_use]
    pub const fn with_notations(mut self, notations: &'a [&'a str]) -> Self {
        self.notations = notations;
        self
    }

    const fn ended_on_double(&self) -> bool {
        matches!(self.last_dart_multiplier, Some(DOUBLE))
    }
}

/// Classifies a throw against the player's remaining score and the rules.
#[must_use]
pub fn classify(state: &X01GameState, player: &X01Player, throw: &Throw<'_>) -> TurnOutcome {
    if state.is_double_in && player.scores.is_empty() && !throw.ended_on_double() {
        return TurnOutcome::DoubleInMissed;
    }

    match player.score.checked_sub(throw.score) {
        None => TurnOutcome::Bust,
        Some(1) if state.is_double_out => TurnOutcome::Bust,
        Some(0) if state.is_double_out && !throw.ended_on_double() => TurnOutcome::Bust,
        Some(0) => TurnOutcome::Checkout,
        Some(_) => TurnOutcome::Scored,
    }
}

/// Applies a throw for the current player and passes the turn on.
///
/// Returns the new snapshot and the outcome. A [`TurnOutcome::Checkout`]
/// only commits the turn; completing the leg is a separate transition.
/// A finished match or an empty player list leaves the state unchanged.
#[must_use]
pub fn apply_throw(state: &X01GameState, throw: &Throw<'_>) -> (X01GameState, Option<TurnOutcome>) {
    let mut next = state.clone();
    if next.is_game_finished {
        return (next, None);
    }

    let index = next.current_player_index;
    let Some(player) = state.players.get(index) else {
        return (next, None);
    };
    let outcome = classify(state, player, throw);

    let player = &mut next.players[index];
    match outcome {
        TurnOutcome::Scored | TurnOutcome::Checkout => commit(player, throw),
        TurnOutcome::Bust | TurnOutcome::DoubleInMissed => void(player, throw.darts),
    }

    next.current_player_index = next_slot(index, next.players.len());
    next.last_outcome = Some(outcome);
    (next, Some(outcome))
}

fn commit(player: &mut X01Player, throw: &Throw<'_>) {
    player.score -= throw.score;
    player.scores.push(TurnEntry {
        score: throw.score,
        darts: throw.darts,
    });
    player.match_points_scored += u64::from(throw.score);
    player.match_darts_thrown += u64::from(throw.darts);
    merge_hits(&mut player.dart_hits, throw.notations);
    refresh_stats(player);
}

fn void(player: &mut X01Player, darts: u32) {
    player.scores.push(TurnEntry { score: 0, darts });
    player.match_darts_thrown += u64::from(darts);
    refresh_stats(player);
}

/// Index of the slot after `index`, wrapping at `count`.
#[must_use]
pub const fn next_slot(index: usize, count: usize) -> usize {
    if count == 0 { 0 } else { (index + 1) % count }
}

/// Index of the slot before `index`, wrapping at `count`.
#[must_use]
pub const fn previous_slot(index: usize, count: usize) -> usize {
    if count == 0 {
        0
    } else {
        (index + count - 1) % count
    }
}

/// Recomputes the leg statistics derived from the turn history.
pub(crate) fn refresh_stats(player: &mut X01Player) {
    let mut total: u64 = 0;
    let mut darts: u32 = 0;
    let (mut ton, mut ton_forty, mut max) = (0, 0, 0);

    for entry in &player.scores {
        total += u64::from(entry.score);
        darts += entry.darts;
        match entry.score {
            100..=139 => ton += 1,
            140..=179 => ton_forty += 1,
            180 => max += 1,
            _ => {}
        }
    }

    player.darts_thrown = darts;
    player.rounds_100_plus = ton;
    player.rounds_140_plus = ton_forty;
    player.rounds_180 = max;
    player.last_round_score = player.scores.last().map_or(0, |entry| entry.score);

    if darts == 0 {
        player.avg_per_dart = 0.0;
        player.avg_per_round = 0.0;
    } else {
        player.avg_per_dart = total as f64 / f64::from(darts);
        player.avg_per_round = total as f64 / f64::from(darts.div_ceil(3));
    }
}
