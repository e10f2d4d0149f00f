//! Round scoring and running-total replay.
//!
//! Every entry stores the running total after its round, so changing one
//! entry means replaying the player's later entries. Commit and undo both go
//! through [`recompute_from`].

use alloc::vec::Vec;

use crate::player::PlayerId;

use super::state::{
    HalveItGameState, HalveItRound, PlayerRound, RoundInput, RoundTarget, RoundType, TARGET_SCORE,
};

/// Running total after a round, given the total entering it.
///
/// A miss (zero hits or points, or any total other than the target on a
/// target-score round) halves the total, rounding down.
#[must_use]
pub fn score_round(
    round_type: RoundType,
    target: Option<RoundTarget>,
    entering: u32,
    input: &RoundInput,
) -> u32 {
    let halved = entering / 2;
    match round_type {
        RoundType::Number | RoundType::Bull => {
            let hits = input.hits.unwrap_or(0);
            let value = target.map_or(0, RoundTarget::value);
            if hits == 0 {
                halved
            } else {
                entering.saturating_add(hits.saturating_mul(value))
            }
        }
        RoundType::Scoring | RoundType::Double | RoundType::Treble => {
            match input.points.unwrap_or(0) {
                0 => halved,
                points => entering.saturating_add(points),
            }
        }
        RoundType::TargetScore => {
            let goal = target.map_or(TARGET_SCORE, RoundTarget::value);
            if input.total_score.unwrap_or(0) == goal {
                entering.saturating_add(goal)
            } else {
                halved
            }
        }
    }
}

/// Player's running total entering round `before`: the score of their last
/// entry in an earlier round, or zero.
#[must_use]
pub fn entering_total(rounds: &[HalveItRound], before: usize, player: PlayerId) -> u32 {
    rounds
        .iter()
        .take(before)
        .filter_map(|round| round.player_scores.get(&player))
        .last()
        .map_or(0, |entry| entry.score)
}

/// Replays `player`'s entries from round `from` onward, recomputing each
/// stored running total from the total entering `from`.
#[must_use]
pub fn recompute_from(rounds: &[HalveItRound], from: usize, player: PlayerId) -> Vec<HalveItRound> {
    let mut replayed = rounds.to_vec();
    let mut running = entering_total(&replayed, from, player);

    for round in replayed.iter_mut().skip(from) {
        let (round_type, target) = (round.round_type, round.target);
        if let Some(entry) = round.player_scores.get_mut(&player) {
            entry.score = score_round(round_type, target, running, &entry.input);
            running = entry.score;
        }
    }

    replayed
}

/// Rebuilds every player's history and total from the round table.
pub(crate) fn sync_players(state: &mut HalveItGameState) {
    for player in &mut state.players {
        player.rounds = state
            .rounds
            .iter()
            .enumerate()
            .filter_map(|(round_index, round)| {
                round.player_scores.get(&player.id).map(|entry| PlayerRound {
                    round_index,
                    score: entry.score,
                })
            })
            .collect();
        player.total_score = player.rounds.last().map_or(0, |round| round.score);
    }
}

/// Whether every player has an entry in every round.
#[must_use]
pub fn all_rounds_complete(state: &HalveItGameState) -> bool {
    state
        .rounds
        .iter()
        .all(|round| state.players.iter().all(|p| round.has_entry(p.id)))
}
