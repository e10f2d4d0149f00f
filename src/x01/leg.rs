//! Leg and match progression, and the end-of-game merge into lifetime stats.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::notation::accumulate_hits;
use crate::player::{Player, PlayerId};

use super::state::X01GameState;
use super::turn::refresh_stats;

/// Index of the player who opens `leg` (1-based) after the first.
///
/// The opener moves one seat on every leg: leg 2 of three players opens
/// at index 2, leg 3 at index 0.
#[must_use]
pub const fn leg_opener(leg: u32, player_count: usize) -> usize {
    if player_count == 0 {
        return 0;
    }
    leg as usize % player_count
}

/// Number of legs a player must win to take a best-of-`total_legs` match.
#[must_use]
pub const fn legs_to_win(total_legs: u32) -> u32 {
    total_legs / 2 + 1
}

/// Credits `winner` with a leg and either finishes the match or sets up the
/// next leg. Unknown ids and a finished match leave the state unchanged.
#[must_use]
pub fn complete_leg(state: &X01GameState, winner: PlayerId) -> X01GameState {
    let mut next = state.clone();
    if next.is_game_finished || next.player(winner).is_none() {
        return next;
    }

    let won = next.legs_won.entry(winner).or_insert(0);
    *won += 1;
    if *won >= legs_to_win(next.total_legs) {
        next.is_game_finished = true;
        return next;
    }

    for player in &mut next.players {
        player.score = player.initial_score;
        player.scores.clear();
        refresh_stats(player);
    }
    next.current_leg += 1;
    next.current_player_index = leg_opener(next.current_leg, next.players.len());
    next.last_outcome = None;
    next
}

/// Folds every player's match totals into their lifetime records.
///
/// `lookup` supplies the freshest directory record; players missing from it
/// fall back to the snapshot taken at game start.
pub fn merge_lifetime_stats(
    state: &X01GameState,
    lookup: impl Fn(PlayerId) -> Option<Player>,
) -> Vec<Player> {
    state
        .players
        .iter()
        .map(|player| {
            let mut record = lookup(player.id()).unwrap_or_else(|| player.profile.clone());
            record.games += 1;
            record.total_darts_thrown += player.match_darts_thrown;
            record.total_points_scored += player.match_points_scored;
            accumulate_hits(&mut record.dart_hits, &player.dart_hits);
            record.average = if record.total_darts_thrown == 0 {
                0.0
            } else {
                record.total_points_scored as f64 / record.total_darts_thrown as f64
            };
            record
        })
        .collect()
}

/// Initial legs-won table with every player at zero.
pub(crate) fn empty_legs_table(ids: impl Iterator<Item = PlayerId>) -> BTreeMap<PlayerId, u32> {
    ids.map(|id| (id, 0)).collect()
}
