//! Undo of the most recent X01 submission.

use crate::options::InputMode;

use super::state::X01GameState;
use super::turn::{previous_slot, refresh_stats};

#[cfg(feature = "std")]
fn round_half_up(value: f64) -> u32 {
    value.round() as u32
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_half_up(value: f64) -> u32 {
    libm::round(value) as u32
}

/// Share of a turn's points attributed to one dart.
#[must_use]
pub fn dart_share(score: u32, darts: u32) -> u32 {
    if darts == 0 {
        return score;
    }
    round_half_up(f64::from(score) / f64::from(darts)).min(score)
}

/// Reverts the latest entry of the player in the previous rotation slot and
/// hands the turn back to them.
///
/// In [`InputMode::PerDart`] only the last dart's share of a multi-dart
/// entry is removed. Undoing the checkout that ended the match also takes
/// the leg back. If that player has no history the state is unchanged.
#[must_use]
pub fn undo_last(state: &X01GameState) -> X01GameState {
    let mut next = state.clone();
    let index = previous_slot(next.current_player_index, next.players.len());
    let input_mode = next.input_mode;

    let Some(player) = next.players.get_mut(index) else {
        return next;
    };
    let Some(last) = player.scores.last_mut() else {
        return next;
    };

    let checked_out = player.score == 0;
    let (restored, removed_darts) = match input_mode {
        InputMode::PerDart if last.darts > 1 => {
            let share = dart_share(last.score, last.darts);
            last.score -= share;
            last.darts -= 1;
            (share, 1)
        }
        _ => {
            let entry = *last;
            player.scores.pop();
            (entry.score, entry.darts)
        }
    };

    player.score += restored;
    player.match_points_scored = player
        .match_points_scored
        .saturating_sub(u64::from(restored));
    player.match_darts_thrown = player
        .match_darts_thrown
        .saturating_sub(u64::from(removed_darts));
    refresh_stats(player);

    let id = player.id();
    if checked_out && restored > 0 {
        if let Some(won) = next.legs_won.get_mut(&id) {
            *won = won.saturating_sub(1);
        }
    }

    next.current_player_index = index;
    next.is_game_finished = false;
    next.last_outcome = None;
    next
}
