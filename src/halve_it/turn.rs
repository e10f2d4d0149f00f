//! Halve-It transitions: record, finish turn, undo.

use super::rules::{all_rounds_complete, recompute_from, sync_players};
use super::state::{HalveItGameState, LastScore, RoundEntry, RoundInput};

/// Records `input` for the current player in the current round.
///
/// The entry's running total is computed from the player's earlier rounds
/// and any later entries are replayed. Re-recording a round replaces the
/// previous entry. A finished game is left unchanged.
#[must_use]
pub fn record_round(state: &HalveItGameState, input: RoundInput) -> HalveItGameState {
    let mut next = state.clone();
    if next.is_game_finished {
        return next;
    }

    let round_index = next.current_round_index;
    let Some(player_id) = next.current_player().map(|p| p.id) else {
        return next;
    };
    let Some(round) = next.rounds.get_mut(round_index) else {
        return next;
    };

    round
        .player_scores
        .insert(player_id, RoundEntry { input, score: 0 });
    next.rounds = recompute_from(&next.rounds, round_index, player_id);
    sync_players(&mut next);

    next.last_score = Some(LastScore {
        player_id,
        round_index,
    });
    next.is_game_finished = all_rounds_complete(&next);
    next
}

/// Passes the turn on once the current player has an entry this round.
///
/// When the whole table has played the round, moves to the first seat of the
/// next round, or finishes the game after the last round.
#[must_use]
pub fn finish_turn(state: &HalveItGameState) -> HalveItGameState {
    let mut next = state.clone();
    if next.is_game_finished {
        return next;
    }

    let Some(round) = next.current_round() else {
        return next;
    };
    let Some(player) = next.current_player() else {
        return next;
    };
    if !round.has_entry(player.id) {
        return next;
    }

    let round_done = next.players.iter().all(|p| round.has_entry(p.id));
    if !round_done {
        next.current_player_index = (next.current_player_index + 1) % next.players.len();
    } else if next.current_round_index + 1 >= next.rounds.len() {
        next.is_game_finished = true;
    } else {
        next.current_round_index += 1;
        next.current_player_index = 0;
    }
    next
}

/// Removes the most recent entry, replays the player's later rounds, and
/// moves the pointers back to the removed entry.
#[must_use]
pub fn undo_last(state: &HalveItGameState) -> HalveItGameState {
    let mut next = state.clone();
    let Some(last) = next.last_score else {
        return next;
    };
    let Some(round) = next.rounds.get_mut(last.round_index) else {
        return next;
    };

    round.player_scores.remove(&last.player_id);
    next.rounds = recompute_from(&next.rounds, last.round_index, last.player_id);
    sync_players(&mut next);

    if let Some(seat) = next.players.iter().position(|p| p.id == last.player_id) {
        next.current_player_index = seat;
    }
    next.current_round_index = last.round_index;
    next.is_game_finished = false;
    next.last_score = previous_entry(&next, last.round_index, next.current_player_index);
    next
}

/// Nearest committed entry before (`round_index`, `seat`): earlier seats in
/// the same round first, then earlier rounds from the last seat down.
fn previous_entry(state: &HalveItGameState, round_index: usize, seat: usize) -> Option<LastScore> {
    let earlier_seats = (0..seat).rev().map(|s| (round_index, s));
    let earlier_rounds = (0..round_index)
        .rev()
        .flat_map(|r| (0..state.players.len()).rev().map(move |s| (r, s)));

    earlier_seats.chain(earlier_rounds).find_map(|(r, s)| {
        let player = state.players.get(s)?;
        state.rounds.get(r)?.has_entry(player.id).then_some(LastScore {
            player_id: player.id,
            round_index: r,
        })
    })
}
