//! X01 engine integration tests.

#![allow(clippy::float_cmp)]

use core::time::Duration;

use dartscore::{
    GameType, InputMode, MemoryDirectory, Player, PlayerDirectory, StartError, Throw, TurnOutcome,
    X01Engine, X01GameState, X01Options,
};

fn directory() -> MemoryDirectory {
    [
        Player::new(1, "Ada"),
        Player::new(2, "Bo"),
        Player::new(3, "Cy"),
    ]
    .into_iter()
    .collect()
}

fn engine(options: X01Options) -> X01Engine {
    X01Engine::new(options.with_debounce_ms(0))
}

fn throw(engine: &X01Engine, score: u32) -> X01GameState {
    engine.record_score(Throw::new(score, 3)).unwrap()
}

/// Two players at 501 with double-out; leaves player 1 on 40 to throw.
fn player_one_on_forty() -> X01Engine {
    let engine = engine(X01Options::default());
    engine.start_game(&directory(), &[1, 2], 0).unwrap();
    for score in [180, 60, 180, 60, 101, 60] {
        throw(&engine, score);
    }
    let state = engine.game().unwrap();
    assert_eq!(state.players[0].score, 40);
    assert_eq!(state.current_player_index, 0);
    engine
}

#[test]
fn start_builds_players_in_selection_order() {
    let engine = engine(X01Options::default().with_game_type(GameType::X301));
    let state = engine.start_game(&directory(), &[3, 1, 2], 0).unwrap();

    let ids: Vec<u32> = state.players.iter().map(|p| p.id()).collect();
    assert_eq!(ids, [3, 1, 2]);
    assert!(state.players.iter().all(|p| p.score == 301 && p.initial_score == 301));
    assert_eq!(state.position_of(3), Some(1));
    assert_eq!(state.position_of(2), Some(3));
    assert_eq!(state.player_positions().len(), 3);
    assert_eq!(state.current_leg, 1);
    assert!(state.legs_won.values().all(|&legs| legs == 0));
}

#[test]
fn start_skips_unknown_players_and_rejects_empty_tables() {
    let engine = engine(X01Options::default());
    let state = engine.start_game(&directory(), &[9, 2, 8], 0).unwrap();
    assert_eq!(state.players.len(), 1);
    assert_eq!(state.players[0].name(), "Bo");

    assert_eq!(
        engine.start_game(&directory(), &[42], 0).unwrap_err(),
        StartError::NoPlayers
    );
    // The running match is untouched.
    assert_eq!(engine.game(), Some(state));
}

#[test]
fn starting_player_index_wraps() {
    let engine = engine(X01Options::default());
    let state = engine.start_game(&directory(), &[1, 2], 3).unwrap();
    assert_eq!(state.current_player_index, 1);
    assert_eq!(state.starting_player_index, 1);
}

#[test]
fn transitions_without_a_game_return_none() {
    let engine = engine(X01Options::default());
    let mut players = directory();

    assert!(engine.record_score(Throw::new(60, 3)).is_none());
    assert!(engine.undo_last_score().is_none());
    assert!(engine.handle_leg_win(1).is_none());
    assert!(engine.end_game(&mut players).is_none());
}

#[test]
fn scoring_turn_subtracts_and_rotates() {
    let engine = engine(X01Options::default());
    engine.start_game(&directory(), &[1, 2, 3], 0).unwrap();

    let state = throw(&engine, 60);
    assert_eq!(state.last_outcome, Some(TurnOutcome::Scored));
    assert_eq!(state.players[0].score, 441);
    assert_eq!(state.players[0].last_round_score, 60);
    assert_eq!(state.current_player_index, 1);

    throw(&engine, 45);
    let state = throw(&engine, 26);
    assert_eq!(state.current_player_index, 0);
    assert_eq!(state.players[2].score, 475);
}

#[test]
fn bust_below_zero_keeps_score_and_passes_turn() {
    let engine = engine(X01Options::default().with_game_type(GameType::X301));
    engine.start_game(&directory(), &[1, 2], 0).unwrap();
    throw(&engine, 180);
    throw(&engine, 20);

    let state = throw(&engine, 140);
    assert_eq!(state.last_outcome, Some(TurnOutcome::Bust));
    assert_eq!(state.players[0].score, 121);
    assert_eq!(state.players[0].scores.last().unwrap().score, 0);
    assert_eq!(state.players[0].darts_thrown, 6);
    assert_eq!(state.current_player_index, 1);
}

#[test]
fn double_out_bust_on_forty_with_single() {
    let engine = player_one_on_forty();

    let state = engine
        .record_score(Throw::new(40, 1).with_multiplier(1))
        .unwrap();
    assert_eq!(state.last_outcome, Some(TurnOutcome::Bust));
    assert_eq!(state.players[0].score, 40);
    assert_eq!(state.current_player_index, 1);
    assert!(!state.is_game_finished);
}

#[test]
fn double_out_leaving_one_is_a_bust() {
    let engine = player_one_on_forty();

    let state = engine.record_score(Throw::new(39, 3)).unwrap();
    assert_eq!(state.last_outcome, Some(TurnOutcome::Bust));
    assert_eq!(state.players[0].score, 40);
}

#[test]
fn double_out_checkout_on_double_wins_the_leg() {
    let engine = player_one_on_forty();

    let state = engine
        .record_score(Throw::new(40, 1).with_multiplier(2))
        .unwrap();
    assert_eq!(state.last_outcome, Some(TurnOutcome::Checkout));
    assert_eq!(state.players[0].score, 0);
    assert_eq!(state.legs_won_by(1), 1);
    assert!(state.is_game_finished);
    assert_eq!(state.winner(), Some(1));
}

#[test]
fn straight_out_checks_out_on_any_dart() {
    let engine = engine(
        X01Options::default()
            .with_game_type(GameType::X301)
            .with_double_out(false),
    );
    engine.start_game(&directory(), &[1], 0).unwrap();
    throw(&engine, 180);
    throw(&engine, 120);

    let state = engine.record_score(Throw::new(1, 1)).unwrap();
    assert_eq!(state.last_outcome, Some(TurnOutcome::Checkout));
    assert!(state.is_game_finished);
}

#[test]
fn double_in_gates_only_the_first_recorded_turn() {
    let engine = engine(X01Options::default().with_double_in(true));
    engine.start_game(&directory(), &[1, 2], 0).unwrap();

    let state = engine
        .record_score(Throw::new(60, 3).with_multiplier(3))
        .unwrap();
    assert_eq!(state.last_outcome, Some(TurnOutcome::DoubleInMissed));
    assert_eq!(state.players[0].score, 501);
    assert_eq!(state.players[0].scores.len(), 1);
    assert_eq!(state.players[0].darts_thrown, 3);
    assert_eq!(state.current_player_index, 1);

    let state = engine
        .record_score(Throw::new(40, 2).with_multiplier(2))
        .unwrap();
    assert_eq!(state.last_outcome, Some(TurnOutcome::Scored));
    assert_eq!(state.players[1].score, 461);

    // The voided turn is on record, so the second turn scores freely.
    let state = engine
        .record_score(Throw::new(60, 3).with_multiplier(1))
        .unwrap();
    assert_eq!(state.last_outcome, Some(TurnOutcome::Scored));
    assert_eq!(state.players[0].score, 441);
    assert_eq!(state.players[0].scores.len(), 2);
}

#[test]
fn double_in_applies_again_after_undoing_the_first_turn() {
    let engine = engine(X01Options::default().with_double_in(true));
    engine.start_game(&directory(), &[1], 0).unwrap();

    engine
        .record_score(Throw::new(60, 3).with_multiplier(1))
        .unwrap();
    let state = engine.undo_last_score().unwrap();
    assert!(state.players[0].scores.is_empty());

    let state = engine
        .record_score(Throw::new(60, 3).with_multiplier(1))
        .unwrap();
    assert_eq!(state.last_outcome, Some(TurnOutcome::DoubleInMissed));
    assert_eq!(state.players[0].score, 501);
}

#[test]
fn statistics_follow_the_turn_history() {
    let engine = engine(X01Options::default());
    engine.start_game(&directory(), &[1], 0).unwrap();
    throw(&engine, 100);
    throw(&engine, 140);
    let state = throw(&engine, 180);

    let player = &state.players[0];
    assert_eq!(player.score, 81);
    assert_eq!(player.rounds_100_plus, 1);
    assert_eq!(player.rounds_140_plus, 1);
    assert_eq!(player.rounds_180, 1);
    assert_eq!(player.darts_thrown, 9);
    assert_eq!(player.avg_per_dart, 420.0 / 9.0);
    assert_eq!(player.avg_per_round, 140.0);

    // A bust adds darts but no points.
    let state = throw(&engine, 100);
    let player = &state.players[0];
    assert_eq!(player.darts_thrown, 12);
    assert_eq!(player.avg_per_dart, 35.0);
    assert_eq!(player.avg_per_round, 105.0);
    assert_eq!(player.last_round_score, 0);
}

#[test]
fn notations_feed_per_game_hits_and_recent_cache() {
    let engine = engine(X01Options::default());
    engine.start_game(&directory(), &[1], 0).unwrap();

    let state = engine
        .record_score(Throw::new(100, 3).with_notations(&["T20", "S20", "D10"]))
        .unwrap();
    let hits = &state.players[0].dart_hits;
    assert_eq!(hits.get("T20"), Some(&1.0));
    assert_eq!(hits.get("S20"), Some(&1.0));
    assert_eq!(hits.get("20"), Some(&1.25));
    assert_eq!(hits.get("10"), Some(&0.5));
    assert_eq!(engine.recent_notations(), ["T20", "S20", "D10"]);
}

#[test]
fn undo_restores_previous_player_and_turn() {
    let engine = engine(X01Options::default());
    engine.start_game(&directory(), &[1, 2], 0).unwrap();
    throw(&engine, 60);
    throw(&engine, 45);

    let state = engine.undo_last_score().unwrap();
    assert_eq!(state.players[1].score, 501);
    assert!(state.players[1].scores.is_empty());
    assert_eq!(state.current_player_index, 1);

    let state = engine.undo_last_score().unwrap();
    assert_eq!(state.players[0].score, 501);
    assert_eq!(state.players[0].darts_thrown, 0);
    assert_eq!(state.current_player_index, 0);

    // Nothing left for the previous slot.
    let again = engine.undo_last_score().unwrap();
    assert_eq!(again, state);
}

#[test]
fn undo_of_a_bust_leaves_score_and_drops_the_entry() {
    let engine = player_one_on_forty();
    engine.record_score(Throw::new(50, 3)).unwrap();

    let state = engine.undo_last_score().unwrap();
    assert_eq!(state.players[0].score, 40);
    assert_eq!(state.players[0].scores.len(), 3);
    assert_eq!(state.current_player_index, 0);
}

#[test]
fn per_dart_undo_removes_one_dart_share() {
    let engine = engine(X01Options::default().with_input_mode(InputMode::PerDart));
    engine.start_game(&directory(), &[1, 2], 0).unwrap();
    throw(&engine, 60);

    let state = engine.undo_last_score().unwrap();
    let player = &state.players[0];
    assert_eq!(player.score, 461);
    assert_eq!(player.scores.len(), 1);
    assert_eq!(player.scores[0].score, 40);
    assert_eq!(player.scores[0].darts, 2);
    assert_eq!(player.darts_thrown, 2);
    assert_eq!(state.current_player_index, 0);
}

#[test]
fn undo_of_match_winning_checkout_reopens_the_match() {
    let engine = player_one_on_forty();
    engine
        .record_score(Throw::new(40, 1).with_multiplier(2))
        .unwrap();

    let state = engine.undo_last_score().unwrap();
    assert!(!state.is_game_finished);
    assert_eq!(state.legs_won_by(1), 0);
    assert_eq!(state.players[0].score, 40);
    assert_eq!(state.current_player_index, 0);
    assert_eq!(state.winner(), None);
}

#[test]
fn finished_match_ignores_further_throws() {
    let engine = player_one_on_forty();
    let finished = engine
        .record_score(Throw::new(40, 1).with_multiplier(2))
        .unwrap();

    assert_eq!(throw(&engine, 60), finished);
}

#[test]
fn legs_reset_scores_and_rotate_the_opener() {
    let engine = engine(
        X01Options::default()
            .with_game_type(GameType::X301)
            .with_double_out(false)
            .with_total_legs(3),
    );
    engine.start_game(&directory(), &[1, 2], 0).unwrap();

    throw(&engine, 180);
    throw(&engine, 60);
    let state = throw(&engine, 121);
    assert_eq!(state.legs_won_by(1), 1);
    assert!(!state.is_game_finished);
    assert_eq!(state.current_leg, 2);
    // Leg two opens at index 2 mod 2.
    assert_eq!(state.current_player_index, 0);
    assert!(state.players.iter().all(|p| p.score == 301 && p.scores.is_empty()));
    assert_eq!(state.players[0].rounds_180, 0);
    assert_eq!(state.players[0].match_points_scored, 301);
    assert_eq!(state.players[1].match_darts_thrown, 3);

    // Player 2 takes leg two.
    throw(&engine, 60);
    throw(&engine, 180);
    throw(&engine, 60);
    let state = throw(&engine, 121);
    assert_eq!(state.legs_won_by(2), 1);
    assert_eq!(state.current_leg, 3);
    assert_eq!(state.current_player_index, 1);

    // Player 2 opens leg three and takes the match.
    throw(&engine, 180);
    throw(&engine, 60);
    let state = throw(&engine, 121);
    assert!(state.is_game_finished);
    assert_eq!(state.winner(), Some(2));
    assert_eq!(state.legs_won_by(2), 2);
    assert_eq!(state.legs_won_by(1), 1);
}

#[test]
fn handle_leg_win_can_be_called_directly() {
    let engine = engine(X01Options::default().with_total_legs(5));
    engine.start_game(&directory(), &[1, 2, 3], 0).unwrap();
    throw(&engine, 100);

    let state = engine.handle_leg_win(3).unwrap();
    assert_eq!(state.legs_won_by(3), 1);
    assert_eq!(state.current_leg, 2);
    assert_eq!(state.current_player_index, 2);
    assert_eq!(state.players[0].score, 501);

    // Unknown ids change nothing.
    assert_eq!(engine.handle_leg_win(99).unwrap(), state);

    let state = engine.handle_leg_win(1).unwrap();
    assert_eq!(state.current_leg, 3);
    assert_eq!(state.current_player_index, 0);
}

#[test]
fn leg_wins_after_the_match_is_over_are_ignored() {
    let engine = engine(X01Options::default().with_total_legs(3));
    engine.start_game(&directory(), &[1, 2], 0).unwrap();

    engine.handle_leg_win(2).unwrap();
    let finished = engine.handle_leg_win(2).unwrap();
    assert!(finished.is_game_finished);
    assert_eq!(finished.legs_won_by(2), 2);

    assert_eq!(engine.handle_leg_win(2).unwrap(), finished);
    assert_eq!(engine.handle_leg_win(1).unwrap(), finished);
}

#[test]
fn standings_sort_a_copy() {
    let engine = engine(X01Options::default());
    engine.start_game(&directory(), &[1, 2, 3], 0).unwrap();
    throw(&engine, 20);
    throw(&engine, 100);
    let state = throw(&engine, 60);

    let ranked: Vec<u32> = state.standings().iter().map(|p| p.id()).collect();
    assert_eq!(ranked, [2, 3, 1]);
    let seats: Vec<u32> = state.players.iter().map(|p| p.id()).collect();
    assert_eq!(seats, [1, 2, 3]);
}

#[test]
fn end_game_merges_lifetime_stats() {
    let mut players = directory();
    let mut veteran = Player::new(1, "Ada");
    veteran.games = 4;
    veteran.total_darts_thrown = 30;
    veteran.total_points_scored = 600;
    veteran.dart_hits.insert("T20".into(), 2.0);
    players.upsert_many(vec![veteran]);

    let engine = engine(X01Options::default());
    engine.start_game(&players, &[1, 2], 0).unwrap();
    engine
        .record_score(Throw::new(60, 3).with_notations(&["T20"]))
        .unwrap();
    throw(&engine, 45);
    throw(&engine, 100);

    let merged = engine.end_game(&mut players).unwrap();
    assert_eq!(merged.len(), 2);
    assert!(engine.game().is_none());

    let ada = players.find_by_id(1).unwrap();
    assert_eq!(ada.games, 5);
    assert_eq!(ada.total_darts_thrown, 36);
    assert_eq!(ada.total_points_scored, 760);
    assert_eq!(ada.average, 760.0 / 36.0);
    assert_eq!(ada.dart_hits.get("T20"), Some(&3.0));
    assert_eq!(ada.favorite_darts(1)[0].0, "T20");

    let bo = players.find_by_id(2).unwrap();
    assert_eq!(bo.games, 1);
    assert_eq!(bo.total_points_scored, 45);
    assert_eq!(bo.average, 15.0);
}

#[test]
fn rapid_duplicate_submission_is_ignored() {
    let engine = X01Engine::new(X01Options::default());
    engine.start_game(&directory(), &[1, 2], 0).unwrap();

    let first = engine
        .record_score_at(Duration::from_millis(1_000), Throw::new(60, 3))
        .unwrap();
    let duplicate = engine
        .record_score_at(Duration::from_millis(1_150), Throw::new(60, 3))
        .unwrap();
    assert_eq!(duplicate, first);

    let later = engine
        .record_score_at(Duration::from_millis(1_400), Throw::new(45, 3))
        .unwrap();
    assert_eq!(later.players[1].score, 456);
    assert_eq!(later.current_player_index, 0);
}

#[test]
fn options_are_read_at_game_start() {
    let engine = engine(X01Options::default());
    engine.set_options(
        X01Options::default()
            .with_game_type(GameType::X701)
            .with_debounce_ms(0),
    );
    let state = engine.start_game(&directory(), &[1], 0).unwrap();
    assert_eq!(state.players[0].score, 701);
    assert_eq!(engine.options().game_type, GameType::X701);
}
