//! CLI X01 scorer example.
//!
//! Enter each turn as darts in notation (`T20 T20 D16`), or `u` to undo.
//! Set `RUST_LOG=dartscore=debug` to watch the engine transitions.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};

use dartscore::{
    DartNotation, GameType, MemoryDirectory, Player, Throw, TurnOutcome, X01Engine,
    X01GameState, X01Options,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("X01 CLI example (type 'q' to quit, 'u' to undo)");

    let names = prompt_line("Player names (space separated): ");
    let mut directory = MemoryDirectory::new();
    let mut ids = Vec::new();
    for (id, name) in (1..).zip(names.split_whitespace()) {
        directory.insert(Player::new(id, name));
        ids.push(id);
    }
    if ids.is_empty() {
        ids.push(1);
        directory.insert(Player::new(1, "Player"));
    }

    let game_type = match prompt_line("Game (301/501/701, default 501): ").as_str() {
        "301" => GameType::X301,
        "701" => GameType::X701,
        _ => GameType::X501,
    };
    let double_in = prompt_line("Double in? (y/n): ") == "y";
    let options = X01Options::default()
        .with_game_type(game_type)
        .with_double_in(double_in)
        .with_debounce_ms(0);

    let engine = X01Engine::new(options);
    if let Err(err) = engine.start_game(&directory, &ids, 0) {
        println!("Cannot start: {err}");
        return;
    }

    while let Some(state) = engine.game() {
        if state.is_game_finished {
            if let Some(winner) = state.winner().and_then(|id| state.player(id)) {
                println!("\n{} wins the match!", winner.name());
            }
            break;
        }
        print_board(&state);

        let Some(player) = state.current_player() else {
            break;
        };
        let input = prompt_line(&format!("{} to throw: ", player.name()));
        match input.as_str() {
            "q" | "quit" => break,
            "u" | "undo" => {
                engine.undo_last_score();
                continue;
            }
            _ => {}
        }

        let notations: Vec<&str> = input.split_whitespace().take(3).collect();
        if notations.is_empty() {
            println!("Enter one to three darts.");
            continue;
        }

        let darts: Vec<DartNotation> = notations
            .iter()
            .filter_map(|n| DartNotation::parse(n))
            .collect();
        let score = darts.iter().copied().map(DartNotation::points).sum();
        let multiplier = notations
            .last()
            .and_then(|n| DartNotation::parse(n))
            .map_or(1, |d| d.ring.multiplier());
        let throw = Throw::new(score, notations.len() as u32)
            .with_multiplier(multiplier)
            .with_notations(&notations);

        if let Some(next) = engine.record_score(throw) {
            match next.last_outcome {
                Some(TurnOutcome::Bust) => println!("Bust!"),
                Some(TurnOutcome::DoubleInMissed) => println!("No double, no score."),
                _ => {}
            }
            if next.current_leg > state.current_leg {
                println!("Leg {} won.", state.current_leg);
            }
        }
    }

    let merged = engine.end_game(&mut directory).unwrap_or_default();
    for player in merged {
        println!(
            "{}: {} darts, {:.2} per dart lifetime",
            player.name, player.total_darts_thrown, player.average
        );
    }
}

fn print_board(state: &X01GameState) {
    println!("\nLeg {} of {}", state.current_leg, state.total_legs);
    for (seat, player) in state.players.iter().enumerate() {
        let marker = if seat == state.current_player_index {
            ">"
        } else {
            " "
        };
        println!(
            "{marker} {:<12} {:>4}  legs {}  avg {:.1}",
            player.name(),
            player.score,
            state.legs_won_by(player.id()),
            player.avg_per_round
        );
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}
