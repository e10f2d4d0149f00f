//! Halve-It game state types and round templates.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use serde::{Deserialize, Serialize};

use crate::notation::BULL;
use crate::player::PlayerId;

/// Points awarded for hitting the exact target on a target-score round.
pub const TARGET_SCORE: u32 = 41;

/// Round template selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HalveItMode {
    /// Ten rounds: scoring, 15, 16, double, 17, 18, treble, 19, 20, bull.
    #[default]
    #[serde(rename = "default")]
    Default,
    /// Eight rounds: 19, 18, double, 17, 41, treble, 20, bull.
    #[serde(rename = "41")]
    FortyOne,
}

/// Scoring rule of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoundType {
    /// Any points count.
    Scoring,
    /// Hits on a numbered segment count.
    Number,
    /// Only points from doubles count.
    Double,
    /// Only points from trebles count.
    Treble,
    /// Hits on the bull count.
    Bull,
    /// The turn must total exactly the target.
    TargetScore,
}

/// Target of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundTarget {
    /// A numbered segment (15-20).
    Number(u32),
    /// The bull.
    Bull,
    /// An exact turn total.
    Score(u32),
}

impl RoundTarget {
    /// Points a single hit (or the exact total) is worth.
    #[must_use]
    pub const fn value(self) -> u32 {
        match self {
            Self::Number(n) | Self::Score(n) => n,
            Self::Bull => BULL as u32,
        }
    }
}

/// Raw values submitted for a round. Absent fields count as zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundInput {
    /// Hits on the target (number and bull rounds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hits: Option<u32>,
    /// Points scored (scoring, double and treble rounds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    /// Turn total (target-score rounds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_score: Option<u32>,
}

impl RoundInput {
    /// Input for a number or bull round.
    #[must_use]
    pub const fn hits(hits: u32) -> Self {
        Self {
            hits: Some(hits),
            points: None,
            total_score: None,
        }
    }

    /// Input for a scoring, double or treble round.
    #[must_use]
    pub const fn points(points: u32) -> Self {
        Self {
            hits: None,
            points: Some(points),
            total_score: None,
        }
    }

    /// Input for a target-score round.
    #[must_use]
    pub const fn total_score(total: u32) -> Self {
        Self {
            hits: None,
            points: None,
            total_score: Some(total),
        }
    }
}

/// A player's recorded entry in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundEntry {
    /// What was submitted.
    pub input: RoundInput,
    /// Running total after this round.
    pub score: u32,
}

/// One round of the template with every player's entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalveItRound {
    /// 1-based round number.
    pub round_number: u32,
    /// Scoring rule.
    pub round_type: RoundType,
    /// Target, for number, bull and target-score rounds.
    pub target: Option<RoundTarget>,
    /// Entries by player id.
    pub player_scores: BTreeMap<PlayerId, RoundEntry>,
}

impl HalveItRound {
    fn new(round_number: u32, round_type: RoundType, target: Option<RoundTarget>) -> Self {
        Self {
            round_number,
            round_type,
            target,
            player_scores: BTreeMap::new(),
        }
    }

    /// Returns whether `player` has an entry in this round.
    #[must_use]
    pub fn has_entry(&self, player: PlayerId) -> bool {
        self.player_scores.contains_key(&player)
    }
}

/// A completed round in a player's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRound {
    /// Index of the round in the template.
    pub round_index: usize,
    /// Running total after the round.
    pub score: u32,
}

/// A player in a Halve-It game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalveItPlayer {
    /// Player id.
    pub id: PlayerId,
    /// Display name.
    pub name: String,
    /// Current running total.
    pub total_score: u32,
    /// Completed rounds in template order.
    pub rounds: Vec<PlayerRound>,
    /// Seat assigned at game start. Never changes.
    pub order_index: usize,
}

/// Location of the most recently committed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastScore {
    /// Player who made the entry.
    pub player_id: PlayerId,
    /// Round the entry belongs to.
    pub round_index: usize,
}

/// Snapshot of a live Halve-It game.
///
/// `players` stays in seat order for the whole game; rank by score on a
/// copy via [`standings`](Self::standings).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HalveItGameState {
    /// Round template in use.
    pub mode: HalveItMode,
    /// Players in seat order.
    pub players: Vec<HalveItPlayer>,
    /// Seat of the player to throw.
    pub current_player_index: usize,
    /// Round being played.
    pub current_round_index: usize,
    /// Whether every player has an entry in every round.
    pub is_game_finished: bool,
    /// Rounds of the template.
    pub rounds: Vec<HalveItRound>,
    /// Most recent entry, used by undo.
    pub last_score: Option<LastScore>,
}

impl HalveItGameState {
    /// Returns the player whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> Option<&HalveItPlayer> {
        self.players.get(self.current_player_index)
    }

    /// Returns the round being played.
    #[must_use]
    pub fn current_round(&self) -> Option<&HalveItRound> {
        self.rounds.get(self.current_round_index)
    }

    /// Returns the player with the given id.
    #[must_use]
    pub fn player(&self, id: PlayerId) -> Option<&HalveItPlayer> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Returns a copy of the players ranked by total, highest first. Seats
    /// break ties.
    #[must_use]
    pub fn standings(&self) -> Vec<HalveItPlayer> {
        let mut ranked = self.players.clone();
        ranked.sort_by(|a, b| {
            b.total_score
                .cmp(&a.total_score)
                .then(a.order_index.cmp(&b.order_index))
        });
        ranked
    }
}

/// Builds the round list for a mode.
#[must_use]
pub fn template(mode: HalveItMode) -> Vec<HalveItRound> {
    use RoundTarget::{Bull, Number, Score};
    use RoundType::{Double, Number as Num, Scoring, TargetScore, Treble};

    let layout: &[(RoundType, Option<RoundTarget>)] = match mode {
        HalveItMode::Default => &[
            (Scoring, None),
            (Num, Some(Number(15))),
            (Num, Some(Number(16))),
            (Double, None),
            (Num, Some(Number(17))),
            (Num, Some(Number(18))),
            (Treble, None),
            (Num, Some(Number(19))),
            (Num, Some(Number(20))),
            (RoundType::Bull, Some(Bull)),
        ],
        HalveItMode::FortyOne => &[
            (Num, Some(Number(19))),
            (Num, Some(Number(18))),
            (Double, None),
            (Num, Some(Number(17))),
            (TargetScore, Some(Score(TARGET_SCORE))),
            (Treble, None),
            (Num, Some(Number(20))),
            (RoundType::Bull, Some(Bull)),
        ],
    };

    layout
        .iter()
        .zip(1..)
        .map(|(&(round_type, target), number)| HalveItRound::new(number, round_type, target))
        .collect()
}
