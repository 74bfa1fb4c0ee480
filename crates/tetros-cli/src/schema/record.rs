use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tetros_engine::{BoardSize, GameSeed, ScoreTable};
use tetros_simulation::{LeagueSummary, SimulationSummary};

use super::config::{EntrantConfig, SeatConfig};

/// Result of a single game.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRecord {
    /// Timestamp when the game was played (ISO 8601 format)
    pub recorded_at: DateTime<Utc>,
    pub seed: GameSeed,
    pub board_size: BoardSize,
    pub seats: Vec<SeatConfig>,
    pub result: ScoreTable,
    /// Final board, one string per row
    pub board: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub recorded_at: DateTime<Utc>,
    pub board_size: BoardSize,
    pub seats: Vec<SeatConfig>,
    pub workers: usize,
    pub games_per_worker: usize,
    pub summary: SimulationSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeagueRecord {
    pub recorded_at: DateTime<Utc>,
    pub board_size: BoardSize,
    pub entrants: Vec<EntrantConfig>,
    pub workers: usize,
    pub games_per_worker: usize,
    pub summary: LeagueSummary,
}
