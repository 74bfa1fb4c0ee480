use log::info;
use rand::Rng as _;
use serde::{Deserialize, Serialize};
use tetros_engine::{BoardSize, Color, GameSeed, GameSetupError, PieceCatalog, Position, Strategy};

use crate::{
    simulation::{SimulationParams, run},
    totals::{PlayerAverages, PlayerTotals},
};

/// Seats per league table.
pub const TABLE_SIZE: usize = 4;

/// A named strategy taking part in a league.
#[derive(Debug, Clone)]
pub struct LeagueEntrant<S> {
    pub name: String,
    pub strategy: S,
}

impl<S> LeagueEntrant<S> {
    pub fn new(name: impl Into<String>, strategy: S) -> Self {
        Self {
            name: name.into(),
            strategy,
        }
    }
}

/// Table setup shared by every line-up of a league.
#[derive(Debug, Clone)]
pub struct LeagueParams {
    pub board_size: BoardSize,
    pub starting_positions: Option<Vec<Position>>,
    pub catalog: PieceCatalog,
    pub games_per_worker: usize,
    pub workers: usize,
}

impl Default for LeagueParams {
    fn default() -> Self {
        Self {
            board_size: BoardSize::default(),
            starting_positions: None,
            catalog: PieceCatalog::standard(),
            games_per_worker: 1,
            workers: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueStanding {
    pub name: String,
    pub totals: PlayerTotals,
    pub averages: PlayerAverages,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeagueSummary {
    pub seed: GameSeed,
    /// Number of distinct line-ups played.
    pub line_ups: usize,
    /// One entry per entrant, best average points first.
    pub standings: Vec<LeagueStanding>,
}

/// Plays every [`TABLE_SIZE`]-entrant line-up drawn from `entrants`.
///
/// Seats are colored in [`Color::DEFAULT_PLAYERS`] order within each line-up
/// (the game shuffles seating anyway). With fewer than [`TABLE_SIZE`]
/// entrants a single line-up seats all of them; with none,
/// [`GameSetupError::NoPlayers`] is returned. Each entrant's averages are
/// taken over the games it actually played.
pub fn league<S>(
    entrants: &[LeagueEntrant<S>],
    params: &LeagueParams,
    seed: GameSeed,
) -> Result<LeagueSummary, GameSetupError>
where
    S: Strategy + Clone + Sync,
{
    if entrants.is_empty() {
        return Err(GameSetupError::NoPlayers);
    }
    let table_size = entrants.len().min(TABLE_SIZE);
    let line_ups = combinations(entrants.len(), table_size);
    let mut rng = seed.rng();
    let mut totals = vec![PlayerTotals::default(); entrants.len()];

    for line_up in &line_ups {
        let roster = line_up
            .iter()
            .zip(Color::DEFAULT_PLAYERS)
            .map(|(&i, color)| (color, entrants[i].strategy.clone()))
            .collect();
        let simulation = SimulationParams {
            board_size: params.board_size,
            starting_positions: params.starting_positions.clone(),
            catalog: params.catalog.clone(),
            roster,
            games_per_worker: params.games_per_worker,
            workers: params.workers,
        };
        let summary = run(&simulation, rng.random())?;

        let names: Vec<&str> = line_up.iter().map(|&i| entrants[i].name.as_str()).collect();
        info!("line-up [{}] done", names.join(", "));
        for (&i, color) in line_up.iter().zip(Color::DEFAULT_PLAYERS) {
            if let Some(player) = summary.totals.players.get(&color) {
                totals[i].merge(player);
            }
        }
    }

    let mut standings: Vec<_> = entrants
        .iter()
        .zip(totals)
        .map(|(entrant, totals)| LeagueStanding {
            name: entrant.name.clone(),
            averages: totals.average(),
            totals,
        })
        .collect();
    standings.sort_by(|a, b| b.averages.points.total_cmp(&a.averages.points));

    Ok(LeagueSummary {
        seed,
        line_ups: line_ups.len(),
        standings,
    })
}

/// All `k`-element subsets of `0..n` as ascending index lists, in lexicographic order.
#[must_use]
pub fn combinations(n: usize, k: usize) -> Vec<Vec<usize>> {
    if k > n {
        return vec![];
    }
    let mut result = vec![];
    let mut indices: Vec<usize> = (0..k).collect();
    loop {
        result.push(indices.clone());
        // Rightmost index that can still move up.
        let Some(i) = (0..k).rev().find(|&i| indices[i] < n - k + i) else {
            return result;
        };
        indices[i] += 1;
        let start = indices[i];
        for (offset, slot) in indices[i + 1..].iter_mut().enumerate() {
            *slot = start + offset + 1;
        }
    }
}
