use std::{collections::BTreeMap, panic, thread};

use log::{debug, info};
use rand::Rng as _;
use serde::{Deserialize, Serialize};
use tetros_engine::{
    BoardSize, Color, Game, GameSeed, GameSetupError, PieceCatalog, Player, PlayerState, Position,
    Strategy,
};

use crate::totals::{PlayerAverages, ScoreTotals};

/// What to play and how much of it.
#[derive(Debug, Clone)]
pub struct SimulationParams<S> {
    pub board_size: BoardSize,
    /// Starting cells; the board corners when `None`.
    pub starting_positions: Option<Vec<Position>>,
    pub catalog: PieceCatalog,
    /// One entry per seat. Every game starts from a fresh clone.
    pub roster: Vec<(Color, S)>,
    pub games_per_worker: usize,
    pub workers: usize,
}

impl<S> SimulationParams<S> {
    #[must_use]
    pub fn new(roster: Vec<(Color, S)>) -> Self {
        Self {
            board_size: BoardSize::default(),
            starting_positions: None,
            catalog: PieceCatalog::standard(),
            roster,
            games_per_worker: 1,
            workers: 1,
        }
    }

    #[must_use]
    pub fn total_games(&self) -> usize {
        self.games_per_worker * self.workers
    }
}

/// Merged result of a simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSummary {
    pub seed: GameSeed,
    pub average_rounds: f64,
    pub totals: ScoreTotals,
    pub averages: BTreeMap<Color, PlayerAverages>,
}

impl SimulationSummary {
    fn new(seed: GameSeed, totals: ScoreTotals) -> Self {
        Self {
            seed,
            average_rounds: totals.average_rounds(),
            averages: totals.averages(),
            totals,
        }
    }
}

impl<S> SimulationParams<S>
where
    S: Strategy + Clone,
{
    fn new_game(&self, seed: GameSeed) -> Result<Game<S>, GameSetupError> {
        let players = self
            .roster
            .iter()
            .map(|(color, strategy)| {
                Player::new(
                    PlayerState::new(*color, self.catalog.hand(*color)),
                    strategy.clone(),
                )
            })
            .collect();
        Game::new(
            self.board_size,
            players,
            self.starting_positions.as_deref(),
            seed,
        )
    }

    /// Plays `games` games, drawing each game's seed from `worker_seed`.
    fn play_games(&self, worker_seed: GameSeed, games: usize) -> Result<ScoreTotals, GameSetupError> {
        let mut rng = worker_seed.rng();
        let mut totals = ScoreTotals::default();
        for _ in 0..games {
            let seed: GameSeed = rng.random();
            let mut game = self.new_game(seed)?;
            let table = game.play();
            debug!("game {seed} finished in {} rounds", table.rounds);
            totals.add_table(&table);
        }
        Ok(totals)
    }
}

/// Plays `params.workers * params.games_per_worker` games in parallel.
///
/// Each worker gets its own seed drawn from `seed`, so the summary is the
/// same for the same parameters regardless of thread scheduling. A setup
/// error in any game (bad starting positions, duplicate colors...) aborts the
/// run.
///
/// # Example
///
/// ```
/// use tetros_engine::{BoardSize, Color, GameSeed};
/// use tetros_evaluator::strategy::{PlayerKind, RandomStrategy};
/// use tetros_simulation::{SimulationParams, run};
///
/// let roster = Color::DEFAULT_PLAYERS
///     .into_iter()
///     .map(|color| (color, PlayerKind::from(RandomStrategy::new())))
///     .collect();
/// let mut params = SimulationParams::new(roster);
/// params.board_size = BoardSize::square(10);
/// params.workers = 2;
/// params.games_per_worker = 2;
///
/// let summary = run(&params, GameSeed::from_u64(1)).unwrap();
/// assert_eq!(summary.totals.games, 4);
/// assert_eq!(summary.averages.len(), 4);
/// ```
pub fn run<S>(params: &SimulationParams<S>, seed: GameSeed) -> Result<SimulationSummary, GameSetupError>
where
    S: Strategy + Clone + Sync,
{
    let mut rng = seed.rng();
    let worker_seeds: Vec<GameSeed> = (0..params.workers).map(|_| rng.random()).collect();

    let results = thread::scope(|s| {
        let handles: Vec<_> = worker_seeds
            .iter()
            .map(|&worker_seed| s.spawn(move || params.play_games(worker_seed, params.games_per_worker)))
            .collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|e| panic::resume_unwind(e)))
            .collect::<Vec<_>>()
    });

    let mut totals = ScoreTotals::default();
    for result in results {
        totals.merge(&result?);
    }
    info!(
        "simulated {} games with seed {seed}, {:.1} rounds on average",
        totals.games,
        totals.average_rounds()
    );
    Ok(SimulationSummary::new(seed, totals))
}
