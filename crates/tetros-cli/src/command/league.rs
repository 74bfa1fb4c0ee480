use std::path::PathBuf;

use chrono::Utc;
use log::info;
use tetros_engine::{GameSeed, PieceCatalog};
use tetros_simulation::{LeagueEntrant, LeagueParams};

use crate::{
    schema::{config::LeagueConfig, record::LeagueRecord},
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct LeagueArg {
    /// League configuration file (JSON)
    config: PathBuf,
    /// Seed as 32 hex digits; random when omitted
    #[arg(long)]
    seed: Option<GameSeed>,
    /// Number of worker threads; one per CPU when omitted
    #[arg(long)]
    workers: Option<usize>,
    /// Games played by each worker for every line-up
    #[arg(long, default_value_t = 5)]
    games_per_worker: usize,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &LeagueArg) -> anyhow::Result<()> {
    let LeagueArg {
        config: config_path,
        seed,
        workers,
        games_per_worker,
        output,
    } = arg;
    let config: LeagueConfig = util::read_json_file("league config", config_path)?;
    let base_dir = util::config_dir(config_path);
    let seed = seed.unwrap_or_else(rand::random);
    let workers = workers.unwrap_or_else(util::default_workers);
    info!("seed {seed}, {workers} workers, {games_per_worker} games per worker and line-up");

    let entrants = config
        .entrants
        .iter()
        .map(|entrant| {
            let strategy = entrant.strategy.build(base_dir, config.board_size)?;
            Ok(LeagueEntrant::new(entrant.name.clone(), strategy))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    let params = LeagueParams {
        board_size: config.board_size,
        starting_positions: config.starting_positions.clone(),
        catalog: PieceCatalog::standard(),
        games_per_worker: *games_per_worker,
        workers,
    };

    eprintln!(
        "Running a league of {} entrants on {workers} workers with seed {seed}...",
        entrants.len()
    );
    let summary = tetros_simulation::league(&entrants, &params, seed)?;
    for (rank, standing) in summary.standings.iter().enumerate() {
        eprintln!(
            "  #{:<2} {:<20} {:>6.2} points, win rate {:>5.1}% over {} games",
            rank + 1,
            standing.name,
            standing.averages.points,
            standing.averages.win_rate * 100.0,
            standing.averages.games
        );
    }

    let record = LeagueRecord {
        recorded_at: Utc::now(),
        board_size: config.board_size,
        entrants: config.entrants,
        workers,
        games_per_worker: *games_per_worker,
        summary,
    };
    Output::save_json(&record, output.clone())
}
