use chrono::Utc;
use log::info;
use tetros_engine::PieceCatalog;
use tetros_simulation::SimulationParams;

use crate::{
    command::TableArg,
    schema::record::SimulationRecord,
    util::{self, Output},
};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SimulateArg {
    #[clap(flatten)]
    table: TableArg,
    /// Number of worker threads; one per CPU when omitted
    #[arg(long)]
    workers: Option<usize>,
    /// Games played by each worker
    #[arg(long, default_value_t = 10)]
    games_per_worker: usize,
}

pub(crate) fn run(arg: &SimulateArg) -> anyhow::Result<()> {
    let SimulateArg {
        table,
        workers,
        games_per_worker,
    } = arg;
    let (config, base_dir) = table.load_config()?;
    let seed = table.seed();
    let workers = workers.unwrap_or_else(util::default_workers);
    info!("seed {seed}, {workers} workers, {games_per_worker} games per worker");

    let params = SimulationParams {
        board_size: config.board_size,
        starting_positions: config.starting_positions.clone(),
        catalog: PieceCatalog::standard(),
        roster: config.roster(&base_dir)?,
        games_per_worker: *games_per_worker,
        workers,
    };
    eprintln!(
        "Simulating {} games on {workers} workers with seed {seed}...",
        params.total_games()
    );
    let summary = tetros_simulation::run(&params, seed)?;

    for (color, averages) in &summary.averages {
        eprintln!(
            "  {:<8} win rate {:>5.1}%, {:>6.2} points, {:>5.2} squares left",
            color.to_string(),
            averages.win_rate * 100.0,
            averages.points,
            averages.squares_left
        );
    }

    let record = SimulationRecord {
        recorded_at: Utc::now(),
        board_size: config.board_size,
        seats: config.players,
        workers,
        games_per_worker: *games_per_worker,
        summary,
    };
    Output::save_json(&record, table.output.clone())
}
