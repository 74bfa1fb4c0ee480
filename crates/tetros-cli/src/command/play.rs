use chrono::Utc;
use log::info;
use tetros_engine::{Game, PieceCatalog, Player, PlayerState};

use crate::{command::TableArg, schema::record::GameRecord, util::Output};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    #[clap(flatten)]
    table: TableArg,
    /// Print the final board to stderr
    #[arg(long, default_value_t = false)]
    show_board: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { table, show_board } = arg;
    let (config, base_dir) = table.load_config()?;
    let seed = table.seed();
    let catalog = PieceCatalog::standard();
    info!("seed {seed}, {} seats", config.players.len());

    let players = config
        .roster(&base_dir)?
        .into_iter()
        .map(|(color, kind)| Player::new(PlayerState::new(color, catalog.hand(color)), kind))
        .collect();
    let mut game = Game::new(
        config.board_size,
        players,
        config.starting_positions.as_deref(),
        seed,
    )?;

    eprintln!("Playing {} game with seed {seed}...", config.board_size);
    let result = game.play();
    for score in &result.scores {
        eprintln!(
            "  {:<8} {:>4} points, {:>2} squares left{}",
            score.color.to_string(),
            score.points,
            score.squares_left,
            if score.win { "  (winner)" } else { "" }
        );
    }
    let board = game.board().to_ascii();
    if *show_board {
        eprintln!("{board}");
    }

    let record = GameRecord {
        recorded_at: Utc::now(),
        seed,
        board_size: config.board_size,
        seats: config.players,
        result,
        board: board.lines().map(str::to_owned).collect(),
    };
    Output::save_json(&record, table.output.clone())
}
