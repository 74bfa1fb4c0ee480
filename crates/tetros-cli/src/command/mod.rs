use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tetros_engine::GameSeed;

use crate::{
    schema::config::{BuiltinStrategy, GameConfig, StrategyConfig},
    util,
};

use self::{league::LeagueArg, play::PlayArg, simulate::SimulateArg};

mod league;
mod play;
mod simulate;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play one game and print the final scores
    Play(#[clap(flatten)] PlayArg),
    /// Play many games of one table in parallel
    Simulate(#[clap(flatten)] SimulateArg),
    /// Play every four-player line-up of a larger field
    League(#[clap(flatten)] LeagueArg),
}

/// Options shared by the modes that play a single table.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct TableArg {
    /// Game configuration file (JSON); four default players when omitted
    #[arg(long)]
    config: Option<PathBuf>,
    /// Strategy for every seat when no configuration file is given
    #[arg(long, default_value = "dynamic")]
    strategy: BuiltinStrategy,
    /// Seed as 32 hex digits; random when omitted
    #[arg(long)]
    seed: Option<GameSeed>,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

impl TableArg {
    fn load_config(&self) -> anyhow::Result<(GameConfig, PathBuf)> {
        match &self.config {
            Some(path) => {
                let config = util::read_json_file("game config", path)?;
                Ok((config, util::config_dir(path).to_path_buf()))
            }
            None => {
                let strategy = StrategyConfig::from(self.strategy);
                Ok((GameConfig::with_default_players(&strategy), Path::new(".").to_path_buf()))
            }
        }
    }

    fn seed(&self) -> GameSeed {
        self.seed.unwrap_or_else(rand::random)
    }
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::Simulate(arg) => simulate::run(&arg)?,
        Mode::League(arg) => league::run(&arg)?,
    }
    Ok(())
}
