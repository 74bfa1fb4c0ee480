//! The closed set of scripted players.
//!
//! | Variant | Move choice |
//! |---|---|
//! | [`RandomStrategy`] | random piece, orientation and anchor; knocks after repeated misses |
//! | [`ExhaustiveRandomStrategy`] | random, then a systematic search before giving up |
//! | [`StaticHeatmapStrategy`] | best move under a fixed heatmap |
//! | [`DynamicHeatmapStrategy`] | best move under a map rebuilt from own-color neighbors |
//! | [`HeatmapSwitcherStrategy`] | best move under a map chosen by pieces placed |
//! | [`AggressiveStrategy`] | switcher map adjusted toward opponents each turn |
//!
//! [`PlayerKind`] wraps them all so one game can seat any mix.

use tetros_engine::{Board, GameRng, Move, PlayerState, Strategy};

pub use self::{
    aggressive::*, dynamic_heatmap::*, exhaustive_random::*, random::*, static_heatmap::*,
    switcher::*,
};

mod aggressive;
mod dynamic_heatmap;
mod exhaustive_random;
mod random;
mod static_heatmap;
mod switcher;

#[derive(Debug, Clone, derive_more::From)]
pub enum PlayerKind {
    Random(RandomStrategy),
    ExhaustiveRandom(ExhaustiveRandomStrategy),
    StaticHeatmap(StaticHeatmapStrategy),
    DynamicHeatmap(DynamicHeatmapStrategy),
    HeatmapSwitcher(HeatmapSwitcherStrategy),
    Aggressive(AggressiveStrategy),
}

impl PlayerKind {
    /// Short name used in reports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PlayerKind::Random(_) => "random",
            PlayerKind::ExhaustiveRandom(_) => "exhaustive_random",
            PlayerKind::StaticHeatmap(_) => "static_heatmap",
            PlayerKind::DynamicHeatmap(_) => "dynamic_heatmap",
            PlayerKind::HeatmapSwitcher(_) => "heatmap_switcher",
            PlayerKind::Aggressive(_) => "aggressive",
        }
    }
}

impl Strategy for PlayerKind {
    fn select_move(
        &mut self,
        state: &mut PlayerState,
        board: &Board,
        rng: &mut GameRng,
    ) -> Option<Move> {
        match self {
            PlayerKind::Random(s) => s.select_move(state, board, rng),
            PlayerKind::ExhaustiveRandom(s) => s.select_move(state, board, rng),
            PlayerKind::StaticHeatmap(s) => s.select_move(state, board, rng),
            PlayerKind::DynamicHeatmap(s) => s.select_move(state, board, rng),
            PlayerKind::HeatmapSwitcher(s) => s.select_move(state, board, rng),
            PlayerKind::Aggressive(s) => s.select_move(state, board, rng),
        }
    }
}
