use tetros_engine::{Board, GameRng, Move, PlayerState, Strategy};

use crate::{
    heatmap::Heatmap,
    move_generator::enumerate_moves,
    move_selector::{TieBreak, select_by_heatmap},
};

/// Always scores moves against the same heatmap.
#[derive(Debug, Clone)]
pub struct StaticHeatmapStrategy {
    heatmap: Heatmap,
    tie_break: TieBreak,
}

impl StaticHeatmapStrategy {
    #[must_use]
    pub fn new(heatmap: Heatmap, tie_break: TieBreak) -> Self {
        Self { heatmap, tie_break }
    }

    #[must_use]
    pub fn heatmap(&self) -> &Heatmap {
        &self.heatmap
    }
}

impl Strategy for StaticHeatmapStrategy {
    fn select_move(
        &mut self,
        state: &mut PlayerState,
        board: &Board,
        rng: &mut GameRng,
    ) -> Option<Move> {
        select_heatmap_move(&self.heatmap, self.tie_break, state, board, rng)
    }
}

/// Shared selection step of every heatmap strategy.
///
/// Enumerates all moves for the hand and returns the best one under
/// `heatmap`. Knocks when the player has no anchor or no fitting move.
pub(crate) fn select_heatmap_move(
    heatmap: &Heatmap,
    tie_break: TieBreak,
    state: &mut PlayerState,
    board: &Board,
    rng: &mut GameRng,
) -> Option<Move> {
    if state.is_knocked() {
        return None;
    }
    let moves = enumerate_moves(board, state.hand());
    let selected = select_by_heatmap(heatmap, moves, tie_break, rng);
    if selected.is_none() {
        state.knock();
    }
    selected
}
