use tetros_engine::{Board, BoardSize, Color, GameRng, Move, PlayerState, Strategy};

use crate::{heatmap::Heatmap, move_selector::TieBreak};

use super::static_heatmap::select_heatmap_move;

/// Weight added per edge-sharing neighbor of the player's own color.
pub const ORTHOGONAL_WEIGHT: i32 = 1;

/// Weight added per corner-sharing neighbor of the player's own color.
pub const DIAGONAL_WEIGHT: i32 = 2;

/// Rebuilds its heatmap from the board before every move.
#[derive(Debug, Clone)]
pub struct DynamicHeatmapStrategy {
    heatmap: Heatmap,
    tie_break: TieBreak,
}

impl DynamicHeatmapStrategy {
    #[must_use]
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            heatmap: Heatmap::filled(BoardSize::new(0, 0), 0),
            tie_break,
        }
    }

    /// The map used for the most recent move.
    #[must_use]
    pub fn heatmap(&self) -> &Heatmap {
        &self.heatmap
    }

    pub fn update_heatmap(&mut self, color: Color, board: &Board) {
        self.heatmap = neighbor_heatmap(board, color);
    }
}

impl Strategy for DynamicHeatmapStrategy {
    fn select_move(
        &mut self,
        state: &mut PlayerState,
        board: &Board,
        rng: &mut GameRng,
    ) -> Option<Move> {
        self.update_heatmap(state.color(), board);
        select_heatmap_move(&self.heatmap, self.tie_break, state, board, rng)
    }
}

/// Weights each cell by how many cells of `color` surround it.
///
/// Every cell gets [`ORTHOGONAL_WEIGHT`] per own edge neighbor and
/// [`DIAGONAL_WEIGHT`] per own corner neighbor. The map is then shifted so its
/// minimum is 0, and if that leaves it all zeros every cell is raised to 1.
#[must_use]
pub fn neighbor_heatmap(board: &Board, color: Color) -> Heatmap {
    let mut heatmap = Heatmap::filled(board.size(), 0);
    for pos in board.positions() {
        let orthogonal = pos
            .orthogonal_neighbors()
            .filter(|n| board.occupant(*n) == Some(color))
            .count();
        let diagonal = pos
            .diagonal_neighbors()
            .filter(|n| board.occupant(*n) == Some(color))
            .count();
        let orthogonal = i32::try_from(orthogonal).unwrap_or(0);
        let diagonal = i32::try_from(diagonal).unwrap_or(0);
        heatmap.set(pos, orthogonal * ORTHOGONAL_WEIGHT + diagonal * DIAGONAL_WEIGHT);
    }

    let (min, max) = heatmap.min_max();
    heatmap.increment(-min);
    if min == max {
        heatmap.increment(1);
    }
    heatmap
}
