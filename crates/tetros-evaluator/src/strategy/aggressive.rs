use tetros_engine::{Board, Color, GameRng, Move, PlayerState, Position, Strategy};

use crate::{heatmap::Heatmap, move_selector::TieBreak};

use super::{static_heatmap::select_heatmap_move, switcher::HeatmapSchedule};

pub const DEFAULT_OPPONENT_PENALTY: i32 = 2;
pub const DEFAULT_OPPONENT_ANCHOR_BONUS: i32 = 3;

/// Adjusts a scheduled heatmap every turn to crowd opponents out.
///
/// Starting from the schedule's active map:
///
/// 1. cells next to an opponent cell (edge or corner) lose `opponent_penalty`, floored at 0
/// 2. cells that anchor some opponent but not this player gain `opponent_anchor_bonus`
/// 3. cells sharing an edge with this player's own cells are set to 0
#[derive(Debug, Clone)]
pub struct AggressiveStrategy {
    schedule: HeatmapSchedule,
    opponent_penalty: i32,
    opponent_anchor_bonus: i32,
    tie_break: TieBreak,
    heatmap: Heatmap,
}

impl AggressiveStrategy {
    #[must_use]
    pub fn new(
        schedule: HeatmapSchedule,
        opponent_penalty: i32,
        opponent_anchor_bonus: i32,
        tie_break: TieBreak,
    ) -> Self {
        let heatmap = schedule.active().clone();
        Self {
            schedule,
            opponent_penalty,
            opponent_anchor_bonus,
            tie_break,
            heatmap,
        }
    }

    /// The adjusted map from the most recent update.
    #[must_use]
    pub fn heatmap(&self) -> &Heatmap {
        &self.heatmap
    }

    /// Recomputes the adjusted heatmap for `color` on `board`.
    pub fn update_heatmap(&mut self, color: Color, placed_pieces: usize, board: &Board) {
        self.schedule.advance(placed_pieces);
        let mut heatmap = self.schedule.active().clone();
        let opponents: Vec<Color> = board.colors().filter(|c| *c != color).collect();

        for pos in board.positions() {
            let Some(weight) = heatmap.get(pos) else {
                continue;
            };
            let mut weight = weight;
            if touches_any(board, pos, &opponents) {
                weight = weight.saturating_sub(self.opponent_penalty).max(0);
            }
            let opponent_anchor = opponents.iter().any(|c| board.is_anchor_for(pos, *c));
            if opponent_anchor && !board.is_anchor_for(pos, color) {
                weight = weight.saturating_add(self.opponent_anchor_bonus);
            }
            if board.touches_orthogonally(pos, color) {
                weight = 0;
            }
            heatmap.set(pos, weight);
        }
        self.heatmap = heatmap;
    }
}

fn touches_any(board: &Board, pos: Position, colors: &[Color]) -> bool {
    colors
        .iter()
        .any(|c| board.touches_orthogonally(pos, *c) || board.touches_diagonally(pos, *c))
}

impl Strategy for AggressiveStrategy {
    fn select_move(
        &mut self,
        state: &mut PlayerState,
        board: &Board,
        rng: &mut GameRng,
    ) -> Option<Move> {
        self.update_heatmap(state.color(), state.placed_pieces(), board);
        select_heatmap_move(&self.heatmap, self.tie_break, state, board, rng)
    }
}
