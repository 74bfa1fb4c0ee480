use serde::{Deserialize, Serialize};

use crate::core::{Board, Color, Position};

use super::player::PlayerState;

/// Points awarded for placing every piece.
pub const EMPTY_HAND_BONUS: i32 = 15;

/// Extra points when the last piece placed was a single cell.
pub const MONOMINO_FINISH_BONUS: i32 = 5;

/// End-of-game result for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub color: Color,
    /// Bounding box of the player's cells as a percentage of the board; 100 with no cells.
    pub coverage: f64,
    /// Occupied cells (any color) inside that bounding box, as a percentage of the box.
    pub density: f64,
    /// Exclusive territory. Not scored; always 0.
    pub territory: u32,
    pub squares_left: usize,
    pub points: i32,
    pub placed_pieces: usize,
    pub win: bool,
}

impl PlayerScore {
    #[must_use]
    pub fn compute(board: &Board, player: &PlayerState) -> Self {
        let squares_left = player.squares_left();
        let mut points = -i32::try_from(squares_left).unwrap_or(i32::MAX);
        if player.has_emptied_hand() {
            points += EMPTY_HAND_BONUS;
            if player.final_piece().is_some_and(|piece| piece.size() == 1) {
                points += MONOMINO_FINISH_BONUS;
            }
        }

        // Without cells the box runs from the far corner back to the origin,
        // which covers the whole board and contains nothing.
        let (min, max) = board
            .bounding_box(player.color())
            .unwrap_or_else(|| (board_extent(board), Position::new(0, 0)));
        let coverage = coverage(board, min, max);
        let density = density(board, min, max);

        Self {
            color: player.color(),
            coverage,
            density,
            territory: territory(board, player.color()),
            squares_left,
            points,
            placed_pieces: player.placed_pieces(),
            win: false,
        }
    }
}

/// Final standings, sorted by points from best to worst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreTable {
    pub rounds: usize,
    pub scores: Vec<PlayerScore>,
}

impl ScoreTable {
    /// Scores every player against the final board.
    ///
    /// Everyone sharing the highest point total is marked as a winner. Ties
    /// keep the order in which players were given.
    pub fn compute<'a, I>(board: &Board, players: I, rounds: usize) -> Self
    where
        I: IntoIterator<Item = &'a PlayerState>,
    {
        let mut scores: Vec<_> = players
            .into_iter()
            .map(|player| PlayerScore::compute(board, player))
            .collect();
        if let Some(best) = scores.iter().map(|s| s.points).max() {
            for score in &mut scores {
                score.win = score.points == best;
            }
        }
        scores.sort_by(|a, b| b.points.cmp(&a.points));
        Self { rounds, scores }
    }

    pub fn winners(&self) -> impl Iterator<Item = &PlayerScore> {
        self.scores.iter().filter(|s| s.win)
    }

    #[must_use]
    pub fn get(&self, color: Color) -> Option<&PlayerScore> {
        self.scores.iter().find(|s| s.color == color)
    }
}

// Widths are `max - min`, so a single row or column of cells covers nothing.
fn box_area(min: Position, max: Position) -> i64 {
    i64::from(max.x - min.x) * i64::from(max.y - min.y)
}

#[expect(clippy::cast_precision_loss)]
fn coverage(board: &Board, min: Position, max: Position) -> f64 {
    let board_area = board.size().area() as f64;
    round2(box_area(min, max) as f64 / board_area * 100.0)
}

#[expect(clippy::cast_precision_loss)]
fn density(board: &Board, min: Position, max: Position) -> f64 {
    let area = box_area(min, max);
    if area == 0 {
        return 0.0;
    }
    let filled = board.occupied_in(min, max);
    round2(filled as f64 / area as f64 * 100.0)
}

/// One past the last cell on both axes.
fn board_extent(board: &Board) -> Position {
    let size = board.size();
    Position::new(
        i32::try_from(size.width).unwrap_or(i32::MAX),
        i32::try_from(size.height).unwrap_or(i32::MAX),
    )
}

fn territory(_board: &Board, _color: Color) -> u32 {
    0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
