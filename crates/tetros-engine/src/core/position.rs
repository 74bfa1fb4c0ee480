use serde::{Deserialize, Serialize};

/// Offsets of the four edge-sharing neighbors.
pub const ORTHOGONAL_OFFSETS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Offsets of the four corner-sharing neighbors.
pub const DIAGONAL_OFFSETS: [(i32, i32); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// An absolute board coordinate.
///
/// Coordinates are signed so that translating a piece near the edge never
/// overflows; [`Board`](super::Board) treats anything outside the grid as
/// off-board rather than panicking.
///
/// - (0, 0) is the top-left cell
/// - X increases rightward (columns)
/// - Y increases downward (rows)
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Deserialize,
    Serialize,
    derive_more::Display,
)]
#[display("({x}, {y})")]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translates the position, saturating at the `i32` range.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }

    pub fn orthogonal_neighbors(self) -> impl Iterator<Item = Self> {
        ORTHOGONAL_OFFSETS
            .into_iter()
            .map(move |(dx, dy)| self.offset(dx, dy))
    }

    pub fn diagonal_neighbors(self) -> impl Iterator<Item = Self> {
        DIAGONAL_OFFSETS
            .into_iter()
            .map(move |(dx, dy)| self.offset(dx, dy))
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Width and height of a board, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, derive_more::Display)]
#[display("{width}x{height}")]
pub struct BoardSize {
    pub width: usize,
    pub height: usize,
}

impl BoardSize {
    #[must_use]
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub const fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    #[must_use]
    pub const fn area(self) -> usize {
        self.width * self.height
    }

    /// The four corner cells, in the order the default game assigns them
    /// before shuffling: top-left, bottom-right, bottom-left, top-right.
    #[must_use]
    pub fn corners(self) -> [Position; 4] {
        let x_max = i32::try_from(self.width.saturating_sub(1)).unwrap_or(i32::MAX);
        let y_max = i32::try_from(self.height.saturating_sub(1)).unwrap_or(i32::MAX);
        [
            Position::new(0, 0),
            Position::new(x_max, y_max),
            Position::new(0, y_max),
            Position::new(x_max, 0),
        ]
    }
}

impl Default for BoardSize {
    fn default() -> Self {
        Self::square(20)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neighbors() {
        let pos = Position::new(3, 5);
        let orthogonal: Vec<_> = pos.orthogonal_neighbors().collect();
        assert_eq!(
            orthogonal,
            vec![
                Position::new(2, 5),
                Position::new(4, 5),
                Position::new(3, 4),
                Position::new(3, 6),
            ]
        );
        let diagonal: Vec<_> = pos.diagonal_neighbors().collect();
        assert_eq!(
            diagonal,
            vec![
                Position::new(2, 4),
                Position::new(2, 6),
                Position::new(4, 4),
                Position::new(4, 6),
            ]
        );
    }

    #[test]
    fn test_board_size_corners() {
        let corners = BoardSize::new(20, 14).corners();
        assert_eq!(
            corners,
            [
                Position::new(0, 0),
                Position::new(19, 13),
                Position::new(0, 13),
                Position::new(19, 0),
            ]
        );
        assert_eq!(BoardSize::square(1).corners(), [Position::new(0, 0); 4]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(-1, 4).to_string(), "(-1, 4)");
        assert_eq!(BoardSize::new(20, 10).to_string(), "20x10");
    }
}
