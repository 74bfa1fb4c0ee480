use arrayvec::ArrayVec;

use crate::EmptyPieceError;

use super::{color::Color, position::Position};

/// Number of orientation combinations tried per piece (4 rotations × 2 flips).
pub const ORIENTATION_COUNT: usize = 8;

/// A polyomino owned by one player.
///
/// The shape is stored as offsets relative to the piece's logical origin.
/// Offsets are mutated in place by [`rotate`](Self::rotate) and
/// [`flip`](Self::flip); the owner and name never change.
///
/// # Example
///
/// ```
/// use tetros_engine::{Color, Piece};
///
/// let mut piece = Piece::new("2", Color::Red, vec![(0, 0), (0, 1)]).unwrap();
/// piece.rotate();
/// assert_eq!(piece.cells(), &[(0, 0), (-1, 0)]);
/// piece.flip();
/// assert_eq!(piece.cells(), &[(0, 0), (1, 0)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    name: String,
    color: Color,
    cells: Vec<(i32, i32)>,
}

impl Piece {
    pub fn new(
        name: impl Into<String>,
        color: Color,
        cells: Vec<(i32, i32)>,
    ) -> Result<Self, EmptyPieceError> {
        let name = name.into();
        if cells.is_empty() {
            return Err(EmptyPieceError { name });
        }
        Ok(Self { name, color, cells })
    }

    /// Builds a piece from cells already known to be non-empty.
    pub(crate) fn from_parts(name: String, color: Color, cells: Vec<(i32, i32)>) -> Self {
        debug_assert!(!cells.is_empty());
        Self { name, color, cells }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Relative offsets in their current orientation.
    #[must_use]
    pub fn cells(&self) -> &[(i32, i32)] {
        &self.cells
    }

    /// Number of cells the piece covers (always at least one).
    #[must_use]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Rotates the piece 90° clockwise in place.
    ///
    /// Each offset is multiplied as a row vector by `[[0, 1], [-1, 0]]`,
    /// which maps `(x, y)` to `(-y, x)`. Negation saturates, so `i32::MIN`
    /// offsets become `i32::MAX` instead of overflowing.
    pub fn rotate(&mut self) {
        for cell in &mut self.cells {
            let (x, y) = *cell;
            *cell = (y.saturating_neg(), x);
        }
    }

    /// Mirrors the piece about the Y axis in place (`[[-1, 0], [0, 1]]`).
    pub fn flip(&mut self) {
        for cell in &mut self.cells {
            cell.0 = cell.0.saturating_neg();
        }
    }

    #[must_use]
    pub fn rotated(&self) -> Self {
        let mut piece = self.clone();
        piece.rotate();
        piece
    }

    #[must_use]
    pub fn flipped(&self) -> Self {
        let mut piece = self.clone();
        piece.flip();
        piece
    }

    /// Returns a copy of the piece in each of the 8 rotation/flip combinations.
    ///
    /// Symmetric shapes produce repeated orientations; they are not removed.
    /// The piece itself is left untouched.
    #[must_use]
    pub fn orientations(&self) -> ArrayVec<Self, ORIENTATION_COUNT> {
        let mut orientations = ArrayVec::new();
        let mut piece = self.clone();
        for _ in 0..4 {
            piece.rotate();
            piece.flip();
            orientations.push(piece.clone());
            piece.flip();
            orientations.push(piece.clone());
        }
        orientations
    }

    /// Returns the inclusive `(min, max)` corners of the piece's bounding box
    /// in relative coordinates.
    ///
    /// Derived from the current offsets on every call, so it always reflects
    /// the latest transform.
    #[must_use]
    pub fn bounds(&self) -> (Position, Position) {
        let mut min = Position::new(i32::MAX, i32::MAX);
        let mut max = Position::new(i32::MIN, i32::MIN);
        for &(x, y) in &self.cells {
            min.x = min.x.min(x);
            min.y = min.y.min(y);
            max.x = max.x.max(x);
            max.y = max.y.max(y);
        }
        (min, max)
    }

    /// Extent of the bounding box along each axis (`max - min`).
    #[must_use]
    pub fn dimension(&self) -> (i32, i32) {
        let (min, max) = self.bounds();
        (max.x - min.x, max.y - min.y)
    }

    /// Absolute cells covered when the piece's origin is placed at `anchor`.
    pub fn absolute_cells(&self, anchor: Position) -> impl Iterator<Item = Position> + '_ {
        self.cells
            .iter()
            .map(move |&(dx, dy)| anchor.offset(dx, dy))
    }

    /// Offsets as a sorted list, for comparing shapes regardless of cell order.
    #[must_use]
    pub fn sorted_cells(&self) -> Vec<(i32, i32)> {
        let mut cells = self.cells.clone();
        cells.sort_unstable();
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PieceCatalog;

    fn l_piece() -> Piece {
        Piece::new("4l", Color::Blue, vec![(0, 0), (0, 1), (0, 2), (1, 2)]).unwrap()
    }

    #[test]
    fn test_empty_piece_is_rejected() {
        let err = Piece::new("nothing", Color::Red, vec![]).unwrap_err();
        assert_eq!(err.name, "nothing");
        assert_eq!(err.to_string(), "piece \"nothing\" has no cells");
    }

    #[test]
    fn test_rotate_clockwise() {
        let mut piece = l_piece();
        piece.rotate();
        assert_eq!(piece.cells(), &[(0, 0), (-1, 0), (-2, 0), (-2, 1)]);
    }

    #[test]
    fn test_rotation_has_period_four() {
        for original in PieceCatalog::standard().hand(Color::Green) {
            let mut piece = original.clone();
            for _ in 0..4 {
                piece.rotate();
            }
            assert_eq!(
                piece.sorted_cells(),
                original.sorted_cells(),
                "four rotations should restore {}",
                original.name()
            );
        }
    }

    #[test]
    fn test_flip_is_involution() {
        for original in PieceCatalog::standard().hand(Color::Yellow) {
            let mut piece = original.clone();
            piece.flip();
            piece.flip();
            assert_eq!(piece, original, "two flips should restore {}", original.name());
        }
    }

    #[test]
    fn test_orientations_do_not_mutate_source() {
        let piece = l_piece();
        let orientations = piece.orientations();
        assert_eq!(orientations.len(), ORIENTATION_COUNT);
        assert_eq!(piece, l_piece());
    }

    #[test]
    fn test_orientations_cover_all_distinct_shapes() {
        let piece = l_piece();
        let mut shapes: Vec<_> = piece.orientations().iter().map(Piece::sorted_cells).collect();
        shapes.sort();
        shapes.dedup();
        assert_eq!(shapes.len(), 8, "an L tetromino has 8 distinct orientations");

        let square = Piece::new("4O", Color::Blue, vec![(0, 0), (0, 1), (1, 0), (1, 1)]).unwrap();
        let mut shapes: Vec<_> = square
            .orientations()
            .iter()
            .map(|p| {
                // Compare after moving the bounding box to the origin.
                let (min, _) = p.bounds();
                let mut cells: Vec<_> = p.cells().iter().map(|(x, y)| (x - min.x, y - min.y)).collect();
                cells.sort_unstable();
                cells
            })
            .collect();
        shapes.sort();
        shapes.dedup();
        assert_eq!(shapes.len(), 1, "a square looks the same in every orientation");
    }

    #[test]
    fn test_bounds_follow_transforms() {
        let mut piece = l_piece();
        assert_eq!(piece.bounds(), (Position::new(0, 0), Position::new(1, 2)));
        assert_eq!(piece.dimension(), (1, 2));
        piece.rotate();
        assert_eq!(piece.bounds(), (Position::new(-2, 0), Position::new(0, 1)));
        assert_eq!(piece.dimension(), (2, 1));
    }

    #[test]
    fn test_absolute_cells() {
        let piece = l_piece();
        let cells: Vec<_> = piece.absolute_cells(Position::new(5, 7)).collect();
        assert_eq!(
            cells,
            vec![
                Position::new(5, 7),
                Position::new(5, 8),
                Position::new(5, 9),
                Position::new(6, 9),
            ]
        );
    }

    #[test]
    fn test_transforms_saturate_extreme_offsets() {
        let mut piece = Piece::new("far", Color::Blue, vec![(0, 0), (i32::MIN, 0), (0, i32::MIN)]).unwrap();
        piece.rotate();
        assert_eq!(piece.cells(), &[(0, 0), (0, i32::MIN), (i32::MAX, 0)]);
        piece.flip();
        assert_eq!(piece.cells(), &[(0, 0), (0, i32::MIN), (-i32::MAX, 0)]);
        assert_eq!(piece.orientations().len(), ORIENTATION_COUNT);
    }
}
