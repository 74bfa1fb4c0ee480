use super::{piece::Piece, position::Position};

/// A candidate placement: a transformed copy of a hand piece and where its origin goes.
///
/// Moves are snapshots. The piece inside is independent of the hand it came
/// from, so a move may go stale once the board changes; [`Board::place`]
/// re-validates before writing anything.
///
/// [`Board::place`]: super::Board::place
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    piece: Piece,
    piece_index: usize,
    anchor: Position,
}

impl Move {
    #[must_use]
    pub fn new(piece: Piece, piece_index: usize, anchor: Position) -> Self {
        Self {
            piece,
            piece_index,
            anchor,
        }
    }

    #[must_use]
    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    /// Index of the source piece in the owner's hand at the time the move was generated.
    #[must_use]
    pub fn piece_index(&self) -> usize {
        self.piece_index
    }

    #[must_use]
    pub fn anchor(&self) -> Position {
        self.anchor
    }

    pub fn covered_cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.piece.absolute_cells(self.anchor)
    }
}
