//! Exhaustive enumeration of legal moves.
//!
//! Every piece in the hand is tried in each of its 8 orientations with its
//! origin on each legal anchor of the owner's color. Orientations are built
//! from copies, so the hand is never touched. The board is only read; nothing
//! is placed while searching.

use tetros_engine::{Board, Move, Piece};

/// Returns every move in `hand` that currently fits `board`.
///
/// All pieces in `hand` are expected to share one owner color. Moves are
/// ordered by hand index, then orientation, then anchor in row-major order.
/// Symmetric pieces yield duplicate moves for equivalent orientations.
#[must_use]
pub fn enumerate_moves(board: &Board, hand: &[Piece]) -> Vec<Move> {
    let Some(color) = hand.first().map(Piece::color) else {
        return vec![];
    };
    let anchors = board.legal_anchors(color);
    if anchors.is_empty() {
        return vec![];
    }

    let mut moves = vec![];
    for (index, piece) in hand.iter().enumerate() {
        for orientation in piece.orientations() {
            for &anchor in &anchors {
                if board.fits(anchor, &orientation) {
                    moves.push(Move::new(orientation.clone(), index, anchor));
                }
            }
        }
    }
    moves
}
