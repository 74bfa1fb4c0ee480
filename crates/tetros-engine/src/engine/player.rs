use log::debug;

use crate::core::{Board, Color, Move, Piece};

use super::seed::GameRng;

/// Hand and knock bookkeeping shared by every kind of player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerState {
    color: Color,
    hand: Vec<Piece>,
    knocked: bool,
    final_piece: Option<Piece>,
    placed_pieces: usize,
}

impl PlayerState {
    #[must_use]
    pub fn new(color: Color, hand: Vec<Piece>) -> Self {
        Self {
            color,
            hand,
            knocked: false,
            final_piece: None,
            placed_pieces: 0,
        }
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Pieces still available, in their original catalog order.
    #[must_use]
    pub fn hand(&self) -> &[Piece] {
        &self.hand
    }

    /// A knocked player passes every remaining turn.
    #[must_use]
    pub fn is_knocked(&self) -> bool {
        self.knocked
    }

    pub fn knock(&mut self) {
        self.knocked = true;
    }

    pub fn revoke_knock(&mut self) {
        self.knocked = false;
    }

    /// The most recently placed piece, as it was placed.
    #[must_use]
    pub fn final_piece(&self) -> Option<&Piece> {
        self.final_piece.as_ref()
    }

    #[must_use]
    pub fn placed_pieces(&self) -> usize {
        self.placed_pieces
    }

    /// Number of cells over all pieces still in hand.
    #[must_use]
    pub fn squares_left(&self) -> usize {
        self.hand.iter().map(Piece::size).sum()
    }

    #[must_use]
    pub fn has_emptied_hand(&self) -> bool {
        self.hand.is_empty()
    }

    /// Applies `mv` to `board` and removes the source piece from the hand.
    ///
    /// Returns `false` without touching anything if the move does not refer to
    /// a piece in this hand or no longer fits the board.
    pub fn place_move(&mut self, board: &mut Board, mv: &Move) -> bool {
        let Some(source) = self.hand.get(mv.piece_index()) else {
            return false;
        };
        if source.name() != mv.piece().name() || mv.piece().color() != self.color {
            return false;
        }
        if !board.place(mv.anchor(), mv.piece()) {
            return false;
        }
        self.hand.remove(mv.piece_index());
        self.final_piece = Some(mv.piece().clone());
        self.placed_pieces += 1;
        true
    }
}

/// Decides which move a player makes on its turn.
///
/// Returning `None` means the player cannot (or will not) move and knocks.
/// Implementations may also knock or un-knock `state` themselves.
pub trait Strategy {
    fn select_move(
        &mut self,
        state: &mut PlayerState,
        board: &Board,
        rng: &mut GameRng,
    ) -> Option<Move>;
}

impl<S> Strategy for Box<S>
where
    S: Strategy + ?Sized,
{
    fn select_move(
        &mut self,
        state: &mut PlayerState,
        board: &Board,
        rng: &mut GameRng,
    ) -> Option<Move> {
        (**self).select_move(state, board, rng)
    }
}

/// A seat at the table: shared bookkeeping plus the strategy driving it.
#[derive(Debug, Clone)]
pub struct Player<S> {
    state: PlayerState,
    strategy: S,
}

impl<S> Player<S>
where
    S: Strategy,
{
    #[must_use]
    pub fn new(state: PlayerState, strategy: S) -> Self {
        Self { state, strategy }
    }

    #[must_use]
    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    #[must_use]
    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.state.color
    }

    pub fn select_move(&mut self, board: &Board, rng: &mut GameRng) -> Option<Move> {
        self.strategy.select_move(&mut self.state, board, rng)
    }

    /// Selects and places a piece, asking again whenever a move fails to place.
    ///
    /// Returns `true` once a piece has been placed. When the strategy has no
    /// move the player knocks and `false` is returned. Anchors are not
    /// recomputed here.
    pub fn take_turn(&mut self, board: &mut Board, rng: &mut GameRng) -> bool {
        loop {
            let Some(mv) = self.select_move(board, rng) else {
                self.state.knock();
                debug!("{} knocks", self.state.color);
                return false;
            };
            if self.state.place_move(board, &mv) {
                return true;
            }
            debug!(
                "{} could not place {:?} at {}, retrying",
                self.state.color,
                mv.piece().name(),
                mv.anchor()
            );
        }
    }
}
