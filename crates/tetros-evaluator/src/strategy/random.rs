use log::debug;
use rand::{Rng as _, seq::IndexedRandom as _};
use tetros_engine::{Board, GameRng, Move, PlayerState, Strategy};

/// Consecutive misses a [`RandomStrategy`] tolerates before knocking.
pub const MAX_MISSES: u32 = 21;

/// Plays a random hand piece, randomly flipped and rotated, on a random anchor.
///
/// The move is returned even when it does not fit, so the caller's placement
/// fails and it asks again. After more than [`MAX_MISSES`] misses in a row
/// the player knocks.
#[derive(Debug, Default, Clone)]
pub struct RandomStrategy {
    misses: u32,
}

impl RandomStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Strategy for RandomStrategy {
    fn select_move(
        &mut self,
        state: &mut PlayerState,
        board: &Board,
        rng: &mut GameRng,
    ) -> Option<Move> {
        let anchors = board.legal_anchors(state.color());
        let &anchor = anchors.choose(rng)?;
        if state.hand().is_empty() {
            return None;
        }
        let index = rng.random_range(0..state.hand().len());
        let mut piece = state.hand()[index].clone();
        if rng.random_bool(0.5) {
            piece.flip();
        }
        for _ in 0..rng.random_range(0..4) {
            piece.rotate();
        }

        if board.fits(anchor, &piece) {
            self.misses = 0;
        } else {
            self.misses += 1;
            if self.misses > MAX_MISSES {
                debug!("{} gave up after {} random misses", state.color(), self.misses);
                self.misses = 0;
                state.knock();
                return None;
            }
        }
        Some(Move::new(piece, index, anchor))
    }
}
