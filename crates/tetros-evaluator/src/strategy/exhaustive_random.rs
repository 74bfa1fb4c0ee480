use log::debug;
use rand::seq::SliceRandom as _;
use tetros_engine::{Board, GameRng, Move, PlayerState, Strategy};

use super::random::RandomStrategy;

/// A [`RandomStrategy`] that searches systematically once random play gives up.
///
/// When the random phase knocks, every hand piece is tried around every
/// anchor (the anchor and its up/left neighbors as origin) in shuffled
/// rotations and flips. A hit revokes the knock. The search runs until it
/// first comes up empty; after that the player stays knocked.
#[derive(Debug, Default, Clone)]
pub struct ExhaustiveRandomStrategy {
    random: RandomStrategy,
    exhausted: bool,
}

impl ExhaustiveRandomStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the fallback search has already failed once.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn search(state: &PlayerState, board: &Board, rng: &mut GameRng) -> Option<Move> {
        let anchors = board.legal_anchors(state.color());
        for (index, piece) in state.hand().iter().enumerate() {
            for &anchor in &anchors {
                for dy in -1..=0 {
                    for dx in -1..=0 {
                        let origin = anchor.offset(dx, dy);
                        let mut rotations = [0, 1, 2, 3];
                        rotations.shuffle(rng);
                        for rotation in rotations {
                            let mut flips = [true, false];
                            flips.shuffle(rng);
                            for flip in flips {
                                let mut candidate = piece.clone();
                                for _ in 0..rotation {
                                    candidate.rotate();
                                }
                                if flip {
                                    candidate.flip();
                                }
                                if board.fits(origin, &candidate) {
                                    return Some(Move::new(candidate, index, origin));
                                }
                            }
                        }
                    }
                }
            }
        }
        None
    }
}

impl Strategy for ExhaustiveRandomStrategy {
    fn select_move(
        &mut self,
        state: &mut PlayerState,
        board: &Board,
        rng: &mut GameRng,
    ) -> Option<Move> {
        let mv = self.random.select_move(state, board, rng);
        if !state.is_knocked() || self.exhausted {
            return mv;
        }
        if let Some(mv) = Self::search(state, board, rng) {
            debug!("{} found {:?} by exhaustive search", state.color(), mv.piece().name());
            state.revoke_knock();
            return Some(mv);
        }
        self.exhausted = true;
        None
    }
}
