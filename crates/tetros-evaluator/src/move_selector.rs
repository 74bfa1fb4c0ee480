//! Heatmap scoring and best-move selection.

use std::collections::BTreeMap;

use log::trace;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tetros_engine::Move;

use crate::heatmap::Heatmap;

/// How to choose among moves that share the best score.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Deserialize,
    Serialize,
    derive_more::Display,
)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
    /// Uniformly random among the tied moves.
    #[default]
    #[display("random")]
    Random,
    /// Prefer moves that play the biggest piece, then pick randomly.
    #[display("largest_piece")]
    LargestPiece,
}

impl TieBreak {
    /// Picks one move out of `moves`, or `None` if it is empty.
    pub fn choose<R>(self, mut moves: Vec<Move>, rng: &mut R) -> Option<Move>
    where
        R: Rng + ?Sized,
    {
        if self == TieBreak::LargestPiece {
            let largest = moves.iter().map(|mv| mv.piece().size()).max()?;
            moves.retain(|mv| mv.piece().size() == largest);
        }
        if moves.len() <= 1 {
            return moves.pop();
        }
        let i = rng.random_range(0..moves.len());
        Some(moves.swap_remove(i))
    }
}

/// Sum of the heatmap weights under the cells the move covers.
#[must_use]
pub fn score_move(heatmap: &Heatmap, mv: &Move) -> i32 {
    heatmap.score(mv.covered_cells())
}

/// Buckets moves by score, keeping generation order inside each bucket.
#[must_use]
pub fn group_by_score(heatmap: &Heatmap, moves: Vec<Move>) -> BTreeMap<i32, Vec<Move>> {
    let mut groups: BTreeMap<i32, Vec<Move>> = BTreeMap::new();
    for mv in moves {
        let score = score_move(heatmap, &mv);
        trace!("{} at {} scores {score}", mv.piece().name(), mv.anchor());
        groups.entry(score).or_default().push(mv);
    }
    groups
}

/// Returns a move from the highest-scoring group, breaking ties with `tie_break`.
pub fn select_by_heatmap<R>(
    heatmap: &Heatmap,
    moves: Vec<Move>,
    tie_break: TieBreak,
    rng: &mut R,
) -> Option<Move>
where
    R: Rng + ?Sized,
{
    let (_, best) = group_by_score(heatmap, moves).pop_last()?;
    tie_break.choose(best, rng)
}
