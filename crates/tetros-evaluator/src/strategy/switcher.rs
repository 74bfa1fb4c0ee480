use log::debug;
use tetros_engine::{Board, BoardSize, GameRng, Move, PlayerState, Strategy};

use crate::{
    heatmap::{Heatmap, HeatmapError},
    move_selector::TieBreak,
};

use super::static_heatmap::select_heatmap_move;

/// Heatmaps keyed by the number of pieces placed before each one takes over.
///
/// Stages are kept in ascending threshold order. The lowest stage is active
/// from the start. [`advance`](Self::advance) looks at the stages after the
/// active one in ascending order and activates the first whose threshold has
/// been reached, so stages are entered one at a time.
#[derive(Debug, Clone)]
pub struct HeatmapSchedule {
    stages: Vec<(usize, Heatmap)>,
    active: usize,
}

impl HeatmapSchedule {
    /// Builds a schedule. Later duplicates of a threshold are dropped.
    pub fn new<I>(stages: I) -> Result<Self, HeatmapError>
    where
        I: IntoIterator<Item = (usize, Heatmap)>,
    {
        let mut stages: Vec<_> = stages.into_iter().collect();
        stages.sort_by_key(|(threshold, _)| *threshold);
        stages.dedup_by_key(|(threshold, _)| *threshold);
        if stages.is_empty() {
            return Err(HeatmapError::EmptySchedule);
        }
        Ok(Self { stages, active: 0 })
    }

    /// A schedule with a single stage that never changes.
    #[must_use]
    pub fn single(heatmap: Heatmap) -> Self {
        Self {
            stages: vec![(0, heatmap)],
            active: 0,
        }
    }

    #[must_use]
    pub fn thresholds(&self) -> Vec<usize> {
        self.stages.iter().map(|(threshold, _)| *threshold).collect()
    }

    #[must_use]
    pub fn active_threshold(&self) -> usize {
        self.stages[self.active].0
    }

    #[must_use]
    pub fn active(&self) -> &Heatmap {
        &self.stages[self.active].1
    }

    /// Moves to the next stage if `placed_pieces` has reached its threshold.
    ///
    /// Returns true when the active heatmap changed.
    pub fn advance(&mut self, placed_pieces: usize) -> bool {
        let next = self.stages[self.active + 1..]
            .iter()
            .position(|(threshold, _)| placed_pieces >= *threshold);
        match next {
            Some(offset) => {
                self.active += offset + 1;
                true
            }
            None => false,
        }
    }

    /// Validates every stage against the board size.
    pub fn check_size(&self, size: BoardSize) -> Result<(), HeatmapError> {
        self.stages
            .iter()
            .try_for_each(|(_, heatmap)| heatmap.check_size(size))
    }
}

/// Switches to a new pre-built heatmap as the player's piece count grows.
#[derive(Debug, Clone)]
pub struct HeatmapSwitcherStrategy {
    schedule: HeatmapSchedule,
    tie_break: TieBreak,
}

impl HeatmapSwitcherStrategy {
    #[must_use]
    pub fn new(schedule: HeatmapSchedule, tie_break: TieBreak) -> Self {
        Self {
            schedule,
            tie_break,
        }
    }

    #[must_use]
    pub fn schedule(&self) -> &HeatmapSchedule {
        &self.schedule
    }
}

impl Strategy for HeatmapSwitcherStrategy {
    fn select_move(
        &mut self,
        state: &mut PlayerState,
        board: &Board,
        rng: &mut GameRng,
    ) -> Option<Move> {
        if self.schedule.advance(state.placed_pieces()) {
            debug!(
                "{} switches heatmap at {} pieces",
                state.color(),
                self.schedule.active_threshold()
            );
        }
        select_heatmap_move(self.schedule.active(), self.tie_break, state, board, rng)
    }
}
