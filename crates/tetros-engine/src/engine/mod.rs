//! Players, the turn loop and end-of-game scoring.
//!
//! - [`PlayerState`] - hand, knock flag and placement bookkeeping
//! - [`Strategy`] - how a player chooses its move; implemented by the bots in `tetros-evaluator`
//! - [`Player`] - a [`PlayerState`] driven by a [`Strategy`]
//! - [`Game`] - seating, rounds and termination
//! - [`ScoreTable`] - coverage, density and points per player
//! - [`GameSeed`] - seed for a reproducible game
//!
//! # Game Flow
//!
//! 1. [`Game::new`] shuffles the seating order and the starting cells
//! 2. Each round, every player that has not knocked takes one turn
//! 3. A player with no move knocks and is skipped from then on
//! 4. The game ends on stalemate or when a hand is emptied
//! 5. [`Game::play`] returns the final [`ScoreTable`]

pub use self::{game::*, player::*, score::*, seed::*};

mod game;
mod player;
mod score;
mod seed;
