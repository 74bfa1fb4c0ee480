//! Move generation, heatmap scoring and the scripted strategies for Tetros.
//!
//! # Architecture
//!
//! ```text
//! strategy::PlayerKind (which player plays)
//!     ↓ uses
//! move_selector (score moves, keep the best group, break ties)
//!     ↓ uses
//! move_generator (every fitting move for a hand)  +  heatmap (per-cell weights)
//! ```
//!
//! Search never mutates the board. Moves are generated against a shared
//! `&Board` and only the chosen one is committed, by the game loop in
//! `tetros-engine`.
//!
//! # Example
//!
//! ```
//! use tetros_engine::{BoardSize, Color, Game, GameSeed, PieceCatalog, Player, PlayerState};
//! use tetros_evaluator::strategy::{DynamicHeatmapStrategy, PlayerKind, RandomStrategy};
//! use tetros_evaluator::move_selector::TieBreak;
//!
//! let catalog = PieceCatalog::standard();
//! let players = Color::DEFAULT_PLAYERS
//!     .into_iter()
//!     .enumerate()
//!     .map(|(i, color)| {
//!         let kind = if i % 2 == 0 {
//!             PlayerKind::from(DynamicHeatmapStrategy::new(TieBreak::Random))
//!         } else {
//!             PlayerKind::from(RandomStrategy::new())
//!         };
//!         Player::new(PlayerState::new(color, catalog.hand(color)), kind)
//!     })
//!     .collect();
//!
//! let mut game = Game::new(BoardSize::square(20), players, None, GameSeed::from_u64(7)).unwrap();
//! let table = game.play();
//! assert_eq!(table.scores.len(), 4);
//! ```

pub mod heatmap;
pub mod move_generator;
pub mod move_selector;
pub mod strategy;
