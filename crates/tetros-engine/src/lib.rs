//! Board legality engine and turn controller for Tetros, a four-player
//! polyomino placement game.
//!
//! The crate is split the same way the game is:
//!
//! - [`core`] - pieces, colors, positions and the [`Board`] with all placement rules
//! - [`engine`] - players, the [`Game`] turn loop, end-of-game scoring and seeds
//!
//! # Example
//!
//! ```
//! use tetros_engine::{Board, BoardSize, Color, PieceCatalog, Position};
//!
//! let board_size = BoardSize::square(20);
//! let mut board = Board::with_starting_positions(
//!     board_size,
//!     &[(Color::Blue, Position::new(0, 0))],
//! )
//! .unwrap();
//!
//! let hand = PieceCatalog::standard().hand(Color::Blue);
//! let monomino = &hand[0];
//! assert!(board.fits(Position::new(0, 0), monomino));
//! assert!(board.place(Position::new(0, 0), monomino));
//! board.recompute_anchors();
//!
//! assert_eq!(board.legal_anchors(Color::Blue), vec![Position::new(1, 1)]);
//! ```

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

/// A piece was constructed without any cells.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("piece {name:?} has no cells")]
pub struct EmptyPieceError {
    pub name: String,
}

/// The parameters given to [`Board`] or [`Game`] cannot describe a playable game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GameSetupError {
    #[display("board must be at least 1x1, got {width}x{height}")]
    EmptyBoard { width: usize, height: usize },
    #[display("at least one player is required")]
    NoPlayers,
    #[display("color {_0} is used by more than one player")]
    DuplicateColor(#[error(not(source))] Color),
    #[display("{players} players but only {positions} starting positions")]
    NotEnoughStartingPositions { players: usize, positions: usize },
    #[display("starting position {position} is outside the {width}x{height} board")]
    StartingPositionOutOfBounds {
        position: Position,
        width: usize,
        height: usize,
    },
}
