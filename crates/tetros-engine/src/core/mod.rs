pub use self::{board::*, catalog::*, color::*, game_move::*, piece::*, position::*};

pub(crate) mod board;
pub(crate) mod catalog;
pub(crate) mod color;
pub(crate) mod game_move;
pub(crate) mod piece;
pub(crate) mod position;
