pub use self::{color::*, piece::*, settled_grid::*, shape::*};

pub(crate) mod color;
pub(crate) mod piece;
pub(crate) mod settled_grid;
pub(crate) mod shape;
