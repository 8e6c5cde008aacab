//! Core value types: squares, pieces, phases, scores.

mod coord;
mod phase;
mod piece;
mod value;

pub use coord::{Col, Coord, Row};
pub use phase::{GameResult, Phase};
pub use piece::Piece;
pub use value::Value;
