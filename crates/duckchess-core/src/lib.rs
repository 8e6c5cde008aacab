//! Duck chess engine core
//!
//! Board representation, move generation, static evaluation, and a
//! duck-merged alpha-beta search for duck chess. Duck chess is standard
//! chess plus a shared blocking duck: each round a side moves a piece, then
//! relocates the duck to any other empty square. There is no check, and
//! capturing the opposing king wins outright.
//!
//! The usual entry points are [`initial_position`] or [`parse_board`] to get
//! a [`Board`], and [`Searcher::best_move`] to pick a round for the side to
//! move.

pub mod board;
pub mod eval;
pub mod movegen;
pub mod moves;
pub mod search;
pub mod tt;
pub mod types;
pub mod zobrist;

pub use board::{initial_position, parse_board, Board, ParseError};
pub use eval::Evaluator;
pub use movegen::{generate_moves, legal_moves, MoveList};
pub use moves::Move;
pub use search::{BoardEval, SearchError, Searcher, SelectedMove};
pub use tt::TranspositionTable;
pub use types::{Coord, GameResult, Phase, Piece, Value};
