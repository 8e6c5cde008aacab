//! Text board notation
//!
//! Parses the ASCII diagrams produced by [`Board::render`]: 8 piece rows
//! (rank 8 first) between 17-dash borders, one letter per square. An asterisk
//! after the top border means black to move, after the bottom border white to
//! move; the bottom border also carries an `ep: <col>` annotation (-1 when no
//! two-step pawn move just happened).

use thiserror::Error;

use crate::board::Board;
use crate::types::{Coord, Phase, Piece};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("board text has {0} lines, expected 17")]
    WrongLineCount(usize),
    #[error("line {0} is too short")]
    LineTooShort(usize),
    #[error("unrecognized piece letter {letter:?} on {square}")]
    UnknownPiece { letter: char, square: String },
    #[error("en-passant column {0} out of range")]
    EnPassantOutOfRange(i32),
    #[error("malformed en-passant annotation")]
    MalformedEnPassant,
}

pub fn parse_board(text: &str) -> Result<Board, ParseError> {
    let lines: Vec<&str> = text.trim().lines().map(str::trim_start).collect();
    if lines.len() != 17 {
        return Err(ParseError::WrongLineCount(lines.len()));
    }

    let mut pieces = Vec::with_capacity(Coord::NUM);
    for index in 0..Coord::NUM {
        let coord = Coord::from_index(index);
        let line_no = 1 + 2 * (7 - coord.row().0 as usize);
        let char_no = 1 + coord.col().0 as usize * 2;
        let letter = lines[line_no]
            .chars()
            .nth(char_no)
            .ok_or(ParseError::LineTooShort(line_no))?;
        let piece = Piece::from_letter(letter).ok_or_else(|| ParseError::UnknownPiece {
            letter,
            square: coord.text(),
        })?;
        pieces.push((coord, piece));
    }

    let phase = if lines[0].contains("-- *") {
        Phase::BlackPieceMove
    } else {
        Phase::WhitePieceMove
    };

    let mut board = Board::from_pieces(&pieces, phase);

    if let Some(rest) = lines[16].split("ep:").nth(1) {
        let col: i32 = rest.trim().parse().map_err(|_| ParseError::MalformedEnPassant)?;
        match col {
            -1 => {}
            0..=7 => board.set_en_passant_col(Some(col as u8)),
            _ => return Err(ParseError::EnPassantOutOfRange(col)),
        }
    }

    Ok(board)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::initial_position;

    const MIDGAME: &str = "
        -----------------
        |r| |b| |k|b| |r|
        -----------------
        |p|p| |p| | | |p|
        -----------------
        | | | | | |p|p| |
        -----------------
        | | | | | | | | |
        -----------------
        | |p| |p| | | |q|
        -----------------
        | | | | | |n| | |
        -----------------
        |P| |P|Q| | | | |
        -----------------
        |R|N|B|X|K|B| | |
        ----------------- * ep: -1";

    #[test]
    fn test_parse_white_to_move() {
        let board = parse_board(MIDGAME).unwrap();
        assert_eq!(board.phase(), Phase::WhitePieceMove);
        assert_eq!(board.duck_position(), Some(Coord::D1));
        assert_eq!(board.get(Coord::E1), Piece::WHITE_KING);
        assert_eq!(board.get(Coord::H4), Piece::BLACK_QUEEN);
        assert_eq!(board.get(Coord::F3), Piece::BLACK_KNIGHT);
        assert_eq!(board.en_passant_col(), None);
        // King on E1 and rook on A1 grant long castling only.
        assert!(board.white_long_castling_allowed());
        assert!(!board.white_short_castling_allowed());
    }

    #[test]
    fn test_parse_black_to_move_marker_on_top() {
        let text = MIDGAME
            .replacen("-----------------\n", "----------------- *\n", 1)
            .replace("----------------- * ep: -1", "----------------- ep: -1");
        let board = parse_board(&text).unwrap();
        assert_eq!(board.phase(), Phase::BlackPieceMove);
    }

    #[test]
    fn test_render_parse_round_trip() {
        let board = parse_board(MIDGAME).unwrap();
        assert_eq!(parse_board(&board.render()).unwrap(), board);

        let board = initial_position();
        assert_eq!(parse_board(&board.render()).unwrap(), board);
    }

    #[test]
    fn test_round_trip_keeps_en_passant() {
        let mut board = initial_position();
        board.set_en_passant_col(Some(4));
        let parsed = parse_board(&board.render()).unwrap();
        assert_eq!(parsed.en_passant_col(), Some(4));
        assert_eq!(parsed, board);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_board("|r|\n---"), Err(ParseError::WrongLineCount(2)));
        assert_eq!(
            parse_board(&MIDGAME.replace('q', "?")),
            Err(ParseError::UnknownPiece { letter: '?', square: "H4".to_string() })
        );
        assert_eq!(
            parse_board(&MIDGAME.replace("ep: -1", "ep: 9")),
            Err(ParseError::EnPassantOutOfRange(9))
        );
    }
}
