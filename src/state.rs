// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Position metadata: everything about a position that is not piece placement.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{Castling, Color, File, Rank, Square};

/// Possible errors that can arise when reading a FEN string, or one of its fields, into a board.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum FenParseError {
    #[error("unexpected char: {0}")]
    UnexpectedChar(char),
    #[error("unexpected EOF while reading")]
    UnexpectedEnd,
    #[error("invalid digit")]
    InvalidDigit,
    #[error("file does not sum to 8")]
    FileDoesNotSumToEight,
    #[error("unknown piece: {0}")]
    UnknownPiece(char),
    #[error("square {0} is occupied twice")]
    DuplicateSquare(Square),
    #[error("invalid side to move: {0}")]
    InvalidSideToMove(char),
    #[error("invalid castle: {0}")]
    InvalidCastle(char),
    #[error("invalid en-passant: {0}")]
    InvalidEnPassant(String),
    #[error("invalid halfmove: {0}")]
    InvalidHalfmove(String),
    #[error("invalid fullmove: {0}")]
    InvalidFullmove(String),
}

/// Side to move, castling rights, en-passant target and the two move clocks.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// Color whose turn it is to move.
    side_to_move: Color,
    /// Castle status for both players.
    castling: Castling,
    /// The en-passant square, if the previous move was a double pawn push.
    en_passant_square: Option<Square>,
    /// The halfmove clock, or the progress to a draw by the 50-move Rule.
    halfmove_clock: u16,
    /// The fullmove clock, or number of times black has moved this game plus one.
    fullmove_clock: u16,
}

impl BoardState {
    /// A fresh state: white to move, no castling rights, no en-passant target, clocks at 0 and 1.
    pub fn new() -> BoardState {
        BoardState {
            side_to_move: Color::White,
            castling: Castling::NONE,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_clock: 1,
        }
    }

    /// Builds a state from the five metadata fields of a FEN record. Fails as a whole if any field fails.
    pub fn from_fen_fields(
        side_to_move: &str,
        castling: &str,
        en_passant: &str,
        halfmove: &str,
        fullmove: &str,
    ) -> Result<BoardState, FenParseError> {
        let mut chars = side_to_move.chars();
        let side = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            (Some(_), Some(c)) => return Err(FenParseError::UnexpectedChar(c)),
            (None, _) => return Err(FenParseError::UnexpectedEnd),
        };

        let mut state = BoardState::new();
        state.set_active_color(side)?;
        state.set_castling_rights(castling)?;
        state.set_en_passant(en_passant)?;
        state.set_halfmove_clock(halfmove)?;
        state.set_fullmove_clock(fullmove)?;
        Ok(state)
    }

    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    pub fn fullmove_clock(&self) -> u16 {
        self.fullmove_clock
    }

    pub fn castling(&self) -> Castling {
        self.castling
    }

    pub fn is_castling_available(&self) -> bool {
        !self.castling.is_empty()
    }

    /// Tests whether every right in `rights` is held.
    pub fn query_castling(&self, rights: Castling) -> bool {
        self.castling.contains(rights)
    }

    /// Grants or revokes castling rights. Other rights are untouched.
    pub fn set_castling(&mut self, rights: Castling, flag: bool) {
        self.castling.set(rights, flag);
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    /// Reads a side-to-move token: `w` or `b`.
    pub fn set_active_color(&mut self, side_to_move: char) -> Result<(), FenParseError> {
        self.side_to_move = match side_to_move {
            'w' => Color::White,
            'b' => Color::Black,
            c => return Err(FenParseError::InvalidSideToMove(c)),
        };

        Ok(())
    }

    /// Reads a castling-availability token (`-` or any of `KQkq`), adding each named right. The token is
    /// validated before anything is applied.
    pub fn set_castling_rights(&mut self, token: &str) -> Result<(), FenParseError> {
        if token == "-" {
            return Ok(());
        }

        if token.is_empty() {
            return Err(FenParseError::UnexpectedEnd);
        }

        let mut granted = Castling::NONE;
        for c in token.chars() {
            granted |= Castling::from_fen_char(c).ok_or(FenParseError::InvalidCastle(c))?;
        }

        self.castling |= granted;
        Ok(())
    }

    pub fn set_en_passant_square(&mut self, square: Option<Square>) {
        self.en_passant_square = square;
    }

    /// Reads an en-passant token: `-` or a square name such as `e3`.
    pub fn set_en_passant(&mut self, token: &str) -> Result<(), FenParseError> {
        if token == "-" {
            self.en_passant_square = None;
            return Ok(());
        }

        let invalid = || FenParseError::InvalidEnPassant(token.to_string());
        let mut chars = token.chars();
        let (file, rank) = match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => (f, r),
            _ => return Err(invalid()),
        };

        let file = File::try_from(file).map_err(|_| invalid())?;
        let rank = Rank::try_from(rank).map_err(|_| invalid())?;
        self.en_passant_square = Some(Square::of(rank, file));
        Ok(())
    }

    pub fn set_halfmove_clock(&mut self, token: &str) -> Result<(), FenParseError> {
        self.halfmove_clock =
            parse_clock(token).ok_or_else(|| FenParseError::InvalidHalfmove(token.to_string()))?;
        Ok(())
    }

    pub fn set_fullmove_clock(&mut self, token: &str) -> Result<(), FenParseError> {
        self.fullmove_clock =
            parse_clock(token).ok_or_else(|| FenParseError::InvalidFullmove(token.to_string()))?;
        Ok(())
    }

    pub fn set_halfmove(&mut self, value: u16) {
        self.halfmove_clock = value;
    }

    pub fn set_fullmove(&mut self, value: u16) {
        self.fullmove_clock = value;
    }

    /// Writes the five metadata fields in FEN order, separated by spaces.
    pub fn as_fen_fields(&self) -> String {
        let mut buf = String::new();
        match self.side_to_move {
            Color::White => buf.push('w'),
            Color::Black => buf.push('b'),
        }

        buf.push(' ');
        if self.castling.is_empty() {
            buf.push('-');
        }
        for (right, c) in [
            (Castling::WHITE_KINGSIDE, 'K'),
            (Castling::WHITE_QUEENSIDE, 'Q'),
            (Castling::BLACK_KINGSIDE, 'k'),
            (Castling::BLACK_QUEENSIDE, 'q'),
        ] {
            if self.castling.contains(right) {
                buf.push(c);
            }
        }

        buf.push(' ');
        match self.en_passant_square {
            Some(sq) => buf.push_str(&sq.to_string()),
            None => buf.push('-'),
        }

        buf.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_clock));
        buf
    }
}

impl Default for BoardState {
    fn default() -> Self {
        BoardState::new()
    }
}

/// Clocks are base-10 literals made only of digits. Values that do not fit in 16 bits are rejected rather than
/// truncated.
fn parse_clock(token: &str) -> Option<u16> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    token.parse::<u16>().ok()
}

#[cfg(test)]
mod tests {
    use super::{BoardState, FenParseError};
    use crate::core::*;

    const ALL_RIGHTS: [Castling; 4] = [
        Castling::WHITE_KINGSIDE,
        Castling::WHITE_QUEENSIDE,
        Castling::BLACK_KINGSIDE,
        Castling::BLACK_QUEENSIDE,
    ];

    #[test]
    fn defaults() {
        let state = BoardState::new();
        assert_eq!(Color::White, state.side_to_move());
        assert!(!state.is_castling_available());
        assert_eq!(None, state.en_passant_square());
        assert_eq!(0, state.halfmove_clock());
        assert_eq!(1, state.fullmove_clock());
    }

    #[test]
    fn set_and_clear_each_right() {
        for right in ALL_RIGHTS {
            let mut state = BoardState::new();
            state.set_castling_rights("KQkq").unwrap();
            state.set_castling(right, false);
            assert!(!state.query_castling(right));
            for other in ALL_RIGHTS.iter().filter(|&&r| r != right) {
                assert!(state.query_castling(*other));
            }

            state.set_castling(right, true);
            assert!(state.query_castling(right));
            assert_eq!(Castling::WHITE | Castling::BLACK, state.castling());
        }
    }

    #[test]
    fn setting_one_right_leaves_others() {
        for right in ALL_RIGHTS {
            let mut state = BoardState::new();
            state.set_castling(right, true);
            assert!(state.query_castling(right));
            for other in ALL_RIGHTS.iter().filter(|&&r| r != right) {
                assert!(!state.query_castling(*other));
            }
        }
    }

    #[test]
    fn castling_dash() {
        let mut state = BoardState::new();
        state.set_castling_rights("-").unwrap();
        assert!(!state.is_castling_available());
    }

    #[test]
    fn castling_all() {
        let mut state = BoardState::new();
        state.set_castling_rights("KQkq").unwrap();
        assert!(state.is_castling_available());
        for right in ALL_RIGHTS {
            assert!(state.query_castling(right));
        }
    }

    #[test]
    fn castling_partial() {
        let mut state = BoardState::new();
        state.set_castling_rights("Kq").unwrap();
        assert!(state.query_castling(Castling::WHITE_KINGSIDE));
        assert!(state.query_castling(Castling::BLACK_QUEENSIDE));
        assert!(!state.query_castling(Castling::WHITE_QUEENSIDE));
        assert!(!state.query_castling(Castling::BLACK_KINGSIDE));
    }

    #[test]
    fn bad_castle_leaves_rights() {
        let mut state = BoardState::new();
        state.set_castling(Castling::BLACK_KINGSIDE, true);
        let err = state.set_castling_rights("X").unwrap_err();
        assert_eq!(FenParseError::InvalidCastle('X'), err);
        assert_eq!(Castling::BLACK_KINGSIDE, state.castling());

        let err = state.set_castling_rights("KQa").unwrap_err();
        assert_eq!(FenParseError::InvalidCastle('a'), err);
        assert_eq!(Castling::BLACK_KINGSIDE, state.castling());
    }

    #[test]
    fn side_to_move() {
        let mut state = BoardState::new();
        state.set_active_color('b').unwrap();
        assert_eq!(Color::Black, state.side_to_move());
        state.set_active_color('w').unwrap();
        assert_eq!(Color::White, state.side_to_move());
        assert_eq!(
            FenParseError::InvalidSideToMove('c'),
            state.set_active_color('c').unwrap_err()
        );
        assert_eq!(Color::White, state.side_to_move());
    }

    #[test]
    fn halfmove() {
        let mut state = BoardState::new();
        state.set_halfmove_clock("12").unwrap();
        assert_eq!(12, state.halfmove_clock());

        for bad in ["-1", "abc", "", "+5", "1 2"] {
            assert_eq!(
                FenParseError::InvalidHalfmove(bad.to_string()),
                state.set_halfmove_clock(bad).unwrap_err()
            );
        }
        assert_eq!(12, state.halfmove_clock());
    }

    #[test]
    fn clock_updates() {
        let mut state = BoardState::from_fen_fields("w", "-", "-", "7", "30").unwrap();
        state.set_halfmove(0);
        state.set_fullmove(31);
        assert_eq!(0, state.halfmove_clock());
        assert_eq!(31, state.fullmove_clock());
        assert_eq!("w - - 0 31", state.as_fen_fields());
    }

    #[test]
    fn clock_overflow_rejected() {
        let mut state = BoardState::new();
        state.set_fullmove_clock("65535").unwrap();
        assert_eq!(u16::MAX, state.fullmove_clock());
        assert_eq!(
            FenParseError::InvalidFullmove("65536".to_string()),
            state.set_fullmove_clock("65536").unwrap_err()
        );
        assert!(state.set_halfmove_clock("4294967296").is_err());
    }

    #[test]
    fn en_passant() {
        let mut state = BoardState::new();
        state.set_en_passant("e3").unwrap();
        assert_eq!(Some(E3), state.en_passant_square());
        state.set_en_passant("-").unwrap();
        assert_eq!(None, state.en_passant_square());
        assert!(state.set_en_passant("88").is_err());
        assert!(state.set_en_passant("e").is_err());
        assert!(state.set_en_passant("e33").is_err());
    }

    #[test]
    fn fen_fields_roundtrip() {
        let state = BoardState::from_fen_fields("b", "Kq", "d6", "7", "42").unwrap();
        let fields = state.as_fen_fields();
        assert_eq!("b Kq d6 7 42", fields);

        let parts: Vec<_> = fields.split(' ').collect();
        let rebuilt =
            BoardState::from_fen_fields(parts[0], parts[1], parts[2], parts[3], parts[4]).unwrap();
        assert_eq!(state, rebuilt);
    }

    #[test]
    fn fen_fields_fail_as_a_whole() {
        let err = BoardState::from_fen_fields("w", "KQkq", "-", "x", "1").unwrap_err();
        assert_eq!(FenParseError::InvalidHalfmove("x".to_string()), err);
        let err = BoardState::from_fen_fields("wb", "-", "-", "0", "1").unwrap_err();
        assert_eq!(FenParseError::UnexpectedChar('b'), err);
    }

    #[test]
    fn serde_roundtrip() {
        let state = BoardState::from_fen_fields("w", "KQk", "-", "3", "9").unwrap();
        let json = serde_json::to_string(&state).unwrap();
        let back: BoardState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
