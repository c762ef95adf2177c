// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! FEN reading shared by every board representation. Piece placement is parsed here and fed through the board's
//! own placement primitive; the remaining fields are handed to [`BoardState`].

use std::{iter::Peekable, str::Chars};

use crate::{
    board::Board,
    core::{self, File, Piece, Square},
    state::{BoardState, FenParseError},
};

pub const START_POSITION: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

type Stream<'a> = Peekable<Chars<'a>>;

fn eat(iter: &mut Stream<'_>, expected: char) -> Result<(), FenParseError> {
    match iter.next() {
        Some(c) if c == expected => Ok(()),
        Some(c) => Err(FenParseError::UnexpectedChar(c)),
        None => Err(FenParseError::UnexpectedEnd),
    }
}

fn peek(iter: &mut Stream<'_>) -> Result<char, FenParseError> {
    iter.peek().copied().ok_or(FenParseError::UnexpectedEnd)
}

/// Reads a complete FEN record into an empty board.
pub(crate) fn read_fen<B: Board>(board: &mut B, fen: &str) -> Result<(), FenParseError> {
    let (placement, metadata) = match fen.split_once(' ') {
        Some(parts) => parts,
        None if fen.is_empty() => return Err(FenParseError::UnexpectedEnd),
        None => (fen, ""),
    };

    read_placement(board, placement)?;

    let mut fields = metadata.split(' ');
    let mut next = || fields.next().ok_or(FenParseError::UnexpectedEnd);
    let state = BoardState::from_fen_fields(next()?, next()?, next()?, next()?, next()?)?;
    if let Some(extra) = fields.next() {
        let c = extra.chars().next().unwrap_or(' ');
        return Err(FenParseError::UnexpectedChar(c));
    }

    *board.state_mut() = state;
    Ok(())
}

fn read_placement<B: Board>(board: &mut B, placement: &str) -> Result<(), FenParseError> {
    let iter = &mut placement.chars().peekable();
    for rank in core::ranks().rev() {
        let mut file = 0;
        while file <= 7 {
            let c = peek(iter)?;
            // digits 1 through 8 indicate empty squares.
            if c.is_ascii_digit() {
                if !('1'..='8').contains(&c) {
                    return Err(FenParseError::InvalidDigit);
                }

                file += c as u8 - b'0';
                if file > 8 {
                    return Err(FenParseError::FileDoesNotSumToEight);
                }

                iter.next();
                continue;
            }

            // if it's not a digit, it represents a piece.
            let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece(c))?;
            let file_index = File::try_from(file).map_err(|_| FenParseError::FileDoesNotSumToEight)?;
            let square = Square::of(rank, file_index);
            board
                .add_piece(square, piece)
                .map_err(|_| FenParseError::DuplicateSquare(square))?;
            iter.next();
            file += 1;
        }

        if rank != core::RANK_1 {
            eat(iter, '/')?;
        }
    }

    match iter.next() {
        Some(c) => Err(FenParseError::UnexpectedChar(c)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        board::{ArrayBoard, Board, GraphBoard},
        core::*,
        state::FenParseError,
    };

    #[test]
    fn fen_smoke() {
        let board = ArrayBoard::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap();
        assert_eq!(Color::White, board.side_to_move());
        assert!(!board.state().is_castling_available());
        assert!(board.state().en_passant_square().is_none());
        assert_eq!(0, board.state().halfmove_clock());
        assert_eq!(1, board.state().fullmove_clock());
        assert!(board.pieces().iter().next().is_none());
    }

    #[test]
    fn empty() {
        let err = ArrayBoard::from_fen("").unwrap_err();
        assert_eq!(FenParseError::UnexpectedEnd, err);
    }

    #[test]
    fn unknown_piece() {
        let err = ArrayBoard::from_fen("z7/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
        assert_eq!(FenParseError::UnknownPiece('z'), err);
    }

    #[test]
    fn invalid_digit() {
        let err = GraphBoard::from_fen("9/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
        assert_eq!(FenParseError::InvalidDigit, err);
    }

    #[test]
    fn not_sum_to_8() {
        let err = ArrayBoard::from_fen("pppp5/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
        assert_eq!(FenParseError::FileDoesNotSumToEight, err);
    }

    #[test]
    fn too_many_ranks() {
        let err = ArrayBoard::from_fen("8/8/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
        assert_eq!(FenParseError::UnexpectedChar('/'), err);
    }

    #[test]
    fn bad_side_to_move() {
        let err = GraphBoard::from_fen("8/8/8/8/8/8/8/8 c - - 0 1").unwrap_err();
        assert_eq!(FenParseError::InvalidSideToMove('c'), err);
    }

    #[test]
    fn bad_castle_status() {
        let err = ArrayBoard::from_fen("8/8/8/8/8/8/8/8 w a - 0 1").unwrap_err();
        assert_eq!(FenParseError::InvalidCastle('a'), err);
    }

    #[test]
    fn bad_en_passant() {
        let err = ArrayBoard::from_fen("8/8/8/8/8/8/8/8 w - 88 0 1").unwrap_err();
        assert_eq!(FenParseError::InvalidEnPassant("88".to_string()), err);
    }

    #[test]
    fn invalid_halfmove() {
        let err = ArrayBoard::from_fen("8/8/8/8/8/8/8/8 w - - 4294967296 1").unwrap_err();
        assert_eq!(
            FenParseError::InvalidHalfmove("4294967296".to_string()),
            err
        );
    }

    #[test]
    fn fullmove_early_end() {
        let err = ArrayBoard::from_fen("8/8/8/8/8/8/8/8 w - - 0").unwrap_err();
        assert_eq!(FenParseError::UnexpectedEnd, err);
    }

    #[test]
    fn trailing_field() {
        let err = ArrayBoard::from_fen("8/8/8/8/8/8/8/8 w - - 0 1 x").unwrap_err();
        assert_eq!(FenParseError::UnexpectedChar('x'), err);
    }

    #[test]
    fn start_position_roundtrip() {
        let str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
        assert_eq!(str, ArrayBoard::from_fen(str).unwrap().as_fen());
        assert_eq!(str, GraphBoard::from_fen(str).unwrap().as_fen());
    }

    #[test]
    fn kiwipete_roundtrip() {
        let str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R b Kq a3 3 17";
        assert_eq!(str, ArrayBoard::from_fen(str).unwrap().as_fen());
        assert_eq!(str, GraphBoard::from_fen(str).unwrap().as_fen());
    }
}
