// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Board storage. Two representations are provided, [`ArrayBoard`] and [`GraphBoard`], and both implement the
//! [`Board`] contract. Attack analysis is written once against that contract.

use std::fmt::{self, Write};

use crate::{
    analysis::AttackAnalysis,
    core::{self, Color, Direction, Distance, Piece, Square, SquareSet},
    pieces::{BoardError, PieceIndex},
    state::BoardState,
};

mod array;
mod fen;
mod graph;

pub use array::ArrayBoard;
pub use graph::{topology, GraphBoard, SquareNode, Topology};

/// The capability contract shared by every board representation: metadata, the piece location index, cell lookup
/// and single-step adjacency.
pub trait Board {
    fn state(&self) -> &BoardState;

    fn state_mut(&mut self) -> &mut BoardState;

    fn pieces(&self) -> &PieceIndex;

    /// The piece standing on a square, if any. The off-board sentinel is always empty.
    fn piece_at(&self, square: Square) -> Option<Piece>;

    /// The adjacent square in the given direction, or `None` at the edge of the board.
    fn neighbor(&self, square: Square, dir: Direction) -> Option<Square>;

    /// The squares a knight on `square` could jump to; `None` where the jump leaves the board.
    fn knight_jumps(&self, square: Square) -> [Option<Square>; 8];

    /// Places a piece on an empty square, indexing it.
    fn add_piece(&mut self, square: Square, piece: Piece) -> Result<(), BoardError>;

    /// Lifts the piece off a square, removing it from the index.
    fn remove_piece(&mut self, square: Square) -> Result<Piece, BoardError>;

    /// Moves the piece on `from` to `to`, returning whatever was captured on `to`. Both squares are checked
    /// before the board changes, so a failed move leaves the board untouched.
    fn move_piece(&mut self, from: Square, to: Square) -> Result<Option<Piece>, BoardError> {
        for sq in [from, to] {
            if !sq.is_valid() {
                return Err(BoardError::OffBoard(sq));
            }
        }

        if self.piece_at(from).is_none() {
            return Err(BoardError::SquareEmpty(from));
        }

        if from == to {
            return Ok(None);
        }

        let captured = match self.piece_at(to) {
            Some(_) => Some(self.remove_piece(to)?),
            None => None,
        };

        let moving = self.remove_piece(from)?;
        self.add_piece(to, moving)?;
        Ok(captured)
    }

    /// Walks from `from` (exclusive) in the given direction to the edge of the board.
    fn ray(&self, from: Square, dir: Direction) -> Ray<'_, Self> {
        Ray {
            board: self,
            cursor: from,
            dir,
        }
    }

    /// The first occupied square along a ray, with its occupant and its distance from `from`.
    fn first_occupied(&self, from: Square, dir: Direction) -> Option<(Square, Piece, Distance)> {
        self.ray(from, dir)
            .enumerate()
            .find_map(|(i, sq)| {
                self.piece_at(sq)
                    .map(|piece| (sq, piece, Distance::new(i as u8 + 1)))
            })
    }

    fn side_to_move(&self) -> Color {
        self.state().side_to_move()
    }

    fn king_position(&self, color: Color) -> Result<Square, BoardError> {
        self.pieces().king_position(color)
    }

    fn piece_positions(&self, piece: Piece) -> SquareSet {
        self.pieces().piece_positions(piece)
    }

    /// Computes pins and checks against the side to move.
    fn attack_analysis(&self) -> Result<AttackAnalysis, BoardError> {
        AttackAnalysis::compute(self)
    }

    fn as_fen(&self) -> String {
        let mut buf = String::new();
        for rank in core::ranks().rev() {
            let mut empty_squares = 0;
            for file in core::files() {
                let square = Square::of(rank, file);
                if let Some(piece) = self.piece_at(square) {
                    if empty_squares != 0 {
                        write!(&mut buf, "{}", empty_squares).unwrap();
                    }
                    write!(&mut buf, "{}", piece).unwrap();
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                write!(&mut buf, "{}", empty_squares).unwrap();
            }

            if rank != core::RANK_1 {
                buf.push('/');
            }
        }

        buf.push(' ');
        buf.push_str(&self.state().as_fen_fields());
        buf
    }
}

/// Iterator over the squares of a ray, nearest first.
pub struct Ray<'a, B: Board + ?Sized> {
    board: &'a B,
    cursor: Square,
    dir: Direction,
}

impl<'a, B: Board + ?Sized> Iterator for Ray<'a, B> {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        let next = self.board.neighbor(self.cursor, self.dir)?;
        self.cursor = next;
        Some(next)
    }
}

/// Places a piece into a cell array and the index that mirrors it.
pub(crate) fn place_piece(
    cells: &mut [Option<Piece>; 64],
    index: &mut PieceIndex,
    square: Square,
    piece: Piece,
) -> Result<(), BoardError> {
    let cell = cells
        .get_mut(square.index())
        .ok_or(BoardError::OffBoard(square))?;
    if cell.is_some() {
        return Err(BoardError::SquareOccupied(square));
    }

    *cell = Some(piece);
    index.add(piece, square);
    Ok(())
}

pub(crate) fn take_piece(
    cells: &mut [Option<Piece>; 64],
    index: &mut PieceIndex,
    square: Square,
) -> Result<Piece, BoardError> {
    let piece = cells
        .get_mut(square.index())
        .ok_or(BoardError::OffBoard(square))?
        .take()
        .ok_or(BoardError::SquareEmpty(square))?;
    index.remove(piece, square);
    Ok(piece)
}

pub(crate) fn render<B: Board + ?Sized>(board: &B, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for rank in core::ranks().rev() {
        for file in core::files() {
            let sq = Square::of(rank, file);
            if let Some(piece) = board.piece_at(sq) {
                write!(f, " {} ", piece)?;
            } else {
                write!(f, " . ")?;
            }
        }

        writeln!(f, "| {}", rank)?;
    }

    for _ in core::files() {
        write!(f, "---")?;
    }

    writeln!(f)?;
    for file in core::files() {
        write!(f, " {} ", file)?;
    }

    writeln!(f)?;
    Ok(())
}
