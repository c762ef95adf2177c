// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use crate::{
    board::{fen, place_piece, render, take_piece, Board},
    core::{Direction, Piece, Square, KNIGHT_JUMPS},
    pieces::{BoardError, PieceIndex},
    state::{BoardState, FenParseError},
};

/// A dense board: 64 cells holding a piece or nothing, the piece location index, and position metadata. Adjacency
/// is computed from coordinates on demand.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayBoard {
    cells: [Option<Piece>; 64],
    pieces: PieceIndex,
    state: BoardState,
}

impl ArrayBoard {
    pub fn new() -> ArrayBoard {
        ArrayBoard {
            cells: [None; 64],
            pieces: PieceIndex::new(),
            state: BoardState::new(),
        }
    }

    pub fn from_start_position() -> ArrayBoard {
        // The start position is a constant and always parses.
        ArrayBoard::from_fen(fen::START_POSITION).unwrap()
    }

    /// Constructs a new board from a FEN representation of a board position.
    pub fn from_fen(fen: impl AsRef<str>) -> Result<ArrayBoard, FenParseError> {
        let mut board = ArrayBoard::new();
        fen::read_fen(&mut board, fen.as_ref())?;
        tracing::debug!(fen = fen.as_ref(), "constructed array board");
        Ok(board)
    }

    /// The raw cells, a1 first.
    pub fn cells(&self) -> &[Option<Piece>; 64] {
        &self.cells
    }
}

impl Board for ArrayBoard {
    fn state(&self) -> &BoardState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut BoardState {
        &mut self.state
    }

    fn pieces(&self) -> &PieceIndex {
        &self.pieces
    }

    fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells.get(square.index()).copied().flatten()
    }

    fn neighbor(&self, square: Square, dir: Direction) -> Option<Square> {
        square.step(dir)
    }

    fn knight_jumps(&self, square: Square) -> [Option<Square>; 8] {
        KNIGHT_JUMPS.map(|(ranks, files)| square.offset(ranks, files))
    }

    fn add_piece(&mut self, square: Square, piece: Piece) -> Result<(), BoardError> {
        place_piece(&mut self.cells, &mut self.pieces, square, piece)
    }

    fn remove_piece(&mut self, square: Square) -> Result<Piece, BoardError> {
        take_piece(&mut self.cells, &mut self.pieces, square)
    }
}

impl Default for ArrayBoard {
    fn default() -> Self {
        ArrayBoard::new()
    }
}

impl fmt::Display for ArrayBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        render(self, f)
    }
}
