// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A board laid out as a graph of square nodes. The topology (ray neighbors and knight jumps of every square) is
//! computed once per process and shared read-only by every [`GraphBoard`]; a board only records which piece stands
//! on which node.

use std::fmt;

use crate::{
    board::{fen, place_piece, render, take_piece, Board},
    core::{self, Direction, Distance, Piece, Square, KNIGHT_JUMPS},
    pieces::{BoardError, PieceIndex},
    state::{BoardState, FenParseError},
};

/// A node of the square graph. Links that would leave the board hold [`Square::NONE`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SquareNode {
    code: Square,
    neighbors: [Square; 8],
    knight_jumps: [Square; 8],
}

impl SquareNode {
    pub fn code(&self) -> Square {
        self.code
    }

    pub fn neighbor(&self, dir: Direction) -> Square {
        self.neighbors[dir as usize]
    }

    pub fn neighbors(&self) -> &[Square; 8] {
        &self.neighbors
    }

    pub fn knight_jumps(&self) -> &[Square; 8] {
        &self.knight_jumps
    }
}

/// The immutable square graph: one node per square plus a trailing node for the off-board sentinel, whose links
/// all point back at the sentinel.
pub struct Topology {
    nodes: [SquareNode; 65],
}

impl Topology {
    fn new() -> Topology {
        let sentinel = SquareNode {
            code: Square::NONE,
            neighbors: [Square::NONE; 8],
            knight_jumps: [Square::NONE; 8],
        };

        let mut topology = Topology {
            nodes: [sentinel; 65],
        };

        for sq in core::squares() {
            let node = &mut topology.nodes[sq.index()];
            node.code = sq;
            for dir in Direction::ALL {
                node.neighbors[dir as usize] = sq.step(dir).unwrap_or(Square::NONE);
            }
            for (slot, (ranks, files)) in node.knight_jumps.iter_mut().zip(KNIGHT_JUMPS) {
                *slot = sq.offset(ranks, files).unwrap_or(Square::NONE);
            }
        }

        topology
    }

    /// The node for a square. Any off-board value maps to the sentinel node.
    pub fn node(&self, square: Square) -> &SquareNode {
        &self.nodes[square.index().min(64)]
    }
}

lazy_static::lazy_static! {
    static ref TOPOLOGY: Topology = Topology::new();
}

pub fn topology() -> &'static Topology {
    &TOPOLOGY
}

/// A board backed by the shared square graph. Occupancy is a plain square-to-piece relation; the pieces themselves
/// are tracked by the location index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphBoard {
    occupants: [Option<Piece>; 64],
    pieces: PieceIndex,
    state: BoardState,
}

impl GraphBoard {
    pub fn new() -> GraphBoard {
        GraphBoard {
            occupants: [None; 64],
            pieces: PieceIndex::new(),
            state: BoardState::new(),
        }
    }

    pub fn from_start_position() -> GraphBoard {
        // The start position is a constant and always parses.
        GraphBoard::from_fen(fen::START_POSITION).unwrap()
    }

    /// Constructs a new board from a FEN representation of a board position.
    pub fn from_fen(fen: impl AsRef<str>) -> Result<GraphBoard, FenParseError> {
        let mut board = GraphBoard::new();
        fen::read_fen(&mut board, fen.as_ref())?;
        tracing::debug!(fen = fen.as_ref(), "constructed graph board");
        Ok(board)
    }
}

impl Board for GraphBoard {
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
        self.occupants.get(square.index()).copied().flatten()
    }

    fn neighbor(&self, square: Square, dir: Direction) -> Option<Square> {
        let next = TOPOLOGY.node(square).neighbor(dir);
        next.is_valid().then_some(next)
    }

    fn knight_jumps(&self, square: Square) -> [Option<Square>; 8] {
        let jumps = *TOPOLOGY.node(square).knight_jumps();
        jumps.map(|sq| sq.is_valid().then_some(sq))
    }

    fn add_piece(&mut self, square: Square, piece: Piece) -> Result<(), BoardError> {
        place_piece(&mut self.occupants, &mut self.pieces, square, piece)
    }

    fn remove_piece(&mut self, square: Square) -> Result<Piece, BoardError> {
        take_piece(&mut self.occupants, &mut self.pieces, square)
    }

    /// Follows neighbor links until a piece or the sentinel is reached, without any coordinate arithmetic.
    fn first_occupied(&self, from: Square, dir: Direction) -> Option<(Square, Piece, Distance)> {
        let mut steps = 1;
        let mut cursor = TOPOLOGY.node(from).neighbor(dir);
        while cursor.is_valid() {
            if let Some(piece) = self.occupants[cursor.index()] {
                return Some((cursor, piece, Distance::new(steps)));
            }

            cursor = TOPOLOGY.node(cursor).neighbor(dir);
            steps += 1;
        }

        None
    }
}

impl Default for GraphBoard {
    fn default() -> Self {
        GraphBoard::new()
    }
}

impl fmt::Display for GraphBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        render(self, f)
    }
}
