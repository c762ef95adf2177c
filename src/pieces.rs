// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Reverse lookup from piece identity to the squares that piece occupies, partitioned by color.

use thiserror::Error;

use crate::core::{Color, Piece, PieceKind, Square, SquareSet, COLORS, PIECE_KINDS};

/// Errors raised when a board is asked to do something its invariants forbid.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum BoardError {
    /// Every legal position has exactly one king per side; a board without one was built or mutated incorrectly.
    #[error("{0:?} king could not be found")]
    KingNotFound(Color),
    #[error("square {0} is already occupied")]
    SquareOccupied(Square),
    #[error("square {0} is empty")]
    SquareEmpty(Square),
    #[error("square {0} is off the board")]
    OffBoard(Square),
}

/// The pieces of a single color: one SquareSet per piece kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PieceMap {
    sets_by_kind: [SquareSet; 6],
}

impl PieceMap {
    pub fn positions(&self, kind: PieceKind) -> SquareSet {
        self.sets_by_kind[kind as usize]
    }

    /// Every square holding a piece of this color.
    pub fn occupancy(&self) -> SquareSet {
        self.sets_by_kind
            .iter()
            .fold(SquareSet::empty(), |acc, &set| acc | set)
    }

    pub fn len(&self) -> usize {
        self.sets_by_kind.iter().map(|set| set.len() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sets_by_kind.iter().all(|set| set.is_empty())
    }

    pub fn insert(&mut self, kind: PieceKind, square: Square) {
        self.sets_by_kind[kind as usize].insert(square);
    }

    pub fn remove(&mut self, kind: PieceKind, square: Square) -> bool {
        self.sets_by_kind[kind as usize].remove(square)
    }

    /// Enumerates every (kind, square) pair, grouped by kind.
    pub fn iter(&self) -> impl Iterator<Item = (PieceKind, Square)> + '_ {
        PIECE_KINDS
            .iter()
            .flat_map(move |&kind| self.positions(kind).into_iter().map(move |sq| (kind, sq)))
    }
}

/// Piece location index for both colors. Kept in lock-step with a board's cells by the board that owns it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PieceIndex {
    by_color: [PieceMap; 2],
}

impl PieceIndex {
    pub fn new() -> PieceIndex {
        PieceIndex::default()
    }

    pub fn side(&self, color: Color) -> &PieceMap {
        &self.by_color[color as usize]
    }

    pub fn side_mut(&mut self, color: Color) -> &mut PieceMap {
        &mut self.by_color[color as usize]
    }

    /// Returns the square of the king of the given color.
    pub fn king_position(&self, color: Color) -> Result<Square, BoardError> {
        self.side(color)
            .positions(PieceKind::King)
            .first()
            .ok_or(BoardError::KingNotFound(color))
    }

    /// Returns every square holding exactly this piece. Empty if the piece has no instances.
    pub fn piece_positions(&self, piece: Piece) -> SquareSet {
        self.side(piece.color).positions(piece.kind)
    }

    pub fn add(&mut self, piece: Piece, square: Square) {
        self.side_mut(piece.color).insert(piece.kind, square);
    }

    pub fn remove(&mut self, piece: Piece, square: Square) -> bool {
        self.side_mut(piece.color).remove(piece.kind, square)
    }

    pub fn relocate(&mut self, piece: Piece, from: Square, to: Square) {
        let side = self.side_mut(piece.color);
        side.remove(piece.kind, from);
        side.insert(piece.kind, to);
    }

    /// Enumerates the pieces of one color with their squares.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Piece, Square)> + '_ {
        self.side(color)
            .iter()
            .map(move |(kind, sq)| (Piece::new(color, kind), sq))
    }

    pub fn count(&self, color: Color) -> usize {
        self.side(color).len()
    }

    /// Enumerates every indexed piece with its square, white first.
    pub fn iter(&self) -> impl Iterator<Item = (Piece, Square)> + '_ {
        COLORS.iter().flat_map(move |&color| self.pieces(color))
    }
}

#[cfg(test)]
mod tests {
    use super::{BoardError, PieceIndex};
    use crate::core::*;

    const WHITE_KING: Piece = Piece::new(Color::White, PieceKind::King);
    const WHITE_ROOK: Piece = Piece::new(Color::White, PieceKind::Rook);
    const BLACK_KING: Piece = Piece::new(Color::Black, PieceKind::King);

    #[test]
    fn king_lookup() {
        let mut index = PieceIndex::new();
        index.add(WHITE_KING, E1);
        index.add(BLACK_KING, E8);
        assert_eq!(Ok(E1), index.king_position(Color::White));
        assert_eq!(Ok(E8), index.king_position(Color::Black));
    }

    #[test]
    fn missing_king() {
        let mut index = PieceIndex::new();
        index.add(BLACK_KING, E8);
        assert_eq!(
            Err(BoardError::KingNotFound(Color::White)),
            index.king_position(Color::White)
        );
    }

    #[test]
    fn multi_valued() {
        let mut index = PieceIndex::new();
        index.add(WHITE_ROOK, A1);
        index.add(WHITE_ROOK, H1);
        let rooks: Vec<_> = index.piece_positions(WHITE_ROOK).into_iter().collect();
        assert_eq!(vec![A1, H1], rooks);
        assert!(index
            .piece_positions(Piece::new(Color::Black, PieceKind::Rook))
            .is_empty());
        assert!(index
            .piece_positions(Piece::new(Color::White, PieceKind::Queen))
            .is_empty());
    }

    #[test]
    fn relocate_and_remove() {
        let mut index = PieceIndex::new();
        index.add(WHITE_ROOK, A1);
        index.relocate(WHITE_ROOK, A1, A5);
        assert!(!index.piece_positions(WHITE_ROOK).contains(A1));
        assert!(index.piece_positions(WHITE_ROOK).contains(A5));
        assert!(index.remove(WHITE_ROOK, A5));
        assert!(!index.remove(WHITE_ROOK, A5));
        assert!(index.side(Color::White).is_empty());
    }

    #[test]
    fn enumeration() {
        let mut index = PieceIndex::new();
        index.add(WHITE_KING, E1);
        index.add(WHITE_ROOK, H1);
        index.add(BLACK_KING, E8);
        assert_eq!(2, index.count(Color::White));
        assert_eq!(1, index.count(Color::Black));
        let black: Vec<_> = index.pieces(Color::Black).collect();
        assert_eq!(vec![(BLACK_KING, E8)], black);
        let all: Vec<_> = index.iter().collect();
        assert_eq!(
            vec![(WHITE_ROOK, H1), (WHITE_KING, E1), (BLACK_KING, E8)],
            all
        );
        assert_eq!(2, index.side(Color::White).occupancy().len());
    }
}
