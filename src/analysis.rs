// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Pin and check detection against the side to move.
//!
//! An [`AttackAnalysis`] is a snapshot computed from a board. It is not stored inside the board and does not track
//! later mutations; recompute it after the board changes.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    board::Board,
    core::{Color, Direction, Distance, Piece, PieceKind, Square, SquareSet},
    pieces::BoardError,
};

/// A piece that shields its own king from an enemy slider.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pin {
    /// Square of the pinning slider.
    pub attacker: Square,
    /// Direction from the pinned piece toward the attacker.
    pub direction: Direction,
}

/// An enemy piece attacking the king.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Check {
    pub attacker: Square,
    /// Direction from the king toward the attacker; `None` for knight checks, which do not lie on a ray.
    pub direction: Option<Direction>,
    /// King steps from the king to the attacker, always at least one.
    pub distance: Distance,
}

/// Pinned piece square to its pin. A square is pinned along at most one ray.
pub type PinMap = HashMap<Square, Pin>;

/// Checks in the order they were found: rays in [`Direction::ALL`] order, then knights.
pub type CheckList = Vec<Check>;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttackAnalysis {
    pins: PinMap,
    checks: CheckList,
    #[cfg(feature = "trace-analysis")]
    remarks: Vec<(Square, &'static str)>,
}

impl AttackAnalysis {
    /// An empty analysis: no pins, no checks.
    pub fn new() -> AttackAnalysis {
        AttackAnalysis::default()
    }

    /// Computes pins and checks for the side to move of `board`. Fails only if that side has no king.
    pub fn compute<B: Board + ?Sized>(board: &B) -> Result<AttackAnalysis, BoardError> {
        let mut analysis = AttackAnalysis::new();
        analysis.recompute(board)?;
        Ok(analysis)
    }

    /// Discards every pin and check.
    pub fn clear(&mut self) {
        self.pins.clear();
        self.checks.clear();
        #[cfg(feature = "trace-analysis")]
        self.remarks.clear();
    }

    /// Clears this analysis and refills it from `board`, reusing its allocations. On error the analysis is left
    /// empty.
    pub fn recompute<B: Board + ?Sized>(&mut self, board: &B) -> Result<(), BoardError> {
        self.clear();
        let us = board.side_to_move();
        let king = board.king_position(us)?;
        for dir in Direction::ALL {
            self.walk_ray(board, us, king, dir);
        }

        self.find_knight_checks(board, us, king);
        tracing::debug!(
            pins = self.pins.len(),
            checks = self.checks.len(),
            "attack analysis complete"
        );
        Ok(())
    }

    fn walk_ray<B: Board + ?Sized>(&mut self, board: &B, us: Color, king: Square, dir: Direction) {
        let (first, piece, distance) = match board.first_occupied(king, dir) {
            Some(hit) => hit,
            None => return,
        };

        if piece.color != us {
            if attacks_king_along(piece, dir, distance) {
                self.add_check(first, Some(dir), distance);
            } else {
                self.remark(first, "enemy piece blocks ray");
            }
            return;
        }

        // A friendly piece is the first blocker; it is pinned if the next piece behind it is an enemy slider
        // moving along this ray.
        match board.first_occupied(first, dir) {
            Some((attacker, behind, _)) if behind.color != us && behind.kind.slides_along(dir) => {
                tracing::trace!(pinned = %first, attacker = %attacker, ?dir, "pin");
                self.pins.insert(
                    first,
                    Pin {
                        attacker,
                        direction: dir,
                    },
                );
                self.remark(first, "pinned");
            }
            _ => self.remark(first, "friendly piece shields king"),
        }
    }

    fn find_knight_checks<B: Board + ?Sized>(&mut self, board: &B, us: Color, king: Square) {
        for target in board.knight_jumps(king).into_iter().flatten() {
            match board.piece_at(target) {
                Some(Piece {
                    color,
                    kind: PieceKind::Knight,
                }) if color != us => self.add_check(target, None, king.distance(target)),
                _ => {}
            }
        }
    }

    fn add_check(&mut self, attacker: Square, direction: Option<Direction>, distance: Distance) {
        tracing::trace!(attacker = %attacker, ?direction, %distance, "check");
        self.checks.push(Check {
            attacker,
            direction,
            distance,
        });
        self.remark(attacker, "gives check");
    }

    #[cfg(feature = "trace-analysis")]
    fn remark(&mut self, square: Square, remark: &'static str) {
        self.remarks.push((square, remark));
    }

    #[cfg(not(feature = "trace-analysis"))]
    fn remark(&mut self, _square: Square, _remark: &'static str) {}

    /// Notes recorded for each square examined by the last pass.
    #[cfg(feature = "trace-analysis")]
    pub fn remarks(&self) -> &[(Square, &'static str)] {
        &self.remarks
    }

    pub fn pins(&self) -> &PinMap {
        &self.pins
    }

    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// The direction from a pinned piece toward its pinner, or `None` if the square is not pinned.
    pub fn pin_direction(&self, square: Square) -> Option<Direction> {
        self.pins.get(&square).map(|pin| pin.direction)
    }

    pub fn is_pinned(&self, square: Square) -> bool {
        self.pins.contains_key(&square)
    }

    pub fn pinned(&self) -> SquareSet {
        self.pins.keys().copied().collect()
    }

    pub fn is_check(&self) -> bool {
        !self.checks.is_empty()
    }

    pub fn is_double_check(&self) -> bool {
        self.checks.len() >= 2
    }
}

/// Whether an enemy piece, first on the ray from the king in direction `dir`, attacks the king directly.
fn attacks_king_along(piece: Piece, dir: Direction, distance: Distance) -> bool {
    if piece.kind.slides_along(dir) {
        return true;
    }

    if distance.steps() != 1 {
        return false;
    }

    match piece.kind {
        PieceKind::King => return true,
        PieceKind::Pawn => {}
        _ => return false,
    }

    // Pawns capture diagonally forward, so the king sees an attacking pawn diagonally "behind" it from the pawn's
    // point of view.
    match piece.color {
        Color::Black => matches!(dir, Direction::NorthEast | Direction::NorthWest),
        Color::White => matches!(dir, Direction::SouthEast | Direction::SouthWest),
    }
}
