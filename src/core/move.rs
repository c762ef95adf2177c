// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::core::*;
use serde::{Deserialize, Serialize};
use std::fmt;

const PROMO_BIT: u8 = 0x08;
const CAPTURE_BIT: u8 = 0x04;
const SPECIAL_MASK: u8 = 0x03;

/// The classification of a move. The discriminants are laid out so that classification is a bit test:
///
/// | Promo | Capt  | Spc 0 | Spc 1 | Move                   |
/// |-------|-------|-------|-------|------------------------|
/// | 0     | 0     | 0     | 0     | Quiet                  |
/// | 0     | 0     | 0     | 1     | Double Pawn            |
/// | 0     | 0     | 1     | 0     | King Castle            |
/// | 0     | 0     | 1     | 1     | Queen Castle           |
/// | 0     | 1     | 0     | 0     | Capture                |
/// | 0     | 1     | 0     | 1     | En Passant Capture     |
/// | 1     | 0     | 0     | 0     | Knight Promote         |
/// | 1     | 0     | 0     | 1     | Bishop Promote         |
/// | 1     | 0     | 1     | 0     | Rook Promote           |
/// | 1     | 0     | 1     | 1     | Queen Promote          |
/// | 1     | 1     | 0     | 0     | Knight Promote Capture |
/// | 1     | 1     | 0     | 1     | Bishop Promote Capture |
/// | 1     | 1     | 1     | 0     | Rook Promote Capture   |
/// | 1     | 1     | 1     | 1     | Queen Promote Capture  |
///
/// Thanks to [this ChessProgramming Wiki page](https://chessprogramming.wikispaces.com/Encoding+Moves)
/// for the details.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveType {
    Quiet = 0x00,
    DoublePawnPush = 0x01,
    KingSideCastle = 0x02,
    QueenSideCastle = 0x03,
    Capture = 0x04,
    EnPassantCapture = 0x05,
    KnightPromotion = 0x08,
    BishopPromotion = 0x09,
    RookPromotion = 0x0A,
    QueenPromotion = 0x0B,
    KnightPromotionCapture = 0x0C,
    BishopPromotionCapture = 0x0D,
    RookPromotionCapture = 0x0E,
    QueenPromotionCapture = 0x0F,
}

impl MoveType {
    pub const fn bits(self) -> u8 {
        self as u8
    }

    fn promotion(kind: PieceKind, capture: bool) -> MoveType {
        match (kind, capture) {
            (PieceKind::Knight, false) => MoveType::KnightPromotion,
            (PieceKind::Bishop, false) => MoveType::BishopPromotion,
            (PieceKind::Rook, false) => MoveType::RookPromotion,
            (PieceKind::Queen, false) => MoveType::QueenPromotion,
            (PieceKind::Knight, true) => MoveType::KnightPromotionCapture,
            (PieceKind::Bishop, true) => MoveType::BishopPromotionCapture,
            (PieceKind::Rook, true) => MoveType::RookPromotionCapture,
            (PieceKind::Queen, true) => MoveType::QueenPromotionCapture,
            _ => panic!("invalid promotion piece"),
        }
    }
}

/// A proposed or executed move. Immutable once constructed; every classification query is a pure function of its
/// [`MoveType`].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    source: Square,
    destination: Square,
    kind: MoveType,
    captured: Option<Piece>,
}

impl Move {
    pub fn new(source: Square, destination: Square, kind: MoveType, captured: Option<Piece>) -> Move {
        Move {
            source,
            destination,
            kind,
            captured,
        }
    }

    /// Constructs a new quiet move from the source square to the destination
    /// square.
    pub fn quiet(source: Square, dest: Square) -> Move {
        Move::new(source, dest, MoveType::Quiet, None)
    }

    /// Constructs a new capture move from the source square to the destination
    /// square.
    pub fn capture(source: Square, dest: Square, captured: Piece) -> Move {
        Move::new(source, dest, MoveType::Capture, Some(captured))
    }

    /// Constructs a new en passsant move from the source square to the
    /// destination square.
    pub fn en_passant(source: Square, dest: Square, captured: Piece) -> Move {
        Move::new(source, dest, MoveType::EnPassantCapture, Some(captured))
    }

    pub fn double_pawn_push(source: Square, dest: Square) -> Move {
        Move::new(source, dest, MoveType::DoublePawnPush, None)
    }

    /// Constructs a new promotion move, promoting the current piece to the given piece kind. Panics if the kind is
    /// not a legal promotion target.
    pub fn promotion(source: Square, dest: Square, promoted: PieceKind) -> Move {
        Move::new(source, dest, MoveType::promotion(promoted, false), None)
    }

    pub fn promotion_capture(
        source: Square,
        dest: Square,
        promoted: PieceKind,
        captured: Piece,
    ) -> Move {
        Move::new(
            source,
            dest,
            MoveType::promotion(promoted, true),
            Some(captured),
        )
    }

    /// Castles are encoded using the king's start and stop squares.
    pub fn kingside_castle(source: Square, dest: Square) -> Move {
        Move::new(source, dest, MoveType::KingSideCastle, None)
    }

    pub fn queenside_castle(source: Square, dest: Square) -> Move {
        Move::new(source, dest, MoveType::QueenSideCastle, None)
    }

    pub fn source(self) -> Square {
        self.source
    }

    pub fn destination(self) -> Square {
        self.destination
    }

    pub fn move_type(self) -> MoveType {
        self.kind
    }

    pub fn captured_piece(self) -> Option<Piece> {
        self.captured
    }

    /// If this move is a promotion, returns the piece kind that the
    /// pawn is being promoted to. Panics if the move is not a promotion.
    pub fn promotion_piece(self) -> PieceKind {
        assert!(self.is_promotion());
        match self.kind.bits() & SPECIAL_MASK {
            0 => PieceKind::Knight,
            1 => PieceKind::Bishop,
            2 => PieceKind::Rook,
            3 => PieceKind::Queen,
            _ => unreachable!(),
        }
    }

    pub fn is_quiet(self) -> bool {
        self.kind == MoveType::Quiet
    }

    pub fn is_capture(self) -> bool {
        (self.kind.bits() & CAPTURE_BIT) != 0
    }

    pub fn is_promotion(self) -> bool {
        (self.kind.bits() & PROMO_BIT) != 0
    }

    pub fn is_en_passant(self) -> bool {
        self.kind == MoveType::EnPassantCapture
    }

    pub fn is_double_pawn_push(self) -> bool {
        self.kind == MoveType::DoublePawnPush
    }

    pub fn is_castle(self) -> bool {
        matches!(
            self.kind,
            MoveType::KingSideCastle | MoveType::QueenSideCastle
        )
    }

    /// Returns an UCI-compatible string representation of this move.
    pub fn as_uci(self) -> String {
        if self.is_promotion() {
            format!(
                "{}{}{}",
                self.source,
                self.destination,
                self.promotion_piece()
            )
        } else {
            format!("{}{}", self.source, self.destination)
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_uci())
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(f, "{} ({:?}", self.as_uci(), self.kind)?;
        if let Some(captured) = self.captured {
            write!(f, " x{}", captured)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::{Move, MoveType};
    use crate::core::*;

    const BLACK_PAWN: Piece = Piece::new(Color::Black, PieceKind::Pawn);
    const BLACK_ROOK: Piece = Piece::new(Color::Black, PieceKind::Rook);

    #[test]
    fn quiet() {
        let quiet = Move::quiet(A4, A5);
        assert_eq!(A4, quiet.source());
        assert_eq!(A5, quiet.destination());
        assert_eq!(MoveType::Quiet, quiet.move_type());
        assert_eq!(None, quiet.captured_piece());
        assert!(quiet.is_quiet());
        assert!(!quiet.is_capture());
    }

    #[test]
    fn capture() {
        let capture = Move::capture(B4, C4, BLACK_ROOK);
        assert_eq!(B4, capture.source());
        assert_eq!(C4, capture.destination());
        assert_eq!(Some(BLACK_ROOK), capture.captured_piece());
        assert!(!capture.is_quiet());
        assert!(capture.is_capture());
        assert!(!capture.is_en_passant());
    }

    #[test]
    fn en_passant() {
        let ep = Move::en_passant(E5, D6, BLACK_PAWN);
        assert!(ep.is_en_passant());
        assert!(ep.is_capture());
        assert!(!ep.is_promotion());
        assert!(!ep.is_castle());
    }

    #[test]
    fn double_pawn_push() {
        let dpp = Move::double_pawn_push(D2, D4);
        assert!(dpp.is_double_pawn_push());
        assert!(!dpp.is_capture());
        assert!(!dpp.is_quiet());
    }

    fn promotion(kind: PieceKind) {
        let promo = Move::promotion(A7, A8, kind);
        assert!(promo.is_promotion());
        assert!(!promo.is_capture());
        assert_eq!(kind, promo.promotion_piece());
    }

    fn promo_capture(kind: PieceKind) {
        let promo = Move::promotion_capture(B7, C8, kind, BLACK_ROOK);
        assert!(promo.is_promotion());
        assert!(promo.is_capture());
        assert!(!promo.is_en_passant());
        assert_eq!(kind, promo.promotion_piece());
    }

    #[test]
    fn promotion_bishop() {
        promotion(PieceKind::Bishop)
    }

    #[test]
    fn promotion_knight() {
        promotion(PieceKind::Knight)
    }

    #[test]
    fn promotion_rook() {
        promotion(PieceKind::Rook)
    }

    #[test]
    fn promotion_queen() {
        promotion(PieceKind::Queen)
    }

    #[test]
    fn promotion_capture_bishop() {
        promo_capture(PieceKind::Bishop)
    }

    #[test]
    fn promotion_capture_queen() {
        promo_capture(PieceKind::Queen)
    }

    #[test]
    #[should_panic]
    fn promotion_to_king() {
        Move::promotion(A7, A8, PieceKind::King);
    }

    #[test]
    fn kingside_castle() {
        let mv = Move::kingside_castle(E1, G1);
        assert!(mv.is_castle());
        assert!(!mv.is_capture());
        assert!(!mv.is_promotion());
    }

    #[test]
    fn queenside_castle() {
        let mv = Move::queenside_castle(E8, C8);
        assert!(mv.is_castle());
        assert!(!mv.is_capture());
    }

    #[test]
    fn classification_bits() {
        assert_eq!(0x04, MoveType::Capture.bits() & 0x04);
        assert_eq!(0x04, MoveType::EnPassantCapture.bits() & 0x04);
        assert_eq!(0x08, MoveType::QueenPromotion.bits() & 0x08);
        assert_eq!(0x0C, MoveType::KnightPromotionCapture.bits() & 0x0C);
        assert_eq!(0, MoveType::KingSideCastle.bits() & 0x0C);
    }

    #[test]
    fn uci_smoke() {
        let mv = Move::quiet(A1, A2);
        assert_eq!("a1a2", mv.as_uci());
    }

    #[test]
    fn uci_promote() {
        let mv = Move::promotion(A7, A8, PieceKind::Queen);
        assert_eq!("a7a8q", mv.as_uci());
    }

    #[test]
    fn uci_kingside_castle() {
        let mv = Move::kingside_castle(E1, G1);
        assert_eq!("e1g1", mv.as_uci());
    }
}
