// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::fmt;

use bitflags::bitflags;
use derive_more::{Display, From, Into};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SquareParseError {
    #[error("square index out of range: {0}")]
    OutOfRange(u8),
}

#[derive(Debug, Error)]
pub enum RankParseError {
    #[error("rank index out of range: {0}")]
    OutOfRange(u8),
    #[error("invalid char: {0}")]
    InvalidChar(char),
}

#[derive(Debug, Error)]
pub enum FileParseError {
    #[error("file index out of range: {0}")]
    OutOfRange(u8),
    #[error("invalid char: {0}")]
    InvalidChar(char),
}

#[derive(Debug, Error)]
pub enum PieceParseError {
    #[error("invalid char: {0}")]
    InvalidChar(char),
}

/// A square on the chessboard, or the off-board sentinel [`Square::NONE`].
///
/// Squares are numbered rank-major from a1 (0) to h8 (63).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Square(pub(crate) u8);

impl Square {
    /// The off-board sentinel. Stepping off the edge of the board lands here.
    pub const NONE: Square = Square(64);

    /// Returns the rank of this square on the chessboard.
    pub const fn rank(self) -> Rank {
        Rank(self.0 >> 3)
    }

    /// Returns the file of this square on the chessboard.
    pub const fn file(self) -> File {
        File(self.0 & 7)
    }

    /// Creates a new Square composed of a given rank and file.
    pub const fn of(rank: Rank, file: File) -> Square {
        Square(rank.0 * 8 + file.0)
    }

    /// Returns whether or not this square lies on the board.
    pub const fn is_valid(self) -> bool {
        self.0 < 64
    }

    pub const fn is_none(self) -> bool {
        !self.is_valid()
    }

    /// Returns the square `ranks` ranks and `files` files away from this one, or `None` if that square is not on
    /// the board.
    pub const fn offset(self, ranks: i8, files: i8) -> Option<Square> {
        if !self.is_valid() {
            return None;
        }

        let rank = (self.0 >> 3) as i8 + ranks;
        let file = (self.0 & 7) as i8 + files;
        if rank < 0 || rank > 7 || file < 0 || file > 7 {
            return None;
        }

        Some(Square((rank * 8 + file) as u8))
    }

    /// Returns the adjacent square in the given direction, or `None` if the step leaves the board.
    pub const fn step(self, dir: Direction) -> Option<Square> {
        let (ranks, files) = dir.delta();
        self.offset(ranks, files)
    }

    /// Number of king steps between two on-board squares.
    pub fn distance(self, other: Square) -> Distance {
        let ranks = (self.rank().0 as i8 - other.rank().0 as i8).unsigned_abs();
        let files = (self.file().0 as i8 - other.file().0 as i8).unsigned_abs();
        Distance(ranks.max(files))
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for Square {
    type Error = SquareParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value >= 64 {
            return Err(SquareParseError::OutOfRange(value));
        }

        Ok(Square(value))
    }
}

/// Accepts an on-board square or the sentinel; anything larger is rejected.
impl<'de> Deserialize<'de> for Square {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        if value == Square::NONE.0 {
            return Ok(Square::NONE);
        }

        Square::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            return write!(f, "-");
        }

        write!(f, "{}{}", self.file(), self.rank())
    }
}

pub const A1: Square = Square(0);
pub const B1: Square = Square(1);
pub const C1: Square = Square(2);
pub const D1: Square = Square(3);
pub const E1: Square = Square(4);
pub const F1: Square = Square(5);
pub const G1: Square = Square(6);
pub const H1: Square = Square(7);
pub const A2: Square = Square(8);
pub const B2: Square = Square(9);
pub const C2: Square = Square(10);
pub const D2: Square = Square(11);
pub const E2: Square = Square(12);
pub const F2: Square = Square(13);
pub const G2: Square = Square(14);
pub const H2: Square = Square(15);
pub const A3: Square = Square(16);
pub const B3: Square = Square(17);
pub const C3: Square = Square(18);
pub const D3: Square = Square(19);
pub const E3: Square = Square(20);
pub const F3: Square = Square(21);
pub const G3: Square = Square(22);
pub const H3: Square = Square(23);
pub const A4: Square = Square(24);
pub const B4: Square = Square(25);
pub const C4: Square = Square(26);
pub const D4: Square = Square(27);
pub const E4: Square = Square(28);
pub const F4: Square = Square(29);
pub const G4: Square = Square(30);
pub const H4: Square = Square(31);
pub const A5: Square = Square(32);
pub const B5: Square = Square(33);
pub const C5: Square = Square(34);
pub const D5: Square = Square(35);
pub const E5: Square = Square(36);
pub const F5: Square = Square(37);
pub const G5: Square = Square(38);
pub const H5: Square = Square(39);
pub const A6: Square = Square(40);
pub const B6: Square = Square(41);
pub const C6: Square = Square(42);
pub const D6: Square = Square(43);
pub const E6: Square = Square(44);
pub const F6: Square = Square(45);
pub const G6: Square = Square(46);
pub const H6: Square = Square(47);
pub const A7: Square = Square(48);
pub const B7: Square = Square(49);
pub const C7: Square = Square(50);
pub const D7: Square = Square(51);
pub const E7: Square = Square(52);
pub const F7: Square = Square(53);
pub const G7: Square = Square(54);
pub const H7: Square = Square(55);
pub const A8: Square = Square(56);
pub const B8: Square = Square(57);
pub const C8: Square = Square(58);
pub const D8: Square = Square(59);
pub const E8: Square = Square(60);
pub const F8: Square = Square(61);
pub const G8: Square = Square(62);
pub const H8: Square = Square(63);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Rank(u8);

impl TryFrom<u8> for Rank {
    type Error = RankParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value >= 8 {
            return Err(RankParseError::OutOfRange(value));
        }

        Ok(Rank(value))
    }
}

impl TryFrom<char> for Rank {
    type Error = RankParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '1'..='8' => Ok(Rank(value as u8 - b'1')),
            c => Err(RankParseError::InvalidChar(c)),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", (b'1' + self.0) as char)
    }
}

pub const RANK_1: Rank = Rank(0);
pub const RANK_2: Rank = Rank(1);
pub const RANK_3: Rank = Rank(2);
pub const RANK_4: Rank = Rank(3);
pub const RANK_5: Rank = Rank(4);
pub const RANK_6: Rank = Rank(5);
pub const RANK_7: Rank = Rank(6);
pub const RANK_8: Rank = Rank(7);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct File(u8);

impl TryFrom<u8> for File {
    type Error = FileParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value >= 8 {
            return Err(FileParseError::OutOfRange(value));
        }

        Ok(File(value))
    }
}

impl TryFrom<char> for File {
    type Error = FileParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'a'..='h' => Ok(File(value as u8 - b'a')),
            c => Err(FileParseError::InvalidChar(c)),
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", (b'a' + self.0) as char)
    }
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    White,
    Black,
}

#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Returns whether or not this piece attacks along the given ray until blocked.
    pub fn slides_along(self, dir: Direction) -> bool {
        match self {
            PieceKind::Bishop => dir.is_diagonal(),
            PieceKind::Rook => !dir.is_diagonal(),
            PieceKind::Queen => true,
            _ => false,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };

        write!(f, "{}", c)
    }
}

/// A piece identity: a color and a kind. Says nothing about where the piece stands.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Piece {
        Piece { color, kind }
    }
}

impl TryFrom<char> for Piece {
    type Error = PieceParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        let kind = match value.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return Err(PieceParseError::InvalidChar(value)),
        };

        let color = if value.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };

        Ok(Piece { color, kind })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = self.kind.to_string();
        match self.color {
            Color::White => write!(f, "{}", c.to_ascii_uppercase()),
            Color::Black => write!(f, "{}", c),
        }
    }
}

/// One of the eight compass rays. The declaration order is the iteration order of [`Direction::ALL`].
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    NorthEast,
    East,
    SouthEast,
    South,
    SouthWest,
    West,
    NorthWest,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    /// (rank, file) change of a single step in this direction.
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Direction::North => (1, 0),
            Direction::NorthEast => (1, 1),
            Direction::East => (0, 1),
            Direction::SouthEast => (-1, 1),
            Direction::South => (-1, 0),
            Direction::SouthWest => (-1, -1),
            Direction::West => (0, -1),
            Direction::NorthWest => (1, -1),
        }
    }

    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::NorthEast | Direction::SouthEast | Direction::SouthWest | Direction::NorthWest
        )
    }

    pub const fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::East => Direction::West,
            Direction::SouthEast => Direction::NorthWest,
            Direction::South => Direction::North,
            Direction::SouthWest => Direction::NorthEast,
            Direction::West => Direction::East,
            Direction::NorthWest => Direction::SouthEast,
        }
    }
}

/// (rank, file) offsets of the eight knight jumps.
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// Number of single steps between two squares along a ray.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
pub struct Distance(u8);

impl Distance {
    pub const fn new(steps: u8) -> Distance {
        Distance(steps)
    }

    pub const fn steps(self) -> u8 {
        self.0
    }
}

bitflags! {
    /// Castling rights for both players. No relation to the actual placement of kings and rooks is enforced.
    pub struct Castling: u8 {
        const NONE = 0;
        const WHITE_KINGSIDE = 0b0000_0001;
        const WHITE_QUEENSIDE = 0b0000_0010;
        const WHITE = Self::WHITE_KINGSIDE.bits | Self::WHITE_QUEENSIDE.bits;
        const BLACK_KINGSIDE = 0b0000_0100;
        const BLACK_QUEENSIDE = 0b0000_1000;
        const BLACK = Self::BLACK_KINGSIDE.bits | Self::BLACK_QUEENSIDE.bits;
    }
}

impl Castling {
    /// Maps a FEN castling character to the single right it grants.
    pub fn from_fen_char(c: char) -> Option<Castling> {
        match c {
            'K' => Some(Castling::WHITE_KINGSIDE),
            'Q' => Some(Castling::WHITE_QUEENSIDE),
            'k' => Some(Castling::BLACK_KINGSIDE),
            'q' => Some(Castling::BLACK_QUEENSIDE),
            _ => None,
        }
    }
}

impl Serialize for Castling {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.bits())
    }
}

impl<'de> Deserialize<'de> for Castling {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bits = u8::deserialize(deserializer)?;
        Castling::from_bits(bits)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid castling bits: {:#x}", bits)))
    }
}

macro_rules! type_iterator {
    ($name:ident, $type:ident, $max:expr) => {
        pub struct $name(u8, u8);

        impl Iterator for $name {
            type Item = $type;

            fn next(&mut self) -> Option<Self::Item> {
                if self.0 >= self.1 {
                    None
                } else {
                    let next = self.0;
                    self.0 += 1;
                    Some($type(next))
                }
            }
        }

        impl ::std::iter::DoubleEndedIterator for $name {
            fn next_back(&mut self) -> Option<Self::Item> {
                if self.1 <= self.0 {
                    None
                } else {
                    self.1 -= 1;
                    Some($type(self.1))
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name(0, $max)
            }
        }
    };
}

type_iterator!(AllSquares, Square, 64);
type_iterator!(AllRanks, Rank, 8);
type_iterator!(AllFiles, File, 8);

pub fn squares() -> AllSquares {
    AllSquares::default()
}

pub fn ranks() -> AllRanks {
    AllRanks::default()
}

pub fn files() -> AllFiles {
    AllFiles::default()
}

pub const PIECE_KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

pub const COLORS: [Color; 2] = [Color::White, Color::Black];
