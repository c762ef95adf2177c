// Copyright 2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::core::{self, Square};
use std::fmt;
use std::ops;

/// A set of squares on the chessboard. The implementation of SquareSet is designed to mirror
/// [`std::collections::HashSet`], but is specifically designed to store squares efficiently on modern processors.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SquareSet(u64);

impl SquareSet {
    /// Creates a new, empty SquareSet.
    pub const fn empty() -> SquareSet {
        SquareSet(0)
    }

    /// Tests whether or not the given square is contained within this SquareSet. The off-board sentinel is never
    /// contained.
    pub const fn contains(&self, square: Square) -> bool {
        square.is_valid() && self.0 & (1u64 << square.0) != 0
    }

    /// Inserts a square, returning whether or not it was newly inserted.
    pub fn insert(&mut self, square: Square) -> bool {
        debug_assert!(square.is_valid());
        let fresh = !self.contains(square);
        self.0 |= 1u64 << square.0;
        fresh
    }

    /// Removes a square, returning whether or not it was present.
    pub fn remove(&mut self, square: Square) -> bool {
        let present = self.contains(square);
        if present {
            self.0 &= !(1u64 << square.0);
        }
        present
    }

    pub const fn len(&self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Returns the lowest-numbered square in the set, if any.
    pub const fn first(&self) -> Option<Square> {
        if self.0 == 0 {
            None
        } else {
            Some(Square(self.0.trailing_zeros() as u8))
        }
    }

    pub const fn or(self, other: SquareSet) -> SquareSet {
        SquareSet(self.0 | other.0)
    }

    pub fn bits(self) -> u64 {
        self.0
    }
}

impl ops::BitOr for SquareSet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIterator;

    fn into_iter(self) -> Self::IntoIter {
        SquareSetIterator(self.0)
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        let mut set = SquareSet::empty();
        for sq in iter {
            set.insert(sq);
        }
        set
    }
}

impl fmt::Display for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in core::ranks().rev() {
            for file in core::files() {
                let sq = Square::of(rank, file);
                if self.contains(sq) {
                    write!(f, " 1 ")?;
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
}

/// An iterator over squares stored in a [`SquareSet`], designed to be very efficient for modern processors.
pub struct SquareSetIterator(u64);

impl Iterator for SquareSetIterator {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            None
        } else {
            let next = self.0.trailing_zeros() as u8;
            self.0 &= self.0 - 1;
            Some(Square(next))
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for SquareSetIterator {}

#[cfg(test)]
mod tests {
    use super::SquareSet;
    use crate::core::*;

    #[test]
    fn test_set_clear() {
        let mut set = SquareSet::empty();
        assert!(!set.contains(A1));
        assert!(set.insert(A1));
        assert!(!set.insert(A1));
        assert!(set.contains(A1));
        assert!(set.remove(A1));
        assert!(!set.remove(A1));
        assert!(!set.contains(A1));
    }

    #[test]
    fn sentinel_never_contained() {
        let mut set = SquareSet::empty();
        set.insert(H8);
        assert!(!set.contains(Square::NONE));
        assert!(!set.remove(Square::NONE));
    }

    #[test]
    fn count() {
        let set: SquareSet = vec![A3, A4, A5].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.first(), Some(A3));
    }

    #[test]
    fn iter() {
        let mut set = SquareSet::empty();
        set.insert(A5);
        set.insert(A3);
        set.insert(A4);
        let squares: Vec<_> = set.into_iter().collect();
        assert_eq!(squares, vec![A3, A4, A5]);
    }
}
