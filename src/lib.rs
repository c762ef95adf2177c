// Copyright 2017-2021 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `chesslib` holds the authoritative state of a chess position and computes the geometric facts a legal move
//! generator needs: which pieces are pinned and which pieces give check.
//!
//! Two board representations are provided, a flat [`ArrayBoard`] and a square-graph [`GraphBoard`]. Both
//! implement [`Board`], and [`AttackAnalysis`] is written once against that trait.

pub mod analysis;
pub mod board;
pub mod core;
pub mod pieces;
pub mod state;

pub use analysis::{AttackAnalysis, Check, CheckList, Pin, PinMap};
pub use board::{ArrayBoard, Board, GraphBoard};
pub use pieces::{BoardError, PieceIndex, PieceMap};
pub use state::{BoardState, FenParseError};
