//! The 8 symmetries of a rectangular field.
//!
//! Transposing symmetries swap width and height. A transform is applied as
//! an optional transpose followed by flips in the new coordinates, so
//! `TransposeFlipX` maps `(x, y)` on a `W x H` field to `(H - 1 - y, x)`.

use std::fmt;

use crate::board::Board;
use crate::location::{Loc, Move, arr_size, get_loc, get_x, get_y};
use crate::state::State;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Symmetry {
    None,
    FlipY,
    FlipX,
    FlipYX,
    Transpose,
    TransposeFlipX,
    TransposeFlipY,
    TransposeFlipYX,
}

impl Symmetry {
    pub const ALL: [Symmetry; 8] = [
        Symmetry::None,
        Symmetry::FlipY,
        Symmetry::FlipX,
        Symmetry::FlipYX,
        Symmetry::Transpose,
        Symmetry::TransposeFlipX,
        Symmetry::TransposeFlipY,
        Symmetry::TransposeFlipYX,
    ];

    pub fn from_index(index: usize) -> Option<Symmetry> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// (transpose, flip x, flip y)
    fn parts(self) -> (bool, bool, bool) {
        match self {
            Symmetry::None => (false, false, false),
            Symmetry::FlipY => (false, false, true),
            Symmetry::FlipX => (false, true, false),
            Symmetry::FlipYX => (false, true, true),
            Symmetry::Transpose => (true, false, false),
            Symmetry::TransposeFlipX => (true, true, false),
            Symmetry::TransposeFlipY => (true, false, true),
            Symmetry::TransposeFlipYX => (true, true, true),
        }
    }

    pub fn is_transpose(self) -> bool {
        self.parts().0
    }

    /// The symmetry that undoes this one.
    pub fn inverse(self) -> Symmetry {
        match self {
            Symmetry::TransposeFlipX => Symmetry::TransposeFlipY,
            Symmetry::TransposeFlipY => Symmetry::TransposeFlipX,
            other => other,
        }
    }

    /// Field size after the transform.
    pub fn sym_size(self, x_size: usize, y_size: usize) -> (usize, usize) {
        if self.is_transpose() {
            (y_size, x_size)
        } else {
            (x_size, y_size)
        }
    }

    /// Map `(x, y)` on an `x_size x y_size` field.
    pub fn apply(self, x: usize, y: usize, x_size: usize, y_size: usize) -> (usize, usize) {
        let (transpose, flip_x, flip_y) = self.parts();
        let (mut nx, mut ny) = if transpose { (y, x) } else { (x, y) };
        let (nw, nh) = self.sym_size(x_size, y_size);
        if flip_x {
            nx = nw - 1 - nx;
        }
        if flip_y {
            ny = nh - 1 - ny;
        }
        (nx, ny)
    }
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Symmetry::None => "NONE",
            Symmetry::FlipY => "FLIP_Y",
            Symmetry::FlipX => "FLIP_X",
            Symmetry::FlipYX => "FLIP_Y_X",
            Symmetry::Transpose => "TRANSPOSE",
            Symmetry::TransposeFlipX => "TRANSPOSE_FLIP_X",
            Symmetry::TransposeFlipY => "TRANSPOSE_FLIP_Y",
            Symmetry::TransposeFlipYX => "TRANSPOSE_FLIP_Y_X",
        };
        f.write_str(name)
    }
}

/// Location on the transformed board of `(x, y)` on `board`.
pub fn get_sym_loc(x: usize, y: usize, board: &Board, sym: Symmetry) -> Loc {
    let (nx, ny) = sym.apply(x, y, board.x_size, board.y_size);
    let (nw, _) = sym.sym_size(board.x_size, board.y_size);
    get_loc(nx, ny, nw)
}

/// Transform a location of `board`. Non-field locations map to themselves.
pub fn get_sym_loc_of(loc: Loc, board: &Board, sym: Symmetry) -> Loc {
    if !board.is_on_board(loc) {
        return loc;
    }
    get_sym_loc(get_x(loc, board.x_size), get_y(loc, board.x_size), board, sym)
}

/// A copy of `board` with cells, counters and start moves transformed.
///
/// The hash is rebuilt for the new geometry. A board with start moves has
/// its start position flagged random unless the transformed moves are the
/// centered pattern; without start moves the flag is kept.
pub fn get_sym_board(board: &Board, sym: Symmetry) -> Board {
    let (nw, nh) = sym.sym_size(board.x_size, board.y_size);
    let mut out = board.clone();
    out.x_size = nw;
    out.y_size = nh;
    out.states = vec![State::WALL; arr_size(nw, nh)];
    for y in 0..board.y_size {
        for x in 0..board.x_size {
            let (nx, ny) = sym.apply(x, y, board.x_size, board.y_size);
            out.states[get_loc(nx, ny, nw)] = board.state_at(x, y);
        }
    }
    out.start_moves = board
        .start_moves
        .iter()
        .map(|mv| Move::new(get_sym_loc_of(mv.loc, board, sym), mv.pla))
        .collect();
    if !out.start_moves.is_empty() {
        out.rules.start_pos_is_random = !out.start_moves_are_canonical();
    }
    out.pos_hash = out.compute_hash();
    out
}
