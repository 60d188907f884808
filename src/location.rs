//! Grid/location model.
//!
//! A field of `x_size` by `y_size` cells is stored as a 1D array with a
//! one-cell wall border:
//! - Row `-1` and row `y_size` are wall
//! - Each row starts with a wall cell; the last cell of a row is followed by
//!   the next row's wall cell, so one shared column serves both sides
//!
//! `loc = (x + 1) + (y + 1) * (x_size + 1)`.

use crate::color::Player;

/// A cell index into the board array.
pub type Loc = usize;

/// Length of the cell array for a field of the given size.
#[inline]
pub const fn arr_size(x_size: usize, y_size: usize) -> usize {
    (x_size + 1) * (y_size + 2) + 1
}

#[inline]
pub const fn get_loc(x: usize, y: usize, x_size: usize) -> Loc {
    (x + 1) + (y + 1) * (x_size + 1)
}

#[inline]
pub const fn get_x(loc: Loc, x_size: usize) -> usize {
    loc % (x_size + 1) - 1
}

#[inline]
pub const fn get_y(loc: Loc, x_size: usize) -> usize {
    loc / (x_size + 1) - 1
}

/// The 4 orthogonal neighbors of a cell in North, West, East, South order.
/// Only valid for cells that are not on the outer wall ring, which holds
/// for every playable cell.
#[inline]
pub fn neighbors(loc: Loc, x_size: usize) -> [Loc; 4] {
    let stride = x_size + 1;
    [loc - stride, loc - 1, loc + 1, loc + stride]
}

/// A move: a location and the player making it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Move {
    pub loc: Loc,
    pub pla: Player,
}

impl Move {
    pub const fn new(loc: Loc, pla: Player) -> Self {
        Self { loc, pla }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loc_roundtrip() {
        let x_size = 5;
        for y in 0..4 {
            for x in 0..x_size {
                let loc = get_loc(x, y, x_size);
                assert_eq!(get_x(loc, x_size), x);
                assert_eq!(get_y(loc, x_size), y);
            }
        }
    }

    #[test]
    fn test_neighbors_order() {
        let x_size = 7;
        let loc = get_loc(3, 2, x_size);
        let adj = neighbors(loc, x_size);
        assert_eq!(adj[0], get_loc(3, 1, x_size));
        assert_eq!(adj[1], get_loc(2, 2, x_size));
        assert_eq!(adj[2], get_loc(4, 2, x_size));
        assert_eq!(adj[3], get_loc(3, 3, x_size));
    }

    #[test]
    fn test_last_column_wraps_into_wall() {
        let x_size = 3;
        let last = get_loc(x_size - 1, 0, x_size);
        // East of the last column is the next row's leading wall cell.
        assert_eq!(last + 1, get_loc(0, 1, x_size) - 1);
        assert!(last + 1 < arr_size(x_size, 2));
    }
}
