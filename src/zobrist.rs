//! Zobrist key tables for the position hash.
//!
//! Keys are drawn once from a fixed-seed generator, so every board in the
//! process (and every run of the program) hashes identically.
//!
//! A position hash is the XOR of:
//! - one key per cell feature (live dot, base cell, territory tag, grounded)
//! - the field width and height
//! - the absolute capture count of each player
//! - the number of dots each player has placed

use std::sync::OnceLock;

use crate::color::{Color, Player};
use crate::constants::{MAX_ARR_SIZE, MAX_CELLS, MAX_LEN_X, MAX_LEN_Y, ZOBRIST_SEED};
use crate::location::Loc;
use crate::state::State;

pub struct ZobristTables {
    dot: [Vec<u64>; 2],
    base: [Vec<u64>; 2],
    territory: [Vec<u64>; 2],
    grounded: Vec<u64>,
    size_x: Vec<u64>,
    size_y: Vec<u64>,
    captures: [Vec<u64>; 2],
    placed: [Vec<u64>; 2],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

fn make_tables() -> ZobristTables {
    let mut rng = fastrand::Rng::with_seed(ZOBRIST_SEED);
    let mut keys = |n: usize| -> Vec<u64> { (0..n).map(|_| rng.u64(..)).collect() };

    ZobristTables {
        dot: [keys(MAX_ARR_SIZE), keys(MAX_ARR_SIZE)],
        base: [keys(MAX_ARR_SIZE), keys(MAX_ARR_SIZE)],
        territory: [keys(MAX_ARR_SIZE), keys(MAX_ARR_SIZE)],
        grounded: keys(MAX_ARR_SIZE),
        size_x: keys(MAX_LEN_X + 1),
        size_y: keys(MAX_LEN_Y + 1),
        captures: [keys(MAX_CELLS + 1), keys(MAX_CELLS + 1)],
        placed: [keys(MAX_CELLS + 1), keys(MAX_CELLS + 1)],
    }
}

#[inline]
pub fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(make_tables)
}

impl ZobristTables {
    /// Contribution of one cell's state.
    ///
    /// A cell inside a base hashes by its owner alone, whatever was placed
    /// there, so captured dots are erased by the enclosing base.
    pub fn cell(&self, state: State, loc: Loc) -> u64 {
        let mut h = 0;
        let active = state.active();
        if active.is_player() {
            let i = active.index();
            h ^= if state.is_in_base() {
                self.base[i][loc]
            } else {
                self.dot[i][loc]
            };
        }
        let territory = state.territory();
        if territory.is_player() {
            h ^= self.territory[territory.index()][loc];
        }
        if state.is_grounded() {
            h ^= self.grounded[loc];
        }
        h
    }

    #[inline]
    pub fn size(&self, x_size: usize, y_size: usize) -> u64 {
        self.size_x[x_size] ^ self.size_y[y_size]
    }

    /// Key for `pla` having lost `count` dots.
    #[inline]
    pub fn captures(&self, pla: Player, count: usize) -> u64 {
        self.captures[pla.index()][count]
    }

    /// Key for `pla` having placed `count` dots.
    #[inline]
    pub fn placed(&self, pla: Player, count: usize) -> u64 {
        self.placed[pla.index()][count]
    }
}

/// Hash of an empty field of the given size.
pub fn empty_field_hash(x_size: usize, y_size: usize) -> u64 {
    let t = tables();
    let mut h = t.size(x_size, y_size);
    for pla in Color::PLAYERS {
        h ^= t.captures(pla, 0) ^ t.placed(pla, 0);
    }
    h
}
