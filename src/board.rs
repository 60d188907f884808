//! Dots board representation and move execution.
//!
//! This module owns the board state and the operations that mutate it:
//! - A 1D cell array with a one-cell wall border (see [`crate::location`])
//! - Move application, exact undo through [`MoveRecord`]
//! - Legality, suicide and capture queries
//! - Capture counters, grounding scores and the incremental position hash
//! - Start positions, ownership and the acceptable komi range
//!
//! Every cell mutation goes through [`Board::set_cell`], which keeps the
//! counters and the hash in step with the cells. The capture resolver and
//! the grounding propagator live in [`crate::capture`] and
//! [`crate::grounding`] as further `impl Board` blocks.

use std::fmt;

use tracing::debug;

use crate::color::{Color, Player};
use crate::constants::{GROUND_LOC, MAX_LEN_X, MAX_LEN_Y, MIN_LEN};
use crate::error::{DotsError, MoveError, Result};
use crate::location::{Loc, Move, arr_size, get_loc, get_x, get_y};
use crate::rules::{Rules, StartPos};
use crate::state::State;
use crate::zobrist;

/// One cell transition caused by a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellChange {
    pub loc: Loc,
    pub before: State,
    pub after: State,
}

/// Everything needed to take a move back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveRecord {
    pub loc: Loc,
    pub pla: Player,
    /// Cell transitions in the order they were applied.
    pub changes: Vec<CellChange>,
    pub hash_before: u64,
    pub hash_after: u64,
    /// `[black dots captured, white dots captured]` before the move.
    pub captures_before: [usize; 2],
}

impl MoveRecord {
    pub fn is_ground(&self) -> bool {
        self.loc == GROUND_LOC
    }

    /// Dots that were live before the move and are captured after it.
    pub fn captured_dots(&self) -> impl Iterator<Item = Loc> + '_ {
        self.changes
            .iter()
            .filter(|c| !c.before.is_captured() && c.after.is_captured())
            .map(|c| c.loc)
    }

    /// Dots that were captured before the move and are live after it.
    pub fn freed_dots(&self) -> impl Iterator<Item = Loc> + '_ {
        self.changes
            .iter()
            .filter(|c| c.before.is_captured() && !c.after.is_captured())
            .map(|c| c.loc)
    }

    /// Cells whose grounded flag flipped, with the new value.
    pub fn grounding_changes(&self) -> impl Iterator<Item = (Loc, bool)> + '_ {
        self.changes
            .iter()
            .filter(|c| c.before.is_grounded() != c.after.is_grounded())
            .map(|c| (c.loc, c.after.is_grounded()))
    }
}

/// A Dots position.
///
/// Cloning is a flat copy of the cell array and counters, which is how
/// parallel explorers branch.
#[derive(Clone, Debug)]
pub struct Board {
    pub x_size: usize,
    pub y_size: usize,
    pub rules: Rules,
    pub(crate) states: Vec<State>,
    /// Dots of each player currently captured, indexed by [`Color::index`].
    pub(crate) captured: [usize; 2],
    /// Dots each player has placed.
    pub(crate) placed: [usize; 2],
    /// Ungrounded cells that hold a dot, per active color.
    pub(crate) ungrounded: [usize; 2],
    pub(crate) pos_hash: u64,
    pub(crate) start_moves: Vec<Move>,
}

impl Board {
    /// Create an empty field. Start stones are placed by [`Board::set_start_pos`].
    pub fn new(x_size: usize, y_size: usize, rules: Rules) -> Result<Self> {
        if !(MIN_LEN..=MAX_LEN_X).contains(&x_size) || !(MIN_LEN..=MAX_LEN_Y).contains(&y_size) {
            return Err(DotsError::InvalidSize {
                x: x_size,
                y: y_size,
            });
        }
        let mut states = vec![State::WALL; arr_size(x_size, y_size)];
        for y in 0..y_size {
            for x in 0..x_size {
                states[get_loc(x, y, x_size)] = State::EMPTY;
            }
        }
        Ok(Board {
            x_size,
            y_size,
            rules,
            states,
            captured: [0; 2],
            placed: [0; 2],
            ungrounded: [0; 2],
            pos_hash: zobrist::empty_field_hash(x_size, y_size),
            start_moves: Vec::new(),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[inline]
    pub fn loc(&self, x: usize, y: usize) -> Loc {
        get_loc(x, y, self.x_size)
    }

    #[inline]
    pub fn xy(&self, loc: Loc) -> (usize, usize) {
        (get_x(loc, self.x_size), get_y(loc, self.x_size))
    }

    #[inline]
    pub fn arr_size(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn state(&self, loc: Loc) -> State {
        self.states[loc]
    }

    /// State at `(x, y)`; coordinates must be on the field.
    #[inline]
    pub fn state_at(&self, x: usize, y: usize) -> State {
        self.states[self.loc(x, y)]
    }

    #[inline]
    pub fn is_on_board(&self, loc: Loc) -> bool {
        loc < self.states.len() && !self.states[loc].is_wall()
    }

    /// All playable locations in row-major order.
    pub fn field_locs(&self) -> impl Iterator<Item = Loc> + '_ {
        (0..self.y_size).flat_map(move |y| (0..self.x_size).map(move |x| self.loc(x, y)))
    }

    pub fn pos_hash(&self) -> u64 {
        self.pos_hash
    }

    /// Black dots currently captured by White.
    pub fn num_black_captures(&self) -> usize {
        self.captured[Color::Black.index()]
    }

    /// White dots currently captured by Black.
    pub fn num_white_captures(&self) -> usize {
        self.captured[Color::White.index()]
    }

    pub fn num_placed(&self, pla: Player) -> usize {
        self.placed[pla.index()]
    }

    pub fn start_moves(&self) -> &[Move] {
        &self.start_moves
    }

    // =========================================================================
    // Scores
    // =========================================================================

    /// Captured black dots minus captured white dots.
    pub fn white_score(&self) -> i32 {
        self.num_black_captures() as i32 - self.num_white_captures() as i32
    }

    pub fn black_score(&self) -> i32 {
        -self.white_score()
    }

    /// White's score if Black grounded now: Black's ungrounded dots are
    /// lost and the white dots inside Black's ungrounded bases are freed.
    pub fn white_score_if_black_grounds(&self) -> i32 {
        self.white_score() + self.ungrounded[Color::Black.index()] as i32
    }

    /// Black's score if White grounded now.
    pub fn black_score_if_white_grounds(&self) -> i32 {
        self.black_score() + self.ungrounded[Color::White.index()] as i32
    }

    /// Mark captured and, for a grounding player, about-to-be-lost dots.
    ///
    /// `grounding` is `Empty` for the plain capture count, or the player
    /// assumed to ground: that player's ungrounded dots go to the opponent
    /// and the opponent dots it holds in ungrounded bases are freed.
    /// Returns the owner of every cell (indexed by `Loc`) and White's score.
    pub fn calculate_ownership_and_white_score(&self, grounding: Color) -> (Vec<Color>, i32) {
        let mut owners = vec![Color::Empty; self.states.len()];
        for loc in self.field_locs() {
            let s = self.states[loc];
            if s.is_captured() {
                owners[loc] = s.active();
            }
            if grounding.is_player()
                && s.holds_dot()
                && s.active() == grounding
                && !s.is_grounded()
            {
                owners[loc] = if s.placed() == grounding {
                    grounding.opp()
                } else {
                    Color::Empty
                };
            }
        }
        let white_score = match grounding {
            Color::Black => self.white_score_if_black_grounds(),
            Color::White => -self.black_score_if_white_grounds(),
            _ => self.white_score(),
        };
        (owners, white_score)
    }

    /// Komi values that keep the game winnable for both sides.
    ///
    /// With `b` live black dots (plus `extra_black_moves`) and `w` live white
    /// dots the range is `[-b, w]` when draws are allowed, otherwise
    /// `[-b + 0.5, w - 0.5]`.
    pub fn get_acceptable_komi_range(&self, allow_draw: bool, extra_black_moves: usize) -> (f32, f32) {
        let mut live = [0usize; 2];
        for loc in self.field_locs() {
            let s = self.states[loc];
            if s.placed().is_player() && s.placed() == s.active() {
                live[s.placed().index()] += 1;
            }
        }
        let black = (live[Color::Black.index()] + extra_black_moves) as f32;
        let white = live[Color::White.index()] as f32;
        if allow_draw {
            (-black, white)
        } else {
            (-black + 0.5, white - 0.5)
        }
    }

    // =========================================================================
    // Legality
    // =========================================================================

    /// Whether `pla` may play at `loc`. The grounding move is always legal.
    pub fn is_legal(&self, loc: Loc, pla: Player) -> bool {
        self.check_move(loc, pla).is_ok()
    }

    fn check_move(&self, loc: Loc, pla: Player) -> std::result::Result<(), MoveError> {
        if loc == GROUND_LOC {
            return Ok(());
        }
        if !self.is_on_board(loc) {
            return Err(MoveError::OffBoard(loc));
        }
        if !self.states[loc].is_free() {
            return Err(MoveError::Occupied(loc));
        }
        if !self.rules.multi_stone_suicide_legal && self.is_suicide(loc, pla) {
            return Err(MoveError::Suicide(loc));
        }
        Ok(())
    }

    /// Whether `pla` has any legal move that is not a suicide.
    pub fn has_reasonable_move(&self, pla: Player) -> bool {
        self.field_locs()
            .any(|loc| self.states[loc].is_free() && !self.is_suicide(loc, pla))
    }

    // =========================================================================
    // Move Execution
    // =========================================================================

    /// Play a move and return the record needed to undo it.
    ///
    /// `GROUND_LOC` plays the grounding move for `pla`.
    pub fn play_move_recorded(&mut self, loc: Loc, pla: Player) -> std::result::Result<MoveRecord, MoveError> {
        self.check_move(loc, pla)?;
        let hash_before = self.pos_hash;
        let captures_before = self.captured;
        let mut changes = Vec::new();
        self.apply_move(loc, pla, Some(&mut changes));
        Ok(MoveRecord {
            loc,
            pla,
            changes,
            hash_before,
            hash_after: self.pos_hash,
            captures_before,
        })
    }

    /// Play a move without legality checks or an undo record.
    pub fn play_move_assume_legal(&mut self, loc: Loc, pla: Player) {
        self.apply_move(loc, pla, None);
    }

    fn apply_move(&mut self, loc: Loc, pla: Player, record: Option<&mut Vec<CellChange>>) {
        debug_assert!(pla.is_player(), "{pla:?} cannot move");
        if loc == GROUND_LOC {
            self.apply_ground_move(pla, record);
        } else {
            self.apply_dot(loc, pla, record);
        }
        self.debug_check_counters();
    }

    /// Take back a move played with [`Board::play_move_recorded`].
    ///
    /// # Panics
    /// If the board is not in the state the record left it in.
    pub fn undo(&mut self, record: &MoveRecord) {
        assert_eq!(
            self.pos_hash, record.hash_after,
            "undo of a move record that does not match the board"
        );
        for change in record.changes.iter().rev() {
            debug_assert_eq!(self.states[change.loc], change.after);
            self.set_cell(change.loc, change.before, None);
        }
        assert_eq!(self.pos_hash, record.hash_before);
        assert_eq!(self.captured, record.captures_before);
        self.debug_check_counters();
    }

    /// Change one cell, keeping counters and hash in step.
    pub(crate) fn set_cell(&mut self, loc: Loc, new: State, record: Option<&mut Vec<CellChange>>) {
        let old = self.states[loc];
        if old == new {
            return;
        }
        let keys = zobrist::tables();
        self.pos_hash ^= keys.cell(old, loc) ^ keys.cell(new, loc);
        self.account(old, false);
        self.account(new, true);
        self.states[loc] = new;
        if let Some(changes) = record {
            changes.push(CellChange {
                loc,
                before: old,
                after: new,
            });
        }
    }

    fn account(&mut self, state: State, add: bool) {
        let keys = zobrist::tables();
        let step = |count: usize| if add { count + 1 } else { count - 1 };

        let placed = state.placed();
        if placed.is_player() {
            let i = placed.index();
            let count = self.placed[i];
            self.placed[i] = step(count);
            self.pos_hash ^= keys.placed(placed, count) ^ keys.placed(placed, self.placed[i]);

            if state.is_captured() {
                let count = self.captured[i];
                self.captured[i] = step(count);
                self.pos_hash ^= keys.captures(placed, count) ^ keys.captures(placed, self.captured[i]);
            }
        }
        if state.holds_dot() && !state.is_grounded() {
            let i = state.active().index();
            self.ungrounded[i] = step(self.ungrounded[i]);
        }
    }

    /// Hash of the current position computed from scratch.
    pub fn compute_hash(&self) -> u64 {
        let keys = zobrist::tables();
        let mut h = keys.size(self.x_size, self.y_size);
        for pla in Color::PLAYERS {
            h ^= keys.captures(pla, self.captured[pla.index()]);
            h ^= keys.placed(pla, self.placed[pla.index()]);
        }
        for loc in self.field_locs() {
            h ^= keys.cell(self.states[loc], loc);
        }
        h
    }

    /// Recount captures, placed and ungrounded dots from the cells.
    pub(crate) fn recount(&self) -> ([usize; 2], [usize; 2], [usize; 2]) {
        let mut captured = [0; 2];
        let mut placed = [0; 2];
        let mut ungrounded = [0; 2];
        for loc in self.field_locs() {
            let s = self.states[loc];
            if s.placed().is_player() {
                placed[s.placed().index()] += 1;
                if s.is_captured() {
                    captured[s.placed().index()] += 1;
                }
            }
            if s.holds_dot() && !s.is_grounded() {
                ungrounded[s.active().index()] += 1;
            }
        }
        (captured, placed, ungrounded)
    }

    fn debug_check_counters(&self) {
        if cfg!(debug_assertions) {
            let (captured, placed, ungrounded) = self.recount();
            debug_assert_eq!(self.captured, captured, "capture counters out of sync");
            debug_assert_eq!(self.placed, placed, "placed dot counters out of sync");
            debug_assert_eq!(self.ungrounded, ungrounded, "ungrounded counters out of sync");
            debug_assert_eq!(self.pos_hash, self.compute_hash(), "incremental hash out of sync");
        }
    }

    // =========================================================================
    // Start Positions
    // =========================================================================

    /// Place the start pattern of `rules.start_pos` and return the player to move.
    ///
    /// The pattern is centered unless `rules.start_pos_is_random` is set, in
    /// which case `rng` picks its offset.
    pub fn set_start_pos(&mut self, rng: &mut fastrand::Rng) -> Result<Player> {
        let start_pos = self.rules.start_pos;
        let (min_x, min_y) = start_pos.min_size();
        if self.x_size < min_x || self.y_size < min_y {
            return Err(DotsError::StartPosTooLarge {
                pos: start_pos.to_string(),
                x: self.x_size,
                y: self.y_size,
            });
        }
        let moves = if self.rules.start_pos_is_random {
            random_start_moves(start_pos, self.x_size, self.y_size, rng)
        } else {
            canonical_start_moves(start_pos, self.x_size, self.y_size)
        };
        self.place_start_moves(&moves)?;
        debug!(start_pos = %start_pos, random = self.rules.start_pos_is_random, "start position placed");
        Ok(if start_pos == StartPos::Single {
            Color::White
        } else {
            Color::Black
        })
    }

    /// Place dots that form the start position and remember them as such.
    pub fn place_start_moves(&mut self, moves: &[Move]) -> Result<()> {
        for mv in moves {
            self.check_move(mv.loc, mv.pla)?;
            if mv.loc == GROUND_LOC {
                return Err(MoveError::OffBoard(mv.loc).into());
            }
            self.play_move_assume_legal(mv.loc, mv.pla);
            self.start_moves.push(*mv);
        }
        Ok(())
    }

    /// Whether the remembered start moves are the centered pattern.
    pub(crate) fn start_moves_are_canonical(&self) -> bool {
        let mut actual = self.start_moves.clone();
        let mut expected = canonical_start_moves(self.rules.start_pos, self.x_size, self.y_size);
        actual.sort();
        expected.sort();
        actual == expected
    }
}

fn cross(x0: usize, y0: usize, x_size: usize) -> [Move; 4] {
    [
        Move::new(get_loc(x0, y0, x_size), Color::Black),
        Move::new(get_loc(x0 + 1, y0, x_size), Color::White),
        Move::new(get_loc(x0, y0 + 1, x_size), Color::White),
        Move::new(get_loc(x0 + 1, y0 + 1, x_size), Color::Black),
    ]
}

/// Start moves with the pattern in its standard place.
pub fn canonical_start_moves(start_pos: StartPos, x_size: usize, y_size: usize) -> Vec<Move> {
    let (min_x, min_y) = start_pos.min_size();
    if x_size < min_x || y_size < min_y {
        return Vec::new();
    }
    match start_pos {
        StartPos::Empty => Vec::new(),
        StartPos::Single => vec![Move::new(
            get_loc((x_size - 1) / 2, (y_size - 1) / 2, x_size),
            Color::Black,
        )],
        StartPos::Cross => cross((x_size - 1) / 2, (y_size - 1) / 2, x_size).to_vec(),
        StartPos::Cross4 => {
            let a = (x_size - 2) / 4;
            let b = (y_size - 2) / 4;
            let xs = [a, x_size - 2 - a];
            let ys = [b, y_size - 2 - b];
            ys.iter()
                .flat_map(|&y0| xs.iter().flat_map(move |&x0| cross(x0, y0, x_size)))
                .collect()
        }
    }
}

fn random_start_moves(start_pos: StartPos, x_size: usize, y_size: usize, rng: &mut fastrand::Rng) -> Vec<Move> {
    match start_pos {
        StartPos::Empty => Vec::new(),
        StartPos::Single => vec![Move::new(
            get_loc(rng.usize(..x_size), rng.usize(..y_size), x_size),
            Color::Black,
        )],
        StartPos::Cross => cross(rng.usize(..=x_size - 2), rng.usize(..=y_size - 2), x_size).to_vec(),
        StartPos::Cross4 => {
            // One cross per quadrant; quadrant corners never overlap.
            let half_x = x_size / 2;
            let half_y = y_size / 2;
            let x_ranges = [(0, half_x - 2), (half_x, x_size - 2)];
            let y_ranges = [(0, half_y - 2), (half_y, y_size - 2)];
            let mut moves = Vec::with_capacity(16);
            for &(y_lo, y_hi) in &y_ranges {
                for &(x_lo, x_hi) in &x_ranges {
                    let x0 = rng.usize(x_lo..=x_hi.max(x_lo));
                    let y0 = rng.usize(y_lo..=y_hi.max(y_lo));
                    moves.extend(cross(x0, y0, x_size));
                }
            }
            moves
        }
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        let mut a = self.start_moves.clone();
        let mut b = other.start_moves.clone();
        a.sort();
        b.sort();
        self.x_size == other.x_size
            && self.y_size == other.y_size
            && self.rules == other.rules
            && self.states == other.states
            && self.captured == other.captured
            && self.placed == other.placed
            && self.ungrounded == other.ungrounded
            && self.pos_hash == other.pos_hash
            && a == b
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.y_size {
            for x in 0..self.x_size {
                let c = match self.state_at(x, y).placed() {
                    Color::Black => 'x',
                    Color::White => 'o',
                    _ => '.',
                };
                write!(f, "{c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
