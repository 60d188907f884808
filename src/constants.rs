//! Constants for board dimensions, special moves and hashing.
//!
//! The board uses a 1D array representation with a one-cell wall border.
//! Unlike fixed-size Go boards, Dots fields are rectangular and sized at
//! runtime, so only the limits live here.

use crate::location::Loc;

// =============================================================================
// Board Geometry
// =============================================================================

/// Widest supported field.
pub const MAX_LEN_X: usize = 64;

/// Tallest supported field.
pub const MAX_LEN_Y: usize = 64;

/// Smallest supported side length.
pub const MIN_LEN: usize = 2;

/// Default field width for Dots games.
pub const DEFAULT_LEN_X: usize = 39;

/// Default field height for Dots games.
pub const DEFAULT_LEN_Y: usize = 32;

/// Largest cell array any board can need, wall border included.
pub const MAX_ARR_SIZE: usize = (MAX_LEN_X + 1) * (MAX_LEN_Y + 2) + 1;

/// Maximum number of playable cells.
pub const MAX_CELLS: usize = MAX_LEN_X * MAX_LEN_Y;

// =============================================================================
// Special Move Values
// =============================================================================

/// Grounding move marker (index 0 is always wall, so it never names a cell).
pub const GROUND_LOC: Loc = 0;

// =============================================================================
// Hashing
// =============================================================================

/// Seed for the Zobrist key tables. Fixed so hashes are stable across runs.
pub const ZOBRIST_SEED: u64 = 0x5EED_D075_2024_0001;
