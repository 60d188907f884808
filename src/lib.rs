//! Dots-Rules: the rules engine of the game of Dots.
//!
//! Players alternately place dots on a grid. A chain of dots that encloses
//! opponent dots forms a base and captures them; a player may instead end
//! the game by grounding, handing every dot not connected to the edge to
//! the opponent. This crate implements the board, capture resolution,
//! grounding, position hashing, exact undo, symmetries and game scoring.
//!
//! ## Modules
//!
//! - [`constants`] - Field size limits and special locations
//! - [`board`] - Core board state, legality, move records and undo
//! - [`capture`] - Enclosure analysis, bases, territory and suicide
//! - [`grounding`] - Grounding propagation and the grounding move
//! - [`zobrist`] - Position hash keys
//! - [`symmetry`] - The 8 field symmetries
//! - [`history`] - Game-level scoring and end detection
//! - [`rules`] - Rule parameters and start positions
//! - [`field`] - Text diagrams for tests and tools
//!
//! ## Example
//!
//! ```
//! use dots_rules::color::Color;
//! use dots_rules::field::parse_field;
//! use dots_rules::rules::Rules;
//!
//! let mut board = parse_field(
//!     "
//!     .x.
//!     x.x
//!     ...
//!     ",
//!     Rules::empty_start(),
//! )
//! .unwrap();
//!
//! // White plays inside, Black closes the base.
//! board.play_move_recorded(board.loc(1, 1), Color::White).unwrap();
//! let record = board.play_move_recorded(board.loc(1, 2), Color::Black).unwrap();
//! assert_eq!(board.num_white_captures(), 1);
//!
//! board.undo(&record);
//! assert_eq!(board.num_white_captures(), 0);
//! ```

pub mod board;
pub mod capture;
pub mod color;
pub mod constants;
pub mod error;
pub mod field;
pub mod grounding;
pub mod history;
pub mod location;
pub mod rules;
pub mod state;
pub mod symmetry;
pub mod zobrist;
