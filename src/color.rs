//! Cell and player colors.

use std::fmt;

/// Color of a cell, a dot or a player.
///
/// `Wall` marks the sentinel border. It is also reused as "both players"
/// in the one-move capture and base maps.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Color {
    #[default]
    Empty = 0,
    Black = 1,
    White = 2,
    Wall = 3,
}

/// A color that is expected to be `Black` or `White`.
pub type Player = Color;

impl Color {
    pub const PLAYERS: [Player; 2] = [Color::Black, Color::White];

    /// The opposing player. Non-player colors map to themselves.
    #[inline]
    pub const fn opp(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
            other => other,
        }
    }

    #[inline]
    pub const fn is_player(self) -> bool {
        matches!(self, Color::Black | Color::White)
    }

    /// Index into per-player arrays (Black = 0, White = 1).
    #[inline]
    pub fn index(self) -> usize {
        debug_assert!(self.is_player(), "{self:?} is not a player");
        (self as usize).wrapping_sub(1) & 1
    }

    #[inline]
    pub(crate) const fn from_bits(bits: u8) -> Color {
        match bits & 0b11 {
            0 => Color::Empty,
            1 => Color::Black,
            2 => Color::White,
            _ => Color::Wall,
        }
    }

    /// Character used in ownership and analysis maps.
    pub fn to_char(self) -> char {
        match self {
            Color::Empty => '.',
            Color::Black => 'X',
            Color::White => 'O',
            Color::Wall => '#',
        }
    }

    /// Merge a player into a per-cell marker; both players give `Wall`.
    pub(crate) fn merge(self, pla: Player) -> Color {
        match self {
            Color::Empty => pla,
            c if c == pla => c,
            _ => Color::Wall,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Color::Empty => "empty",
            Color::Black => "black",
            Color::White => "white",
            Color::Wall => "wall",
        };
        f.write_str(name)
    }
}
