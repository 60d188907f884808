//! Packed per-cell state.
//!
//! Bit layout of the single byte:
//!
//! | bits | field |
//! |------|-------|
//! | 0-1  | placed dot color |
//! | 2-3  | active (owning) color |
//! | 4-5  | empty-territory owner tag |
//! | 6    | inside a real base |
//! | 7    | grounded |

use std::fmt;

use crate::color::{Color, Player};

const PLACED_SHIFT: u8 = 0;
const ACTIVE_SHIFT: u8 = 2;
const TERRITORY_SHIFT: u8 = 4;
const IN_BASE_BIT: u8 = 1 << 6;
const GROUNDED_BIT: u8 = 1 << 7;

#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct State(u8);

impl State {
    /// A free cell.
    pub const EMPTY: State = State(0);

    /// The sentinel border.
    pub const WALL: State =
        State(((Color::Wall as u8) << PLACED_SHIFT) | ((Color::Wall as u8) << ACTIVE_SHIFT));

    /// A freshly placed, ungrounded dot.
    pub fn dot(pla: Player) -> State {
        State::EMPTY.with_placed(pla).with_active(pla)
    }

    #[inline]
    pub fn placed(self) -> Color {
        Color::from_bits(self.0 >> PLACED_SHIFT)
    }

    #[inline]
    pub fn active(self) -> Color {
        Color::from_bits(self.0 >> ACTIVE_SHIFT)
    }

    /// Owner of the enclosure around this free cell, `Empty` if none.
    #[inline]
    pub fn territory(self) -> Color {
        Color::from_bits(self.0 >> TERRITORY_SHIFT)
    }

    #[inline]
    pub fn is_in_base(self) -> bool {
        self.0 & IN_BASE_BIT != 0
    }

    #[inline]
    pub fn is_grounded(self) -> bool {
        self.0 & GROUNDED_BIT != 0
    }

    #[inline]
    pub fn is_wall(self) -> bool {
        self.active() == Color::Wall
    }

    /// Free for a new dot: not owned by anybody (territory tags allowed).
    #[inline]
    pub fn is_free(self) -> bool {
        self.active() == Color::Empty
    }

    /// A dot owned by the opponent of whoever placed it.
    #[inline]
    pub fn is_captured(self) -> bool {
        let placed = self.placed();
        placed.is_player() && self.active().is_player() && placed != self.active()
    }

    /// Holds a dot (live or captured) while active for a player.
    #[inline]
    pub fn holds_dot(self) -> bool {
        self.placed().is_player() && self.active().is_player()
    }

    #[inline]
    pub fn with_placed(self, c: Color) -> State {
        State((self.0 & !(0b11 << PLACED_SHIFT)) | ((c as u8) << PLACED_SHIFT))
    }

    #[inline]
    pub fn with_active(self, c: Color) -> State {
        State((self.0 & !(0b11 << ACTIVE_SHIFT)) | ((c as u8) << ACTIVE_SHIFT))
    }

    #[inline]
    pub fn with_territory(self, c: Color) -> State {
        State((self.0 & !(0b11 << TERRITORY_SHIFT)) | ((c as u8) << TERRITORY_SHIFT))
    }

    #[inline]
    pub fn with_in_base(self, in_base: bool) -> State {
        if in_base {
            State(self.0 | IN_BASE_BIT)
        } else {
            State(self.0 & !IN_BASE_BIT)
        }
    }

    #[inline]
    pub fn with_grounded(self, grounded: bool) -> State {
        if grounded {
            State(self.0 | GROUNDED_BIT)
        } else {
            State(self.0 & !GROUNDED_BIT)
        }
    }

    /// This cell after becoming part of a real base of `owner`.
    ///
    /// Cells that change hands lose their grounded flag; cells already
    /// owned by `owner` keep it.
    pub fn into_base(self, owner: Player) -> State {
        let grounded = self.active() == owner && self.is_grounded();
        self.with_active(owner)
            .with_in_base(true)
            .with_territory(Color::Empty)
            .with_grounded(grounded)
    }

    /// Raw byte, used by the hash and by equality checks in tests.
    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("placed", &self.placed())
            .field("active", &self.active())
            .field("territory", &self.territory())
            .field("in_base", &self.is_in_base())
            .field("grounded", &self.is_grounded())
            .finish()
    }
}
