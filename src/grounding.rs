//! Grounding propagation and the grounding move.
//!
//! A cell owned by a player is grounded when an orthogonal path of cells
//! owned by the same player joins it to the wall. Free cells, territory
//! included, are never grounded; base cells are, whether or not they hold a
//! dot. Enemy cells neither block nor help.
//!
//! Grounding only grows during play, so it is updated from the cells a move
//! touched instead of being recomputed for the whole field.

use tracing::{debug, trace};

use crate::board::{Board, CellChange};
use crate::color::Player;
use crate::location::{Loc, neighbors};

impl Board {
    /// Ground every ungrounded component that contains a seed and reaches
    /// the wall or a grounded cell of its color.
    pub(crate) fn update_grounding(&mut self, seeds: &[Loc], mut record: Option<&mut Vec<CellChange>>) {
        let mut visited = vec![false; self.states.len()];
        for &seed in seeds {
            let s = self.states[seed];
            let color = s.active();
            if visited[seed] || !color.is_player() || s.is_grounded() {
                continue;
            }

            let mut component = Vec::new();
            let mut anchored = false;
            let mut stack = vec![seed];
            visited[seed] = true;
            while let Some(pt) = stack.pop() {
                component.push(pt);
                for n in neighbors(pt, self.x_size) {
                    let ns = self.states[n];
                    if ns.is_wall() {
                        anchored = true;
                    } else if ns.active() == color {
                        if ns.is_grounded() {
                            anchored = true;
                        } else if !visited[n] {
                            visited[n] = true;
                            stack.push(n);
                        }
                    }
                }
            }

            trace!(owner = %color, cells = component.len(), anchored, "grounding flood");
            if anchored {
                for pt in component {
                    let s = self.states[pt];
                    self.set_cell(pt, s.with_grounded(true), record.as_deref_mut());
                }
            }
        }
    }

    /// The grounding move: every ungrounded cell of `pla` goes to the
    /// opponent as a base cell, dots included.
    pub(crate) fn apply_ground_move(&mut self, pla: Player, mut record: Option<&mut Vec<CellChange>>) {
        let opp = pla.opp();
        let targets: Vec<Loc> = self
            .field_locs()
            .filter(|&loc| {
                let s = self.states[loc];
                s.active() == pla && !s.is_grounded()
            })
            .collect();

        for &loc in &targets {
            let s = self.states[loc];
            self.set_cell(loc, s.into_base(opp), record.as_deref_mut());
        }
        debug!(
            player = %pla,
            cells = targets.len(),
            black_captures = self.num_black_captures(),
            white_captures = self.num_white_captures(),
            "grounding move"
        );

        self.update_grounding(&targets, record.as_deref_mut());
        self.invalidate_territory(&targets, record);
    }

    /// Whether every cell holding a dot is grounded.
    pub fn all_dots_grounded(&self) -> bool {
        self.ungrounded.iter().all(|&n| n == 0)
    }
}
