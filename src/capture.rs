//! Capture and base resolution.
//!
//! A dot at `L` of player `P` splits the cells that `P` does not own into
//! regions. A region that cannot reach the wall is enclosed:
//! - with opponent cells inside it becomes a real base of `P`
//! - with only free cells it becomes `P` territory (or a real base when
//!   empty bases are captured)
//!
//! The cells of a real base are everything strictly inside the `P` chain
//! around the region: the region itself, dangling `P` dots and older bases
//! or territory nested inside, but not the chain cells that face the
//! outside. Interiors of several bases are unioned, so the order in which
//! regions are found does not matter.
//!
//! All floods use an explicit stack.

use tracing::debug;

use crate::board::{Board, CellChange};
use crate::color::{Color, Player};
use crate::location::{Loc, get_loc, get_x, get_y, neighbors};
use crate::state::State;

/// Read-only outcome of a prospective move.
#[derive(Debug, Default)]
pub(crate) struct MoveAnalysis {
    /// Cells of every real base the move forms, one list per base.
    pub bases: Vec<Vec<Loc>>,
    /// Free cells that become territory of the mover.
    pub territory: Vec<Loc>,
}

impl MoveAnalysis {
    #[inline]
    pub fn forms_base(&self) -> bool {
        !self.bases.is_empty()
    }
}

/// Per-cell results of [`Board::calculate_one_move_capture_and_base_positions`].
///
/// Both vectors are indexed by `Loc`. A cell holds the player concerned,
/// or `Wall` when both players qualify.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OneMoveMap {
    /// Free cells where a move forms a real base.
    pub captures: Vec<Color>,
    /// Cells that would fall inside such a base.
    pub bases: Vec<Color>,
}

const INSIDE: u8 = 0;
const BORDER: u8 = 1;
const OUTSIDE: u8 = 2;

impl Board {
    /// Find the regions a dot of `pla` at `loc` would enclose.
    pub(crate) fn analyze_move(&self, loc: Loc, pla: Player) -> MoveAnalysis {
        let opp = pla.opp();
        let mut analysis = MoveAnalysis::default();
        let mut visited = vec![false; self.states.len()];

        for start in neighbors(loc, self.x_size) {
            let s = self.states[start];
            if visited[start] || s.is_wall() || s.active() == pla {
                continue;
            }

            let mut region = Vec::new();
            let mut open = false;
            let mut has_opp = false;
            let mut stack = vec![start];
            visited[start] = true;

            while let Some(pt) = stack.pop() {
                region.push(pt);
                if self.states[pt].active() == opp {
                    has_opp = true;
                }
                for n in neighbors(pt, self.x_size) {
                    if n == loc || visited[n] {
                        continue;
                    }
                    let ns = self.states[n];
                    if ns.is_wall() {
                        open = true;
                    } else if ns.active() != pla {
                        visited[n] = true;
                        stack.push(n);
                    }
                }
            }

            if open {
                continue;
            }
            if has_opp || self.rules.dots_capture_empty_bases {
                let cells = self.enclosed_cells(&region, |c| c == loc || self.states[c].active() == pla);
                analysis.bases.push(cells);
            } else {
                analysis.territory.extend(region);
            }
        }
        analysis
    }

    /// Cells inside the chain of `is_border` cells that surrounds `region`.
    ///
    /// The chain is the set of border cells adjacent to the region. A local
    /// flood over the chain's bounding box (grown by one) marks the outside;
    /// every other cell is inside, except chain cells facing the outside.
    fn enclosed_cells(&self, region: &[Loc], is_border: impl Fn(Loc) -> bool) -> Vec<Loc> {
        let x_size = self.x_size;
        let mut chain = Vec::new();
        let mut seen = vec![false; self.states.len()];
        for &pt in region {
            for n in neighbors(pt, x_size) {
                if !seen[n] && is_border(n) {
                    seen[n] = true;
                    chain.push(n);
                }
            }
        }

        let (mut min_x, mut min_y) = (usize::MAX, usize::MAX);
        let (mut max_x, mut max_y) = (0, 0);
        for &c in &chain {
            let (x, y) = (get_x(c, x_size), get_y(c, x_size));
            min_x = min_x.min(x);
            min_y = min_y.min(y);
            max_x = max_x.max(x);
            max_y = max_y.max(y);
        }
        if chain.is_empty() {
            return Vec::new();
        }

        // Local grid with a one-cell frame: grid (gx, gy) is field
        // (min_x + gx - 1, min_y + gy - 1).
        let w = max_x - min_x + 3;
        let h = max_y - min_y + 3;
        let mut grid = vec![INSIDE; w * h];
        for &c in &chain {
            let gx = get_x(c, x_size) - min_x + 1;
            let gy = get_y(c, x_size) - min_y + 1;
            grid[gy * w + gx] = BORDER;
        }

        let mut stack = Vec::new();
        for gx in 0..w {
            stack.push(gx);
            stack.push((h - 1) * w + gx);
        }
        for gy in 1..h - 1 {
            stack.push(gy * w);
            stack.push(gy * w + w - 1);
        }
        while let Some(i) = stack.pop() {
            if grid[i] != INSIDE {
                continue;
            }
            grid[i] = OUTSIDE;
            let (gx, gy) = (i % w, i / w);
            if gx > 0 {
                stack.push(i - 1);
            }
            if gx + 1 < w {
                stack.push(i + 1);
            }
            if gy > 0 {
                stack.push(i - w);
            }
            if gy + 1 < h {
                stack.push(i + w);
            }
        }

        let mut cells = Vec::new();
        for gy in 1..h - 1 {
            for gx in 1..w - 1 {
                let i = gy * w + gx;
                let keep = match grid[i] {
                    INSIDE => true,
                    BORDER => [i - 1, i + 1, i - w, i + w].iter().all(|&j| grid[j] != OUTSIDE),
                    _ => false,
                };
                if keep {
                    cells.push(get_loc(min_x + gx - 1, min_y + gy - 1, x_size));
                }
            }
        }
        cells
    }

    /// Cells the opponent takes when `pla` plays into its territory at `loc`.
    ///
    /// Returns `None` unless `loc` is tagged as opponent territory.
    fn suicide_base(&self, loc: Loc, pla: Player) -> Option<Vec<Loc>> {
        let opp = pla.opp();
        if self.states[loc].territory() != opp {
            return None;
        }
        let mut region = Vec::new();
        let mut visited = vec![false; self.states.len()];
        let mut stack = vec![loc];
        visited[loc] = true;
        while let Some(pt) = stack.pop() {
            region.push(pt);
            for n in neighbors(pt, self.x_size) {
                let ns = self.states[n];
                if visited[n] || ns.active() == opp {
                    continue;
                }
                if ns.is_wall() {
                    // Stale tag; treat as not enclosed.
                    return None;
                }
                visited[n] = true;
                stack.push(n);
            }
        }
        Some(self.enclosed_cells(&region, |c| self.states[c].active() == opp))
    }

    /// Whether a dot of `pla` at `loc` would only get captured.
    ///
    /// A move that forms any real base is never a suicide. Uses the same
    /// enclosure flood as move application, so a stale territory tag never
    /// counts.
    pub fn is_suicide(&self, loc: Loc, pla: Player) -> bool {
        if !self.is_on_board(loc) || !self.states[loc].is_free() {
            return false;
        }
        !self.analyze_move(loc, pla).forms_base() && self.suicide_base(loc, pla).is_some()
    }

    /// Whether a dot of `pla` at `loc` would form at least one real base.
    pub fn would_be_capture(&self, loc: Loc, pla: Player) -> bool {
        self.is_on_board(loc) && self.states[loc].is_free() && self.analyze_move(loc, pla).forms_base()
    }

    /// Place a dot and resolve bases, suicide, grounding and territory.
    pub(crate) fn apply_dot(&mut self, loc: Loc, pla: Player, mut record: Option<&mut Vec<CellChange>>) {
        let analysis = self.analyze_move(loc, pla);
        let suicide = if analysis.forms_base() {
            None
        } else {
            self.suicide_base(loc, pla)
        };

        let mut changed = vec![loc];
        self.set_cell(loc, State::dot(pla), record.as_deref_mut());

        for &c in &analysis.territory {
            let s = self.states[c];
            self.set_cell(c, s.with_territory(pla), record.as_deref_mut());
        }

        for base in &analysis.bases {
            let captures_before = self.captured;
            self.mark_base(base, pla, &mut changed, record.as_deref_mut());
            debug!(
                owner = %pla,
                cells = base.len(),
                black_captures = self.captured[Color::Black.index()],
                white_captures = self.captured[Color::White.index()],
                changed = captures_before != self.captured,
                "base formed"
            );
        }

        if let Some(cells) = suicide {
            let opp = pla.opp();
            self.mark_base(&cells, opp, &mut changed, record.as_deref_mut());
            debug!(owner = %opp, cells = cells.len(), "suicide resolved as a base");
        }

        self.update_grounding(&changed, record.as_deref_mut());
        self.invalidate_territory(&changed, record);
    }

    fn mark_base(&mut self, cells: &[Loc], owner: Player, changed: &mut Vec<Loc>, mut record: Option<&mut Vec<CellChange>>) {
        for &c in cells {
            let s = self.states[c];
            let new = s.into_base(owner);
            if new != s {
                self.set_cell(c, new, record.as_deref_mut());
                changed.push(c);
            }
        }
    }

    /// Drop territory tags that are no longer surrounded by their owner.
    ///
    /// Every tagged region containing or touching a changed cell is checked;
    /// if any cell around it is not owned by the tag color the whole region
    /// loses its tag.
    pub(crate) fn invalidate_territory(&mut self, changed: &[Loc], mut record: Option<&mut Vec<CellChange>>) {
        let mut visited = vec![false; self.states.len()];
        for &c in changed {
            for cand in std::iter::once(c).chain(neighbors(c, self.x_size)) {
                let tag = self.states[cand].territory();
                if visited[cand] || !tag.is_player() || !self.states[cand].is_free() {
                    continue;
                }

                let mut region = Vec::new();
                let mut valid = true;
                let mut stack = vec![cand];
                visited[cand] = true;
                while let Some(pt) = stack.pop() {
                    region.push(pt);
                    for n in neighbors(pt, self.x_size) {
                        let ns = self.states[n];
                        if ns.is_free() && ns.territory() == tag {
                            if !visited[n] {
                                visited[n] = true;
                                stack.push(n);
                            }
                        } else if ns.active() != tag {
                            valid = false;
                        }
                    }
                }

                if !valid {
                    debug!(owner = %tag, cells = region.len(), "territory invalidated");
                    for pt in region {
                        let s = self.states[pt];
                        self.set_cell(pt, s.with_territory(Color::Empty), record.as_deref_mut());
                    }
                }
            }
        }
    }

    /// For every free cell and both players, where a move would capture and
    /// which cells would fall inside the resulting bases.
    ///
    /// Suicides and plain territory are not marked. The board is unchanged.
    pub fn calculate_one_move_capture_and_base_positions(&self) -> OneMoveMap {
        let mut map = OneMoveMap {
            captures: vec![Color::Empty; self.states.len()],
            bases: vec![Color::Empty; self.states.len()],
        };
        for loc in self.field_locs() {
            if !self.states[loc].is_free() {
                continue;
            }
            for pla in Color::PLAYERS {
                let analysis = self.analyze_move(loc, pla);
                if !analysis.forms_base() {
                    continue;
                }
                map.captures[loc] = map.captures[loc].merge(pla);
                for &c in analysis.bases.iter().flatten() {
                    map.bases[c] = map.bases[c].merge(pla);
                }
            }
        }
        map
    }
}
