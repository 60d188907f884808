//! Shared helpers for the scenario suites.
#![allow(dead_code)]

use dots_rules::board::{Board, MoveRecord};
use dots_rules::color::{Color, Player};
use dots_rules::constants::GROUND_LOC;
use dots_rules::field::parse_field;
use dots_rules::rules::Rules;
use dots_rules::state::State;

/// Rules for diagrams: empty start, everything else default.
pub fn diagram_rules() -> Rules {
    Rules::empty_start()
}

/// A board under test that remembers every move so it can be rolled back.
pub struct Scenario {
    pub board: Board,
    records: Vec<MoveRecord>,
}

impl Scenario {
    pub fn play(&mut self, x: usize, y: usize, pla: Player) {
        let loc = self.board.loc(x, y);
        let record = self
            .board
            .play_move_recorded(loc, pla)
            .unwrap_or_else(|e| panic!("{pla} at ({x}, {y}): {e}"));
        self.records.push(record);
    }

    pub fn ground(&mut self, pla: Player) {
        let record = self.board.play_move_recorded(GROUND_LOC, pla).unwrap();
        self.records.push(record);
    }

    pub fn undo(&mut self) {
        let record = self.records.pop().expect("nothing to undo");
        self.board.undo(&record);
    }

    pub fn state(&self, x: usize, y: usize) -> State {
        self.board.state_at(x, y)
    }

    pub fn is_legal(&self, x: usize, y: usize, pla: Player) -> bool {
        self.board.is_legal(self.board.loc(x, y), pla)
    }

    pub fn is_suicide(&self, x: usize, y: usize, pla: Player) -> bool {
        self.board.is_suicide(self.board.loc(x, y), pla)
    }

    pub fn would_be_capture(&self, x: usize, y: usize, pla: Player) -> bool {
        self.board.would_be_capture(self.board.loc(x, y), pla)
    }

    pub fn white_captures(&self) -> usize {
        self.board.num_white_captures()
    }

    pub fn black_captures(&self) -> usize {
        self.board.num_black_captures()
    }
}

/// Parse `field`, run `check` on it, then undo every move and require the
/// board to be exactly as parsed.
pub fn check_field(field: &str, rules: Rules, check: impl FnOnce(&mut Scenario)) {
    let initial = parse_field(field, rules).unwrap();
    let mut scenario = Scenario {
        board: initial.clone(),
        records: Vec::new(),
    };
    check(&mut scenario);
    while !scenario.records.is_empty() {
        scenario.undo();
    }
    assert!(scenario.board == initial, "board differs after undo:\n{}", scenario.board);
}

/// Render a per-cell color map as rows of `.`, `X`, `O` and `#` (both).
pub fn render_map(board: &Board, cells: &[Color]) -> String {
    let mut out = String::new();
    for y in 0..board.y_size {
        for x in 0..board.x_size {
            out.push(cells[board.loc(x, y)].to_char());
        }
        out.push('\n');
    }
    out
}

/// Strip the indentation and blank lines of an inline expected map.
pub fn dedent(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("{line}\n"))
        .collect()
}
