//! Text diagrams of a field.
//!
//! A diagram is a block of equal-width rows of `.` (free), `x` (black) and
//! `o` (white), top row first. Blank lines and surrounding whitespace are
//! ignored. Dots are played in row-major order, so enclosures drawn in the
//! diagram resolve exactly as they would during play.

use crate::board::Board;
use crate::color::{Color, Player};
use crate::constants::GROUND_LOC;
use crate::error::{DotsError, Result};
use crate::location::{Move, get_loc};
use crate::rules::Rules;

fn parse_cell(c: char) -> Option<Color> {
    match c {
        '.' => Some(Color::Empty),
        'x' | 'X' => Some(Color::Black),
        'o' | 'O' => Some(Color::White),
        _ => None,
    }
}

/// Build a board from a diagram. No start position is placed.
pub fn parse_field(text: &str, rules: Rules) -> Result<Board> {
    let rows: Vec<Vec<Color>> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(y, line)| {
            line.chars()
                .enumerate()
                .map(|(x, c)| {
                    parse_cell(c).ok_or_else(|| {
                        DotsError::InvalidField(format!("unexpected {c:?} at ({x}, {y})"))
                    })
                })
                .collect::<Result<Vec<_>>>()
        })
        .collect::<Result<_>>()?;

    let y_size = rows.len();
    let x_size = rows.first().map_or(0, Vec::len);
    if let Some((y, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != x_size) {
        return Err(DotsError::InvalidField(format!(
            "row {y} has width {}, expected {x_size}",
            row.len()
        )));
    }

    let mut board = Board::new(x_size, y_size, rules)?;
    for (y, row) in rows.iter().enumerate() {
        for (x, &color) in row.iter().enumerate() {
            if color == Color::Empty {
                continue;
            }
            let loc = get_loc(x, y, x_size);
            if !board.state(loc).is_free() {
                return Err(DotsError::InvalidField(format!(
                    "({x}, {y}) is already taken when its dot is placed"
                )));
            }
            board.play_move_assume_legal(loc, color);
        }
    }
    Ok(board)
}

/// [`parse_field`], then play `moves` given as `(x, y, player)`.
pub fn parse_field_with_moves(text: &str, rules: Rules, moves: &[(usize, usize, Player)]) -> Result<Board> {
    let mut board = parse_field(text, rules)?;
    for &(x, y, pla) in moves {
        if x >= board.x_size || y >= board.y_size {
            return Err(DotsError::InvalidMove(format!("({x}, {y}) is off the field")));
        }
        let loc = board.loc(x, y);
        board.play_move_recorded(loc, pla)?;
    }
    Ok(board)
}

/// Parse a move written as `B:x,y` or `W:ground` for `board`.
pub fn parse_move(text: &str, board: &Board) -> Result<Move> {
    let invalid = || DotsError::InvalidMove(text.to_string());
    let (player, target) = text.trim().split_once(':').ok_or_else(invalid)?;
    let pla = match player {
        "B" | "b" => Color::Black,
        "W" | "w" => Color::White,
        _ => return Err(invalid()),
    };
    if target.eq_ignore_ascii_case("ground") {
        return Ok(Move::new(GROUND_LOC, pla));
    }
    let (x, y) = target.split_once(',').ok_or_else(invalid)?;
    let x: usize = x.trim().parse().map_err(|_| invalid())?;
    let y: usize = y.trim().parse().map_err(|_| invalid())?;
    if x >= board.x_size || y >= board.y_size {
        return Err(invalid());
    }
    Ok(Move::new(board.loc(x, y), pla))
}

/// Swap `x` and `o` in a diagram, leaving everything else untouched.
pub fn invert_colors(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            'x' => 'o',
            'X' => 'O',
            'o' => 'x',
            'O' => 'X',
            other => other,
        })
        .collect()
}
