//! Game-level wrapper over [`Board`]: move history, grounding scores and
//! end-of-game detection.
//!
//! The grounding rule lets a player end the game by grounding all of its
//! dots. Whether that is decisive depends on the board's grounding scores
//! plus komi and bonus points; when it is not, the score queries return
//! `NaN` ("not applicable"), which is a value, not an error.

use tracing::{debug, info};

use crate::board::Board;
use crate::color::{Color, Player};
use crate::constants::GROUND_LOC;
use crate::error::MoveError;
use crate::location::{Loc, Move};
use crate::rules::Rules;

#[derive(Clone, Debug)]
pub struct BoardHistory {
    pub rules: Rules,
    pub initial_board: Board,
    pub move_history: Vec<Move>,
    pub white_bonus_score: f32,
    pub white_handicap_bonus_score: f32,
    pub is_game_finished: bool,
    /// `Empty` for a draw or an unfinished game.
    pub winner: Color,
    pub final_white_minus_black_score: f32,
    pub is_resignation: bool,
}

impl BoardHistory {
    pub fn new(board: &Board) -> Self {
        Self {
            rules: board.rules,
            initial_board: board.clone(),
            move_history: Vec::new(),
            white_bonus_score: 0.0,
            white_handicap_bonus_score: 0.0,
            is_game_finished: false,
            winner: Color::Empty,
            final_white_minus_black_score: 0.0,
            is_resignation: false,
        }
    }

    /// Komi plus every bonus White receives.
    fn extra_white_score(&self) -> f32 {
        self.white_bonus_score + self.white_handicap_bonus_score + self.rules.komi
    }

    // =========================================================================
    // Grounding Scores
    // =========================================================================

    /// White's final score if the game ended by grounding now, or `NaN`.
    ///
    /// `ground_color` restricts who may ground: `Empty` for either player,
    /// a player for that player without losing its own ungrounded dots, and
    /// `Wall` to require that every dot is already grounded.
    fn grounding_score(&self, board: &Board, ground_color: Color) -> f32 {
        let extra = self.extra_white_score();
        let captures_diff = board.white_score();
        let white_if_black_grounds = board.white_score_if_black_grounds();
        let black_if_white_grounds = board.black_score_if_white_grounds();

        if black_if_white_grounds == -white_if_black_grounds {
            debug_assert_eq!(white_if_black_grounds, captures_diff);
            return captures_diff as f32 + extra;
        }

        let full_white_if_black_grounds = white_if_black_grounds as f32 + extra;
        if full_white_if_black_grounds < 0.0 {
            // Black wins by grounding.
            if ground_color == Color::Empty
                || (ground_color == Color::Black && captures_diff == white_if_black_grounds)
            {
                return full_white_if_black_grounds;
            }
        } else {
            let full_black_if_white_grounds = black_if_white_grounds as f32 - extra;
            if full_black_if_white_grounds < 0.0
                && (ground_color == Color::Empty
                    || (ground_color == Color::White && -captures_diff == black_if_white_grounds))
            {
                return -full_black_if_white_grounds;
            }
        }

        f32::NAN
    }

    pub fn white_score_if_grounding_alive(&self, board: &Board) -> f32 {
        self.grounding_score(board, Color::Empty)
    }

    /// Score if every dot is already grounded, else `NaN`.
    pub fn white_score_if_all_dots_are_grounded(&self, board: &Board) -> f32 {
        self.grounding_score(board, Color::Wall)
    }

    /// Score if `pla` can ground without giving up any of its own dots.
    pub fn white_score_if_not_capturing_grounding_alive(&self, board: &Board, pla: Player) -> f32 {
        self.grounding_score(board, pla)
    }

    pub fn is_ground_reasonable(&self, board: &Board) -> bool {
        !self.white_score_if_grounding_alive(board).is_nan()
    }

    pub fn is_not_capturing_grounding_alive(&self, board: &Board, pla: Player) -> bool {
        !self.white_score_if_not_capturing_grounding_alive(board, pla).is_nan()
    }

    /// Whether `pla` has already lost under the grounding rule.
    pub fn is_resign_reasonable(&self, board: &Board, pla: Player) -> bool {
        let white_score = self.white_score_if_grounding_alive(board);
        (pla == Color::Black && white_score > 0.0) || (pla == Color::White && white_score < 0.0)
    }

    // =========================================================================
    // Moves and Game End
    // =========================================================================

    /// A move worth considering: legal and not a suicide.
    pub fn is_reasonable_move(&self, board: &Board, loc: Loc, pla: Player) -> bool {
        board.is_legal(loc, pla) && (loc == GROUND_LOC || !board.is_suicide(loc, pla))
    }

    /// Play a move if it is legal. A grounding move finishes the game.
    pub fn make_board_move_tolerant(&mut self, board: &mut Board, loc: Loc, pla: Player) -> Result<(), MoveError> {
        board.play_move_recorded(loc, pla)?;
        self.after_move(board, loc, pla);
        Ok(())
    }

    pub fn make_board_move_assume_legal(&mut self, board: &mut Board, loc: Loc, pla: Player) {
        board.play_move_assume_legal(loc, pla);
        self.after_move(board, loc, pla);
    }

    fn after_move(&mut self, board: &Board, loc: Loc, pla: Player) {
        self.move_history.push(Move::new(loc, pla));
        if loc == GROUND_LOC {
            let score = board.white_score() as f32 + self.extra_white_score();
            self.set_final_score(score);
            debug!(player = %pla, score, "game ended by grounding");
        }
    }

    /// End the game if it is decided.
    ///
    /// With `end_by_grounding` the game ends as soon as grounding is
    /// decisive. Otherwise it also ends when `pla` has nothing left to play
    /// but suicides, scored by captures alone. Returns whether it ended.
    pub fn end_game_if_reasonable(&mut self, board: &Board, end_by_grounding: bool, pla: Player) -> bool {
        if end_by_grounding {
            let score = self.white_score_if_grounding_alive(board);
            if !score.is_nan() {
                self.set_final_score(score);
                return true;
            }
        }
        if !board.has_reasonable_move(pla) {
            let score = board.white_score() as f32 + self.extra_white_score();
            self.set_final_score(score);
            info!(player = %pla, score, "no reasonable moves left");
            return true;
        }
        false
    }

    fn set_final_score(&mut self, white_minus_black: f32) {
        self.is_game_finished = true;
        self.is_resignation = false;
        self.final_white_minus_black_score = white_minus_black;
        self.winner = if white_minus_black > 0.0 {
            Color::White
        } else if white_minus_black < 0.0 {
            Color::Black
        } else {
            Color::Empty
        };
    }

    pub fn set_winner_by_resignation(&mut self, winner: Player) {
        self.is_game_finished = true;
        self.is_resignation = true;
        self.winner = winner;
        self.final_white_minus_black_score = 0.0;
    }

    // =========================================================================
    // Komi
    // =========================================================================

    /// Draw a komi around `mean` and keep it inside the acceptable range.
    ///
    /// Without `allow_integer` the result is always `k + 0.5` and the range
    /// excludes draws; with it the result is a multiple of `0.5`.
    pub fn set_komi_with_noise(
        &mut self,
        board: &Board,
        mean: f32,
        stdev: f32,
        allow_integer: bool,
        rng: &mut fastrand::Rng,
    ) {
        let mut komi = mean;
        if stdev > 0.0 {
            komi += stdev * gaussian(rng);
        }
        komi = if allow_integer {
            (komi * 2.0).round() / 2.0
        } else {
            komi.floor() + 0.5
        };
        let (lower, upper) = board.get_acceptable_komi_range(allow_integer, 0);
        komi = komi.max(lower).min(upper);
        self.rules.komi = komi;
    }
}

/// Standard normal sample (Box-Muller).
fn gaussian(rng: &mut fastrand::Rng) -> f32 {
    let u1 = rng.f32().max(f32::MIN_POSITIVE);
    let u2 = rng.f32();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos()
}
