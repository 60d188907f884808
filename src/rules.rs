//! Rule parameters for a Dots game.
//!
//! Rules are a plain value type. Their text form is a comma separated list
//! of `key=value` pairs, for example
//! `startPos=CROSS,startPosIsRandom=false,multiStoneSuicideLegal=true,dotsCaptureEmptyBase=false,komi=0`.
//! Keys that are not mentioned keep their default value.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;

use crate::error::DotsError;

pub const START_POS_KEY: &str = "startPos";
pub const START_POS_RANDOM_KEY: &str = "startPosIsRandom";
pub const SUICIDE_KEY: &str = "multiStoneSuicideLegal";
pub const CAPTURE_EMPTY_BASE_KEY: &str = "dotsCaptureEmptyBase";
/// Accepted on input as a synonym of [`CAPTURE_EMPTY_BASE_KEY`].
pub const CAPTURE_EMPTY_BASES_KEY: &str = "dotsCaptureEmptyBases";
pub const KOMI_KEY: &str = "komi";

/// Initial stones placed before the first move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum StartPos {
    /// No stones
    Empty,
    /// One black dot in the middle; White moves first
    Single,
    /// Two black and two white dots in a 2x2 cross
    #[default]
    Cross,
    /// Four crosses, one per quadrant
    #[value(name = "cross-4", alias = "cross4")]
    Cross4,
}

impl StartPos {
    /// Smallest field (width, height) the pattern fits on.
    pub fn min_size(self) -> (usize, usize) {
        match self {
            StartPos::Empty | StartPos::Single => (1, 1),
            StartPos::Cross => (2, 2),
            StartPos::Cross4 => (4, 4),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StartPos::Empty => "EMPTY",
            StartPos::Single => "SINGLE",
            StartPos::Cross => "CROSS",
            StartPos::Cross4 => "CROSS_4",
        }
    }
}

impl fmt::Display for StartPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StartPos {
    type Err = DotsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EMPTY" => Ok(StartPos::Empty),
            "SINGLE" => Ok(StartPos::Single),
            "CROSS" => Ok(StartPos::Cross),
            "CROSS_4" | "CROSS4" => Ok(StartPos::Cross4),
            other => Err(DotsError::InvalidRules(format!(
                "unknown start position '{other}'"
            ))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rules {
    pub start_pos: StartPos,
    /// Start pattern is placed at a random offset instead of the middle.
    pub start_pos_is_random: bool,
    /// A dot may be played where it is immediately captured.
    pub multi_stone_suicide_legal: bool,
    /// Fully enclosed empty regions become real bases.
    pub dots_capture_empty_bases: bool,
    pub komi: f32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            start_pos: StartPos::Cross,
            start_pos_is_random: false,
            multi_stone_suicide_legal: true,
            dots_capture_empty_bases: false,
            komi: 0.0,
        }
    }
}

impl Rules {
    /// Default rules with an empty field, as used for diagrams.
    pub fn empty_start() -> Self {
        Self {
            start_pos: StartPos::Empty,
            ..Self::default()
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, DotsError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(DotsError::InvalidRules(format!(
            "'{other}' is not a boolean for {key}"
        ))),
    }
}

impl FromStr for Rules {
    type Err = DotsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rules = Rules::default();
        for item in s.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let (key, value) = item
                .split_once('=')
                .ok_or_else(|| DotsError::InvalidRules(format!("expected key=value, got '{item}'")))?;
            let key = key.trim();
            match key {
                START_POS_KEY => rules.start_pos = value.parse()?,
                START_POS_RANDOM_KEY => rules.start_pos_is_random = parse_bool(key, value)?,
                SUICIDE_KEY => rules.multi_stone_suicide_legal = parse_bool(key, value)?,
                CAPTURE_EMPTY_BASE_KEY | CAPTURE_EMPTY_BASES_KEY => rules.dots_capture_empty_bases = parse_bool(key, value)?,
                KOMI_KEY => {
                    rules.komi = value.trim().parse().map_err(|_| {
                        DotsError::InvalidRules(format!("'{}' is not a number for {key}", value.trim()))
                    })?
                }
                _ => return Err(DotsError::InvalidRules(format!("unknown key '{key}'"))),
            }
        }
        Ok(rules)
    }
}

impl fmt::Display for Rules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{START_POS_KEY}={},{START_POS_RANDOM_KEY}={},{SUICIDE_KEY}={},{CAPTURE_EMPTY_BASE_KEY}={},{KOMI_KEY}={}",
            self.start_pos,
            self.start_pos_is_random,
            self.multi_stone_suicide_legal,
            self.dots_capture_empty_bases,
            self.komi
        )
    }
}
