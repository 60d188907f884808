//! Dots-Rules: command line front end for the Dots rules engine.
//!
//! ## Usage
//!
//! - `dots-rules` - Show a demo
//! - `dots-rules analyze <FILE>` - Print capture and base maps of a diagram
//! - `dots-rules play B:19,15 W:20,16 ...` - Play moves from a start position

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use dots_rules::board::Board;
use dots_rules::color::Color;
use dots_rules::constants::{DEFAULT_LEN_X, DEFAULT_LEN_Y, GROUND_LOC};
use dots_rules::field::{parse_field, parse_move};
use dots_rules::history::BoardHistory;
use dots_rules::rules::{Rules, StartPos};

/// Dots-Rules: board, captures and grounding for the game of Dots
#[derive(Parser)]
#[command(name = "dots-rules")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a short scripted game and print the result
    Demo,
    /// Read a field diagram and show where each player could capture
    Analyze {
        /// Diagram file of `.`, `x` and `o` rows
        file: PathBuf,
        /// Rules in `key=value,...` form
        #[arg(short, long, default_value = "startPos=EMPTY")]
        rules: Rules,
    },
    /// Play a list of moves such as `B:3,4` or `W:ground`
    Play {
        #[arg(long, default_value_t = DEFAULT_LEN_X)]
        width: usize,
        #[arg(long, default_value_t = DEFAULT_LEN_Y)]
        height: usize,
        #[arg(long, value_enum, default_value_t = StartPos::Cross)]
        start_pos: StartPos,
        /// Place the start pattern at a random offset
        #[arg(long)]
        random: bool,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0.0)]
        komi: f32,
        /// Reject suicides instead of resolving them
        #[arg(long)]
        no_suicide: bool,
        moves: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Some(Commands::Analyze { file, rules }) => run_analyze(&file, rules),
        Some(Commands::Play {
            width,
            height,
            start_pos,
            random,
            seed,
            komi,
            no_suicide,
            moves,
        }) => {
            let rules = Rules {
                start_pos,
                start_pos_is_random: random,
                multi_stone_suicide_legal: !no_suicide,
                komi,
                ..Rules::default()
            };
            run_play(width, height, rules, seed, &moves)
        }
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn run_demo() -> Result<()> {
    println!("Dots-Rules: Dots board demo\n");

    let mut board = Board::new(8, 6, Rules::empty_start())?;
    let mut history = BoardHistory::new(&board);

    // Black surrounds a white dot away from the edge.
    let script = [
        (3, 2, Color::White),
        (3, 1, Color::Black),
        (2, 2, Color::Black),
        (4, 2, Color::Black),
        (3, 3, Color::Black),
    ];
    for (x, y, pla) in script {
        let loc = board.loc(x, y);
        history
            .make_board_move_tolerant(&mut board, loc, pla)
            .with_context(|| format!("demo move {pla} at ({x}, {y})"))?;
    }
    println!("{board}");
    println!("Captured white dots: {}", board.num_white_captures());
    println!(
        "White score if Black grounds: {}",
        board.white_score_if_black_grounds()
    );

    history.make_board_move_tolerant(&mut board, GROUND_LOC, Color::Black)?;
    println!(
        "After Black grounds: winner {}, white - black = {}",
        history.winner, history.final_white_minus_black_score
    );
    Ok(())
}

fn run_analyze(file: &Path, rules: Rules) -> Result<()> {
    let text = fs::read_to_string(file).with_context(|| format!("reading {}", file.display()))?;
    let board = parse_field(&text, rules).with_context(|| format!("parsing {}", file.display()))?;
    info!(x_size = board.x_size, y_size = board.y_size, "field loaded");

    let map = board.calculate_one_move_capture_and_base_positions();
    println!("Field:\n{board}");
    println!("Capturing moves:");
    print_map(&board, &map.captures);
    println!("Base cells:");
    print_map(&board, &map.bases);

    let history = BoardHistory::new(&board);
    println!("Black captures: {}", board.num_black_captures());
    println!("White captures: {}", board.num_white_captures());
    println!("White score if Black grounds: {}", board.white_score_if_black_grounds());
    println!("Black score if White grounds: {}", board.black_score_if_white_grounds());
    println!(
        "Grounding decides the game: {}",
        history.is_ground_reasonable(&board)
    );
    Ok(())
}

fn print_map(board: &Board, cells: &[Color]) {
    for y in 0..board.y_size {
        let row: String = (0..board.x_size)
            .map(|x| cells[board.loc(x, y)].to_char())
            .collect();
        println!("{row}");
    }
    println!();
}

fn run_play(width: usize, height: usize, rules: Rules, seed: u64, moves: &[String]) -> Result<()> {
    let mut board = Board::new(width, height, rules)?;
    let mut rng = fastrand::Rng::with_seed(seed);
    let to_move = board.set_start_pos(&mut rng)?;
    info!(start_pos = %rules.start_pos, first = %to_move, "game started");

    let mut history = BoardHistory::new(&board);
    for text in moves {
        if history.is_game_finished {
            bail!("move {text} played after the game ended");
        }
        let mv = parse_move(text, &board)?;
        history
            .make_board_move_tolerant(&mut board, mv.loc, mv.pla)
            .with_context(|| format!("playing {text}"))?;
    }

    println!("{board}");
    println!(
        "Captures: black {} white {}",
        board.num_black_captures(),
        board.num_white_captures()
    );
    if history.is_game_finished {
        println!(
            "Game over: winner {}, white - black = {}",
            history.winner, history.final_white_minus_black_score
        );
    } else {
        let score = history.white_score_if_grounding_alive(&board);
        if score.is_nan() {
            println!("Game in progress");
        } else {
            println!("Decided by grounding: white - black = {score}");
        }
    }
    Ok(())
}
