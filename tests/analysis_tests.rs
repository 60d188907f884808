//! Symmetries, ownership, one-move capture maps and komi ranges.

mod common;

use common::{dedent, diagram_rules, render_map};
use dots_rules::board::Board;
use dots_rules::color::Color::{self, Black, Empty, White};
use dots_rules::color::Player;
use dots_rules::constants::{DEFAULT_LEN_X, DEFAULT_LEN_Y};
use dots_rules::field::{parse_field, parse_field_with_moves};
use dots_rules::location::Move;
use dots_rules::rules::{Rules, StartPos};
use dots_rules::symmetry::{Symmetry, get_sym_board, get_sym_loc};

// =============================================================================
// Symmetry
// =============================================================================

fn symmetry_source() -> Board {
    let mut board = parse_field(
        "
        ...ox
        ..ox.
        .o.ox
        .xo..
        ",
        diagram_rules(),
    )
    .unwrap();
    board.play_move_assume_legal(board.loc(4, 1), White);
    assert_eq!(board.num_black_captures(), 1);
    board
}

fn check_symmetry(source: &Board, expected_field: &str, sym: Symmetry) {
    let transformed = get_sym_board(source, sym);
    let mut expected = parse_field(expected_field, diagram_rules()).unwrap();
    expected.play_move_assume_legal(get_sym_loc(4, 1, source, sym), White);

    assert_eq!(transformed.to_string(), expected.to_string(), "{sym}");
    assert!(transformed == expected, "{sym}");
    assert_eq!(get_sym_board(&transformed, sym.inverse()), *source, "{sym} inverse");
}

#[test]
fn test_symmetries_of_field() {
    let source = symmetry_source();
    let cases = [
        (Symmetry::None, "...ox\n..ox.\n.o.ox\n.xo.."),
        (Symmetry::FlipY, ".xo..\n.o.ox\n..ox.\n...ox"),
        (Symmetry::FlipX, "xo...\n.xo..\nxo.o.\n..ox."),
        (Symmetry::FlipYX, "..ox.\nxo.o.\n.xo..\nxo..."),
        (Symmetry::Transpose, "....\n..ox\n.o.o\noxo.\nx.x."),
        (Symmetry::TransposeFlipX, "....\nxo..\no.o.\n.oxo\n.x.x"),
        (Symmetry::TransposeFlipY, "x.x.\noxo.\n.o.o\n..ox\n...."),
        (Symmetry::TransposeFlipYX, ".x.x\n.oxo\no.o.\nxo..\n...."),
    ];
    for (sym, expected) in cases {
        check_symmetry(&source, expected, sym);
    }
}

#[test]
fn test_symmetry_with_start_pos() {
    let rules = Rules {
        start_pos: StartPos::Cross,
        start_pos_is_random: false,
        ..Rules::default()
    };
    let mut board = Board::new(5, 4, rules).unwrap();
    let pla = board.set_start_pos(&mut fastrand::Rng::with_seed(0)).unwrap();
    board.play_move_assume_legal(board.loc(1, 2), pla);

    let rotated = get_sym_board(&board, Symmetry::TransposeFlipX);

    // The cross is no longer at its canonical place on the 4x5 field.
    let mut expected = Board::new(
        4,
        5,
        Rules {
            start_pos_is_random: true,
            ..rules
        },
    )
    .unwrap();
    let loc = |x, y| expected.loc(x, y);
    let start = [
        Move::new(loc(2, 2), Black),
        Move::new(loc(2, 3), White),
        Move::new(loc(1, 3), Black),
        Move::new(loc(1, 2), White),
    ];
    expected.place_start_moves(&start).unwrap();
    expected.play_move_assume_legal(expected.loc(1, 1), Black);

    assert_eq!(rotated.to_string(), expected.to_string());
    assert!(rotated == expected);

    let unrotated = get_sym_board(&rotated, Symmetry::TransposeFlipY);
    assert!(unrotated == board);
    assert!(!unrotated.rules.start_pos_is_random);
}

#[test]
fn test_symmetry_round_trip_keeps_rules_without_start_moves() {
    let board = parse_field(".x.\nxox\n...", Rules::default()).unwrap();
    assert!(board.start_moves().is_empty());
    assert!(get_sym_board(&board, Symmetry::None) == board);
    for sym in Symmetry::ALL {
        let transformed = get_sym_board(&board, sym);
        assert_eq!(transformed.rules, board.rules, "{sym}");
        assert!(get_sym_board(&transformed, sym.inverse()) == board, "{sym}");
    }
}

#[test]
fn test_symmetry_names() {
    let names: Vec<String> = Symmetry::ALL.iter().map(ToString::to_string).collect();
    assert_eq!(
        names,
        [
            "NONE",
            "FLIP_Y",
            "FLIP_X",
            "FLIP_Y_X",
            "TRANSPOSE",
            "TRANSPOSE_FLIP_X",
            "TRANSPOSE_FLIP_Y",
            "TRANSPOSE_FLIP_Y_X",
        ]
    );
}

// =============================================================================
// Ownership
// =============================================================================

fn check_ownership(
    field: &str,
    grounding: Color,
    moves: &[(usize, usize, Player)],
    expected_ownership: &str,
    expected_white_score: i32,
) {
    let board = parse_field_with_moves(field, diagram_rules(), moves).unwrap();
    let (owners, white_score) = board.calculate_ownership_and_white_score(grounding);
    assert_eq!(white_score, expected_white_score, "grounding {grounding}");
    assert_eq!(render_map(&board, &owners), dedent(expected_ownership), "grounding {grounding}");
}

#[test]
fn test_ownership_start_cross() {
    check_ownership(
        "
        ......
        ......
        ..ox..
        ..xo..
        ......
        ......
        ",
        Empty,
        &[],
        "
        ......
        ......
        ......
        ......
        ......
        ......
        ",
        0,
    );
}

#[test]
fn test_ownership_wins_by_a_base() {
    check_ownership(
        "
        ......
        ......
        ..ox..
        .oxo..
        ......
        ......
        ",
        Empty,
        &[(2, 4, White)],
        "
        ......
        ......
        ......
        ..O...
        ......
        ......
        ",
        1,
    );
}

#[test]
fn test_ownership_loss_by_grounding() {
    check_ownership(
        "
        ..o...
        ..o...
        ..ox..
        ..xo..
        ...o..
        ...o..
        ",
        Black,
        &[],
        "
        ......
        ......
        ...O..
        ..O...
        ......
        ......
        ",
        2,
    );
    check_ownership(
        "
        ...x..
        ...x..
        ..ox..
        ..xo..
        ..x...
        ..x...
        ",
        White,
        &[],
        "
        ......
        ......
        ..X...
        ...X..
        ......
        ......
        ",
        -2,
    );
}

#[test]
fn test_ownership_wins_by_grounding_with_an_ungrounded_dot() {
    check_ownership(
        "
        ......
        .oox..
        .xxo..
        .oo...
        ....o.
        ......
        ",
        White,
        &[(0, 2, White)],
        "
        ......
        ......
        .OO...
        ......
        ....X.
        ......
        ",
        1,
    );
}

// =============================================================================
// One-move capture and base maps
// =============================================================================

fn check_capturing_and_bases(field: &str, rules: Rules, expected_captures: &str, expected_bases: &str) {
    let board = parse_field(field, rules).unwrap();
    let before = board.clone();
    let map = board.calculate_one_move_capture_and_base_positions();
    assert_eq!(render_map(&board, &map.captures), dedent(expected_captures), "captures");
    assert_eq!(render_map(&board, &map.bases), dedent(expected_bases), "bases");
    assert!(board == before);
}

const NOTHING_3X3: &str = "
    ...
    ...
    ...
";

#[test]
fn test_two_bases() {
    check_capturing_and_bases(
        "
        .x...o.
        xox.oxo
        .......
        ",
        diagram_rules(),
        "
        .......
        .......
        .X...O.
        ",
        "
        .......
        .X...O.
        .......
        ",
    );
}

#[test]
fn test_overlapping_capturing_location() {
    check_capturing_and_bases(
        "
        .x.
        xox
        ...
        oxo
        .o.
        ",
        diagram_rules(),
        "
        ...
        ...
        .#.
        ...
        ...
        ",
        "
        ...
        .X.
        ...
        .O.
        ...
        ",
    );
}

#[test]
fn test_empty_base_is_not_marked() {
    check_capturing_and_bases(".x.\nx.x\n.x.", diagram_rules(), NOTHING_3X3, NOTHING_3X3);
    let no_suicide = Rules {
        multi_stone_suicide_legal: false,
        ..diagram_rules()
    };
    check_capturing_and_bases(".o.\no.o\n.o.", no_suicide, NOTHING_3X3, NOTHING_3X3);
}

#[test]
fn test_empty_base_can_be_broken() {
    check_capturing_and_bases(
        "
        .xx.
        x..x
        x.x.
        oxo.
        .o..
        ",
        diagram_rules(),
        "
        ....
        ....
        .O..
        ....
        ....
        ",
        "
        ....
        ....
        ....
        .O..
        ....
        ",
    );
}

#[test]
fn test_empty_base_capturing_rule() {
    let field = ".x.\nx.x\n...";
    check_capturing_and_bases(field, diagram_rules(), NOTHING_3X3, NOTHING_3X3);
    let capture_empty = Rules {
        dots_capture_empty_bases: true,
        ..diagram_rules()
    };
    check_capturing_and_bases(field, capture_empty, "...\n...\n.X.", "...\n.X.\n...");
}

#[test]
fn test_overlapping_captures_and_bases() {
    check_capturing_and_bases(
        "
        .ooxx.
        o.xo.x
        ox.ox.
        ox.ox.
        .o.x..
        ",
        diagram_rules(),
        "
        ......
        ......
        ......
        ..#...
        ..#...
        ",
        "
        ......
        .OOXX.
        .O#X..
        .O#X..
        ......
        ",
    );
}

// =============================================================================
// Acceptable komi range
// =============================================================================

fn start_board(start_pos: StartPos, extra: &[(usize, usize, Player)]) -> Board {
    let rules = Rules {
        start_pos,
        ..Rules::default()
    };
    let mut board = Board::new(DEFAULT_LEN_X, DEFAULT_LEN_Y, rules).unwrap();
    board.set_start_pos(&mut fastrand::Rng::with_seed(0)).unwrap();
    for &(x, y, pla) in extra {
        board.play_move_assume_legal(board.loc(x, y), pla);
    }
    board
}

#[test]
fn test_acceptable_komi_range() {
    let single = start_board(StartPos::Single, &[]);
    assert_eq!(single.get_acceptable_komi_range(true, 0), (-1.0, 0.0));
    assert_eq!(single.get_acceptable_komi_range(false, 0), (-0.5, -0.5));

    let cross = start_board(StartPos::Cross, &[]);
    assert_eq!(cross.get_acceptable_komi_range(true, 0), (-2.0, 2.0));
    assert_eq!(cross.get_acceptable_komi_range(false, 0), (-1.5, 1.5));

    let cross4 = start_board(StartPos::Cross4, &[]);
    assert_eq!(cross4.get_acceptable_komi_range(true, 0), (-8.0, 8.0));
    assert_eq!(cross4.get_acceptable_komi_range(false, 0), (-7.5, 7.5));

    // An extra black dot counts the same as an extra black move.
    let extra = start_board(StartPos::Cross, &[(0, 0, Black)]);
    assert_eq!(extra.get_acceptable_komi_range(true, 0), (-3.0, 2.0));
    assert_eq!(cross.get_acceptable_komi_range(true, 1), (-3.0, 2.0));
    assert_eq!(extra.get_acceptable_komi_range(false, 0), (-2.5, 1.5));
    assert_eq!(cross.get_acceptable_komi_range(false, 1), (-2.5, 1.5));
}
