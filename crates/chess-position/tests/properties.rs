//! Invariants over random legal playouts.

use chess_position::{move_from_san, move_from_uci, move_to_san, FenOptions, Position};
use proptest::prelude::*;

const STARTS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
];

/// Plays the move at `choice % len` in each position, stopping early when
/// the game has no legal move left.
fn playout(root: Position, choices: &[usize]) -> Vec<Position> {
    let mut line = vec![root];
    for &choice in choices {
        let Some(current) = line.last() else { break };
        let moves = current.legal_moves();
        if moves.is_empty() {
            break;
        }
        let next = current.do_move(moves[choice % moves.len()]);
        line.push(next);
    }
    line
}

fn check_codecs(position: &Position, options: FenOptions) -> Result<(), TestCaseError> {
    prop_assert!(position.is_ok(), "{:?}: {:?}", position, position.validate());

    let fen = position.to_fen();
    let reparsed = Position::from_fen_with(&fen, options);
    prop_assert_eq!(reparsed.as_ref(), Ok(position), "fen {}", fen);

    for &m in &position.legal_moves() {
        let san = move_to_san(position, m);
        prop_assert_eq!(move_from_san(position, &san), Ok(m), "san {} in {}", san, fen);
        prop_assert_eq!(move_from_uci(position, &m.to_uci()), Some(m), "uci in {}", fen);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn playouts_keep_invariants(
        start in 0..STARTS.len(),
        choices in prop::collection::vec(any::<usize>(), 0..40),
    ) {
        let root = Position::from_fen(STARTS[start]).unwrap();
        let line = playout(root, &choices);
        for position in &line {
            check_codecs(position, FenOptions::default())?;
        }
    }

    #[test]
    fn mover_never_left_in_check(
        start in 0..STARTS.len(),
        choices in prop::collection::vec(any::<usize>(), 0..60),
    ) {
        let root = Position::from_fen(STARTS[start]).unwrap();
        for position in playout(root, &choices).iter().skip(1) {
            let mover = !position.side_to_move();
            let king = position.king_square(mover).unwrap();
            prop_assert!(!position.is_attacked(king, position.side_to_move()));
            prop_assert_eq!(position.checkers().any(), position.is_check());
        }
    }

    #[test]
    fn history_reaches_the_root(
        choices in prop::collection::vec(any::<usize>(), 0..30),
    ) {
        let line = playout(Position::startpos(), &choices);
        let Some(last) = line.last() else { return Ok(()) };
        prop_assert_eq!(last.ancestors().count(), line.len() - 1);
        prop_assert_eq!(last.game_ply() as usize, line.len() - 1);
        let restored = Position::from_uci_position(&last.to_uci_position()).unwrap();
        prop_assert_eq!(&restored, last);
        prop_assert_eq!(restored.is_repetition_draw(), last.is_repetition_draw());
    }

    #[test]
    fn small_boards_without_special_kings(
        choices in prop::collection::vec(any::<usize>(), 0..40),
    ) {
        let options = FenOptions { king_is_special: false };
        let root = Position::from_fen_with("kr2/pp2/4/2PP/2RK w - - 0 1", options).unwrap();
        for position in playout(root, &choices) {
            check_codecs(&position, options)?;
            let board = position.geometry().board_mask();
            prop_assert!(position.legal_moves().iter().all(|m| board.contains(m.to())));
        }
    }
}
