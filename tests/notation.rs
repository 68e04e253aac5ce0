use lib::chess::{Color, Position, Role, SanError, Square};
use std::collections::HashSet;

fn reason(pos: &Position, s: &str, strict: bool) -> SanError {
    pos.parse_notation(s, strict).unwrap_err().reason
}

fn walk(pos: &Position, depth: u8, visit: &mut impl FnMut(&Position)) {
    visit(pos);
    if depth > 0 {
        for m in pos.moves() {
            let mut next = pos.clone();
            next.play(m).unwrap();
            walk(&next, depth - 1, visit);
        }
    }
}

#[test]
fn notation_round_trips_over_the_move_tree() {
    let root: Position = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
        .parse()
        .unwrap();

    walk(&root, 2, &mut |pos| {
        let notations: HashSet<_> = pos.moves().map(|m| pos.notation(&m)).collect();
        assert_eq!(notations.len(), pos.moves().len(), "{pos}");

        for m in pos.moves() {
            let san = pos.notation(&m);
            assert_eq!(pos.parse_notation(&san, true), Ok(m), "{pos} {san}");
            assert_eq!(pos.parse_notation(&san, false), Ok(m), "{pos} {san}");
        }
    });
}

#[test]
fn lenient_mode_accepts_missing_symbols() {
    let pos: Position = "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 0 1"
        .parse()
        .unwrap();

    let strict = pos.parse_notation("Nxe5", true).unwrap();
    assert_eq!(pos.parse_notation("Ne5", false), Ok(strict));
    assert_eq!(pos.parse_notation("Nfe5", false), Ok(strict));
    assert_eq!(pos.parse_notation("Nxe5+", false), Ok(strict));
    assert_eq!(reason(&pos, "Ne5", true), SanError::MissingCaptureSymbol);
}

#[test]
fn king_safety_errors_name_the_side_to_move() {
    // The black knight on e2 is pinned by the rook on e1.
    let pos: Position = "4k3/8/8/8/8/8/4n3/4R2K b - - 0 1".parse().unwrap();
    assert_eq!(reason(&pos, "Nc3", false), SanError::KingNotSafe(Color::Black));
    assert_eq!(reason(&pos, "Ng3", false), SanError::KingNotSafe(Color::Black));
}

#[test]
fn pawn_advances_into_check_are_rejected() {
    // The pawn on c2 is pinned by the bishop on a4.
    let pos: Position = "6k1/8/8/8/b7/8/2P5/3K4 w - - 0 1".parse().unwrap();
    assert_eq!(reason(&pos, "c3", false), SanError::KingNotSafe(Color::White));
    assert_eq!(reason(&pos, "c4", false), SanError::KingNotSafe(Color::White));
}

#[test]
fn errors_are_reported_with_the_offending_notation() {
    let pos = Position::default();
    let e = pos.parse_notation("Qh5", false).unwrap_err();
    assert_eq!(e.notation, "Qh5");
    assert_eq!(
        e.reason,
        SanError::NoPieceCanMoveTo(Role::Queen, "h5".parse::<Square>().unwrap())
    );
    assert!(e.to_string().contains("Qh5"));
}
