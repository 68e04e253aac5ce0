use lib::chess::*;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn play(pos: &mut Position, moves: &[&str]) {
    for s in moves {
        let m = pos.parse_notation(s, false).unwrap();
        pos.play(m).unwrap();
    }
}

#[test]
fn starting_position_has_twenty_moves() {
    let pos = Position::default();
    assert_eq!(pos.moves().len(), 20);
    assert!(pos.has_move());
    assert!(!pos.is_check());
}

#[test]
fn castling_kingside_moves_king_and_rook() {
    let mut pos: Position = "4k3/8/8/8/8/8/8/4K2R w K - 0 1".parse().unwrap();
    let m = pos
        .is_move_legal(sq("e1"), sq("g1"), Promotion::None)
        .unwrap();

    assert!(m.is_castling());
    assert!(pos.moves().any(|d| d == m));

    pos.play(m).unwrap();
    assert_eq!(pos[sq("g1")], Some(Piece::new(Role::King, Color::White)));
    assert_eq!(pos[sq("f1")], Some(Piece::new(Role::Rook, Color::White)));
    assert_eq!(pos[sq("e1")], None);
    assert_eq!(pos[sq("h1")], None);
    assert_eq!(pos.king(Color::White), Some(sq("g1")));
    assert!(pos.castles().is_empty(Color::White));
}

#[test]
fn en_passant_capture_removes_the_captured_pawn() {
    let mut pos = Position::default();
    play(&mut pos, &["e4", "a6", "e5", "d5"]);
    assert_eq!(pos.en_passant(), Some(File::D));

    let m = pos.moves().find(|m| m.is_en_passant()).unwrap();
    assert_eq!((m.from(), m.to()), (sq("e5"), sq("d6")));
    assert_eq!(pos.notation(&m), "exd6");

    pos.play(m).unwrap();
    assert_eq!(pos[sq("d5")], None);
    assert_eq!(pos[sq("e5")], None);
    assert_eq!(pos[sq("d6")], Some(Piece::new(Role::Pawn, Color::White)));
    assert_eq!(pos.en_passant(), None);
}

#[test]
fn en_passant_is_only_possible_right_after_the_two_square_advance() {
    let mut pos = Position::default();
    play(&mut pos, &["e4", "a6", "e5", "d5", "Nf3", "h6"]);
    assert!(!pos.moves().any(|m| m.is_en_passant()));
    assert_eq!(pos.effective_en_passant(), None);
}

#[test]
fn single_reply_to_check_is_not_checkmate() {
    // The rook on a8 checks along the back rank, only the bishop can interpose.
    let pos: Position = "R5k1/5ppp/8/8/8/b7/8/6K1 b - - 0 1".parse().unwrap();
    assert!(pos.is_check());
    assert!(pos.has_move());
    assert!(!pos.is_checkmate());
    assert_eq!(pos.moves().len(), 1);
    assert_eq!(pos.outcome(), None);

    let pos: Position = "R5k1/5ppp/8/8/8/8/8/6K1 b - - 0 1".parse().unwrap();
    assert!(pos.is_checkmate());
    assert!(!pos.is_stalemate());
    assert_eq!(pos.outcome(), Some(Outcome::Checkmate(Color::White)));
}

#[test]
fn stalemate_is_not_check() {
    let pos: Position = "k7/2Q5/1K6/8/8/8/8/8 b - - 0 1".parse().unwrap();
    assert!(pos.is_stalemate());
    assert!(!pos.is_check());
    assert!(!pos.is_checkmate());
    assert_eq!(pos.outcome(), Some(Outcome::Stalemate));
}

#[test]
fn pinned_piece_is_not_disambiguated() {
    // The knight on c3 is pinned by the queen on a5.
    let pos: Position = "k7/8/8/q7/8/2N5/8/4K1N1 w - - 0 1".parse().unwrap();
    let m = pos.is_move_legal(sq("g1"), sq("e2"), Promotion::None).unwrap();
    assert_eq!(pos.notation(&m), "Ne2");
    assert_eq!(pos.parse_notation("Ne2", true), Ok(m));
    assert!(pos.is_move_legal(sq("c3"), sq("e2"), Promotion::None).is_none());
}

#[test]
fn null_move_passes_the_turn() {
    let mut pos = Position::default();
    play(&mut pos, &["e4"]);
    assert!(pos.is_null_move_legal());
    pos.play_null_move().unwrap();
    assert_eq!(pos.turn(), Color::White);
    assert_eq!(pos.en_passant(), None);

    let mut pos: Position = "4k3/8/8/8/8/8/4r3/4K3 w - - 0 1".parse().unwrap();
    assert!(!pos.is_null_move_legal());
    assert_eq!(pos.play_null_move(), Err(IllegalNullMove));
}

#[test]
fn promotions_are_expanded_in_order_of_precedence() {
    let pos: Position = "4k3/P7/8/8/8/8/8/4K3 w - - 0 1".parse().unwrap();
    let promotions: Vec<_> = pos
        .moves()
        .filter(|m| m.from() == sq("a7"))
        .map(|m| pos.notation(&m))
        .collect();

    assert_eq!(promotions, ["a8=Q+", "a8=R+", "a8=B", "a8=N"]);
}

#[test]
fn playing_a_move_request_validates_it() {
    let mut pos = Position::default();
    let m: Move = "e2e5".parse().unwrap();
    assert_eq!(pos.play(m), Err(IllegalMove(m)));
    assert_eq!(pos, Position::default());

    let m: Move = "e2e4".parse().unwrap();
    let d = pos.play(m).unwrap();
    assert!(d.is_two_square_pawn_move());
    assert_eq!(pos.en_passant(), Some(File::E));
}

#[test]
fn castling_rights_are_revoked_when_rooks_move_or_are_captured() {
    let mut pos: Position = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1".parse().unwrap();
    play(&mut pos, &["Rxa8+"]);
    assert!(!pos.castles().has(Color::White, File::A));
    assert!(!pos.castles().has(Color::Black, File::A));
    assert!(pos.castles().has(Color::White, File::H));
    assert!(pos.castles().has(Color::Black, File::H));
}
