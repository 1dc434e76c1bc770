use gambit::chess::board::Board;
use gambit::chess::core::{OutOfBounds, Piece, PieceKind, Player, Position};
use gambit::chess::rules::{is_valid_move, legal_destinations};
use pretty_assertions::assert_eq;
use strum::IntoEnumIterator;

const POSITIONS: [&str; 5] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8",
    "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R",
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1",
];

const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

fn setup(placement: &str) -> Board {
    Board::try_from(placement).expect("parsing legal placement: {placement}")
}

fn legal(board: &Board, from: Position, to: Position, side_to_move: Player) -> bool {
    is_valid_move(board, from, to, side_to_move).expect("both squares are on the board")
}

fn place(board: &mut Board, pos: Position, owner: Player, kind: PieceKind) {
    let _ = board.put(pos, Piece::new(owner, kind)).unwrap();
}

fn remove(board: &mut Board, pos: Position) {
    let _ = board.clear(pos).unwrap();
}

fn all_moves() -> impl Iterator<Item = (Position, Position)> {
    Position::all().flat_map(|from| Position::all().map(move |to| (from, to)))
}

#[test]
fn pawn_double_step() {
    let mut board = Board::starting();
    assert!(legal(&board, Position::new(6, 4), Position::new(4, 4), Player::White));
    place(&mut board, Position::new(5, 4), Player::Black, PieceKind::Pawn);
    assert!(!legal(&board, Position::new(6, 4), Position::new(4, 4), Player::White));
    // The blocker is also in front of the pawn.
    assert!(!legal(&board, Position::new(6, 4), Position::new(5, 4), Player::White));
}

#[test]
fn pawn_double_step_only_from_starting_row() {
    let mut board = Board::empty();
    place(&mut board, Position::new(5, 4), Player::White, PieceKind::Pawn);
    assert!(legal(&board, Position::new(5, 4), Position::new(4, 4), Player::White));
    assert!(!legal(&board, Position::new(5, 4), Position::new(3, 4), Player::White));

    let mut board = Board::empty();
    place(&mut board, Position::new(2, 2), Player::Black, PieceKind::Pawn);
    assert!(legal(&board, Position::new(2, 2), Position::new(3, 2), Player::Black));
    assert!(!legal(&board, Position::new(2, 2), Position::new(4, 2), Player::Black));
}

#[test]
fn pawn_double_step_blocked_destination() {
    let mut board = Board::starting();
    place(&mut board, Position::new(4, 4), Player::Black, PieceKind::Knight);
    assert!(legal(&board, Position::new(6, 4), Position::new(5, 4), Player::White));
    assert!(!legal(&board, Position::new(6, 4), Position::new(4, 4), Player::White));
}

#[test]
fn black_pawns_move_down() {
    let board = Board::starting();
    assert!(legal(&board, Position::new(1, 3), Position::new(2, 3), Player::Black));
    assert!(legal(&board, Position::new(1, 3), Position::new(3, 3), Player::Black));
    assert!(!legal(&board, Position::new(1, 3), Position::new(4, 3), Player::Black));
    // Backwards.
    assert!(!legal(&board, Position::new(1, 3), Position::new(0, 3), Player::Black));
    let mut board = Board::empty();
    place(&mut board, Position::new(4, 4), Player::Black, PieceKind::Pawn);
    place(&mut board, Position::new(3, 4), Player::White, PieceKind::Pawn);
    assert!(!legal(&board, Position::new(4, 4), Position::new(3, 4), Player::Black));
    assert!(legal(&board, Position::new(4, 4), Position::new(5, 4), Player::Black));
}

#[test]
fn pawn_captures() {
    let e4 = Position::new(4, 4);
    // Opponent pieces diagonally forward.
    let board = setup("8/8/8/3pnp2/4P3/8/8/8");
    assert!(legal(&board, e4, Position::new(3, 3), Player::White));
    assert!(legal(&board, e4, Position::new(3, 5), Player::White));
    // Pawns do not capture straight ahead.
    assert!(!legal(&board, e4, Position::new(3, 4), Player::White));
    // Diagonal step onto an empty square.
    let board = setup("8/8/8/4n3/4P3/8/8/8");
    assert!(!legal(&board, e4, Position::new(3, 3), Player::White));
    assert!(!legal(&board, e4, Position::new(3, 5), Player::White));
    // Diagonal step onto an own piece.
    let board = setup("8/8/8/3N1B2/4P3/8/8/8");
    assert!(!legal(&board, e4, Position::new(3, 3), Player::White));
    assert!(!legal(&board, e4, Position::new(3, 5), Player::White));
    // Backward diagonal capture.
    let board = setup("8/8/8/8/4P3/3n4/8/8");
    assert!(!legal(&board, e4, Position::new(5, 3), Player::White));
    // Two columns away.
    let board = setup("8/8/8/2n5/4P3/8/8/8");
    assert!(!legal(&board, e4, Position::new(3, 2), Player::White));
}

#[test]
fn black_pawn_captures() {
    let board = setup("8/8/8/3p4/2P1B3/8/8/8");
    let d5 = Position::new(3, 3);
    assert!(legal(&board, d5, Position::new(4, 2), Player::Black));
    assert!(legal(&board, d5, Position::new(4, 4), Player::Black));
    assert!(!legal(&board, d5, Position::new(2, 2), Player::Black));
}

#[test]
fn knight_shape() {
    let board = Board::starting();
    assert!(legal(&board, Position::new(7, 1), Position::new(5, 2), Player::White));
    assert!(legal(&board, Position::new(7, 1), Position::new(5, 0), Player::White));
    assert!(!legal(&board, Position::new(7, 1), Position::new(5, 1), Player::White));
    // Own pawn on d2.
    assert!(!legal(&board, Position::new(7, 1), Position::new(6, 3), Player::White));
}

#[test]
fn knight_jumps_over_pieces() {
    // Knight on d4 surrounded by pieces of both colors.
    let board = setup("8/8/8/2pPp3/2PNP3/2pPp3/8/8");
    let d4 = Position::new(4, 3);
    let destinations = legal_destinations(&board, d4, Player::White).unwrap();
    assert_eq!(destinations.len(), 8);
    for (row_delta, col_delta) in [
        (-2, -1),
        (-2, 1),
        (-1, -2),
        (-1, 2),
        (1, -2),
        (1, 2),
        (2, -1),
        (2, 1),
    ] {
        assert!(destinations.contains(&d4.offset(row_delta, col_delta)));
    }
}

#[test]
fn knight_captures() {
    let board = setup("8/8/2n1B3/8/3N4/8/8/8");
    let d4 = Position::new(4, 3);
    assert!(legal(&board, d4, Position::new(2, 2), Player::White));
    assert!(!legal(&board, d4, Position::new(2, 4), Player::White));
}

#[test]
fn rook_path() {
    let mut board = Board::starting();
    let (a1, e1) = (Position::new(7, 0), Position::new(7, 4));
    assert!(!legal(&board, a1, e1, Player::White));
    for col in 1..=3 {
        remove(&mut board, Position::new(7, col));
    }
    // Own king on e1.
    assert!(!legal(&board, a1, e1, Player::White));
    for col in 1..=3 {
        assert!(legal(&board, a1, Position::new(7, col), Player::White));
    }
    remove(&mut board, e1);
    assert!(legal(&board, a1, e1, Player::White));
    place(&mut board, e1, Player::Black, PieceKind::Knight);
    assert!(legal(&board, a1, e1, Player::White));
    // The black knight now blocks the way further.
    assert!(!legal(&board, a1, Position::new(7, 5), Player::White));
    place(&mut board, e1, Player::White, PieceKind::Queen);
    assert!(!legal(&board, a1, e1, Player::White));
    // Not a straight line.
    assert!(!legal(&board, a1, Position::new(5, 1), Player::White));
}

#[test]
fn king_steps() {
    let mut board = Board::starting();
    let (e1, e2, e3) = (Position::new(7, 4), Position::new(6, 4), Position::new(5, 4));
    assert!(!legal(&board, e1, e2, Player::White));
    remove(&mut board, e2);
    assert!(legal(&board, e1, e2, Player::White));
    place(&mut board, e2, Player::Black, PieceKind::Pawn);
    assert!(legal(&board, e1, e2, Player::White));
    remove(&mut board, e2);
    assert!(!legal(&board, e1, e3, Player::White));
}

#[test]
fn king_offsets() {
    let mut board = Board::empty();
    let d4 = Position::new(4, 3);
    place(&mut board, d4, Player::Black, PieceKind::King);
    for to in Position::all() {
        let (row_delta, col_delta) = d4.delta(to);
        let distance = row_delta.unsigned_abs().max(col_delta.unsigned_abs());
        assert_eq!(
            legal(&board, d4, to, Player::Black),
            distance == 1,
            "{d4} -> {to}"
        );
    }
    for (row_delta, col_delta) in DIRECTIONS {
        let to = d4.offset(row_delta, col_delta);
        place(&mut board, to, Player::White, PieceKind::Rook);
        assert!(legal(&board, d4, to, Player::Black));
        place(&mut board, to, Player::Black, PieceKind::Rook);
        assert!(!legal(&board, d4, to, Player::Black));
        remove(&mut board, to);
    }
}

#[test]
fn bishop_diagonal() {
    let mut board = Board::starting();
    let (c1, e3) = (Position::new(7, 2), Position::new(5, 4));
    assert!(!legal(&board, c1, e3, Player::White));
    remove(&mut board, Position::new(6, 3));
    assert!(legal(&board, c1, e3, Player::White));
    assert!(legal(&board, c1, Position::new(2, 7), Player::White));
    // Not a diagonal.
    assert!(!legal(&board, c1, Position::new(5, 3), Player::White));
    assert!(!legal(&board, c1, Position::new(6, 2), Player::White));
}

#[test]
fn queen_lines() {
    let board = setup("8/8/8/8/3Q4/8/8/8");
    let d4 = Position::new(4, 3);
    assert!(legal(&board, d4, Position::new(0, 3), Player::White));
    assert!(legal(&board, d4, Position::new(0, 7), Player::White));
    assert!(legal(&board, d4, Position::new(7, 0), Player::White));
    assert!(legal(&board, d4, Position::new(4, 0), Player::White));
    assert!(!legal(&board, d4, Position::new(2, 4), Player::White));
    assert!(!legal(&board, d4, Position::new(0, 4), Player::White));
}

/// Bishops, rooks and queens can not move through occupied squares,
/// regardless of who occupies them or what is on the destination.
#[test]
fn sliding_obstruction() {
    let d4 = Position::new(4, 3);
    for kind in [PieceKind::Bishop, PieceKind::Rook, PieceKind::Queen] {
        for (row_delta, col_delta) in DIRECTIONS {
            let diagonal = row_delta != 0 && col_delta != 0;
            let moves_along = match kind {
                PieceKind::Bishop => diagonal,
                PieceKind::Rook => !diagonal,
                _ => true,
            };
            for distance in 1..8 {
                let to = d4.offset(row_delta * distance, col_delta * distance);
                if !to.is_on_board() {
                    break;
                }
                let mut board = Board::empty();
                place(&mut board, d4, Player::White, kind);
                assert_eq!(legal(&board, d4, to, Player::White), moves_along);
                for blocked in 1..distance {
                    let blocker = d4.offset(row_delta * blocked, col_delta * blocked);
                    for blocker_owner in Player::iter() {
                        for destination in [None, Some(Player::Black)] {
                            let mut board = Board::empty();
                            place(&mut board, d4, Player::White, kind);
                            place(&mut board, blocker, blocker_owner, PieceKind::Pawn);
                            if let Some(owner) = destination {
                                place(&mut board, to, owner, PieceKind::Knight);
                            }
                            assert!(
                                !legal(&board, d4, to, Player::White),
                                "{kind} {d4} -> {to} through {blocker}"
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn null_moves_are_illegal() {
    for placement in POSITIONS {
        let board = setup(placement);
        for (from, piece) in board.pieces() {
            assert!(!legal(&board, from, from, piece.owner), "{piece} on {from}");
        }
    }
    for kind in PieceKind::iter() {
        let mut board = Board::empty();
        place(&mut board, Position::new(3, 3), Player::White, kind);
        assert!(!legal(&board, Position::new(3, 3), Position::new(3, 3), Player::White));
    }
}

#[test]
fn empty_origin() {
    let board = Board::starting();
    for player in Player::iter() {
        assert!(!legal(&board, Position::new(4, 4), Position::new(3, 4), player));
    }
}

#[test]
fn wrong_turn() {
    for placement in POSITIONS {
        let board = setup(placement);
        for (from, piece) in board.pieces() {
            for to in Position::all() {
                assert!(
                    !legal(&board, from, to, piece.owner.opponent()),
                    "{piece} {from} -> {to}"
                );
            }
        }
    }
}

#[test]
fn never_captures_own_pieces() {
    for placement in POSITIONS {
        let board = setup(placement);
        for player in Player::iter() {
            for (from, to) in all_moves() {
                if !legal(&board, from, to, player) {
                    continue;
                }
                let mover = board.piece_at(from).unwrap().unwrap();
                assert_eq!(mover.owner, player);
                if let Some(captured) = board.piece_at(to).unwrap() {
                    assert_ne!(captured.owner, mover.owner, "{mover} {from} -> {to}");
                }
            }
        }
    }
}

#[test]
fn determinism() {
    for placement in POSITIONS {
        let board = setup(placement);
        let snapshot = board.clone();
        for player in Player::iter() {
            for (from, to) in all_moves() {
                assert_eq!(
                    is_valid_move(&board, from, to, player),
                    is_valid_move(&board, from, to, player)
                );
            }
        }
        assert_eq!(board, snapshot);
    }
}

#[test]
fn starting_position_moves() {
    let board = Board::starting();
    let count = |player| {
        all_moves()
            .filter(|&(from, to)| legal(&board, from, to, player))
            .count()
    };
    // 16 pawn moves and 4 knight moves, as in the standard chess.
    assert_eq!(count(Player::White), 20);
    assert_eq!(count(Player::Black), 20);
}

#[test]
fn board_mutations_are_visible() {
    let mut board = Board::starting();
    let (f1, c4) = (Position::new(7, 5), Position::new(4, 2));
    assert!(!legal(&board, f1, c4, Player::White));
    remove(&mut board, Position::new(6, 4));
    assert!(legal(&board, f1, c4, Player::White));
    place(&mut board, Position::new(5, 3), Player::White, PieceKind::Pawn);
    assert!(!legal(&board, f1, c4, Player::White));
}

#[test]
fn out_of_bounds_endpoints() {
    let board = Board::starting();
    let e2 = Position::new(6, 4);
    for off_board in [
        Position::new(-1, 4),
        Position::new(8, 4),
        Position::new(4, -1),
        Position::new(4, 8),
    ] {
        assert_eq!(
            is_valid_move(&board, e2, off_board, Player::White),
            Err(OutOfBounds(off_board))
        );
        assert_eq!(
            is_valid_move(&board, off_board, e2, Player::White),
            Err(OutOfBounds(off_board))
        );
    }
    // Moves along the edges never wrap around.
    let board = setup("8/8/8/8/8/8/8/7R");
    assert!(!legal(&board, Position::new(7, 7), Position::new(6, 0), Player::White));
    assert!(legal(&board, Position::new(7, 7), Position::new(7, 0), Player::White));
}
