//! Move legality: decides whether a piece displacement obeys the movement rule
//! of the piece on the current occupancy.
//!
//! The rules are a pure function of the board snapshot, the move and the side
//! to move. They know nothing about checks, castling, en passant, promotions
//! or draws: a move is legal if the piece can geometrically get to the
//! destination, the path is not obstructed and the destination is not occupied
//! by a piece of the same player.

use arrayvec::ArrayVec;
use log::trace;

use crate::chess::board::Board;
use crate::chess::core::{OutOfBounds, PieceKind, Player, Position, BOARD_WIDTH};

/// The largest number of destinations a single piece can have: a queen in the
/// center of an empty board.
pub const MAX_DESTINATIONS: usize = 27;

/// Checks whether moving the piece at `from` to `to` is legal for
/// `side_to_move`.
///
/// Returns `Ok(false)` for every illegal move: empty origin, piece of the
/// other player, wrong shape, obstructed path, landing on own piece. `from ==
/// to` is never legal.
///
/// ```
/// use gambit::chess::board::Board;
/// use gambit::chess::core::{Player, Position};
/// use gambit::chess::rules::is_valid_move;
///
/// let board = Board::starting();
/// let e2 = Position::try_from("e2").unwrap();
/// let e4 = Position::try_from("e4").unwrap();
/// assert_eq!(is_valid_move(&board, e2, e4, Player::White), Ok(true));
/// assert_eq!(is_valid_move(&board, e2, e4, Player::Black), Ok(false));
/// ```
///
/// # Errors
///
/// [`OutOfBounds`] if either `from` or `to` is outside of the board. This is
/// a misuse of the API rather than an illegal move.
pub fn is_valid_move(
    board: &Board,
    from: Position,
    to: Position,
    side_to_move: Player,
) -> Result<bool, OutOfBounds> {
    if !to.is_on_board() {
        return Err(OutOfBounds(to));
    }
    let Some(piece) = board.piece_at(from)? else {
        trace!("{from}{to}: no piece to move");
        return Ok(false);
    };
    if piece.owner != side_to_move {
        trace!("{from}{to}: {piece} can not move on {side_to_move}'s turn");
        return Ok(false);
    }
    let legal = match piece.kind {
        PieceKind::Pawn => is_valid_pawn_move(board, from, to, piece.owner),
        PieceKind::Knight => is_valid_knight_move(board, from, to, piece.owner),
        PieceKind::Bishop => {
            is_diagonal(from, to) && is_valid_sliding_move(board, from, to, piece.owner)
        },
        PieceKind::Rook => {
            is_orthogonal(from, to) && is_valid_sliding_move(board, from, to, piece.owner)
        },
        PieceKind::Queen => {
            (is_diagonal(from, to) || is_orthogonal(from, to))
                && is_valid_sliding_move(board, from, to, piece.owner)
        },
        PieceKind::King => is_valid_king_move(board, from, to, piece.owner),
    };
    trace!(
        "{from}{to}: {piece} move is {}",
        if legal { "legal" } else { "illegal" }
    );
    Ok(legal)
}

/// Collects all squares the piece at `from` can legally move to.
///
/// # Errors
///
/// [`OutOfBounds`] if `from` is outside of the board.
pub fn legal_destinations(
    board: &Board,
    from: Position,
    side_to_move: Player,
) -> Result<ArrayVec<Position, MAX_DESTINATIONS>, OutOfBounds> {
    let mut destinations = ArrayVec::new();
    for to in Position::all() {
        if is_valid_move(board, from, to, side_to_move)? {
            destinations.push(to);
        }
    }
    Ok(destinations)
}

/// Pawns push forward to an empty square (two squares from the starting row
/// if both are empty) and capture one square diagonally forward.
fn is_valid_pawn_move(board: &Board, from: Position, to: Position, owner: Player) -> bool {
    let direction = owner.pawn_direction();
    let (row_delta, col_delta) = from.delta(to);
    match col_delta.unsigned_abs() {
        0 if row_delta == direction => !board.is_blocked(to),
        0 if row_delta == 2 * direction => {
            from.row == owner.pawns_starting_row()
                && !board.is_blocked(from.offset(direction, 0))
                && !board.is_blocked(to)
        },
        1 if row_delta == direction => is_capture(board, to, owner),
        _ => false,
    }
}

/// Knights jump: the squares in between are irrelevant.
fn is_valid_knight_move(board: &Board, from: Position, to: Position, owner: Player) -> bool {
    let (row_delta, col_delta) = from.delta(to);
    matches!(
        (row_delta.unsigned_abs(), col_delta.unsigned_abs()),
        (1, 2) | (2, 1)
    ) && is_capture_or_empty(board, to, owner)
}

fn is_valid_king_move(board: &Board, from: Position, to: Position, owner: Player) -> bool {
    let (row_delta, col_delta) = from.delta(to);
    row_delta.unsigned_abs().max(col_delta.unsigned_abs()) == 1
        && is_capture_or_empty(board, to, owner)
}

/// The shape has to be checked by the caller.
fn is_valid_sliding_move(board: &Board, from: Position, to: Position, owner: Player) -> bool {
    path_is_clear(board, from, to) && is_capture_or_empty(board, to, owner)
}

fn is_diagonal(from: Position, to: Position) -> bool {
    let (row_delta, col_delta) = from.delta(to);
    row_delta != 0 && row_delta.unsigned_abs() == col_delta.unsigned_abs()
}

fn is_orthogonal(from: Position, to: Position) -> bool {
    let (row_delta, col_delta) = from.delta(to);
    (row_delta == 0) != (col_delta == 0)
}

/// Walks from `from` towards `to` one unit step at a time and checks that
/// every square strictly in between is empty. Squares off the board count as
/// occupied and the walk never takes more than [`BOARD_WIDTH`] steps, so a
/// path that does not lead to `to` is reported as blocked.
fn path_is_clear(board: &Board, from: Position, to: Position) -> bool {
    let (row_delta, col_delta) = from.delta(to);
    let (row_step, col_step) = (row_delta.signum(), col_delta.signum());
    let mut current = from.offset(row_step, col_step);
    for _ in 0..BOARD_WIDTH {
        if current == to {
            return true;
        }
        if board.is_blocked(current) {
            return false;
        }
        current = current.offset(row_step, col_step);
    }
    false
}

/// The destination is empty or holds a piece of the opponent.
fn is_capture_or_empty(board: &Board, to: Position, owner: Player) -> bool {
    match board.piece_at(to) {
        Ok(None) => true,
        Ok(Some(piece)) => piece.owner != owner,
        Err(_) => false,
    }
}

/// The destination holds a piece of the opponent.
fn is_capture(board: &Board, to: Position, owner: Player) -> bool {
    matches!(board.piece_at(to), Ok(Some(piece)) if piece.owner != owner)
}
