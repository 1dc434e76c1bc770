#![no_main]
use gambit::chess::board::Board;
use gambit::chess::core::{OutOfBounds, Player, Position};
use gambit::chess::rules::is_valid_move;
use libfuzzer_sys::fuzz_target;

// Arbitrary coordinates on the starting board: the rules must never panic and
// only report squares outside of the board as errors.
fuzz_target!(|data: [i8; 5]| {
    let board = Board::starting();
    let from = Position::new(data[0], data[1]);
    let to = Position::new(data[2], data[3]);
    let player = if data[4] % 2 == 0 { Player::White } else { Player::Black };
    match is_valid_move(&board, from, to, player) {
        Ok(_) => assert!(from.is_on_board() && to.is_on_board()),
        Err(OutOfBounds(pos)) => assert!(!pos.is_on_board()),
    }
});
