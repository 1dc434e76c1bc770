#![no_main]
use gambit::chess::board::Board;
use gambit::chess::core::{Player, Position};
use gambit::chess::rules;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(board) = Board::try_from(s) {
            assert_eq!(Board::try_from(board.to_string().as_str()).unwrap(), board);
            for from in Position::all() {
                for player in [Player::White, Player::Black] {
                    let _ = rules::legal_destinations(&board, from, player).unwrap();
                }
            }
        }
    }
});
