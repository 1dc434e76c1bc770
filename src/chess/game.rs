//! The owner of the board: validates moves through [`crate::chess::rules`],
//! applies them and passes the turn to the other player.

use anyhow::bail;
use log::debug;

use crate::chess::board::Board;
use crate::chess::core::{Move, Piece, Player, Position};
use crate::chess::rules;

/// Board together with the player whose turn it is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Game {
    board: Board,
    side_to_move: Player,
}

impl Game {
    /// Starts a game from the standard initial layout with White to move.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(Board::starting(), Player::White)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn from_parts(board: Board, side_to_move: Player) -> Self {
        Self {
            board,
            side_to_move,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    /// Human-readable description of whose turn it is, e.g. "White's turn".
    #[must_use]
    pub fn status(&self) -> String {
        format!("{}'s turn", self.side_to_move)
    }

    /// Checks the move with [`rules::is_valid_move`] without applying it.
    ///
    /// # Errors
    ///
    /// If either square is not on the board.
    pub fn is_legal(&self, next_move: Move) -> anyhow::Result<bool> {
        Ok(rules::is_valid_move(
            &self.board,
            next_move.from,
            next_move.to,
            self.side_to_move,
        )?)
    }

    /// Moves the piece if the move is legal and passes the turn to the other
    /// player. Returns the captured piece, if any.
    ///
    /// # Errors
    ///
    /// If the move is a null move, is illegal or refers to squares outside of
    /// the board. The game is not changed in this case.
    pub fn make_move(&mut self, next_move: Move) -> anyhow::Result<Option<Piece>> {
        let Move { from, to } = next_move;
        if from == to {
            bail!("{next_move}: piece has to leave its square");
        }
        if !self.is_legal(next_move)? {
            bail!("{next_move} is illegal for {}", self.side_to_move);
        }
        let Some(piece) = self.board.clear(from)? else {
            bail!("{next_move}: no piece on {from}");
        };
        let captured = self.board.put(to, piece)?;
        debug!("{} played {next_move} ({piece})", self.side_to_move);
        self.side_to_move = self.side_to_move.opponent();
        Ok(captured)
    }

    /// Convenience wrapper for [`Game::make_move`] taking two squares.
    ///
    /// # Errors
    ///
    /// See [`Game::make_move`].
    pub fn move_piece(&mut self, from: Position, to: Position) -> anyhow::Result<Option<Piece>> {
        self.make_move(Move::new(from, to))
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
