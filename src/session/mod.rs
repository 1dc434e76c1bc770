//! Interactive session: reads commands line by line, queries the rules and
//! plays the moves on a [`Game`].
//!
//! [`Session::run`] is the "main loop" of the binary. The output is meant to
//! be read by a human or a simple script: one response per command.

use std::io::{BufRead, Write};

use itertools::Itertools;
use log::{debug, warn};

use crate::chess::board::Board;
use crate::chess::core::{Move, Player, Position};
use crate::chess::game::Game;
use crate::chess::rules;
use crate::session::command::Command;

mod command;

/// Connects the game with the I/O streams.
pub struct Session<'a, R: BufRead, W: Write> {
    game: Game,
    input: &'a mut R,
    output: &'a mut W,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Creates a new session playing `game` with provided I/O.
    #[must_use]
    pub fn new(game: Game, input: &'a mut R, output: &'a mut W) -> Self {
        Self {
            game,
            input,
            output,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn game(&self) -> &Game {
        &self.game
    }

    /// Continuously reads the input stream and executes the commands until
    /// "quit" is sent or the input is exhausted.
    ///
    /// Malformed commands and illegal moves are reported to the output and
    /// the session continues.
    ///
    /// # Errors
    ///
    /// If reading the input or writing the output fails.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                break;
            }
            if line.trim().is_empty() {
                continue;
            }
            debug!("Received command: '{}'", line.trim_end());
            match Command::parse(&line) {
                Command::Move(input) => self.handle_move(&input)?,
                Command::Check(input) => self.handle_check(&input)?,
                Command::Moves(input) => self.handle_moves(&input)?,
                Command::SetPosition {
                    placement,
                    side_to_move,
                } => self.handle_position(placement.as_deref(), side_to_move.as_deref())?,
                Command::NewGame => {
                    self.game = Game::new();
                    writeln!(self.output, "{}", self.game.status())?;
                },
                Command::Status => writeln!(self.output, "{}", self.game.status())?,
                Command::Display => {
                    writeln!(self.output, "{:?}", self.game.board())?;
                    writeln!(self.output, "{}", self.game.status())?;
                },
                Command::Quit => break,
                Command::Unknown(command) => {
                    warn!("Unsupported command: {command}");
                    writeln!(self.output, "error: unsupported command: {command}")?;
                },
            }
            self.output.flush()?;
        }
        Ok(())
    }

    /// Plays the move if it is legal and reports the captured piece.
    fn handle_move(&mut self, input: &str) -> anyhow::Result<()> {
        let result = Move::from_uci(input).and_then(|next_move| self.game.make_move(next_move));
        match result {
            Ok(Some(captured)) => writeln!(self.output, "ok, captured {captured}")?,
            Ok(None) => writeln!(self.output, "ok")?,
            Err(e) => writeln!(self.output, "illegal: {e}")?,
        }
        Ok(())
    }

    fn handle_check(&mut self, input: &str) -> anyhow::Result<()> {
        match Move::from_uci(input).and_then(|next_move| self.game.is_legal(next_move)) {
            Ok(true) => writeln!(self.output, "legal")?,
            Ok(false) => writeln!(self.output, "illegal")?,
            Err(e) => writeln!(self.output, "error: {e}")?,
        }
        Ok(())
    }

    /// Lists legal destinations separated by spaces.
    fn handle_moves(&mut self, input: &str) -> anyhow::Result<()> {
        let from = match Position::try_from(input) {
            Ok(from) => from,
            Err(e) => {
                writeln!(self.output, "error: {e}")?;
                return Ok(());
            },
        };
        let destinations =
            rules::legal_destinations(self.game.board(), from, self.game.side_to_move())?;
        if destinations.is_empty() {
            writeln!(self.output, "none")?;
        } else {
            writeln!(self.output, "{}", destinations.iter().join(" "))?;
        }
        Ok(())
    }

    /// Replaces the game with the standard starting one or the one given by
    /// FEN placement. White moves first unless specified otherwise.
    fn handle_position(
        &mut self,
        placement: Option<&str>,
        side_to_move: Option<&str>,
    ) -> anyhow::Result<()> {
        let game = match parse_game(placement, side_to_move) {
            Ok(game) => game,
            Err(e) => {
                writeln!(self.output, "error: {e}")?;
                return Ok(());
            },
        };
        self.game = game;
        writeln!(self.output, "{}", self.game.status())?;
        Ok(())
    }
}

/// Creates a game from optional FEN piece placement and side to move; the
/// missing parts default to the standard starting position and White.
///
/// # Errors
///
/// If either of the parts is malformed.
pub fn parse_game(placement: Option<&str>, side_to_move: Option<&str>) -> anyhow::Result<Game> {
    let board = match placement {
        Some(placement) => Board::try_from(placement)?,
        None => Board::starting(),
    };
    let side_to_move = match side_to_move {
        Some(side) => Player::try_from(side)?,
        None => Player::White,
    };
    Ok(Game::from_parts(board, side_to_move))
}
