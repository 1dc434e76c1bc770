//! Square-centric ("mailbox") board representation: the only state the rules
//! read.

use std::fmt::{self, Write};

use anyhow::bail;

use crate::chess::core::{OutOfBounds, Piece, PieceKind, Player, Position, BOARD_WIDTH};

const BOARD_LENGTH: usize = BOARD_WIDTH as usize;

/// 8x8 grid of optionally occupied squares, indexed by `[row][col]`.
///
/// The board is owned and mutated by the caller; [`crate::chess::rules`] only
/// borrows it for the duration of a query. Global chess invariants (e.g. one
/// king per player) are not enforced.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; BOARD_LENGTH]; BOARD_LENGTH],
}

impl Board {
    /// Creates a board without any pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [[None; BOARD_LENGTH]; BOARD_LENGTH],
        }
    }

    /// Creates the initial layout of the standard chess: Black pieces occupy
    /// rows 0 and 1, White pieces occupy rows 6 and 7.
    ///
    /// ```
    /// use gambit::chess::board::Board;
    ///
    /// assert_eq!(
    ///     Board::starting().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    #[must_use]
    pub fn starting() -> Self {
        const BACKRANK: [PieceKind; BOARD_LENGTH] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        let mut board = Self::empty();
        for (col, kind) in BACKRANK.into_iter().enumerate() {
            board.squares[0][col] = Some(Piece::new(Player::Black, kind));
            board.squares[1][col] = Some(Piece::new(Player::Black, PieceKind::Pawn));
            board.squares[6][col] = Some(Piece::new(Player::White, PieceKind::Pawn));
            board.squares[7][col] = Some(Piece::new(Player::White, kind));
        }
        board
    }

    /// Returns the piece occupying the square, if any.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if the position is not on the board.
    pub fn piece_at(&self, pos: Position) -> Result<Option<Piece>, OutOfBounds> {
        let (row, col) = Self::index(pos)?;
        Ok(self.squares[row][col])
    }

    /// Places a piece on the square and returns the previous occupant.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if the position is not on the board.
    pub fn put(&mut self, pos: Position, piece: Piece) -> Result<Option<Piece>, OutOfBounds> {
        let (row, col) = Self::index(pos)?;
        Ok(self.squares[row][col].replace(piece))
    }

    /// Removes the piece from the square and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`OutOfBounds`] if the position is not on the board.
    pub fn clear(&mut self, pos: Position) -> Result<Option<Piece>, OutOfBounds> {
        let (row, col) = Self::index(pos)?;
        Ok(self.squares[row][col].take())
    }

    /// Squares beyond the board edges are treated as occupied, so no scan can
    /// leave the grid.
    pub(super) fn is_blocked(&self, pos: Position) -> bool {
        self.piece_at(pos).map_or(true, |piece| piece.is_some())
    }

    /// Iterates over all occupied squares.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|pos| match self.piece_at(pos) {
            Ok(Some(piece)) => Some((pos, piece)),
            _ => None,
        })
    }

    fn index(pos: Position) -> Result<(usize, usize), OutOfBounds> {
        if !pos.is_on_board() {
            return Err(OutOfBounds(pos));
        }
        match (usize::try_from(pos.row), usize::try_from(pos.col)) {
            (Ok(row), Ok(col)) => Ok((row, col)),
            _ => Err(OutOfBounds(pos)),
        }
    }

    /// Parses the piece placement field of [Forsyth-Edwards Notation]: ranks
    /// from 8 to 1 separated by '/', digits for runs of empty squares. Any
    /// other FEN fields following the placement are ignored.
    ///
    /// # Errors
    ///
    /// If the placement does not describe exactly 8 ranks of 8 squares or
    /// contains unknown symbols.
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_placement(input: &str) -> anyhow::Result<Self> {
        let pieces_placement = match input.split_whitespace().next() {
            Some(placement) => placement,
            None => bail!("incorrect placement: input is empty"),
        };
        let mut result = Self::empty();
        let mut row: i8 = 0;
        for rank_fen in pieces_placement.split('/') {
            if row == BOARD_WIDTH {
                bail!("incorrect placement: expected 8 ranks, got {pieces_placement}");
            }
            let mut col: i8 = 0;
            for symbol in rank_fen.chars() {
                if col > BOARD_WIDTH {
                    bail!("file exceeded {BOARD_WIDTH}");
                }
                match symbol {
                    '0' => bail!("increment can not be 0"),
                    '1'..='8' => {
                        col += i8::try_from(symbol as u8 - b'0')?;
                        continue;
                    },
                    _ => (),
                }
                let piece = Piece::try_from(symbol)?;
                if col >= BOARD_WIDTH {
                    bail!("incorrect placement: rank {rank_fen} is wider than {BOARD_WIDTH}");
                }
                let _ = result.put(Position::new(row, col), piece)?;
                col += 1;
            }
            if col != BOARD_WIDTH {
                bail!(
                    "incorrect placement: rank size should be exactly {BOARD_WIDTH}, got \
                     {rank_fen} of length {col}"
                );
            }
            row += 1;
        }
        if row != BOARD_WIDTH {
            bail!("incorrect placement: there should be 8 ranks, got {pieces_placement}");
        }
        Ok(result)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<&str> for Board {
    type Error = anyhow::Error;

    fn try_from(input: &str) -> anyhow::Result<Self> {
        Self::from_placement(input.trim())
    }
}

impl fmt::Display for Board {
    /// Prints the board as the piece placement field of FEN.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, rank) in self.squares.iter().enumerate() {
            let mut empty_squares = 0i32;
            for square in rank {
                if let Some(piece) = square {
                    if empty_squares != 0 {
                        write!(f, "{empty_squares}")?;
                        empty_squares = 0;
                    }
                    write!(f, "{piece}")?;
                } else {
                    empty_squares += 1;
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if row != BOARD_LENGTH - 1 {
                const RANK_SEPARATOR: char = '/';
                f.write_char(RANK_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece) a-la Stockfish "d" command.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, rank) in self.squares.iter().enumerate() {
            for (col, square) in rank.iter().enumerate() {
                match square {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if col != BOARD_LENGTH - 1 {
                    f.write_str(SQUARE_SEPARATOR)?;
                }
            }
            if row != BOARD_LENGTH - 1 {
                f.write_str(LINE_SEPARATOR)?;
            }
        }
        Ok(())
    }
}

const LINE_SEPARATOR: &str = "\n";
const SQUARE_SEPARATOR: &str = " ";
