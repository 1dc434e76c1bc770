//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};

use anyhow::bail;
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: i8 = 8;

/// A square on the board addressed by `(row, col)`.
///
/// Row 0 is the top of the initial layout (Black's back rank) and row 7 is
/// White's back rank; column 0 is the a-file. The coordinates are signed so
/// that squares beyond the board edges can be represented: the rules treat
/// them as permanently blocked instead of wrapping around.
///
/// ```
/// use gambit::chess::core::Position;
///
/// let e2 = Position::try_from("e2").unwrap();
/// assert_eq!(e2, Position::new(6, 4));
/// assert_eq!(e2.to_string(), "e2");
/// assert!(!Position::new(8, 0).is_on_board());
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    #[allow(missing_docs)]
    pub row: i8,
    #[allow(missing_docs)]
    pub col: i8,
}

impl Position {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(row: i8, col: i8) -> Self {
        Self { row, col }
    }

    /// Returns true if both coordinates are within `0..BOARD_WIDTH`.
    #[must_use]
    pub const fn is_on_board(self) -> bool {
        0 <= self.row && self.row < BOARD_WIDTH && 0 <= self.col && self.col < BOARD_WIDTH
    }

    /// Shifts the position by given row and column deltas. The result might be
    /// off the board.
    #[must_use]
    pub const fn offset(self, row_delta: i8, col_delta: i8) -> Self {
        Self::new(
            self.row.saturating_add(row_delta),
            self.col.saturating_add(col_delta),
        )
    }

    /// Returns `(to.row - self.row, to.col - self.col)`.
    #[must_use]
    pub const fn delta(self, to: Self) -> (i8, i8) {
        (
            to.row.saturating_sub(self.row),
            to.col.saturating_sub(self.col),
        )
    }

    /// Iterates over all 64 squares row by row, starting from `a8`.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..BOARD_WIDTH)
            .cartesian_product(0..BOARD_WIDTH)
            .map(|(row, col)| Self::new(row, col))
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    /// Parses a square in algebraic notation (e.g. "e4").
    ///
    /// # Errors
    ///
    /// If the input is not exactly a file within 'a'..='h' followed by a rank
    /// within '1'..='8'.
    fn try_from(square: &str) -> anyhow::Result<Self> {
        let (file, rank) = match square.chars().collect_tuple() {
            Some((file, rank)) => (file, rank),
            None => bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            ),
        };
        let col = match file {
            'a'..='h' => file as u8 - b'a',
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        };
        let rank = match rank {
            '1'..='8' => rank as u8 - b'1',
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        };
        // Both values are below BOARD_WIDTH, the conversion can not fail.
        Ok(Self::new(
            BOARD_WIDTH - 1 - i8::try_from(rank)?,
            i8::try_from(col)?,
        ))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_on_board() {
            return write!(f, "({}, {})", self.row, self.col);
        }
        // On-board coordinates are within 0..8, so the casts are lossless.
        #[allow(clippy::cast_sign_loss)]
        let (file, rank) = (
            (b'a' + self.col as u8) as char,
            (b'8' - self.row as u8) as char,
        );
        f.write_char(file)?;
        f.write_char(rank)
    }
}

/// Signals that a square outside of the 8x8 grid was used where only on-board
/// squares make sense. This is a contract violation rather than an illegal
/// move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("position {0} is out of the board bounds")]
pub struct OutOfBounds(pub Position);

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum Player {
    White,
    Black,
}

impl Player {
    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Row delta of a single pawn push: White moves towards row 0, Black
    /// towards row 7.
    #[must_use]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    /// The row where pawns of the player are placed in the initial layout.
    #[must_use]
    pub const fn pawns_starting_row(self) -> i8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("player should be 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match &self {
            Self::White => "White",
            Self::Black => "Black",
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::EnumIter)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// Represents a specific piece owned by a player. Two pieces of the same kind
/// and owner are interchangeable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
}

impl Piece {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self { owner, kind }
    }

    /// Unicode chess symbol of the piece.
    #[must_use]
    pub const fn figurine(self) -> char {
        match (self.owner, self.kind) {
            (Player::White, PieceKind::King) => '♔',
            (Player::White, PieceKind::Queen) => '♕',
            (Player::White, PieceKind::Rook) => '♖',
            (Player::White, PieceKind::Bishop) => '♗',
            (Player::White, PieceKind::Knight) => '♘',
            (Player::White, PieceKind::Pawn) => '♙',
            (Player::Black, PieceKind::King) => '♚',
            (Player::Black, PieceKind::Queen) => '♛',
            (Player::Black, PieceKind::Rook) => '♜',
            (Player::Black, PieceKind::Bishop) => '♝',
            (Player::Black, PieceKind::Knight) => '♞',
            (Player::Black, PieceKind::Pawn) => '♟',
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let owner = if symbol.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        };
        Ok(Self { owner, kind })
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind.to_string();
        match self.owner {
            // White player: uppercase symbols.
            Player::White => f.write_str(&symbol.to_ascii_uppercase()),
            // Black player: lowercase symbols.
            Player::Black => f.write_str(&symbol),
        }
    }
}

/// A displacement of a piece from one square to the other.
#[allow(missing_docs)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Position,
    pub to: Position,
}

impl Move {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn new(from: Position, to: Position) -> Self {
        Self { from, to }
    }

    /// Parses a move in UCI-like long algebraic notation without promotion
    /// suffix (e.g. "e2e4").
    ///
    /// # Errors
    ///
    /// If the input is not four characters or either square is malformed.
    pub fn from_uci(input: &str) -> anyhow::Result<Self> {
        if input.len() != 4 || !input.is_ascii() {
            bail!("move should be 4 ASCII chars, got '{input}'");
        }
        Ok(Self::new(
            Position::try_from(&input[..2])?,
            Position::try_from(&input[2..])?,
        ))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)
    }
}
