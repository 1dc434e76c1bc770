/// A single line of input the session understands. Arguments are kept raw and
/// validated when the command is executed, so that the errors can be reported
/// back to the user.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Command {
    /// Apply a move (e.g. "move e2e4") if it is legal.
    Move(String),
    /// Query legality without changing the board (e.g. "check e2e4").
    Check(String),
    /// List legal destinations of the piece on given square (e.g. "moves g1").
    Moves(String),
    /// "position startpos" or "position fen <placement> [w|b]".
    SetPosition {
        placement: Option<String>,
        side_to_move: Option<String>,
    },
    NewGame,
    Status,
    Display,
    Quit,
    Unknown(String),
}

fn parse_setposition(parts: &[&str]) -> Command {
    match parts.get(1) {
        Some(&"startpos") if parts.len() == 2 => Command::SetPosition {
            placement: None,
            side_to_move: None,
        },
        Some(&"fen") if parts.len() > 2 => Command::SetPosition {
            placement: Some(parts[2].to_string()),
            side_to_move: parts.get(3).map(|side| (*side).to_string()),
        },
        _ => Command::Unknown(parts.join(" ")),
    }
}

impl Command {
    pub(super) fn parse(input: &str) -> Self {
        let parts: Vec<&str> = input.split_whitespace().collect();

        if parts.is_empty() {
            return Self::Unknown(input.to_string());
        }

        match (parts[0], parts.len()) {
            ("move", 2) => Self::Move(parts[1].to_string()),
            ("check", 2) => Self::Check(parts[1].to_string()),
            ("moves", 2) => Self::Moves(parts[1].to_string()),
            ("position", _) => parse_setposition(&parts),
            ("new", 1) => Self::NewGame,
            ("status", 1) => Self::Status,
            ("d", 1) => Self::Display,
            ("quit", 1) => Self::Quit,
            _ => Self::Unknown(input.trim().to_string()),
        }
    }
}
