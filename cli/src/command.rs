use mineclear_core::Coord2;
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameCommand {
    Open(Coord2),
    Flag(Coord2),
    Help,
    Quit,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid format. Use: o row col or f row col")]
    WrongFormat,
    #[error("Unknown action {0:?}. Use o or f")]
    UnknownAction(String),
    #[error("{0:?} is not a valid coordinate")]
    BadCoordinate(String),
}

impl GameCommand {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["h" | "help"] => Ok(Self::Help),
            ["q" | "quit"] => Ok(Self::Quit),
            [action, row, col] => {
                let coords = (parse_coord(row)?, parse_coord(col)?);
                match *action {
                    "o" => Ok(Self::Open(coords)),
                    "f" => Ok(Self::Flag(coords)),
                    other => Err(CommandError::UnknownAction(other.to_string())),
                }
            }
            _ => Err(CommandError::WrongFormat),
        }
    }
}

fn parse_coord(text: &str) -> Result<u8, CommandError> {
    text.parse()
        .map_err(|_| CommandError::BadCoordinate(text.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_moves_and_keywords() {
        assert_eq!(GameCommand::parse("o 1 2"), Ok(GameCommand::Open((1, 2))));
        assert_eq!(GameCommand::parse("f   0\t3"), Ok(GameCommand::Flag((0, 3))));
        assert_eq!(GameCommand::parse("h"), Ok(GameCommand::Help));
        assert_eq!(GameCommand::parse("quit"), Ok(GameCommand::Quit));
    }

    #[test]
    fn rejects_malformed_input() {
        assert_eq!(GameCommand::parse(""), Err(CommandError::WrongFormat));
        assert_eq!(GameCommand::parse("o 1"), Err(CommandError::WrongFormat));
        assert_eq!(
            GameCommand::parse("x 1 2"),
            Err(CommandError::UnknownAction("x".to_string()))
        );
        assert_eq!(
            GameCommand::parse("o -1 2"),
            Err(CommandError::BadCoordinate("-1".to_string()))
        );
    }
}
