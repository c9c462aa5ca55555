//! Discrete inputs the session consumes, whatever produced them.

use std::{fmt, str::FromStr};

use thiserror::Error;

use crate::board::Direction;

/// Why a new round was started. Only recorded in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NewGameReason {
    Manual,
    Sensor,
    Menu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Move(Direction),
    NewGame(NewGameReason),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseInputError {
    #[error("unknown direction `{0}`")]
    Direction(String),
    #[error("unknown new-game reason `{0}`")]
    Reason(String),
    #[error("unrecognised input `{0}`")]
    Input(String),
}

impl FromStr for Direction {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "u" => Ok(Direction::Up),
            "down" | "d" => Ok(Direction::Down),
            "left" | "l" => Ok(Direction::Left),
            "right" | "r" => Ok(Direction::Right),
            _ => Err(ParseInputError::Direction(s.to_owned())),
        }
    }
}

impl fmt::Display for NewGameReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NewGameReason::Manual => "manual",
            NewGameReason::Sensor => "sensor",
            NewGameReason::Menu => "menu",
        })
    }
}

impl FromStr for NewGameReason {
    type Err = ParseInputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "manual" => Ok(NewGameReason::Manual),
            "sensor" | "shake" => Ok(NewGameReason::Sensor),
            "menu" => Ok(NewGameReason::Menu),
            _ => Err(ParseInputError::Reason(s.to_owned())),
        }
    }
}

impl FromStr for Input {
    type Err = ParseInputError;

    /// Accepts a direction (`left`, `u`, ...) or `new [reason]`, the reason
    /// defaulting to `manual`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();

        match (words.next(), words.next(), words.next()) {
            (Some(word), None, None) if word.eq_ignore_ascii_case("new") => {
                Ok(Input::NewGame(NewGameReason::Manual))
            }
            (Some(word), Some(reason), None) if word.eq_ignore_ascii_case("new") => {
                Ok(Input::NewGame(reason.parse()?))
            }
            (Some(word), None, None) => Ok(Input::Move(word.parse()?)),
            _ => Err(ParseInputError::Input(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_moves() {
        assert_eq!("left".parse::<Input>(), Ok(Input::Move(Direction::Left)));
        assert_eq!(" UP ".parse::<Input>(), Ok(Input::Move(Direction::Up)));
        assert_eq!("d".parse::<Input>(), Ok(Input::Move(Direction::Down)));
        assert_eq!(
            "sideways".parse::<Input>(),
            Err(ParseInputError::Direction("sideways".to_owned()))
        );
    }

    #[test]
    fn test_parse_new_game() {
        assert_eq!("new".parse::<Input>(), Ok(Input::NewGame(NewGameReason::Manual)));
        assert_eq!("new sensor".parse::<Input>(), Ok(Input::NewGame(NewGameReason::Sensor)));
        assert_eq!("NEW menu".parse::<Input>(), Ok(Input::NewGame(NewGameReason::Menu)));
        assert_eq!(
            "new later".parse::<Input>(),
            Err(ParseInputError::Reason("later".to_owned()))
        );
        assert_eq!(
            "left right".parse::<Input>(),
            Err(ParseInputError::Input("left right".to_owned()))
        );
        assert!("".parse::<Input>().is_err());
    }

    #[test]
    fn test_reason_display_round_trips() {
        for reason in [NewGameReason::Manual, NewGameReason::Sensor, NewGameReason::Menu] {
            assert_eq!(reason.to_string().parse::<NewGameReason>(), Ok(reason));
        }
    }
}
