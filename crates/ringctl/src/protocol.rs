//! Line protocol spoken between `ringctl` and the `ringmenud` socket.
//!
//! One command per line, words split shell-style so menu ids may contain
//! spaces when quoted:
//!
//! ```text
//! toggle <menu>
//! click <menu> [<x> <y>]
//! enter <menu>
//! leave <menu>
//! move <menu> [<x> <y>]
//! status <menu>
//! reload
//! ```
//!
//! Only `status` is answered, with one line of text.

use ringmenu::{ContainerId, Point};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Toggle(ContainerId),
    Click(ContainerId, Option<Point>),
    Enter(ContainerId),
    Leave(ContainerId),
    Move(ContainerId, Option<Point>),
    Status(ContainerId),
    Reload,
}

#[derive(Debug, Error, PartialEq)]
pub enum ProtocolError {
    #[error("Malformed quoting: {0}")]
    Quoting(String),
    #[error("Empty command")]
    Empty,
    #[error("Unknown command '{0}'")]
    UnknownCommand(String),
    #[error("'{0}' needs a menu id")]
    MissingMenu(String),
    #[error("Coordinate '{0}' has no partner")]
    MissingCoordinate(String),
    #[error("Invalid coordinate '{0}'")]
    InvalidCoordinate(String),
    #[error("Unexpected arguments: {0}")]
    TrailingArguments(String),
}

impl Command {
    pub fn expects_reply(&self) -> bool {
        matches!(self, Command::Status(_))
    }
}

impl FromStr for Command {
    type Err = ProtocolError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let words = shell_words::split(line).map_err(|e| ProtocolError::Quoting(e.to_string()))?;
        let mut words = words.into_iter();
        let verb = words.next().ok_or(ProtocolError::Empty)?.to_ascii_lowercase();

        let command = match verb.as_str() {
            "toggle" => Command::Toggle(menu(&verb, &mut words)?),
            "click" => Command::Click(menu(&verb, &mut words)?, pointer(&mut words)?),
            "enter" => Command::Enter(menu(&verb, &mut words)?),
            "leave" => Command::Leave(menu(&verb, &mut words)?),
            "move" => Command::Move(menu(&verb, &mut words)?, pointer(&mut words)?),
            "status" => Command::Status(menu(&verb, &mut words)?),
            "reload" => Command::Reload,
            _ => return Err(ProtocolError::UnknownCommand(verb)),
        };

        let rest: Vec<String> = words.collect();
        if !rest.is_empty() {
            return Err(ProtocolError::TrailingArguments(rest.join(" ")));
        }
        Ok(command)
    }
}

fn menu(
    verb: &str,
    words: &mut impl Iterator<Item = String>,
) -> Result<ContainerId, ProtocolError> {
    words
        .next()
        .map(ContainerId::new)
        .ok_or_else(|| ProtocolError::MissingMenu(verb.to_string()))
}

fn pointer(words: &mut impl Iterator<Item = String>) -> Result<Option<Point>, ProtocolError> {
    match (words.next(), words.next()) {
        (None, _) => Ok(None),
        (Some(x), None) => Err(ProtocolError::MissingCoordinate(x)),
        (Some(x), Some(y)) => Ok(Some(Point::new(coordinate(&x)?, coordinate(&y)?))),
    }
}

fn coordinate(word: &str) -> Result<f64, ProtocolError> {
    word.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ProtocolError::InvalidCoordinate(word.to_string()))
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (verb, menu, pointer) = match self {
            Command::Toggle(menu) => ("toggle", Some(menu), None),
            Command::Click(menu, pointer) => ("click", Some(menu), *pointer),
            Command::Enter(menu) => ("enter", Some(menu), None),
            Command::Leave(menu) => ("leave", Some(menu), None),
            Command::Move(menu, pointer) => ("move", Some(menu), *pointer),
            Command::Status(menu) => ("status", Some(menu), None),
            Command::Reload => ("reload", None, None),
        };

        write!(f, "{verb}")?;
        if let Some(menu) = menu {
            write!(f, " {}", shell_words::quote(menu.as_str()))?;
        }
        if let Some(p) = pointer {
            write!(f, " {} {}", p.x, p.y)?;
        }
        Ok(())
    }
}
