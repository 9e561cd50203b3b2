//! Replayable tree commands.
//!
//! Test harnesses describe workloads as lines of the form `insert <key>` or
//! `delete <key>`. A [`Command`] is one parsed line; [`crate::BTree::apply`]
//! runs it and reports a [`CommandOutcome`].

use std::str::FromStr;

/// A single mutation to replay against a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert a key.
    Insert(String),
    /// Delete a key.
    Delete(String),
}

/// Result of applying a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The key was added.
    Inserted,
    /// The key was already in the tree; nothing changed.
    AlreadyPresent,
    /// The key was removed.
    Deleted(String),
    /// The key was not in the tree; nothing changed.
    NotFound,
}

impl Command {
    /// The key this command operates on.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Insert(key) | Self::Delete(key) => key,
        }
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Insert(key) => write!(f, "insert {key}"),
            Self::Delete(key) => write!(f, "delete {key}"),
        }
    }
}

/// Errors that can occur when parsing a command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The line was empty or whitespace only.
    Empty,
    /// The action word was neither `insert` nor `delete`.
    UnknownAction(String),
    /// The action had no key.
    MissingKey,
    /// The line had more than one key.
    TrailingInput(String),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::UnknownAction(action) => write!(f, "unknown action: {action}"),
            Self::MissingKey => write!(f, "missing key"),
            Self::TrailingInput(rest) => write!(f, "unexpected input after key: {rest}"),
        }
    }
}

impl std::error::Error for CommandError {}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();

        let action = words.next().ok_or(CommandError::Empty)?;
        let key = words.next().ok_or(CommandError::MissingKey)?.to_string();

        let rest: Vec<&str> = words.collect();
        if !rest.is_empty() {
            return Err(CommandError::TrailingInput(rest.join(" ")));
        }

        match action {
            "insert" => Ok(Self::Insert(key)),
            "delete" => Ok(Self::Delete(key)),
            other => Err(CommandError::UnknownAction(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            "insert apple".parse::<Command>(),
            Ok(Command::Insert("apple".to_string()))
        );
        assert_eq!(
            "  delete   x-ray ".parse::<Command>(),
            Ok(Command::Delete("x-ray".to_string()))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("   ".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!("insert".parse::<Command>(), Err(CommandError::MissingKey));
        assert_eq!(
            "upsert apple".parse::<Command>(),
            Err(CommandError::UnknownAction("upsert".to_string()))
        );
        assert_eq!(
            "delete apple pie".parse::<Command>(),
            Err(CommandError::TrailingInput("pie".to_string()))
        );
    }

    #[test]
    fn test_display_matches_parse() {
        let command = Command::Delete("kiwi".to_string());
        assert_eq!(command.to_string(), "delete kiwi");
        assert_eq!(command.to_string().parse::<Command>(), Ok(command));
    }

    #[test]
    fn test_key_accessor() {
        assert_eq!(Command::Insert("fig".to_string()).key(), "fig");
        assert_eq!(Command::Delete("date".to_string()).key(), "date");
    }
}
