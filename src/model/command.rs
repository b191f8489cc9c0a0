use std::{fmt::Display, str::FromStr};

use thiserror::Error;

use super::UserId;

/// The commands accepted by the interactive shell, one per line.
pub const SHELL_HELP: &str = "\
Commands:
  list | refresh | ls      reload the user list
  edit <id>                edit a listed user
  id <value>               set the id input (create mode only)
  name <value...>          set the name input
  submit | save            add or update the user in the form
  cancel | reset           clear the form and go back to create mode
  delete <id> | rm <id>    delete a user
  form                     show the form
  status                   show the current message
  help                     show this help
  quit | exit              leave the shell";

/// Shell command parsing error
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    /// The command is not known
    #[error("Unknown command: {0} (type 'help' for the list of commands)")]
    Unknown(String),
    /// A required argument is missing
    #[error("Missing argument for '{0}'")]
    MissingArgument(&'static str),
    /// A user id argument is not an integer
    #[error("Invalid user id: {0}")]
    InvalidId(String),
}

/// A command read by the interactive shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Refresh,
    Edit(UserId),
    InputId(String),
    InputName(String),
    Submit,
    Cancel,
    Delete(UserId),
    ShowForm,
    Status,
    Help,
    Quit,
    /// A blank line.
    Nothing,
}

fn parse_id(command: &'static str, argument: &str) -> Result<UserId, CommandError> {
    if argument.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }

    argument
        .parse()
        .map_err(|_| CommandError::InvalidId(argument.to_string()))
}

impl FromStr for ShellCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, argument) = line
            .split_once(char::is_whitespace)
            .map(|(keyword, argument)| (keyword, argument.trim()))
            .unwrap_or((line, ""));

        match keyword.to_lowercase().as_str() {
            "" => Ok(Self::Nothing),
            "list" | "refresh" | "ls" => Ok(Self::Refresh),
            "edit" => parse_id("edit", argument).map(Self::Edit),
            "id" => Ok(Self::InputId(argument.to_string())),
            "name" => Ok(Self::InputName(argument.to_string())),
            "submit" | "save" => Ok(Self::Submit),
            "cancel" | "reset" => Ok(Self::Cancel),
            "delete" | "rm" => parse_id("delete", argument).map(Self::Delete),
            "form" => Ok(Self::ShowForm),
            "status" => Ok(Self::Status),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            _ => Err(CommandError::Unknown(keyword.to_string())),
        }
    }
}

impl Display for ShellCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Refresh => write!(f, "refresh"),
            Self::Edit(id) => write!(f, "edit {id}"),
            Self::InputId(value) => write!(f, "id {value}"),
            Self::InputName(value) => write!(f, "name {value}"),
            Self::Submit => write!(f, "submit"),
            Self::Cancel => write!(f, "cancel"),
            Self::Delete(id) => write!(f, "delete {id}"),
            Self::ShowForm => write!(f, "form"),
            Self::Status => write!(f, "status"),
            Self::Help => write!(f, "help"),
            Self::Quit => write!(f, "quit"),
            Self::Nothing => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!(Ok(ShellCommand::Refresh), "ls".parse());
        assert_eq!(Ok(ShellCommand::Refresh), "REFRESH".parse());
        assert_eq!(Ok(ShellCommand::Submit), "save".parse());
        assert_eq!(Ok(ShellCommand::Cancel), "reset".parse());
        assert_eq!(Ok(ShellCommand::Quit), " exit ".parse());
        assert_eq!(Ok(ShellCommand::Nothing), "   ".parse());
    }

    #[test]
    fn name_keeps_the_rest_of_the_line() {
        assert_eq!(
            Ok(ShellCommand::InputName("Grace  Hopper".to_string())),
            "name   Grace  Hopper ".parse()
        );
    }

    #[test]
    fn id_input_is_kept_raw() {
        assert_eq!(Ok(ShellCommand::InputId("abc".to_string())), "id abc".parse());
        assert_eq!(Ok(ShellCommand::InputId(String::new())), "id".parse());
    }

    #[test]
    fn edit_and_delete_require_an_integer_id() {
        assert_eq!(Ok(ShellCommand::Edit(UserId(4))), "edit 4".parse());
        assert_eq!(Ok(ShellCommand::Delete(UserId(9))), "rm 9".parse());
        assert_eq!(
            Err(CommandError::MissingArgument("delete")),
            "delete".parse::<ShellCommand>()
        );
        assert_eq!(
            Err(CommandError::InvalidId("four".to_string())),
            "edit four".parse::<ShellCommand>()
        );
    }

    #[test]
    fn unknown_command_is_rejected() {
        assert_eq!(
            Err(CommandError::Unknown("frobnicate".to_string())),
            "frobnicate now".parse::<ShellCommand>()
        );
    }
}
