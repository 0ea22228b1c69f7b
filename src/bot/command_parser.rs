//! Command Parser module for classifying slash commands

use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::CommandError;

/// Recognized commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    List,
    /// Position is 1-based and not yet range-checked
    Delete(i64),
    Edit(i64),
    Show(i64),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::List => "list",
            Command::Delete(_) => "delete",
            Command::Edit(_) => "edit",
            Command::Show(_) => "show",
        }
    }
}

// `/name`, optional `@botname`, then arguments after whitespace
lazy_static! {
    static ref COMMAND_REGEX: Regex = Regex::new(r"(?s)^/([A-Za-z_]+)(?:@\w+)?(?:\s+(.*))?$")
        .expect("Command pattern should be valid");
}

/// Classify message text.
///
/// Returns `None` when the text is not one of the recognized commands (it is
/// then saved as a note), `Some(Err(_))` when a recognized command has a
/// missing or non-numeric argument.
pub fn parse_command(text: &str) -> Option<Result<Command, CommandError>> {
    let captures = COMMAND_REGEX.captures(text.trim())?;
    let name = captures.get(1)?.as_str().to_lowercase();
    let args = captures.get(2).map(|m| m.as_str().trim()).unwrap_or("");

    let command = match name.as_str() {
        "start" => Ok(Command::Start),
        "help" => Ok(Command::Help),
        "list" => Ok(Command::List),
        "delete" => parse_position("delete", args).map(Command::Delete),
        "edit" => parse_position("edit", args).map(Command::Edit),
        "show" => parse_position("show", args).map(Command::Show),
        _ => return None,
    };

    Some(command)
}

fn parse_position(command: &'static str, args: &str) -> Result<i64, CommandError> {
    if args.is_empty() {
        return Err(CommandError::MissingArgument { command });
    }

    args.parse::<i64>()
        .map_err(|_| CommandError::InvalidArgument {
            command,
            argument: args.to_string(),
        })
}
