//! # Error Types Module
//!
//! Domain errors raised while decoding inbound updates and parsing commands.
//! Storage and transport failures travel as `anyhow::Error`.

/// Malformed command arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command needs a note number and none was given
    MissingArgument { command: &'static str },
    /// The argument is not an integer
    InvalidArgument {
        command: &'static str,
        argument: String,
    },
}

impl CommandError {
    /// Name of the command the error belongs to, without the leading slash
    pub fn command(&self) -> &'static str {
        match self {
            CommandError::MissingArgument { command } => command,
            CommandError::InvalidArgument { command, .. } => command,
        }
    }
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::MissingArgument { command } => {
                write!(f, "/{command}: missing note number")
            }
            CommandError::InvalidArgument { command, argument } => {
                write!(f, "/{command}: invalid note number '{argument}'")
            }
        }
    }
}

impl std::error::Error for CommandError {}

/// Inbound update that cannot be turned into an event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventError {
    /// Update kind the assistant does not handle
    UnsupportedUpdate(String),
    /// Button press without a payload
    MissingCallbackData { press_id: String },
}

impl std::fmt::Display for EventError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventError::UnsupportedUpdate(kind) => write!(f, "Unsupported update: {kind}"),
            EventError::MissingCallbackData { press_id } => {
                write!(f, "Callback query {press_id} carries no data")
            }
        }
    }
}

impl std::error::Error for EventError {}
