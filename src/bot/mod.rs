//! Bot module for handling inbound Telegram events
//!
//! This module is split into several submodules:
//! - `dispatcher`: Classifies each event and routes it to a handler
//! - `command_parser`: Recognizes slash commands and their arguments
//! - `message_handler`: Runs commands, saves notes and applies edit replies
//! - `callback_handler`: Handles inline keyboard callback queries
//! - `ui_builder`: Creates keyboards and formats messages

pub mod callback_handler;
pub mod command_parser;
pub mod dispatcher;
pub mod message_handler;
pub mod ui_builder;

pub use command_parser::{parse_command, Command};
pub use dispatcher::{classify_message, BotDeps, MessageRoute, NoteDispatcher};
