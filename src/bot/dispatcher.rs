//! Dispatcher module: classifies inbound events and routes them to handlers

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, error, warn};

use crate::db::NoteRepository;
use crate::dialogue::{state_from_prompt, NoteDialogueState};
use crate::errors::CommandError;
use crate::event::{InboundEvent, IncomingMessage};
use crate::gateway::{MessagingGateway, ReplyMarkup};
use crate::messages;
use crate::note::Note;

use super::callback_handler::handle_button_press;
use super::command_parser::{parse_command, Command};
use super::message_handler::{handle_command, handle_edit_reply, handle_save_note};

/// Long-lived clients shared by every handler
#[derive(Clone)]
pub struct BotDeps {
    pub repository: Arc<dyn NoteRepository>,
    pub gateway: Arc<dyn MessagingGateway>,
}

impl BotDeps {
    /// Send a text; failures are logged and otherwise swallowed
    pub async fn send_text(&self, chat_id: i64, text: &str, markup: ReplyMarkup) {
        if let Err(e) = self.gateway.send_text(chat_id, text, markup).await {
            error!(chat_id, error = %e, "Failed to send message");
        }
    }

    /// Send a photo; failures are logged and otherwise swallowed
    pub async fn send_photo(&self, chat_id: i64, photo_id: &str, caption: &str, markup: ReplyMarkup) {
        if let Err(e) = self.gateway.send_photo(chat_id, photo_id, caption, markup).await {
            error!(chat_id, error = %e, "Failed to send photo");
        }
    }

    /// Fetch a note only if it belongs to `owner_id`.
    ///
    /// A note of another chat is reported as missing.
    pub async fn load_owned_note(&self, note_id: &str, owner_id: i64) -> Result<Option<Note>> {
        let note = self.repository.get_by_id(note_id).await?;
        match note {
            Some(note) if note.owner_id == owner_id => Ok(Some(note)),
            Some(_) => {
                warn!(chat_id = owner_id, note_id = %note_id, "Note belongs to another chat");
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

/// What an inbound message asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageRoute {
    /// No text and no photo
    Ignore,
    /// Reply to an edit prompt
    EditReply { note_id: String, new_text: String },
    Command(Result<Command, CommandError>),
    SaveNote,
}

/// Classify a message; first match wins.
///
/// Any reply goes through the reply router. A reply to something other than an
/// edit prompt becomes a new note, even when it looks like a command.
pub fn classify_message(msg: &IncomingMessage) -> MessageRoute {
    if !msg.has_content() {
        return MessageRoute::Ignore;
    }

    if msg.is_reply() {
        return route_reply(msg);
    }

    if let Some(parsed) = msg.non_empty_text().and_then(parse_command) {
        return MessageRoute::Command(parsed);
    }

    MessageRoute::SaveNote
}

/// Reply router: the replied-to text decides whether an edit is pending
fn route_reply(msg: &IncomingMessage) -> MessageRoute {
    let replied_text = msg.reply_to_text.as_deref().unwrap_or_default();

    match (state_from_prompt(replied_text), msg.non_empty_text()) {
        (NoteDialogueState::AwaitingNewText { note_id }, Some(new_text)) => MessageRoute::EditReply {
            note_id,
            new_text: new_text.to_string(),
        },
        (NoteDialogueState::AwaitingNewText { note_id }, None) => {
            debug!(chat_id = msg.chat_id, note_id = %note_id, "Edit reply without text, saving as a new note");
            MessageRoute::SaveNote
        }
        (NoteDialogueState::Idle, _) => {
            debug!(chat_id = msg.chat_id, "Reply without edit marker, saving as a new note");
            MessageRoute::SaveNote
        }
    }
}

/// Entry point for inbound events
#[derive(Clone)]
pub struct NoteDispatcher {
    deps: BotDeps,
}

impl NoteDispatcher {
    pub fn new(repository: Arc<dyn NoteRepository>, gateway: Arc<dyn MessagingGateway>) -> Self {
        Self {
            deps: BotDeps {
                repository,
                gateway,
            },
        }
    }

    /// Handle one inbound event to completion.
    ///
    /// User-facing failures are reported through the gateway, so nothing is
    /// returned to the transport.
    pub async fn handle(&self, event: InboundEvent) {
        match event {
            InboundEvent::ButtonPress(press) => handle_button_press(&self.deps, &press).await,
            InboundEvent::Message(msg) => {
                let route = classify_message(&msg);
                debug!(chat_id = msg.chat_id, route = ?route, "Classified message");

                match route {
                    MessageRoute::Ignore => {
                        debug!(chat_id = msg.chat_id, "Ignoring message without text or photo");
                    }
                    MessageRoute::EditReply { note_id, new_text } => {
                        handle_edit_reply(&self.deps, msg.chat_id, &note_id, &new_text).await
                    }
                    MessageRoute::Command(Ok(command)) => {
                        handle_command(&self.deps, msg.chat_id, command).await
                    }
                    MessageRoute::Command(Err(e)) => {
                        debug!(chat_id = msg.chat_id, error = %e, "Malformed command");
                        self.deps
                            .send_text(msg.chat_id, &messages::usage_hint(e.command()), ReplyMarkup::None)
                            .await;
                    }
                    MessageRoute::SaveNote => handle_save_note(&self.deps, &msg).await,
                }
            }
        }
    }
}
