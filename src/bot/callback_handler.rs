//! Callback Handler module for processing inline keyboard callback queries

use tracing::{debug, error, info};

use crate::dialogue::CallbackAction;
use crate::event::ButtonPress;
use crate::gateway::ReplyMarkup;
use crate::messages;

use super::dispatcher::BotDeps;
use super::message_handler::send_edit_prompt;

/// Handle a button press.
///
/// The press is always acknowledged first so the client stops showing the
/// loading state, whatever the payload turns out to be.
pub async fn handle_button_press(deps: &BotDeps, press: &ButtonPress) {
    let chat_id = press.chat_id;
    debug!(chat_id, data = %press.data, "Received callback query");

    if let Err(e) = deps.gateway.acknowledge_button_press(&press.press_id).await {
        error!(chat_id, press_id = %press.press_id, error = %e, "Failed to answer callback query");
    }

    match CallbackAction::parse(&press.data) {
        CallbackAction::CancelDelete => {
            deps.send_text(chat_id, messages::DELETE_CANCELLED, ReplyMarkup::None)
                .await;
        }
        CallbackAction::DeleteNote(note_id) => delete_note(deps, chat_id, &note_id).await,
        CallbackAction::EditNote(note_id) => edit_note(deps, chat_id, &note_id).await,
        CallbackAction::Unknown(data) => {
            debug!(chat_id, data = %data, "Ignoring unknown callback payload");
        }
    }
}

async fn delete_note(deps: &BotDeps, chat_id: i64, note_id: &str) {
    match deps.load_owned_note(note_id, chat_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            deps.send_text(chat_id, messages::NOTE_NOT_FOUND, ReplyMarkup::None)
                .await;
            return;
        }
        Err(e) => {
            error!(chat_id, note_id = %note_id, error = %e, "Failed to load note for deletion");
            deps.send_text(chat_id, messages::NOTE_DELETE_FAILED, ReplyMarkup::None)
                .await;
            return;
        }
    }

    let feedback = match deps.repository.delete_by_id(note_id).await {
        Ok(true) => {
            info!(chat_id, note_id = %note_id, "Note deleted on confirmation");
            messages::NOTE_DELETED
        }
        // Lost a race with another delete
        Ok(false) => messages::NOTE_NOT_FOUND,
        Err(e) => {
            error!(chat_id, note_id = %note_id, error = %e, "Failed to delete note");
            messages::NOTE_DELETE_FAILED
        }
    };

    deps.send_text(chat_id, feedback, ReplyMarkup::None).await;
}

async fn edit_note(deps: &BotDeps, chat_id: i64, note_id: &str) {
    match deps.load_owned_note(note_id, chat_id).await {
        Ok(Some(note)) => send_edit_prompt(deps, chat_id, &note.id).await,
        Ok(None) => {
            deps.send_text(chat_id, messages::NOTE_NOT_FOUND, ReplyMarkup::None)
                .await;
        }
        Err(e) => {
            error!(chat_id, note_id = %note_id, error = %e, "Failed to load note for editing");
            deps.send_text(chat_id, messages::NOTE_UPDATE_FAILED, ReplyMarkup::None)
                .await;
        }
    }
}
