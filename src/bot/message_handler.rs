//! Message Handler module for commands, new notes and edit replies

use tracing::{debug, error, info};

use crate::event::IncomingMessage;
use crate::gateway::ReplyMarkup;
use crate::messages;
use crate::note::{Note, NoteDraft};

use super::command_parser::Command;
use super::dispatcher::BotDeps;
use super::ui_builder::{
    create_delete_confirmation_keyboard, create_edit_prompt, create_note_actions_keyboard,
    format_delete_confirmation, format_notes_list,
};

/// Run a parsed command for `chat_id`
pub async fn handle_command(deps: &BotDeps, chat_id: i64, command: Command) {
    debug!(chat_id, command = command.name(), "Handling command");

    match command {
        Command::Start | Command::Help => {
            deps.send_text(chat_id, messages::HELP, ReplyMarkup::None).await;
        }
        Command::List => handle_list_command(deps, chat_id).await,
        Command::Delete(position) => handle_delete_command(deps, chat_id, position).await,
        Command::Edit(position) => handle_edit_command(deps, chat_id, position).await,
        Command::Show(position) => handle_show_command(deps, chat_id, position).await,
    }
}

async fn handle_list_command(deps: &BotDeps, chat_id: i64) {
    let notes = match deps.repository.list_by_owner(chat_id).await {
        Ok(notes) => notes,
        Err(e) => {
            error!(chat_id, error = %e, "Failed to list notes");
            deps.send_text(chat_id, messages::LIST_FAILED, ReplyMarkup::None)
                .await;
            return;
        }
    };

    deps.send_text(chat_id, &format_notes_list(&notes), ReplyMarkup::None)
        .await;
}

/// Resolve a 1-based position against the current listing.
///
/// Positions shift with every insert and delete, so the listing is fetched
/// fresh. Feedback for failures and out-of-range positions is sent here.
async fn resolve_position(deps: &BotDeps, chat_id: i64, position: i64) -> Option<Note> {
    let notes = match deps.repository.list_by_owner(chat_id).await {
        Ok(notes) => notes,
        Err(e) => {
            error!(chat_id, error = %e, "Failed to list notes while resolving position");
            deps.send_text(chat_id, messages::LIST_FAILED, ReplyMarkup::None)
                .await;
            return None;
        }
    };

    let index = usize::try_from(position)
        .ok()
        .filter(|position| (1..=notes.len()).contains(position));

    match index {
        Some(index) => notes.into_iter().nth(index - 1),
        None => {
            debug!(chat_id, position, count = notes.len(), "Position out of range");
            deps.send_text(chat_id, &messages::no_such_note(position), ReplyMarkup::None)
                .await;
            None
        }
    }
}

async fn handle_delete_command(deps: &BotDeps, chat_id: i64, position: i64) {
    let Some(note) = resolve_position(deps, chat_id, position).await else {
        return;
    };

    deps.send_text(
        chat_id,
        &format_delete_confirmation(&note),
        create_delete_confirmation_keyboard(&note.id),
    )
    .await;

    debug!(chat_id, note_id = %note.id, "Delete confirmation sent");
}

async fn handle_edit_command(deps: &BotDeps, chat_id: i64, position: i64) {
    if let Some(note) = resolve_position(deps, chat_id, position).await {
        send_edit_prompt(deps, chat_id, &note.id).await;
    }
}

async fn handle_show_command(deps: &BotDeps, chat_id: i64, position: i64) {
    let Some(note) = resolve_position(deps, chat_id, position).await else {
        return;
    };

    let keyboard = create_note_actions_keyboard(&note.id);
    match &note.photo_id {
        Some(photo_id) => deps.send_photo(chat_id, photo_id, &note.text, keyboard).await,
        None => deps.send_text(chat_id, &note.text, keyboard).await,
    }
}

/// Ask for the new text of `note_id`, embedding the identifier in the prompt
pub async fn send_edit_prompt(deps: &BotDeps, chat_id: i64, note_id: &str) {
    let (text, markup) = create_edit_prompt(note_id);
    deps.send_text(chat_id, &text, markup).await;

    debug!(chat_id, note_id = %note_id, "Edit prompt sent");
}

/// Store a message as a new note
pub async fn handle_save_note(deps: &BotDeps, msg: &IncomingMessage) {
    let draft = match (&msg.photo_id, msg.non_empty_text()) {
        (Some(photo_id), _) => NoteDraft::photo(msg.chat_id, photo_id.clone(), msg.caption.as_deref()),
        (None, Some(text)) => NoteDraft::text(msg.chat_id, text),
        (None, None) => {
            debug!(chat_id = msg.chat_id, "Nothing to save");
            return;
        }
    };

    match deps.repository.create(draft).await {
        Ok(note_id) => {
            info!(chat_id = msg.chat_id, note_id = %note_id, "Note saved");
            deps.send_text(msg.chat_id, messages::NOTE_SAVED, ReplyMarkup::None)
                .await;
        }
        Err(e) => {
            error!(chat_id = msg.chat_id, error = %e, "Failed to save note");
            deps.send_text(msg.chat_id, messages::NOTE_SAVE_FAILED, ReplyMarkup::None)
                .await;
        }
    }
}

/// Apply the text of a reply to the note named in the replied-to prompt
pub async fn handle_edit_reply(deps: &BotDeps, chat_id: i64, note_id: &str, new_text: &str) {
    match deps.load_owned_note(note_id, chat_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            deps.send_text(chat_id, messages::NOTE_NOT_FOUND, ReplyMarkup::None)
                .await;
            return;
        }
        Err(e) => {
            error!(chat_id, note_id = %note_id, error = %e, "Failed to load note for editing");
            deps.send_text(chat_id, messages::NOTE_UPDATE_FAILED, ReplyMarkup::None)
                .await;
            return;
        }
    }

    let feedback = match deps.repository.update_text(note_id, new_text).await {
        Ok(true) => {
            info!(chat_id, note_id = %note_id, "Note text updated");
            messages::NOTE_UPDATED
        }
        Ok(false) => messages::NOTE_NOT_FOUND,
        Err(e) => {
            error!(chat_id, note_id = %note_id, error = %e, "Failed to update note");
            messages::NOTE_UPDATE_FAILED
        }
    };

    deps.send_text(chat_id, feedback, ReplyMarkup::None).await;
}
