//! UI Builder module for creating keyboards and formatting messages

use crate::dialogue::{encode_edit_prompt, CallbackAction};
use crate::gateway::{KeyboardButton, ReplyMarkup};
use crate::messages;
use crate::note::Note;

/// Numbered listing of notes in the given order, photo notes marked.
///
/// An empty slice renders the "no notes yet" message.
pub fn format_notes_list(notes: &[Note]) -> String {
    if notes.is_empty() {
        return messages::NO_NOTES.to_string();
    }

    let mut result = String::from(messages::LIST_HEADER);
    result.push('\n');

    for (i, note) in notes.iter().enumerate() {
        let line = if note.is_photo() {
            format!("{}. {} {}\n", i + 1, messages::PHOTO_MARKER, note.text)
        } else {
            format!("{}. {}\n", i + 1, note.text)
        };
        result.push_str(&line);
    }

    result
}

/// Short quote of a note for confirmation prompts
fn note_preview(note: &Note) -> String {
    if note.is_photo() {
        format!("{} {}", messages::PHOTO_MARKER, note.text)
    } else {
        note.text.clone()
    }
}

/// Question asked before deleting a note
pub fn format_delete_confirmation(note: &Note) -> String {
    format!("{}\n\n{}", messages::DELETE_CONFIRM_PROMPT, note_preview(note))
}

/// Confirm / cancel buttons; only the confirm button names the note
pub fn create_delete_confirmation_keyboard(note_id: &str) -> ReplyMarkup {
    ReplyMarkup::InlineKeyboard(vec![vec![
        KeyboardButton::new(
            messages::BUTTON_CONFIRM_DELETE,
            CallbackAction::DeleteNote(note_id.to_string()).payload(),
        ),
        KeyboardButton::new(messages::BUTTON_CANCEL, CallbackAction::CancelDelete.payload()),
    ]])
}

/// Edit / delete buttons shown under a single note
pub fn create_note_actions_keyboard(note_id: &str) -> ReplyMarkup {
    ReplyMarkup::InlineKeyboard(vec![vec![
        KeyboardButton::new(
            messages::BUTTON_EDIT,
            CallbackAction::EditNote(note_id.to_string()).payload(),
        ),
        KeyboardButton::new(
            messages::BUTTON_DELETE,
            CallbackAction::DeleteNote(note_id.to_string()).payload(),
        ),
    ]])
}

/// Text and markup of the "send me the new text" prompt
pub fn create_edit_prompt(note_id: &str) -> (String, ReplyMarkup) {
    (
        encode_edit_prompt(note_id),
        ReplyMarkup::ForceReply(messages::EDIT_PLACEHOLDER.to_string()),
    )
}
