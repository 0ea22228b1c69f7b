//! Conversation state carried through the messages themselves.
//!
//! The assistant keeps no session store. A pending edit lives in the text of
//! the prompt the user replies to (a final line `edit_note:<id>`), a pending
//! delete lives in the payloads of the confirmation buttons. Both grammars must
//! stay byte-for-byte stable: prompts sent by older builds are still answered.

use crate::messages;

/// Marker line closing edit prompts, also the edit button prefix
pub const EDIT_MARKER: &str = "edit_note:";
/// Payload prefix of buttons that delete a note
pub const DELETE_PREFIX: &str = "delete_note:";
/// Payload of the button that aborts a deletion
pub const CANCEL_DELETE: &str = "cancel_delete";

/// State a reply puts the conversation in, reconstructed from the replied-to text
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum NoteDialogueState {
    #[default]
    Idle,
    AwaitingNewText { note_id: String },
}

/// Action requested by a button payload
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallbackAction {
    CancelDelete,
    DeleteNote(String),
    EditNote(String),
    Unknown(String),
}

impl CallbackAction {
    /// Decode a button payload; prefixes with an empty identifier are unknown
    pub fn parse(data: &str) -> Self {
        if data == CANCEL_DELETE {
            return CallbackAction::CancelDelete;
        }
        if let Some(id) = data.strip_prefix(DELETE_PREFIX).filter(|id| !id.is_empty()) {
            return CallbackAction::DeleteNote(id.to_string());
        }
        if let Some(id) = data.strip_prefix(EDIT_MARKER).filter(|id| !id.is_empty()) {
            return CallbackAction::EditNote(id.to_string());
        }
        CallbackAction::Unknown(data.to_string())
    }

    /// Payload carried by the button
    pub fn payload(&self) -> String {
        match self {
            CallbackAction::CancelDelete => CANCEL_DELETE.to_string(),
            CallbackAction::DeleteNote(id) => delete_payload(id),
            CallbackAction::EditNote(id) => edit_payload(id),
            CallbackAction::Unknown(data) => data.clone(),
        }
    }
}

pub fn delete_payload(note_id: &str) -> String {
    format!("{DELETE_PREFIX}{note_id}")
}

pub fn edit_payload(note_id: &str) -> String {
    format!("{EDIT_MARKER}{note_id}")
}

/// Edit prompt text: the fixed instructions, then the marker as the last line
pub fn encode_edit_prompt(note_id: &str) -> String {
    format!("{}\n\n{EDIT_MARKER}{note_id}", messages::EDIT_PROMPT)
}

/// Recover the note identifier from the text of a replied-to edit prompt.
///
/// Only a text opening with the edit instructions counts, and only its last
/// line is read; a marker quoted inside an echoed note is ignored.
pub fn decode_edit_marker(prompt_text: &str) -> Option<String> {
    if !prompt_text.starts_with(messages::EDIT_PROMPT) {
        return None;
    }

    prompt_text
        .lines()
        .last()?
        .trim()
        .strip_prefix(EDIT_MARKER)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
}

/// State implied by the text a message replies to
pub fn state_from_prompt(prompt_text: &str) -> NoteDialogueState {
    match decode_edit_marker(prompt_text) {
        Some(note_id) => NoteDialogueState::AwaitingNewText { note_id },
        None => NoteDialogueState::Idle,
    }
}
