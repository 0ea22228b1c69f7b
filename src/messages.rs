//! Fixed user-facing texts.
//!
//! The assistant speaks Russian only; texts that take arguments are functions.

pub const NOTE_SAVED: &str = "Заметка сохранена! 👍";
pub const NOTE_SAVE_FAILED: &str = "Не удалось сохранить заметку. 😔";
pub const NOTE_UPDATED: &str = "Заметка обновлена! ✏️";
pub const NOTE_UPDATE_FAILED: &str = "Не удалось обновить заметку. 😔";
pub const NOTE_DELETED: &str = "Заметка удалена. 🗑️";
pub const NOTE_DELETE_FAILED: &str = "Не удалось удалить заметку. 😔";
pub const NOTE_NOT_FOUND: &str = "Заметка не найдена. Возможно, она уже удалена.";
pub const DELETE_CANCELLED: &str = "Удаление отменено.";
pub const LIST_FAILED: &str = "Не удалось получить заметки :(";
pub const NO_NOTES: &str = "У тебя пока нет заметок.";
pub const LIST_HEADER: &str = "Твои последние заметки:";

pub const DELETE_CONFIRM_PROMPT: &str = "🗑️ Удалить эту заметку?";
pub const EDIT_PROMPT: &str = "✏️ Пришли новый текст заметки ответом на это сообщение.";
pub const EDIT_PLACEHOLDER: &str = "Новый текст заметки";

pub const BUTTON_CONFIRM_DELETE: &str = "✅ Да, удалить";
pub const BUTTON_CANCEL: &str = "❌ Отмена";
pub const BUTTON_EDIT: &str = "✏️ Изменить";
pub const BUTTON_DELETE: &str = "🗑️ Удалить";

pub const PHOTO_MARKER: &str = "📷";

pub const HELP: &str = "👋 Я сохраняю твои заметки.\n\n\
Просто пришли текст или фото, и я его запомню.\n\n\
Команды:\n\
/list - показать все заметки\n\
/show N - показать заметку номер N\n\
/edit N - изменить заметку номер N\n\
/delete N - удалить заметку номер N";

/// Usage hint for a command whose note number is missing or malformed
pub fn usage_hint(command: &str) -> String {
    format!("Укажи номер заметки, например: /{command} 1")
}

/// Feedback for a position outside the current listing
pub fn no_such_note(position: i64) -> String {
    format!("Заметки с номером {position} нет. Посмотри список: /list")
}
