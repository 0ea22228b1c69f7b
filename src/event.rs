//! Inbound events consumed by the dispatcher, decoded from Telegram updates.

use teloxide::types::{CallbackQuery, Message, Update, UpdateKind};

use crate::errors::EventError;

/// A plain or command message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub text: Option<String>,
    pub caption: Option<String>,
    /// File identifier of the largest photo size
    pub photo_id: Option<String>,
    /// Text (or caption) of the message this one replies to.
    ///
    /// `Some("")` marks a reply to a message without any text.
    pub reply_to_text: Option<String>,
}

impl IncomingMessage {
    /// Plain text message
    pub fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Photo message with an optional caption
    pub fn photo(chat_id: i64, photo_id: impl Into<String>, caption: Option<&str>) -> Self {
        Self {
            chat_id,
            caption: caption.map(str::to_string),
            photo_id: Some(photo_id.into()),
            ..Self::default()
        }
    }

    /// Mark this message as a reply to a message with the given text
    pub fn replying_to(mut self, text: impl Into<String>) -> Self {
        self.reply_to_text = Some(text.into());
        self
    }

    /// Non-empty text of the message
    pub fn non_empty_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|text| !text.is_empty())
    }

    /// Neither text nor a photo: stickers, voice notes, service messages
    pub fn has_content(&self) -> bool {
        self.non_empty_text().is_some() || self.photo_id.is_some()
    }

    pub fn is_reply(&self) -> bool {
        self.reply_to_text.is_some()
    }
}

/// Press of an inline keyboard button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonPress {
    pub press_id: String,
    pub chat_id: i64,
    pub data: String,
}

/// Everything the dispatcher reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Message(IncomingMessage),
    ButtonPress(ButtonPress),
}

impl InboundEvent {
    pub fn from_message(msg: &Message) -> Self {
        let photo_id = msg
            .photo()
            .and_then(|sizes| sizes.last())
            .map(|size| size.file.id.0.clone());

        let reply_to_text = msg.reply_to_message().map(|replied| {
            replied
                .text()
                .or_else(|| replied.caption())
                .unwrap_or_default()
                .to_string()
        });

        InboundEvent::Message(IncomingMessage {
            chat_id: msg.chat.id.0,
            text: msg.text().map(str::to_string),
            caption: msg.caption().map(str::to_string),
            photo_id,
            reply_to_text,
        })
    }

    pub fn from_callback_query(q: &CallbackQuery) -> Result<Self, EventError> {
        let press_id = q.id.0.clone();
        let data = q
            .data
            .clone()
            .ok_or_else(|| EventError::MissingCallbackData {
                press_id: press_id.clone(),
            })?;

        // Private chats share the user's id, which covers inaccessible messages.
        let chat_id = q
            .message
            .as_ref()
            .map(|msg| msg.chat().id.0)
            .unwrap_or(q.from.id.0 as i64);

        Ok(InboundEvent::ButtonPress(ButtonPress {
            press_id,
            chat_id,
            data,
        }))
    }
}

impl TryFrom<&Update> for InboundEvent {
    type Error = EventError;

    fn try_from(update: &Update) -> Result<Self, Self::Error> {
        match &update.kind {
            UpdateKind::Message(msg) => Ok(Self::from_message(msg)),
            UpdateKind::CallbackQuery(q) => Self::from_callback_query(q),
            other => Err(EventError::UnsupportedUpdate(update_kind_name(other).to_string())),
        }
    }
}

fn update_kind_name(kind: &UpdateKind) -> &'static str {
    match kind {
        UpdateKind::Message(_) => "message",
        UpdateKind::EditedMessage(_) => "edited_message",
        UpdateKind::ChannelPost(_) => "channel_post",
        UpdateKind::EditedChannelPost(_) => "edited_channel_post",
        UpdateKind::InlineQuery(_) => "inline_query",
        UpdateKind::CallbackQuery(_) => "callback_query",
        UpdateKind::Error(_) => "unparsed",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn user() -> serde_json::Value {
        json!({"id": 42, "is_bot": false, "first_name": "Ann"})
    }

    fn chat() -> serde_json::Value {
        json!({"id": 42, "type": "private", "first_name": "Ann"})
    }

    fn decode(value: serde_json::Value) -> Result<InboundEvent, EventError> {
        let update: Update = serde_json::from_str(&value.to_string()).unwrap();
        InboundEvent::try_from(&update)
    }

    #[test]
    fn test_text_message_decoding() {
        let event = decode(json!({
            "update_id": 1,
            "message": {
                "message_id": 10,
                "date": 1700000000,
                "chat": chat(),
                "from": user(),
                "text": "Buy milk"
            }
        }))
        .unwrap();

        assert_eq!(event, InboundEvent::Message(IncomingMessage::text(42, "Buy milk")));
    }

    #[test]
    fn test_photo_message_uses_largest_size() {
        let event = decode(json!({
            "update_id": 2,
            "message": {
                "message_id": 11,
                "date": 1700000000,
                "chat": chat(),
                "from": user(),
                "caption": "Receipt",
                "photo": [
                    {"file_id": "small", "file_unique_id": "s", "width": 90, "height": 90},
                    {"file_id": "large", "file_unique_id": "l", "width": 1280, "height": 1280}
                ]
            }
        }))
        .unwrap();

        assert_eq!(
            event,
            InboundEvent::Message(IncomingMessage::photo(42, "large", Some("Receipt")))
        );
    }

    #[test]
    fn test_reply_carries_replied_text() {
        let event = decode(json!({
            "update_id": 3,
            "message": {
                "message_id": 13,
                "date": 1700000100,
                "chat": chat(),
                "from": user(),
                "text": "Buy oat milk",
                "reply_to_message": {
                    "message_id": 12,
                    "date": 1700000000,
                    "chat": chat(),
                    "from": {"id": 1, "is_bot": true, "first_name": "Notes"},
                    "text": "Prompt\n\nedit_note:abc"
                }
            }
        }))
        .unwrap();

        match event {
            InboundEvent::Message(msg) => {
                assert_eq!(msg.text.as_deref(), Some("Buy oat milk"));
                assert_eq!(msg.reply_to_text.as_deref(), Some("Prompt\n\nedit_note:abc"));
                assert!(msg.is_reply());
            }
            other => panic!("Unexpected event: {other:?}"),
        }
    }

    #[test]
    fn test_callback_query_decoding() {
        let event = decode(json!({
            "update_id": 4,
            "callback_query": {
                "id": "press-1",
                "from": user(),
                "chat_instance": "ci-1",
                "data": "cancel_delete",
                "message": {
                    "message_id": 14,
                    "date": 1700000000,
                    "chat": chat(),
                    "from": {"id": 1, "is_bot": true, "first_name": "Notes"},
                    "text": "Delete?"
                }
            }
        }))
        .unwrap();

        assert_eq!(
            event,
            InboundEvent::ButtonPress(ButtonPress {
                press_id: "press-1".to_string(),
                chat_id: 42,
                data: "cancel_delete".to_string(),
            })
        );
    }

    #[test]
    fn test_callback_without_data_is_rejected() {
        let result = decode(json!({
            "update_id": 5,
            "callback_query": {
                "id": "press-2",
                "from": user(),
                "chat_instance": "ci-1",
                "game_short_name": "snake"
            }
        }));

        assert_eq!(
            result,
            Err(EventError::MissingCallbackData {
                press_id: "press-2".to_string()
            })
        );
    }

    #[test]
    fn test_edited_message_is_unsupported() {
        let result = decode(json!({
            "update_id": 6,
            "edited_message": {
                "message_id": 10,
                "date": 1700000000,
                "edit_date": 1700000050,
                "chat": chat(),
                "from": user(),
                "text": "Buy milk!"
            }
        }));

        assert_eq!(
            result,
            Err(EventError::UnsupportedUpdate("edited_message".to_string()))
        );
    }

    #[test]
    fn test_content_classification() {
        assert!(IncomingMessage::text(1, "hi").has_content());
        assert!(IncomingMessage::photo(1, "f", None).has_content());
        assert!(!IncomingMessage::text(1, "").has_content());
        assert!(!IncomingMessage::default().has_content());
    }
}
