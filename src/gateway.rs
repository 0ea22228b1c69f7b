//! # Messaging Gateway
//!
//! Outbound side of the assistant: sending texts and photos, attaching
//! keyboards or a forced reply, and acknowledging button presses.

use anyhow::{Context, Result};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{
    CallbackQueryId, FileId, ForceReply, InlineKeyboardButton, InlineKeyboardMarkup, InputFile,
};
use tracing::debug;

/// Inline button with an opaque callback payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardButton {
    pub text: String,
    pub data: String,
}

impl KeyboardButton {
    pub fn new(text: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: data.into(),
        }
    }
}

/// Markup attached to an outbound message
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ReplyMarkup {
    #[default]
    None,
    /// Rows of inline buttons
    InlineKeyboard(Vec<Vec<KeyboardButton>>),
    /// Ask the client to answer this message, showing the placeholder in the input field
    ForceReply(String),
}

impl ReplyMarkup {
    /// All buttons, row by row
    pub fn buttons(&self) -> Vec<&KeyboardButton> {
        match self {
            ReplyMarkup::InlineKeyboard(rows) => rows.iter().flatten().collect(),
            _ => Vec::new(),
        }
    }
}

/// Outbound messaging operations used by the dispatcher
#[async_trait]
pub trait MessagingGateway: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str, markup: ReplyMarkup) -> Result<()>;

    async fn send_photo(
        &self,
        chat_id: i64,
        photo_id: &str,
        caption: &str,
        markup: ReplyMarkup,
    ) -> Result<()>;

    /// Clear the pending indicator of a pressed button
    async fn acknowledge_button_press(&self, press_id: &str) -> Result<()>;
}

/// Gateway talking to the Telegram Bot API
#[derive(Clone)]
pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn inline_keyboard(rows: Vec<Vec<KeyboardButton>>) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(rows.into_iter().map(|row| {
        row.into_iter()
            .map(|button| InlineKeyboardButton::callback(button.text, button.data))
            .collect::<Vec<_>>()
    }))
}

#[async_trait]
impl MessagingGateway for TelegramGateway {
    async fn send_text(&self, chat_id: i64, text: &str, markup: ReplyMarkup) -> Result<()> {
        let request = self.bot.send_message(ChatId(chat_id), text);
        match markup {
            ReplyMarkup::None => request.await,
            ReplyMarkup::InlineKeyboard(rows) => request.reply_markup(inline_keyboard(rows)).await,
            ReplyMarkup::ForceReply(placeholder) => {
                request
                    .reply_markup(ForceReply::new().input_field_placeholder(Some(placeholder)))
                    .await
            }
        }
        .context("Failed to send text message")?;

        debug!(chat_id, "Text message sent");
        Ok(())
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo_id: &str,
        caption: &str,
        markup: ReplyMarkup,
    ) -> Result<()> {
        let request = self
            .bot
            .send_photo(
                ChatId(chat_id),
                InputFile::file_id(FileId(photo_id.to_string())),
            )
            .caption(caption);
        match markup {
            ReplyMarkup::None => request.await,
            ReplyMarkup::InlineKeyboard(rows) => request.reply_markup(inline_keyboard(rows)).await,
            ReplyMarkup::ForceReply(placeholder) => {
                request
                    .reply_markup(ForceReply::new().input_field_placeholder(Some(placeholder)))
                    .await
            }
        }
        .context("Failed to send photo")?;

        debug!(chat_id, "Photo sent");
        Ok(())
    }

    async fn acknowledge_button_press(&self, press_id: &str) -> Result<()> {
        self.bot
            .answer_callback_query(CallbackQueryId(press_id.to_string()))
            .await
            .context("Failed to answer callback query")?;
        Ok(())
    }
}
