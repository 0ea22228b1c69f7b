//! # Notes Telegram Bot
//!
//! A Telegram bot that keeps personal notes: text or photos sent to it are
//! stored and can be listed, shown, edited and deleted through numbered
//! commands and inline buttons.

pub mod bot;
pub mod config;
pub mod db;
pub mod dialogue;
pub mod errors;
pub mod event;
pub mod gateway;
pub mod memory_store;
pub mod messages;
pub mod note;
