//! # Configuration Module
//!
//! Process configuration read from environment variables (after `.env`).

use std::net::SocketAddr;

use anyhow::{anyhow, bail, Context, Result};
use url::Url;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(anyhow!("unknown LOG_FORMAT '{other}' (expected 'text' or 'json')")),
        }
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Bot API token
    pub telegram_token: String,
    /// PostgreSQL connection string; notes are kept in memory when absent
    pub database_url: Option<String>,
    /// Public URL Telegram posts updates to; long polling when absent
    pub webhook_url: Option<Url>,
    /// Address the webhook server listens on
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let Some(telegram_token) = get("TELEGRAM_BOT_TOKEN") else {
            bail!("TELEGRAM_BOT_TOKEN must be set");
        };

        let webhook_url = get("WEBHOOK_URL")
            .map(|raw| Url::parse(raw.trim()).with_context(|| format!("Invalid WEBHOOK_URL '{raw}'")))
            .transpose()?;

        let bind_addr = match (get("BIND_ADDR"), get("PORT")) {
            (Some(addr), _) => addr
                .trim()
                .parse::<SocketAddr>()
                .with_context(|| format!("Invalid BIND_ADDR '{addr}'"))?,
            (None, Some(port)) => {
                let port: u16 = port
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid PORT '{port}'"))?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
            (None, None) => DEFAULT_BIND_ADDR
                .parse::<SocketAddr>()
                .context("Invalid default bind address")?,
        };

        let log_format = get("LOG_FORMAT")
            .map(|raw| raw.parse::<LogFormat>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            telegram_token,
            database_url: get("DATABASE_URL"),
            webhook_url,
            bind_addr,
            log_format,
        })
    }
}
