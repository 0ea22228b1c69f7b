use std::sync::Arc;

use anyhow::{Context, Result};
use teloxide::prelude::*;
use teloxide::update_listeners::webhooks;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use notekeeper::bot::NoteDispatcher;
use notekeeper::config::{Config, LogFormat};
use notekeeper::db::{NoteRepository, PgNoteRepository};
use notekeeper::event::InboundEvent;
use notekeeper::gateway::TelegramGateway;
use notekeeper::memory_store::InMemoryNoteRepository;

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.log_format);

    info!("Starting Notes Telegram Bot");

    let repository: Arc<dyn NoteRepository> = match &config.database_url {
        Some(database_url) => {
            info!("Connecting to database");
            Arc::new(PgNoteRepository::connect(database_url).await?)
        }
        None => {
            warn!("DATABASE_URL not set, notes are kept in memory and lost on restart");
            Arc::new(InMemoryNoteRepository::new())
        }
    };

    let bot = Bot::new(config.telegram_token.clone());
    let gateway = Arc::new(TelegramGateway::new(bot.clone()));
    let note_dispatcher = Arc::new(NoteDispatcher::new(repository, gateway));

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint({
            let note_dispatcher = Arc::clone(&note_dispatcher);
            move |msg: Message| {
                let note_dispatcher = Arc::clone(&note_dispatcher);
                async move {
                    note_dispatcher.handle(InboundEvent::from_message(&msg)).await;
                    Ok::<(), anyhow::Error>(())
                }
            }
        }))
        .branch(Update::filter_callback_query().endpoint({
            let note_dispatcher = Arc::clone(&note_dispatcher);
            move |q: CallbackQuery| {
                let note_dispatcher = Arc::clone(&note_dispatcher);
                async move {
                    match InboundEvent::from_callback_query(&q) {
                        Ok(event) => note_dispatcher.handle(event).await,
                        Err(e) => warn!(error = %e, "Dropping undecodable callback query"),
                    }
                    Ok::<(), anyhow::Error>(())
                }
            }
        }));

    let mut dispatcher = Dispatcher::builder(bot.clone(), handler)
        .default_handler(|update| async move {
            match InboundEvent::try_from(update.as_ref()) {
                Err(e) => debug!(error = %e, "Ignoring update"),
                Ok(_) => debug!("Update fell through the handler tree"),
            }
        })
        .enable_ctrlc_handler()
        .build();

    match config.webhook_url.clone() {
        Some(url) => {
            info!(url = %url, addr = %config.bind_addr, "Starting in webhook mode");
            let listener = webhooks::axum(bot, webhooks::Options::new(config.bind_addr, url))
                .await
                .context("Failed to set up webhook listener")?;

            dispatcher
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await;
        }
        None => {
            info!("Starting in long polling mode");
            dispatcher.dispatch().await;
        }
    }

    Ok(())
}
