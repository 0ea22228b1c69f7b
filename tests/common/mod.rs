#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use notekeeper::bot::NoteDispatcher;
use notekeeper::db::NoteRepository;
use notekeeper::event::{ButtonPress, InboundEvent, IncomingMessage};
use notekeeper::gateway::{MessagingGateway, ReplyMarkup};
use notekeeper::memory_store::InMemoryNoteRepository;
use notekeeper::note::{Note, NoteDraft};

/// Everything the dispatcher asked the gateway to do
#[derive(Debug, Clone, PartialEq)]
pub enum Sent {
    Text {
        chat_id: i64,
        text: String,
        markup: ReplyMarkup,
    },
    Photo {
        chat_id: i64,
        photo_id: String,
        caption: String,
        markup: ReplyMarkup,
    },
    Ack {
        press_id: String,
    },
}

impl Sent {
    pub fn text(&self) -> Option<&str> {
        match self {
            Sent::Text { text, .. } => Some(text),
            Sent::Photo { caption, .. } => Some(caption),
            Sent::Ack { .. } => None,
        }
    }

    pub fn markup(&self) -> Option<&ReplyMarkup> {
        match self {
            Sent::Text { markup, .. } | Sent::Photo { markup, .. } => Some(markup),
            Sent::Ack { .. } => None,
        }
    }

    /// Payloads of all inline buttons attached to this message
    pub fn payloads(&self) -> Vec<String> {
        self.markup()
            .map(|markup| markup.buttons().iter().map(|b| b.data.clone()).collect())
            .unwrap_or_default()
    }
}

/// Gateway recording every call; optionally failing every send after recording it
#[derive(Debug, Default)]
pub struct RecordingGateway {
    sent: Mutex<Vec<Sent>>,
    fail_sends: AtomicBool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail_sends.store(failing, Ordering::SeqCst);
    }

    /// Drain the recorded calls
    pub fn take(&self) -> Vec<Sent> {
        std::mem::take(&mut *self.sent.lock().unwrap())
    }

    fn record(&self, sent: Sent) -> Result<()> {
        self.sent.lock().unwrap().push(sent);
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(anyhow!("telegram unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl MessagingGateway for RecordingGateway {
    async fn send_text(&self, chat_id: i64, text: &str, markup: ReplyMarkup) -> Result<()> {
        self.record(Sent::Text {
            chat_id,
            text: text.to_string(),
            markup,
        })
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo_id: &str,
        caption: &str,
        markup: ReplyMarkup,
    ) -> Result<()> {
        self.record(Sent::Photo {
            chat_id,
            photo_id: photo_id.to_string(),
            caption: caption.to_string(),
            markup,
        })
    }

    async fn acknowledge_button_press(&self, press_id: &str) -> Result<()> {
        self.record(Sent::Ack {
            press_id: press_id.to_string(),
        })
    }
}

/// In-memory repository with switchable storage failures
#[derive(Debug, Default)]
pub struct FaultyRepository {
    pub inner: InMemoryNoteRepository,
    pub fail_create: AtomicBool,
    pub fail_list: AtomicBool,
    pub fail_get: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_delete: AtomicBool,
}

impl FaultyRepository {
    fn check(flag: &AtomicBool, operation: &str) -> Result<()> {
        if flag.load(Ordering::SeqCst) {
            return Err(anyhow!("storage offline during {operation}"));
        }
        Ok(())
    }
}

#[async_trait]
impl NoteRepository for FaultyRepository {
    async fn create(&self, draft: NoteDraft) -> Result<String> {
        Self::check(&self.fail_create, "create")?;
        self.inner.create(draft).await
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Note>> {
        Self::check(&self.fail_list, "list")?;
        self.inner.list_by_owner(owner_id).await
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Note>> {
        Self::check(&self.fail_get, "get")?;
        self.inner.get_by_id(id).await
    }

    async fn update_text(&self, id: &str, new_text: &str) -> Result<bool> {
        Self::check(&self.fail_update, "update")?;
        self.inner.update_text(id, new_text).await
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        Self::check(&self.fail_delete, "delete")?;
        self.inner.delete_by_id(id).await
    }
}

/// Dispatcher wired to a recording gateway and a faulty in-memory repository
pub struct Harness {
    pub repo: Arc<FaultyRepository>,
    pub gateway: Arc<RecordingGateway>,
    pub dispatcher: NoteDispatcher,
    presses: AtomicUsize,
}

impl Harness {
    pub fn new() -> Self {
        let repo = Arc::new(FaultyRepository::default());
        let gateway = Arc::new(RecordingGateway::new());
        let dispatcher = NoteDispatcher::new(repo.clone(), gateway.clone());
        Self {
            repo,
            gateway,
            dispatcher,
            presses: AtomicUsize::new(0),
        }
    }

    pub async fn message(&self, msg: IncomingMessage) -> Vec<Sent> {
        self.dispatcher.handle(InboundEvent::Message(msg)).await;
        self.gateway.take()
    }

    pub async fn send(&self, chat_id: i64, text: &str) -> Vec<Sent> {
        self.message(IncomingMessage::text(chat_id, text)).await
    }

    pub async fn reply(&self, chat_id: i64, text: &str, replied_text: &str) -> Vec<Sent> {
        self.message(IncomingMessage::text(chat_id, text).replying_to(replied_text))
            .await
    }

    /// Press a button carrying `data`; returns the calls, the press id first when acknowledged
    pub async fn press(&self, chat_id: i64, data: &str) -> Vec<Sent> {
        let n = self.presses.fetch_add(1, Ordering::SeqCst);
        let press = ButtonPress {
            press_id: format!("press-{n}"),
            chat_id,
            data: data.to_string(),
        };
        self.dispatcher.handle(InboundEvent::ButtonPress(press)).await;
        self.gateway.take()
    }

    pub async fn notes(&self, owner_id: i64) -> Vec<Note> {
        self.repo.inner.list_by_owner(owner_id).await.unwrap()
    }

    pub async fn texts(&self, owner_id: i64) -> Vec<String> {
        self.notes(owner_id)
            .await
            .into_iter()
            .map(|note| note.text)
            .collect()
    }
}

/// The single text message among the recorded calls
pub fn only_text(sent: &[Sent]) -> &str {
    let texts: Vec<&str> = sent
        .iter()
        .filter(|s| matches!(s, Sent::Text { .. }))
        .filter_map(Sent::text)
        .collect();
    assert_eq!(texts.len(), 1, "expected exactly one text message, got {sent:?}");
    texts[0]
}
