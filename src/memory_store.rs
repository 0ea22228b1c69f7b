//! In-process note repository.
//!
//! Used by the test suite and when no database is configured. Contents are
//! lost when the process exits.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::db::{new_note_id, NoteRepository};
use crate::note::{Note, NoteDraft};

#[derive(Debug, Default)]
struct Inner {
    notes: HashMap<String, (u64, Note)>,
    next_seq: u64,
}

/// Repository keeping notes in memory
#[derive(Debug, Default)]
pub struct InMemoryNoteRepository {
    inner: RwLock<Inner>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored notes across all owners
    pub async fn len(&self) -> usize {
        self.inner.read().await.notes.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn create(&self, draft: NoteDraft) -> Result<String> {
        let id = new_note_id();
        let mut inner = self.inner.write().await;
        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner
            .notes
            .insert(id.clone(), (seq, draft.into_note(id.clone())));

        debug!(note_id = %id, "Note stored in memory");
        Ok(id)
    }

    async fn list_by_owner(&self, owner_id: i64) -> Result<Vec<Note>> {
        let inner = self.inner.read().await;
        let mut owned: Vec<&(u64, Note)> = inner
            .notes
            .values()
            .filter(|(_, note)| note.owner_id == owner_id)
            .collect();

        // Newest first; insertion order breaks timestamp ties.
        owned.sort_by(|(seq_a, a), (seq_b, b)| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| seq_b.cmp(seq_a))
        });

        Ok(owned.into_iter().map(|(_, note)| note.clone()).collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<Option<Note>> {
        let inner = self.inner.read().await;
        Ok(inner.notes.get(id).map(|(_, note)| note.clone()))
    }

    async fn update_text(&self, id: &str, new_text: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;
        match inner.notes.get_mut(id) {
            Some((_, note)) => {
                note.text = new_text.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.notes.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn draft_at(owner_id: i64, text: &str, minutes_ago: i64) -> NoteDraft {
        NoteDraft {
            text: text.to_string(),
            owner_id,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
            photo_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_read_note() -> Result<()> {
        let repo = InMemoryNoteRepository::new();

        let id = repo.create(NoteDraft::text(12345, "Buy milk")).await?;
        assert!(!id.is_empty());

        let note = repo.get_by_id(&id).await?.unwrap();
        assert_eq!(note.id, id);
        assert_eq!(note.owner_id, 12345);
        assert_eq!(note.text, "Buy milk");

        Ok(())
    }

    #[tokio::test]
    async fn test_list_orders_newest_first_and_filters_owner() -> Result<()> {
        let repo = InMemoryNoteRepository::new();

        repo.create(draft_at(1, "oldest", 30)).await?;
        repo.create(draft_at(2, "someone else", 5)).await?;
        repo.create(draft_at(1, "newest", 1)).await?;
        repo.create(draft_at(1, "middle", 10)).await?;

        let texts: Vec<String> = repo
            .list_by_owner(1)
            .await?
            .into_iter()
            .map(|note| note.text)
            .collect();
        assert_eq!(texts, vec!["newest", "middle", "oldest"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_equal_timestamps_list_latest_insert_first() -> Result<()> {
        let repo = InMemoryNoteRepository::new();
        let created_at = Utc::now();

        for text in ["first", "second", "third"] {
            repo.create(NoteDraft {
                text: text.to_string(),
                owner_id: 1,
                created_at,
                photo_id: None,
            })
            .await?;
        }

        let texts: Vec<String> = repo
            .list_by_owner(1)
            .await?
            .into_iter()
            .map(|note| note.text)
            .collect();
        assert_eq!(texts, vec!["third", "second", "first"]);

        Ok(())
    }

    #[tokio::test]
    async fn test_update_and_delete_report_missing_notes() -> Result<()> {
        let repo = InMemoryNoteRepository::new();
        let id = repo.create(NoteDraft::text(1, "Initial")).await?;

        assert!(repo.update_text(&id, "Updated").await?);
        assert_eq!(repo.get_by_id(&id).await?.unwrap().text, "Updated");

        assert!(repo.delete_by_id(&id).await?);
        assert!(!repo.delete_by_id(&id).await?);
        assert!(!repo.update_text(&id, "Again").await?);
        assert!(repo.get_by_id(&id).await?.is_none());
        assert!(repo.is_empty().await);

        Ok(())
    }
}
