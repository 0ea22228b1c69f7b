//! # Note Model
//!
//! Data types for the notes kept on behalf of each chat.

use chrono::{DateTime, Utc};

/// Text stored for a photo note sent without a caption
pub const PHOTO_PLACEHOLDER: &str = "Фото";

/// A persisted note
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Repository-assigned identifier, never empty once persisted
    pub id: String,
    /// User-visible content; the caption (or placeholder) for photo notes
    pub text: String,
    /// Chat that owns the note
    pub owner_id: i64,
    /// Creation time, the only sort key for listings
    pub created_at: DateTime<Utc>,
    /// Telegram file identifier of the attached photo
    pub photo_id: Option<String>,
}

impl Note {
    /// Whether this note carries a photo attachment
    pub fn is_photo(&self) -> bool {
        self.photo_id.is_some()
    }
}

/// A note that has not been stored yet.
///
/// The repository turns a draft into a [`Note`] by assigning its identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteDraft {
    pub text: String,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
    pub photo_id: Option<String>,
}

impl NoteDraft {
    /// Draft a plain text note stamped with the current time
    pub fn text(owner_id: i64, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            owner_id,
            created_at: Utc::now(),
            photo_id: None,
        }
    }

    /// Draft a photo note.
    ///
    /// A missing or blank caption is replaced by [`PHOTO_PLACEHOLDER`]; any other caption is kept verbatim.
    pub fn photo(owner_id: i64, photo_id: impl Into<String>, caption: Option<&str>) -> Self {
        let text = match caption {
            Some(caption) if !caption.trim().is_empty() => caption.to_string(),
            _ => PHOTO_PLACEHOLDER.to_string(),
        };

        Self {
            text,
            owner_id,
            created_at: Utc::now(),
            photo_id: Some(photo_id.into()),
        }
    }

    /// Attach the identifier assigned by the repository
    pub fn into_note(self, id: String) -> Note {
        Note {
            id,
            text: self.text,
            owner_id: self.owner_id,
            created_at: self.created_at,
            photo_id: self.photo_id,
        }
    }
}
