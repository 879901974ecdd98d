//! Diary entry value object and input validation

use crate::domain::EntryStatus;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Maximum title length, in characters, after trimming
pub const MAX_TITLE_CHARS: usize = 100;

/// Maximum description length, in characters, after trimming
pub const MAX_DESCRIPTION_CHARS: usize = 500;

/// A single diary record
///
/// Field names on disk are camelCase (`createdAt`).
/// Fields other than `id` and `date` fall back to defaults so older records
/// stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryEntry {
    pub id: u64,
    pub date: NaiveDate,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: EntryStatus,
    #[serde(default)]
    pub created_at: DateTime<Utc>,
}

impl DiaryEntry {
    /// Build an entry from validated input plus the store-assigned fields
    pub fn new(input: ValidEntry, id: u64, created_at: DateTime<Utc>) -> Self {
        DiaryEntry {
            id,
            date: input.date,
            title: input.title,
            description: input.description,
            status: input.status,
            created_at,
        }
    }

    pub fn has_description(&self) -> bool {
        !self.description.is_empty()
    }
}

/// Raw user input for a new entry, as collected by the presentation layer
#[derive(Debug, Clone, Default)]
pub struct NewEntry {
    pub date: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
}

impl NewEntry {
    pub fn new(date: &str, title: &str, status: &str) -> Self {
        NewEntry {
            date: date.to_string(),
            title: title.to_string(),
            description: None,
            status: status.to_string(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Check every field rule and produce the normalized input.
    /// Title and description are trimmed; an absent description becomes "".
    pub fn validate(&self) -> Result<ValidEntry, ValidationError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(self.date.clone()))?;

        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let title_len = title.chars().count();
        if title_len > MAX_TITLE_CHARS {
            return Err(ValidationError::TitleTooLong(title_len));
        }

        let description = self.description.as_deref().unwrap_or("").trim();
        let description_len = description.chars().count();
        if description_len > MAX_DESCRIPTION_CHARS {
            return Err(ValidationError::DescriptionTooLong(description_len));
        }

        let status = EntryStatus::from_str(&self.status)
            .map_err(|_| ValidationError::InvalidStatus(self.status.clone()))?;

        Ok(ValidEntry {
            date,
            title: title.to_string(),
            description: description.to_string(),
            status,
        })
    }
}

/// Input that passed validation; only `NewEntry::validate` creates one
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEntry {
    date: NaiveDate,
    title: String,
    description: String,
    status: EntryStatus,
}

/// Caller-supplied input broke a field rule
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid date: '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("Title is required")]
    EmptyTitle,

    #[error("Title is too long: {0} characters (max {max})", max = MAX_TITLE_CHARS)]
    TitleTooLong(usize),

    #[error("Description is too long: {0} characters (max {max})", max = MAX_DESCRIPTION_CHARS)]
    DescriptionTooLong(usize),

    #[error("Invalid status: '{0}' (expected completed, in-progress or planned)")]
    InvalidStatus(String),
}
