//! Entry status definitions and display labels

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Progress status of a diary entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum EntryStatus {
    /// Finished learning or activity
    Completed,
    /// Currently being worked on
    InProgress,
    /// Scheduled for later
    #[default]
    Planned,
}

impl EntryStatus {
    /// All statuses, in the order they are offered to the user
    pub const ALL: [EntryStatus; 3] = [
        EntryStatus::Completed,
        EntryStatus::InProgress,
        EntryStatus::Planned,
    ];

    /// Stored form of the status (`completed`, `in-progress`, `planned`)
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Completed => "completed",
            EntryStatus::InProgress => "in-progress",
            EntryStatus::Planned => "planned",
        }
    }

    /// Badge shown next to an entry title in listings
    pub fn badge(&self) -> &'static str {
        match self {
            EntryStatus::Completed => "✓ Completed",
            EntryStatus::InProgress => "… In progress",
            EntryStatus::Planned => "◷ Planned",
        }
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" => Ok(EntryStatus::Completed),
            "in-progress" => Ok(EntryStatus::InProgress),
            "planned" => Ok(EntryStatus::Planned),
            _ => Err(format!(
                "Invalid status: '{}'. Valid statuses are: completed, in-progress, planned",
                s
            )),
        }
    }
}
