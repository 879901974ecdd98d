//! Output formatting utilities

use crate::domain::DiaryEntry;
use chrono::Local;

/// Format a single entry as a block of lines
pub fn format_entry(entry: &DiaryEntry) -> String {
    let mut output = format!(
        "#{}  {} - {}  [{}]\n",
        entry.id,
        entry.date.format("%-d %b %Y"),
        entry.title,
        entry.status.badge()
    );

    if entry.has_description() {
        output.push_str(&format!("    {}\n", entry.description));
    }

    output.push_str(&format!(
        "    Added: {}\n",
        entry.created_at.with_timezone(&Local).format("%d-%m-%Y")
    ));
    output
}

/// Format a list of entries for display, in the order given
pub fn format_entry_list(entries: &[DiaryEntry]) -> String {
    if entries.is_empty() {
        return "No entries found".to_string();
    }

    entries
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Info,
    Warning,
    Error,
}

/// Transient status message reported after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Level::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Level::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    fn new(level: Level, message: impl Into<String>) -> Self {
        Notification {
            level,
            message: message.into(),
        }
    }

    pub fn render(&self) -> String {
        let icon = match self.level {
            Level::Success => "✔",
            Level::Info => "ℹ",
            Level::Warning => "⚠",
            Level::Error => "✖",
        };
        format!("{} {}", icon, self.message)
    }

    /// Print the message: success and info to stdout, the rest to stderr
    pub fn emit(&self) {
        match self.level {
            Level::Success | Level::Info => println!("{}", self.render()),
            Level::Warning | Level::Error => eprintln!("{}", self.render()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewEntry;
    use chrono::{TimeZone, Utc};

    fn entry(title: &str, status: &str, description: Option<&str>) -> DiaryEntry {
        let mut input = NewEntry::new("2024-01-10", title, status);
        if let Some(d) = description {
            input = input.with_description(d);
        }
        let created = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        DiaryEntry::new(input.validate().unwrap(), 1704888000000, created)
    }

    #[test]
    fn test_format_empty_list() {
        assert_eq!(format_entry_list(&[]), "No entries found");
    }

    #[test]
    fn test_format_entry_heading() {
        let output = format_entry(&entry("Learned X", "completed", None));
        let first_line = output.lines().next().unwrap();

        assert_eq!(
            first_line,
            "#1704888000000  10 Jan 2024 - Learned X  [✓ Completed]"
        );
    }

    #[test]
    fn test_format_entry_description_and_added_date() {
        let e = entry("Ownership", "in-progress", Some("borrowck finally clicked"));
        let output = format_entry(&e);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("[… In progress]"));
        assert_eq!(lines[1], "    borrowck finally clicked");
        let added = e.created_at.with_timezone(&Local).format("%d-%m-%Y");
        assert_eq!(lines[2], format!("    Added: {}", added));
    }

    #[test]
    fn test_format_entry_without_description_skips_line() {
        let output = format_entry(&entry("Async", "planned", None));
        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("[◷ Planned]"));
    }

    #[test]
    fn test_format_list_keeps_order() {
        let entries = vec![
            entry("Second", "planned", None),
            entry("First", "completed", None),
        ];
        let output = format_entry_list(&entries);

        let second = output.find("Second").unwrap();
        let first = output.find("First").unwrap();
        assert!(second < first);
    }

    #[test]
    fn test_notification_render() {
        assert_eq!(
            Notification::success("Entry added to the diary").render(),
            "✔ Entry added to the diary"
        );
        assert_eq!(Notification::info("Entry deleted").render(), "ℹ Entry deleted");
        assert_eq!(Notification::warning("careful").render(), "⚠ careful");
        assert_eq!(Notification::error("failed").render(), "✖ failed");
    }
}
