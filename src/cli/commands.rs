//! CLI command definitions

use crate::domain::EntryStatus;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Help text naming every status a user can pick
fn status_help(lead: &str) -> String {
    let names: Vec<&str> = EntryStatus::ALL.iter().map(EntryStatus::as_str).collect();
    format!("{}: {}", lead, names.join(", "))
}

#[derive(Parser, Debug)]
#[command(name = "logbook")]
#[command(about = "Learning diary for your portfolio", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new logbook
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Add an entry to the diary
    Add {
        /// What you learned or worked on (required, max 100 characters)
        #[arg(short, long)]
        title: String,

        /// Date of the event, YYYY-MM-DD (default: today)
        #[arg(short, long)]
        date: Option<String>,

        /// Longer description (max 500 characters)
        #[arg(short = 'D', long)]
        description: Option<String>,

        #[arg(short, long, help = status_help("Status"))]
        status: String,
    },

    /// List diary entries, newest first
    List {
        #[arg(short, long, help = status_help("Only show entries with this status"))]
        status: Option<String>,

        /// Show at most this many entries
        #[arg(short = 'n', long)]
        limit: Option<usize>,

        /// Print the entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete an entry by id
    Delete {
        /// Entry id, as shown by 'logbook list'
        id: u64,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Remove every entry
    Clear {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_parse_add() {
        let cli = Cli::try_parse_from([
            "logbook",
            "add",
            "--title",
            "Learned X",
            "--date",
            "2024-01-10",
            "--status",
            "completed",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Add {
                title,
                date,
                description,
                status,
            }) => {
                assert_eq!(title, "Learned X");
                assert_eq!(date.as_deref(), Some("2024-01-10"));
                assert_eq!(description, None);
                assert_eq!(status, "completed");
            }
            other => panic!("Expected Add, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_delete_with_yes() {
        let cli = Cli::try_parse_from(["logbook", "delete", "1704879000123", "-y"]).unwrap();

        match cli.command {
            Some(Commands::Delete { id, yes }) => {
                assert_eq!(id, 1704879000123);
                assert!(yes);
            }
            other => panic!("Expected Delete, got {:?}", other),
        }
    }

    #[test]
    fn test_status_help_lists_every_status() {
        let cmd = Cli::command();
        for sub in ["add", "list"] {
            let arg = cmd
                .find_subcommand(sub)
                .unwrap()
                .get_arguments()
                .find(|a| a.get_id() == "status")
                .unwrap();
            let help = arg.get_help().unwrap().to_string();
            for status in EntryStatus::ALL {
                assert!(help.contains(status.as_str()), "{} help: {}", sub, help);
            }
        }
    }

    #[test]
    fn test_add_requires_title_and_status() {
        assert!(Cli::try_parse_from(["logbook", "add", "--status", "planned"]).is_err());
        assert!(Cli::try_parse_from(["logbook", "add", "--title", "X"]).is_err());
    }
}
