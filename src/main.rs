use chrono::Local;
use clap::Parser;
use logbook::application::{ConfigService, DiaryStore, InitService, ListEntriesService};
use logbook::cli::{
    format_entry, format_entry_list, AssumeYes, Cli, Commands, Confirm, Notification,
    StdinConfirm,
};
use logbook::domain::{EntryStatus, NewEntry, ValidationError};
use logbook::error::LogbookError;
use logbook::infrastructure::FileSystemRepository;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `LOGBOOK_LOG=debug`
const LOG_ENV: &str = "LOGBOOK_LOG";

fn main() {
    if let Err(e) = init_logging() {
        eprintln!("Warning: {:#}", e);
    }

    let cli = Cli::parse();

    match run(cli) {
        Ok(_) => std::process::exit(0),
        Err(e) => {
            Notification::error(e.display_with_suggestions()).emit();
            std::process::exit(e.exit_code());
        }
    }
}

fn init_logging() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_new("warn"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {}", e))
}

fn run(cli: Cli) -> Result<(), LogbookError> {
    match cli.command {
        Some(Commands::Init { path }) => {
            InitService::execute(&path)?;
            Notification::success(format!("Initialized logbook at {}", path.display())).emit();
            Ok(())
        }
        Some(Commands::Config { key, value, list }) => {
            let repo = FileSystemRepository::discover()?;
            let service = ConfigService::new(repo);

            if list {
                let config = service.list()?;
                println!("storage_key = {}", config.storage_key);
                println!("quota_bytes = {}", config.quota_bytes);
                println!("created = {}", config.created.to_rfc3339());
                Ok(())
            } else if let Some(k) = key {
                if let Some(v) = value {
                    service.set(&k, &v)?;
                    println!("Set {} = {}", k, v);
                } else {
                    println!("{}", service.get(&k)?);
                }
                Ok(())
            } else {
                println!("Usage: logbook config [--list | <key> [<value>]]");
                println!("Valid keys: storage_key, quota_bytes, created");
                Ok(())
            }
        }
        Some(Commands::Add {
            title,
            date,
            description,
            status,
        }) => {
            let repo = FileSystemRepository::discover()?;
            let mut store = DiaryStore::open(&repo)?;

            // Date defaults to today
            let date = date
                .unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
            let input = NewEntry {
                date,
                title,
                description,
                status,
            };

            let entry = store.add(&input)?;
            Notification::success("Entry added to the diary").emit();
            print!("{}", format_entry(&entry));
            Ok(())
        }
        Some(Commands::List {
            status,
            limit,
            json,
        }) => {
            let status = status
                .map(|s| {
                    EntryStatus::from_str(&s).map_err(|_| ValidationError::InvalidStatus(s.clone()))
                })
                .transpose()?;

            let repo = FileSystemRepository::discover()?;
            let store = DiaryStore::open(&repo)?;

            let entries = match ListEntriesService::new(&store).execute(status, limit) {
                Ok(entries) => entries,
                Err(LogbookError::Storage(e)) => {
                    Notification::warning(format!("Could not read the diary: {}", e)).emit();
                    Vec::new()
                }
                Err(e) => return Err(e),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                println!("{}", format_entry_list(&entries).trim_end());
            }
            Ok(())
        }
        Some(Commands::Delete { id, yes }) => {
            let repo = FileSystemRepository::discover()?;
            let mut store = DiaryStore::open(&repo)?;

            if !confirmer(yes).confirm("Delete this entry?")? {
                Notification::info("Deletion cancelled").emit();
                return Ok(());
            }

            if store.delete(id)? {
                Notification::info("Entry deleted").emit();
                Ok(())
            } else {
                Err(LogbookError::EntryNotFound(id))
            }
        }
        Some(Commands::Clear { yes }) => {
            let repo = FileSystemRepository::discover()?;
            let mut store = DiaryStore::open(&repo)?;

            if !confirmer(yes).confirm("Delete all entries?")? {
                Notification::info("Clear cancelled").emit();
                return Ok(());
            }

            let removed = store.clear()?;
            Notification::info(format!("Removed {} entries", removed)).emit();
            Ok(())
        }
        None => {
            println!("logbook - Learning diary for your portfolio");
            println!("Use --help for usage information");
            Ok(())
        }
    }
}

fn confirmer(assume_yes: bool) -> Box<dyn Confirm> {
    if assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm::new())
    }
}
