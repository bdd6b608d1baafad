//! flowstate - daily focus topics
//!
//! Log topics for a day, tick them off, and browse the archive.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use flowstate_core::analytics::{current_streak_with_grace, day_score, history};
use flowstate_core::dates::{local_today, parse_date_key, to_date_key};
use flowstate_core::{merge_local_into_remote, Config, Database, FlowDocument};

#[derive(Parser)]
#[command(name = "flowstate")]
#[command(about = "Daily focus topics with streaks")]
#[command(version)]
struct Args {
    /// Treat this date (YYYY-MM-DD) as today instead of the local date
    #[arg(long, global = true)]
    today: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Add a topic to a day
    Add {
        /// Topic text; `#tags` are picked up automatically
        text: String,
        /// Optional notes
        #[arg(short, long, default_value = "")]
        desc: String,
        /// Day to add to (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Mark a topic done, or open again
    Toggle {
        /// Topic number as shown by `list`
        number: usize,
        #[arg(long)]
        date: Option<String>,
    },
    /// Remove a topic
    Remove {
        /// Topic number as shown by `list`
        number: usize,
        #[arg(long)]
        date: Option<String>,
    },
    /// Show a day's topics, score and tags
    List {
        #[arg(long)]
        date: Option<String>,
    },
    /// Show the current day streak
    Streak,
    /// List every logged day, newest first
    History,
    /// Delete a whole day
    DeleteDay {
        /// Day to delete (YYYY-MM-DD)
        date: String,
    },
    /// Delete every day
    Clear {
        /// Required, as this cannot be undone
        #[arg(long)]
        yes: bool,
    },
    /// Merge a browser-exported JSON document; its days replace stored ones
    Import {
        /// Path to the exported document
        file: PathBuf,
    },
    /// Print the whole log as a JSON document
    Export,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging
    let _log_guard =
        flowstate_core::logging::init(&config.logging).context("failed to initialize logging")?;

    // Open database
    let db_path = Config::database_path();
    let db = Database::open(&db_path).context("failed to open database")?;
    db.migrate().context("failed to run database migrations")?;
    tracing::info!(path = %db_path.display(), "Opened database");

    let today = match &args.today {
        Some(s) => parse_date(s)?,
        None => local_today(),
    };
    let day_key = |date: &Option<String>| -> Result<String> {
        match date {
            Some(s) => Ok(to_date_key(parse_date(s)?)),
            None => Ok(to_date_key(today)),
        }
    };

    match args.command {
        Command::Add { text, desc, date } => {
            let key = day_key(&date)?;
            let mut store = db.load_store().context("failed to load task log")?;
            let index = store.add_task(&key, &text, &desc)?;
            db.save_day(&key, store.day(&key))
                .context("failed to save day")?;
            println!("Added #{} to {}: {}", index + 1, key, text.trim());
        }
        Command::Toggle { number, date } => {
            let key = day_key(&date)?;
            let mut store = db.load_store().context("failed to load task log")?;
            let done = store.toggle_task(&key, to_index(number)?)?;
            db.save_day(&key, store.day(&key))
                .context("failed to save day")?;
            let text = &store.day(&key)[number - 1].text;
            if done {
                println!("Completed: {}", text);
            } else {
                println!("Reopened: {}", text);
            }
        }
        Command::Remove { number, date } => {
            let key = day_key(&date)?;
            let mut store = db.load_store().context("failed to load task log")?;
            let removed = store.remove_task(&key, to_index(number)?)?;
            db.save_day(&key, store.day(&key))
                .context("failed to save day")?;
            println!("Removed: {}", removed.text);
        }
        Command::List { date } => {
            let key = day_key(&date)?;
            let store = db.load_store().context("failed to load task log")?;
            print_day(&store, &key);
        }
        Command::Streak => {
            let store = db.load_store().context("failed to load task log")?;
            let streak = current_streak_with_grace(&store, today, config.analytics.grace_days);
            println!("{} Day{}", streak, if streak == 1 { "" } else { "s" });
        }
        Command::History => {
            let store = db.load_store().context("failed to load task log")?;
            let rows = history(&store);
            if rows.is_empty() {
                println!("No history yet.");
            }
            for row in rows {
                println!(
                    "{}  {:>3}% Done  ({}/{})",
                    row.date_key, row.score.percentage, row.score.completed, row.score.total
                );
            }
        }
        Command::DeleteDay { date } => {
            let key = to_date_key(parse_date(&date)?);
            if db.delete_day(&key).context("failed to delete day")? {
                println!("Deleted {}", key);
            } else {
                println!("Nothing logged on {}", key);
            }
        }
        Command::Clear { yes } => {
            if !yes {
                anyhow::bail!("refusing to clear history without --yes");
            }
            db.clear().context("failed to clear history")?;
            println!("History cleared.");
        }
        Command::Import { file } => {
            let json = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let local = FlowDocument::from_json(&json)
                .with_context(|| format!("failed to parse {}", file.display()))?;
            let remote = db.load_store().context("failed to load task log")?;
            let merged = merge_local_into_remote(&remote, &local.sessions);
            db.save_store(&merged).context("failed to save task log")?;
            let imported = local
                .sessions
                .iter()
                .filter(|(key, _)| parse_date_key(key).is_ok())
                .count();
            let skipped = local.sessions.len() - imported;
            if skipped > 0 {
                println!("Skipped {} day(s) with malformed dates.", skipped);
            }
            println!(
                "Imported {} day(s); {} day(s) stored.",
                imported,
                merged.len()
            );
        }
        Command::Export => {
            let store = db.load_store().context("failed to load task log")?;
            let doc = FlowDocument {
                sessions: store,
                theme: None,
            };
            println!("{}", doc.to_json()?);
        }
    }

    Ok(())
}

fn parse_date(s: &str) -> Result<NaiveDate> {
    parse_date_key(s).with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", s))
}

/// Topic numbers are 1-based on the command line.
fn to_index(number: usize) -> Result<usize> {
    number
        .checked_sub(1)
        .context("topic numbers start at 1")
}

fn print_day(store: &flowstate_core::TaskLogStore, key: &str) {
    let day = store.day(key);
    if day.is_empty() {
        println!("{}: nothing logged.", key);
        return;
    }

    let score = day_score(store, key);
    println!(
        "{}  {}% Done  ({}/{})",
        key, score.percentage, score.completed, score.total
    );
    for index in store.display_order(key) {
        let task = &day[index];
        let mark = if task.done { "x" } else { " " };
        println!("  {:>2}. [{}] {}", index + 1, mark, task.text);
        if !task.description.is_empty() {
            println!("         {}", task.description);
        }
    }

    let tags = store.day_tags(key);
    if tags.is_empty() {
        println!("  No context tags used.");
    } else {
        println!("  Tags: {}", tags.join(" "));
    }
}
