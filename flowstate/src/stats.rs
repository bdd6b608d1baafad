//! flowstate-stats - completion analytics
//!
//! Prints totals, streaks, the last seven days and the year heatmap.

use anyhow::{Context, Result};
use clap::Parser;
use flowstate_core::analytics::{compute_snapshot_with, AnalyticsSnapshot};
use flowstate_core::dates::{local_today, parse_date_key};
use flowstate_core::{Config, Database};

#[derive(Parser, Debug)]
#[command(name = "flowstate-stats")]
#[command(about = "Completion analytics for your focus topics")]
#[command(version)]
struct Args {
    /// Treat this date (YYYY-MM-DD) as today instead of the local date
    #[arg(long)]
    today: Option<String>,

    /// Output format: text (default) or json
    #[arg(short, long, default_value = "text")]
    format: String,

    /// Skip the year heatmap in text output
    #[arg(long)]
    no_heatmap: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = flowstate_core::logging::init(&config.logging).ok();

    let db_path = Config::database_path();
    let db = Database::open(&db_path).context("failed to open database")?;
    db.migrate().context("failed to run database migrations")?;
    tracing::info!(path = %db_path.display(), "Opened database");

    let today = match &args.today {
        Some(s) => parse_date_key(s)
            .with_context(|| format!("invalid date '{}', expected YYYY-MM-DD", s))?,
        None => local_today(),
    };

    let store = db.load_store().context("failed to load task log")?;
    let snapshot = compute_snapshot_with(&store, today, &config.analytics.snapshot_options());

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        "text" => print_terminal(&snapshot, !args.no_heatmap),
        other => anyhow::bail!("Unknown format: {}. Use 'text' or 'json'", other),
    }

    Ok(())
}

fn print_terminal(snapshot: &AnalyticsSnapshot, show_heatmap: bool) {
    println!("SUMMARY");
    println!(
        "   Completed: {:<10} Success rate: {}%",
        snapshot.total_completed, snapshot.success_rate
    );
    println!(
        "   Current streak: {} day{}   Best streak: {} day{}",
        snapshot.current_streak,
        plural(snapshot.current_streak),
        snapshot.best_streak,
        plural(snapshot.best_streak)
    );
    println!();

    println!("LAST 7 DAYS");
    let max = snapshot.weekly_max();
    for day in &snapshot.weekly {
        let width = day.completed_count * 20 / max;
        println!(
            "   {} {}  {:<20} {}",
            day.day_label,
            day.date_key,
            "#".repeat(width),
            day.completed_count
        );
    }

    if !show_heatmap {
        return;
    }

    println!();
    println!("ACTIVITY");
    // One line per weekday, one column per week
    for weekday in 0..7 {
        let row: String = snapshot
            .heatmap
            .iter()
            .map(|week| heat_cell(week[weekday].completed_count))
            .collect();
        println!("   {}", row);
    }
}

fn heat_cell(count: usize) -> char {
    match count {
        0 => '.',
        1 => '-',
        2..=3 => '+',
        _ => '#',
    }
}

fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}
