//! services/api/src/bin/fortune.rs
//!
//! Terminal front end. With no arguments it shows statistics and today's
//! fortune, generating it if none exists yet.
//!
//! ```text
//! fortune                  # today's fortune
//! fortune history          # dates with a recorded fortune
//! fortune history DATE     # the fortune for DATE (YYYY-MM-DD)
//! ```

use api_lib::{
    bootstrap::{init_tracing, open_store},
    config::Config,
    error::ApiError,
};
use chrono::NaiveDate;
use daily_fortune_core::{DailyFortune, FortuneHistoryStore};

const USAGE: &str = "usage: fortune [history [YYYY-MM-DD]]";

#[derive(Debug, PartialEq)]
enum Command {
    Today,
    History,
    Date(NaiveDate),
}

fn parse_command(args: &[String]) -> Result<Command, String> {
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        [] => Ok(Command::Today),
        ["history"] => Ok(Command::History),
        ["history", date] => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(Command::Date)
            .map_err(|e| format!("invalid date '{}': {}", date, e)),
        _ => Err(format!("unexpected arguments: {}", args.join(" "))),
    }
}

fn main() -> Result<(), ApiError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_command(&args) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    };

    let config = Config::from_env()?;
    init_tracing(config.log_level);
    let mut store = open_store(&config);

    match command {
        Command::Today => show_today(&mut store, &config)?,
        Command::History => show_history(&store),
        Command::Date(date) => show_date(&store, date),
    }
    Ok(())
}

fn show_today(store: &mut FortuneHistoryStore, config: &Config) -> Result<(), ApiError> {
    println!("🔮 Daily Fortune");
    println!("{}", "=".repeat(40));

    let stats = store.get_stats();
    println!("📊 Statistics:");
    println!("   Total fortunes: {}", stats.total_fortunes);
    println!("   Current streak: {}", stats.streak);
    println!("   Device ID: {}", store.state().device_id);
    println!();

    if let Some(fortune) = store.get_today() {
        println!("📜 Today's fortune (already generated):");
        print_fortune(&fortune);
    } else if store.can_generate() {
        let fortune = store.generate()?;
        println!("✨ Your fortune:");
        print_fortune(&fortune);
    } else {
        println!("⏰ You've already received today's fortune! Come back tomorrow.");
    }

    println!();
    println!("📁 Data stored in: {}", config.user_data_path().display());
    for dir in &config.backup_dirs {
        println!("💾 Backup location: {}", dir.display());
    }
    println!("📚 Fortune count: {}", store.catalog().len());
    Ok(())
}

fn show_history(store: &FortuneHistoryStore) {
    let dates = store.list_available_dates();
    if dates.is_empty() {
        println!("No fortunes recorded yet.");
        return;
    }
    for date in dates {
        println!("{}", date.format("%Y-%m-%d (%A)"));
    }
}

fn show_date(store: &FortuneHistoryStore, date: NaiveDate) {
    match store.get_by_date(date) {
        Some(fortune) => {
            println!("📜 Fortune for {}:", date);
            print_fortune(&fortune);
        }
        None => println!("No fortune recorded for {}.", date),
    }
}

fn print_fortune(fortune: &DailyFortune) {
    println!("   \"{}\"", fortune.text);
    println!("   Category: {}", fortune.category);
    println!("   Generated at: {}", fortune.generated_at.format("%H:%M"));
}
