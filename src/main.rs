//! growth-journal
//!
//! A personal trading journal: record daily account closes against a
//! compounding daily growth target, log deposits and withdrawals, and derive
//! per-day performance, drawdown, streaks, and a suggested withdrawal.

mod metrics;
mod models;
mod store;

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::metrics::JournalView;
use crate::models::{
    CashflowKind, DayUpdate, JournalSettings, WithdrawalPolicy, WithdrawalRule,
};
use crate::store::JournalStore;

/// Trading journal CLI.
#[derive(Parser)]
#[command(name = "gjournal")]
#[command(about = "Track daily closes against a compounding growth target", long_about = None)]
struct Cli {
    /// Journal file path
    #[arg(short, long, default_value = "./journal.json")]
    file: PathBuf,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure the capital base and the daily growth target
    Init {
        /// Starting capital
        #[arg(short, long)]
        capital: String,

        /// Daily growth target percentage (1 = 1% per day)
        #[arg(short, long)]
        target_pct: String,

        /// First calendar day of the journal (YYYY-MM-DD)
        #[arg(short, long)]
        start_date: NaiveDate,

        /// Absolute equity goal
        #[arg(short, long)]
        goal: String,
    },

    /// Manage day entries
    Day {
        #[command(subcommand)]
        action: DayCommands,
    },

    /// Manage deposits and withdrawals
    Cash {
        #[command(subcommand)]
        action: CashCommands,
    },

    /// Configure the withdrawal recommendation policy
    Policy {
        /// Payout rule (profit_start, profit_hwm, goal_only)
        rule: String,

        /// Percentage of the withdrawable base to suggest
        #[arg(short, long)]
        rate: Option<String>,

        /// Amount held back from the high-water mark (profit_hwm)
        #[arg(short, long)]
        buffer: Option<String>,
    },

    /// Show summary figures, statistics, and withdrawal advice
    Stats,

    /// Write the journal document to a file
    Export {
        /// Destination path
        path: PathBuf,
    },

    /// Replace the journal with a previously exported document
    Import {
        /// Source path
        path: PathBuf,
    },
}

#[derive(Subcommand)]
enum DayCommands {
    /// Append a trading day
    Add {
        /// Calendar day (YYYY-MM-DD)
        date: NaiveDate,

        /// Closing equity; omit while the day is still open
        #[arg(short, long)]
        close: Option<String>,

        /// The day intentionally had no trading activity
        #[arg(long)]
        no_trade: bool,
    },

    /// Edit a day entry in place
    Edit {
        /// Entry id (prefix accepted)
        id: String,

        /// Move the entry to a different calendar day
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Record or correct the closing equity
        #[arg(long)]
        close: Option<String>,

        /// Drop the recorded close, returning the day to pending
        #[arg(long, conflicts_with = "close")]
        clear_close: bool,

        /// Mark the day as no-trade
        #[arg(long, conflicts_with = "traded")]
        no_trade: bool,

        /// Clear the no-trade flag
        #[arg(long)]
        traded: bool,
    },

    /// Delete a day entry
    Rm {
        /// Entry id (prefix accepted)
        id: String,
    },

    /// Show all days with their derived metrics
    List,
}

#[derive(Subcommand)]
enum CashCommands {
    /// Record a deposit or withdrawal
    Add {
        /// Calendar day the movement settled (YYYY-MM-DD)
        date: NaiveDate,

        /// Non-negative amount
        amount: String,

        /// deposit or withdrawal
        #[arg(short, long, default_value = "deposit")]
        kind: String,

        /// Free-form note
        #[arg(short, long)]
        note: Option<String>,
    },

    /// Delete a cashflow
    Rm {
        /// Cashflow id (prefix accepted)
        id: String,
    },

    /// Show all cashflows
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut store = JournalStore::open(&cli.file);

    match cli.command {
        Commands::Init {
            capital,
            target_pct,
            start_date,
            goal,
        } => {
            let settings = JournalSettings {
                starting_capital: parse_amount(&capital, "starting capital"),
                daily_target_pct: parse_number(&target_pct, "daily target percentage"),
                start_date,
                target_goal: parse_amount(&goal, "target goal"),
            };
            info!(capital = %settings.starting_capital, target_pct = %settings.daily_target_pct, "Configuring journal");

            let view = store.configure(settings)?;
            println!("Journal configured.");
            println!(
                "Day 1 target: ${:.2} (+{}%)",
                view.summary.projected_target_end, view.summary.daily_target_pct
            );
        }

        Commands::Day { action } => match action {
            DayCommands::Add {
                date,
                close,
                no_trade,
            } => {
                let close = parse_close(close);
                let (id, view) = store.add_day(date, close, no_trade)?;

                println!("Added day {}: {}", store.snapshot().days.len(), id);
                if let Some(m) = view.metrics.iter().find(|m| m.entry.id == id) {
                    println!(
                        "  Target: ${:.2} -> ${:.2}  Status: {}",
                        m.target_start,
                        m.target_end,
                        m.status.as_str()
                    );
                }
            }

            DayCommands::Edit {
                id,
                date,
                close,
                clear_close,
                no_trade,
                traded,
            } => {
                let id = resolve_day_id(&store, &id)?;
                let update = DayUpdate {
                    date,
                    actual_close: parse_close(close),
                    clear_close,
                    no_trade: match (no_trade, traded) {
                        (true, _) => Some(true),
                        (_, true) => Some(false),
                        _ => None,
                    },
                };

                let view = store.update_day(&id, &update)?;
                println!("Updated day: {}", id);
                print_day_table(&view);
            }

            DayCommands::Rm { id } => {
                let id = resolve_day_id(&store, &id)?;
                store.remove_day(&id)?;
                println!("Removed day: {}", id);
            }

            DayCommands::List => {
                let view = store.derive();
                if view.metrics.is_empty() {
                    println!("No days recorded yet. Use 'gjournal day add <date>' to start.");
                    return Ok(());
                }
                print_day_table(&view);
            }
        },

        Commands::Cash { action } => match action {
            CashCommands::Add {
                date,
                amount,
                kind,
                note,
            } => {
                let Some(kind) = CashflowKind::from_str(&kind) else {
                    bail!("unknown cashflow kind '{}' (expected deposit or withdrawal)", kind);
                };
                let amount = parse_amount(&amount, "cashflow amount");

                let (id, _) = store.add_cashflow(date, amount, kind, note)?;
                println!("Recorded {} of ${:.2} on {}: {}", kind.as_str(), amount, date, id);
            }

            CashCommands::Rm { id } => {
                let id = resolve_cashflow_id(&store, &id)?;
                store.remove_cashflow(&id)?;
                println!("Removed cashflow: {}", id);
            }

            CashCommands::List => {
                let flows = &store.snapshot().cashflows;
                if flows.is_empty() {
                    println!("No cashflows recorded.");
                    return Ok(());
                }

                println!(
                    "\n{:<36} {:<12} {:<12} {:>12}  {}",
                    "ID", "DATE", "KIND", "AMOUNT", "NOTE"
                );
                println!("{}", "-".repeat(90));
                for flow in flows {
                    println!(
                        "{:<36} {:<12} {:<12} {:>12}  {}",
                        flow.id,
                        flow.date.to_string(),
                        flow.kind.as_str(),
                        format!("${:.2}", flow.amount),
                        flow.note.as_deref().unwrap_or("")
                    );
                }
            }
        },

        Commands::Policy { rule, rate, buffer } => {
            let Some(rule) = WithdrawalRule::from_str(&rule) else {
                bail!("unknown withdrawal rule '{}' (expected profit_start, profit_hwm, or goal_only)", rule);
            };

            let current = store.snapshot().withdrawal.clone();
            let policy = WithdrawalPolicy {
                rule,
                rate: rate
                    .map(|r| parse_amount(&r, "payout rate"))
                    .unwrap_or(current.rate),
                buffer: buffer
                    .map(|b| parse_amount(&b, "buffer"))
                    .unwrap_or(current.buffer),
            };

            let view = store.set_policy(policy)?;
            let saved = &store.snapshot().withdrawal;
            println!("Policy set: {} at {}%", saved.rule.as_str(), saved.rate);
            println!("Suggested withdrawal now: ${:.2}", view.advice.suggested);
        }

        Commands::Stats => {
            let view = store.derive();
            if store.snapshot().settings.is_none() {
                println!("Journal not configured yet. Run 'gjournal init' first.");
                return Ok(());
            }
            print_stats(&view);
        }

        Commands::Export { path } => {
            store.export(&path)?;
            println!("Exported journal to {}", path.display());
        }

        Commands::Import { path } => {
            let view = store.import(&path)?;
            println!(
                "Imported journal: {} days, {} cashflows.",
                view.metrics.len(),
                store.snapshot().cashflows.len()
            );
        }
    }

    Ok(())
}

/// Per-day metrics table.
fn print_day_table(view: &JournalView) {
    println!(
        "\n{:<10} {:>4} {:<12} {:>12} {:>12} {:>12} {:>10} {:>8}  {}",
        "ID", "DAY", "DATE", "START", "TARGET", "CLOSE", "CHANGE", "PCT", "STATUS"
    );
    println!("{}", "-".repeat(100));

    for m in &view.metrics {
        println!(
            "{:<10} {:>4} {:<12} {:>12} {:>12} {:>12} {:>10} {:>8}  {}",
            short_id(&m.entry.id),
            m.day_index,
            m.entry.date.to_string(),
            format!("${:.2}", m.target_start),
            format!("${:.2}", m.target_end),
            m.entry
                .actual_close
                .map(|c| format!("${:.2}", c))
                .unwrap_or_else(|| "-".to_string()),
            m.trading_change
                .map(|c| format!("{:+.2}", c))
                .unwrap_or_else(|| "-".to_string()),
            m.trading_pct
                .map(|p| format!("{:+.2}%", p))
                .unwrap_or_else(|| "-".to_string()),
            m.status.as_str()
        );
    }
}

/// Summary, win/loss, risk, streak, and withdrawal sections.
fn print_stats(view: &JournalView) {
    let summary = &view.summary;
    let stats = &view.stats;
    let advice = &view.advice;

    println!("\n--- Summary ---");
    println!("Current Equity: ${:.2}", summary.current_equity);
    println!("Next Target:    ${:.2}", summary.projected_target_end);
    println!("Daily Target:   {}%", summary.daily_target_pct);
    println!("Max Drawdown:   {:.2}%", summary.max_drawdown_pct);

    println!("\n--- Win/Loss ---");
    println!("Completed Days: {}", stats.completed_days);
    println!("Green Days:     {}", stats.green_days);
    println!("Red Days:       {}", stats.red_days);
    println!("Win Rate:       {:.1}%", stats.win_rate);
    println!("Avg Green:      {:.2}%", stats.avg_green);
    println!("Avg Red:        {:.2}%", stats.avg_red);
    println!("Profit Factor:  {}", fmt_ratio(stats.profit_factor));
    println!("Expectancy:     ${:.2}/day", stats.expectancy);
    println!("Volatility:     {:.2}%", stats.volatility);

    println!("\n--- Risk ---");
    println!("Peak Equity:    ${:.2}", stats.peak_equity);
    println!("Max Drawdown:   {:.2}% (${:.2})", stats.max_drawdown_pct, stats.max_drawdown_amount);

    println!("\n--- Streaks ---");
    println!("Goal Streak:    {}", stats.goal_streak);
    println!("Green Streak:   {}", stats.green_streak);

    println!("\n--- Withdrawal ({}) ---", advice.rule.as_str());
    println!("Equity:         ${:.2}", advice.equity);
    println!("High-Water:     ${:.2}", advice.high_water_mark);
    println!("Base:           ${:.2}", advice.base);
    println!("Suggested:      ${:.2}", advice.suggested);
}

/// Parse a monetary magnitude, coercing bad input to zero.
fn parse_amount(raw: &str, what: &str) -> Decimal {
    let value = match Decimal::from_str(raw.trim()) {
        Ok(v) => v,
        Err(_) => {
            warn!(input = %raw, "{} is not a number; using 0", what);
            return Decimal::ZERO;
        }
    };

    if value < Decimal::ZERO {
        warn!(input = %raw, "{} cannot be negative; using 0", what);
        Decimal::ZERO
    } else {
        value
    }
}

/// Parse a signed number (percentages may be negative), coercing bad input to zero.
fn parse_number(raw: &str, what: &str) -> Decimal {
    match Decimal::from_str(raw.trim()) {
        Ok(v) => v,
        Err(_) => {
            warn!(input = %raw, "{} is not a number; using 0", what);
            Decimal::ZERO
        }
    }
}

/// Parse an optional close, coercing bad input to "not reported".
fn parse_close(raw: Option<String>) -> Option<Decimal> {
    let raw = raw?;
    match Decimal::from_str(raw.trim()) {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(input = %raw, "close is not a number; leaving the day unreported");
            None
        }
    }
}

/// Resolve a (possibly shortened) day id to a full one.
fn resolve_day_id(store: &JournalStore, prefix: &str) -> Result<String> {
    let matches: Vec<&str> = store
        .snapshot()
        .days
        .iter()
        .map(|d| d.id.as_str())
        .filter(|id| id.starts_with(prefix))
        .collect();

    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => bail!("no day entry matches id '{}'", prefix),
        _ => bail!("id '{}' is ambiguous ({} matches)", prefix, matches.len()),
    }
}

/// Resolve a (possibly shortened) cashflow id to a full one.
fn resolve_cashflow_id(store: &JournalStore, prefix: &str) -> Result<String> {
    let matches: Vec<&str> = store
        .snapshot()
        .cashflows
        .iter()
        .map(|c| c.id.as_str())
        .filter(|id| id.starts_with(prefix))
        .collect();

    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => bail!("no cashflow matches id '{}'", prefix),
        _ => bail!("id '{}' is ambiguous ({} matches)", prefix, matches.len()),
    }
}

/// Display a ratio that may be infinite.
fn fmt_ratio(value: f64) -> String {
    if value.is_infinite() {
        "inf".to_string()
    } else {
        format!("{:.2}", value)
    }
}

/// First segment of a uuid, enough to address entries interactively.
fn short_id(id: &str) -> &str {
    id.split('-').next().unwrap_or(id)
}
