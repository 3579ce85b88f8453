//! CLI definition, dispatch and the per-view pipelines.
//!
//! Every view reads the store once, pipes the result through the aggregation
//! engine and writes a static snapshot to `out`. Empty result sets are reported
//! as informational notices rather than failures.

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::chart_svg::{format_projection_chart, format_totals_chart};
use crate::adapters::csv_export::write_history;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::sqlite_adapter::SqliteStore;
use crate::domain::aggregation::{
    classify_balance, compute_balance, daily_totals, format_currency, pick_motivational_phrase,
    project_expenses, BalanceRating, Severity, MOTIVATIONAL_PHRASES,
    PROJECTION_DAYS,
};
use crate::domain::error::FinanceError;
use crate::domain::settings::Settings;
use crate::domain::transaction::{format_timestamp, Kind, Transaction};
use crate::domain::validation::validate_new_transaction;
use crate::logging;
use crate::ports::store_port::TransactionStore;

#[derive(Parser, Debug)]
#[command(name = "fintrack", about = "Personal income and expense tracker")]
pub struct Cli {
    /// INI configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record a new transaction
    Add {
        #[arg(short, long)]
        kind: Kind,
        #[arg(short = 'g', long)]
        category: Option<String>,
        #[arg(short, long)]
        amount: Option<f64>,
        #[arg(short, long)]
        note: Option<String>,
    },
    /// List every transaction, most recent first
    History,
    /// List known categories
    Categories,
    /// Write a bar chart of income vs. expense totals
    Chart {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the balance, its rating and a motivational phrase
    Balance {
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Project expenses over the next 30 days
    Projection {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Export the history to CSV
    Export {
        #[arg(short, long)]
        output: PathBuf,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    let settings = match load_settings(cli.config.as_ref()) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    logging::init(&settings.log_filter, settings.log_ansi);

    let store = match SqliteStore::from_settings(&settings) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = dispatch(cli.command, &store, &settings, &mut out);
    report_outcome(result, &mut out)
}

pub fn load_settings(config_path: Option<&PathBuf>) -> Result<Settings, FinanceError> {
    let adapter = match config_path {
        Some(path) => {
            FileConfigAdapter::from_file(path).map_err(|e| FinanceError::ConfigParse {
                file: path.display().to_string(),
                reason: e.to_string(),
            })?
        }
        None => FileConfigAdapter::empty(),
    };
    Settings::from_config(&adapter)
}

pub fn dispatch(
    command: Command,
    store: &dyn TransactionStore,
    settings: &Settings,
    out: &mut dyn Write,
) -> Result<(), FinanceError> {
    match command {
        Command::Add {
            kind,
            category,
            amount,
            note,
        } => run_add(
            store,
            kind,
            category.as_deref().unwrap_or_default(),
            amount,
            note.as_deref(),
            out,
        )
        .map(|_| ()),
        Command::History => run_history(store, out),
        Command::Categories => run_categories(store, out),
        Command::Chart { output } => {
            let output = output.unwrap_or_else(|| PathBuf::from("totals.svg"));
            run_chart(store, settings, &output, out)
        }
        Command::Balance { seed } => match seed {
            Some(seed) => run_balance(store, &mut StdRng::seed_from_u64(seed), out),
            None => run_balance(store, &mut rand::thread_rng(), out),
        },
        Command::Projection { output } => run_projection(store, settings, output.as_deref(), out),
        Command::Export { output } => run_export(store, &output, out),
    }
}

/// Maps a view's outcome to an exit code. Missing data is a notice, not a failure.
pub fn report_outcome(result: Result<(), FinanceError>, out: &mut dyn Write) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(FinanceError::NoData { report }) => {
            let _ = writeln!(out, "No data available for {report}.");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn run_add(
    store: &dyn TransactionStore,
    kind: Kind,
    category: &str,
    amount: Option<f64>,
    note: Option<&str>,
    out: &mut dyn Write,
) -> Result<Transaction, FinanceError> {
    let new = validate_new_transaction(kind, category, amount, note)?;
    let stored = store.insert(&new)?;
    writeln!(
        out,
        "Recorded {} of {} in {} at {}.",
        stored.kind,
        format_currency(stored.amount),
        stored.category,
        format_timestamp(&stored.timestamp)
    )?;
    Ok(stored)
}

pub fn run_history(store: &dyn TransactionStore, out: &mut dyn Write) -> Result<(), FinanceError> {
    let history = store.list_all()?;
    if history.is_empty() {
        return Err(FinanceError::no_data("transaction history"));
    }

    writeln!(
        out,
        "{:<19}  {:<7}  {:<12}  {:>12}  Note",
        "Date", "Kind", "Category", "Amount"
    )?;
    for tx in &history {
        writeln!(
            out,
            "{:<19}  {:<7}  {:<12}  {:>12}  {}",
            format_timestamp(&tx.timestamp),
            tx.kind,
            tx.category,
            format_currency(tx.amount),
            tx.note.as_deref().unwrap_or("")
        )?;
    }
    Ok(())
}

pub fn run_categories(store: &dyn TransactionStore, out: &mut dyn Write) -> Result<(), FinanceError> {
    for name in store.list_categories()? {
        writeln!(out, "{name}")?;
    }
    Ok(())
}

pub fn run_chart(
    store: &dyn TransactionStore,
    settings: &Settings,
    output: &Path,
    out: &mut dyn Write,
) -> Result<(), FinanceError> {
    let sums = store.sum_by_type()?;
    if sums.is_empty() {
        return Err(FinanceError::no_data("the income vs. expense chart"));
    }

    for (kind, total) in &sums {
        writeln!(out, "{:<8} {}", format!("{kind}:"), format_currency(*total))?;
    }

    let svg = format_totals_chart(&sums, settings.chart_width, settings.chart_height);
    fs::write(output, svg)?;
    tracing::info!(path = %output.display(), "wrote totals chart");
    writeln!(out, "Chart written to: {}", output.display())?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct BalanceReport {
    pub balance: f64,
    pub rating: BalanceRating,
    pub phrase: Option<&'static str>,
}

impl BalanceReport {
    pub fn display_balance(&self) -> String {
        format_currency(self.balance)
    }
}

/// Builds the balance view from a fresh grouped query. An empty store yields
/// a zero, neutral balance.
pub fn balance_report<R: Rng + ?Sized>(
    store: &dyn TransactionStore,
    rng: &mut R,
) -> Result<BalanceReport, FinanceError> {
    let sums = store.sum_by_type()?;
    let balance = compute_balance(&sums);
    tracing::debug!(balance, kinds = sums.len(), "computed balance");

    Ok(BalanceReport {
        balance,
        rating: classify_balance(balance),
        phrase: pick_motivational_phrase(&MOTIVATIONAL_PHRASES, rng),
    })
}

pub fn run_balance<R: Rng + ?Sized>(
    store: &dyn TransactionStore,
    rng: &mut R,
    out: &mut dyn Write,
) -> Result<(), FinanceError> {
    let report = balance_report(store, rng)?;
    let label = match report.rating.severity {
        Severity::Positive => "positive",
        Severity::Neutral => "neutral",
        Severity::Negative => "negative",
    };

    writeln!(out, "Balance: {} ({label})", report.display_balance())?;
    writeln!(out, "{}", report.rating.message)?;
    if let Some(phrase) = report.phrase {
        writeln!(out, "\u{201c}{phrase}\u{201d}")?;
    }
    Ok(())
}

pub fn run_projection(
    store: &dyn TransactionStore,
    settings: &Settings,
    output: Option<&Path>,
    out: &mut dyn Write,
) -> Result<(), FinanceError> {
    let expenses = store.dated_amounts(Kind::Expense)?;
    // project_expenses is never called on an empty set.
    if expenses.is_empty() {
        return Err(FinanceError::no_data("the expense projection"));
    }
    let projection = project_expenses(&expenses)?;

    writeln!(
        out,
        "Average daily expense: {}",
        format_currency(projection.daily_average)
    )?;
    writeln!(
        out,
        "Projection for the next {PROJECTION_DAYS} days: {}",
        format_currency(projection.projection)
    )?;

    if let Some(path) = output {
        let svg = format_projection_chart(
            &daily_totals(&expenses),
            projection.daily_average,
            settings.chart_width,
            settings.chart_height,
        );
        fs::write(path, svg)?;
        tracing::info!(path = %path.display(), "wrote projection chart");
        writeln!(out, "Chart written to: {}", path.display())?;
    }
    Ok(())
}

pub fn run_export(
    store: &dyn TransactionStore,
    output: &Path,
    out: &mut dyn Write,
) -> Result<(), FinanceError> {
    let history = store.list_all()?;
    let file = fs::File::create(output)?;
    write_history(file, &history)?;
    tracing::info!(path = %output.display(), rows = history.len(), "exported history");
    writeln!(
        out,
        "Exported {} transactions to: {}",
        history.len(),
        output.display()
    )?;
    Ok(())
}
