pub mod output;
pub mod shell;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use crate::application::{validate_date, ExpenseInput, ExpenseService};
use crate::io::{Exporter, DEFAULT_BAR_WIDTH};
use crate::logging::init_tracing;
use crate::storage::CsvStore;

use shell::Shell;

/// Spesa - Personal Expense Tracker
#[derive(Parser)]
#[command(name = "spesa")]
#[command(about = "A local-first personal expense tracker backed by a CSV file")]
#[command(version)]
pub struct Cli {
    /// Expense data file
    #[arg(short, long, env = "SPESA_FILE", default_value = "expenses.csv", global = true)]
    pub file: PathBuf,

    /// Spending limit to compare the total against (e.g., "500")
    #[arg(long, env = "SPESA_LIMIT", global = true)]
    pub limit: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new expense and save it to the data file
    Add {
        /// Amount spent (e.g., "12.50" or "12")
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Category (e.g., "food", "rent")
        category: String,

        /// Description of the expense
        #[arg(short, long)]
        description: Option<String>,

        /// Date of the expense (dd/mm/yyyy, defaults to today)
        #[arg(long)]
        date: Option<String>,
    },

    /// List every expense in insertion order
    Summary {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List expenses of a single category (exact, case-sensitive match)
    Category {
        /// Category name
        category: String,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// List expenses between two dates, inclusive
    Range {
        /// Start date (dd/mm/yyyy)
        from: String,

        /// End date (dd/mm/yyyy)
        to: String,

        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Compare total spending against a limit
    Limit {
        /// Limit amount (falls back to --limit / SPESA_LIMIT)
        #[arg(allow_hyphen_values = true)]
        amount: Option<String>,
    },

    /// Show the daily expenses chart, or export its data
    Chart {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,

        /// Width of the longest bar
        #[arg(long, default_value_t = DEFAULT_BAR_WIDTH)]
        width: usize,

        /// Export the json/csv data to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start an interactive session
    Shell {
        /// Read commands from stdin instead of prompting
        #[arg(long)]
        script: bool,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        init_tracing(self.verbose);

        let store = CsvStore::new(&self.file);
        let stdout = io::stdout();
        let mut out = stdout.lock();

        match self.command {
            Commands::Add {
                amount,
                category,
                description,
                date,
            } => {
                let mut service = ExpenseService::open(store)?;
                apply_limit(&mut service, self.limit.as_deref())?;

                let mut input = ExpenseInput::new(amount, category);
                input.description = description;
                input.date = date;

                let result = service.add_expense(input)?;
                service.save()?;
                output::write_added(&mut out, &result)?;
            }

            Commands::Summary { format } => {
                let service = load_service(store)?;
                output::write_expenses(&mut out, &service.summary(), &format)?;
                if format == "table" {
                    output::write_category_totals(&mut out, &service.category_totals())?;
                }
            }

            Commands::Category { category, format } => {
                let service = load_service(store)?;
                let records = service.category_summary(&category);
                if records.is_empty() && format == "table" {
                    writeln!(out, "No expenses found for category '{}'.", category)?;
                } else {
                    output::write_expenses(&mut out, &records, &format)?;
                }
            }

            Commands::Range { from, to, format } => {
                let start = validate_date(&from)?;
                let end = validate_date(&to)?;
                let service = load_service(store)?;
                let records = service.date_range_summary(start, end)?;
                output::write_expenses(&mut out, &records, &format)?;
            }

            Commands::Limit { amount } => {
                let mut service = load_service(store)?;
                let raw = amount.or(self.limit).context(
                    "No spending limit given. Pass an amount or set --limit / SPESA_LIMIT",
                )?;
                service.set_limit(&raw)?;

                if let Some(status) = service.check_limit() {
                    output::write_limit_status(&mut out, &status)?;
                }
            }

            Commands::Chart {
                format,
                width,
                output: path,
            } => {
                let service = load_service(store)?;

                match path {
                    Some(path) => {
                        if format != "csv" && format != "json" {
                            bail!("Invalid export format '{}'. Valid formats: json, csv", format);
                        }
                        let file = File::create(&path).with_context(|| {
                            format!("Failed to create output file: {}", path.display())
                        })?;
                        let exporter = Exporter::new(&service);
                        let count = if format == "csv" {
                            exporter.export_daily_totals_csv(file)?
                        } else {
                            exporter.export_daily_totals_json(file)?.days.len()
                        };
                        eprintln!("Exported {} daily totals to {}", count, path.display());
                    }
                    None => {
                        output::write_chart(&mut out, &service.daily_totals(), &format, width)?
                    }
                }
            }

            Commands::Shell { script } => {
                let mut service = ExpenseService::new(store);
                apply_limit(&mut service, self.limit.as_deref())?;

                // Release stdout: the shell writes through its own handle
                drop(out);

                if script {
                    let mut shell = Shell::new(service, io::stdout());
                    shell::run_script(&mut shell, io::stdin().lock())?;
                } else {
                    shell::run_interactive(service)?;
                }
                return Ok(());
            }
        }

        out.flush()?;
        Ok(())
    }
}

/// Open a session for read-only commands: the data file must exist.
fn load_service(store: CsvStore) -> Result<ExpenseService> {
    let mut service = ExpenseService::new(store);
    service.load()?;
    Ok(service)
}

fn apply_limit(service: &mut ExpenseService, limit: Option<&str>) -> Result<()> {
    if let Some(raw) = limit {
        service
            .set_limit(raw)
            .context("Invalid spending limit in --limit / SPESA_LIMIT")?;
    }
    Ok(())
}
