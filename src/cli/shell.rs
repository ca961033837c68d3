use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::application::{validate_date, ExpenseInput, ExpenseService};
use crate::io::DEFAULT_BAR_WIDTH;

use super::output;

const PROMPT: &str = "spesa> ";

/// One line typed at the shell prompt.
#[derive(Parser)]
#[command(name = "spesa", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Add an expense (dated today unless --date is given)
    Add {
        /// Amount spent (e.g., "12.50")
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Category (e.g., "food")
        category: String,

        /// Description of the expense
        #[arg(short, long)]
        description: Option<String>,

        /// Date of the expense (dd/mm/yyyy)
        #[arg(long)]
        date: Option<String>,
    },

    /// List every expense
    Summary,

    /// List expenses of one category (exact match)
    Category {
        /// Category name
        category: String,
    },

    /// List expenses between two dates, inclusive
    Range {
        /// Start date (dd/mm/yyyy)
        from: String,

        /// End date (dd/mm/yyyy)
        to: String,
    },

    /// Manage the spending limit
    #[command(subcommand)]
    Limit(LimitCommand),

    /// Show the daily expenses chart
    Chart {
        /// Output format: table, json, csv
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Save expenses to the data file
    Save,

    /// Load expenses from the data file, replacing the current ones
    Load,

    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

#[derive(Subcommand)]
enum LimitCommand {
    /// Set the spending limit
    Set {
        /// Limit amount (e.g., "500")
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },

    /// Remove the spending limit
    Clear,

    /// Compare total spending against the limit
    Check,
}

pub enum LoopControl {
    Continue,
    Exit,
}

/// An interactive session: the ledger lives in memory until saved.
pub struct Shell<W: Write> {
    service: ExpenseService,
    out: W,
    unsaved: bool,
}

impl<W: Write> Shell<W> {
    pub fn new(service: ExpenseService, out: W) -> Self {
        Self {
            service,
            out,
            unsaved: false,
        }
    }

    pub fn service(&self) -> &ExpenseService {
        &self.service
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Run one command line. Failures are reported on the output and the
    /// session carries on; only errors writing the output are returned.
    pub fn execute_line(&mut self, line: &str) -> Result<LoopControl> {
        let tokens = match shell_words::split(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                writeln!(self.out, "Error: {}", err)?;
                return Ok(LoopControl::Continue);
            }
        };

        if tokens.is_empty() {
            return Ok(LoopControl::Continue);
        }

        let parsed = match ShellLine::try_parse_from(tokens) {
            Ok(parsed) => parsed,
            Err(err) => {
                // Covers `help` and `--help` as well as usage errors
                write!(self.out, "{}", err.render())?;
                return Ok(LoopControl::Continue);
            }
        };

        match self.dispatch(parsed.command) {
            Ok(control) => Ok(control),
            Err(err) => {
                writeln!(self.out, "Error: {}", err)?;
                Ok(LoopControl::Continue)
            }
        }
    }

    fn dispatch(&mut self, command: ShellCommand) -> Result<LoopControl> {
        match command {
            ShellCommand::Add {
                amount,
                category,
                description,
                date,
            } => {
                let mut input = ExpenseInput::new(amount, category);
                input.description = description;
                input.date = date;

                let result = self.service.add_expense(input)?;
                self.unsaved = true;
                output::write_added(&mut self.out, &result)?;
            }

            ShellCommand::Summary => {
                output::write_expense_table(&mut self.out, &self.service.summary())?;
                output::write_category_totals(&mut self.out, &self.service.category_totals())?;
            }

            ShellCommand::Category { category } => {
                let records = self.service.category_summary(&category);
                if records.is_empty() {
                    writeln!(self.out, "No expenses found for category '{}'.", category)?;
                } else {
                    output::write_expense_table(&mut self.out, &records)?;
                }
            }

            ShellCommand::Range { from, to } => {
                let start = validate_date(&from)?;
                let end = validate_date(&to)?;
                let records = self.service.date_range_summary(start, end)?;
                output::write_expense_table(&mut self.out, &records)?;
            }

            ShellCommand::Limit(LimitCommand::Set { amount }) => {
                let limit = self.service.set_limit(&amount)?;
                writeln!(self.out, "Spending limit set to {}", limit)?;
                if let Some(status) = self.service.check_limit().filter(|s| s.exceeded) {
                    output::write_limit_status(&mut self.out, &status)?;
                }
            }

            ShellCommand::Limit(LimitCommand::Clear) => match self.service.clear_limit() {
                Some(previous) => writeln!(self.out, "Spending limit {} cleared", previous)?,
                None => writeln!(self.out, "No spending limit set.")?,
            },

            ShellCommand::Limit(LimitCommand::Check) => match self.service.check_limit() {
                Some(status) => output::write_limit_status(&mut self.out, &status)?,
                None => writeln!(self.out, "No spending limit set.")?,
            },

            ShellCommand::Chart { format } => {
                output::write_chart(
                    &mut self.out,
                    &self.service.daily_totals(),
                    &format,
                    DEFAULT_BAR_WIDTH,
                )?;
            }

            ShellCommand::Save => {
                let count = self.service.save()?;
                self.unsaved = false;
                writeln!(
                    self.out,
                    "Saved {} expenses to {}",
                    count,
                    self.service.store().path().display()
                )?;
            }

            ShellCommand::Load => {
                let count = self.service.load()?;
                self.unsaved = false;
                writeln!(
                    self.out,
                    "Loaded {} expenses from {}",
                    count,
                    self.service.store().path().display()
                )?;
            }

            ShellCommand::Exit => {
                if self.unsaved {
                    writeln!(self.out, "Unsaved expenses were discarded.")?;
                }
                return Ok(LoopControl::Exit);
            }
        }

        Ok(LoopControl::Continue)
    }
}

/// Run the shell on a terminal with line editing and history.
pub fn run_interactive(service: ExpenseService) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut shell = Shell::new(service, io::stdout());

    writeln!(
        shell.out,
        "Expense shell on {}. Type 'help' for commands, 'load' to read saved expenses.",
        shell.service.store().path().display()
    )?;

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                editor.add_history_entry(trimmed).ok();

                if let LoopControl::Exit = shell.execute_line(trimmed)? {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                shell.execute_line("exit")?;
                break;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Ok(())
}

/// Run shell commands read line by line, without prompting.
pub fn run_script<R: BufRead, W: Write>(shell: &mut Shell<W>, input: R) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let LoopControl::Exit = shell.execute_line(trimmed)? {
            break;
        }
    }
    Ok(())
}
