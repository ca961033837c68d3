use std::collections::BTreeMap;
use std::io::Write;

use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::application::{AddResult, ExpenseReport};
use crate::domain::{format_amount, format_date, Amount, ExpenseRecord, LimitStatus};
use crate::io::{render_bar_chart, write_daily_totals_csv, write_daily_totals_json};
use crate::storage::write_records;

/// Print records in the requested format: table, json or csv.
pub fn write_expenses(out: &mut dyn Write, records: &[&ExpenseRecord], format: &str) -> Result<()> {
    match format {
        "json" => {
            let report = ExpenseReport::from_records(records);
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        "csv" => {
            write_records(&mut *out, records.iter().copied())?;
        }
        "table" => write_expense_table(out, records)?,
        other => bail!("Invalid format '{}'. Valid formats: table, json, csv", other),
    }
    Ok(())
}

pub fn write_expense_table(out: &mut dyn Write, records: &[&ExpenseRecord]) -> Result<()> {
    if records.is_empty() {
        writeln!(out, "No expenses found.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<10}  {:>12}  {:<16}  {}",
        "DATE", "AMOUNT", "CATEGORY", "DESCRIPTION"
    )?;
    writeln!(out, "{}", "-".repeat(70))?;

    for record in records {
        writeln!(
            out,
            "{:<10}  {:>12}  {:<16}  {}",
            format_date(record.date()),
            format_amount(record.amount()),
            truncate(record.category(), 16),
            truncate(record.description(), 26)
        )?;
    }

    let total: Amount = records.iter().map(|r| r.amount()).sum();
    writeln!(out, "{}", "-".repeat(70))?;
    writeln!(
        out,
        "{:<10}  {:>12}  ({} expenses)",
        "TOTAL",
        format_amount(total),
        records.len()
    )?;
    Ok(())
}

pub fn write_category_totals(out: &mut dyn Write, totals: &[(String, Amount)]) -> Result<()> {
    if totals.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "By category:")?;
    for (category, total) in totals {
        writeln!(
            out,
            "  {:<20} {:>12}",
            truncate(category, 20),
            format_amount(*total)
        )?;
    }
    Ok(())
}

pub fn write_limit_status(out: &mut dyn Write, status: &LimitStatus) -> Result<()> {
    if status.exceeded {
        writeln!(
            out,
            "Warning: spending limit exceeded! Total {} is over the limit of {} by {}",
            format_amount(status.total),
            format_amount(status.limit),
            format_amount(status.overage())
        )?;
    } else {
        writeln!(
            out,
            "Within limit: total {} of {} ({} left)",
            format_amount(status.total),
            format_amount(status.limit),
            format_amount(status.limit - status.total)
        )?;
    }
    Ok(())
}

pub fn write_added(out: &mut dyn Write, result: &AddResult) -> Result<()> {
    let record = &result.record;
    writeln!(
        out,
        "Added expense: {} {} [{}] {}",
        format_date(record.date()),
        format_amount(record.amount()),
        record.category(),
        record.description()
    )?;

    if let Some(status) = result.limit_status.filter(|s| s.exceeded) {
        write_limit_status(out, &status)?;
    }
    Ok(())
}

/// Print the per-date totals: a text bar chart, or the raw data as json/csv.
pub fn write_chart(
    out: &mut dyn Write,
    totals: &BTreeMap<NaiveDate, Amount>,
    format: &str,
    width: usize,
) -> Result<()> {
    match format {
        "json" => {
            write_daily_totals_json(&mut *out, totals)?;
        }
        "csv" => {
            write_daily_totals_csv(&mut *out, totals)?;
        }
        "table" => {
            if totals.is_empty() {
                writeln!(out, "No expenses to show in the chart.")?;
            } else {
                write!(out, "{}", render_bar_chart(totals, width))?;
            }
        }
        other => bail!("Invalid format '{}'. Valid formats: table, json, csv", other),
    }
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn record(day: u32, amount: Amount, category: &str) -> ExpenseRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        ExpenseRecord::new(date, amount, category, "note").unwrap()
    }

    fn render(f: impl FnOnce(&mut dyn Write) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long category", 10), "a very ...");
        assert_eq!(truncate("caffè e cornetto", 8), "caffè...");
    }

    #[test]
    fn test_expense_table_total() {
        let a = record(1, dec!(10), "food");
        let b = record(2, dec!(2.5), "travel");

        let text = render(|out| write_expense_table(out, &[&a, &b]));

        assert!(text.contains("01/01/2024"));
        assert!(text.contains("travel"));
        assert!(text.contains("12.50"));
        assert!(text.contains("(2 expenses)"));
    }

    #[test]
    fn test_expense_table_empty() {
        let text = render(|out| write_expense_table(out, &[]));
        assert_eq!(text, "No expenses found.\n");
    }

    #[test]
    fn test_write_expenses_csv_uses_file_format() {
        let a = record(1, dec!(10), "food");
        let text = render(|out| write_expenses(out, &[&a], "csv"));
        assert_eq!(text, "Date,Amount,Category,Description\n01/01/2024,10,food,note\n");
    }

    #[test]
    fn test_write_expenses_invalid_format() {
        let mut out = Vec::new();
        assert!(write_expenses(&mut out, &[], "xml").is_err());
    }

    #[test]
    fn test_limit_status_messages() {
        let exceeded = LimitStatus {
            total: dec!(120),
            limit: dec!(100),
            exceeded: true,
        };
        let text = render(|out| write_limit_status(out, &exceeded));
        assert!(text.starts_with("Warning: spending limit exceeded!"));
        assert!(text.contains("by 20.00"));

        let within = LimitStatus {
            total: dec!(80),
            limit: dec!(100),
            exceeded: false,
        };
        let text = render(|out| write_limit_status(out, &within));
        assert!(text.contains("(20.00 left)"));
    }

    #[test]
    fn test_chart_empty() {
        let text = render(|out| write_chart(out, &BTreeMap::new(), "table", 10));
        assert_eq!(text, "No expenses to show in the chart.\n");
    }

    #[test]
    fn test_chart_csv() {
        let mut totals = BTreeMap::new();
        totals.insert(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(), dec!(15));
        let text = render(|out| write_chart(out, &totals, "csv", 10));
        assert_eq!(text, "Date,Total\n01/01/2024,15\n");
    }

    #[test]
    fn test_chart_json() {
        let mut totals = BTreeMap::new();
        totals.insert(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(), dec!(20));
        let text = render(|out| write_chart(out, &totals, "json", 10));

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed["days"][0]["date"], "02/01/2024");
        assert_eq!(parsed["total"], "20");
    }
}
