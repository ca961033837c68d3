use std::collections::BTreeMap;
use std::io::Write;

use anyhow::Result;
use chrono::NaiveDate;

use crate::application::{DailyTotalsReport, ExpenseService};
use crate::domain::{format_date, Amount};

/// Exporter for handing the daily totals to external plotting tools.
pub struct Exporter<'a> {
    service: &'a ExpenseService,
}

impl<'a> Exporter<'a> {
    pub fn new(service: &'a ExpenseService) -> Self {
        Self { service }
    }

    /// Export per-date totals as CSV: one row per distinct date.
    pub fn export_daily_totals_csv<W: Write>(&self, writer: W) -> Result<usize> {
        write_daily_totals_csv(writer, &self.service.daily_totals())
    }

    /// Export per-date totals as a JSON document.
    pub fn export_daily_totals_json<W: Write>(&self, writer: W) -> Result<DailyTotalsReport> {
        write_daily_totals_json(writer, &self.service.daily_totals())
    }
}

/// Write a `Date,Total` header and one row per date.
pub fn write_daily_totals_csv<W: Write>(
    writer: W,
    totals: &BTreeMap<NaiveDate, Amount>,
) -> Result<usize> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer.write_record(["Date", "Total"])?;

    for (date, total) in totals {
        csv_writer.write_record([format_date(*date), total.to_string()])?;
    }

    csv_writer.flush()?;
    Ok(totals.len())
}

pub fn write_daily_totals_json<W: Write>(
    mut writer: W,
    totals: &BTreeMap<NaiveDate, Amount>,
) -> Result<DailyTotalsReport> {
    let report = DailyTotalsReport::from(totals);

    serde_json::to_writer_pretty(&mut writer, &report)?;
    writeln!(writer)?;
    writer.flush()?;

    Ok(report)
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::application::ExpenseInput;
    use crate::storage::CsvStore;

    fn sample_service(temp: &TempDir) -> ExpenseService {
        let mut service = ExpenseService::new(CsvStore::new(temp.path().join("e.csv")));
        let today = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for (amount, category, date) in [
            ("10", "food", "01/01/2024"),
            ("5", "food", "01/01/2024"),
            ("20", "rent", "02/01/2024"),
        ] {
            service
                .add_expense_on(ExpenseInput::new(amount, category).with_date(date), today)
                .unwrap();
        }
        service
    }

    #[test]
    fn test_export_daily_totals_csv() {
        let temp = TempDir::new().unwrap();
        let service = sample_service(&temp);

        let mut out = Vec::new();
        let count = Exporter::new(&service)
            .export_daily_totals_csv(&mut out)
            .unwrap();

        assert_eq!(count, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Date,Total\n01/01/2024,15\n02/01/2024,20\n"
        );
    }

    #[test]
    fn test_export_daily_totals_json() {
        let temp = TempDir::new().unwrap();
        let service = sample_service(&temp);

        let mut out = Vec::new();
        let report = Exporter::new(&service)
            .export_daily_totals_json(&mut out)
            .unwrap();

        assert_eq!(report.days.len(), 2);
        let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["days"][0]["date"], "01/01/2024");
        assert_eq!(parsed["days"][0]["total"], "15");
    }
}
