// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use chrono::NaiveDate;
use spesa::application::{ExpenseInput, ExpenseService};
use spesa::storage::CsvStore;
use tempfile::TempDir;

/// Helper to create a service backed by a file in a temporary directory.
/// The file itself does not exist until the first save.
pub fn test_service() -> Result<(ExpenseService, TempDir)> {
    let temp_dir = TempDir::new()?;
    let store = CsvStore::new(temp_dir.path().join("expenses.csv"));
    Ok((ExpenseService::new(store), temp_dir))
}

/// Helper to parse a `dd/mm/yyyy` date string.
pub fn parse_date(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%d/%m/%Y").unwrap()
}

/// The "today" used when recording fixtures.
pub fn today() -> NaiveDate {
    parse_date("29/09/2024")
}

/// Record an expense on a given date.
pub fn add(
    service: &mut ExpenseService,
    date: &str,
    amount: &str,
    category: &str,
    description: &str,
) -> Result<()> {
    let input = ExpenseInput::new(amount, category)
        .with_date(date)
        .with_description(description);
    service.add_expense_on(input, today())?;
    Ok(())
}

/// Test fixture: a few weeks of typical spending.
pub struct StandardExpenses;

impl StandardExpenses {
    /// food: 10 + 5 on 01/01, rent: 20 on 02/01
    pub fn create_basic(service: &mut ExpenseService) -> Result<()> {
        add(service, "01/01/2024", "10", "food", "Groceries")?;
        add(service, "01/01/2024", "5", "food", "Bakery")?;
        add(service, "02/01/2024", "20", "rent", "Parking spot")?;
        Ok(())
    }

    /// Spread over January and February, out of chronological order.
    pub fn create_two_months(service: &mut ExpenseService) -> Result<()> {
        add(service, "15/01/2024", "42.50", "food", "Weekly shop")?;
        add(service, "03/02/2024", "12", "transport", "Train ticket")?;
        add(service, "01/01/2024", "800", "rent", "January rent")?;
        add(service, "31/01/2024", "7.25", "food", "Lunch")?;
        add(service, "01/02/2024", "800", "rent", "February rent")?;
        Ok(())
    }
}
