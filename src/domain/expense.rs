use chrono::NaiveDate;
use thiserror::Error;

use super::Amount;

/// Day/month/year, two-digit day and month, four-digit year.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Description used when the user leaves the field blank.
pub const DEFAULT_DESCRIPTION: &str = "No description provided";

/// Format a date the way it is shown and stored: `dd/mm/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a `dd/mm/yyyy` date.
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
}

/// A single expense entry.
/// Records are immutable: to change one, remove it and add a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseRecord {
    date: NaiveDate,
    /// Always non-negative
    amount: Amount,
    /// Never empty
    category: String,
    description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("amount cannot be negative: {0}")]
    NegativeAmount(Amount),

    #[error("category cannot be empty")]
    EmptyCategory,
}

impl ExpenseRecord {
    pub fn new(
        date: NaiveDate,
        amount: Amount,
        category: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, RecordError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(RecordError::NegativeAmount(amount));
        }

        let category = category.into();
        if category.trim().is_empty() {
            return Err(RecordError::EmptyCategory);
        }

        Ok(Self {
            date,
            amount,
            category,
            description: description.into(),
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
