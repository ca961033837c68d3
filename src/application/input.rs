//! Validation of raw user input.
//!
//! Front ends hand over whatever text the user typed; these functions turn
//! it into typed fields or an [`AppError::Validation`].

use chrono::NaiveDate;

use crate::domain::{
    parse_amount, parse_date, Amount, ExpenseRecord, ParseAmountError, DEFAULT_DESCRIPTION,
    MAX_AMOUNT,
};

use super::AppError;

/// Parse the amount field of a new expense.
pub fn validate_amount(raw: &str) -> Result<Amount, AppError> {
    parse_amount(raw).map_err(|e| match e {
        ParseAmountError::Empty => AppError::Validation("Amount is required".to_string()),
        ParseAmountError::InvalidFormat => AppError::Validation(format!(
            "'{}' is not a valid number for amount",
            raw.trim()
        )),
        ParseAmountError::Negative => {
            AppError::Validation("Amount cannot be negative".to_string())
        }
        ParseAmountError::TooLarge => {
            AppError::Validation(format!("Amount cannot exceed {}", MAX_AMOUNT))
        }
    })
}

/// Parse a spending limit. Same rules as an amount.
pub fn validate_limit(raw: &str) -> Result<Amount, AppError> {
    parse_amount(raw).map_err(|e| match e {
        ParseAmountError::Empty => AppError::Validation("Limit is required".to_string()),
        ParseAmountError::InvalidFormat => AppError::Validation(format!(
            "'{}' is not a valid number for limit",
            raw.trim()
        )),
        ParseAmountError::Negative => AppError::Validation("Limit cannot be negative".to_string()),
        ParseAmountError::TooLarge => {
            AppError::Validation(format!("Limit cannot exceed {}", MAX_AMOUNT))
        }
    })
}

pub fn validate_category(raw: &str) -> Result<String, AppError> {
    let category = raw.trim();
    if category.is_empty() {
        return Err(AppError::Validation("Category is required".to_string()));
    }
    Ok(category.to_string())
}

/// Blank or missing descriptions become [`DEFAULT_DESCRIPTION`].
pub fn normalize_description(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(description) if !description.is_empty() => description.to_string(),
        _ => DEFAULT_DESCRIPTION.to_string(),
    }
}

pub fn validate_date(raw: &str) -> Result<NaiveDate, AppError> {
    parse_date(raw).map_err(|_| {
        AppError::Validation(format!("Invalid date '{}'. Use dd/mm/yyyy", raw.trim()))
    })
}

/// Raw fields of a new expense, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct ExpenseInput {
    pub amount: String,
    pub category: String,
    pub description: Option<String>,
    /// Defaults to today when omitted
    pub date: Option<String>,
}

impl ExpenseInput {
    pub fn new(amount: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            category: category.into(),
            description: None,
            date: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Validate every field and build the record.
    pub fn into_record(self, today: NaiveDate) -> Result<ExpenseRecord, AppError> {
        let amount = validate_amount(&self.amount)?;
        let category = validate_category(&self.category)?;
        let date = match self.date.as_deref() {
            Some(raw) => validate_date(raw)?,
            None => today,
        };
        let description = normalize_description(self.description.as_deref());

        Ok(ExpenseRecord::new(date, amount, category, description)?)
    }
}
