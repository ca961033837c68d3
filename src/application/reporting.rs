use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{format_date, Amount, ExpenseRecord};

/// A flat, serializable listing of expense records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseReport {
    pub expenses: Vec<ExpenseRow>,
    pub count: usize,
    pub total: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseRow {
    /// `dd/mm/yyyy`
    pub date: String,
    pub amount: Amount,
    pub category: String,
    pub description: String,
}

impl From<&ExpenseRecord> for ExpenseRow {
    fn from(record: &ExpenseRecord) -> Self {
        Self {
            date: format_date(record.date()),
            amount: record.amount(),
            category: record.category().to_string(),
            description: record.description().to_string(),
        }
    }
}

impl ExpenseReport {
    pub fn from_records(records: &[&ExpenseRecord]) -> Self {
        Self {
            expenses: records.iter().map(|r| ExpenseRow::from(*r)).collect(),
            count: records.len(),
            total: records.iter().map(|r| r.amount()).sum(),
        }
    }
}

/// Per-date totals, ready to be handed to a plotting tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyTotalsReport {
    pub days: Vec<DailyTotal>,
    pub total: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    /// `dd/mm/yyyy`
    pub date: String,
    pub total: Amount,
}

impl From<&BTreeMap<NaiveDate, Amount>> for DailyTotalsReport {
    fn from(totals: &BTreeMap<NaiveDate, Amount>) -> Self {
        Self {
            days: totals
                .iter()
                .map(|(date, total)| DailyTotal {
                    date: format_date(*date),
                    total: *total,
                })
                .collect(),
            total: totals.values().sum(),
        }
    }
}
