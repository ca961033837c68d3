//! Read-only views over a [`Ledger`].
//!
//! Every view reads the ledger as it is at call time and allocates a fresh
//! result; none of them mutate the ledger.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;

use super::{format_date, Amount, ExpenseRecord, Ledger};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeError {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl fmt::Display for DateRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "start date {} is after end date {}",
            format_date(self.start),
            format_date(self.end)
        )
    }
}

impl std::error::Error for DateRangeError {}

/// Outcome of comparing total spending against a limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitStatus {
    pub total: Amount,
    pub limit: Amount,
    pub exceeded: bool,
}

impl LimitStatus {
    /// How much spending is above the limit, zero when within it.
    pub fn overage(&self) -> Amount {
        if self.exceeded {
            self.total - self.limit
        } else {
            Amount::ZERO
        }
    }
}

/// All records, in insertion order.
pub fn summary_view(ledger: &Ledger) -> Vec<&ExpenseRecord> {
    ledger.all().collect()
}

/// Records whose category exactly equals `category` (case-sensitive).
pub fn category_summary<'a>(ledger: &'a Ledger, category: &str) -> Vec<&'a ExpenseRecord> {
    ledger.all().filter(|r| r.category() == category).collect()
}

/// Records dated within `[start, end]`, inclusive, in insertion order.
pub fn date_range_summary(
    ledger: &Ledger,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<&ExpenseRecord>, DateRangeError> {
    if start > end {
        return Err(DateRangeError { start, end });
    }

    Ok(ledger
        .all()
        .filter(|r| r.date() >= start && r.date() <= end)
        .collect())
}

/// Sum of amounts per distinct date, iterated in chronological order.
/// Dates without records are absent, not zero.
pub fn daily_totals(ledger: &Ledger) -> BTreeMap<NaiveDate, Amount> {
    let mut totals: BTreeMap<NaiveDate, Amount> = BTreeMap::new();

    for record in ledger {
        *totals.entry(record.date()).or_insert(Amount::ZERO) += record.amount();
    }

    totals
}

/// Sum of amounts per category, in the order categories first appear.
pub fn category_totals(ledger: &Ledger) -> Vec<(String, Amount)> {
    ledger
        .categories()
        .into_iter()
        .map(|category| {
            let total = category_summary(ledger, category)
                .iter()
                .map(|r| r.amount())
                .sum();
            (category.to_string(), total)
        })
        .collect()
}

/// Compare the sum of every amount in the ledger against `limit`.
pub fn limit_check(ledger: &Ledger, limit: Amount) -> LimitStatus {
    let total = ledger.total();
    LimitStatus {
        total,
        limit,
        exceeded: total > limit,
    }
}
