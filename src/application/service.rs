use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use tracing::{debug, info, warn};

use crate::domain::{
    category_summary, category_totals, daily_totals, date_range_summary, limit_check,
    summary_view, Amount, ExpenseRecord, Ledger, LimitStatus,
};
use crate::storage::CsvStore;

use super::{validate_limit, AppError, ExpenseInput};

/// Application service holding one session: the ledger, the optional
/// spending limit and the file they are persisted to.
/// This is the primary interface for any client (CLI, shell, GUI, etc.).
pub struct ExpenseService {
    ledger: Ledger,
    limit: Option<Amount>,
    store: CsvStore,
}

/// Result of adding an expense
#[derive(Debug)]
pub struct AddResult {
    pub record: ExpenseRecord,
    /// Present when a spending limit is set
    pub limit_status: Option<LimitStatus>,
}

impl ExpenseService {
    /// Start a session with an empty ledger.
    pub fn new(store: CsvStore) -> Self {
        Self {
            ledger: Ledger::new(),
            limit: None,
            store,
        }
    }

    /// Start a session from the store's current contents.
    /// A missing file is not an error here: the session starts empty.
    pub fn open(store: CsvStore) -> Result<Self, AppError> {
        let mut service = Self::new(store);
        match service.load() {
            Ok(_) => Ok(service),
            Err(AppError::FileNotFound(path)) => {
                debug!(path = %path.display(), "no data file yet, starting empty");
                Ok(service)
            }
            Err(e) => Err(e),
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn store(&self) -> &CsvStore {
        &self.store
    }

    // ========================
    // Ledger operations
    // ========================

    /// Validate raw input and add it as a new expense dated today (unless
    /// the input carries its own date).
    pub fn add_expense(&mut self, input: ExpenseInput) -> Result<AddResult, AppError> {
        self.add_expense_on(input, Local::now().date_naive())
    }

    /// Same as [`add_expense`](Self::add_expense) with an explicit "today".
    pub fn add_expense_on(
        &mut self,
        input: ExpenseInput,
        today: NaiveDate,
    ) -> Result<AddResult, AppError> {
        let record = input.into_record(today)?;
        self.append(record.clone());

        let limit_status = self.check_limit();
        if let Some(status) = limit_status.filter(|s| s.exceeded) {
            warn!(
                total = %status.total,
                limit = %status.limit,
                "spending limit exceeded"
            );
        }

        Ok(AddResult {
            record,
            limit_status,
        })
    }

    /// Append an already validated record.
    pub fn append(&mut self, record: ExpenseRecord) {
        debug!(
            date = %record.date(),
            amount = %record.amount(),
            category = record.category(),
            "appending expense"
        );
        self.ledger.append(record);
    }

    /// Replace the ledger with the contents of the store.
    /// On any failure the current ledger is left as it was.
    pub fn load(&mut self) -> Result<usize, AppError> {
        let records = self.store.load()?;
        let count = records.len();
        self.ledger.replace_all(records);
        info!(path = %self.store.path().display(), count, "ledger loaded");
        Ok(count)
    }

    /// Overwrite the store with the current ledger.
    pub fn save(&self) -> Result<usize, AppError> {
        let count = self.store.save(self.ledger.all())?;
        info!(path = %self.store.path().display(), count, "ledger saved");
        Ok(count)
    }

    // ========================
    // Spending limit
    // ========================

    /// Parse and set the spending limit. The last value set wins.
    pub fn set_limit(&mut self, raw: &str) -> Result<Amount, AppError> {
        let limit = validate_limit(raw)?;
        self.limit = Some(limit);
        debug!(%limit, "spending limit set");
        Ok(limit)
    }

    /// Remove the spending limit, returning the previous one.
    pub fn clear_limit(&mut self) -> Option<Amount> {
        self.limit.take()
    }

    pub fn limit(&self) -> Option<Amount> {
        self.limit
    }

    /// Compare the current total against the limit, if one is set.
    pub fn check_limit(&self) -> Option<LimitStatus> {
        self.limit.map(|limit| limit_check(&self.ledger, limit))
    }

    // ========================
    // Views
    // ========================

    pub fn summary(&self) -> Vec<&ExpenseRecord> {
        summary_view(&self.ledger)
    }

    pub fn category_summary(&self, category: &str) -> Vec<&ExpenseRecord> {
        category_summary(&self.ledger, category)
    }

    pub fn date_range_summary(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<&ExpenseRecord>, AppError> {
        Ok(date_range_summary(&self.ledger, start, end)?)
    }

    pub fn daily_totals(&self) -> BTreeMap<NaiveDate, Amount> {
        daily_totals(&self.ledger)
    }

    pub fn category_totals(&self) -> Vec<(String, Amount)> {
        category_totals(&self.ledger)
    }
}
