use super::{Amount, ExpenseRecord};

/// The ordered collection of expense records for a session.
/// Insertion order is display order; duplicates are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    records: Vec<ExpenseRecord>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record at the end of the ledger.
    pub fn append(&mut self, record: ExpenseRecord) {
        self.records.push(record);
    }

    /// Swap the entire contents of the ledger. Previous records are discarded.
    pub fn replace_all(&mut self, records: Vec<ExpenseRecord>) {
        self.records = records;
    }

    /// Iterate the records in insertion order.
    /// Can be called again at any time to restart from the first record.
    pub fn all(&self) -> std::slice::Iter<'_, ExpenseRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of every amount currently in the ledger.
    pub fn total(&self) -> Amount {
        self.records.iter().map(ExpenseRecord::amount).sum()
    }

    /// Distinct categories, in the order they first appear.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for record in &self.records {
            if !categories.contains(&record.category()) {
                categories.push(record.category());
            }
        }
        categories
    }
}

impl FromIterator<ExpenseRecord> for Ledger {
    fn from_iter<I: IntoIterator<Item = ExpenseRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a ExpenseRecord;
    type IntoIter = std::slice::Iter<'a, ExpenseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.all()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    use super::*;

    fn make_record(day: u32, amount: Amount, category: &str) -> ExpenseRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, day).unwrap();
        ExpenseRecord::new(date, amount, category, "").unwrap()
    }

    #[test]
    fn test_append_adds_to_end() {
        let mut ledger = Ledger::new();
        ledger.append(make_record(1, dec!(10), "food"));

        let record = make_record(2, dec!(5), "rent");
        ledger.append(record.clone());

        assert_eq!(ledger.len(), 2);
        assert_eq!(ledger.all().last(), Some(&record));
    }

    #[test]
    fn test_all_is_restartable() {
        let ledger: Ledger = vec![make_record(1, dec!(1), "a"), make_record(2, dec!(2), "b")]
            .into_iter()
            .collect();

        let first: Vec<_> = ledger.all().collect();
        let second: Vec<_> = ledger.all().collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut ledger = Ledger::new();
        let record = make_record(1, dec!(10), "food");
        ledger.append(record.clone());
        ledger.append(record);

        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_replace_all_discards_previous() {
        let mut ledger = Ledger::new();
        ledger.append(make_record(1, dec!(10), "food"));
        ledger.append(make_record(2, dec!(20), "food"));

        ledger.replace_all(vec![make_record(3, dec!(7), "travel")]);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.total(), dec!(7));
        assert_eq!(ledger.categories(), vec!["travel"]);
    }

    #[test]
    fn test_total_empty() {
        assert_eq!(Ledger::new().total(), dec!(0));
        assert!(Ledger::new().is_empty());
    }

    #[test]
    fn test_categories_first_seen_order() {
        let ledger: Ledger = vec![
            make_record(1, dec!(1), "rent"),
            make_record(1, dec!(1), "food"),
            make_record(2, dec!(1), "rent"),
        ]
        .into_iter()
        .collect();

        assert_eq!(ledger.categories(), vec!["rent", "food"]);
    }
}
