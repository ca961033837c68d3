use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::domain::{format_date, parse_amount, parse_date, ExpenseRecord};

/// Header row written on save. On load the first row is skipped unchecked.
pub const HEADER: [&str; 4] = ["Date", "Amount", "Category", "Description"];

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("No data file found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Line {line}: invalid {field}: {message}")]
    Parse {
        line: u64,
        field: &'static str,
        message: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Write the header followed by one row per record, in the given order.
/// Returns the number of records written.
pub fn write_records<'a, W, I>(writer: W, records: I) -> Result<usize, StorageError>
where
    W: Write,
    I: IntoIterator<Item = &'a ExpenseRecord>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    let mut count = 0;
    for record in records {
        csv_writer.write_record([
            format_date(record.date()),
            record.amount().to_string(),
            record.category().to_string(),
            record.description().to_string(),
        ])?;
        count += 1;
    }

    csv_writer.flush()?;
    Ok(count)
}

/// Parse every data row into a record. Fails on the first malformed row,
/// so callers never see a partial result.
pub fn read_records<R: Read>(reader: R) -> Result<Vec<ExpenseRecord>, StorageError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let row = result?;
        // +2 for the header and 1-based numbering
        let line = row
            .position()
            .map(|p| p.line())
            .unwrap_or(index as u64 + 2);

        let date_str = row.get(0).unwrap_or("");
        let amount_str = row.get(1).unwrap_or("");
        let category = row.get(2).unwrap_or("");
        let description = row.get(3).unwrap_or("");

        let date = parse_date(date_str).map_err(|e| StorageError::Parse {
            line,
            field: "date",
            message: format!("'{}' ({})", date_str, e),
        })?;

        let amount = parse_amount(amount_str).map_err(|e| StorageError::Parse {
            line,
            field: "amount",
            message: format!("'{}' ({})", amount_str, e),
        })?;

        let record = ExpenseRecord::new(date, amount, category, description).map_err(|e| {
            StorageError::Parse {
                line,
                field: "category",
                message: e.to_string(),
            }
        })?;

        records.push(record);
    }

    Ok(records)
}

/// The flat file the ledger is persisted to.
#[derive(Debug, Clone)]
pub struct CsvStore {
    path: PathBuf,
}

impl CsvStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read every record from the file.
    pub fn load(&self) -> Result<Vec<ExpenseRecord>, StorageError> {
        let file = File::open(&self.path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => StorageError::NotFound(self.path.clone()),
            _ => StorageError::Io(e),
        })?;

        let records = read_records(file)?;
        debug!(path = %self.path.display(), count = records.len(), "loaded expenses");
        Ok(records)
    }

    /// Overwrite the file with the header and the given records.
    /// No backup of the previous contents is kept.
    pub fn save<'a, I>(&self, records: I) -> Result<usize, StorageError>
    where
        I: IntoIterator<Item = &'a ExpenseRecord>,
    {
        let file = File::create(&self.path)?;
        let count = write_records(file, records)?;
        debug!(path = %self.path.display(), count, "saved expenses");
        Ok(count)
    }
}
