// Storage layer - the flat CSV file the ledger is persisted to.

mod csv_file;

pub use csv_file::*;
