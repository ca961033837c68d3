// Adapters that turn ledger data into output for other tools: data
// exports and the text rendering of the daily chart.

pub mod chart;
pub mod export;

pub use chart::*;
pub use export::*;
