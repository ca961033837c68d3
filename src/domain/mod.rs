mod expense;
mod ledger;
mod money;
mod views;

pub use expense::*;
pub use ledger::*;
pub use money::*;
pub use views::*;
