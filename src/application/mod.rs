// Application layer - session orchestration and input validation.
// Front ends (CLI, shell) go through ExpenseService and never touch
// the storage layer directly.

pub mod error;
pub mod input;
pub mod reporting;
pub mod service;

pub use error::*;
pub use input::*;
pub use reporting::*;
pub use service::*;
