//! Domain model types

pub mod day;
pub mod ledger;
pub mod month;

pub use day::{DayKind, DayRecord};
pub use ledger::{LedgerLine, MonthLedger, MonthSummary, TripEntry};
pub use month::YearMonth;
