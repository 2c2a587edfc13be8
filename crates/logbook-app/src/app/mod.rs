//! Use cases

mod logbook_service;

pub use logbook_service::{GenerationReport, LogbookService, MonthLedgers};
