//! Log book generation use case
//!
//! Walks the configured months in order, threading the odometer reading from
//! one month into the next, and appends one worksheet per month.

use logbook_domain::model::{MonthLedger, MonthSummary, YearMonth};
use logbook_domain::service::{accumulate, HolidayCalendar, TripRates};
use logbook_types::{LogbookConfig, Result};
use rust_xlsxwriter::Workbook;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use crate::export::{assemble_sheet, new_workbook, save_workbook, write_sheet};

/// Outcome of a generation run
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub output_path: PathBuf,
    pub bytes_written: usize,
    pub months: Vec<MonthSummary>,
}

impl GenerationReport {
    pub fn total_cost(&self) -> u64 {
        self.months.iter().map(|m| m.total_cost).sum()
    }

    pub fn final_odometer(&self) -> Option<u64> {
        self.months.last().map(|m| m.ending_odometer)
    }
}

/// Month-by-month ledgers with the odometer carried forward
pub struct MonthLedgers<'a> {
    calendar: &'a HolidayCalendar,
    rates: TripRates,
    months: std::vec::IntoIter<YearMonth>,
    odometer: u64,
}

impl Iterator for MonthLedgers<'_> {
    type Item = MonthLedger;

    fn next(&mut self) -> Option<MonthLedger> {
        let month = self.months.next()?;
        let ledger = accumulate(
            month,
            self.calendar.month_days(month),
            self.odometer,
            &self.rates,
        );
        self.odometer = ledger.summary.ending_odometer;
        Some(ledger)
    }
}

pub struct LogbookService<'a> {
    config: &'a LogbookConfig,
    calendar: HolidayCalendar,
    rates: TripRates,
}

impl<'a> LogbookService<'a> {
    /// Fails when the configured end date precedes the start date
    pub fn new(config: &'a LogbookConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            calendar: HolidayCalendar::new(config.holidays.iter().copied()),
            rates: TripRates {
                work_km: config.work_related_km,
                personal_km: config.personal_travel_km,
                rate_per_km: config.inr_per_km,
            },
        })
    }

    pub fn months(&self) -> Vec<YearMonth> {
        YearMonth::range(self.config.start_date, self.config.end_date)
    }

    pub fn ledgers(&self) -> MonthLedgers<'_> {
        MonthLedgers {
            calendar: &self.calendar,
            rates: self.rates,
            months: self.months().into_iter(),
            odometer: self.config.initial_odometer,
        }
    }

    pub fn summaries(&self) -> Vec<MonthSummary> {
        self.ledgers().map(|ledger| ledger.summary).collect()
    }

    /// Build every month sheet into a new workbook
    pub fn build_workbook(&self) -> Result<(Workbook, Vec<MonthSummary>)> {
        let mut workbook = new_workbook(self.config)?;
        let mut summaries = Vec::new();

        for ledger in self.ledgers() {
            info!("Creating sheet for {}", ledger.summary.sheet_name);
            let layout = assemble_sheet(&ledger, self.config);
            write_sheet(workbook.add_worksheet(), &layout)?;
            summaries.push(ledger.summary);
        }

        Ok((workbook, summaries))
    }

    /// Build the workbook and save it to the configured output path
    pub fn generate(&self) -> Result<GenerationReport> {
        info!("Starting workbook generation");
        let (mut workbook, months) = self.build_workbook()?;

        let output_path = self.config.output_file_path.clone();
        let bytes_written = save_workbook(&mut workbook, &output_path)?;
        info!("Workbook saved to {}", output_path.display());

        Ok(GenerationReport {
            output_path,
            bytes_written,
            months,
        })
    }
}
