use serde::Serialize;

use super::day::DayRecord;
use super::month::YearMonth;

/// Odometer and claim values for one workday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TripEntry {
    pub odometer_start: u64,
    pub odometer_end: u64,
    pub work_km: u64,
    pub personal_km: Option<u64>,
    pub rate_per_km: u64,
    pub amount: u64,
}

/// One row of the month: a classified day and, on workdays, its trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerLine {
    pub day: DayRecord,
    pub trip: Option<TripEntry>,
}

/// Month totals
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub month: YearMonth,
    pub sheet_name: String,
    pub starting_odometer: u64,
    pub ending_odometer: u64,
    pub work_distance: u64,
    pub personal_distance: u64,
    pub total_distance: u64,
    pub workdays: u32,
    pub weekend_days: u32,
    pub holidays: u32,
    pub total_cost: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthLedger {
    pub lines: Vec<LedgerLine>,
    pub summary: MonthSummary,
}

impl MonthLedger {
    pub fn trips(&self) -> impl Iterator<Item = &TripEntry> {
        self.lines.iter().filter_map(|line| line.trip.as_ref())
    }
}
