//! Odometer and claim accumulation over a classified month

use serde::Serialize;

use crate::model::{DayKind, DayRecord, LedgerLine, MonthLedger, MonthSummary, TripEntry, YearMonth};

/// Per-workday travel figures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TripRates {
    pub work_km: u64,
    /// Non-claimable kilometres, still added to the odometer
    pub personal_km: Option<u64>,
    pub rate_per_km: u64,
}

impl TripRates {
    pub fn daily_distance(&self) -> u64 {
        self.work_km.saturating_add(self.personal_km.unwrap_or(0))
    }

    pub fn daily_amount(&self) -> u64 {
        self.work_km.saturating_mul(self.rate_per_km)
    }
}

/// Walk the days of `month` from `starting_odometer`.
///
/// Only workdays advance the odometer and add to the claim. The summary's
/// `ending_odometer` is the starting value for the following month.
///
/// Arithmetic saturates at `u64::MAX`; `LogbookConfig::validate` keeps real
/// runs far below that.
pub fn accumulate(
    month: YearMonth,
    days: impl IntoIterator<Item = DayRecord>,
    starting_odometer: u64,
    rates: &TripRates,
) -> MonthLedger {
    let mut odometer = starting_odometer;
    let mut total_cost: u64 = 0;
    let mut workdays = 0;
    let mut weekend_days = 0;
    let mut holidays = 0;

    let lines: Vec<LedgerLine> = days
        .into_iter()
        .map(|day| {
            let trip = match day.kind {
                DayKind::Workday => {
                    workdays += 1;
                    let odometer_start = odometer;
                    odometer = odometer.saturating_add(rates.daily_distance());
                    let amount = rates.daily_amount();
                    total_cost = total_cost.saturating_add(amount);
                    Some(TripEntry {
                        odometer_start,
                        odometer_end: odometer,
                        work_km: rates.work_km,
                        personal_km: rates.personal_km,
                        rate_per_km: rates.rate_per_km,
                        amount,
                    })
                }
                DayKind::Weekend => {
                    weekend_days += 1;
                    None
                }
                DayKind::Holiday => {
                    holidays += 1;
                    None
                }
            };
            LedgerLine { day, trip }
        })
        .collect();

    let work_distance = rates.work_km.saturating_mul(u64::from(workdays));
    let summary = MonthSummary {
        month,
        sheet_name: month.sheet_name(),
        starting_odometer,
        ending_odometer: odometer,
        work_distance,
        personal_distance: (odometer - starting_odometer).saturating_sub(work_distance),
        total_distance: odometer - starting_odometer,
        workdays,
        weekend_days,
        holidays,
        total_cost,
    };

    MonthLedger { lines, summary }
}
