//! Day classification for a month of the log book

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeSet;

use crate::model::{DayKind, DayRecord, YearMonth};

/// Weekly rest days
pub const REST_DAYS: [Weekday; 2] = [Weekday::Sat, Weekday::Sun];

/// Classifies days against the weekly rest days and a set of holidays
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    holidays: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    pub fn new(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Holidays take precedence over weekends
    pub fn classify(&self, date: NaiveDate) -> DayKind {
        if self.is_holiday(date) {
            DayKind::Holiday
        } else if REST_DAYS.contains(&date.weekday()) {
            DayKind::Weekend
        } else {
            DayKind::Workday
        }
    }

    /// Every day of `month`, first to last, with its classification
    pub fn month_days(&self, month: YearMonth) -> impl Iterator<Item = DayRecord> + '_ {
        std::iter::successors(Some(month.first_day()), |d| d.succ_opt())
            .take_while(move |d| month.contains(*d))
            .map(move |date| DayRecord {
                date,
                kind: self.classify(date),
            })
    }
}
