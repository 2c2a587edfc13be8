use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// A calendar month (one sheet of the log book)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` when `month` is outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// Last calendar day, accounting for month length and leap years
    pub fn last_day(&self) -> NaiveDate {
        self.next()
            .first_day()
            .pred_opt()
            .unwrap_or(NaiveDate::MAX)
    }

    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Sheet name such as `Aug24`
    pub fn sheet_name(&self) -> String {
        self.first_day().format("%b%y").to_string()
    }

    /// Full month name such as `August`
    pub fn month_name(&self) -> String {
        self.first_day().format("%B").to_string()
    }

    /// Every month touching `[start, end]`, in order. Empty when `end < start`.
    pub fn range(start: NaiveDate, end: NaiveDate) -> Vec<YearMonth> {
        let last = Self::of(end);
        let mut months = Vec::new();
        if end < start {
            return months;
        }
        let mut current = Self::of(start);
        while current <= last {
            months.push(current);
            current = current.next();
        }
        months
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
