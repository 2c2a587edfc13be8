use chrono::NaiveDate;
use serde::Serialize;

/// Classification of a calendar day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DayKind {
    Workday,
    Weekend,
    Holiday,
}

impl DayKind {
    pub fn is_workday(&self) -> bool {
        matches!(self, DayKind::Workday)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    pub kind: DayKind,
}

impl DayRecord {
    /// Date as written in the trip table (`DD/MM/YY`)
    pub fn display_date(&self) -> String {
        self.date.format("%d/%m/%y").to_string()
    }
}
