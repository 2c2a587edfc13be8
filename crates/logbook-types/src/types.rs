//! Resolved configuration for a log book run

use crate::error::ConfigError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Largest integer an xlsx number cell (an IEEE double) stores exactly
pub const MAX_EXACT_FIGURE: u64 = 1 << 53;

/// Upper bound on the days in one month sheet
const MAX_DAYS_PER_MONTH: u64 = 31;

/// Employee details printed in the BASIC DETAILS block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    pub name: String,
    pub id: String,
    pub department: String,
    pub manager: String,
}

impl Default for Employee {
    fn default() -> Self {
        Self {
            name: "Ashish Kumar".to_string(),
            id: "BLINKIN065".to_string(),
            department: "Technology".to_string(),
            manager: "Ajay Singh".to_string(),
        }
    }
}

/// Vehicle details printed in the VEHICLE DETAILS block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    pub make: String,
    pub model: String,
    pub year: String,
    pub registration: String,
    pub engine_size: String,
}

impl Default for Vehicle {
    fn default() -> Self {
        Self {
            make: "Hyundai".to_string(),
            model: "Xcent".to_string(),
            year: "2018".to_string(),
            registration: "Delhi".to_string(),
            engine_size: "1199 CC".to_string(),
        }
    }
}

/// Fully resolved, immutable configuration.
///
/// Built once by the config loader and shared by reference with every
/// component of the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogbookConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_odometer: u64,
    pub inr_per_km: u64,
    pub work_related_km: u64,
    /// Personal kilometres driven on each workday, blank in the sheet when unset
    pub personal_travel_km: Option<u64>,
    pub trip_purpose: String,
    pub client_name: String,
    pub is_work_travel: String,
    pub company_name: String,
    /// Label override for the "Financial year" cell
    pub financial_year: Option<String>,
    pub employee: Employee,
    pub vehicle: Vehicle,
    pub holidays: BTreeSet<NaiveDate>,
    pub output_file_path: PathBuf,
}

impl LogbookConfig {
    /// Check the start/end ordering, and that every odometer reading and
    /// claim amount the period can produce fits in a spreadsheet number
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.end_date < self.start_date {
            return Err(ConfigError::InvalidRange {
                start: self.start_date,
                end: self.end_date,
            });
        }

        let days = self.month_count().saturating_mul(MAX_DAYS_PER_MONTH);
        let final_odometer = self
            .work_related_km
            .checked_add(self.personal_travel_km.unwrap_or(0))
            .and_then(|daily| daily.checked_mul(days))
            .and_then(|driven| driven.checked_add(self.initial_odometer));
        check_figure("odometer reading", final_odometer)?;

        let total_claim = self
            .work_related_km
            .checked_mul(self.inr_per_km)
            .and_then(|daily| daily.checked_mul(days));
        check_figure("claim amount", total_claim)?;

        Ok(())
    }

    /// Number of month sheets between the start and end dates, inclusive
    fn month_count(&self) -> u64 {
        let months = (i64::from(self.end_date.year()) - i64::from(self.start_date.year())) * 12
            + i64::from(self.end_date.month())
            - i64::from(self.start_date.month())
            + 1;
        u64::try_from(months).unwrap_or(0)
    }

    /// Label for the "Financial year" cell, e.g. `2024-25`
    pub fn financial_year_label(&self) -> String {
        if let Some(ref label) = self.financial_year {
            return label.clone();
        }
        let year = self.start_date.year();
        format!("{}-{:02}", year, (year + 1).rem_euclid(100))
    }
}

fn check_figure(what: &'static str, value: Option<u64>) -> Result<(), ConfigError> {
    match value {
        Some(v) if v <= MAX_EXACT_FIGURE => Ok(()),
        _ => Err(ConfigError::FigureTooLarge {
            what,
            limit: MAX_EXACT_FIGURE,
        }),
    }
}

impl std::fmt::Display for LogbookConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Fuel Log Book Configuration")?;
        writeln!(f, "===========================")?;
        writeln!(f)?;
        writeln!(f, "Period:           {} .. {}", self.start_date, self.end_date)?;
        writeln!(f, "Financial year:   {}", self.financial_year_label())?;
        writeln!(f, "Initial odometer: {}", self.initial_odometer)?;
        writeln!(f, "Work km per day:  {}", self.work_related_km)?;
        writeln!(
            f,
            "Personal km/day:  {}",
            self.personal_travel_km
                .map(|km| km.to_string())
                .unwrap_or_else(|| "(none)".to_string())
        )?;
        writeln!(f, "INR per km:       {}", self.inr_per_km)?;
        writeln!(f, "Trip purpose:     {}", self.trip_purpose)?;
        writeln!(f, "Client:           {}", self.client_name)?;
        writeln!(f, "Company:          {}", self.company_name)?;
        writeln!(f)?;
        writeln!(
            f,
            "Employee:         {} ({}), {} / {}",
            self.employee.name, self.employee.id, self.employee.department, self.employee.manager
        )?;
        writeln!(
            f,
            "Vehicle:          {} {} {} ({}, {})",
            self.vehicle.make,
            self.vehicle.model,
            self.vehicle.year,
            self.vehicle.registration,
            self.vehicle.engine_size
        )?;
        if self.holidays.is_empty() {
            writeln!(f, "Holidays:         (none)")?;
        } else {
            let holidays: Vec<String> = self.holidays.iter().map(|d| d.to_string()).collect();
            writeln!(f, "Holidays:         {}", holidays.join(", "))?;
        }
        writeln!(f)?;
        writeln!(f, "Output file:      {}", self.output_file_path.display())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(start: NaiveDate, end: NaiveDate) -> LogbookConfig {
        LogbookConfig {
            start_date: start,
            end_date: end,
            initial_odometer: 0,
            inr_per_km: 10,
            work_related_km: 100,
            personal_travel_km: None,
            trip_purpose: "Official".to_string(),
            client_name: "Client".to_string(),
            is_work_travel: "Y".to_string(),
            company_name: "Company".to_string(),
            financial_year: None,
            employee: Employee::default(),
            vehicle: Vehicle::default(),
            holidays: BTreeSet::new(),
            output_file_path: PathBuf::from("out.xlsx"),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_rejects_reversed_range() {
        let cfg = config(date(2025, 3, 31), date(2024, 8, 1));
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_validate_accepts_single_day() {
        let cfg = config(date(2024, 8, 1), date(2024, 8, 1));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unrepresentable_odometer() {
        let mut cfg = config(date(2024, 8, 1), date(2025, 3, 31));
        cfg.initial_odometer = MAX_EXACT_FIGURE;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::FigureTooLarge {
                what: "odometer reading",
                ..
            })
        ));

        let mut cfg = config(date(2024, 8, 1), date(2025, 3, 31));
        cfg.work_related_km = u64::MAX / 2;
        cfg.personal_travel_km = Some(u64::MAX / 2);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::FigureTooLarge { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unrepresentable_claim() {
        let mut cfg = config(date(2024, 8, 1), date(2024, 8, 31));
        cfg.work_related_km = 1_000_000;
        cfg.inr_per_km = 1_000_000_000;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::FigureTooLarge {
                what: "claim amount",
                ..
            })
        ));
    }

    #[test]
    fn test_validate_accepts_large_realistic_figures() {
        let mut cfg = config(date(2024, 4, 1), date(2034, 3, 31));
        cfg.initial_odometer = 999_999;
        cfg.work_related_km = 500;
        cfg.inr_per_km = 100;
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_financial_year_label_from_start_date() {
        let cfg = config(date(2024, 8, 1), date(2025, 3, 31));
        assert_eq!(cfg.financial_year_label(), "2024-25");

        let cfg = config(date(2099, 4, 1), date(2100, 3, 31));
        assert_eq!(cfg.financial_year_label(), "2099-00");
    }

    #[test]
    fn test_financial_year_label_override() {
        let mut cfg = config(date(2024, 8, 1), date(2025, 3, 31));
        cfg.financial_year = Some("FY25".to_string());
        assert_eq!(cfg.financial_year_label(), "FY25");
    }
}
