//! Configuration loading for the log book generator
//!
//! Resolution order: built-in defaults, then the config file (explicit path,
//! or ~/.config/fuel-logbook/config.json when present), then CLI overrides.

use chrono::NaiveDate;
use logbook_types::{ConfigError, Employee, LogbookConfig, Result, Vehicle};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// On-disk configuration (JSON, or TOML by extension).
///
/// Every field has a default, so partial files only replace what they name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub start_date: String,
    pub end_date: String,
    pub initial_odometer: u64,
    pub inr_per_km: u64,
    pub work_related_km: u64,
    pub trip_purpose: String,
    pub client_name: String,
    pub is_work_travel: String,

    /// Kilometres per workday; a number, or an empty string for none
    #[serde(
        deserialize_with = "deserialize_optional_km",
        skip_serializing_if = "Option::is_none"
    )]
    pub personal_travel: Option<u64>,

    pub holidays: Vec<String>,
    pub employee: Employee,
    pub vehicle: Vehicle,
    pub output_file_path: PathBuf,
    pub company_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub financial_year: Option<String>,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            start_date: "2024-08-01".to_string(),
            end_date: "2025-03-31".to_string(),
            initial_odometer: 17569,
            inr_per_km: 10,
            work_related_km: 110,
            trip_purpose: "Official".to_string(),
            client_name: "Blink Charging".to_string(),
            is_work_travel: "Y".to_string(),
            personal_travel: None,
            holidays: vec!["2025-01-26".to_string(), "2025-03-10".to_string()],
            employee: Employee::default(),
            vehicle: Vehicle::default(),
            output_file_path: PathBuf::from("Financial_Year_2024_25_Log_Book.xlsx"),
            company_name: "Blink Charging Software Solutions India Private Limited".to_string(),
            financial_year: None,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum KmOrText {
    Km(u64),
    Text(String),
}

fn deserialize_optional_km<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<KmOrText>::deserialize(deserializer)? {
        None => Ok(None),
        Some(KmOrText::Km(km)) => Ok(Some(km)),
        Some(KmOrText::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(KmOrText::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub output_file_path: Option<PathBuf>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub initial_odometer: Option<u64>,
    pub work_related_km: Option<u64>,
    pub inr_per_km: Option<u64>,
}

impl FileConfig {
    /// Default config file location
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NotFound)?;
        Ok(dir.join("fuel-logbook").join("config.json"))
    }

    /// Load a config file, choosing TOML or JSON by extension
    pub fn load(path: &Path) -> Result<Self> {
        debug!("Loading configuration from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let config: FileConfig = if is_toml {
            toml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };
        Ok(config)
    }

    /// Load `path` if given, else the default location if it exists, else defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        match Self::default_path() {
            Ok(default) if default.exists() => Self::load(&default),
            _ => {
                debug!("No configuration file, using built-in defaults");
                Ok(Self::default())
            }
        }
    }

    /// Write as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply CLI values field by field
    pub fn apply(&mut self, overrides: &ConfigOverrides) {
        if let Some(ref path) = overrides.output_file_path {
            self.output_file_path = path.clone();
        }
        if let Some(ref start) = overrides.start_date {
            self.start_date = start.clone();
        }
        if let Some(ref end) = overrides.end_date {
            self.end_date = end.clone();
        }
        if let Some(odometer) = overrides.initial_odometer {
            self.initial_odometer = odometer;
        }
        if let Some(km) = overrides.work_related_km {
            self.work_related_km = km;
        }
        if let Some(rate) = overrides.inr_per_km {
            self.inr_per_km = rate;
        }
    }

    /// Parse dates and holidays and produce the immutable run configuration.
    ///
    /// Bad start/end dates and a reversed range are fatal. Bad holiday
    /// entries are logged and skipped.
    pub fn resolve(&self) -> Result<LogbookConfig> {
        let config = LogbookConfig {
            start_date: parse_date("start_date", &self.start_date)?,
            end_date: parse_date("end_date", &self.end_date)?,
            initial_odometer: self.initial_odometer,
            inr_per_km: self.inr_per_km,
            work_related_km: self.work_related_km,
            personal_travel_km: self.personal_travel,
            trip_purpose: self.trip_purpose.clone(),
            client_name: self.client_name.clone(),
            is_work_travel: self.is_work_travel.clone(),
            company_name: self.company_name.clone(),
            financial_year: self.financial_year.clone(),
            employee: self.employee.clone(),
            vehicle: self.vehicle.clone(),
            holidays: parse_holidays(&self.holidays),
            output_file_path: self.output_file_path.clone(),
        };
        config.validate()?;
        Ok(config)
    }
}

fn parse_date(field: &'static str, value: &str) -> std::result::Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ConfigError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

fn parse_holidays(entries: &[String]) -> BTreeSet<NaiveDate> {
    let mut holidays = BTreeSet::new();
    for entry in entries {
        match NaiveDate::parse_from_str(entry.trim(), DATE_FORMAT) {
            Ok(date) => {
                info!("Added holiday: {}", date);
                holidays.insert(date);
            }
            Err(_) => warn!("Invalid holiday date format: {}", entry),
        }
    }
    holidays
}

/// Resolve the full chain in one call
pub fn load_config(path: Option<&Path>, overrides: &ConfigOverrides) -> Result<LogbookConfig> {
    let mut file_config = FileConfig::load_or_default(path)?;
    file_config.apply(overrides);
    file_config.resolve()
}
