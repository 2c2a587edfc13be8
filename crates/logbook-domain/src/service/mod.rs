//! Domain services

pub mod calendar;
pub mod mileage;

pub use calendar::{HolidayCalendar, REST_DAYS};
pub use mileage::{accumulate, TripRates};
