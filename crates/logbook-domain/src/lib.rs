//! Domain layer - calendar months, day classification, mileage ledgers

pub mod model;
pub mod service;
