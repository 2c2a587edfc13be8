//! Application service layer - config, sheet layout, export, orchestration

pub mod app;
pub mod config;
pub mod export;
