//! # Grid Server
//!
//! Offline trainer and HTTP facade for [`grid_forecast`]. The series, model
//! and metric policy are loaded once into a [`ForecastContext`] that every
//! request reads through an `Arc`.
//!
//! [`ForecastContext`]: grid_forecast::ForecastContext

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod weather;

pub use api::{router, AppState};
pub use config::ServerConfig;
pub use weather::WeatherSimulator;
