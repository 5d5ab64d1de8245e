//! Core library for the `cityweather` CLI.
//!
//! This crate defines:
//! - The geocode-then-forecast pipeline and its transcript rendering
//! - Clients for the geocoding and forecast web services
//! - The static weather-code table and date display helpers
//!
//! It is used by `cityweather-cli`, but can also be reused by other binaries.

pub mod codes;
pub mod dates;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod service;

pub use error::{Error, Result};
pub use model::{CurrentConditions, DailyForecast, Location, WeatherReport};
pub use pipeline::run_once;
pub use service::{Service, forecast::ForecastClient, geocode::GeocodeClient};
