//! Core library for the `wind` forecast client.
//!
//! This crate defines:
//! - Configuration of the backend base URL and endpoint
//! - Forecast sources and the explicit payload schema check
//! - The fetch-on-mount view lifecycle (`Loading → Ready | Error`)
//! - Text presentation: cards, direction indicator, hour slider
//! - The static database provisioning script
//!
//! It is used by `wind-cli`, but can also be reused by other front-ends.

pub mod config;
pub mod error;
pub mod model;
pub mod payload;
pub mod present;
pub mod provision;
pub mod source;
pub mod view;

pub use config::Config;
pub use error::FetchError;
pub use model::{ForecastSample, WeatherSummary};
pub use payload::Payload;
pub use source::{EndpointKind, ForecastSource};
pub use view::{ForecastView, ViewState};
