//! Core library for the weather lookup page.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Resolving the requested city from query parameters
//! - Fetching current conditions from OpenWeather
//! - The immutable weather snapshot handed to rendering
//!
//! It is used by `weather-web`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod resolver;

pub use config::{Config, OpenWeatherConfig, SiteConfig};
pub use error::FetchError;
pub use model::{Condition, Location, Readings, SunTimes, WeatherSnapshot, Wind};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider, provider_from_config};
pub use resolver::{CityQuery, resolve_city};
