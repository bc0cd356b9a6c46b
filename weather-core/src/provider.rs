use crate::{Config, WeatherSnapshot, error::FetchError, provider::openweather::OpenWeatherProvider};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch the current weather for `city`. One attempt, no retries.
    async fn get_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError>;
}

/// Construct the OpenWeather provider from config.
///
/// A missing API key is not an error here: the request goes out with an
/// empty `appid` and the API's rejection is reported per lookup.
pub fn provider_from_config(config: &Config) -> Result<Box<dyn WeatherProvider>, FetchError> {
    if !config.is_api_key_configured() {
        tracing::warn!(
            "No OpenWeather API key configured; lookups will be rejected. \
             Set {} or run `weather-web configure`.",
            crate::config::API_KEY_ENV
        );
    }

    let provider = OpenWeatherProvider::from_config(&config.openweather)?;
    Ok(Box::new(provider))
}
