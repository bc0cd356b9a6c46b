use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

use crate::{
    config::OpenWeatherConfig,
    error::FetchError,
    model::{Condition, Location, Readings, SunTimes, WeatherSnapshot, Wind},
};

use super::WeatherProvider;

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(
        api_key: String,
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            api_key,
            base_url: base_url.into(),
            http: builder.build()?,
        })
    }

    pub fn from_config(config: &OpenWeatherConfig) -> Result<Self, FetchError> {
        Self::new(
            config.api_key.clone().unwrap_or_default(),
            config.base_url.clone(),
            config.request_timeout(),
        )
    }

    fn current_url(&self) -> String {
        format!("{}/weather", self.base_url.trim_end_matches('/'))
    }

    #[instrument(skip(self))]
    async fn fetch_current(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let res = self
            .http
            .get(self.current_url())
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;
        debug!(%status, bytes = body.len(), "OpenWeather responded");

        if !status.is_success() {
            return Err(classify_failure(city, status, &body));
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body).map_err(|e| {
            FetchError::Malformed(format!("{e}; body: {}", truncate_body(&body)))
        })?;

        parsed.into_snapshot()
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn get_weather(&self, city: &str) -> Result<WeatherSnapshot, FetchError> {
        let result = self.fetch_current(city).await;
        if let Err(err) = &result {
            warn!(city, error = %err, "Weather lookup failed");
        }
        result
    }
}

/// Error body returned alongside non-2xx statuses, e.g.
/// `{"cod":"404","message":"city not found"}`. `cod` is a string or a number.
#[derive(Debug, Deserialize)]
struct OwErrorBody {
    #[serde(default)]
    cod: Option<serde_json::Value>,
    #[serde(default)]
    message: Option<String>,
}

fn classify_failure(city: &str, status: StatusCode, body: &str) -> FetchError {
    let parsed = serde_json::from_str::<OwErrorBody>(body).ok();
    if let Some(cod) = parsed.as_ref().and_then(|b| b.cod.as_ref()) {
        debug!(%cod, "OpenWeather error code");
    }

    let message = parsed
        .and_then(|b| b.message)
        .unwrap_or_else(|| truncate_body(body));

    if status == StatusCode::NOT_FOUND {
        FetchError::LocationNotFound { city: city.to_string(), message }
    } else {
        FetchError::Rejected { status, message }
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u32,
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: u16,
    #[serde(default)]
    gust: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    #[serde(default)]
    country: String,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    weather: Vec<OwWeather>,
    main: OwMain,
    #[serde(default)]
    visibility: Option<u32>,
    wind: OwWind,
    #[serde(default)]
    clouds: OwClouds,
    dt: i64,
    sys: OwSys,
    #[serde(default)]
    timezone: i32,
}

impl OwCurrentResponse {
    fn into_snapshot(self) -> Result<WeatherSnapshot, FetchError> {
        let conditions = self
            .weather
            .into_iter()
            .map(|w| Condition {
                id: w.id,
                main: w.main,
                description: w.description,
                icon: w.icon,
            })
            .collect();

        WeatherSnapshot::new(
            Location {
                name: self.name,
                country: self.sys.country,
                latitude: self.coord.lat,
                longitude: self.coord.lon,
                utc_offset_secs: self.timezone,
            },
            conditions,
            Readings {
                temperature_c: self.main.temp,
                feels_like_c: self.main.feels_like,
                temp_min_c: self.main.temp_min,
                temp_max_c: self.main.temp_max,
                humidity_pct: self.main.humidity,
                pressure_hpa: self.main.pressure,
                visibility_m: self.visibility,
            },
            Wind {
                speed_mps: self.wind.speed,
                direction_deg: self.wind.deg,
                gust_mps: self.wind.gust,
            },
            self.clouds.all,
            SunTimes {
                sunrise: unix_to_utc(self.sys.sunrise)?,
                sunset: unix_to_utc(self.sys.sunset)?,
            },
            unix_to_utc(self.dt)?,
        )
    }
}

fn unix_to_utc(ts: i64) -> Result<DateTime<Utc>, FetchError> {
    DateTime::from_timestamp(ts, 0)
        .ok_or_else(|| FetchError::Malformed(format!("timestamp {ts} out of range")))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_status_maps_to_location_not_found() {
        let err = classify_failure(
            "Atlantis",
            StatusCode::NOT_FOUND,
            r#"{"cod":"404","message":"city not found"}"#,
        );

        match err {
            FetchError::LocationNotFound { city, message } => {
                assert_eq!(city, "Atlantis");
                assert_eq!(message, "city not found");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn numeric_cod_is_accepted() {
        let err = classify_failure(
            "Tokyo",
            StatusCode::UNAUTHORIZED,
            r#"{"cod":401,"message":"Invalid API key."}"#,
        );

        match err {
            FetchError::Rejected { status, message } => {
                assert_eq!(status, StatusCode::UNAUTHORIZED);
                assert_eq!(message, "Invalid API key.");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_json_error_body_is_truncated_into_message() {
        let body = "x".repeat(500);
        let err = classify_failure("Tokyo", StatusCode::BAD_GATEWAY, &body);

        match err {
            FetchError::Rejected { message, .. } => {
                assert_eq!(message.len(), 203);
                assert!(message.ends_with("..."));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let body = "é".repeat(300);
        let out = truncate_body(&body);
        assert_eq!(out.chars().count(), 203);
    }

    #[test]
    fn current_url_tolerates_trailing_slash() {
        let provider = OpenWeatherProvider::new("KEY".into(), "http://localhost:1/data/2.5/", None)
            .expect("client should build");
        assert_eq!(provider.current_url(), "http://localhost:1/data/2.5/weather");
    }
}
