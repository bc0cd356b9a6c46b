use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::FetchError;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Where the reading was taken, as reported by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Location {
    pub name: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Shift from UTC in seconds for the reported place.
    pub utc_offset_secs: i32,
}

/// Thermodynamic readings, in the unit system the API was asked for (metric).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Readings {
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub temp_min_c: f64,
    pub temp_max_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: f64,
    pub visibility_m: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wind {
    pub speed_mps: f64,
    pub direction_deg: u16,
    pub gust_mps: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
}

/// One weather condition record (`weather[]` in the OpenWeather body).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Condition {
    pub id: u32,
    /// Short category label, e.g. "Rain".
    pub main: String,
    pub description: String,
    /// Icon identifier, kept verbatim so the icon URL resolves.
    pub icon: String,
}

impl Condition {
    pub fn icon_url(&self) -> String {
        format!("{ICON_BASE_URL}/{}@2x.png", self.icon)
    }
}

/// The weather reading for one city at one fetch time.
///
/// A snapshot always carries at least one condition; the first one is the
/// primary condition used for headline display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub readings: Readings,
    pub wind: Wind,
    pub cloud_cover_pct: u8,
    pub sun: SunTimes,
    pub observed_at: DateTime<Utc>,
    conditions: Vec<Condition>,
}

impl WeatherSnapshot {
    /// Build a snapshot, rejecting an empty condition sequence.
    pub fn new(
        location: Location,
        conditions: Vec<Condition>,
        readings: Readings,
        wind: Wind,
        cloud_cover_pct: u8,
        sun: SunTimes,
        observed_at: DateTime<Utc>,
    ) -> Result<Self, FetchError> {
        if conditions.is_empty() {
            return Err(FetchError::Malformed(format!(
                "response for '{}' contained no weather conditions",
                location.name
            )));
        }

        Ok(Self {
            location,
            readings,
            wind,
            cloud_cover_pct,
            sun,
            observed_at,
            conditions,
        })
    }

    pub fn primary_condition(&self) -> &Condition {
        &self.conditions[0]
    }

    /// All conditions in API order, primary first.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }
}
