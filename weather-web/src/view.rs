//! Display-ready projection of a [`WeatherSnapshot`].
//!
//! Numbers are printed exactly as the API returned them (no unit conversion);
//! only timestamps are shifted into the place's local time.

use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use weather_core::{Condition, WeatherSnapshot};

#[derive(Debug, Clone, Serialize)]
pub struct ConditionView {
    pub main: String,
    pub description: String,
    pub icon_url: String,
}

impl From<&Condition> for ConditionView {
    fn from(c: &Condition) -> Self {
        Self {
            main: c.main.clone(),
            description: c.description.clone(),
            icon_url: c.icon_url(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WeatherView {
    pub place: String,
    pub country: String,
    pub temperature: String,
    pub feels_like: String,
    pub temp_min: String,
    pub temp_max: String,
    pub primary: ConditionView,
    /// Category label of every condition, primary first.
    pub details: Vec<String>,
    pub humidity_pct: u8,
    pub pressure_hpa: String,
    pub wind_speed: String,
    pub wind_direction: String,
    pub cloud_cover_pct: u8,
    pub sunrise: String,
    pub sunset: String,
    pub observed_at: String,
}

impl From<&WeatherSnapshot> for WeatherView {
    fn from(snap: &WeatherSnapshot) -> Self {
        let offset = snap.location.utc_offset_secs;
        let r = &snap.readings;

        Self {
            place: snap.location.name.clone(),
            country: snap.location.country.clone(),
            temperature: r.temperature_c.to_string(),
            feels_like: r.feels_like_c.to_string(),
            temp_min: r.temp_min_c.to_string(),
            temp_max: r.temp_max_c.to_string(),
            primary: snap.primary_condition().into(),
            details: snap.conditions().iter().map(|c| c.main.clone()).collect(),
            humidity_pct: r.humidity_pct,
            pressure_hpa: r.pressure_hpa.to_string(),
            wind_speed: snap.wind.speed_mps.to_string(),
            wind_direction: wind_direction(snap.wind.direction_deg).to_string(),
            cloud_cover_pct: snap.cloud_cover_pct,
            sunrise: local_time(snap.sun.sunrise, offset),
            sunset: local_time(snap.sun.sunset, offset),
            observed_at: local_time(snap.observed_at, offset),
        }
    }
}

/// Eight-point compass label for a bearing in degrees.
pub fn wind_direction(degrees: u16) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let normalized = f64::from(degrees % 360);
    POINTS[((normalized / 45.0).round() as usize) % 8]
}

/// `HH:MM` in the place's local time; falls back to UTC for an invalid offset.
fn local_time(at: DateTime<Utc>, utc_offset_secs: i32) -> String {
    match FixedOffset::east_opt(utc_offset_secs) {
        Some(tz) => at.with_timezone(&tz).format("%H:%M").to_string(),
        None => at.format("%H:%M").to_string(),
    }
}
