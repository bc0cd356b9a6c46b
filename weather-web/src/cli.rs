use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Password, PasswordDisplayMode};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use weather_core::{Config, WeatherSnapshot, provider_from_config};

const DEFAULT_LOG_FILTER: &str = "weather_web=debug,weather_core=debug,tower_http=info";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-web", version, about = "Weather lookup page")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the page server.
    Serve {
        /// Address to listen on, e.g. "0.0.0.0:3000".
        #[arg(long)]
        bind: Option<String>,

        /// City shown when the request has no `q` parameter.
        #[arg(long)]
        default_city: Option<String>,
    },

    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Print current weather for a city.
    Show {
        /// City name, forwarded verbatim to the API.
        city: String,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        let dotenv = dotenvy::dotenv();
        init_tracing();
        if let Some(problem) = dotenv_warning(&dotenv) {
            tracing::warn!("Ignoring .env: {problem}");
        }

        let mut config = Config::load()?;

        match self.command {
            Command::Serve { bind, default_city } => {
                if let Some(bind) = bind {
                    config.site.bind = bind;
                }
                if let Some(city) = default_city {
                    config.site.default_city = city;
                }
                weather_web::server::serve(config).await?;
            }
            Command::Configure => {
                let key = Password::new("OpenWeather API key:")
                    .with_display_mode(PasswordDisplayMode::Masked)
                    .without_confirmation()
                    .prompt()
                    .context("Failed to read API key")?;

                // Re-read the file so environment overrides are not persisted.
                let mut stored = Config::load_file()?;
                stored.set_api_key(key.trim().to_string());
                stored.save()?;

                println!("Saved API key to {}", Config::config_file_path()?.display());
            }
            Command::Show { city } => {
                let provider = provider_from_config(&config)?;
                let snapshot = provider.get_weather(&city).await?;
                print_snapshot(&snapshot);
            }
        }

        Ok(())
    }
}

/// A missing `.env` is expected; anything else (bad syntax, unreadable file) is reported.
fn dotenv_warning(result: &dotenvy::Result<PathBuf>) -> Option<String> {
    match result {
        Err(e) if !e.not_found() => Some(e.to_string()),
        _ => None,
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_snapshot(snap: &WeatherSnapshot) {
    let view = weather_web::view::WeatherView::from(snap);

    println!("{}, {}", view.place, view.country);
    println!("  {} °C  {} ({})", view.temperature, view.primary.main, view.primary.description);
    println!("  feels like {} °C, min {} °C, max {} °C", view.feels_like, view.temp_min, view.temp_max);
    println!("  humidity {}%, pressure {} hPa", view.humidity_pct, view.pressure_hpa);
    println!("  wind {} m/s {}, clouds {}%", view.wind_speed, view.wind_direction, view.cloud_cover_pct);
    println!("  sunrise {}, sunset {} (local)", view.sunrise, view.sunset);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn missing_dotenv_is_silent() {
        let result = Err(dotenvy::Error::Io(io::Error::from(io::ErrorKind::NotFound)));
        assert_eq!(dotenv_warning(&result), None);
        assert_eq!(dotenv_warning(&Ok(PathBuf::from(".env"))), None);
    }

    #[test]
    fn malformed_dotenv_is_reported() {
        let result = Err(dotenvy::Error::LineParse("OPENWEATHER_API_KEY 'abc".into(), 19));
        assert!(dotenv_warning(&result).is_some());

        let result = Err(dotenvy::Error::Io(io::Error::from(io::ErrorKind::PermissionDenied)));
        assert!(dotenv_warning(&result).is_some());
    }
}
