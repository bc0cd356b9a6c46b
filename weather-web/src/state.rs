//! Application state shared across handlers

use std::sync::Arc;

use weather_core::{SiteConfig, WeatherProvider};

use crate::templates::PageTemplates;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Weather lookups; the OpenWeather client in production, a fake in tests
    pub provider: Arc<dyn WeatherProvider>,
    pub templates: PageTemplates,
    /// Default city and quick links
    pub site: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn WeatherProvider>,
        templates: PageTemplates,
        site: SiteConfig,
    ) -> Self {
        Self { provider, templates, site: Arc::new(site) }
    }
}
