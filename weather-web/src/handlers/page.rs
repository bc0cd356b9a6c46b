//! The weather page

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse, Response},
};
use tracing::debug;
use weather_core::CityQuery;

use crate::{
    error::PageError,
    state::AppState,
    templates::IndexPage,
    view::WeatherView,
};

/// `GET /?q=<city>`: look up the city (or the default one) and render it.
///
/// A failed lookup renders the error panel instead; nothing propagates past
/// this handler.
pub async fn index(State(state): State<AppState>, Query(query): Query<CityQuery>) -> Response {
    let city = query.resolve(&state.site.default_city);
    let searched = query.q.as_deref().filter(|q| !q.is_empty());
    debug!(%city, defaulted = searched.is_none(), "Weather page requested");

    match render(&state, &city, searched.unwrap_or_default()).await {
        Ok(html) => Html(html).into_response(),
        Err(err) => {
            debug!(%city, status = %err.status(), "Rendering error panel");
            err.into_page(&state.templates, searched)
        }
    }
}

async fn render(state: &AppState, city: &str, q: &str) -> Result<String, PageError> {
    let snapshot = state.provider.get_weather(city).await?;
    let view = WeatherView::from(&snapshot);

    let html = state.templates.render_index(&IndexPage {
        weather: &view,
        q,
        quick_links: &state.site.quick_links,
    })?;

    Ok(html)
}
