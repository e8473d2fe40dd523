use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    Res,
    api::AppState,
    management::StatsProvider,
    render::{self, ImageEmbedder},
    types::{Section, TimeRange},
    warning,
};

#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    #[serde(rename = "type")]
    pub section: Option<String>,
    pub range: Option<String>,
}

/// `GET /stats?type=<section>&range=<range>` - the rendered SVG card.
///
/// A missing `type` means `artists` and a missing or unknown `range` means
/// `short_term`. An unknown `type` is rejected with 400 before any upstream
/// call is made.
pub async fn stats<P, E>(
    State(state): State<AppState<P, E>>,
    Query(query): Query<StatsQuery>,
) -> Response
where
    P: StatsProvider + Send + Sync + 'static,
    E: ImageEmbedder + Send + Sync + 'static,
{
    let section = query.section.as_deref().unwrap_or(Section::Artists.as_str());
    let section: Section = match section.parse() {
        Ok(section) => section,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                format!("{}; expected one of artists, top_songs, last_albums", e),
            )
                .into_response();
        }
    };
    let range = TimeRange::parse_or_default(query.range.as_deref().unwrap_or_default());

    let work = collect_and_render(&state, section, range);

    match tokio::time::timeout(state.render_timeout, work).await {
        Ok(Ok(svg)) => (
            [
                (header::CONTENT_TYPE, "image/svg+xml"),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            svg,
        )
            .into_response(),
        Ok(Err(e)) => {
            warning!("Cannot collect statistics. Err: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                format!("Cannot collect statistics: {}", e),
            )
                .into_response()
        }
        Err(_) => {
            warning!(
                "Rendering {} ({}) took longer than {:?}",
                section,
                range,
                state.render_timeout
            );
            (StatusCode::GATEWAY_TIMEOUT, "Rendering timed out").into_response()
        }
    }
}

async fn collect_and_render<P, E>(
    state: &AppState<P, E>,
    section: Section,
    range: TimeRange,
) -> Res<String>
where
    P: StatsProvider + Send + Sync + 'static,
    E: ImageEmbedder + Send + Sync + 'static,
{
    let bundle = state.provider.collect().await?;
    Ok(render::render_section(&bundle, section, range, state.embedder.as_ref()).await)
}

/// `GET /json` - the collected statistics as JSON.
pub async fn json<P, E>(State(state): State<AppState<P, E>>) -> Response
where
    P: StatsProvider + Send + Sync + 'static,
    E: ImageEmbedder + Send + Sync + 'static,
{
    match state.provider.collect().await {
        Ok(bundle) => Json(bundle).into_response(),
        Err(e) => {
            warning!("Cannot collect statistics. Err: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
