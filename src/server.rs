use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};
use tokio::sync::Mutex;

use crate::{
    Res,
    api::{self, AppState},
    config, info,
    management::StatsProvider,
    render::ImageEmbedder,
    types::PkceToken,
};

/// Routes of the stats service.
pub fn router<P, E>(state: AppState<P, E>) -> Router
where
    P: StatsProvider + Send + Sync + 'static,
    E: ImageEmbedder + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(api::home))
        .route("/health", get(api::health))
        .route("/json", get(api::json::<P, E>))
        .route("/stats", get(api::stats::<P, E>))
        .with_state(state)
}

/// Serves the stats routes on `SERVER_ADDRESS` until the process stops.
pub async fn start_api_server<P, E>(state: AppState<P, E>) -> Res<()>
where
    P: StatsProvider + Send + Sync + 'static,
    E: ImageEmbedder + Send + Sync + 'static,
{
    let addr = bind_addr()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Serving stats on http://{}", addr);

    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Serves the OAuth callback while `spotstats auth` is waiting for a token.
pub async fn start_callback_server(state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    let addr = bind_addr()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn bind_addr() -> Res<SocketAddr> {
    let raw = config::server_addr();
    SocketAddr::from_str(&raw)
        .map_err(|e| format!("Failed to parse server address '{}': {}", raw, e).into())
}
