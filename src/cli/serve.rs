use crate::{
    api::AppState, error, management::SpotifyStats, render::HttpEmbedder,
    server::start_api_server,
};

/// Runs the stats service until the process is stopped.
///
/// Requires `SPOTIFY_API_AUTH_CLIENT_ID` and `SPOTIFY_REFRESH_TOKEN`; run
/// `spotstats auth` first to obtain the latter.
pub async fn serve() {
    let provider = match SpotifyStats::from_env() {
        Ok(provider) => provider,
        Err(e) => error!("Cannot start without Spotify credentials. Err: {}", e),
    };

    let state = AppState::new(provider, HttpEmbedder::from_config());
    if let Err(e) = start_api_server(state).await {
        error!("Server stopped. Err: {}", e);
    }
}
