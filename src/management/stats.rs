use std::{future::Future, path::PathBuf};

use reqwest::Client;
use tokio::sync::Mutex;

use crate::{
    Res, config,
    management::TokenManager,
    spotify,
    types::{RangedEntries, StatsBundle, TimeRange},
};

/// Anything that can produce a fresh [`StatsBundle`] for one request.
///
/// The HTTP service and the CLI depend on this trait rather than on Spotify
/// directly, which lets tests and offline rendering supply canned data.
pub trait StatsProvider {
    fn collect(&self) -> impl Future<Output = Res<StatsBundle>> + Send;
}

/// Collects statistics live from the Spotify Web API.
///
/// Each call to [`StatsProvider::collect`] performs five API requests, in
/// order: top artists (short, long), top tracks (short, long), saved albums.
/// Nothing is cached between calls.
pub struct SpotifyStats {
    client: Client,
    api_url: String,
    tokens: Mutex<TokenManager>,
}

impl SpotifyStats {
    pub fn new(api_url: String, tokens: TokenManager) -> Self {
        SpotifyStats {
            client: Client::new(),
            api_url,
            tokens: Mutex::new(tokens),
        }
    }

    /// Builds a provider from `SPOTIFY_API_URL` and `SPOTIFY_REFRESH_TOKEN`.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self::new(config::spotify_apiurl(), TokenManager::from_env()?))
    }
}

impl StatsProvider for SpotifyStats {
    async fn collect(&self) -> Res<StatsBundle> {
        let token = self.tokens.lock().await.get_valid_token().await?;

        let mut top_artists = RangedEntries::default();
        for range in TimeRange::ALL {
            let entries =
                spotify::stats::get_top_artists(&self.client, &self.api_url, &token, range).await?;
            match range {
                TimeRange::ShortTerm => top_artists.short_term = entries,
                TimeRange::LongTerm => top_artists.long_term = entries,
            }
        }

        let mut top_songs = RangedEntries::default();
        for range in TimeRange::ALL {
            let entries =
                spotify::stats::get_top_tracks(&self.client, &self.api_url, &token, range).await?;
            match range {
                TimeRange::ShortTerm => top_songs.short_term = entries,
                TimeRange::LongTerm => top_songs.long_term = entries,
            }
        }

        let last_albums =
            spotify::stats::get_saved_albums(&self.client, &self.api_url, &token).await?;

        Ok(StatsBundle {
            top_artists,
            top_songs,
            last_albums,
        })
    }
}

/// Reads a previously exported bundle (the `/json` output) from disk.
pub struct JsonStats {
    path: PathBuf,
}

impl JsonStats {
    pub fn new(path: PathBuf) -> Self {
        JsonStats { path }
    }
}

impl StatsProvider for JsonStats {
    async fn collect(&self) -> Res<StatsBundle> {
        let content = async_fs::read_to_string(&self.path)
            .await
            .map_err(|e| format!("{}: {}", self.path.display(), e))?;
        let bundle = serde_json::from_str(&content)?;
        Ok(bundle)
    }
}

/// Serves the same bundle on every call.
#[derive(Debug, Clone, Default)]
pub struct StaticStats {
    bundle: StatsBundle,
}

impl StaticStats {
    pub fn new(bundle: StatsBundle) -> Self {
        StaticStats { bundle }
    }
}

impl StatsProvider for StaticStats {
    async fn collect(&self) -> Res<StatsBundle> {
        Ok(self.bundle.clone())
    }
}
