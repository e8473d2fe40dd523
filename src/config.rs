//! Configuration management for the stats service.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. It provides a centralized way to manage application
//! configuration including Spotify API credentials, server settings, and the
//! timeouts used while rendering.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf, time::Duration};

const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8080";
const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8080/callback";
const DEFAULT_SCOPE: &str =
    "user-library-read user-top-read user-read-recently-played user-read-playback-state";
const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
const DEFAULT_HOMEPAGE_URL: &str = "https://github.com/JohanVerne/SpotifyREADMEStats";
const DEFAULT_IMAGE_FETCH_TIMEOUT_SECS: u64 = 5;
const DEFAULT_RENDER_TIMEOUT_SECS: u64 = 30;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from `spotstats/.env` inside the platform-specific
/// local data directory. Variables already present in the process environment
/// win over the file.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/spotstats/.env`
/// - macOS: `~/Library/Application Support/spotstats/.env`
/// - Windows: `%LOCALAPPDATA%/spotstats/.env`
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or if the file
/// exists but cannot be parsed. A missing `.env` file is not an error, since
/// a deployment may provide everything through the environment.
pub async fn load_env() -> Result<(), String> {
    let path = env_path();
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Location of the `.env` file read by [`load_env`].
pub fn env_path() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotstats/.env");
    path
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn required(key: &str) -> Result<String, String> {
    optional(key).ok_or_else(|| format!("{} must be set", key))
}

fn seconds(key: &str, default: u64) -> Duration {
    let secs = optional(key)
        .and_then(|value| value.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(default);
    Duration::from_secs(secs)
}

/// Returns the address the HTTP server binds to.
///
/// Reads `SERVER_ADDRESS`, falling back to `127.0.0.1:8080`. The same address
/// serves the stats endpoints and, during `spotstats auth`, the OAuth callback.
pub fn server_addr() -> String {
    optional("SERVER_ADDRESS").unwrap_or_else(|| DEFAULT_SERVER_ADDRESS.to_string())
}

/// Returns the Spotify API client ID for authentication.
///
/// # Errors
///
/// Returns an error if `SPOTIFY_API_AUTH_CLIENT_ID` is not set.
pub fn spotify_client_id() -> Result<String, String> {
    required("SPOTIFY_API_AUTH_CLIENT_ID")
}

/// Returns the Spotify API client secret, if one is configured.
///
/// The secret is optional: refresh tokens obtained through the PKCE flow can be
/// refreshed with the client ID alone. When present it is sent as HTTP basic
/// auth on token requests.
///
/// # Security Note
///
/// The client secret should be kept confidential and never exposed in logs
/// or version control.
pub fn spotify_client_secret() -> Option<String> {
    optional("SPOTIFY_API_AUTH_CLIENT_SECRET")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Must match the redirect URI registered in the Spotify application settings.
pub fn spotify_redirect_uri() -> String {
    optional("SPOTIFY_API_REDIRECT_URI").unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string())
}

/// Returns the space separated scope list requested during authorization.
pub fn spotify_scope() -> String {
    optional("SPOTIFY_API_AUTH_SCOPE").unwrap_or_else(|| DEFAULT_SCOPE.to_string())
}

/// Returns the Spotify OAuth authorization URL.
pub fn spotify_apiauth_url() -> String {
    optional("SPOTIFY_API_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string())
}

/// Returns the Spotify Web API base URL, e.g. `https://api.spotify.com/v1`.
pub fn spotify_apiurl() -> String {
    optional("SPOTIFY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

/// Returns the Spotify OAuth token exchange URL.
pub fn spotify_apitoken_url() -> String {
    optional("SPOTIFY_API_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string())
}

/// Returns the long-lived refresh token the service runs with.
///
/// Obtain one with `spotstats auth` and store it in the `.env` file.
///
/// # Errors
///
/// Returns an error if `SPOTIFY_REFRESH_TOKEN` is not set.
pub fn spotify_refresh_token() -> Result<String, String> {
    required("SPOTIFY_REFRESH_TOKEN")
}

/// Per-image timeout used when embedding cover art. Defaults to 5 seconds.
pub fn image_fetch_timeout() -> Duration {
    seconds("IMAGE_FETCH_TIMEOUT_SECS", DEFAULT_IMAGE_FETCH_TIMEOUT_SECS)
}

/// Upper bound for a whole `/stats` request. Defaults to 30 seconds.
pub fn render_timeout() -> Duration {
    seconds("RENDER_TIMEOUT_SECS", DEFAULT_RENDER_TIMEOUT_SECS)
}

/// Where `GET /` redirects to.
pub fn homepage_url() -> String {
    optional("HOMEPAGE_URL").unwrap_or_else(|| DEFAULT_HOMEPAGE_URL.to_string())
}
