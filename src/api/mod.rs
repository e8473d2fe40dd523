//! # API Module
//!
//! HTTP endpoints of the stats service, plus the OAuth callback used while
//! running `spotstats auth`.
//!
//! ## Endpoints
//!
//! - [`home`] - `GET /`, redirects to the project page
//! - [`health`] - `GET /health`, status and version for monitoring
//! - [`json`] - `GET /json`, the collected statistics as JSON
//! - [`stats`] - `GET /stats?type=&range=`, the rendered SVG card
//! - [`callback`] - `GET /callback`, completes the PKCE authorization
//!
//! ## Status Codes
//!
//! | situation                          | status |
//! |------------------------------------|--------|
//! | unknown `type` selector            | 400    |
//! | Spotify (or the provider) failed   | 502    |
//! | render exceeded the outer timeout  | 504    |
//!
//! Failed cover image downloads are not errors; the card shows a placeholder.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use spotstats::{api::AppState, management::SpotifyStats, render::HttpEmbedder, server};
//!
//! let state = AppState::new(SpotifyStats::from_env()?, HttpEmbedder::from_config());
//! let app = server::router(state);
//! ```

mod callback;
mod health;
mod home;
mod stats;

use std::{sync::Arc, time::Duration};

pub use callback::callback;
pub use health::health;
pub use home::home;
pub use stats::{StatsQuery, json, stats};

use crate::config;

/// Shared handler state: where statistics come from and how images are embedded.
pub struct AppState<P, E> {
    pub provider: Arc<P>,
    pub embedder: Arc<E>,
    /// Outer bound for collecting and rendering one `/stats` request.
    pub render_timeout: Duration,
}

impl<P, E> AppState<P, E> {
    /// Creates state with the configured render timeout.
    pub fn new(provider: P, embedder: E) -> Self {
        AppState {
            provider: Arc::new(provider),
            embedder: Arc::new(embedder),
            render_timeout: config::render_timeout(),
        }
    }

    pub fn with_render_timeout(mut self, render_timeout: Duration) -> Self {
        self.render_timeout = render_timeout;
        self
    }
}

impl<P, E> Clone for AppState<P, E> {
    fn clone(&self) -> Self {
        AppState {
            provider: Arc::clone(&self.provider),
            embedder: Arc::clone(&self.embedder),
            render_timeout: self.render_timeout,
        }
    }
}
