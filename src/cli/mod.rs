//! # CLI Module
//!
//! Command implementations behind the `spotstats` binary. Each command is a
//! thin layer over the library: it picks a [`StatsProvider`], calls into
//! [`crate::render`] or [`crate::server`], and reports progress and failures
//! with the crate's logging macros.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the HTTP service backed by live Spotify data
//! - [`render`] - Renders one card to a file or stdout
//! - [`stats`] - Prints the collected entries as a table
//! - [`auth`] - Obtains a refresh token through the PKCE flow
//!
//! ## Data Sources
//!
//! `render` and `stats` read live data by default. With `--input` they read a
//! bundle previously saved from the service's `/json` endpoint instead, which
//! needs no credentials at all:
//!
//! ```bash
//! curl -s http://127.0.0.1:8080/json > stats.json
//! spotstats render --type last_albums --input stats.json --offline > albums.svg
//! ```
//!
//! ## Error Handling
//!
//! Commands terminate through `error!` on unrecoverable failures (missing
//! credentials, unknown section, unreadable input). Image download problems
//! only produce warnings.

mod auth;
mod render;
mod serve;
mod stats;

use std::{path::PathBuf, time::Duration};

use indicatif::{ProgressBar, ProgressStyle};

pub use auth::auth;
pub use render::render;
pub use serve::serve;
pub use stats::stats;

use crate::{
    Res,
    management::{JsonStats, SpotifyStats, StatsProvider},
    types::StatsBundle,
};

/// Collects a bundle from `input` when given, otherwise from Spotify.
async fn load_stats(input: Option<PathBuf>) -> Res<StatsBundle> {
    match input {
        Some(path) => JsonStats::new(path).collect().await,
        None => SpotifyStats::from_env()?.collect().await,
    }
}

fn spinner(message: &'static str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }
    pb
}
