//! # Spotify Integration Module
//!
//! Thin client for the parts of the Spotify Web API the stats card needs.
//! Everything returned from here is already normalized into the crate's own
//! [`Entry`](crate::types::Entry) model, so nothing downstream ever looks at a
//! raw API object.
//!
//! ## Modules
//!
//! - [`auth`] - OAuth 2.0 PKCE flow (used once, to obtain a refresh token) and
//!   the refresh-token exchange the service relies on afterwards
//! - [`stats`] - Top artists, top tracks and saved albums
//!
//! ## API Coverage
//!
//! - `GET /me/top/artists` - Top artists per time range
//! - `GET /me/top/tracks` - Top tracks per time range
//! - `GET /me/albums` - Most recently saved albums
//! - `POST /api/token` - Code exchange and token refresh
//!
//! ## Normalization
//!
//! Spotify returns arrays for images, genres and credited artists, any of
//! which can be empty. The normalizers take the first element when there is
//! one and produce `None` otherwise; they never index blindly.
//!
//! ## Error Types
//!
//! - **`reqwest::Error`** - HTTP client errors, network issues, API errors
//! - **`String`** - Token exchange and configuration errors

pub mod auth;
pub mod stats;
