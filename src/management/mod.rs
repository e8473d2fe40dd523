mod auth;
mod stats;

pub use auth::TokenManager;
pub use stats::JsonStats;
pub use stats::SpotifyStats;
pub use stats::StaticStats;
pub use stats::StatsProvider;
