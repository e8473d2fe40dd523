//! Spotify Listening Stats Card Library
//!
//! This library collects a user's listening statistics (top artists, top songs
//! and recently saved albums) from the Spotify Web API and renders them as an
//! embeddable SVG image, suitable for README files and profile pages.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints served by the stats service
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Token lifecycle and the Spotify-backed stats provider
//! - `render` - The statistics-to-SVG rendering pipeline
//! - `server` - HTTP server setup for the service and the OAuth callback
//! - `spotify` - Spotify Web API client implementation
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotstats::{render, types::StatsBundle};
//!
//! #[tokio::main]
//! async fn main() -> spotstats::Res<()> {
//!     let stats: StatsBundle = serde_json::from_str(r#"{"last_albums": []}"#)?;
//!     let svg = render::render_infographic(&stats, "last_albums", "", &render::NoImages).await?;
//!     println!("{}", svg);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod render;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Provides a standard error handling pattern throughout the application
/// using a boxed dynamic error trait object. This allows for flexible
/// error handling while maintaining Send + Sync bounds for async contexts.
///
/// # Type Parameters
///
/// - `T` - The success type returned on successful operations
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// # Example
///
/// ```
/// success!("Rendered {} cards", count);
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Terminates the process with exit code 1 right after printing, so it is
/// only meant for the CLI and server entrypoints where nothing can be
/// recovered. Library code returns errors instead.
///
/// # Example
///
/// ```
/// error!("Missing required environment variable: {}", var_name);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark to stderr.
///
/// Goes to stderr so `spotstats render` can stream the SVG on stdout.
/// Used for recoverable problems, such as a cover image that could not be
/// fetched and was replaced by a placeholder.
///
/// # Example
///
/// ```
/// warning!("Image fetch failed for {}: {}", url, err);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
