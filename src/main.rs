use std::{path::PathBuf, sync::Arc};

use clap::{
    CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotstats::{cli, config, error, types::PkceToken};
use tokio::sync::Mutex;

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP service (/stats, /json, /health)
    Serve,

    /// Render a stats card as SVG
    Render(RenderOptions),

    /// Print collected statistics as a table
    Stats(StatsOptions),

    /// Authorize with Spotify API and print a refresh token
    Auth,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct RenderOptions {
    /// Section to render: artists, top_songs or last_albums
    #[clap(long = "type", default_value = "artists")]
    pub section: String,

    /// Time range: short_term or long_term (ignored for last_albums)
    #[clap(long, default_value = "short_term")]
    pub range: String,

    /// Render from a JSON file saved from /json instead of live data
    #[clap(long)]
    pub input: Option<PathBuf>,

    /// Write the SVG to this file instead of stdout
    #[clap(long, short)]
    pub output: Option<PathBuf>,

    /// Do not download cover images, draw placeholders instead
    #[clap(long)]
    pub offline: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct StatsOptions {
    /// Section to list: artists, top_songs or last_albums
    #[clap(long = "type", default_value = "artists")]
    pub section: String,

    /// Time range: short_term or long_term (ignored for last_albums)
    #[clap(long, default_value = "short_term")]
    pub range: String,

    /// Read a JSON file saved from /json instead of live data
    #[clap(long)]
    pub input: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve().await,
        Command::Render(opt) => {
            cli::render(opt.section, opt.range, opt.input, opt.output, opt.offline).await
        }
        Command::Stats(opt) => cli::stats(opt.section, opt.range, opt.input).await,
        Command::Auth => {
            let oauth_result: Arc<Mutex<Option<PkceToken>>> = Arc::new(Mutex::new(None));
            cli::auth(Arc::clone(&oauth_result)).await;
        }
        Command::Completions(opt) => {
            let mut cmd = Cli::command_for_update();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
