use std::path::PathBuf;

use crate::{
    error,
    render::{self, HttpEmbedder, NoImages},
    success,
};

use super::{load_stats, spinner};

/// Renders one infographic and writes it to `output`, or stdout when absent.
///
/// # Arguments
///
/// * `section` - `artists`, `top_songs` or `last_albums`
/// * `range` - `short_term` or `long_term`; unknown values mean `short_term`
/// * `input` - Optional JSON bundle to render instead of live data
/// * `output` - Optional destination file
/// * `offline` - Skip image downloads and draw placeholders only
pub async fn render(
    section: String,
    range: String,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    offline: bool,
) {
    let (section, range) = match render::parse_selectors(&section, &range) {
        Ok(selectors) => selectors,
        Err(e) => error!("{}", e),
    };

    let pb = spinner("Collecting statistics...");
    let stats = match load_stats(input).await {
        Ok(stats) => stats,
        Err(e) => {
            pb.finish_and_clear();
            error!("Cannot collect statistics. Err: {}", e)
        }
    };

    pb.set_message("Rendering...");
    let svg = if offline {
        render::render_section(&stats, section, range, &NoImages).await
    } else {
        render::render_section(&stats, section, range, &HttpEmbedder::from_config()).await
    };
    pb.finish_and_clear();

    match output {
        Some(path) => {
            if let Err(e) = async_fs::write(&path, svg).await {
                error!("Cannot write {}. Err: {}", path.display(), e);
            }
            success!("Wrote {}", path.display());
        }
        None => print!("{}", svg),
    }
}
