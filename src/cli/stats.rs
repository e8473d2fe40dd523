use std::path::PathBuf;

use tabled::Table;

use crate::{error, render, utils, warning};

use super::{load_stats, spinner};

/// Prints the entries one section would display, as a table.
pub async fn stats(section: String, range: String, input: Option<PathBuf>) {
    let (section, range) = match render::parse_selectors(&section, &range) {
        Ok(selectors) => selectors,
        Err(e) => error!("{}", e),
    };

    let pb = spinner("Collecting statistics...");
    let bundle = load_stats(input).await;
    pb.finish_and_clear();

    match bundle {
        Ok(bundle) => {
            let entries = bundle.entries(section, range);
            if entries.is_empty() {
                warning!("No {} entries for {}", section, range);
                return;
            }
            println!("{}", Table::new(utils::entry_rows(section, entries)));
        }
        Err(e) => error!("Cannot collect statistics. Err: {}", e),
    }
}
