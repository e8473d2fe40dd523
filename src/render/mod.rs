//! # Render Module
//!
//! Turns a [`StatsBundle`] into an embeddable SVG card image. This is the only
//! part of the crate that does not care where the statistics came from: the
//! HTTP service, the CLI and the tests all feed it the same data model.
//!
//! ## Pipeline
//!
//! ```text
//! StatsBundle + Section + TimeRange
//!          ↓
//! CardLayout::for_section      (grid and canvas geometry)
//!          ↓
//! per entry, in rank order:
//!     ImageEmbedder::embed     (cover art → data URI, or placeholder)
//!     wrap_text                (title on at most two lines)
//!          ↓
//! Document (element records)  →  Document::to_svg
//! ```
//!
//! ## Determinism
//!
//! The output contains no timestamps or generated ids. For identical input and
//! identical embedder results the SVG is byte-identical, which is why tests
//! substitute a fake [`ImageEmbedder`] for [`HttpEmbedder`].
//!
//! ## Degradation
//!
//! Missing names, genres or artists render as `Unknown`; a missing image or a
//! failed fetch renders a placeholder disc. The only error is an unknown
//! section selector, reported as [`RenderError::UnknownSection`] before any
//! markup is produced.

mod embed;
mod layout;
pub mod svg;
mod text;

use std::fmt;

pub use embed::{
    DEFAULT_IMAGE_TYPE, HttpEmbedder, ImageEmbedder, MAX_IMAGE_BYTES, NoImages, data_uri,
};
pub use layout::CardLayout;
pub use text::{MAX_LINES, wrap_text};

use crate::types::{Entry, Section, StatsBundle, TimeRange};
use svg::{Circle, Document, Element, Group, Image, Rect, Text};

const UNKNOWN: &str = "Unknown";
const LINE_HEIGHT: u32 = 18;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    UnknownSection(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnknownSection(section) => write!(
                f,
                "unknown section '{}', expected one of artists, top_songs, last_albums",
                section
            ),
        }
    }
}

impl std::error::Error for RenderError {}

/// Renders the infographic for string selectors, as received from a query
/// string or the command line.
///
/// # Arguments
///
/// * `stats` - The collected statistics; only borrowed
/// * `section` - `artists`, `top_songs` or `last_albums`
/// * `range` - `short_term` or `long_term`. Anything else falls back to
///   `short_term`. Ignored for `last_albums`.
/// * `embedder` - Resolves cover art URLs into inlinable data URIs
///
/// # Errors
///
/// Returns [`RenderError::UnknownSection`] when `section` is not recognized.
/// No partial document is produced in that case.
///
/// # Example
///
/// ```
/// let svg = render_infographic(&stats, "artists", "long_term", &HttpEmbedder::from_config()).await?;
/// ```
pub async fn render_infographic<E>(
    stats: &StatsBundle,
    section: &str,
    range: &str,
    embedder: &E,
) -> Result<String, RenderError>
where
    E: ImageEmbedder + Sync,
{
    let (section, range) = parse_selectors(section, range)?;

    Ok(render_section(stats, section, range, embedder).await)
}

/// Parses string selectors the way [`render_infographic`] does: an unknown
/// section is an error, an unknown range means `short_term`.
pub fn parse_selectors(section: &str, range: &str) -> Result<(Section, TimeRange), RenderError> {
    let section: Section = section
        .parse()
        .map_err(|_| RenderError::UnknownSection(section.to_string()))?;

    Ok((section, TimeRange::parse_or_default(range)))
}

/// Renders the infographic for already-parsed selectors.
pub async fn render_section<E>(
    stats: &StatsBundle,
    section: Section,
    range: TimeRange,
    embedder: &E,
) -> String
where
    E: ImageEmbedder + Sync,
{
    compose(stats, section, range, embedder).await.to_svg()
}

/// Builds the element tree for a section without serializing it.
///
/// Entries are processed strictly in rank order and at most
/// [`CardLayout::items`] of them are used. Images are embedded one after the
/// other, so a render takes at most `items` fetch timeouts.
pub async fn compose<E>(
    stats: &StatsBundle,
    section: Section,
    range: TimeRange,
    embedder: &E,
) -> Document
where
    E: ImageEmbedder + Sync,
{
    let layout = CardLayout::for_section(section);
    let (title, subtitle) = heading(section, range);

    let mut document = Document::new(layout.width(), layout.height());
    document.push(Element::Rect(Rect {
        x: 0,
        y: 0,
        width: layout.width(),
        height: layout.height(),
        rx: 16,
        class: None,
        fill: Some("url(#bg-gradient)"),
        filter: None,
    }));
    document.push(Element::Text(Text {
        x: layout.padding,
        y: 42,
        class: "title",
        content: title.to_string(),
    }));
    document.push(Element::Text(Text {
        x: layout.padding,
        y: 64,
        class: "subtitle",
        content: subtitle.to_string(),
    }));

    let entries = stats.entries(section, range);
    for (index, entry) in entries.iter().take(layout.items).enumerate() {
        let image = match non_blank(entry.image.as_deref()) {
            Some(url) => embedder.embed(url).await,
            None => None,
        };
        document.push(card(&layout, section, index, entry, image));
    }

    document
}

/// Title and subtitle shown above the cards.
pub fn heading(section: Section, range: TimeRange) -> (&'static str, &'static str) {
    match (section, range) {
        (Section::Artists, TimeRange::ShortTerm) => ("My Recent Top Artists", "Last 4 weeks"),
        (Section::Artists, TimeRange::LongTerm) => ("My All-Time Top Artists", "Last 12 months"),
        (Section::TopSongs, TimeRange::ShortTerm) => ("My Recent Top Songs", "Last 4 weeks"),
        (Section::TopSongs, TimeRange::LongTerm) => ("My All-Time Top Songs", "Last 12 months"),
        (Section::LastAlbums, _) => (
            "My Recently Saved Albums",
            "Latest additions to my library",
        ),
    }
}

fn card(
    layout: &CardLayout,
    section: Section,
    index: usize,
    entry: &Entry,
    image: Option<String>,
) -> Element {
    let x = layout.card_x(index);
    let y = layout.card_y();
    let image_x = x + layout.image_inset;
    let image_y = y + layout.image_inset;

    let mut children = vec![Element::Rect(Rect {
        x,
        y,
        width: layout.card_width,
        height: layout.card_height,
        rx: 12,
        class: Some("card"),
        fill: None,
        filter: Some("url(#card-shadow)"),
    })];

    children.push(match image {
        Some(href) => Element::Image(Image {
            x: image_x,
            y: image_y,
            width: layout.image_size,
            height: layout.image_size,
            href,
        }),
        None => placeholder(image_x, image_y, layout.image_size),
    });

    let name = format!(
        "{}. {}",
        index + 1,
        non_blank(entry.name.as_deref()).unwrap_or(UNKNOWN)
    );
    for (line, content) in wrap_text(&name, layout.title_chars).into_iter().enumerate() {
        children.push(Element::Text(Text {
            x: image_x,
            y: y + layout.name_baseline() + line as u32 * LINE_HEIGHT,
            class: "name",
            content,
        }));
    }

    let detail = match section {
        Section::Artists => entry.genre.as_deref(),
        Section::TopSongs | Section::LastAlbums => entry.artist.as_deref(),
    };
    let detail = non_blank(detail).unwrap_or(UNKNOWN);
    if let Some(content) = wrap_text(detail, layout.title_chars).into_iter().next() {
        children.push(Element::Text(Text {
            x: image_x,
            y: y + layout.meta_baseline(),
            class: "meta",
            content,
        }));
    }

    Element::Group(Group {
        class: "entry",
        children,
    })
}

// A dark tile with a stylized record on it.
fn placeholder(x: u32, y: u32, size: u32) -> Element {
    let cx = x + size / 2;
    let cy = y + size / 2;

    Element::Group(Group {
        class: "placeholder",
        children: vec![
            Element::Rect(Rect {
                x,
                y,
                width: size,
                height: size,
                rx: 8,
                class: None,
                fill: None,
                filter: None,
            }),
            Element::Circle(Circle {
                cx,
                cy,
                r: size * 3 / 10,
                class: "glyph",
            }),
            Element::Circle(Circle {
                cx,
                cy,
                r: size / 12,
                class: "glyph",
            }),
        ],
    })
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
