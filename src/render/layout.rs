use crate::types::Section;

/// Grid geometry for one section's card layout.
///
/// All values are in SVG user units (pixels). Cards sit in a single row below
/// the title band, one column per displayed entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLayout {
    pub columns: u32,
    /// Upper bound on the number of entries rendered.
    pub items: usize,
    pub card_width: u32,
    pub card_height: u32,
    pub spacing: u32,
    pub padding: u32,
    /// Height of the band holding the title and subtitle.
    pub title_height: u32,
    /// Distance from the card's edge to its image region.
    pub image_inset: u32,
    pub image_size: u32,
    /// Character budget for the wrapped card title.
    pub title_chars: usize,
}

const TITLE_HEIGHT: u32 = 80;

const COMPACT: CardLayout = CardLayout {
    columns: 5,
    items: 5,
    card_width: 140,
    card_height: 210,
    spacing: 15,
    padding: 20,
    title_height: TITLE_HEIGHT,
    image_inset: 10,
    image_size: 120,
    title_chars: 16,
};

const WIDE: CardLayout = CardLayout {
    columns: 3,
    items: 3,
    card_width: 240,
    card_height: 300,
    spacing: 20,
    padding: 20,
    title_height: TITLE_HEIGHT,
    image_inset: 20,
    image_size: 200,
    title_chars: 18,
};

impl CardLayout {
    /// Albums get three large cards; artists and songs get five compact ones.
    pub fn for_section(section: Section) -> CardLayout {
        match section {
            Section::Artists | Section::TopSongs => COMPACT,
            Section::LastAlbums => WIDE,
        }
    }

    /// Total canvas width: every column, the gaps between them and the padding
    /// on both sides.
    pub fn width(&self) -> u32 {
        self.columns * self.card_width + (self.columns - 1) * self.spacing + 2 * self.padding
    }

    pub fn height(&self) -> u32 {
        self.card_height + self.title_height + self.padding
    }

    /// Left edge of the card at rank position `index` (0-based).
    pub fn card_x(&self, index: usize) -> u32 {
        let column = index as u32 % self.columns;
        self.padding + column * (self.card_width + self.spacing)
    }

    pub fn card_y(&self) -> u32 {
        self.title_height
    }

    /// Baseline of the first title line, relative to the card's top edge.
    pub fn name_baseline(&self) -> u32 {
        self.image_inset + self.image_size + 24
    }

    /// Baseline of the subtitle line, relative to the card's top edge. Leaves
    /// room for a two-line title above it.
    pub fn meta_baseline(&self) -> u32 {
        self.image_inset + self.image_size + 62
    }
}
