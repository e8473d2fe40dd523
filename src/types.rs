use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    pub refresh_token: String,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: u64,
}

#[derive(Debug, Clone)]
pub struct PkceToken {
    pub code_verifier: String,
    pub token: Option<Token>,
}

/// One statistics item: an artist, a song or an album.
///
/// Every field is optional. The renderer substitutes `"Unknown"` for missing
/// text and a placeholder for a missing image. Artist entries carry `genre`,
/// song and album entries carry `artist`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

/// Entries for both time windows, in rank order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangedEntries {
    #[serde(default)]
    pub short_term: Vec<Entry>,
    #[serde(default)]
    pub long_term: Vec<Entry>,
}

impl RangedEntries {
    pub fn get(&self, range: TimeRange) -> &[Entry] {
        match range {
            TimeRange::ShortTerm => &self.short_term,
            TimeRange::LongTerm => &self.long_term,
        }
    }
}

/// Everything collected for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsBundle {
    #[serde(default)]
    pub top_artists: RangedEntries,
    #[serde(default)]
    pub top_songs: RangedEntries,
    #[serde(default)]
    pub last_albums: Vec<Entry>,
}

impl StatsBundle {
    /// The ordered entries a section displays. `range` is ignored for albums.
    pub fn entries(&self, section: Section, range: TimeRange) -> &[Entry] {
        match section {
            Section::Artists => self.top_artists.get(range),
            Section::TopSongs => self.top_songs.get(range),
            Section::LastAlbums => &self.last_albums,
        }
    }
}

/// Which category of statistics to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Artists,
    TopSongs,
    LastAlbums,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Artists, Section::TopSongs, Section::LastAlbums];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Artists => "artists",
            Section::TopSongs => "top_songs",
            Section::LastAlbums => "last_albums",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSelector(pub String);

impl fmt::Display for UnknownSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown selector '{}'", self.0)
    }
}

impl std::error::Error for UnknownSelector {}

impl FromStr for Section {
    type Err = UnknownSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "artists" => Ok(Section::Artists),
            "top_songs" => Ok(Section::TopSongs),
            "last_albums" => Ok(Section::LastAlbums),
            other => Err(UnknownSelector(other.to_string())),
        }
    }
}

/// Which time window of statistics to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TimeRange {
    #[default]
    ShortTerm,
    LongTerm,
}

impl TimeRange {
    pub const ALL: [TimeRange; 2] = [TimeRange::ShortTerm, TimeRange::LongTerm];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::ShortTerm => "short_term",
            TimeRange::LongTerm => "long_term",
        }
    }

    /// Parses a range selector, falling back to `short_term` for anything
    /// unrecognized (including an empty string).
    pub fn parse_or_default(s: &str) -> TimeRange {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = UnknownSelector;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "short_term" => Ok(TimeRange::ShortTerm),
            "long_term" => Ok(TimeRange::LongTerm),
            other => Err(UnknownSelector(other.to_string())),
        }
    }
}

#[derive(Tabled)]
pub struct EntryTableRow {
    pub rank: usize,
    pub name: String,
    pub details: String,
    pub image: String,
}

// Spotify Web API objects. Only the fields the collector reads are modelled,
// and every array defaults to empty so sparse responses still deserialize.

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimpleArtist {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Album {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    #[serde(default)]
    pub images: Vec<Image>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub artists: Vec<SimpleArtist>,
    #[serde(default)]
    pub album: Option<Album>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedAlbum {
    pub album: Album,
}

pub type TopArtistsResponse = Paging<Artist>;
pub type TopTracksResponse = Paging<Track>;
pub type SavedAlbumsResponse = Paging<SavedAlbum>;
