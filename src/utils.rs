use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{Rng, distr::Alphanumeric};
use reqwest::Url;
use sha2::{Digest, Sha256};

use crate::types::{Entry, EntryTableRow, Section};

pub fn generate_code_verifier() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(128)
        .map(char::from)
        .collect()
}

pub fn generate_code_challenge(verifier: &str) -> String {
    let hash = Sha256::digest(verifier.as_bytes());
    URL_SAFE_NO_PAD.encode(hash)
}

/// Builds the Spotify authorization URL for the PKCE flow, with every query
/// parameter percent-encoded.
///
/// Falls back to plain concatenation if `auth_url` itself is not a valid URL,
/// so the user still sees something to paste into a browser.
pub fn build_authorize_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    code_challenge: &str,
    scope: &str,
) -> String {
    let params = [
        ("client_id", client_id),
        ("response_type", "code"),
        ("redirect_uri", redirect_uri),
        ("code_challenge", code_challenge),
        ("code_challenge_method", "S256"),
        ("scope", scope),
    ];

    match Url::parse_with_params(auth_url, &params) {
        Ok(url) => url.to_string(),
        Err(_) => format!(
            "{}?{}",
            auth_url,
            params
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect::<Vec<_>>()
                .join("&")
        ),
    }
}

/// Converts entries into printable table rows, 1-based rank first.
pub fn entry_rows(section: Section, entries: &[Entry]) -> Vec<EntryTableRow> {
    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let details = match section {
                Section::Artists => entry.genre.clone(),
                Section::TopSongs | Section::LastAlbums => entry.artist.clone(),
            };

            EntryTableRow {
                rank: index + 1,
                name: entry.name.clone().unwrap_or_else(|| "Unknown".to_string()),
                details: details.unwrap_or_else(|| "Unknown".to_string()),
                image: entry.image.clone().unwrap_or_else(|| "-".to_string()),
            }
        })
        .collect()
}
