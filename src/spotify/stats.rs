use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tokio::time::sleep;

use crate::{
    types::{
        Album, Artist, Entry, SavedAlbumsResponse, SimpleArtist, TimeRange, TopArtistsResponse,
        TopTracksResponse, Track,
    },
    warning,
};

/// Number of top artists/tracks requested per time range.
pub const TOP_LIMIT: usize = 5;
/// Number of saved albums requested.
pub const ALBUM_LIMIT: usize = 3;

const BAD_GATEWAY_RETRIES: u32 = 3;
const BAD_GATEWAY_DELAY: Duration = Duration::from_secs(2);

/// Performs an authenticated GET and decodes the JSON body.
///
/// Spotify occasionally answers 502 Bad Gateway under load; those responses
/// are retried a few times with a short pause. Every other error status is
/// returned immediately.
async fn get_json<T: DeserializeOwned>(
    client: &Client,
    token: &str,
    url: &str,
) -> Result<T, reqwest::Error> {
    let mut attempt = 0;

    loop {
        let response = client.get(url).bearer_auth(token).send().await?;

        match response.error_for_status() {
            Ok(valid_response) => return valid_response.json::<T>().await,
            Err(err) => {
                if err.status() == Some(StatusCode::BAD_GATEWAY) && attempt < BAD_GATEWAY_RETRIES {
                    attempt += 1;
                    warning!(
                        "Spotify answered 502 for {}, retrying ({}/{})",
                        url,
                        attempt,
                        BAD_GATEWAY_RETRIES
                    );
                    sleep(BAD_GATEWAY_DELAY).await;
                    continue;
                }
                return Err(err);
            }
        }
    }
}

/// Retrieves the user's top artists for one time range, normalized into entries.
///
/// # Arguments
///
/// * `client` - Shared HTTP client
/// * `api_url` - Spotify Web API base URL, e.g. `https://api.spotify.com/v1`
/// * `token` - Valid access token with the `user-top-read` scope
/// * `range` - Time window to query
///
/// # Returns
///
/// Up to [`TOP_LIMIT`] entries in Spotify's rank order.
pub async fn get_top_artists(
    client: &Client,
    api_url: &str,
    token: &str,
    range: TimeRange,
) -> Result<Vec<Entry>, reqwest::Error> {
    let url = format!(
        "{uri}/me/top/artists?time_range={range}&limit={limit}",
        uri = api_url,
        range = range,
        limit = TOP_LIMIT
    );

    let res = get_json::<TopArtistsResponse>(client, token, &url).await?;
    Ok(res.items.iter().map(artist_entry).collect())
}

/// Retrieves the user's top tracks for one time range, normalized into entries.
///
/// Uses the same endpoint shape and ordering guarantees as [`get_top_artists`].
pub async fn get_top_tracks(
    client: &Client,
    api_url: &str,
    token: &str,
    range: TimeRange,
) -> Result<Vec<Entry>, reqwest::Error> {
    let url = format!(
        "{uri}/me/top/tracks?time_range={range}&limit={limit}",
        uri = api_url,
        range = range,
        limit = TOP_LIMIT
    );

    let res = get_json::<TopTracksResponse>(client, token, &url).await?;
    Ok(res.items.iter().map(track_entry).collect())
}

/// Retrieves the most recently saved albums from the user's library.
///
/// Requires the `user-library-read` scope. Entries are ordered newest first.
pub async fn get_saved_albums(
    client: &Client,
    api_url: &str,
    token: &str,
) -> Result<Vec<Entry>, reqwest::Error> {
    let url = format!(
        "{uri}/me/albums?limit={limit}",
        uri = api_url,
        limit = ALBUM_LIMIT
    );

    let res = get_json::<SavedAlbumsResponse>(client, token, &url).await?;
    Ok(res.items.iter().map(|saved| album_entry(&saved.album)).collect())
}

/// Normalizes an artist object: first image, first genre.
///
/// Artists without images or genres yield `None` for those fields.
pub fn artist_entry(artist: &Artist) -> Entry {
    Entry {
        name: artist.name.clone(),
        image: artist.images.first().map(|image| image.url.clone()),
        genre: artist.genres.first().cloned(),
        artist: None,
    }
}

/// Normalizes a track object: album cover and first credited artist.
pub fn track_entry(track: &Track) -> Entry {
    Entry {
        name: track.name.clone(),
        image: track
            .album
            .as_ref()
            .and_then(|album| album.images.first())
            .map(|image| image.url.clone()),
        genre: None,
        artist: first_artist(&track.artists),
    }
}

/// Normalizes an album object: cover and first credited artist.
pub fn album_entry(album: &Album) -> Entry {
    Entry {
        name: album.name.clone(),
        image: album.images.first().map(|image| image.url.clone()),
        genre: None,
        artist: first_artist(&album.artists),
    }
}

fn first_artist(artists: &[SimpleArtist]) -> Option<String> {
    artists.first().and_then(|artist| artist.name.clone())
}
