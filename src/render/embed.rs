use std::{future::Future, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, header::CONTENT_TYPE};

use crate::{Res, config, warning};

/// Media type used when an image response does not declare one.
pub const DEFAULT_IMAGE_TYPE: &str = "image/jpeg";

/// Largest image body that is inlined. Spotify covers are far below this.
pub const MAX_IMAGE_BYTES: usize = 2 * 1024 * 1024;

/// Turns a remote image URL into something an SVG `<image>` can reference
/// without hotlinking.
///
/// Implementations never fail loudly: `None` means "draw the placeholder".
pub trait ImageEmbedder {
    fn embed(&self, url: &str) -> impl Future<Output = Option<String>> + Send;
}

/// Fetches images over HTTP and inlines them as base64 data URIs.
///
/// Spotify's image CDN refuses hotlinked requests from third-party renderers
/// such as GitHub's camo proxy, so cover art has to be downloaded while the
/// SVG is generated. One GET per call; no retries and no caching, so the same
/// URL requested twice is fetched twice.
#[derive(Debug, Clone)]
pub struct HttpEmbedder {
    client: Client,
    max_bytes: usize,
}

impl HttpEmbedder {
    /// Creates an embedder whose requests give up after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        let client = match Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(e) => {
                warning!("Cannot configure image client, using defaults. Err: {}", e);
                Client::new()
            }
        };

        HttpEmbedder {
            client,
            max_bytes: MAX_IMAGE_BYTES,
        }
    }

    /// Rejects bodies larger than `max_bytes` instead of [`MAX_IMAGE_BYTES`].
    pub fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    /// Creates an embedder using `IMAGE_FETCH_TIMEOUT_SECS` (5 seconds by default).
    pub fn from_config() -> Self {
        Self::new(config::image_fetch_timeout())
    }

    async fn fetch(&self, url: &str) -> Res<String> {
        let mut response = self.client.get(url).send().await?.error_for_status()?;

        let limit = self.max_bytes as u64;
        if let Some(length) = response.content_length().filter(|length| *length > limit) {
            return Err(format!("image is {} bytes, limit is {}", length, limit).into());
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(media_type)
            .filter(|value| !value.is_empty())
            .unwrap_or(DEFAULT_IMAGE_TYPE)
            .to_string();

        let mut bytes = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            if bytes.len() + chunk.len() > self.max_bytes {
                return Err(format!("image exceeds {} bytes", self.max_bytes).into());
            }
            bytes.extend_from_slice(&chunk);
        }

        Ok(data_uri(&content_type, &bytes))
    }
}

impl ImageEmbedder for HttpEmbedder {
    async fn embed(&self, url: &str) -> Option<String> {
        match self.fetch(url).await {
            Ok(uri) => Some(uri),
            Err(e) => {
                warning!("Cannot embed image {}, using placeholder. Err: {}", url, e);
                None
            }
        }
    }
}

/// An embedder that never produces an image. Every card gets the placeholder.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImages;

impl ImageEmbedder for NoImages {
    async fn embed(&self, _url: &str) -> Option<String> {
        None
    }
}

/// Builds a `data:` URI with a standard (padded) base64 payload.
pub fn data_uri(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}

// "image/png; charset=binary" -> "image/png"
fn media_type(header: &str) -> &str {
    header.split(';').next().unwrap_or_default().trim()
}
