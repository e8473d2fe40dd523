use std::time::Duration;

use reqwest::{Client, StatusCode, header, redirect::Policy};
use serde_json::Value;
use spotstats::{
    Res,
    api::AppState,
    config,
    management::{StaticStats, StatsProvider},
    render::ImageEmbedder,
    server,
    types::{Entry, RangedEntries, StatsBundle},
};

struct FixedImage;

impl ImageEmbedder for FixedImage {
    async fn embed(&self, _url: &str) -> Option<String> {
        Some("data:image/png;base64,AQID".to_string())
    }
}

struct BrokenStats;

impl StatsProvider for BrokenStats {
    async fn collect(&self) -> Res<StatsBundle> {
        Err("spotify is down".into())
    }
}

struct SlowStats;

impl StatsProvider for SlowStats {
    async fn collect(&self) -> Res<StatsBundle> {
        tokio::time::sleep(Duration::from_secs(2)).await;
        Ok(StatsBundle::default())
    }
}

fn entry(name: &str, detail: &str) -> Entry {
    Entry {
        name: Some(name.to_string()),
        image: Some(format!("http://img.test/{}.jpg", name)),
        genre: Some(detail.to_string()),
        artist: Some(detail.to_string()),
    }
}

fn bundle() -> StatsBundle {
    StatsBundle {
        top_artists: RangedEntries {
            short_term: vec![entry("Recent Artist", "dream pop")],
            long_term: vec![entry("Forever Artist", "post-rock")],
        },
        top_songs: RangedEntries {
            short_term: vec![entry("Recent Song", "Singer")],
            long_term: vec![],
        },
        last_albums: vec![entry("Fresh Album", "Band")],
    }
}

async fn spawn<P, E>(state: AppState<P, E>) -> String
where
    P: StatsProvider + Send + Sync + 'static,
    E: ImageEmbedder + Send + Sync + 'static,
{
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = server::router(state);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client() -> Client {
    Client::builder()
        .no_proxy()
        .redirect(Policy::none())
        .build()
        .unwrap()
}

async fn get(url: String) -> (StatusCode, header::HeaderMap, String) {
    let response = client().get(url).send().await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.text().await.unwrap();
    (status, headers, body)
}

#[tokio::test]
async fn test_stats_returns_svg() {
    let base = spawn(AppState::new(StaticStats::new(bundle()), FixedImage)).await;

    let (status, headers, body) = get(format!("{}/stats?type=top_songs&range=short_term", base)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/svg+xml");
    assert_eq!(headers[header::CACHE_CONTROL], "no-cache");
    assert!(body.starts_with("<svg"));
    assert!(body.contains("My Recent Top Songs"));
    assert!(body.contains("1. Recent Song"));
    assert!(body.contains("data:image/png;base64,AQID"));
}

#[tokio::test]
async fn test_stats_without_query_renders_recent_artists() {
    let base = spawn(AppState::new(StaticStats::new(bundle()), FixedImage)).await;

    let (status, _, body) = get(format!("{}/stats", base)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("My Recent Top Artists"));
    assert!(body.contains("1. Recent Artist"));
    assert!(!body.contains("Forever Artist"));
}

#[tokio::test]
async fn test_stats_long_term() {
    let base = spawn(AppState::new(StaticStats::new(bundle()), FixedImage)).await;

    let (status, _, body) = get(format!("{}/stats?type=artists&range=long_term", base)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("My All-Time Top Artists"));
    assert!(body.contains("Last 12 months"));
    assert!(body.contains("1. Forever"));
    assert!(!body.contains("Recent Artist"));
}

#[tokio::test]
async fn test_stats_unknown_range_falls_back_to_short_term() {
    let base = spawn(AppState::new(StaticStats::new(bundle()), FixedImage)).await;

    let (status, _, body) = get(format!("{}/stats?type=artists&range=medium_term", base)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("My Recent Top Artists"));
    assert!(body.contains("1. Recent Artist"));
}

#[tokio::test]
async fn test_stats_unknown_type_is_bad_request() {
    let base = spawn(AppState::new(StaticStats::new(bundle()), FixedImage)).await;

    let (status, _, body) = get(format!("{}/stats?type=nonexistent", base)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("nonexistent"));
}

#[tokio::test]
async fn test_stats_empty_section_still_renders() {
    let base = spawn(AppState::new(StaticStats::new(bundle()), FixedImage)).await;

    let (status, _, body) = get(format!("{}/stats?type=top_songs&range=long_term", base)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("My All-Time Top Songs"));
    assert!(!body.contains("class=\"entry\""));
}

#[tokio::test]
async fn test_json_returns_bundle() {
    let base = spawn(AppState::new(StaticStats::new(bundle()), FixedImage)).await;

    let (status, _, body) = get(format!("{}/json", base)).await;

    assert_eq!(status, StatusCode::OK);
    let parsed: StatsBundle = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed, bundle());
}

#[tokio::test]
async fn test_health() {
    let base = spawn(AppState::new(StaticStats::default(), FixedImage)).await;

    let (status, _, body) = get(format!("{}/health", base)).await;

    assert_eq!(status, StatusCode::OK);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "spotstats");
}

#[tokio::test]
async fn test_home_redirects() {
    let base = spawn(AppState::new(StaticStats::default(), FixedImage)).await;

    let (status, headers, _) = get(format!("{}/", base)).await;

    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(headers[header::LOCATION], config::homepage_url().as_str());
}

#[tokio::test]
async fn test_provider_failure_is_bad_gateway() {
    let base = spawn(AppState::new(BrokenStats, FixedImage)).await;

    let (status, _, body) = get(format!("{}/stats?type=artists", base)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body.contains("spotify is down"));

    let (status, _, body) = get(format!("{}/json", base)).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "spotify is down");
}

#[tokio::test]
async fn test_bad_selector_is_rejected_before_collecting() {
    let base = spawn(AppState::new(BrokenStats, FixedImage)).await;

    let (status, _, _) = get(format!("{}/stats?type=playlists", base)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_slow_render_times_out() {
    let state = AppState::new(SlowStats, FixedImage).with_render_timeout(Duration::from_millis(100));
    let base = spawn(state).await;

    let (status, _, _) = get(format!("{}/stats", base)).await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}
