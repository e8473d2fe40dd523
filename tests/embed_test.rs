use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use spotstats::render::{DEFAULT_IMAGE_TYPE, HttpEmbedder, ImageEmbedder, NoImages, data_uri};

// Serves `app` on an ephemeral local port and returns its base URL.
async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn image_server() -> Router {
    Router::new()
        .route(
            "/cover.png",
            get(|| async { ([(header::CONTENT_TYPE, "image/png")], vec![1u8, 2, 3]) }),
        )
        .route(
            "/cover.webp",
            get(|| async {
                (
                    [(header::CONTENT_TYPE, "image/webp; charset=binary")],
                    vec![1u8, 2, 3],
                )
            }),
        )
        .route(
            "/untyped",
            get(|| async { Response::new(Body::from(vec![0xFFu8, 0xD8])) }),
        )
        .route(
            "/missing",
            get(|| async { StatusCode::NOT_FOUND.into_response() }),
        )
        .route(
            "/large.png",
            get(|| async { ([(header::CONTENT_TYPE, "image/png")], vec![7u8; 4096]) }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(3)).await;
                ([(header::CONTENT_TYPE, "image/png")], vec![1u8])
            }),
        )
}

#[test]
fn test_data_uri_format() {
    assert_eq!(data_uri("image/png", &[1, 2, 3]), "data:image/png;base64,AQID");
    assert_eq!(data_uri("image/jpeg", &[0xFF, 0xD8]), "data:image/jpeg;base64,/9g=");
    assert_eq!(data_uri("image/gif", &[]), "data:image/gif;base64,");
}

#[tokio::test]
async fn test_embed_uses_declared_content_type() {
    let base = spawn(image_server()).await;
    let embedder = HttpEmbedder::new(Duration::from_secs(5));

    let uri = embedder.embed(&format!("{}/cover.png", base)).await;

    assert_eq!(uri.as_deref(), Some("data:image/png;base64,AQID"));
}

#[tokio::test]
async fn test_embed_strips_content_type_parameters() {
    let base = spawn(image_server()).await;
    let embedder = HttpEmbedder::new(Duration::from_secs(5));

    let uri = embedder.embed(&format!("{}/cover.webp", base)).await;

    assert_eq!(uri.as_deref(), Some("data:image/webp;base64,AQID"));
}

#[tokio::test]
async fn test_embed_defaults_missing_content_type() {
    let base = spawn(image_server()).await;
    let embedder = HttpEmbedder::new(Duration::from_secs(5));

    let uri = embedder.embed(&format!("{}/untyped", base)).await.unwrap();

    assert!(uri.starts_with(&format!("data:{};base64,", DEFAULT_IMAGE_TYPE)));
    assert_eq!(uri, "data:image/jpeg;base64,/9g=");
}

#[tokio::test]
async fn test_embed_error_status_is_none() {
    let base = spawn(image_server()).await;
    let embedder = HttpEmbedder::new(Duration::from_secs(5));

    assert_eq!(embedder.embed(&format!("{}/missing", base)).await, None);
    assert_eq!(embedder.embed(&format!("{}/nowhere", base)).await, None);
}

#[tokio::test]
async fn test_embed_oversized_image_is_none() {
    let base = spawn(image_server()).await;
    let embedder = HttpEmbedder::new(Duration::from_secs(5)).with_max_bytes(1024);

    assert_eq!(embedder.embed(&format!("{}/large.png", base)).await, None);

    // small images still pass under the same cap
    assert_eq!(
        embedder.embed(&format!("{}/cover.png", base)).await.as_deref(),
        Some("data:image/png;base64,AQID")
    );
}

#[tokio::test]
async fn test_embed_image_at_limit_is_inlined() {
    let base = spawn(image_server()).await;
    let embedder = HttpEmbedder::new(Duration::from_secs(5)).with_max_bytes(4096);

    let uri = embedder.embed(&format!("{}/large.png", base)).await.unwrap();

    assert!(uri.starts_with("data:image/png;base64,"));

    let default_cap = HttpEmbedder::new(Duration::from_secs(5));
    assert_eq!(default_cap.embed(&format!("{}/large.png", base)).await, Some(uri));
}

#[tokio::test]
async fn test_embed_timeout_is_none() {
    let base = spawn(image_server()).await;
    let embedder = HttpEmbedder::new(Duration::from_millis(200));

    assert_eq!(embedder.embed(&format!("{}/slow", base)).await, None);
}

#[tokio::test]
async fn test_embed_connection_refused_is_none() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let embedder = HttpEmbedder::new(Duration::from_secs(2));

    assert_eq!(embedder.embed(&format!("http://{}/cover.png", addr)).await, None);
}

#[tokio::test]
async fn test_embed_invalid_url_is_none() {
    let embedder = HttpEmbedder::new(Duration::from_secs(2));

    assert_eq!(embedder.embed("not a url").await, None);
}

#[tokio::test]
async fn test_no_images_never_embeds() {
    assert_eq!(NoImages.embed("http://img.test/a.jpg").await, None);
}
