use reqwest::Url;
use spotstats::types::{Entry, Section};
use spotstats::utils::*;

// Helper function to create a test entry
fn create_test_entry(name: Option<&str>, genre: Option<&str>, artist: Option<&str>) -> Entry {
    Entry {
        name: name.map(str::to_string),
        image: name.map(|name| format!("http://img.test/{}.jpg", name)),
        genre: genre.map(str::to_string),
        artist: artist.map(str::to_string),
    }
}

#[test]
fn test_generate_code_verifier() {
    let verifier = generate_code_verifier();

    // Should be exactly 128 characters
    assert_eq!(verifier.len(), 128);

    // Should contain only alphanumeric characters
    assert!(verifier.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated verifiers should be different
    let verifier2 = generate_code_verifier();
    assert_ne!(verifier, verifier2);
}

#[test]
fn test_generate_code_challenge() {
    let verifier = "test_verifier_123";
    let challenge = generate_code_challenge(verifier);

    // SHA-256 digest is 32 bytes, 43 characters unpadded
    assert_eq!(challenge.len(), 43);

    // Should be deterministic - same input produces same output
    assert_eq!(challenge, generate_code_challenge(verifier));
    assert_ne!(challenge, generate_code_challenge("different_verifier"));

    // Should be base64-encoded (URL-safe, no padding)
    assert!(
        challenge
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    );
}

#[test]
fn test_generate_code_challenge_known_vector() {
    // RFC 7636, appendix B
    let challenge = generate_code_challenge("dBjftJeZ4CVP-mB92K27uhbUJU1p1r_wW1gFWFOEjXk");
    assert_eq!(challenge, "E9Melhoa2OwvFrEMTJguCHaoeK1t8URWbuGJSstw-cM");
}

#[test]
fn test_build_authorize_url_encodes_parameters() {
    let url = build_authorize_url(
        "https://accounts.spotify.com/authorize",
        "client123",
        "http://127.0.0.1:8080/callback",
        "challenge-abc",
        "user-top-read user-library-read",
    );

    let parsed = Url::parse(&url).unwrap();
    assert_eq!(parsed.host_str(), Some("accounts.spotify.com"));
    assert_eq!(parsed.path(), "/authorize");

    let pairs: Vec<(String, String)> = parsed
        .query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    assert!(pairs.contains(&("client_id".to_string(), "client123".to_string())));
    assert!(pairs.contains(&("response_type".to_string(), "code".to_string())));
    assert!(pairs.contains(&(
        "redirect_uri".to_string(),
        "http://127.0.0.1:8080/callback".to_string()
    )));
    assert!(pairs.contains(&("code_challenge_method".to_string(), "S256".to_string())));
    assert!(pairs.contains(&(
        "scope".to_string(),
        "user-top-read user-library-read".to_string()
    )));

    // Spaces in the scope must not appear raw
    assert!(!url.contains(' '));
}

#[test]
fn test_build_authorize_url_invalid_base() {
    let url = build_authorize_url("not a url", "id", "cb", "ch", "scope");

    assert!(url.starts_with("not a url?"));
    assert!(url.contains("client_id=id"));
    assert!(url.contains("code_challenge=ch"));
}

#[test]
fn test_entry_rows_artists_use_genre() {
    let entries = vec![
        create_test_entry(Some("First"), Some("shoegaze"), None),
        create_test_entry(Some("Second"), None, Some("ignored")),
    ];

    let rows = entry_rows(Section::Artists, &entries);

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].rank, 1);
    assert_eq!(rows[0].name, "First");
    assert_eq!(rows[0].details, "shoegaze");
    assert_eq!(rows[0].image, "http://img.test/First.jpg");
    assert_eq!(rows[1].rank, 2);
    assert_eq!(rows[1].details, "Unknown");
}

#[test]
fn test_entry_rows_songs_and_albums_use_artist() {
    let entries = vec![create_test_entry(Some("Song"), Some("ignored"), Some("Singer"))];

    assert_eq!(entry_rows(Section::TopSongs, &entries)[0].details, "Singer");
    assert_eq!(entry_rows(Section::LastAlbums, &entries)[0].details, "Singer");
}

#[test]
fn test_entry_rows_missing_fields() {
    let entries = vec![create_test_entry(None, None, None)];

    let rows = entry_rows(Section::LastAlbums, &entries);

    assert_eq!(rows[0].name, "Unknown");
    assert_eq!(rows[0].details, "Unknown");
    assert_eq!(rows[0].image, "-");
}

#[test]
fn test_entry_rows_empty() {
    assert!(entry_rows(Section::TopSongs, &[]).is_empty());
}
