use std::{sync::Arc, time::Duration};

use chrono::Utc;
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    Res, config, info,
    server::start_callback_server,
    success,
    types::{PkceToken, Token},
    utils, warning,
};

const CALLBACK_WAIT: Duration = Duration::from_secs(120);

/// Runs the one-time OAuth 2.0 PKCE flow and prints the resulting refresh token.
///
/// The stats service itself never talks to a browser: it runs unattended with
/// the refresh token stored in `SPOTIFY_REFRESH_TOKEN`. This flow exists to
/// obtain that token.
///
/// # Authentication Flow
///
/// 1. **PKCE Setup**: Generates a code verifier and its SHA256 challenge
/// 2. **Server Start**: Launches the local callback server on `SERVER_ADDRESS`
/// 3. **Browser Launch**: Opens the Spotify authorization URL
/// 4. **Callback Handling**: The callback exchanges the code for a token
/// 5. **Output**: The refresh token is printed for the `.env` file
///
/// # Errors
///
/// Returns an error when the client ID is not configured, the callback server
/// cannot start, or no token arrives within two minutes.
pub async fn auth(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Res<()> {
    let client_id = config::spotify_client_id()?;

    // generate PKCE verifier and challenge
    let code_verifier = utils::generate_code_verifier();
    let code_challenge = utils::generate_code_challenge(&code_verifier);

    {
        let mut lock = shared_state.lock().await;
        *lock = Some(PkceToken {
            code_verifier: code_verifier.clone(),
            token: None,
        });
    }

    let server_state = Arc::clone(&shared_state);
    let server = tokio::spawn(async move {
        if let Err(e) = start_callback_server(server_state).await {
            warning!("Callback server stopped. Err: {}", e);
        }
    });

    let auth_url = utils::build_authorize_url(
        &config::spotify_apiauth_url(),
        &client_id,
        &config::spotify_redirect_uri(),
        &code_challenge,
        &config::spotify_scope(),
    );

    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    let token = wait_for_token(shared_state).await;
    server.abort();

    match token {
        Some(t) => {
            success!("Authentication successful!");
            info!("Add the following line to {}:", config::env_path().display());
            println!("SPOTIFY_REFRESH_TOKEN={}", t.refresh_token);
            Ok(())
        }
        None => Err("Authentication failed or timed out.".into()),
    }
}

async fn wait_for_token(shared_state: Arc<Mutex<Option<PkceToken>>>) -> Option<Token> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < CALLBACK_WAIT {
        let lock = shared_state.lock().await;
        if let Some(token) = lock.as_ref().and_then(|pkce| pkce.token.as_ref()) {
            return Some(token.clone());
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges a refresh token for a fresh access token.
///
/// Spotify does not always rotate the refresh token. When the response omits
/// one, the token passed in is kept.
///
/// # Errors
///
/// Returns an error for network failures, error statuses, and responses
/// without an `access_token`.
pub async fn refresh_token(refresh_token: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id()?;

    let client = Client::new();
    let mut request = client.post(config::spotify_apitoken_url()).form(&[
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
        ("client_id", client_id.as_str()),
    ]);
    if let Some(secret) = config::spotify_client_secret() {
        request = request.basic_auth(&client_id, Some(secret));
    }

    let res = request
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(|e| e.to_string())?;
    let json: Value = res.json().await.map_err(|e| e.to_string())?;

    parse_token(&json, refresh_token)
}

/// Completes the authorization code flow with the PKCE verifier.
pub async fn exchange_code_pkce(code: &str, verifier: &str) -> Result<Token, String> {
    let client_id = config::spotify_client_id()?;
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::new();
    let res = client
        .post(config::spotify_apitoken_url())
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", client_id.as_str()),
            ("code", code),
            ("code_verifier", verifier),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await
        .and_then(|res| res.error_for_status())
        .map_err(|e| e.to_string())?;

    let json: Value = res.json().await.map_err(|e| e.to_string())?;

    parse_token(&json, "")
}

/// Builds a [`Token`] from a token endpoint response.
///
/// `previous_refresh` is used when the response carries no refresh token.
pub fn parse_token(json: &Value, previous_refresh: &str) -> Result<Token, String> {
    let access_token = json["access_token"]
        .as_str()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| format!("token response without access_token: {}", json))?;

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .filter(|token| !token.is_empty())
            .unwrap_or(previous_refresh)
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now().timestamp() as u64,
    })
}
