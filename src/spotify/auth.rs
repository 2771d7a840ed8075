//! OAuth token acquisition for the Spotify Web API.
//!
//! The refresh token persists in a cache file so later runs skip the
//! browser round-trip.

#[cfg(test)]
mod tests;

use std::{
    fs,
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::{anyhow, bail, Context as _, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::{
    io::{AsyncReadExt as _, AsyncWriteExt as _},
    net::TcpListener,
};
use tracing::{debug, error, info, warn};

use crate::spotify::types::SpotifyConfig;

const AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";
const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
/// Read-only access to the playback state is all this program needs.
const SCOPE: &str = "user-read-playback-state";
const CACHE_FILE: &str = ".spotify-token.json";
/// Tokens this close to expiry (seconds) are refreshed before use.
const EXPIRY_MARGIN: u64 = 60;

const REDIRECT_PAGE: &[u8] = b"HTTP/1.1 200 OK\r\n\
content-type: text/html\r\n\
connection: close\r\n\
\r\n\
<html><body>Authorization complete. You can close this tab.</body></html>";

/// A cached OAuth token pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix timestamp past which `access_token` is no longer valid
    pub expires_at: u64,
}

impl AccessToken {
    #[must_use]
    pub fn expires_soon(&self) -> bool {
        unix_now() + EXPIRY_MARGIN >= self.expires_at
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
    expires_in: u64,
}

/// Produce a usable token: from the cache if still valid, refreshed if
/// stale, or through the interactive authorization flow on first run.
pub async fn obtain_token(client: &Client, config: &SpotifyConfig) -> Result<AccessToken> {
    if let Some(cached) = load_cache() {
        if !cached.expires_soon() {
            debug!("Using cached access token");
            return Ok(cached);
        }
        match refresh(client, config, &cached).await {
            Ok(token) => return Ok(token),
            Err(e) => {
                warn!("Token refresh failed, falling back to interactive authorization: {e:#}");
            }
        }
    }
    authorize_interactively(client, config).await
}

/// Exchange the refresh token for a fresh access token.
pub async fn refresh(
    client: &Client,
    config: &SpotifyConfig,
    token: &AccessToken,
) -> Result<AccessToken> {
    debug!("Refreshing access token");
    let response = request_token(
        client,
        config,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", &token.refresh_token),
        ],
    )
    .await?;

    // Spotify only sometimes rotates the refresh token
    let token = AccessToken {
        access_token: response.access_token,
        refresh_token: response
            .refresh_token
            .unwrap_or_else(|| token.refresh_token.clone()),
        expires_at: unix_now() + response.expires_in,
    };
    save_cache(&token);
    Ok(token)
}

/// Walk the user through the authorization-code flow in their browser.
async fn authorize_interactively(client: &Client, config: &SpotifyConfig) -> Result<AccessToken> {
    let authorize_url = format!(
        "{AUTHORIZE_URL}?response_type=code&client_id={}&scope={}&redirect_uri={}",
        urlencoding::encode(&config.client_id),
        urlencoding::encode(SCOPE),
        urlencoding::encode(&config.redirect_uri),
    );
    println!("Open this URL in your browser to authorize Spotify access:\n\n  {authorize_url}\n");

    let code = wait_for_redirect(&config.redirect_uri).await?;
    info!("Authorization code received");

    let response = request_token(
        client,
        config,
        &[
            ("grant_type", "authorization_code"),
            ("code", &code),
            ("redirect_uri", &config.redirect_uri),
        ],
    )
    .await?;

    let refresh_token = response
        .refresh_token
        .ok_or_else(|| anyhow!("Authorization response carried no refresh token"))?;
    let token = AccessToken {
        access_token: response.access_token,
        refresh_token,
        expires_at: unix_now() + response.expires_in,
    };
    save_cache(&token);
    Ok(token)
}

async fn request_token(
    client: &Client,
    config: &SpotifyConfig,
    params: &[(&str, &str)],
) -> Result<TokenResponse> {
    let response = client
        .post(TOKEN_URL)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(params)
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        error!("Token request failed: {} - {}", status, body);
        bail!("Token request failed: {status}");
    }
    response.json().await.context("Malformed token response")
}

/// Listen on the redirect URI's port and capture the authorization code
/// Spotify appends when it sends the browser back.
async fn wait_for_redirect(redirect_uri: &str) -> Result<String> {
    let port = redirect_port(redirect_uri)?;
    let listener = TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("Failed to listen on redirect port {port}"))?;
    let (mut stream, _) = listener.accept().await?;

    // Only the request line is needed
    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    while !request.windows(2).any(|window| window == b"\r\n") {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        request.extend_from_slice(&chunk[..n]);
    }

    let code = extract_code(&String::from_utf8_lossy(&request))?;
    stream.write_all(REDIRECT_PAGE).await?;
    Ok(code)
}

/// Pull the `code` query parameter out of the redirect's request line.
fn extract_code(request: &str) -> Result<String> {
    let path = request
        .split_whitespace()
        .nth(1)
        .ok_or_else(|| anyhow!("Malformed redirect request"))?;
    let query = path.split_once('?').map(|(_, q)| q).unwrap_or("");

    for pair in query.split('&') {
        if let Some(code) = pair.strip_prefix("code=") {
            return Ok(urlencoding::decode(code)?.into_owned());
        }
        if let Some(error) = pair.strip_prefix("error=") {
            bail!("Authorization was refused: {error}");
        }
    }
    bail!("Redirect request carried no authorization code")
}

fn redirect_port(uri: &str) -> Result<u16> {
    let authority = uri.split_once("://").map_or(uri, |(_, rest)| rest);
    let authority = match authority.find(['/', '?']) {
        Some(end) => &authority[..end],
        None => authority,
    };
    match authority.split_once(':') {
        Some((_, port)) => port
            .parse()
            .with_context(|| format!("Invalid port in redirect URI {uri}")),
        None => Ok(80),
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs())
}

fn load_cache() -> Option<AccessToken> {
    let data = fs::read_to_string(CACHE_FILE).ok()?;
    match serde_json::from_str(&data) {
        Ok(token) => Some(token),
        Err(e) => {
            warn!("Ignoring unreadable token cache {CACHE_FILE}: {e}");
            None
        }
    }
}

/// Cache failures are logged but never fatal; the worst case is another
/// interactive authorization on the next run.
fn save_cache(token: &AccessToken) {
    let data = match serde_json::to_string_pretty(token) {
        Ok(data) => data,
        Err(e) => {
            warn!("Failed to serialize token cache: {e}");
            return;
        }
    };
    if let Err(e) = fs::write(CACHE_FILE, data) {
        warn!("Failed to write token cache {CACHE_FILE}: {e}");
    }
}
