use anyhow::{anyhow, Context as _, Result};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, error};

use crate::spotify::{
    auth::{self, AccessToken},
    types::{CurrentPlayback, SpotifyConfig},
};

const PLAYER_URL: &str = "https://api.spotify.com/v1/me/player";

/// Spotify Web API client
pub struct SpotifyClient {
    config: SpotifyConfig,
    client: Client,
    token: AccessToken,
}

impl SpotifyClient {
    /// Create a client, running the interactive authorization flow if no
    /// usable cached token exists.
    pub async fn connect(config: SpotifyConfig) -> Result<Self> {
        let client = Client::new();
        let token = auth::obtain_token(&client, &config).await?;
        debug!("Spotify client ready");
        Ok(Self {
            config,
            client,
            token,
        })
    }

    /// Ask Spotify what is currently playing, if anything.
    ///
    /// Returns `None` when no playback session is active.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the token cannot be
    /// refreshed, or the response is malformed.
    pub async fn current_playback(&mut self) -> Result<Option<CurrentPlayback>> {
        if self.token.expires_soon() {
            self.token = auth::refresh(&self.client, &self.config, &self.token).await?;
        }

        let mut response = self.playback_request().await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            // Token invalidated before its advertised expiry
            self.token = auth::refresh(&self.client, &self.config, &self.token).await?;
            response = self.playback_request().await?;
        }

        match response.status() {
            StatusCode::NO_CONTENT => Ok(None),
            status if status.is_success() => {
                let playback: CurrentPlayback = response
                    .json()
                    .await
                    .context("Malformed playback response")?;
                debug!("Playback response: {:?}", playback);
                Ok(Some(playback))
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                error!("Playback request failed: {} - {}", status, body);
                Err(anyhow!("Playback request failed: {status}"))
            }
        }
    }

    async fn playback_request(&self) -> Result<Response> {
        let response = self
            .client
            .get(PLAYER_URL)
            .bearer_auth(&self.token.access_token)
            .send()
            .await?;
        Ok(response)
    }
}
