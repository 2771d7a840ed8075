use std::env;

use anyhow::{Context as _, Result};

use crate::spotify::SpotifyConfig;

const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";

/// Process configuration, read once at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub tg_api_id: i32,
    pub tg_api_hash: String,
    pub spotify: SpotifyConfig,
}

impl Config {
    /// Read configuration from the environment, honouring a local `.env`
    /// file.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or malformed.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let tg_api_id = required("TG_API_ID")?
            .parse()
            .context("TG_API_ID must be an integer")?;
        Ok(Self {
            tg_api_id,
            tg_api_hash: required("TG_API_HASH")?,
            spotify: SpotifyConfig {
                client_id: required("SPOTIFY_CLIENT_ID")?,
                client_secret: required("SPOTIFY_CLIENT_SECRET")?,
                redirect_uri: env::var("SPOTIFY_REDIRECT_URI")
                    .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_owned()),
            },
        })
    }
}

fn required(name: &str) -> Result<String> {
    env::var(name).with_context(|| format!("{name} is not set"))
}
