use serde::Deserialize;

/// Configuration for the Spotify OAuth application
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

/// Response structure for the player endpoint
#[derive(Debug, Deserialize)]
pub struct CurrentPlayback {
    #[serde(default)]
    pub is_playing: bool,
    pub item: Option<PlaybackItem>,
}

/// The item a playback session is positioned on.
///
/// Podcast episodes carry no artists, hence the default.
#[derive(Debug, Deserialize)]
pub struct PlaybackItem {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[derive(Debug, Deserialize)]
pub struct Artist {
    pub name: String,
}
