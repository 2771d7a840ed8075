pub mod api;
pub mod auth;
pub mod types;

pub use api::SpotifyClient;
pub use types::SpotifyConfig;
