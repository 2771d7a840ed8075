//! The polling loop driving the synchronizer.

#[cfg(test)]
mod tests;

use std::time::Duration;

use anyhow::{Context as _, Result};

use crate::{
    spotify::{types::CurrentPlayback, SpotifyClient},
    sync::{Action, PlaybackState, SyncState, Track},
    telegram::ProfileClient,
};

/// Map the playback endpoint's answer onto the two states the loop cares
/// about. Paused sessions and sessions without a track item count as idle.
fn playback_state(response: Option<CurrentPlayback>) -> PlaybackState {
    let Some(playback) = response else {
        return PlaybackState::Idle;
    };
    if !playback.is_playing {
        return PlaybackState::Idle;
    }
    match playback.item {
        Some(item) => PlaybackState::Playing(Track {
            title: item.name,
            artists: item.artists.into_iter().map(|artist| artist.name).collect(),
        }),
        None => PlaybackState::Idle,
    }
}

/// Run one sync iteration: poll playback, read the profile text, write it
/// back if it needs to change.
///
/// Errors from either collaborator abort the iteration before any state
/// update; the caller decides whether to retry.
async fn tick(
    state: &mut SyncState,
    spotify: &mut SpotifyClient,
    telegram: &ProfileClient,
) -> Result<()> {
    let playback = playback_state(spotify.current_playback().await?);
    let profile_text = telegram.profile_text().await?;

    let Some(action) = state.plan(&playback, &profile_text) else {
        tracing::debug!("Profile text already in sync");
        return Ok(());
    };

    telegram
        .set_profile_text(action.bio())
        .await
        .context("Failed to write profile text")?;
    match &action {
        Action::Announce { bio, .. } => tracing::debug!("Updated bio -> {bio}"),
        Action::Clear { .. } => tracing::debug!("Cleared track from bio"),
    }
    state.commit(&action);
    Ok(())
}

/// Drive the sync loop until the process is terminated.
///
/// Iteration failures are logged and retried at the next interval; nothing
/// past startup is fatal.
pub async fn run(
    mut spotify: SpotifyClient,
    telegram: ProfileClient,
    interval: Duration,
    single_pass: bool,
) -> Result<()> {
    let mut state = SyncState::new();
    loop {
        if let Err(e) = tick(&mut state, &mut spotify, &telegram).await {
            tracing::error!("Sync iteration failed: {e:#}");
        }
        if single_pass {
            tracing::info!("Single pass mode, exiting");
            return Ok(());
        }
        tokio::time::sleep(interval).await;
    }
}
