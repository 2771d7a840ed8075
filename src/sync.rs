//! The bio synchronization state machine.
//!
//! Everything in here is pure: the driving loop feeds in the observed
//! playback state and the live profile text, and gets back the write to
//! perform, if any.

#[cfg(test)]
mod tests;

/// Sentinel sequence opening the system-owned suffix of the profile text.
pub const MARKER: &str = "🎶";
/// Spaces inside the annotation become non-breaking so clients render it
/// as a single unbreakable unit.
const NBSP: char = '\u{a0}';

/// A track reported by the playback source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub artists: Vec<String>,
}

/// What the playback source answered this iteration
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing(Track),
}

impl Track {
    /// Format the track for display: `"Title" by Artist1, Artist2`, with
    /// every space replaced by a non-breaking space.
    ///
    /// The formatted string doubles as the change-detection key between
    /// iterations.
    #[must_use]
    pub fn key(&self) -> String {
        format!("\"{}\" by {}", self.title, self.artists.join(", ")).replace(' ', "\u{a0}")
    }
}

/// Split off the system-owned annotation, returning the user-owned base
/// text.
///
/// Text before the first marker is kept (right-trimmed); without a marker
/// the whole text is the base, trimmed.
#[must_use]
pub fn strip_annotation(text: &str) -> &str {
    match text.split_once(MARKER) {
        Some((base, _)) => base.trim_end(),
        None => text.trim(),
    }
}

/// A profile write the planner decided on
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a now-listening annotation to the base text
    Announce { bio: String, key: String },
    /// Restore the bare base text
    Clear { bio: String },
}

impl Action {
    /// The full profile text this action writes
    #[must_use]
    pub fn bio(&self) -> &str {
        match self {
            Self::Announce { bio, .. } | Self::Clear { bio } => bio,
        }
    }
}

/// Remembers what this process last wrote into the annotation region.
///
/// Lives only for the process lifetime; after a restart the first tick
/// re-derives everything from the live profile text.
#[derive(Debug, Default)]
pub struct SyncState {
    last_announced: Option<String>,
}

impl SyncState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decide what, if anything, to write given the current playback state
    /// and the live profile text.
    ///
    /// The caller performs the write and reports it back via
    /// [`commit`](Self::commit); a failed write must not be committed.
    #[must_use]
    pub fn plan(&self, playback: &PlaybackState, profile_text: &str) -> Option<Action> {
        let base = strip_annotation(profile_text);
        match playback {
            PlaybackState::Playing(track) => {
                let key = track.key();
                if self.last_announced.as_deref() == Some(key.as_str()) {
                    return None;
                }
                let bio = format!("{base} {MARKER}{NBSP}Now{NBSP}listening: {key}")
                    .trim()
                    .to_owned();
                Some(Action::Announce { bio, key })
            }
            PlaybackState::Idle => self.last_announced.as_ref().map(|_| Action::Clear {
                bio: base.to_owned(),
            }),
        }
    }

    /// Record a successfully performed action.
    pub fn commit(&mut self, action: &Action) {
        self.last_announced = match action {
            Action::Announce { key, .. } => Some(key.clone()),
            Action::Clear { .. } => None,
        };
    }
}
