use super::*;
use crate::spotify::types::{Artist, PlaybackItem};

#[test]
fn no_session_is_idle() {
    assert_eq!(playback_state(None), PlaybackState::Idle);
}

#[test]
fn paused_session_is_idle() {
    let response = CurrentPlayback {
        is_playing: false,
        item: Some(PlaybackItem {
            name: "Blue".to_owned(),
            artists: vec![],
        }),
    };
    assert_eq!(playback_state(Some(response)), PlaybackState::Idle);
}

#[test]
fn session_without_item_is_idle() {
    let response = CurrentPlayback {
        is_playing: true,
        item: None,
    };
    assert_eq!(playback_state(Some(response)), PlaybackState::Idle);
}

#[test]
fn playing_session_keeps_artist_order() {
    let response = CurrentPlayback {
        is_playing: true,
        item: Some(PlaybackItem {
            name: "Blue".to_owned(),
            artists: vec![
                Artist {
                    name: "Sky".to_owned(),
                },
                Artist {
                    name: "Sea".to_owned(),
                },
            ],
        }),
    };
    assert_eq!(
        playback_state(Some(response)),
        PlaybackState::Playing(Track {
            title: "Blue".to_owned(),
            artists: vec!["Sky".to_owned(), "Sea".to_owned()],
        })
    );
}
