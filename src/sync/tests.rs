use super::*;

fn track(title: &str, artists: &[&str]) -> Track {
    Track {
        title: title.to_owned(),
        artists: artists.iter().map(|a| (*a).to_owned()).collect(),
    }
}

#[test]
fn strip_annotation_without_marker_trims() {
    assert_eq!(strip_annotation("  Hi there  "), "Hi there");
    assert_eq!(strip_annotation(""), "");
}

#[test]
fn strip_annotation_truncates_at_first_marker() {
    assert_eq!(
        strip_annotation("Hi there 🎶\u{a0}Now\u{a0}listening: \"Blue\"\u{a0}by\u{a0}Sky"),
        "Hi there"
    );
    // Only the first marker counts
    assert_eq!(strip_annotation("a 🎶 b 🎶 c"), "a");
}

#[test]
fn strip_annotation_truncates_user_authored_marker() {
    // A marker the user typed themselves is indistinguishable from ours
    assert_eq!(strip_annotation("I love 🎶 a lot"), "I love");
}

#[test]
fn key_replaces_spaces_with_unbreakable_ones() {
    assert_eq!(track("Blue", &["Sky"]).key(), "\"Blue\"\u{a0}by\u{a0}Sky");
    assert_eq!(
        track("Song Two", &["A B", "C"]).key(),
        "\"Song\u{a0}Two\"\u{a0}by\u{a0}A\u{a0}B,\u{a0}C"
    );
}

#[test]
fn announces_new_track() {
    let state = SyncState::new();
    let playing = PlaybackState::Playing(track("Blue", &["Sky"]));

    let action = state.plan(&playing, "Hi there").unwrap();
    assert_eq!(
        action,
        Action::Announce {
            bio: "Hi there 🎶\u{a0}Now\u{a0}listening: \"Blue\"\u{a0}by\u{a0}Sky".to_owned(),
            key: "\"Blue\"\u{a0}by\u{a0}Sky".to_owned(),
        }
    );
}

#[test]
fn unchanged_track_plans_nothing() {
    let mut state = SyncState::new();
    let playing = PlaybackState::Playing(track("Blue", &["Sky"]));

    let action = state.plan(&playing, "Hi there").unwrap();
    state.commit(&action);

    assert_eq!(state.plan(&playing, action.bio()), None);
}

#[test]
fn idle_without_announcement_plans_nothing() {
    let state = SyncState::new();
    assert_eq!(state.plan(&PlaybackState::Idle, "Hi there"), None);
}

#[test]
fn idle_after_announcement_restores_base_text() {
    let mut state = SyncState::new();
    let playing = PlaybackState::Playing(track("Blue", &["Sky"]));

    let announce = state.plan(&playing, "Hi there").unwrap();
    state.commit(&announce);

    let clear = state.plan(&PlaybackState::Idle, announce.bio()).unwrap();
    assert_eq!(
        clear,
        Action::Clear {
            bio: "Hi there".to_owned()
        }
    );
    state.commit(&clear);

    // Once cleared, staying idle stays quiet
    assert_eq!(state.plan(&PlaybackState::Idle, "Hi there"), None);
}

#[test]
fn round_trip_preserves_base_text() {
    let state = SyncState::new();
    let playing = PlaybackState::Playing(track("Song Two", &["A B", "C"]));

    let action = state.plan(&playing, "my base bio").unwrap();
    assert_eq!(strip_annotation(action.bio()), "my base bio");
}

#[test]
fn track_change_rewrites_annotation() {
    let mut state = SyncState::new();

    let first = state
        .plan(&PlaybackState::Playing(track("Blue", &["Sky"])), "Hi there")
        .unwrap();
    state.commit(&first);

    let second = state
        .plan(&PlaybackState::Playing(track("Red", &["Sea"])), first.bio())
        .unwrap();
    assert_eq!(
        second.bio(),
        "Hi there 🎶\u{a0}Now\u{a0}listening: \"Red\"\u{a0}by\u{a0}Sea"
    );
}

#[test]
fn empty_profile_text_announces_without_leading_space() {
    let state = SyncState::new();
    let playing = PlaybackState::Playing(track("Blue", &["Sky"]));

    let action = state.plan(&playing, "").unwrap();
    assert_eq!(
        action.bio(),
        "🎶\u{a0}Now\u{a0}listening: \"Blue\"\u{a0}by\u{a0}Sky"
    );
}

#[test]
fn artistless_track_still_announces() {
    let state = SyncState::new();
    let playing = PlaybackState::Playing(track("Blue", &[]));

    let action = state.plan(&playing, "Hi").unwrap();
    assert_eq!(action.bio(), "Hi 🎶\u{a0}Now\u{a0}listening: \"Blue\"\u{a0}by");
}

#[test]
fn restart_with_live_annotation_replays_identical_write() {
    // A fresh state knows nothing about the annotation already in the
    // profile, so the first differing check rewrites the same bytes once.
    let state = SyncState::new();
    let playing = PlaybackState::Playing(track("Blue", &["Sky"]));
    let live = "Hi there 🎶\u{a0}Now\u{a0}listening: \"Blue\"\u{a0}by\u{a0}Sky";

    let action = state.plan(&playing, live).unwrap();
    assert_eq!(action.bio(), live);
}
