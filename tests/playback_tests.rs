// Host-side tests for the music widget's playback policy.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod error {
    include!("../src/error.rs");
}
mod state {
    pub mod playback {
        include!("../src/state/playback.rs");
    }
}

use error::PlaybackError;
use state::playback::*;

fn mounted(autoplay: bool) -> PlaybackController {
    let mut c = PlaybackController::new(autoplay);
    c.mount();
    c
}

fn blocked() -> PlaybackError {
    PlaybackError::from_dom("NotAllowedError", "play() failed because the user didn't interact")
}

#[test]
fn mount_sets_full_volume_then_attempts_autoplay() {
    let mut c = PlaybackController::new(true);
    let cmds = c.mount();
    assert_eq!(cmds.as_slice(), &[MediaCommand::SetVolume(1.0), MediaCommand::Play]);
    assert!(c.play_pending());
    // not playing until the promise resolves
    assert!(!c.state().is_playing);
}

#[test]
fn mount_without_autoplay_only_sets_volume() {
    let mut c = PlaybackController::new(false);
    assert_eq!(c.mount().as_slice(), &[MediaCommand::SetVolume(1.0)]);
    assert!(!c.play_pending());
}

#[test]
fn mount_twice_is_a_no_op() {
    let mut c = mounted(true);
    assert!(c.mount().is_empty());
}

#[test]
fn autoplay_success_marks_playing() {
    let mut c = mounted(true);
    c.play_settled(c.play_attempt(), Ok(()));
    assert!(c.state().is_playing);
    assert_eq!(c.visualizer(), VisualizerMode::Animated);
    assert_eq!(c.aria_label(), "Pause music");
}

#[test]
fn autoplay_rejection_is_swallowed_and_leaves_widget_idle() {
    let mut c = mounted(true);
    c.play_settled(c.play_attempt(), Err(blocked()));
    let s = c.state();
    assert!(!s.is_playing);
    assert!(!c.play_pending());
    assert_eq!(c.visualizer(), VisualizerMode::Static);
    assert_eq!(c.aria_label(), "Play music");
}

#[test]
fn toggle_after_blocked_autoplay_requests_play() {
    let mut c = mounted(true);
    c.play_settled(c.play_attempt(), Err(blocked()));
    assert_eq!(c.toggle(), Some(MediaCommand::Play));
    c.play_settled(c.play_attempt(), Ok(()));
    assert!(c.state().is_playing);
}

#[test]
fn toggle_while_playing_pauses_immediately() {
    let mut c = mounted(true);
    c.play_settled(c.play_attempt(), Ok(()));
    assert_eq!(c.toggle(), Some(MediaCommand::Pause));
    assert!(!c.state().is_playing);
}

#[test]
fn two_toggles_from_idle_end_paused() {
    let mut c = mounted(false);
    assert_eq!(c.toggle(), Some(MediaCommand::Play));
    // second press lands before the promise settles
    assert_eq!(c.toggle(), Some(MediaCommand::Pause));
    // the late resolution of the cancelled play must not flip the state back
    c.play_settled(c.play_attempt(), Ok(()));
    assert!(!c.state().is_playing);
}

#[test]
fn aborted_play_after_pause_is_not_an_error_state() {
    let mut c = mounted(false);
    c.toggle();
    c.toggle();
    c.play_settled(c.play_attempt(), Err(PlaybackError::from_dom("AbortError", "interrupted by pause()")));
    assert!(!c.state().is_playing);
    assert_eq!(c.toggle(), Some(MediaCommand::Play));
}

#[test]
fn native_media_events_win() {
    let mut c = mounted(true);
    c.play_settled(c.play_attempt(), Ok(()));
    c.media_event(MediaEvent::Paused);
    assert!(!c.state().is_playing);
    c.media_event(MediaEvent::Played);
    assert!(c.state().is_playing);
    assert!(!c.play_pending());
}

#[test]
fn glow_follows_hover_then_playback() {
    let mut c = mounted(false);
    assert_eq!(c.glow_class(), "glow-strong");
    c.set_hovered(true);
    assert!(c.state().is_hovered);
    assert_eq!(c.glow_class(), "glow-hover");
    c.set_hovered(false);
    c.toggle();
    c.play_settled(c.play_attempt(), Ok(()));
    assert_eq!(c.glow_class(), "glow-soft");
}

#[test]
fn unmount_pauses_audible_playback() {
    let mut c = mounted(true);
    c.play_settled(c.play_attempt(), Ok(()));
    assert_eq!(c.unmount(), Some(MediaCommand::Pause));
    assert!(!c.is_mounted());
}

#[test]
fn unmount_with_play_in_flight_still_pauses() {
    let mut c = mounted(true);
    assert_eq!(c.unmount(), Some(MediaCommand::Pause));
}

#[test]
fn nothing_changes_after_unmount() {
    let mut c = mounted(false);
    assert_eq!(c.unmount(), None);
    let before = c.state();
    assert_eq!(c.toggle(), None);
    c.play_settled(c.play_attempt(), Ok(()));
    c.media_event(MediaEvent::Played);
    c.set_hovered(true);
    assert_eq!(c.state(), before);
    assert!(c.mount().is_empty());
}

#[test]
fn toggle_before_mount_is_ignored() {
    let mut c = PlaybackController::new(true);
    assert_eq!(c.toggle(), None);
}

#[test]
fn dom_exception_names_are_classified() {
    assert!(blocked().is_autoplay_policy());
    assert!(matches!(
        PlaybackError::from_dom("NotSupportedError", "no source"),
        PlaybackError::NotSupported(_)
    ));
    assert!(matches!(
        PlaybackError::from_dom("AbortError", ""),
        PlaybackError::Aborted(_)
    ));
    let other = PlaybackError::from_dom("SecurityError", "nope");
    assert!(!other.is_autoplay_policy());
    assert_eq!(other, PlaybackError::Other("nope".to_string()));
}

#[test]
fn late_rejection_of_a_superseded_play_is_ignored() {
    let mut c = mounted(false);
    c.toggle();
    let first = c.play_attempt();
    c.toggle();
    assert_eq!(c.toggle(), Some(MediaCommand::Play));
    let second = c.play_attempt();
    assert_ne!(first, second);

    // the first play() rejects once the pause interrupts it, after the retry
    c.play_settled(first, Err(PlaybackError::from_dom("AbortError", "interrupted")));
    assert!(c.play_pending());
    c.media_event(MediaEvent::Played);
    assert!(c.state().is_playing);
}

#[test]
fn superseded_rejection_does_not_block_the_newer_success() {
    let mut c = mounted(false);
    c.toggle();
    let first = c.play_attempt();
    c.toggle();
    c.toggle();
    let second = c.play_attempt();
    c.play_settled(first, Err(PlaybackError::from_dom("AbortError", "interrupted")));
    c.play_settled(second, Ok(()));
    assert!(c.state().is_playing);
    assert!(!c.play_pending());
}

#[test]
fn native_pause_while_play_is_pending_cancels_it() {
    let mut c = mounted(true);
    let attempt = c.play_attempt();
    c.media_event(MediaEvent::Paused);
    assert!(!c.state().is_playing);
    assert!(!c.play_pending());
    // the interrupted promise must not revive playback
    c.play_settled(attempt, Ok(()));
    assert!(!c.state().is_playing);
    assert_eq!(c.toggle(), Some(MediaCommand::Play));
}
