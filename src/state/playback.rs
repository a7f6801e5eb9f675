use crate::constants::MUSIC_VOLUME;
use crate::error::PlaybackError;
use smallvec::SmallVec;

/// UI state of the background-music widget.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackState {
    pub is_playing: bool,
    pub is_hovered: bool,
}

/// Instruction for the media element. The controller never touches the element
/// itself; the widget executes these and reports back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MediaCommand {
    SetVolume(f64),
    Play,
    Pause,
}

/// Native `play` / `pause` notifications from the media element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaEvent {
    Played,
    Paused,
}

/// What the decorative bars button shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualizerMode {
    Animated,
    Static,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Mounted,
    Unmounted,
}

pub type Commands = SmallVec<[MediaCommand; 2]>;

/// Playback policy of the music widget.
///
/// Inputs are the widget lifecycle, user toggles, settlement of `play()`
/// promises and native media events; outputs are [`MediaCommand`]s. Native
/// events always win, so pauses coming from outside the page (media keys,
/// another tab taking audio focus) show up in the state.
#[derive(Debug)]
pub struct PlaybackController {
    state: PlaybackState,
    autoplay: bool,
    phase: Phase,
    play_pending: bool,
    // Id of the most recent Play command; settlements of older attempts are stale.
    play_attempt: u64,
}

impl PlaybackController {
    pub fn new(autoplay: bool) -> Self {
        Self {
            state: PlaybackState::default(),
            autoplay,
            phase: Phase::Idle,
            play_pending: false,
            play_attempt: 0,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.phase == Phase::Mounted
    }

    pub fn play_pending(&self) -> bool {
        self.play_pending
    }

    /// Id to pass back to [`PlaybackController::play_settled`] for the Play
    /// command just issued.
    pub fn play_attempt(&self) -> u64 {
        self.play_attempt
    }

    fn start_play(&mut self) -> MediaCommand {
        self.play_pending = true;
        self.play_attempt += 1;
        MediaCommand::Play
    }

    /// Volume to maximum, then an autoplay attempt when enabled. Only the first
    /// call has an effect.
    pub fn mount(&mut self) -> Commands {
        let mut cmds = Commands::new();
        if self.phase != Phase::Idle {
            return cmds;
        }
        self.phase = Phase::Mounted;
        cmds.push(MediaCommand::SetVolume(MUSIC_VOLUME));
        if self.autoplay {
            cmds.push(self.start_play());
        }
        cmds
    }

    /// Pause when playing (or when a start is still in flight), otherwise try
    /// to start. `is_playing` only becomes true once the start succeeds.
    pub fn toggle(&mut self) -> Option<MediaCommand> {
        if !self.is_mounted() {
            return None;
        }
        if self.state.is_playing || self.play_pending {
            self.play_pending = false;
            self.state.is_playing = false;
            Some(MediaCommand::Pause)
        } else {
            Some(self.start_play())
        }
    }

    /// Outcome of the `play()` promise for `attempt`. Rejections are logged and
    /// leave the widget not playing; they never propagate. Outcomes of attempts
    /// that were cancelled or superseded are ignored.
    pub fn play_settled(&mut self, attempt: u64, result: Result<(), PlaybackError>) {
        if !self.is_mounted() {
            return;
        }
        if attempt != self.play_attempt || !self.play_pending {
            log::debug!("[music] ignoring stale play result #{}", attempt);
            return;
        }
        self.play_pending = false;
        match result {
            Ok(()) => self.state.is_playing = true,
            Err(e) => {
                if e.is_autoplay_policy() {
                    log::info!("[music] playback needs a user gesture: {}", e);
                } else {
                    log::warn!("[music] playback did not start: {}", e);
                }
                self.state.is_playing = false;
            }
        }
    }

    pub fn media_event(&mut self, event: MediaEvent) {
        if !self.is_mounted() {
            return;
        }
        match event {
            MediaEvent::Played => {
                self.play_pending = false;
                self.state.is_playing = true;
            }
            MediaEvent::Paused => {
                self.play_pending = false;
                self.state.is_playing = false;
            }
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        if self.is_mounted() {
            self.state.is_hovered = hovered;
        }
    }

    /// Stop reacting to anything. Returns a pause when audio is (or may soon
    /// be) playing so a detached element does not keep sounding.
    pub fn unmount(&mut self) -> Option<MediaCommand> {
        if !self.is_mounted() {
            self.phase = Phase::Unmounted;
            return None;
        }
        self.phase = Phase::Unmounted;
        let audible = self.state.is_playing || self.play_pending;
        self.play_pending = false;
        audible.then_some(MediaCommand::Pause)
    }

    pub fn visualizer(&self) -> VisualizerMode {
        if self.state.is_playing {
            VisualizerMode::Animated
        } else {
            VisualizerMode::Static
        }
    }

    pub fn aria_label(&self) -> &'static str {
        if self.state.is_playing {
            "Pause music"
        } else {
            "Play music"
        }
    }

    /// Glow classes for the toggle button: strong glow invites a click while
    /// idle, hover always wins.
    pub fn glow_class(&self) -> &'static str {
        match (self.state.is_hovered, self.state.is_playing) {
            (true, _) => "glow-hover",
            (false, true) => "glow-soft",
            (false, false) => "glow-strong",
        }
    }
}
