#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FullscreenState {
    pub is_fullscreen: bool,
    pub is_hovered: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FullscreenCommand {
    /// `document.documentElement.requestFullscreen()`
    Enter,
    /// `document.exitFullscreen()`
    Exit,
}

/// Fullscreen button state. `is_fullscreen` only changes through
/// [`FullscreenController::fullscreen_changed`], i.e. the browser's
/// `fullscreenchange` notification; a toggle merely issues one request.
#[derive(Debug)]
pub struct FullscreenController {
    state: FullscreenState,
    subscribed: bool,
}

impl FullscreenController {
    pub fn new(initially_fullscreen: bool) -> Self {
        Self {
            state: FullscreenState {
                is_fullscreen: initially_fullscreen,
                is_hovered: false,
            },
            subscribed: true,
        }
    }

    pub fn state(&self) -> FullscreenState {
        self.state
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    pub fn toggle(&self) -> Option<FullscreenCommand> {
        if !self.subscribed {
            return None;
        }
        Some(if self.state.is_fullscreen {
            FullscreenCommand::Exit
        } else {
            FullscreenCommand::Enter
        })
    }

    pub fn fullscreen_changed(&mut self, is_fullscreen: bool) {
        if self.subscribed {
            self.state.is_fullscreen = is_fullscreen;
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        if self.subscribed {
            self.state.is_hovered = hovered;
        }
    }

    pub fn unsubscribe(&mut self) {
        self.subscribed = false;
    }

    pub fn aria_label(&self) -> &'static str {
        if self.state.is_fullscreen {
            "Exit fullscreen"
        } else {
            "Enter fullscreen"
        }
    }
}
