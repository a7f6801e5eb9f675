pub mod fullscreen;
pub mod playback;
pub mod rendered;

pub use fullscreen::{FullscreenCommand, FullscreenController, FullscreenState};
pub use playback::{MediaCommand, MediaEvent, PlaybackController, PlaybackState, VisualizerMode};
pub use rendered::Rendered;
