use thiserror::Error;

/// A `data-*` attribute that could not be parsed. The page falls back to the
/// default for that field.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("data-{key} is empty")]
    Empty { key: String },
    #[error("data-{key}: `{value}` is not a number")]
    InvalidNumber { key: String, value: String },
    #[error("data-{key}: `{value}` is not a boolean")]
    InvalidBool { key: String, value: String },
    #[error("data-{key}: `{value}` is not a color (expected `#rrggbb` or `r,g,b`)")]
    InvalidColor { key: String, value: String },
    #[error("data-{key}: unknown direction `{value}`")]
    InvalidDirection { key: String, value: String },
    #[error("data-{key}: malformed marker `{value}` (expected `lat,lon,size`)")]
    InvalidMarker { key: String, value: String },
}

/// Why `HTMLMediaElement.play()` was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("blocked by autoplay policy: {0}")]
    NotAllowed(String),
    #[error("interrupted by a pause: {0}")]
    Aborted(String),
    #[error("media source not supported: {0}")]
    NotSupported(String),
    #[error("playback failed: {0}")]
    Other(String),
}

impl PlaybackError {
    /// Classify a rejection by its `DOMException` name.
    pub fn from_dom(name: &str, message: &str) -> Self {
        let message = message.to_string();
        match name {
            "NotAllowedError" => PlaybackError::NotAllowed(message),
            "AbortError" => PlaybackError::Aborted(message),
            "NotSupportedError" => PlaybackError::NotSupported(message),
            _ => PlaybackError::Other(message),
        }
    }

    pub fn is_autoplay_policy(&self) -> bool {
        matches!(self, PlaybackError::NotAllowed(_))
    }
}

#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("missing element #{0}")]
    MissingElement(String),
    #[error("dom call failed: {0}")]
    Dom(String),
    #[error("gpu: {0}")]
    Gpu(String),
}
