//! Error types.
//!
//! No component in this layer has a fatal error path: playback failures are
//! retried once then swallowed, and a failed boundary fetch degrades the
//! map to an empty region list. These types exist so the fallible seams
//! (media backends, the dataset fetch) stay explicit `Result`s.

use thiserror::Error;

/// Failure to start playback on a media element.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The backend refused to start playback automatically. The presenter
    /// re-mutes and retries once before giving up.
    #[error("autoplay rejected by media backend")]
    AutoplayBlocked,

    /// Any other backend failure.
    #[error("media backend error: {0}")]
    Backend(String),
}

/// Failure to load the region boundary dataset.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("boundary request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("boundary data malformed: {0}")]
    Parse(#[from] serde_json::Error),
}
