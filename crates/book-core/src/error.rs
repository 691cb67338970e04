use thiserror::Error;

/// Failures while discovering or publishing the page catalog.
///
/// None of these reach the viewer's user: the resolver absorbs them into the
/// fallback catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The directory lookup itself failed (timer, transport, host error).
    #[error("page discovery failed: {0}")]
    Discovery(String),

    /// The lookup answered, but not with a success status.
    #[error("page discovery returned status {status}: {message}")]
    Status { status: String, message: String },

    /// The session catalog was already populated for this mount.
    #[error("catalog is frozen for this session")]
    Frozen,
}

/// Failures raised by a sound bank while starting playback.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SoundError {
    /// The host refused playback (autoplay policy, missing decoder).
    #[error("playback rejected: {0}")]
    Rejected(String),

    /// The bank was already released.
    #[error("sound bank released")]
    Released,
}
