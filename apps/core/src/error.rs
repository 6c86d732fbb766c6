use thiserror::Error;

/// Failures that stop a backdrop from being created.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BackdropError {
    /// `mount` is the selector that resolved to nothing; the message is
    /// what pages match on, so it does not include it.
    #[error("AIBackdrop: mount element not found.")]
    Configuration { mount: String },

    #[error("AIBackdrop: failed to create drawing surface: {0}")]
    Surface(String),
}

impl BackdropError {
    pub fn missing_mount(mount: impl Into<String>) -> Self {
        Self::Configuration {
            mount: mount.into(),
        }
    }
}

/// Transient failures talking to the remote question service.
///
/// None of these reach the page as a crash; the caller falls back to the
/// offline question bank.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("request timed out after {0} ms")]
    Timeout(u32),

    #[error("request aborted")]
    Aborted,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected status {0}")]
    Status(u16),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("key/value storage is unavailable")]
    Unavailable,

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}
