use thiserror::Error;

/// Errors from the remote service boundary.
///
/// `Auth` is split out from other HTTP failures because the import runner
/// treats it differently: a rejected token fails every subsequent call the
/// same way, so the batch aborts instead of burning through the file.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("JustWatch rejected the auth token (HTTP {status})")]
    Auth { status: u16 },

    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("unexpected API response: {0}")]
    Api(String),
}

impl ServiceError {
    pub fn is_auth(&self) -> bool {
        matches!(self, ServiceError::Auth { .. })
    }
}
