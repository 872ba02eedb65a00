use thiserror::Error;

/// Environment variable holding the JustWatch bearer token.
///
/// The token is lifted manually from an authenticated browser session
/// (network tab, Authorization header); there is no OAuth flow to run.
pub const AUTH_TOKEN_ENV: &str = "JUSTWATCH_AUTH_TOKEN";

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("{0} environment variable not set")]
    Missing(&'static str),
    #[error("{0} environment variable is empty")]
    Empty(&'static str),
}

/// Bearer token for the JustWatch GraphQL API, read once at startup and
/// shared read-only for the process lifetime.
#[derive(Clone)]
pub struct AuthToken {
    header_value: String,
}

impl AuthToken {
    /// Read the token from the environment. Fails before any network
    /// activity when the variable is missing or blank.
    pub fn from_env() -> Result<Self, CredentialError> {
        Self::from_value(std::env::var(AUTH_TOKEN_ENV).ok())
    }

    pub fn from_value(raw: Option<String>) -> Result<Self, CredentialError> {
        let raw = raw.ok_or(CredentialError::Missing(AUTH_TOKEN_ENV))?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CredentialError::Empty(AUTH_TOKEN_ENV));
        }
        // Accept either the bare token or a value already carrying the scheme
        let header_value = if trimmed.starts_with("Bearer ") {
            trimmed.to_string()
        } else {
            format!("Bearer {}", trimmed)
        };
        Ok(Self { header_value })
    }

    /// Value for the `Authorization` header, always `Bearer `-prefixed.
    pub fn header_value(&self) -> &str {
        &self.header_value
    }
}

// Keep the token out of logs and debug dumps
impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}
