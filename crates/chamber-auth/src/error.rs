use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not signed in")]
    NotAuthenticated,

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("failed to generate session token: {0}")]
    TokenGeneration(String),

    #[error("{0}")]
    Other(String),
}

impl AuthError {
    /// HTTP status a calling route reports for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::NotAuthenticated => 401,
            Self::Forbidden(_) => 403,
            Self::TokenGeneration(_) | Self::Other(_) => 500,
        }
    }
}
