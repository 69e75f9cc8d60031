use thiserror::Error;

/// Failures that can occur while obtaining reconciliation data from the upstream API.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The request/response cycle could not be completed (connect, timeout, body read).
    #[error("{0}")]
    Transport(String),

    /// The upstream answered with a non-success status code.
    #[error("upstream returned HTTP {status}")]
    Status { status: u16 },

    /// The body was not a reconciliation document.
    #[error("{0}")]
    Malformed(String),
}

impl FetchError {
    /// Create a new Transport error
    pub fn transport(description: impl Into<String>) -> Self {
        Self::Transport(description.into())
    }

    /// Create a new Status error
    pub fn status(status: u16) -> Self {
        Self::Status { status }
    }

    /// Create a new Malformed error
    pub fn malformed(description: impl Into<String>) -> Self {
        Self::Malformed(description.into())
    }

    /// Builds a transport description from an error and its whole `source()` chain.
    ///
    /// HTTP client errors usually wrap the interesting part ("Connection refused")
    /// a few levels down, so the chain is joined with `": "`.
    pub fn from_error_chain(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut description = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let text = cause.to_string();
            if !description.contains(&text) {
                description.push_str(": ");
                description.push_str(&text);
            }
            source = cause.source();
        }
        Self::Transport(description)
    }

    /// Transport failures and bad status codes both mean "could not reach the data".
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Status { .. })
    }

    /// Get error kind for logging and the JSON API
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::Transport(_) | Self::Status { .. } => FetchErrorKind::Transport,
            Self::Malformed(_) => FetchErrorKind::Malformed,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Malformed(err.to_string())
    }
}

/// Coarse classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchErrorKind {
    Transport,
    Malformed,
}

impl std::fmt::Display for FetchErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport => write!(f, "transport"),
            Self::Malformed => write!(f, "malformed"),
        }
    }
}

/// Convenience result type for fetch operations
pub type Result<T> = std::result::Result<T, FetchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Outer(Inner);

    #[derive(Debug)]
    struct Inner;

    impl std::fmt::Display for Outer {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "error sending request")
        }
    }

    impl std::fmt::Display for Inner {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "Connection refused")
        }
    }

    impl std::error::Error for Outer {
        fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
            Some(&self.0)
        }
    }

    impl std::error::Error for Inner {}

    #[test]
    fn test_error_chain_is_flattened() {
        let err = FetchError::from_error_chain(&Outer(Inner));
        assert_eq!(
            err,
            FetchError::transport("error sending request: Connection refused")
        );
        assert!(err.is_transport());
    }

    #[test]
    fn test_status_error() {
        let err = FetchError::status(503);
        assert_eq!(err.to_string(), "upstream returned HTTP 503");
        assert!(err.is_transport());
        assert_eq!(err.kind(), FetchErrorKind::Transport);
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid json }").unwrap_err();
        let err: FetchError = json_err.into();

        assert!(matches!(err, FetchError::Malformed(_)));
        assert!(!err.is_transport());
        assert_eq!(err.kind(), FetchErrorKind::Malformed);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(FetchErrorKind::Transport.to_string(), "transport");
        assert_eq!(FetchErrorKind::Malformed.to_string(), "malformed");
    }
}
