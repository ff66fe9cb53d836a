use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),

    /// A configured channel is missing on the server or has the wrong type.
    #[error("misconfigured {what}: {reason}")]
    Misconfigured { what: &'static str, reason: String },
}

/// Failures reported by the chat platform adapter.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("http error {status}: {message}")]
    Http { status: u16, message: String },

    #[error("gateway error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether the target object no longer exists on the platform.
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound(_) | GatewayError::Http { status: 404, .. })
    }
}

/// Error returned by controller operations before it is logged.
#[derive(Debug, thiserror::Error)]
pub enum MakeshiftError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
