//! Harness error types

/// Opaque failure produced by a handler under test.
///
/// Handlers are arbitrary user code; the harness never inspects or
/// transforms their failures beyond boxing them for transport.
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by the harness.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// The concurrency-limit simulator fired. This is the only synthetic
    /// failure the harness itself produces.
    #[error("concurrency limit exceeded")]
    ConcurrencyLimitExceeded,

    /// The handler under test failed. The original failure is preserved
    /// as the error source, unmodified.
    #[error("handler failed: {0}")]
    Handler(#[source] HandlerError),

    /// The cache storage collaborator failed.
    #[error("cache storage error: {0}")]
    Io(#[from] std::io::Error),

    /// The simulation configuration was rejected.
    #[error("invalid simulation config: {0}")]
    Config(String),
}

/// Result alias for harness operations.
pub type Result<T> = std::result::Result<T, HarnessError>;
