use thiserror::Error;

/// Error types for bulk operations.
///
/// Only hard failures are represented here. A partial failure — some
/// batch items processed, some not — is *not* an error: it comes back as
/// an `Ok` outcome whose error list is non-empty, and callers inspect
/// that list. See [`crate::response::BulkOperationOutcome`].
#[derive(Debug, Error)]
pub enum BulkError {
    /// A bulk-delete batch contained an empty entry. Rejected before any
    /// network call.
    #[error("bulk delete batch contains an empty path")]
    EmptyPath,
    /// An archive format string outside `tar`, `tar.gz`, `tar.bz2`.
    /// Rejected before any network call.
    #[error("unsupported archive format: {0}")]
    UnsupportedFormat(String),
    /// The HTTP client could not be constructed.
    #[error("HTTP client creation failed: {0}")]
    ClientCreation(String),
    /// The token provider could not supply a token.
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),
    /// The request could not be executed: connection failure, timeout,
    /// or the response body could not be read.
    #[error("HTTP request failed: {0}")]
    RequestFailed(String),
    /// The service rejected the request outright (malformed request,
    /// auth failure, missing bulk endpoint) without a per-item outcome.
    #[error("request rejected with status {status}: {reason}")]
    Rejected { status: u16, reason: String },
    /// A response body was present or expected but did not parse into
    /// the bulk outcome shape. Distinct from [`BulkError::Rejected`]:
    /// the request may have partially succeeded server-side.
    #[error("failed to decode bulk response: {0}")]
    DecodeFailed(String),
}

// Result type alias for convenience
pub type BulkResult<T> = Result<T, BulkError>;
