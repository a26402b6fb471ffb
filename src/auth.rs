use crate::error::BulkError;
use async_trait::async_trait;

/// Trait for supplying the auth token attached to every bulk request.
///
/// Token acquisition, caching and refresh live behind this seam; the
/// bulk client only asks for a currently-valid token and puts it in the
/// `X-Auth-Token` header. Implementations wrap whatever identity flow
/// the deployment uses (Keystone password grant, application
/// credentials, a pre-issued token).
///
/// # Examples
///
/// ```no_run
/// use swift_bulk::auth::TokenProvider;
/// use swift_bulk::error::BulkError;
/// use async_trait::async_trait;
///
/// struct KeystoneProvider { /* credentials, cached token */ }
///
/// #[async_trait]
/// impl TokenProvider for KeystoneProvider {
///     async fn token(&self) -> Result<String, BulkError> {
///         // Fetch or refresh against the identity service
///         Ok("gAAAAAB...".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Returns a token currently valid for the storage account.
    ///
    /// # Errors
    ///
    /// Returns [`BulkError::AuthenticationFailed`] when no valid token
    /// can be produced.
    async fn token(&self) -> Result<String, BulkError>;
}

/// Provider backed by a fixed, pre-issued token.
///
/// Useful for short-lived tooling and tests where the token is obtained
/// out of band and outlives the process.
#[derive(Clone, Debug)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn token(&self) -> Result<String, BulkError> {
        Ok(self.token.clone())
    }
}
