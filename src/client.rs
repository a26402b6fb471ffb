//! Bulk delete and extract-archive operations.
//!
//! One synchronous request/response exchange per call; the server
//! processes batch items serially, so latency grows with batch size and
//! a crash mid-batch leaves earlier items done and later items
//! untouched. Retry policy deliberately lives outside this client:
//! replaying a bulk request re-deletes or re-extracts already-processed
//! items with different per-item outcomes the second time.

use crate::auth::TokenProvider;
use crate::encoding::{encode_paths, escape_url_path};
use crate::error::BulkError;
use crate::response::{self, BulkOperationOutcome};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Archive formats accepted by the extract endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveFormat {
    Tar,
    TarGz,
    TarBz2,
}

impl ArchiveFormat {
    /// Value carried in the `extract-archive` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            ArchiveFormat::Tar => "tar",
            ArchiveFormat::TarGz => "tar.gz",
            ArchiveFormat::TarBz2 => "tar.bz2",
        }
    }
}

impl std::fmt::Display for ArchiveFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ArchiveFormat {
    type Err = BulkError;

    /// Validating boundary for string input: anything outside the three
    /// supported formats is a caller error, never a server round trip.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tar" => Ok(ArchiveFormat::Tar),
            "tar.gz" => Ok(ArchiveFormat::TarGz),
            "tar.bz2" => Ok(ArchiveFormat::TarBz2),
            other => Err(BulkError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// Configuration for bulk request timeouts.
///
/// The server works through batch items serially, so the operation
/// timeout defaults generous; size it to the largest batches you send
/// rather than to single-request latency.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct BulkConfig {
    /// Overall timeout for one bulk request in seconds (default: 600)
    operation_timeout_secs: Option<u64>,
    /// Connect timeout in seconds (default: 30)
    connect_timeout_secs: Option<u64>,
}

impl BulkConfig {
    pub fn new(operation_timeout_secs: u64, connect_timeout_secs: u64) -> Self {
        Self {
            operation_timeout_secs: Some(operation_timeout_secs),
            connect_timeout_secs: Some(connect_timeout_secs),
        }
    }

    /// Get the overall timeout for one bulk request
    pub fn operation_timeout_secs(&self) -> u64 {
        self.operation_timeout_secs.unwrap_or(600)
    }

    /// Get the connect timeout
    pub fn connect_timeout_secs(&self) -> u64 {
        self.connect_timeout_secs.unwrap_or(30)
    }
}

/// Client for the Swift bulk middleware.
///
/// Exposes the two bulk endpoints against one storage account: batch
/// deletion of containers and objects, and server-side extraction of an
/// uploaded tar archive. Holds no state between calls beyond the
/// underlying HTTP connection pool.
///
/// # Examples
///
/// ```no_run
/// use swift_bulk::auth::StaticTokenProvider;
/// use swift_bulk::client::BulkClient;
/// use std::sync::Arc;
///
/// # async fn run() -> Result<(), swift_bulk::error::BulkError> {
/// let client = BulkClient::new(
///     "https://storage.example.com/v1/AUTH_account",
///     Arc::new(StaticTokenProvider::new("gAAAAAB...")),
/// )?;
///
/// let outcome = client.bulk_delete(&["logs", "logs/2024-01-01.gz"]).await?;
/// if !outcome.is_complete_success() {
///     for item in &outcome.errors {
///         eprintln!("failed to delete {}: {}", item.name, item.reason);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub struct BulkClient {
    account_url: String,
    http_client: reqwest::Client,
    token_provider: Arc<dyn TokenProvider>,
}

impl BulkClient {
    /// Creates a client for the given storage account root with default
    /// timeouts.
    pub fn new(
        account_url: impl Into<String>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Result<Self, BulkError> {
        Self::with_config(account_url, token_provider, BulkConfig::default())
    }

    /// Creates a client with explicit timeout configuration.
    pub fn with_config(
        account_url: impl Into<String>,
        token_provider: Arc<dyn TokenProvider>,
        config: BulkConfig,
    ) -> Result<Self, BulkError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.operation_timeout_secs()))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs()))
            .build()
            .map_err(|e| BulkError::ClientCreation(e.to_string()))?;

        let mut account_url = account_url.into();
        while account_url.ends_with('/') {
            account_url.pop();
        }

        Ok(Self {
            account_url,
            http_client,
            token_provider,
        })
    }

    /// Deletes the given containers and objects in one request.
    ///
    /// Paths are `container` for an empty container or
    /// `container/object` for an object, in the order the server should
    /// process them. An empty batch returns a trivially successful
    /// outcome without touching the network.
    ///
    /// # Errors
    ///
    /// [`BulkError::EmptyPath`] for an empty batch entry (pre-network),
    /// [`BulkError::RequestFailed`] for transport failures, otherwise
    /// the interpreter's classification. Per-item failures are *not*
    /// errors; check [`BulkOperationOutcome::errors`].
    pub async fn bulk_delete<S: AsRef<str>>(
        &self,
        paths: &[S],
    ) -> Result<BulkOperationOutcome, BulkError> {
        if paths.iter().any(|path| path.as_ref().is_empty()) {
            return Err(BulkError::EmptyPath);
        }
        if paths.is_empty() {
            log::debug!("bulk delete with no paths, skipping request");
            return Ok(BulkOperationOutcome::empty());
        }

        let url = self.bulk_delete_url();
        let body = encode_paths(paths.iter().map(|path| path.as_ref()));
        let token = self.token_provider.token().await?;

        log::debug!("bulk deleting {} paths via {}", paths.len(), url);

        let response = self
            .http_client
            .delete(&url)
            .header("X-Auth-Token", token)
            .header(CONTENT_TYPE, "text/plain")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| BulkError::RequestFailed(format!("bulk delete: {e}")))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            BulkError::RequestFailed(format!("reading bulk delete response: {e}"))
        })?;

        response::interpret_delete(status, &text)
    }

    /// Extracts an uploaded archive under `path` in one request.
    ///
    /// `path` is a `container` or `container/prefix` to extract under;
    /// empty means the account root, in which case the archive's
    /// top-level directories name the target containers. The payload
    /// must be a valid archive of the declared format — the client sends
    /// it opaquely and does not validate its structure.
    ///
    /// # Errors
    ///
    /// Transport and interpreter classification as for
    /// [`BulkClient::bulk_delete`]. Per-member failures come back in
    /// [`BulkOperationOutcome::errors`], keyed by member name.
    pub async fn extract_archive(
        &self,
        path: &str,
        archive: Vec<u8>,
        format: ArchiveFormat,
    ) -> Result<BulkOperationOutcome, BulkError> {
        let url = self.extract_archive_url(path, format);
        let token = self.token_provider.token().await?;

        log::debug!(
            "extracting {} archive ({} bytes) via {}",
            format,
            archive.len(),
            url
        );

        let response = self
            .http_client
            .put(&url)
            .header("X-Auth-Token", token)
            .header(ACCEPT, "application/json")
            .body(archive)
            .send()
            .await
            .map_err(|e| BulkError::RequestFailed(format!("extract archive: {e}")))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| {
            BulkError::RequestFailed(format!("reading extract archive response: {e}"))
        })?;

        response::interpret_extract(status, &text)
    }

    fn bulk_delete_url(&self) -> String {
        format!("{}/?bulk-delete", self.account_url)
    }

    fn extract_archive_url(&self, path: &str, format: ArchiveFormat) -> String {
        let path = path.trim_start_matches('/');
        if path.is_empty() {
            format!("{}/?extract-archive={}", self.account_url, format.as_str())
        } else {
            format!(
                "{}/{}?extract-archive={}",
                self.account_url,
                escape_url_path(path),
                format.as_str()
            )
        }
    }
}
