//! Response interpretation and the shared operation outcome model.
//!
//! The bulk middleware reports per-item failure *inside* the response
//! body, under a transport status that is not trustworthy on its own: a
//! gateway-level error status can accompany a perfectly structured
//! partial-failure report, and a success status can still carry failed
//! items. The interpreter therefore parses the body first and treats a
//! structured body as authoritative, falling back to status-based
//! classification only when no parseable body exists.

use crate::error::BulkError;
use serde::Deserialize;

/// Per-item failure reported inside a bulk response body.
///
/// For bulk delete `name` is a `container` or `container/object` path;
/// for archive extraction it is the failing member's name inside the
/// archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemError {
    pub name: String,
    pub reason: String,
}

/// Overall classification of a bulk operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeStatus {
    /// Every item was processed; the error list is empty.
    Success,
    /// Some items were processed and some failed.
    PartialFailure,
    /// Nothing was processed and at least one item failed.
    TotalFailure,
}

/// Result of a bulk operation as reported by the service.
///
/// This is the single source of truth for per-item failure: callers
/// never inspect the transport status to learn whether individual items
/// failed. `errors` is empty exactly when the operation fully succeeded,
/// and preserves the order the service reported.
///
/// # Examples
///
/// ```no_run
/// use swift_bulk::response::{BulkOperationOutcome, OutcomeStatus};
///
/// fn report(outcome: &BulkOperationOutcome) {
///     match outcome.status {
///         OutcomeStatus::Success => println!("{} items processed", outcome.processed),
///         _ => {
///             for item in &outcome.errors {
///                 eprintln!("{}: {}", item.name, item.reason);
///             }
///         }
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct BulkOperationOutcome {
    /// Items successfully processed (objects deleted or files created).
    pub processed: u64,
    /// Items the service could not find. Missing items are not errors
    /// for bulk delete; always 0 for archive extraction.
    pub not_found: u64,
    /// Per-item failures in the order the service reported them.
    pub errors: Vec<ItemError>,
    /// Overall classification derived from `processed` and `errors`.
    pub status: OutcomeStatus,
}

impl BulkOperationOutcome {
    /// Outcome for a batch with nothing to do.
    pub(crate) fn empty() -> Self {
        Self {
            processed: 0,
            not_found: 0,
            errors: Vec::new(),
            status: OutcomeStatus::Success,
        }
    }

    fn from_counts(processed: u64, not_found: u64, errors: Vec<ItemError>) -> Self {
        let status = if errors.is_empty() {
            OutcomeStatus::Success
        } else if processed > 0 {
            OutcomeStatus::PartialFailure
        } else {
            OutcomeStatus::TotalFailure
        };
        Self {
            processed,
            not_found,
            errors,
            status,
        }
    }

    /// Checks whether every item was processed successfully.
    pub fn is_complete_success(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Bulk-delete response body as the service sends it.
#[derive(Debug, Deserialize)]
struct RawDeleteResponse {
    #[serde(rename = "Number Deleted")]
    number_deleted: u64,
    #[serde(rename = "Number Not Found", default)]
    number_not_found: u64,
    #[serde(rename = "Errors")]
    errors: Vec<(String, String)>,
    #[serde(rename = "Response Status", default)]
    response_status: Option<String>,
    #[serde(rename = "Response Body", default)]
    response_body: Option<String>,
}

/// Extract-archive response body as the service sends it.
#[derive(Debug, Deserialize)]
struct RawExtractResponse {
    #[serde(rename = "Number Files Created")]
    number_files_created: u64,
    #[serde(rename = "Errors")]
    errors: Vec<(String, String)>,
    #[serde(rename = "Response Status", default)]
    response_status: Option<String>,
    #[serde(rename = "Response Body", default)]
    response_body: Option<String>,
}

/// Interprets a raw bulk-delete response.
///
/// # Errors
///
/// [`BulkError::Rejected`] when the request was refused outright,
/// [`BulkError::DecodeFailed`] when a success-status body does not parse.
pub fn interpret_delete(transport_status: u16, body: &str) -> Result<BulkOperationOutcome, BulkError> {
    match serde_json::from_str::<RawDeleteResponse>(body) {
        Ok(raw) => build_outcome(
            raw.number_deleted,
            raw.number_not_found,
            raw.errors,
            raw.response_status,
            raw.response_body,
        ),
        Err(err) => Err(classify_unparsed(transport_status, body, &err)),
    }
}

/// Interprets a raw extract-archive response.
///
/// # Errors
///
/// Same classification as [`interpret_delete`].
pub fn interpret_extract(transport_status: u16, body: &str) -> Result<BulkOperationOutcome, BulkError> {
    match serde_json::from_str::<RawExtractResponse>(body) {
        Ok(raw) => build_outcome(
            raw.number_files_created,
            0,
            raw.errors,
            raw.response_status,
            raw.response_body,
        ),
        Err(err) => Err(classify_unparsed(transport_status, body, &err)),
    }
}

fn build_outcome(
    processed: u64,
    not_found: u64,
    errors: Vec<(String, String)>,
    response_status: Option<String>,
    response_body: Option<String>,
) -> Result<BulkOperationOutcome, BulkError> {
    // Whole-request rejection reported inside the body: an embedded
    // non-2xx status with nothing processed and no per-item errors
    // (e.g. "400 Bad Request" / "Invalid bulk delete.").
    if errors.is_empty() && processed == 0 {
        if let Some(code) = response_status
            .as_deref()
            .and_then(embedded_status_code)
            .filter(|code| !(200..300).contains(code))
        {
            let reason = match response_body.filter(|b| !b.is_empty()) {
                Some(body) => body,
                None => response_status.unwrap_or_default(),
            };
            return Err(BulkError::Rejected {
                status: code,
                reason,
            });
        }
    }

    if let Some(status_line) = &response_status {
        log::debug!(
            "bulk response: {} processed, {} not found, {} errors ({})",
            processed,
            not_found,
            errors.len(),
            status_line
        );
    }

    let errors = errors
        .into_iter()
        .map(|(name, reason)| ItemError { name, reason })
        .collect();
    Ok(BulkOperationOutcome::from_counts(processed, not_found, errors))
}

/// Classifies a response whose body did not parse: a non-2xx status is
/// an outright rejection, a 2xx status with a bad body is a decode
/// failure (the request may have partially succeeded server-side).
fn classify_unparsed(transport_status: u16, body: &str, err: &serde_json::Error) -> BulkError {
    if (200..300).contains(&transport_status) {
        BulkError::DecodeFailed(format!("{err} in body: {}", snippet(body)))
    } else {
        let reason = if body.trim().is_empty() {
            format!("HTTP {transport_status} with empty body")
        } else {
            snippet(body)
        };
        BulkError::Rejected {
            status: transport_status,
            reason,
        }
    }
}

/// First token of an embedded status line such as "412 Precondition Failed".
fn embedded_status_code(status_line: &str) -> Option<u16> {
    status_line.split_whitespace().next()?.parse().ok()
}

const SNIPPET_LEN: usize = 200;

fn snippet(body: &str) -> String {
    let trimmed = body.trim();
    match trimmed.char_indices().nth(SNIPPET_LEN) {
        Some((idx, _)) => format!("{}...", &trimmed[..idx]),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::{assert_err, assert_ok};

    const PARTIAL_DELETE: &str = r#"{
        "Number Deleted": 2,
        "Number Not Found": 0,
        "Response Status": "400 Bad Request",
        "Response Body": "",
        "Errors": [["c3", "not found"]]
    }"#;

    #[test]
    fn test_clean_delete_is_success() {
        let body = r#"{"Number Deleted": 3, "Number Not Found": 1,
            "Response Status": "200 OK", "Response Body": "", "Errors": []}"#;
        let outcome = assert_ok!(interpret_delete(200, body));
        assert_eq!(outcome.processed, 3);
        assert_eq!(outcome.not_found, 1);
        assert!(outcome.errors.is_empty());
        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert!(outcome.is_complete_success());
    }

    #[test]
    fn test_partial_failure_keeps_error_pairs() {
        let outcome = assert_ok!(interpret_delete(200, PARTIAL_DELETE));
        assert_eq!(outcome.processed, 2);
        assert_eq!(outcome.status, OutcomeStatus::PartialFailure);
        assert_eq!(
            outcome.errors,
            vec![ItemError {
                name: "c3".to_string(),
                reason: "not found".to_string()
            }]
        );
    }

    #[test]
    fn test_partial_failure_body_wins_over_gateway_status() {
        // A 502 carrying a structured body is still an outcome.
        let outcome = assert_ok!(interpret_delete(502, PARTIAL_DELETE));
        assert_eq!(outcome.status, OutcomeStatus::PartialFailure);
    }

    #[test]
    fn test_total_failure_when_nothing_processed() {
        let body = r#"{"Number Deleted": 0, "Number Not Found": 0,
            "Response Status": "400 Bad Request", "Response Body": "",
            "Errors": [["c1", "409 Conflict"], ["c2", "409 Conflict"]]}"#;
        let outcome = assert_ok!(interpret_delete(400, body));
        assert_eq!(outcome.status, OutcomeStatus::TotalFailure);
        assert_eq!(outcome.errors.len(), 2);
        assert_eq!(outcome.errors[0].name, "c1");
    }

    #[test]
    fn test_embedded_rejection_is_not_success() {
        let body = r#"{"Number Deleted": 0, "Number Not Found": 0,
            "Response Status": "400 Bad Request",
            "Response Body": "Invalid bulk delete.", "Errors": []}"#;
        let err = assert_err!(interpret_delete(400, body));
        match err {
            BulkError::Rejected { status, reason } => {
                assert_eq!(status, 400);
                assert_eq!(reason, "Invalid bulk delete.");
            }
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_body_with_error_status_is_rejection() {
        let err = assert_err!(interpret_delete(401, "<html>Unauthorized</html>"));
        match err {
            BulkError::Rejected { status, .. } => assert_eq!(status, 401),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn test_unparseable_body_with_success_status_is_decode_failure() {
        let err = assert_err!(interpret_delete(200, "not json"));
        assert!(matches!(err, BulkError::DecodeFailed(_)));

        let err = assert_err!(interpret_delete(200, ""));
        assert!(matches!(err, BulkError::DecodeFailed(_)));
    }

    #[test]
    fn test_extract_outcome_uses_member_names() {
        let body = r#"{"Number Files Created": 10,
            "Response Status": "201 Created", "Response Body": "",
            "Errors": [["pictures/cat.jpg", "403 Forbidden"]]}"#;
        let outcome = assert_ok!(interpret_extract(201, body));
        assert_eq!(outcome.processed, 10);
        assert_eq!(outcome.not_found, 0);
        assert_eq!(outcome.status, OutcomeStatus::PartialFailure);
        assert_eq!(outcome.errors[0].name, "pictures/cat.jpg");
    }

    #[test]
    fn test_extract_rejects_wrong_shape() {
        // A delete-shaped body is not an extract outcome.
        let err = assert_err!(interpret_extract(200, PARTIAL_DELETE));
        assert!(matches!(err, BulkError::DecodeFailed(_)));
    }
}
