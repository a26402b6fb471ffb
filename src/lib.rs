//! # Swift Bulk
//!
//! Client library for the OpenStack Swift bulk middleware: batch
//! deletion of many containers and objects in one request, and
//! server-side extraction of an uploaded tar archive into many objects
//! in one request.
//!
//! The service processes batch items serially and can partially fail,
//! so a transport-level success does not mean every item succeeded.
//! This crate encodes batches into the exact wire format the middleware
//! expects and interprets its mixed transport-status/embedded-outcome
//! responses into a typed [`response::BulkOperationOutcome`] instead of
//! erroring on partial failure.
//!
//! ## Modules
//!
//! - [`auth`] - Token provider seam for request authentication
//! - [`client`] - Bulk delete and extract-archive operations
//! - [`encoding`] - Wire encoding for bulk request bodies
//! - [`error`] - Error types
//! - [`response`] - Response interpretation and operation outcomes

pub mod auth;
pub mod client;
pub mod encoding;
pub mod error;
pub mod response;

pub use auth::{StaticTokenProvider, TokenProvider};
pub use client::{ArchiveFormat, BulkClient, BulkConfig};
pub use error::{BulkError, BulkResult};
pub use response::{BulkOperationOutcome, ItemError, OutcomeStatus};
