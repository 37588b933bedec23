//! Submission gateway module
//!
//! Persistence and notification live behind traits so the submission
//! flow can be exercised with mocks in tests.

mod client;
mod submit;
mod traits;

pub use client::{build_http_client, HttpLeadStore, HttpNotificationDispatcher};
pub use submit::{SubmissionGateway, SubmissionReceipt, SubmitError};
pub use traits::SubmissionRecord;

#[cfg(test)]
pub use traits::{MockLeadStore, MockNotificationDispatcher};
