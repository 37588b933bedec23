//! Trait abstractions for the persistence and notification
//! collaborators, enabling mocking in tests

use crate::state::FormRecord;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// The finished submission as sent over the wire
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionRecord {
    pub full_name: String,
    pub email: String,
    pub interests: Vec<String>,
    pub submitted_at: DateTime<Utc>,
    pub submission_id: Uuid,
}

impl SubmissionRecord {
    pub fn from_form(record: &FormRecord) -> Self {
        Self {
            full_name: record.full_name(),
            email: record.email.trim().to_string(),
            interests: record.interests(),
            submitted_at: Utc::now(),
            submission_id: Uuid::new_v4(),
        }
    }
}

/// Persistence boundary for completed submissions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Persist one submission; an error here is fatal to the attempt
    async fn insert_lead(&self, record: &SubmissionRecord) -> Result<()>;
}

/// Notification boundary: one confirmation to the submitter, one
/// alert to the operator address. Failure must not roll back
/// persistence.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(&self, record: &SubmissionRecord) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{PrefField, Region};

    #[test]
    fn test_from_form_carries_name_email_and_interests() {
        let mut form = FormRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: " ada@x.io ".to_string(),
            region: Region::EuropeWorldwide,
            ..Default::default()
        };
        form.set_answer(PrefField::PreRegister, true);
        form.set_answer(PrefField::StayInformed, false);
        form.set_answer(PrefField::Newsletter, true);

        let record = SubmissionRecord::from_form(&form);
        assert_eq!(record.full_name, "Ada Lovelace");
        assert_eq!(record.email, "ada@x.io");
        assert_eq!(record.interests, vec!["europe", "pre-register", "newsletter"]);
    }

    #[test]
    fn test_from_form_generates_distinct_ids() {
        let form = FormRecord::default();
        let a = SubmissionRecord::from_form(&form);
        let b = SubmissionRecord::from_form(&form);
        assert_ne!(a.submission_id, b.submission_id);
    }
}
