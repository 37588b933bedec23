//! Submission orchestration: persist first, notify second

use super::traits::{LeadStore, NotificationDispatcher, SubmissionRecord};
use thiserror::Error;

/// Outcome of a successful submission. Persistence always succeeded;
/// `notified` is false when the email dispatch failed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionReceipt {
    pub persisted: bool,
    pub notified: bool,
}

/// Errors fatal to a submission attempt
#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("failed to persist submission: {0}")]
    Persistence(anyhow::Error),
}

/// Composes the persistence store and the notification dispatcher
/// into the single submit operation the wizard consumes.
pub struct SubmissionGateway {
    store: Box<dyn LeadStore>,
    dispatcher: Box<dyn NotificationDispatcher>,
}

impl SubmissionGateway {
    pub fn new(store: Box<dyn LeadStore>, dispatcher: Box<dyn NotificationDispatcher>) -> Self {
        Self { store, dispatcher }
    }

    /// Persist the record, then trigger notifications. Notification
    /// failure is soft: logged and reported in the receipt, never an
    /// error.
    pub async fn submit(&self, record: &SubmissionRecord) -> Result<SubmissionReceipt, SubmitError> {
        self.store
            .insert_lead(record)
            .await
            .map_err(SubmitError::Persistence)?;
        tracing::info!(submission_id = %record.submission_id, "lead persisted");

        match self.dispatcher.dispatch(record).await {
            Ok(()) => Ok(SubmissionReceipt {
                persisted: true,
                notified: true,
            }),
            Err(err) => {
                tracing::warn!(
                    submission_id = %record.submission_id,
                    error = %err,
                    "notification dispatch failed after successful persistence"
                );
                Ok(SubmissionReceipt {
                    persisted: true,
                    notified: false,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{MockLeadStore, MockNotificationDispatcher};
    use anyhow::anyhow;
    use crate::state::FormRecord;

    fn record() -> SubmissionRecord {
        SubmissionRecord::from_form(&FormRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@x.io".to_string(),
            ..Default::default()
        })
    }

    #[tokio::test]
    async fn test_submit_happy_path() {
        let mut store = MockLeadStore::new();
        store.expect_insert_lead().times(1).returning(|_| Ok(()));
        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher.expect_dispatch().times(1).returning(|_| Ok(()));

        let gateway = SubmissionGateway::new(Box::new(store), Box::new(dispatcher));
        let receipt = gateway.submit(&record()).await.unwrap();
        assert_eq!(
            receipt,
            SubmissionReceipt {
                persisted: true,
                notified: true
            }
        );
    }

    #[tokio::test]
    async fn test_persistence_failure_skips_notification() {
        let mut store = MockLeadStore::new();
        store
            .expect_insert_lead()
            .times(1)
            .returning(|_| Err(anyhow!("db unavailable")));
        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher.expect_dispatch().times(0);

        let gateway = SubmissionGateway::new(Box::new(store), Box::new(dispatcher));
        let result = gateway.submit(&record()).await;
        assert!(matches!(result, Err(SubmitError::Persistence(_))));
    }

    #[tokio::test]
    async fn test_notification_failure_is_soft() {
        let mut store = MockLeadStore::new();
        store.expect_insert_lead().times(1).returning(|_| Ok(()));
        let mut dispatcher = MockNotificationDispatcher::new();
        dispatcher
            .expect_dispatch()
            .times(1)
            .returning(|_| Err(anyhow!("smtp down")));

        let gateway = SubmissionGateway::new(Box::new(store), Box::new(dispatcher));
        let receipt = gateway.submit(&record()).await.unwrap();
        assert_eq!(
            receipt,
            SubmissionReceipt {
                persisted: true,
                notified: false
            }
        );
    }
}
