//! HTTP implementations of the gateway collaborators
//!
//! Both endpoints follow the hosted-backend shape: a REST insert for
//! persistence and a serverless function for the two notification
//! emails. Templating and the operator address live server-side.

use super::traits::{LeadStore, NotificationDispatcher, SubmissionRecord};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

/// Build the shared HTTP client with a request timeout
pub fn build_http_client(timeout: Duration) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("funnel-tui/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .context("failed to build HTTP client")
}

/// Persists submissions via the REST insert endpoint
pub struct HttpLeadStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpLeadStore {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Serialize)]
struct InsertBody<'a> {
    full_name: &'a str,
    email: &'a str,
    interests: &'a [String],
}

#[async_trait]
impl LeadStore for HttpLeadStore {
    async fn insert_lead(&self, record: &SubmissionRecord) -> Result<()> {
        let url = format!("{}/rest/v1/user_responses", self.base_url);
        let response = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(&InsertBody {
                full_name: &record.full_name,
                email: &record.email,
                interests: &record.interests,
            })
            .send()
            .await
            .context("lead store request failed")?;

        response
            .error_for_status()
            .context("lead store rejected the submission")?;
        Ok(())
    }
}

/// Triggers the send-emails function after a successful insert
pub struct HttpNotificationDispatcher {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpNotificationDispatcher {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailBody<'a> {
    full_name: &'a str,
    email: &'a str,
    interests: &'a [String],
}

#[async_trait]
impl NotificationDispatcher for HttpNotificationDispatcher {
    async fn dispatch(&self, record: &SubmissionRecord) -> Result<()> {
        let url = format!("{}/functions/v1/send-emails", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&EmailBody {
                full_name: &record.full_name,
                email: &record.email,
                interests: &record.interests,
            })
            .send()
            .await
            .context("send-emails request failed")?;

        response
            .error_for_status()
            .context("send-emails function returned an error")?;
        Ok(())
    }
}
