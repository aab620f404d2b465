use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use reqwest::{header, Client, StatusCode};

use crate::{config::Configuration, schedule::Session};

/// A single submission failed.  Never fatal for the run as a whole; the run
/// controller logs it against the day and moves on.
#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("request could not be completed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server rejected the entry: {0}")]
    Rejected(StatusCode),
}

/// Request body for the time-entry creation endpoint.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEntryBody {
    pub billable: bool,
    pub description: String,
    pub project_id: String,
    pub task_id: Option<String>,
    pub tag_ids: Option<Vec<String>>,
    pub custom_fields: Vec<serde_json::Value>,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeEntryBody {
    pub fn new(config: &Configuration, session: &Session) -> Self {
        Self {
            billable: true,
            description: config.description.clone(),
            project_id: config.project_id.clone(),
            task_id: None,
            tag_ids: None,
            custom_fields: Vec::new(),
            start: session.start,
            end: session.end,
        }
    }
}

pub struct TimeEntryClient {
    http_client: Client,
    base_url: String,
    workspace_id: String,
    auth_token: String,
}

impl TimeEntryClient {
    pub fn new(config: &Configuration) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );
        let http_client = Client::builder()
            .default_headers(headers)
            .build()
            .context("time entry client could not be built")?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            workspace_id: config.workspace_id.clone(),
            auth_token: config.auth_token.clone(),
        })
    }

    fn entries_url(&self) -> String {
        format!(
            "{}/workspaces/{}/timeEntries/full",
            self.base_url, self.workspace_id
        )
    }

    /// Creates one time entry.  Any non-2xx status is a rejection carrying
    /// the HTTP status text.
    pub async fn create_entry(&self, body: &TimeEntryBody) -> Result<(), SubmissionError> {
        let response = self
            .http_client
            .post(self.entries_url())
            .header("x-auth-token", &self.auth_token)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmissionError::Rejected(status));
        }
        Ok(())
    }
}
