//! Contains the daily submission check. [LeetCodeChecker] asks the public GraphQL api for the
//! newest accepted submission of a user and compares its local date with today.

pub mod error;
pub mod query;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument};

use crate::utils::{clock::Clock, time::is_same_day};

use error::CheckError;
use query::{AcceptedSubmission, GraphQlRequest, GraphQlResponse};

pub const DEFAULT_ENDPOINT: &str = "https://leetcode.com/graphql";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone)]
pub struct CheckerConfig {
    pub endpoint: String,
    /// Whole-request timeout, so a single unresponsive lookup can't stall the run.
    pub timeout: Duration,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

/// Intended to abstract the remote lookup so the batch loop can be tested without a network.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubmissionChecker: Send + Sync {
    /// Returns whether `username` has an accepted submission dated today in local time.
    /// A user without any accepted submissions is simply not solved.
    async fn check_solved_today(&self, username: &str) -> Result<bool, CheckError>;
}

pub struct LeetCodeChecker {
    client: Client,
    endpoint: String,
    clock: Box<dyn Clock>,
}

impl LeetCodeChecker {
    pub fn new(config: CheckerConfig, clock: Box<dyn Clock>) -> Result<Self, CheckError> {
        let client = Client::builder()
            .user_agent(concat!("acwatch/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint,
            clock,
        })
    }

    /// Newest accepted submission of `username`, if there is any.
    async fn latest_submission(
        &self,
        username: &str,
    ) -> Result<Option<AcceptedSubmission>, CheckError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest::recent_ac_submissions(username))
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            // The body is only diagnostic here, losing it is acceptable.
            let body = response.text().await.unwrap_or_default();
            return Err(CheckError::Api { status, body });
        }

        let body = response.text().await?;
        debug!("Received response for {username}: {body}");
        let response: GraphQlResponse = serde_json::from_str(&body)?;

        if !response.errors.is_empty() {
            return Err(CheckError::Query {
                messages: response.errors.into_iter().map(|e| e.message).collect(),
            });
        }
        let Some(data) = response.data else {
            return Err(CheckError::Decode(serde::de::Error::missing_field("data")));
        };

        let Some(list) = data.recent_ac_submission_list else {
            return Err(CheckError::Decode(serde::de::Error::missing_field(
                "recentAcSubmissionList",
            )));
        };

        // A null list is what the service sends for users without history.
        Ok(list.and_then(|list| list.into_iter().next()))
    }
}

#[async_trait]
impl SubmissionChecker for LeetCodeChecker {
    #[instrument(skip(self))]
    async fn check_solved_today(&self, username: &str) -> Result<bool, CheckError> {
        let Some(submission) = self.latest_submission(username).await? else {
            debug!("{username} has no accepted submissions");
            return Ok(false);
        };

        let timestamp =
            submission
                .timestamp
                .parse::<i64>()
                .map_err(|source| CheckError::Parse {
                    value: submission.timestamp.clone(),
                    source,
                })?;

        let solved = is_same_day(timestamp, &self.clock.time());
        if solved {
            info!("{username} solved {} today", submission.title_slug);
        } else {
            debug!(
                "{username} last solved {} at {timestamp}",
                submission.title_slug
            );
        }
        Ok(solved)
    }
}
