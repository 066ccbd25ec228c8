//! Typed GraphQL document for the recent accepted submissions lookup.

use serde::{Deserialize, Deserializer, Serialize};

/// The only GraphQL document acwatch sends. Username and limit travel as variables.
pub const RECENT_AC_SUBMISSIONS_QUERY: &str = "
    query recentAcSubmissionList($username: String!, $limit: Int!) {
        recentAcSubmissionList(username: $username, limit: $limit) {
            titleSlug
            timestamp
        }
    }";

/// Only the newest submission is ever needed.
pub const SUBMISSION_LIMIT: u32 = 1;

#[derive(Debug, Serialize)]
pub struct GraphQlRequest<'a> {
    pub query: &'static str,
    pub variables: RecentAcVariables<'a>,
}

#[derive(Debug, Serialize)]
pub struct RecentAcVariables<'a> {
    pub username: &'a str,
    pub limit: u32,
}

impl<'a> GraphQlRequest<'a> {
    pub fn recent_ac_submissions(username: &'a str) -> Self {
        Self {
            query: RECENT_AC_SUBMISSIONS_QUERY,
            variables: RecentAcVariables {
                username,
                limit: SUBMISSION_LIMIT,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse {
    pub data: Option<RecentAcData>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAcData {
    /// Outer [None] when the key is absent, inner [None] when the service sent `null`.
    #[serde(default, deserialize_with = "present")]
    pub recent_ac_submission_list: Option<Option<Vec<AcceptedSubmission>>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Newest accepted submission of a user. `timestamp` is unix seconds encoded as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptedSubmission {
    pub title_slug: String,
    pub timestamp: String,
}
