use std::num::ParseIntError;

use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a single user's check. None of these abort the rest of the run.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Request could not be sent, timed out, or its body could not be read.
    #[error("error making http request: {0}")]
    Network(#[from] reqwest::Error),

    #[error("api returned non-200 status {status} | Body: {body}")]
    Api { status: StatusCode, body: String },

    #[error("error decoding response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The service answered 200 but reported GraphQL errors, e.g. for an unknown user.
    #[error("query failed: {}", messages.join("; "))]
    Query { messages: Vec<String> },

    #[error("could not parse timestamp {value:?}: {source}")]
    Parse {
        value: String,
        #[source]
        source: ParseIntError,
    },
}
