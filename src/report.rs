//! Aggregates per-user outcomes into the summary that gets printed and sent as a notification.

use tracing::{error, info};

use crate::checker::{error::CheckError, SubmissionChecker};

/// Outcome of checking a single user.
#[derive(Debug)]
pub enum CheckResult {
    Solved,
    NotSolved,
    CheckFailed(CheckError),
}

impl From<Result<bool, CheckError>> for CheckResult {
    fn from(value: Result<bool, CheckError>) -> Self {
        match value {
            Ok(true) => CheckResult::Solved,
            Ok(false) => CheckResult::NotSolved,
            Err(e) => CheckResult::CheckFailed(e),
        }
    }
}

/// Checks every user in roster order, one request at a time. A failed check only affects its
/// own entry.
pub async fn check_roster(
    checker: &dyn SubmissionChecker,
    roster: &[String],
) -> Vec<(String, CheckResult)> {
    let mut results = Vec::with_capacity(roster.len());
    for username in roster {
        let result = CheckResult::from(checker.check_solved_today(username).await);
        match &result {
            CheckResult::CheckFailed(e) => {
                error!("Could not check status for {username}: {e}")
            }
            v => info!("Checked {username}: {v:?}"),
        }
        results.push((username.clone(), result));
    }
    results
}

#[derive(Debug, Default)]
pub struct Report {
    pub solved: Vec<String>,
    pub not_solved: Vec<String>,
    /// Users whose check failed, with the rendered reason. They count toward the total only.
    pub failed: Vec<(String, String)>,
}

impl Report {
    pub fn new(results: Vec<(String, CheckResult)>) -> Self {
        let mut report = Report::default();
        for (username, result) in results {
            match result {
                CheckResult::Solved => report.solved.push(username),
                CheckResult::NotSolved => report.not_solved.push(username),
                CheckResult::CheckFailed(e) => report.failed.push((username, e.to_string())),
            }
        }
        report
    }

    pub fn total(&self) -> usize {
        self.solved.len() + self.not_solved.len() + self.failed.len()
    }

    /// One line headline, e.g. `LeetCode Status: 1/2 Solved`.
    pub fn summary(&self) -> String {
        format!(
            "LeetCode Status: {}/{} Solved",
            self.solved.len(),
            self.total()
        )
    }

    pub fn body(&self) -> String {
        let mut body = String::new();
        if !self.solved.is_empty() {
            body.push_str("✅ Solved:\n");
            for user in &self.solved {
                body.push_str(&format!("- {user}\n"));
            }
        }
        if !self.not_solved.is_empty() {
            body.push_str("\n❌ Not Solved Yet:\n");
            for user in &self.not_solved {
                body.push_str(&format!("- {user}\n"));
            }
        }
        if !self.failed.is_empty() {
            body.push_str("\n⚠️ Check Failed:\n");
            for (user, reason) in &self.failed {
                body.push_str(&format!("- {user}: {reason}\n"));
            }
        }
        body
    }
}
