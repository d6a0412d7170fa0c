use chrono::{DateTime, Utc};
use std::fmt;

#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
pub enum PullRequestState {
    Open,
    Closed,
    Merged,
}

impl fmt::Display for PullRequestState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            PullRequestState::Open => "OPEN",
            PullRequestState::Closed => "CLOSED",
            PullRequestState::Merged => "MERGED",
        };
        f.write_str(state)
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct PullRequest {
    pub url: String,
    pub state: PullRequestState,
    pub merged_at: Option<DateTime<Utc>>,
    pub branch: String,
    /// Numbers of the issues this pull request declares it closes.
    pub closing_issues: Vec<u64>,
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        self.state == PullRequestState::Merged
    }
}
