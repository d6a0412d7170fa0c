pub mod anomaly;
pub mod filter;
pub mod linker;
pub mod model;
pub mod team;
pub mod window;

pub use filter::LabelFilter;
pub use linker::Linker;
pub use model::{AnnotatedCommit, AnnotatedIssue, Linkage};
pub use window::SprintWindow;

#[cfg(test)]
pub(crate) mod tests {
    use crate::model::{Commit, Issue, IssueState, PullRequest, PullRequestState};
    use chrono::{TimeZone, Utc};

    pub(crate) fn issue(number: u64, labels: &[&str]) -> Issue {
        Issue {
            number,
            title: format!("Issue {}", number),
            url: format!("https://github.com/sdirix/example-workflows/issues/{}", number),
            state: IssueState::Closed,
            labels: labels.iter().map(|l| l.to_string()).collect(),
        }
    }

    pub(crate) fn commit(oid: &str, message: &str, email: Option<&str>) -> Commit {
        Commit {
            oid: oid.to_string(),
            abbreviated_oid: oid.chars().take(7).collect(),
            headline: message.lines().next().unwrap_or_default().to_string(),
            message: message.to_string(),
            url: format!("https://github.com/sdirix/example-workflows/commit/{}", oid),
            committed_date: Utc.with_ymd_and_hms(2021, 12, 10, 9, 30, 0).unwrap(),
            author_email: email.map(String::from),
            pull_requests: vec![],
        }
    }

    /// A pull request merged in the middle of December 2021.
    pub(crate) fn pull_request(url: &str, branch: &str, closing: &[u64]) -> PullRequest {
        PullRequest {
            url: url.to_string(),
            state: PullRequestState::Merged,
            merged_at: Some(Utc.with_ymd_and_hms(2021, 12, 12, 16, 45, 0).unwrap()),
            branch: branch.to_string(),
            closing_issues: closing.to_vec(),
        }
    }
}
