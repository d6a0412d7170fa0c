mod commit;
mod config;
mod issue;
mod pull_request;
mod repository;

pub use commit::Commit;
pub use config::{PullRequestSource, ReportConfig};
pub use issue::{Issue, IssueState, Milestone};
pub use pull_request::{PullRequest, PullRequestState};
pub use repository::Repository;

#[cfg(test)]
pub(crate) use config::tests;
