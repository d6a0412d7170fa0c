pub mod fetcher;
mod query;
mod wire;

use crate::error::Result;
use crate::model::{Commit, Milestone, PullRequest, Repository};
use chrono::NaiveDate;

pub use fetcher::GithubFetcher;

/// Called with the 1-based number of the page about to be requested.
pub type PageProgress<'a> = Box<dyn FnMut(usize) + Send + 'a>;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HistoryQuery {
    pub branch: String,
    pub since: Option<NaiveDate>,
    pub until: Option<NaiveDate>,
    /// Paging stops once this commit has been fetched.
    pub stop_at: Option<String>,
    pub with_pull_requests: bool,
}

/// Source of the raw sprint records.
pub trait RecordFetcher {
    /// Repository metadata and every issue of the milestone.
    async fn fetch_milestone(
        &self,
        milestone: u64,
        cb: PageProgress<'_>,
    ) -> Result<(Repository, Milestone)>;

    /// Branch history, newest commit first.
    async fn fetch_commit_history(
        &self,
        query: &HistoryQuery,
        cb: PageProgress<'_>,
    ) -> Result<Vec<Commit>>;

    /// Pull requests created on or before `until`.
    async fn fetch_pull_requests(
        &self,
        until: NaiveDate,
        cb: PageProgress<'_>,
    ) -> Result<Vec<PullRequest>>;
}
