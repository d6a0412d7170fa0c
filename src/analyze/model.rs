use crate::analyze::anomaly::Warning;
use crate::model::{Commit, Issue, PullRequest};

/// An issue reference resolved for a commit, optionally carried by the pull
/// request that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IssueLink<'a> {
    pub number: u64,
    pub pull_request: Option<&'a PullRequest>,
}

/// A fetched commit together with what the linker and team attributor derived.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedCommit<'a> {
    pub commit: &'a Commit,
    pub team: Option<String>,
    /// Links into the milestone's issues; empty for unassignable commits.
    pub links: Vec<IssueLink<'a>>,
    pub warning: Option<Warning>,
}

impl<'a> AnnotatedCommit<'a> {
    pub fn is_assignable(&self) -> bool {
        !self.links.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotatedIssue<'a> {
    pub issue: &'a Issue,
    /// Label-derived teams, never empty.
    pub teams: Vec<String>,
    pub pull_requests: Vec<&'a PullRequest>,
    pub commits: Vec<&'a AnnotatedCommit<'a>>,
}

impl<'a> AnnotatedIssue<'a> {
    pub fn new(issue: &'a Issue, teams: Vec<String>) -> Self {
        Self {
            issue,
            teams,
            pull_requests: vec![],
            commits: vec![],
        }
    }

    /// No-op when a pull request with the same url is already attached.
    pub fn attach_pull_request(&mut self, pull_request: &'a PullRequest) {
        if !self.pull_requests.iter().any(|pr| pr.url == pull_request.url) {
            self.pull_requests.push(pull_request);
        }
    }

    /// No-op when a commit with the same oid is already attached.
    pub fn attach_commit(&mut self, commit: &'a AnnotatedCommit<'a>) {
        if !self.commits.iter().any(|c| c.commit.oid == commit.commit.oid) {
            self.commits.push(commit);
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Totals {
    pub commits: usize,
    pub pull_requests: usize,
}

/// Result of linking one sprint's records, before and after label filtering.
#[derive(Debug, Clone, PartialEq)]
pub struct Linkage<'a> {
    pub issues: Vec<AnnotatedIssue<'a>>,
    pub unassignable: Vec<&'a AnnotatedCommit<'a>>,
    pub totals: Totals,
    /// Issues dropped by the label filter.
    pub excluded: usize,
}
