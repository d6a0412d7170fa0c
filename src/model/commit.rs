use crate::model::PullRequest;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    pub oid: String,
    pub abbreviated_oid: String,
    pub headline: String,
    pub message: String,
    pub url: String,
    pub committed_date: DateTime<Utc>,
    pub author_email: Option<String>,
    /// Only filled when pull requests are resolved per commit.
    pub pull_requests: Vec<PullRequest>,
}

impl Commit {
    /// Domain part of the author email, `None` when the address has no `@domain`.
    pub fn author_domain(&self) -> Option<&str> {
        let email = self.author_email.as_deref()?;
        let (_, domain) = email.split_once('@')?;
        let domain = domain.trim();
        if domain.is_empty() {
            None
        } else {
            Some(domain)
        }
    }
}
